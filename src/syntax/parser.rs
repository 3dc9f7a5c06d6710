//! Parser for Prose producing a flattened statement list.
//!
//! Recursive descent over the token list. Unlike a compiler front end
//! with error recovery, parsing halts at the first malformed statement:
//! the contract is that no partial statement list is ever executed.

use crate::errors::ParseError;
use crate::intern::Name;

use super::{
    BinaryOp, Expr, ExprArena, ExprId, ExprKind, Script, Span, Stmt, StmtKind, Token, TokenKind,
    TokenList, Ty,
};

/// Parser state.
pub struct Parser<'src> {
    /// Token list from lexer.
    tokens: &'src TokenList,
    /// Expression arena.
    arena: ExprArena,
    /// Current token index.
    pos: usize,
}

impl<'src> Parser<'src> {
    /// Create a new parser.
    pub fn new(tokens: &'src TokenList) -> Self {
        Parser {
            tokens,
            arena: ExprArena::new(),
            pos: 0,
        }
    }

    /// Parse a complete script.
    pub fn parse_script(mut self) -> Result<Script, ParseError> {
        let mut stmts = Vec::new();

        self.skip_newlines();
        while !self.at_end() {
            stmts.push(self.parse_statement()?);
            self.expect_terminator()?;
            self.skip_newlines();
        }

        Ok(Script {
            stmts,
            arena: self.arena,
        })
    }

    // ===== Token access =====

    fn current(&self) -> &Token {
        &self.tokens.tokens[self.pos.min(self.tokens.tokens.len() - 1)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    fn prev_span(&self) -> Span {
        self.tokens.tokens[self.pos.saturating_sub(1)].span
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn advance(&mut self) -> &Token {
        let index = self.pos;
        if !self.at_end() {
            self.pos += 1;
        }
        &self.tokens.tokens[index]
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn consume(&mut self, kind: &TokenKind, expected: &'static str) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(self.current_kind(), TokenKind::Newline) {
            self.advance();
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        if matches!(self.current_kind(), TokenKind::Error) {
            return ParseError::InvalidToken {
                span: self.current_span(),
            };
        }
        ParseError::UnexpectedToken {
            expected,
            found: self.current_kind().display_name(),
            span: self.current_span(),
        }
    }

    /// A statement ends at a period, a newline, or the end of the script.
    fn expect_terminator(&mut self) -> Result<(), ParseError> {
        match self.current_kind() {
            TokenKind::Dot | TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            other => Err(ParseError::UnterminatedStatement {
                found: other.display_name(),
                span: self.current_span(),
            }),
        }
    }

    // ===== Statement parsing =====

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.current_kind() {
            TokenKind::Set => self.parse_set(),
            TokenKind::Def => self.parse_def(),
            TokenKind::If => self.parse_if(),
            TokenKind::Print => self.parse_print(),
            TokenKind::Error => Err(ParseError::InvalidToken {
                span: self.current_span(),
            }),
            other => Err(ParseError::ExpectedStatement {
                found: other.display_name(),
                span: self.current_span(),
            }),
        }
    }

    fn parse_set(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        self.consume(&TokenKind::Set, "Set")?;
        let name = self.parse_ident()?;

        match self.current_kind() {
            TokenKind::To => {
                self.advance();
                let expr = self.expression()?;
                let span = start.merge(self.prev_span());
                // A top-level cast is the cast-at-bind statement form.
                let kind = if let ExprKind::Cast { expr: inner, ty } = self.arena.get(expr).kind {
                    StmtKind::SetCast {
                        name,
                        expr: inner,
                        ty,
                    }
                } else {
                    StmtKind::Set { name, expr }
                };
                Ok(Stmt::new(kind, span))
            }
            TokenKind::As => {
                self.advance();
                let ty = self.parse_type_name()?;
                let span = start.merge(self.prev_span());
                Ok(Stmt::new(StmtKind::Decl { name, ty: Some(ty) }, span))
            }
            _ => Err(self.unexpected("to or as")),
        }
    }

    fn parse_def(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        self.consume(&TokenKind::Def, "Def")?;
        let name = self.parse_ident()?;

        let ty = if self.check(&TokenKind::As) {
            self.advance();
            Some(self.parse_type_name()?)
        } else {
            None
        };

        let span = start.merge(self.prev_span());
        Ok(Stmt::new(StmtKind::Decl { name, ty }, span))
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        self.consume(&TokenKind::If, "If")?;
        let name = self.parse_ident()?;
        self.consume(&TokenKind::Is, "is")?;

        let negated = if self.check(&TokenKind::Not) {
            self.advance();
            true
        } else {
            false
        };

        self.consume(&TokenKind::Null, "Null")?;
        self.consume(&TokenKind::Then, "then")?;
        let then_stmt = self.parse_statement()?;
        self.consume(&TokenKind::Else, "else")?;
        let else_stmt = self.parse_statement()?;

        let span = start.merge(self.prev_span());
        Ok(Stmt::new(
            StmtKind::If {
                name,
                negated,
                then_stmt: Box::new(then_stmt),
                else_stmt: Box::new(else_stmt),
            },
            span,
        ))
    }

    fn parse_print(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        self.consume(&TokenKind::Print, "Print")?;
        self.consume(&TokenKind::LParen, "(")?;
        let expr = self.expression()?;
        self.consume(&TokenKind::RParen, ")")?;

        let span = start.merge(self.prev_span());
        Ok(Stmt::new(StmtKind::Print { expr }, span))
    }

    fn parse_ident(&mut self) -> Result<Name, ParseError> {
        if let TokenKind::Ident(name) = *self.current_kind() {
            self.advance();
            Ok(name)
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    fn parse_type_name(&mut self) -> Result<Ty, ParseError> {
        let ty = match self.current_kind() {
            TokenKind::IntegerType => Ty::Integer,
            TokenKind::FloatType => Ty::Float,
            TokenKind::StringType => Ty::String,
            TokenKind::BooleanType => Ty::Boolean,
            other => {
                return Err(ParseError::ExpectedTypeName {
                    found: other.display_name(),
                    span: self.current_span(),
                })
            }
        };
        self.advance();
        Ok(ty)
    }

    // ===== Expression parsing =====

    fn expression(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.term()?;
            lhs = self.alloc_binary(lhs, op, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.factor()?;
            lhs = self.alloc_binary(lhs, op, rhs);
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.primary()?;
        while self.check(&TokenKind::As) {
            self.advance();
            let ty = self.parse_type_name()?;
            let span = self.arena.get(expr).span.merge(self.prev_span());
            expr = self.arena.alloc(Expr::new(ExprKind::Cast { expr, ty }, span));
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<ExprId, ParseError> {
        let span = self.current_span();
        let kind = match *self.current_kind() {
            TokenKind::Int(n) => ExprKind::Int(n),
            TokenKind::Float(bits) => ExprKind::Float(f64::from_bits(bits)),
            TokenKind::Str(name) => ExprKind::Str(name),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Ident(name) => ExprKind::Var(name),
            TokenKind::LParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(&TokenKind::RParen, ")")?;
                return Ok(expr);
            }
            TokenKind::Error => {
                return Err(ParseError::InvalidToken {
                    span: self.current_span(),
                })
            }
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        Ok(self.arena.alloc(Expr::new(kind, span)))
    }

    fn alloc_binary(&mut self, left: ExprId, op: BinaryOp, right: ExprId) -> ExprId {
        let span = self.arena.get(left).span.merge(self.arena.get(right).span);
        self.arena
            .alloc(Expr::new(ExprKind::Binary { left, op, right }, span))
    }
}
