//! Lexer for Prose using logos with string interning.
//!
//! - Keywords match case-insensitively (`SET`, `set`, `Set` are the same)
//! - `#`-comments run to end of line and are consumed here, as skip
//!   patterns over the token stream. String literals are matched as whole
//!   tokens first, so a `#` inside a literal never starts a comment.
//! - Newlines are real tokens: they terminate statements.

use logos::Logos;

use super::{Span, Token, TokenKind};
use crate::intern::Interner;

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    #[token("\n")]
    Newline,

    // === Keywords ===
    #[token("Set", ignore(ascii_case))]
    Set,
    #[token("to", ignore(ascii_case))]
    To,
    #[token("Def", ignore(ascii_case))]
    Def,
    #[token("as", ignore(ascii_case))]
    As,
    #[token("If", ignore(ascii_case))]
    If,
    #[token("is", ignore(ascii_case))]
    Is,
    #[token("not", ignore(ascii_case))]
    Not,
    #[token("Null", ignore(ascii_case))]
    Null,
    #[token("then", ignore(ascii_case))]
    Then,
    #[token("else", ignore(ascii_case))]
    Else,
    #[token("Print", ignore(ascii_case))]
    Print,
    #[token("true", ignore(ascii_case))]
    True,
    #[token("false", ignore(ascii_case))]
    False,

    // === Type keywords ===
    #[token("Integer", ignore(ascii_case))]
    IntegerType,
    #[token("Float", ignore(ascii_case))]
    FloatType,
    #[token("String", ignore(ascii_case))]
    StringType,
    #[token("Boolean", ignore(ascii_case))]
    BooleanType,

    // === Symbols ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token(".")]
    Dot,

    // === Literals ===

    // Float before Int so "1.3" is one token, not Int Dot Int.
    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i32>().ok())]
    Int(i32),

    // String literal (double-quoted)
    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,

    // Identifier
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Token list produced by the lexer.
#[derive(Clone, Debug, Default)]
pub struct TokenList {
    pub tokens: Vec<Token>,
}

impl TokenList {
    /// Get number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Lexer that produces interned tokens.
pub struct Lexer<'src, 'i> {
    source: &'src str,
    interner: &'i Interner,
}

impl<'src, 'i> Lexer<'src, 'i> {
    /// Create a new lexer.
    pub fn new(source: &'src str, interner: &'i Interner) -> Self {
        Lexer { source, interner }
    }

    /// Lex all tokens from the source.
    pub fn lex_all(&self) -> TokenList {
        let mut result = TokenList::default();
        let mut logos = RawToken::lexer(self.source);

        while let Some(token_result) = logos.next() {
            let span = Span::from_range(logos.span());
            let slice = logos.slice();

            let kind = match token_result {
                Ok(raw) => self.convert_token(raw, slice),
                Err(_) => TokenKind::Error,
            };
            result.tokens.push(Token::new(kind, span));
        }

        let eof_span = Span::point(self.source.len() as u32);
        result.tokens.push(Token::new(TokenKind::Eof, eof_span));

        result
    }

    /// Convert a raw token to a TokenKind, interning strings.
    fn convert_token(&self, raw: RawToken, slice: &str) -> TokenKind {
        match raw {
            RawToken::Int(n) => TokenKind::Int(n),
            RawToken::Float(x) => TokenKind::Float(x.to_bits()),
            RawToken::Str => {
                // Remove quotes and process escapes
                let content = &slice[1..slice.len() - 1];
                let unescaped = unescape_string(content);
                TokenKind::Str(self.interner.intern(&unescaped))
            }
            RawToken::Ident => TokenKind::Ident(self.interner.intern(slice)),

            RawToken::Set => TokenKind::Set,
            RawToken::To => TokenKind::To,
            RawToken::Def => TokenKind::Def,
            RawToken::As => TokenKind::As,
            RawToken::If => TokenKind::If,
            RawToken::Is => TokenKind::Is,
            RawToken::Not => TokenKind::Not,
            RawToken::Null => TokenKind::Null,
            RawToken::Then => TokenKind::Then,
            RawToken::Else => TokenKind::Else,
            RawToken::Print => TokenKind::Print,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,

            RawToken::IntegerType => TokenKind::IntegerType,
            RawToken::FloatType => TokenKind::FloatType,
            RawToken::StringType => TokenKind::StringType,
            RawToken::BooleanType => TokenKind::BooleanType,

            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Newline => TokenKind::Newline,
        }
    }
}

/// Process string escape sequences.
fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(c) => {
                    // Unknown escape - keep as-is
                    result.push('\\');
                    result.push(c);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> (Interner, Vec<TokenKind>) {
        let interner = Interner::new();
        let tokens = Lexer::new(source, &interner).lex_all();
        let kinds = tokens.tokens.into_iter().map(|t| t.kind).collect();
        (interner, kinds)
    }

    #[test]
    fn test_lex_set_statement() {
        let (_, kinds) = kinds("Set x to 2");
        assert!(matches!(
            kinds.as_slice(),
            [
                TokenKind::Set,
                TokenKind::Ident(_),
                TokenKind::To,
                TokenKind::Int(2),
                TokenKind::Eof
            ]
        ));
    }

    #[test]
    fn test_lex_case_insensitive_keywords() {
        let (_, kinds) = kinds("SET x TO 2 AS integer");
        assert!(matches!(kinds[0], TokenKind::Set));
        assert!(matches!(kinds[2], TokenKind::To));
        assert!(matches!(kinds[4], TokenKind::As));
        assert!(matches!(kinds[5], TokenKind::IntegerType));
    }

    #[test]
    fn test_lex_float_vs_int() {
        let (_, kinds) = kinds("1.9 19");
        assert_eq!(kinds[0], TokenKind::Float(1.9f64.to_bits()));
        assert_eq!(kinds[1], TokenKind::Int(19));
    }

    #[test]
    fn test_lex_comment_stripped() {
        let (_, kinds) = kinds("Set x to 2 # sets x\nPrint(x)");
        assert!(matches!(
            kinds.as_slice(),
            [
                TokenKind::Set,
                TokenKind::Ident(_),
                TokenKind::To,
                TokenKind::Int(2),
                TokenKind::Newline,
                TokenKind::Print,
                TokenKind::LParen,
                TokenKind::Ident(_),
                TokenKind::RParen,
                TokenKind::Eof
            ]
        ));
    }

    #[test]
    fn test_lex_hash_inside_string() {
        let (interner, kinds) = kinds(r#"Set nn to "this is a # line ""#);
        let TokenKind::Str(name) = kinds[3] else {
            panic!("expected string token, got {:?}", kinds[3]);
        };
        assert_eq!(interner.lookup(name), "this is a # line ");
    }

    #[test]
    fn test_lex_string_escapes() {
        let (interner, kinds) = kinds(r#""a\"b\nc""#);
        let TokenKind::Str(name) = kinds[0] else {
            panic!("expected string token");
        };
        assert_eq!(interner.lookup(name), "a\"b\nc");
    }

    #[test]
    fn test_lex_period_terminator() {
        let (_, kinds) = kinds("Print(x).");
        assert!(matches!(
            kinds.as_slice(),
            [
                TokenKind::Print,
                TokenKind::LParen,
                TokenKind::Ident(_),
                TokenKind::RParen,
                TokenKind::Dot,
                TokenKind::Eof
            ]
        ));
    }

    #[test]
    fn test_lex_keyword_prefix_is_identifier() {
        let (interner, kinds) = kinds("settle");
        let TokenKind::Ident(name) = kinds[0] else {
            panic!("expected identifier, got {:?}", kinds[0]);
        };
        assert_eq!(interner.lookup(name), "settle");
    }

    #[test]
    fn test_lex_unrecognized_token() {
        let (_, kinds) = kinds("Set x to @");
        assert!(kinds.contains(&TokenKind::Error));
    }
}
