//! Typed errors for the Prose pipeline, plus terminal rendering.
//!
//! Parse errors halt before any execution; runtime errors halt at the
//! first failing statement. Both carry the offending source span and are
//! rendered through one ariadne path with stable error codes.

use thiserror::Error;

use crate::syntax::{Span, Ty};

/// Parse failure. No partial statement list is ever executed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },
    #[error("expected a statement, found {found}")]
    ExpectedStatement { found: &'static str, span: Span },
    #[error("expected a type name (Integer, Float, String, Boolean), found {found}")]
    ExpectedTypeName { found: &'static str, span: Span },
    #[error("statement not terminated (found {found})")]
    UnterminatedStatement { found: &'static str, span: Span },
    #[error("unrecognized token")]
    InvalidToken { span: Span },
}

impl ParseError {
    /// Span of the offending position.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::ExpectedStatement { span, .. }
            | ParseError::ExpectedTypeName { span, .. }
            | ParseError::UnterminatedStatement { span, .. }
            | ParseError::InvalidToken { span } => *span,
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        "E001"
    }
}

/// Evaluation failure. Fatal at first occurrence; the failing statement
/// commits no binding.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RuntimeError {
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String, span: Span },
    #[error("invalid operands for `{op}`: {left} and {right}")]
    TypeMismatch {
        op: String,
        left: Ty,
        right: Ty,
        span: Span,
    },
    #[error("cannot cast {from} to {to}{detail}")]
    CastFailure {
        from: Ty,
        to: Ty,
        /// Extra context, e.g. the unparsable string.
        detail: String,
        span: Span,
    },
    #[error("division by zero")]
    DivideByZero { span: Span },
}

impl RuntimeError {
    /// Span of the offending expression or statement.
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::UndefinedVariable { span, .. }
            | RuntimeError::TypeMismatch { span, .. }
            | RuntimeError::CastFailure { span, .. }
            | RuntimeError::DivideByZero { span } => *span,
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::UndefinedVariable { .. } => "E002",
            RuntimeError::TypeMismatch { .. } => "E003",
            RuntimeError::CastFailure { .. } => "E004",
            RuntimeError::DivideByZero { .. } => "E005",
        }
    }
}

/// Any failure the pipeline can surface.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    pub fn span(&self) -> Span {
        match self {
            Error::Parse(e) => e.span(),
            Error::Runtime(e) => e.span(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::Parse(e) => e.code(),
            Error::Runtime(e) => e.code(),
        }
    }
}

/// Render an error as an ariadne report on stderr.
pub fn render(filename: &str, source: &str, error: &Error) {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let span = error.span();
    // Errors at end of input carry a zero-width span; widen to one byte
    // within bounds so the label renders.
    let mut range = span.range();
    if range.start >= source.len() {
        range = source.len().saturating_sub(1)..source.len();
    } else if range.is_empty() {
        range.end = range.start + 1;
    }

    let _ = Report::build(ReportKind::Error, filename, range.start)
        .with_code(error.code())
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, range))
                .with_message(match error {
                    Error::Parse(_) => "parsing stopped here",
                    Error::Runtime(_) => "evaluation failed here",
                })
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::UnexpectedToken {
            expected: "to",
            found: "integer literal",
            span: Span::new(4, 5),
        };
        assert_eq!(err.to_string(), "expected to, found integer literal");
        assert_eq!(err.span(), Span::new(4, 5));
    }

    #[test]
    fn test_runtime_error_codes_distinct() {
        let errs = [
            RuntimeError::UndefinedVariable {
                name: "x".into(),
                span: Span::DUMMY,
            },
            RuntimeError::TypeMismatch {
                op: "+".into(),
                left: Ty::Boolean,
                right: Ty::Integer,
                span: Span::DUMMY,
            },
            RuntimeError::CastFailure {
                from: Ty::String,
                to: Ty::Integer,
                detail: String::new(),
                span: Span::DUMMY,
            },
            RuntimeError::DivideByZero { span: Span::DUMMY },
        ];
        let codes: Vec<_> = errs.iter().map(RuntimeError::code).collect();
        let mut deduped = codes.clone();
        deduped.dedup();
        assert_eq!(codes, deduped);
    }

    #[test]
    fn test_divide_by_zero_display() {
        let err = RuntimeError::DivideByZero { span: Span::DUMMY };
        assert_eq!(err.to_string(), "division by zero");
    }
}
