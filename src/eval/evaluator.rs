//! Expression evaluation.
//!
//! Evaluates arena expressions against a read-only view of the variable
//! store. Numeric widening is an explicit promotion step: a mixed
//! Integer/Float pair promotes the Integer operand to Float before the
//! operator is applied, so the rule is auditable in one place.

use std::rc::Rc;

use super::store::VariableStore;
use super::value::Value;
use crate::errors::RuntimeError;
use crate::intern::Interner;
use crate::syntax::{BinaryOp, ExprArena, ExprId, ExprKind, Span, Ty};

/// Result of evaluation.
pub type EvalResult = Result<Value, RuntimeError>;

/// Tree-walking evaluator for Prose expressions.
pub struct Evaluator<'a> {
    /// String interner for name and literal lookup.
    interner: &'a Interner,
    /// Expression arena of the script being run.
    arena: &'a ExprArena,
    /// Read-only view of the current store.
    store: &'a VariableStore,
}

impl<'a> Evaluator<'a> {
    /// Create a new evaluator.
    pub fn new(interner: &'a Interner, arena: &'a ExprArena, store: &'a VariableStore) -> Self {
        Evaluator {
            interner,
            arena,
            store,
        }
    }

    /// Evaluate an expression.
    pub fn eval(&self, id: ExprId) -> EvalResult {
        let expr = self.arena.get(id);
        match expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(n)),
            ExprKind::Float(x) => Ok(Value::Float(x)),
            ExprKind::Str(name) => Ok(Value::str(self.interner.lookup(name))),
            ExprKind::Bool(b) => Ok(Value::Bool(b)),

            ExprKind::Var(name) => {
                self.store
                    .lookup(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UndefinedVariable {
                        name: self.interner.lookup(name).to_string(),
                        span: expr.span,
                    })
            }

            ExprKind::Binary { left, op, right } => {
                let left_val = self.eval(left)?;
                let right_val = self.eval(right)?;
                eval_binary(left_val, op, right_val, expr.span)
            }

            ExprKind::Cast { expr: inner, ty } => {
                let value = self.eval(inner)?;
                cast_value(value, ty, expr.span)
            }
        }
    }
}

/// Apply a binary operator, promoting mixed numeric operands.
fn eval_binary(left: Value, op: BinaryOp, right: Value, span: Span) -> EvalResult {
    // A String operand turns `+` into concatenation.
    if op == BinaryOp::Add
        && (matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)))
    {
        return concat(left, right, span);
    }

    match (left, right) {
        // Integer operations
        (Value::Int(a), Value::Int(b)) => match op {
            BinaryOp::Add => Ok(Value::Int(a.wrapping_add(b))),
            BinaryOp::Sub => Ok(Value::Int(a.wrapping_sub(b))),
            BinaryOp::Mul => Ok(Value::Int(a.wrapping_mul(b))),
            BinaryOp::Div => {
                if b == 0 {
                    Err(RuntimeError::DivideByZero { span })
                } else {
                    Ok(Value::Int(a.wrapping_div(b)))
                }
            }
        },

        // Float operations
        (Value::Float(a), Value::Float(b)) => eval_binary_float(a, op, b, span),

        // Mixed pair: promote the Integer operand to Float, then combine.
        (Value::Int(a), Value::Float(b)) => eval_binary_float(f64::from(a), op, b, span),
        (Value::Float(a), Value::Int(b)) => eval_binary_float(a, op, f64::from(b), span),

        (left, right) => Err(RuntimeError::TypeMismatch {
            op: op.symbol().to_string(),
            left: left.ty(),
            right: right.ty(),
            span,
        }),
    }
}

fn eval_binary_float(a: f64, op: BinaryOp, b: f64, span: Span) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => {
            // Fail rather than producing infinity or NaN.
            if b == 0.0 {
                Err(RuntimeError::DivideByZero { span })
            } else {
                Ok(Value::Float(a / b))
            }
        }
    }
}

/// Concatenate under `+` when either operand is a String. The other side
/// must be Integer, Float, or String; Boolean and Null stay invalid.
fn concat(left: Value, right: Value, span: Span) -> EvalResult {
    let concatenable =
        |v: &Value| matches!(v, Value::Int(_) | Value::Float(_) | Value::Str(_));
    if !concatenable(&left) || !concatenable(&right) {
        return Err(RuntimeError::TypeMismatch {
            op: BinaryOp::Add.symbol().to_string(),
            left: left.ty(),
            right: right.ty(),
            span,
        });
    }
    let mut result = left.display_value();
    result.push_str(&right.display_value());
    Ok(Value::Str(Rc::new(result)))
}

/// Cast a value to a target type.
///
/// Float to Integer truncates toward zero; Integer to Float is exact;
/// numeric to String renders canonical text; String to numeric parses if
/// lexically valid, else `CastFailure`. Boolean is never a cast source or
/// target, and Null cannot be cast.
pub fn cast_value(value: Value, ty: Ty, span: Span) -> EvalResult {
    match (value, ty) {
        // Identity casts are no-ops.
        (value @ Value::Int(_), Ty::Integer)
        | (value @ Value::Float(_), Ty::Float)
        | (value @ Value::Str(_), Ty::String) => Ok(value),

        (Value::Float(x), Ty::Integer) => Ok(Value::Int(x.trunc() as i32)),
        (Value::Int(n), Ty::Float) => Ok(Value::Float(f64::from(n))),

        (Value::Int(n), Ty::String) => Ok(Value::str(n.to_string())),
        (Value::Float(x), Ty::String) => Ok(Value::str(x.to_string())),

        (Value::Str(s), Ty::Integer) => match s.parse::<i32>() {
            Ok(n) => Ok(Value::Int(n)),
            Err(_) => Err(RuntimeError::CastFailure {
                from: Ty::String,
                to: Ty::Integer,
                detail: format!(": {:?} is not an integer literal", s),
                span,
            }),
        },
        (Value::Str(s), Ty::Float) => match s.parse::<f64>() {
            Ok(x) => Ok(Value::Float(x)),
            Err(_) => Err(RuntimeError::CastFailure {
                from: Ty::String,
                to: Ty::Float,
                detail: format!(": {:?} is not a float literal", s),
                span,
            }),
        },

        (value, ty) => Err(RuntimeError::TypeMismatch {
            op: "as".to_string(),
            left: value.ty(),
            right: ty,
            span,
        }),
    }
}
