//! Operator semantics on runtime values.

use crate::error::RuntimeErrorKind;
use rill_parser::token::TokenKind;
use rill_value::Value;
use std::convert::TryFrom;

type OpResult = Result<Value, RuntimeErrorKind>;

/// Applies the binary operator `op`. `symbol` is the operator as written, for error messages.
///
/// `&&`/`&` and `||`/`|` are logical on two booleans and bitwise on two integers.
/// `==` and `!=` accept operands of different types, which are never equal.
pub(crate) fn binary(op: TokenKind, symbol: &str, lhs: Value, rhs: Value) -> OpResult {
    use Value::{Boolean, Integer};

    match (op, lhs, rhs) {
        (TokenKind::Eq, l, r) => Ok(Boolean(l == r)),
        (TokenKind::Neq, l, r) => Ok(Boolean(l != r)),
        (TokenKind::And, Boolean(l), Boolean(r)) | (TokenKind::BitAnd, Boolean(l), Boolean(r)) => {
            Ok(Boolean(l & r))
        }
        (TokenKind::Or, Boolean(l), Boolean(r)) | (TokenKind::BitOr, Boolean(l), Boolean(r)) => {
            Ok(Boolean(l | r))
        }
        (_, Integer(l), Integer(r)) => integer_binary(op, symbol, l, r),
        (_, l, r) => Err(RuntimeErrorKind::InvalidOperands {
            op: symbol.to_string(),
            left: l.value_type(),
            right: r.value_type(),
        }),
    }
}

fn integer_binary(op: TokenKind, symbol: &str, l: i64, r: i64) -> OpResult {
    /// Generate a comparison returning a boolean.
    macro_rules! gen_comparison {
        ($op: tt) => {
            Ok(Value::Boolean(l $op r))
        };
    }

    let value = match op {
        TokenKind::Plus => l.wrapping_add(r),
        TokenKind::Minus => l.wrapping_sub(r),
        TokenKind::Mul => l.wrapping_mul(r),
        TokenKind::Quo => {
            if r == 0 {
                return Err(RuntimeErrorKind::DivisionByZero);
            }
            l.wrapping_div(r)
        }
        TokenKind::Rem => {
            if r == 0 {
                return Err(RuntimeErrorKind::DivisionByZero);
            }
            l.wrapping_rem(r)
        }
        TokenKind::And | TokenKind::BitAnd => l & r,
        TokenKind::Or | TokenKind::BitOr => l | r,
        TokenKind::Xor => l ^ r,
        TokenKind::Shl | TokenKind::Shr => shift(op, l, r)?,
        TokenKind::Lt => return gen_comparison!(<),
        TokenKind::Lte => return gen_comparison!(<=),
        TokenKind::Gt => return gen_comparison!(>),
        TokenKind::Gte => return gen_comparison!(>=),
        _ => {
            return Err(RuntimeErrorKind::InvalidOperands {
                op: symbol.to_string(),
                left: rill_value::ValueType::Integer,
                right: rill_value::ValueType::Integer,
            })
        }
    };
    Ok(Value::Integer(value))
}

/// Shifts by 64 bits or more saturate instead of wrapping the shift amount.
fn shift(op: TokenKind, l: i64, r: i64) -> Result<i64, RuntimeErrorKind> {
    if r < 0 {
        return Err(RuntimeErrorKind::NegativeShift(r));
    }
    let amount = u32::try_from(r).unwrap_or(u32::MAX);
    Ok(if op == TokenKind::Shl {
        l.checked_shl(amount).unwrap_or(0)
    } else {
        l.checked_shr(amount).unwrap_or(if l < 0 { -1 } else { 0 })
    })
}

/// Applies the prefix operator `op`.
pub(crate) fn unary(op: TokenKind, symbol: &str, operand: Value) -> OpResult {
    match (op, operand) {
        (TokenKind::Plus, Value::Integer(value)) => Ok(Value::Integer(value)),
        (TokenKind::Minus, Value::Integer(value)) => Ok(Value::Integer(value.wrapping_neg())),
        (TokenKind::Not, Value::Boolean(value)) => Ok(Value::Boolean(!value)),
        (_, operand) => Err(RuntimeErrorKind::InvalidOperand {
            op: symbol.to_string(),
            operand: operand.value_type(),
        }),
    }
}

/// The binary operator applied by a compound assignment operator (`+=` applies `+`).
pub(crate) fn compound_operator(op: TokenKind) -> Option<TokenKind> {
    match op {
        TokenKind::PlusAssign => Some(TokenKind::Plus),
        TokenKind::MinusAssign => Some(TokenKind::Minus),
        TokenKind::MulAssign => Some(TokenKind::Mul),
        TokenKind::QuoAssign => Some(TokenKind::Quo),
        TokenKind::RemAssign => Some(TokenKind::Rem),
        _ => None,
    }
}
