//! Arithmetic and assignment operators.
//!
//! Every operator works on `i64` with checked arithmetic, so overflow and
//! division by zero come back as errors instead of panics.

use crate::error::{ExprError, Result};

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

/// Assignment operators. The compound forms carry their arithmetic part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `+=`, `-=`, `*=`, `/=`
    Compound(BinaryOp),
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Power => "^",
        }
    }

    /// Apply a binary operation to two values
    pub fn apply(self, left: i64, right: i64) -> Result<i64> {
        let overflow = ExprError::Overflow { op: self.symbol() };
        match self {
            BinaryOp::Add => left.checked_add(right).ok_or(overflow),
            BinaryOp::Subtract => left.checked_sub(right).ok_or(overflow),
            BinaryOp::Multiply => left.checked_mul(right).ok_or(overflow),
            BinaryOp::Divide => {
                if right == 0 {
                    return Err(ExprError::DivideByZero);
                }
                // i64::MIN / -1 is the only remaining failure
                left.checked_div(right).ok_or(overflow)
            }
            BinaryOp::Power => power(left, right).ok_or(overflow)?,
        }
    }
}

/// `base ^ exp`, truncated toward zero for negative exponents.
///
/// The outer `Option` is `None` on overflow.
fn power(base: i64, exp: i64) -> Option<Result<i64>> {
    if exp < 0 {
        return Some(match base {
            0 => Err(ExprError::DivideByZero),
            1 => Ok(1),
            -1 => Ok(if exp % 2 == 0 { 1 } else { -1 }),
            _ => Ok(0),
        });
    }
    match base {
        0 | 1 => return Some(Ok(if exp == 0 { 1 } else { base })),
        -1 => return Some(Ok(if exp % 2 == 0 { 1 } else { -1 })),
        _ => {}
    }
    let exp = u32::try_from(exp).ok()?;
    base.checked_pow(exp).map(Ok)
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Compound(BinaryOp::Add) => "+=",
            AssignOp::Compound(BinaryOp::Subtract) => "-=",
            AssignOp::Compound(BinaryOp::Multiply) => "*=",
            AssignOp::Compound(BinaryOp::Divide) => "/=",
            AssignOp::Compound(BinaryOp::Power) => "^=",
        }
    }
}

/// Parse a binary operator token.
pub fn parse_binary_op(op: &str) -> Result<BinaryOp> {
    match op {
        "+" => Ok(BinaryOp::Add),
        "-" => Ok(BinaryOp::Subtract),
        "*" => Ok(BinaryOp::Multiply),
        "/" => Ok(BinaryOp::Divide),
        "^" => Ok(BinaryOp::Power),
        _ => Err(ExprError::InvalidExpression(format!(
            "Unknown operator: {}",
            op
        ))),
    }
}

/// Parse an assignment operator token by stripping the trailing `=`.
pub fn parse_assign_op(op: &str) -> Result<AssignOp> {
    match op.strip_suffix('=') {
        Some("") => Ok(AssignOp::Assign),
        Some(arith @ ("+" | "-" | "*" | "/")) => Ok(AssignOp::Compound(parse_binary_op(arith)?)),
        _ => Err(ExprError::InvalidExpression(format!(
            "Unknown assignment operator: {}",
            op
        ))),
    }
}
