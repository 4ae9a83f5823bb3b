//! Error types and handling for the rpn-rs crate.
//!
//! This module defines the error types used throughout the crate for tokenizing
//! and evaluating postfix expressions and for maintaining the symbol table.

use std::fmt;
use std::num::ParseIntError;
use std::result;

/// Result type used throughout the crate.
///
/// This is a convenience type alias that uses the `ExprError` type for the error variant.
pub type Result<T> = result::Result<T, ExprError>;

/// Error type for postfix expression evaluation.
///
/// Every variant is local to the expression that produced it: the batch
/// driver reports it as `INVALID expression format` and moves on to the
/// next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// Error when parsing an integer operand.
    ///
    /// This occurs when a token that looks numeric does not fit the
    /// integer type, for example `99999999999999999999`.
    Parse(ParseIntError),

    /// Error during tokenization.
    ///
    /// The string contains a detailed error message.
    Tokenizer(String),

    /// The token stream is not a well-formed postfix expression.
    ///
    /// Covers stack underflow, leftover operands, a non-numeric final result
    /// and compound assignments without a target identifier.
    InvalidExpression(String),

    /// Error when a variable referenced in an expression has never been assigned.
    UnknownVariable { name: String },

    /// Error when division by zero is attempted.
    ///
    /// Also raised for a zero base with a negative exponent.
    DivideByZero,

    /// Error when an arithmetic result does not fit in an `i64`.
    Overflow {
        /// The operator symbol that overflowed
        op: &'static str,
    },

    /// Error when a direct-indexed rehash finds its target slot taken.
    ///
    /// The table is left untouched at its old capacity.
    RehashCollision {
        /// Capacity the table was growing into
        capacity: usize,
    },

    /// Error when capacity is exceeded for a fixed-size container.
    ///
    /// The string indicates which container ran out of room.
    CapacityExceeded(&'static str),

    /// Error when a variable name is too long for the heapless key buffer.
    StringTooLong,
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::Parse(err) => write!(f, "Parse error: {}", err),
            ExprError::Tokenizer(err) => write!(f, "Tokenizer error: {}", err),
            ExprError::InvalidExpression(err) => write!(f, "Invalid expression: {}", err),
            ExprError::UnknownVariable { name } => {
                write!(f, "Unknown variable: '{}'", name)
            }
            ExprError::DivideByZero => write!(f, "Division by zero"),
            ExprError::Overflow { op } => write!(f, "Integer overflow in '{}'", op),
            ExprError::RehashCollision { capacity } => {
                write!(f, "Rehash collision while growing to capacity {}", capacity)
            }
            ExprError::CapacityExceeded(container_type) => {
                write!(f, "Capacity exceeded for {}", container_type)
            }
            ExprError::StringTooLong => write!(f, "String too long for heapless buffer"),
        }
    }
}

impl std::error::Error for ExprError {}

impl From<ParseIntError> for ExprError {
    fn from(err: ParseIntError) -> ExprError {
        ExprError::Parse(err)
    }
}
