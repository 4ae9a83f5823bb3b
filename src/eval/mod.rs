//! Postfix evaluation.
//!
//! [`eval_postfix`] runs one expression; [`ops`] holds the operator
//! semantics it applies.

pub mod evaluator;
pub mod ops;

pub use evaluator::eval_postfix;
pub use ops::{AssignOp, BinaryOp};
