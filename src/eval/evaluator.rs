//! Postfix evaluation over a bounded operand stack.
//!
//! Tokens are consumed left to right. Operands are pushed as text and only
//! classified when an operator pops them, so the same stack slot can hold a
//! literal, a variable name or a computed result.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::error::{ExprError, Result};
use crate::eval::ops::{AssignOp, parse_assign_op, parse_binary_op};
use crate::lexer::{Lexer, Token};
use crate::stack::BoundedStack;
use crate::symbol_table::SymbolTable;
use crate::types::{Operand, TokenKind};

/// Evaluates one postfix expression against `table`.
///
/// Assignments are written into `table` as they execute and stay there even
/// if a later token fails. Clearing the table between expressions is the
/// caller's job.
///
/// # Examples
///
/// ```
/// use rpn_rs::eval::eval_postfix;
/// use rpn_rs::symbol_table::SymbolTable;
///
/// let mut table = SymbolTable::new();
/// assert_eq!(eval_postfix("3 4 + 2 *", &mut table).unwrap(), 14);
/// assert_eq!(eval_postfix("x 5 = x 2 ^", &mut table).unwrap(), 25);
/// assert_eq!(table.get("x"), Some(&5));
/// ```
pub fn eval_postfix(expression: &str, table: &mut SymbolTable<i64>) -> Result<i64> {
    let result = Lexer::new(expression)
        .tokenize()
        .and_then(|tokens| run_tokens(&tokens, table));
    if let Err(e) = &result {
        debug!(expression, error = %e, "evaluation failed");
    }
    result
}

fn run_tokens(tokens: &[Token<'_>], table: &mut SymbolTable<i64>) -> Result<i64> {
    let mut machine = PostfixMachine::new(tokens.len(), table);
    for token in tokens {
        trace!(
            token = token.text,
            position = token.position,
            depth = machine.stack.len(),
            "postfix token"
        );
        machine.step(token)?;
    }
    machine.finish()
}

struct PostfixMachine<'a, 't> {
    stack: BoundedStack<Cow<'a, str>>,
    table: &'t mut SymbolTable<i64>,
    last_assigned: Option<i64>,
}

impl<'a, 't> PostfixMachine<'a, 't> {
    fn new(token_count: usize, table: &'t mut SymbolTable<i64>) -> Self {
        Self {
            stack: BoundedStack::with_capacity(token_count),
            table,
            last_assigned: None,
        }
    }

    fn step(&mut self, token: &Token<'a>) -> Result<()> {
        match token.kind {
            TokenKind::Operator => {
                let op = parse_binary_op(token.text)?;
                let (left, right) = self.pop_pair(op.symbol())?;
                let rhs = self.resolve(&right)?;
                let lhs = self.resolve(&left)?;
                let value = op.apply(lhs, rhs)?;
                self.stack.push(Cow::Owned(value.to_string()));
            }
            TokenKind::Assign => self.assign(parse_assign_op(token.text)?)?,
            TokenKind::Number | TokenKind::Variable | TokenKind::Other => {
                self.stack.push(Cow::Borrowed(token.text));
            }
        }
        Ok(())
    }

    /// Pops the right operand, then the left one.
    fn pop_pair(&mut self, op: &str) -> Result<(Cow<'a, str>, Cow<'a, str>)> {
        let right = self.stack.pop();
        let left = self.stack.pop();
        match (left, right) {
            (Some(left), Some(right)) => Ok((left, right)),
            _ => Err(ExprError::InvalidExpression(format!(
                "'{}' needs two operands",
                op
            ))),
        }
    }

    fn resolve(&self, text: &str) -> Result<i64> {
        match Operand::classify(text) {
            Operand::Number(digits) => Ok(digits.parse()?),
            Operand::Variable(name) => {
                self.table
                    .get(name)
                    .copied()
                    .ok_or_else(|| ExprError::UnknownVariable {
                        name: name.to_string(),
                    })
            }
            Operand::Malformed(text) => Err(ExprError::InvalidExpression(format!(
                "'{}' is neither a number nor a variable",
                text
            ))),
        }
    }

    fn assign(&mut self, op: AssignOp) -> Result<()> {
        let (target, value) = match op {
            AssignOp::Assign => {
                let (variable, value) = self.pop_pair(op.symbol())?;
                let value = self.resolve(&value)?;
                (variable, value)
            }
            AssignOp::Compound(arith) => {
                let (left, right) = self.pop_pair(op.symbol())?;
                // operand1 wins when both sides name a variable
                let target_is_left = if Operand::classify(&left).is_variable() {
                    true
                } else if Operand::classify(&right).is_variable() {
                    false
                } else {
                    return Err(ExprError::InvalidExpression(format!(
                        "'{}' needs a variable operand",
                        op.symbol()
                    )));
                };
                let rhs = self.resolve(&right)?;
                let lhs = self.resolve(&left)?;
                let value = arith.apply(lhs, rhs)?;
                (if target_is_left { left } else { right }, value)
            }
        };

        debug!(variable = %target, value, op = op.symbol(), "assignment");
        self.table.put(&target, value)?;
        self.last_assigned = Some(value);
        Ok(())
    }

    fn finish(mut self) -> Result<i64> {
        let Some(result) = self.stack.pop() else {
            return self.last_assigned.ok_or_else(|| {
                ExprError::InvalidExpression("no value left on the stack".to_string())
            });
        };
        if !self.stack.is_empty() {
            return Err(ExprError::InvalidExpression(format!(
                "{} operand(s) left on the stack",
                self.stack.len()
            )));
        }
        match Operand::classify(&result) {
            Operand::Number(digits) => Ok(digits.parse()?),
            Operand::Variable(name) => Err(ExprError::InvalidExpression(format!(
                "result '{}' is an identifier, not a value",
                name
            ))),
            Operand::Malformed(text) => Err(ExprError::InvalidExpression(format!(
                "result '{}' is not a number",
                text
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expression: &str) -> Result<i64> {
        eval_postfix(expression, &mut SymbolTable::new())
    }

    #[test]
    fn test_simple_arithmetic() {
        assert_eq!(eval("3 4 +"), Ok(7));
        assert_eq!(eval("5 1 2 + 4 * + 3 -"), Ok(14));
        assert_eq!(eval("2 3 ^"), Ok(8));
        assert_eq!(eval("7 2 /"), Ok(3));
        assert_eq!(eval("9"), Ok(9));
    }

    #[test]
    fn test_multi_digit_and_negative_literals() {
        assert_eq!(eval("12 30 +"), Ok(42));
        assert_eq!(eval("-4 10 *"), Ok(-40));
        assert_eq!(eval("3 5 -"), Ok(-2));
        assert_eq!(eval("3 5 - 2 *"), Ok(-4));
    }

    #[test]
    fn test_underflow_and_leftovers() {
        assert!(matches!(eval("+"), Err(ExprError::InvalidExpression(_))));
        assert!(matches!(eval("3 +"), Err(ExprError::InvalidExpression(_))));
        assert!(matches!(eval("3 4"), Err(ExprError::InvalidExpression(_))));
        assert!(matches!(eval(""), Err(ExprError::InvalidExpression(_))));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("3 0 /"), Err(ExprError::DivideByZero));
    }

    #[test]
    fn test_assignment_result_and_binding() {
        let mut table = SymbolTable::new();
        assert_eq!(eval_postfix("x 5 =", &mut table), Ok(5));
        assert_eq!(table.get("x"), Some(&5));
        assert_eq!(eval_postfix("x 3 +=", &mut table), Ok(8));
        assert_eq!(eval_postfix("2 x *=", &mut table), Ok(16));
        assert_eq!(table.get("x"), Some(&16));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_assignment_followed_by_expression() {
        let mut table = SymbolTable::new();
        assert_eq!(eval_postfix("x 4 = y 6 = x y *", &mut table), Ok(24));
        assert_eq!(table.get("x"), Some(&4));
        assert_eq!(table.get("y"), Some(&6));
    }

    #[test]
    fn test_assign_copies_resolved_value() {
        let mut table = SymbolTable::new();
        assert_eq!(eval_postfix("x 2 = y x =", &mut table), Ok(2));
        assert_eq!(table.get("y"), Some(&2));
    }

    #[test]
    fn test_assign_to_numeric_token_uses_raw_text() {
        let mut table = SymbolTable::new();
        assert_eq!(eval_postfix("5 3 =", &mut table), Ok(3));
        assert_eq!(table.get("5"), Some(&3));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_compound_with_two_variables_targets_left() {
        let mut table = SymbolTable::new();
        assert_eq!(eval_postfix("a 10 = b 3 = a b -=", &mut table), Ok(7));
        assert_eq!(table.get("a"), Some(&7));
        assert_eq!(table.get("b"), Some(&3));
    }

    #[test]
    fn test_unknown_variable() {
        assert_eq!(
            eval("x 3 +="),
            Err(ExprError::UnknownVariable {
                name: "x".to_string()
            })
        );
        assert_eq!(
            eval("y 1 +"),
            Err(ExprError::UnknownVariable {
                name: "y".to_string()
            })
        );
    }

    #[test]
    fn test_compound_without_target() {
        assert!(matches!(
            eval("3 4 +="),
            Err(ExprError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_identifier_as_final_result_is_invalid() {
        assert!(matches!(eval("x"), Err(ExprError::InvalidExpression(_))));
        assert!(matches!(
            eval("x 5 = x"),
            Err(ExprError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_partial_assignment_survives_failure() {
        let mut table = SymbolTable::new();
        assert_eq!(eval_postfix("x 5 = 1 0 /", &mut table), Err(ExprError::DivideByZero));
        assert_eq!(table.get("x"), Some(&5));
    }

    #[test]
    fn test_malformed_operand() {
        assert!(matches!(eval("# 1 +"), Err(ExprError::InvalidExpression(_))));
        assert!(matches!(
            eval("99999999999999999999 1 +"),
            Err(ExprError::Parse(_))
        ));
    }
}
