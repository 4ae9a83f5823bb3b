//! Type definitions shared by the lexer, the symbol table and the evaluator.
//!
//! Operands travel through the evaluation stack as text. Whether a piece of
//! text is a number or a variable reference is decided by [`Operand::classify`]
//! every time it is needed, so a computed result and a literal typed by the
//! user are indistinguishable once pushed.

use crate::error::ExprError;

/// Maximum length, in bytes, of a variable name stored in the symbol table.
pub const MAX_NAME_LEN: usize = 32;

/// Fixed-capacity string used for symbol table keys.
pub type HString = heapless::String<MAX_NAME_LEN>;

/// Helper trait for converting string slices into heapless key strings.
pub trait TryIntoHeaplessString {
    fn try_into_heapless(self) -> Result<HString, ExprError>;
}

impl TryIntoHeaplessString for &str {
    fn try_into_heapless(self) -> Result<HString, ExprError> {
        let mut s = HString::new();
        s.push_str(self).map_err(|_| ExprError::StringTooLong)?;
        Ok(s)
    }
}

/// Classifies the kind of token produced during lexical analysis.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    /// A signed decimal integer literal.
    Number,

    /// A token containing at least one ASCII letter.
    Variable,

    /// One of the binary arithmetic operators `+ - * / ^`.
    Operator,

    /// One of the assignment operators `= += -= *= /=`.
    Assign,

    /// Anything else. Pushed onto the stack unchanged.
    Other,
}

/// An operand popped off the evaluation stack, classified on demand.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Operand<'a> {
    /// Text that parses as a signed integer.
    Number(&'a str),
    /// Text naming a variable.
    Variable(&'a str),
    /// Text that is neither.
    Malformed(&'a str),
}

impl<'a> Operand<'a> {
    pub fn classify(text: &'a str) -> Self {
        if is_identifier(text) {
            Operand::Variable(text)
        } else if is_integer(text) {
            Operand::Number(text)
        } else {
            Operand::Malformed(text)
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Operand::Variable(_))
    }
}

/// A variable reference is any token with an ASCII letter in it.
pub fn is_identifier(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_alphabetic())
}

/// Optional sign followed by one or more ASCII digits.
pub fn is_integer(text: &str) -> bool {
    let digits = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
