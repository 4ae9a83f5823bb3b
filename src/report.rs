//! Per-expression output.

use core::fmt;

use crate::error::Result;

/// Printed in place of a value when evaluation fails for any reason.
pub const INVALID_EXPRESSION: &str = "INVALID expression format";

/// The outcome of evaluating one line, plus the bindings it left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The line as it was read.
    pub expression: String,
    pub outcome: Result<i64>,
    /// Symbol table contents in slot order, captured before the table was cleared.
    /// Filled in for failed expressions too.
    pub bindings: Vec<(String, i64)>,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The value as decimal text, or [`INVALID_EXPRESSION`].
    pub fn value_text(&self) -> String {
        match &self.outcome {
            Ok(value) => value.to_string(),
            Err(_) => INVALID_EXPRESSION.to_string(),
        }
    }

    /// `key=value` pairs joined by `", "`.
    pub fn bindings_text(&self) -> String {
        self.bindings
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Renders the report block, including its trailing blank line.
///
/// Bindings are only listed for valid expressions.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input expression: {}", self.expression)?;
        writeln!(f, "Value: {}", self.value_text())?;
        if self.is_valid() && !self.bindings.is_empty() {
            writeln!(f, "Symbol table entries: {}", self.bindings_text())?;
        }
        writeln!(f)
    }
}
