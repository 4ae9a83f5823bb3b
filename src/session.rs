//! Batch evaluation of expression lines.
//!
//! A [`Session`] owns the one symbol table shared by every expression it
//! evaluates. The table is cleared after each expression, failed ones
//! included, so assignments never carry over to the next line.

use std::io::{self, BufRead, Write};
use std::str::{self, Utf8Error};

use tracing::{debug, info};

use crate::error::ExprError;
use crate::eval::eval_postfix;
use crate::report::Report;
use crate::symbol_table::{RehashStrategy, SymbolTable};

/// Knobs for a [`Session`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// How the symbol table re-places entries when it grows.
    pub rehash: RehashStrategy,
}

/// Evaluates expressions one line at a time.
///
/// # Examples
///
/// ```
/// use rpn_rs::session::Session;
///
/// let mut session = Session::new();
/// let report = session.evaluate("x 5 = x 3 *");
/// assert_eq!(report.outcome, Ok(15));
/// assert_eq!(report.bindings, vec![("x".to_string(), 5)]);
///
/// // bindings do not survive into the next expression
/// assert!(!session.evaluate("x 1 +").is_valid());
/// ```
#[derive(Debug)]
pub struct Session {
    table: SymbolTable<i64>,
    evaluated: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::with_options(EvalOptions::default())
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Self {
            table: SymbolTable::with_strategy(options.rehash),
            evaluated: 0,
        }
    }

    /// Evaluates one line and clears the table afterwards.
    pub fn evaluate(&mut self, line: &str) -> Report {
        let outcome = eval_postfix(line, &mut self.table);
        let bindings = self
            .table
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        self.table.clear();
        self.evaluated += 1;
        Report {
            expression: line.to_string(),
            outcome,
            bindings,
        }
    }

    /// Reads lines from `input` until the first empty line or end of input and
    /// writes one report per line to `output`.
    ///
    /// A line that is not valid UTF-8 is reported as invalid and the batch
    /// carries on. Returns how many expressions were evaluated.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<usize> {
        let mut count = 0;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = trim_line_ending(&buf);
            if line.is_empty() {
                break;
            }
            let report = match str::from_utf8(line) {
                Ok(line) => self.evaluate(line),
                Err(e) => self.reject(&String::from_utf8_lossy(line), e),
            };
            write!(output, "{}", report)?;
            count += 1;
        }
        output.flush()?;
        info!(count, "batch finished");
        Ok(count)
    }

    fn reject(&mut self, line: &str, err: Utf8Error) -> Report {
        debug!(error = %err, "line is not valid UTF-8");
        self.evaluated += 1;
        Report {
            expression: line.to_string(),
            outcome: Err(ExprError::InvalidExpression(format!(
                "line is not valid UTF-8: {}",
                err
            ))),
            bindings: Vec::new(),
        }
    }

    /// Total expressions evaluated by this session.
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }
}

/// Strips a trailing `\n` or `\r\n`.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
