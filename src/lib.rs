#![doc = r#"
# rpn-rs

A postfix (reverse Polish) integer calculator with variable assignment, built
around a small open-addressing symbol table.

## Overview

Each input line is a space-separated postfix expression. Operators follow their
operands, so no precedence rules or parentheses are needed. Lines are evaluated
independently: the symbol table is cleared after every expression.

Key features:
- Signed 64-bit integer arithmetic with `+ - * / ^`, checked for overflow
- Assignment with `=` and the compound forms `+= -= *= /=`
- Open-addressing symbol table with linear probing, doubling at 0.8 load
- Fixed-capacity operand stack sized to the expression
- Every failure is local to its expression and reported as
  `INVALID expression format`

## Quick Start

```rust
use rpn_rs::eval::eval_postfix;
use rpn_rs::symbol_table::SymbolTable;

let mut table = SymbolTable::new();

// 5 + ((1 + 2) * 4) - 3
assert_eq!(eval_postfix("5 1 2 + 4 * + 3 -", &mut table).unwrap(), 14);

// Assignment leaves the binding in the table
assert_eq!(eval_postfix("x 6 = x 7 *", &mut table).unwrap(), 42);
assert_eq!(table.get("x"), Some(&6));
```

## Assignment

`=` pops a value and then the target name. The compound operators pop two
operands; whichever one is a variable becomes the target (the left one if both
are), and it must already have a value.

```rust
use rpn_rs::session::Session;

let mut session = Session::new();

// A line made only of assignments reports the last assigned value
let report = session.evaluate("x 5 = x 3 +=");
assert_eq!(report.outcome, Ok(8));
assert_eq!(report.bindings, vec![("x".to_string(), 8)]);
```

## Error Handling

```rust
use rpn_rs::error::ExprError;
use rpn_rs::eval::eval_postfix;
use rpn_rs::symbol_table::SymbolTable;

let mut table = SymbolTable::new();

match eval_postfix("3 0 /", &mut table) {
    Err(ExprError::DivideByZero) => {}
    other => panic!("unexpected: {:?}", other),
}

match eval_postfix("y 1 +", &mut table) {
    Err(ExprError::UnknownVariable { name }) => assert_eq!(name, "y"),
    other => panic!("unexpected: {:?}", other),
}

assert!(matches!(
    eval_postfix("+", &mut table),
    Err(ExprError::InvalidExpression(_))
));
```

## Batch Input

[`session::Session::run`] reads lines until the first empty line and prints one
block per expression:

```text
Input expression: x 5 = x 2 *
Value: 10
Symbol table entries: x=5

```

Symbol table entries are listed in slot order, which is not insertion order.
"#]

pub mod error;
pub mod eval;
pub mod lexer;
pub mod report;
pub mod session;
pub mod stack;
pub mod symbol_table;
pub mod types;

pub use error::{ExprError, Result};
pub use eval::eval_postfix;
pub use report::{INVALID_EXPRESSION, Report};
pub use session::{EvalOptions, Session};
pub use stack::BoundedStack;
pub use symbol_table::{RehashStrategy, SymbolTable};
