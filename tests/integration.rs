//! End-to-end tests: lines in, report blocks out.


use pretty_assertions::assert_eq;
use rpn_rs::error::ExprError;
use rpn_rs::session::Session;
use rpn_rs::INVALID_EXPRESSION;

use crate::test_helpers::{block, direct_rehash, names, run_batch, run_batch_with};

#[test]
fn test_plain_arithmetic_has_no_entries() {
    assert_eq!(run_batch("3 4 +\n"), block("3 4 +", "7", None));
}

#[test]
fn test_assignment_only_line_reports_assigned_value() {
    assert_eq!(run_batch("x 5 =\n"), block("x 5 =", "5", Some("x=5")));
}

#[test]
fn test_division_by_zero_is_invalid() {
    assert_eq!(
        run_batch("3 0 /\n"),
        block("3 0 /", INVALID_EXPRESSION, None)
    );
}

#[test]
fn test_compound_assignment_on_unbound_variable_is_invalid() {
    assert_eq!(
        run_batch("x 3 +=\n"),
        block("x 3 +=", INVALID_EXPRESSION, None)
    );
}

#[test]
fn test_lone_operator_is_invalid() {
    assert_eq!(run_batch("+\n"), block("+", INVALID_EXPRESSION, None));
}

#[test]
fn test_entries_follow_slot_order() {
    // "x" lands in slot 3 and "y" in slot 0 once the table has grown to 4
    assert_eq!(
        run_batch("x 5 = y 2 =\n"),
        block("x 5 = y 2 =", "2", Some("y=2, x=5"))
    );
}

#[test]
fn test_mixed_batch() {
    let input = "\
x 4 = y 6 = x y *
a 2 = a 3 ^=
a 1 = b a =
2 3 4
z 9 = z 1 -=
";
    let expected = [
        block("x 4 = y 6 = x y *", "24", Some("y=6, x=4")),
        block("a 2 = a 3 ^=", INVALID_EXPRESSION, None),
        block("a 1 = b a =", "1", Some(slot_ordered_entries(&[("a", 1), ("b", 1)]).as_str())),
        block("2 3 4", INVALID_EXPRESSION, None),
        block("z 9 = z 1 -=", "8", Some("z=8")),
    ]
    .concat();
    assert_eq!(run_batch(input), expected);
}

/// Renders entries in the order a fresh session's table would hold them.
fn slot_ordered_entries(pairs: &[(&str, i64)]) -> String {
    let mut table = rpn_rs::SymbolTable::new();
    for (name, value) in pairs {
        table.put(name, *value).unwrap();
    }
    table
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(", ")
}

#[test]
fn test_processing_stops_at_first_empty_line() {
    let output = run_batch("1 1 +\n\n2 2 +\n");
    assert_eq!(output, block("1 1 +", "2", None));
}

#[test]
fn test_missing_trailing_newline() {
    assert_eq!(run_batch("6 7 *"), block("6 7 *", "42", None));
}

#[test]
fn test_non_utf8_line_is_invalid_and_batch_continues() {
    let input: &[u8] = b"3 4 +\n\xff 1 +\n1 1 +\n";
    let mut output = Vec::new();
    let count = Session::new().run(input, &mut output).unwrap();
    assert_eq!(count, 3);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        [
            block("3 4 +", "7", None),
            block("\u{FFFD} 1 +", INVALID_EXPRESSION, None),
            block("1 1 +", "2", None),
        ]
        .concat()
    );
}

#[test]
fn test_failed_expression_does_not_leak_bindings() {
    let input = "x 5 = 1 0 /\nx 1 +\n";
    assert_eq!(
        run_batch(input),
        [
            block("x 5 = 1 0 /", INVALID_EXPRESSION, None),
            block("x 1 +", INVALID_EXPRESSION, None),
        ]
        .concat()
    );
}

#[test]
fn test_session_reports_errors_and_bindings() {
    let mut session = Session::new();

    let report = session.evaluate("n 7 = n n *");
    assert_eq!(report.outcome, Ok(49));
    assert_eq!(report.bindings, vec![("n".to_string(), 7)]);

    let report = session.evaluate("n 1 +");
    assert_eq!(
        report.outcome,
        Err(ExprError::UnknownVariable {
            name: "n".to_string()
        })
    );
    assert!(report.bindings.is_empty());
}

#[test]
fn test_many_assignments_in_one_line() {
    let vars = names(40);
    let line: String = vars
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{} {} = ", name, i))
        .collect::<String>()
        + "v39 v0 +";

    let report = Session::new().evaluate(&line);
    assert_eq!(report.outcome, Ok(39));
    assert_eq!(report.bindings.len(), 40);
    for (i, name) in vars.iter().enumerate() {
        assert!(report.bindings.contains(&(name.clone(), i as i64)));
    }
}

#[test]
fn test_direct_rehash_collision_surfaces_as_invalid() {
    use rpn_rs::symbol_table::hash_index;

    let colliding: Vec<String> = (0..)
        .map(|i| format!("c{}", i))
        .filter(|name| hash_index(name, 8) == 0)
        .take(2)
        .collect();
    let others: Vec<String> = (0..)
        .map(|i| format!("o{}", i))
        .filter(|name| hash_index(name, 8) != 0)
        .take(2)
        .collect();
    let line = format!(
        "{} 1 = {} 2 = {} 3 = {} 4 =",
        colliding[0], colliding[1], others[0], others[1]
    );

    let direct = run_batch_with(&format!("{}\n", line), direct_rehash());
    assert_eq!(direct, block(&line, INVALID_EXPRESSION, None));

    let probing = Session::new().evaluate(&line);
    assert_eq!(probing.outcome, Ok(4));
    assert_eq!(probing.bindings.len(), 4);
}
