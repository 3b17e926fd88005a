//! Fixture-driven tests. Every non-blank line of a `.lox` fixture that is not a pure comment is
//! one expression, evaluated in a fresh session, with its expectation in a trailing comment:
//!
//! ```text
//! 2 + 3 // expect: 5
//! 6 / 0 // runtime error: Division by zero.
//! + 1   // Error at '+': Missing left-hand operand.
//! ```

use std::collections::BTreeMap;

use interpreter::{InterpretError, Interpreter};
use itertools::Itertools;
use lazy_regex::regex;
use test_suite_proc_macro::generate_tests;

use pretty_assertions::assert_eq;

#[derive(Debug, Default, PartialEq)]
struct Outcome {
    output: BTreeMap<usize, String>,
    syntax_errors: Vec<String>,
    runtime_errors: BTreeMap<usize, String>,
}

fn expected_outcome(code: &str) -> Outcome {
    let syntax_error_regex = regex!(r"// (Error( at '.*'| at end)?: .*)");
    let runtime_error_regex = regex!(r"// runtime error: (.*)");
    let output_regex = regex!(r"// expect: (.*)");

    let mut expected = Outcome::default();
    for (i, line) in code.lines().enumerate() {
        if let Some(cap) = runtime_error_regex.captures(line) {
            expected.runtime_errors.insert(i + 1, cap[1].to_string());
        } else if let Some(cap) = syntax_error_regex.captures(line) {
            expected.syntax_errors.push(format!("[line {}] {}", i + 1, &cap[1]));
        } else if let Some(cap) = output_regex.captures(line) {
            expected.output.insert(i + 1, cap[1].to_string());
        }
    }
    expected
}

fn actual_outcome(code: &str) -> Outcome {
    let interpreter = Interpreter::new();

    let mut actual = Outcome::default();
    for (i, line) in code.lines().enumerate() {
        if line.trim().is_empty() || line.trim_start().starts_with("//") {
            continue;
        }

        // Leading newlines keep the reported line numbers in sync with the fixture
        let source = format!("{}{}", "\n".repeat(i), line);
        match interpreter.interpret(&source) {
            Ok(value) => {
                actual.output.insert(i + 1, value.to_string());
            }
            Err(InterpretError::Syntax(errors)) => {
                actual.syntax_errors.extend(errors.iter().map(ToString::to_string));
            }
            Err(InterpretError::Runtime(e)) => {
                assert_eq!(e.line.0, i + 1, "Runtime error reported on the wrong line");
                actual.runtime_errors.insert(i + 1, e.error.to_string());
            }
        }
    }
    actual
}

pub fn expect_fixture(code: &str) {
    let expected = expected_outcome(code);
    let actual = actual_outcome(code);

    assert_eq!(
        actual.syntax_errors, expected.syntax_errors,
        "Actual syntax errors (left) do not match expected syntax errors (right)"
    );
    assert_eq!(
        actual.runtime_errors, expected.runtime_errors,
        "Actual runtime errors (left) do not match expected runtime errors (right)"
    );
    assert_eq!(
        actual.output.values().collect_vec(),
        expected.output.values().collect_vec(),
        "Actual output (left) does not match expected output (right)"
    );
    assert_eq!(actual, expected);
}

#[ctor::ctor]
fn init() {
    env_logger::init();
}

generate_tests!("expressions");
