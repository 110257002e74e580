//! Assertions over command results for E2E tests

#![allow(dead_code)]

use super::CommandResult;

pub fn assert_command_success(result: &CommandResult) {
    assert!(
        result.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        result.args(),
        result.stdout_string(),
        result.stderr_string()
    );
}

pub fn assert_command_exit_code(result: &CommandResult, expected_code: i32) {
    match result.exit_code() {
        Some(code) => assert_eq!(
            code,
            expected_code,
            "Command exited with code {} but expected {}\nstdout: {}\nstderr: {}",
            code,
            expected_code,
            result.stdout_string(),
            result.stderr_string()
        ),
        None => panic!(
            "Command was terminated by signal, expected exit code {}\nstdout: {}\nstderr: {}",
            expected_code,
            result.stdout_string(),
            result.stderr_string()
        ),
    }
}

pub fn assert_stdout_contains(result: &CommandResult, expected: &str) {
    let stdout = result.stdout_string();
    assert!(
        stdout.contains(expected),
        "stdout does not contain '{expected}'\nActual stdout: {stdout}"
    );
}

pub fn assert_stderr_contains(result: &CommandResult, expected: &str) {
    let stderr = result.stderr_string();
    assert!(
        stderr.contains(expected),
        "stderr does not contain '{expected}'\nActual stderr: {stderr}"
    );
}

pub fn assert_stdout_contains_all(result: &CommandResult, expected: &[&str]) {
    let stdout = result.stdout_string();
    for text in expected {
        assert!(
            stdout.contains(text),
            "stdout does not contain '{text}'\nActual stdout: {stdout}"
        );
    }
}

/// Asserts the number of non-blank lines in a data file's contents
pub fn assert_line_count(contents: &str, expected: usize) {
    let count = contents.lines().filter(|l| !l.trim().is_empty()).count();
    assert_eq!(
        count, expected,
        "Expected {expected} stored line(s), found {count}:\n{contents}"
    );
}
