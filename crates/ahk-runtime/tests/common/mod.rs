//! Shared test utilities for runtime integration tests

#![allow(dead_code)]

use ahk_runtime::{Error, RecordingRenderer, Runtime, RuntimeError, Value};

pub use pretty_assertions::{assert_eq, assert_ne};

/// Filename used for every test script
pub const SCRIPT: &str = "test.ahk";

/// Run a script and return the last expression value it produced
pub fn eval(source: &str) -> Result<Option<Value>, Error> {
    Runtime::new(SCRIPT).eval(source)
}

/// Assert that a script's last expression displays as `expected`
///
/// # Example
/// ```
/// assert_eval_display("1 + 2", "3");
/// ```
pub fn assert_eval_display(source: &str, expected: &str) {
    match eval(source) {
        Ok(Some(value)) => assert_eq!(value.to_string(), expected),
        other => panic!("Expected a value displaying as {:?}, got {:?}", expected, other),
    }
}

/// Assert that a script's last expression equals `expected`
pub fn assert_eval(source: &str, expected: Value) {
    match eval(source) {
        Ok(Some(value)) => assert_eq!(value, expected),
        other => panic!("Expected {:?}, got {:?}", expected, other),
    }
}

/// Run a script that must fail at runtime and return the cause
pub fn runtime_error(source: &str) -> RuntimeError {
    match eval(source) {
        Err(err) => match err.runtime_error() {
            Some(cause) => cause.clone(),
            None => panic!("Expected a runtime error, got {}", err),
        },
        Ok(value) => panic!("Expected a runtime error, got success: {:?}", value),
    }
}

/// Run a script that must fail and return the full error
pub fn error(source: &str) -> Error {
    match eval(source) {
        Err(err) => err,
        Ok(value) => panic!("Expected an error, got success: {:?}", value),
    }
}

/// Run a script in debug mode and capture (exit code, stdout, stderr)
pub fn execute_debug(source: &str) -> (i32, String, String) {
    execute(source, true)
}

/// Run a script and capture (exit code, stdout, stderr)
pub fn execute(source: &str, debug: bool) -> (i32, String, String) {
    let mut runtime = Runtime::new(SCRIPT);
    runtime.set_debug(debug);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = runtime
        .execute(source, &mut out, &mut err)
        .expect("writing to a Vec cannot fail");
    (
        code,
        String::from_utf8(out).expect("utf-8 output"),
        String::from_utf8(err).expect("utf-8 output"),
    )
}

/// Run a script with a recording renderer attached
pub fn run_with_recorder(source: &str) -> (RecordingRenderer, Result<Option<Value>, Error>) {
    let recorder = RecordingRenderer::new();
    let mut runtime = Runtime::new(SCRIPT);
    runtime.set_renderer(Box::new(recorder.clone()));
    let result = runtime.eval(source);
    (recorder, result)
}
