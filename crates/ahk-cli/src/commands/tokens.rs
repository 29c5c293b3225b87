//! Token dump command - output the token stream as JSON

use super::report_error;
use ahk_runtime::lexer::tokenize;
use ahk_runtime::{EXIT_FAILURE, EXIT_SUCCESS};
use anyhow::{Context, Result};
use std::fs;

/// Lex the source file and print its tokens as a JSON array
pub fn run(file_path: &str) -> Result<i32> {
    let source = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {}", file_path))?;

    match tokenize(&source, file_path) {
        Ok(tokens) => {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            report_error(&e);
            Ok(EXIT_FAILURE)
        }
    }
}
