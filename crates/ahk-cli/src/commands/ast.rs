//! AST dump command - output AST as JSON

use super::report_error;
use ahk_runtime::parser::parse;
use ahk_runtime::{VersionedProgram, EXIT_FAILURE, EXIT_SUCCESS};
use anyhow::{Context, Result};
use std::fs;

/// Dump AST to JSON
///
/// Parses the source file and outputs the versioned AST as JSON to stdout.
pub fn run(file_path: &str) -> Result<i32> {
    let source = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {}", file_path))?;

    let program = match parse(&source, file_path) {
        Ok(program) => program,
        Err(e) => {
            report_error(&e);
            return Ok(EXIT_FAILURE);
        }
    };

    println!("{}", VersionedProgram::new(&program).to_json()?);
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_ast_dump_simple() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "x := [1, 2]").unwrap();
        assert_eq!(run(temp_file.path().to_str().unwrap()).unwrap(), EXIT_SUCCESS);
    }

    #[test]
    fn test_ast_dump_invalid_syntax() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "x := (1 + 2").unwrap();
        assert_eq!(run(temp_file.path().to_str().unwrap()).unwrap(), EXIT_FAILURE);
    }

    #[test]
    fn test_ast_dump_missing_file() {
        assert!(run("nonexistent.ahk").is_err());
    }
}
