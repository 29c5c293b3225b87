//! Run command - execute script files

use super::paint_report;
use crate::msgbox::TerminalRenderer;
use ahk_config::ConfigLoader;
use ahk_runtime::Runtime;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Run a script file and return its exit code
///
/// Debug echoes go to stdout as each statement runs. An error stops the
/// script; its traceback goes to stderr.
pub fn run(file_path: &str, debug: bool, no_color: bool) -> Result<i32> {
    let source = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {}", file_path))?;

    let script_dir = Path::new(file_path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut config = ConfigLoader::new()
        .load_from_directory(script_dir)
        .with_context(|| format!("Failed to load configuration for {}", file_path))?;

    // Command-line flags override config files and environment
    if debug {
        config.run.debug = true;
    }
    if no_color || !config.diagnostics.color {
        colored::control::set_override(false);
    }

    let mut runtime = Runtime::with_config(file_path, config);
    runtime.set_renderer(Box::new(TerminalRenderer));

    let mut report = Vec::new();
    let code = runtime
        .execute(&source, &mut io::stdout(), &mut report)
        .context("Failed to write script output")?;

    if !report.is_empty() {
        eprint!("{}", paint_report(&String::from_utf8_lossy(&report)));
    }
    log::debug!("{} exited with {}", file_path, code);
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_run_simple_script() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "x := 1 + 2").unwrap();

        let code = run(temp_file.path().to_str().unwrap(), false, true).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_run_failing_script() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "x := 1 / 0").unwrap();

        let code = run(temp_file.path().to_str().unwrap(), false, true).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn test_run_missing_file() {
        let result = run("nonexistent.ahk", false, true);
        assert!(result.is_err());
    }
}
