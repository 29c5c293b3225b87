pub mod ast;
pub mod repl;
pub mod run;
pub mod tokens;

use colored::Colorize;

/// Colour a rendered traceback: the header bold, the summary line red.
pub fn paint_report(report: &str) -> String {
    let lines: Vec<&str> = report.lines().collect();
    let last = lines.len().saturating_sub(1);
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let painted = if i == last {
            line.red().bold().to_string()
        } else if line.starts_with("Traceback") {
            line.bold().to_string()
        } else {
            line.to_string()
        };
        out.push_str(&painted);
        out.push('\n');
    }
    out
}

/// Print a front-end or runtime error to stderr
pub fn report_error(error: &ahk_runtime::Error) {
    eprint!("{}", paint_report(&error.render()));
}
