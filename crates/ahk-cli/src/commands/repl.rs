//! REPL command implementation

use super::report_error;
use crate::msgbox::TerminalRenderer;
use ahk_config::ConfigLoader;
use ahk_runtime::repl::needs_continuation;
use ahk_runtime::{ReplCore, SymbolTable};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = ">> ";
const CONTINUATION_PROMPT: &str = ".. ";

/// Run the interactive REPL
///
/// If `no_history` is true, disables history persistence.
pub fn run(debug: bool, no_history: bool, config: &crate::config::Config) -> Result<i32> {
    let mut settings = match std::env::current_dir() {
        Ok(dir) => ConfigLoader::new().load_from_directory(&dir)?,
        Err(_) => ahk_config::AhkConfig::default(),
    };
    if debug {
        settings.run.debug = true;
    }
    let mut debug = settings.run.debug;

    let mut rl = DefaultEditor::new()?;
    let mut repl = ReplCore::new(settings);
    repl.set_renderer(Box::new(TerminalRenderer));

    // Load history from file (unless disabled)
    let history_path = config.get_history_path();
    if !no_history {
        if let Some(ref path) = history_path {
            let _ = rl.load_history(path); // Ignore errors if file doesn't exist
        }
    }

    println!("AHK v{} REPL", ahk_runtime::VERSION);
    println!("Type statements or expressions, or :quit to exit");
    println!("Commands: :quit (or :q), :reset, :help, :vars, :debug");
    println!();

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() {
            PROMPT
        } else {
            CONTINUATION_PROMPT
        };

        match rl.readline(prompt) {
            Ok(line) => {
                if buffer.is_empty() {
                    let trimmed = line.trim();

                    if trimmed == ":quit" || trimmed == ":q" {
                        println!("Goodbye!");
                        break;
                    }

                    if trimmed == ":reset" {
                        repl.reset();
                        println!("REPL state reset");
                        continue;
                    }

                    if trimmed == ":help" || trimmed == ":h" {
                        print_help();
                        continue;
                    }

                    if trimmed == ":vars" || trimmed == ":v" {
                        print_vars(repl.globals());
                        continue;
                    }

                    if trimmed == ":debug" {
                        debug = !debug;
                        repl.set_debug(debug);
                        println!("Debug mode {}", if debug { "on" } else { "off" });
                        continue;
                    }

                    if trimmed.is_empty() {
                        continue;
                    }
                }

                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);
                if needs_continuation(&buffer) {
                    continue;
                }

                let entry = std::mem::take(&mut buffer);
                let _ = rl.add_history_entry(entry.as_str());

                let result = repl.eval_line(&entry);
                for echo in &result.echoes {
                    println!("{}", echo);
                }
                match result.error {
                    Some(error) => report_error(&error),
                    None => {
                        if let Some(value) = result.value {
                            println!("{}", value);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C abandons a pending multi-line entry
                buffer.clear();
                println!("^C");
                println!("Use :quit or :q to exit");
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history to file (unless disabled)
    if !no_history {
        if let Some(path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.save_history(&path);
        }
    }

    Ok(ahk_runtime::EXIT_SUCCESS)
}

/// Print help information
fn print_help() {
    println!("AHK REPL Commands:");
    println!("  :quit, :q         Exit the REPL");
    println!("  :reset            Clear all variables and functions");
    println!("  :help, :h         Show this help message");
    println!("  :vars, :v         List module variables");
    println!("  :debug            Toggle debug mode");
    println!();
    println!("Lines with an open '{{' continue until the braces balance.");
    println!("Examples:");
    println!("  >> x := 42");
    println!("  >> double(n) {{");
    println!("  ..   return n * 2");
    println!("  .. }}");
    println!("  >> double(x)");
}

fn print_vars(globals: &SymbolTable) {
    if globals.is_empty() {
        println!("No variables defined");
        return;
    }
    for binding in globals.iter() {
        println!("{} = {}", binding.name, binding.value);
    }
}
