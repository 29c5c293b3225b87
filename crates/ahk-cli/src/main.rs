use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod commands;
mod config;
mod msgbox;

/// Interpreter for a small AutoHotKey-like scripting language.
///
/// Runs scripts, dumps their tokens or syntax tree, and provides an
/// interactive REPL.
///
/// EXAMPLES:
///     ahk run script.ahk           Run a script
///     ahk run script.ahk --debug   Echo each statement instead of showing message boxes
///     ahk tokens script.ahk        Print the token stream as JSON
///     ahk ast script.ahk           Print the syntax tree as JSON
///     ahk repl                     Start interactive REPL
///
/// ENVIRONMENT VARIABLES:
///     AHK_DEBUG           Set to '1' to run in debug mode by default
///     AHK_MAX_CALL_DEPTH  Limit on nested function calls
///     AHK_NO_HISTORY      Set to '1' to disable REPL history
///     AHK_HISTORY_FILE    Custom REPL history path
///     NO_COLOR            Set to disable colored output
///     RUST_LOG            Log filter (overrides --verbose)
#[derive(Parser)]
#[command(name = "ahk")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Log pipeline stages to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a script
    ///
    /// Executes the script statement by statement and stops at the first
    /// error, printing its traceback. Settings come from ~/.ahk/config.toml,
    /// an ahk.toml next to the script, and the environment.
    ///
    /// EXAMPLES:
    ///     ahk run script.ahk             Run a script
    ///     ahk run script.ahk -d          Debug mode
    #[command(visible_alias = "r")]
    Run {
        /// Path to the script
        file: String,
        /// Echo each statement's effect instead of showing message boxes
        #[arg(long, short = 'd')]
        debug: bool,
        /// Disable colored error output
        #[arg(long)]
        no_color: bool,
    },

    /// Dump the token stream to JSON
    ///
    /// EXAMPLES:
    ///     ahk tokens script.ahk
    Tokens {
        /// Path to the script
        file: String,
    },

    /// Dump the syntax tree to JSON
    ///
    /// EXAMPLES:
    ///     ahk ast script.ahk
    ///     ahk ast script.ahk > ast.json
    Ast {
        /// Path to the script
        file: String,
    },

    /// Start an interactive REPL
    ///
    /// Variables and functions persist between entries. A line that opens
    /// a brace continues until the braces balance.
    ///
    /// REPL COMMANDS:
    ///     :help, :h      Show help
    ///     :quit, :q      Exit REPL
    ///     :reset         Clear all variables and functions
    ///     :vars          List module variables
    ///     :debug         Toggle debug mode
    Repl {
        /// Start in debug mode
        #[arg(long, short = 'd')]
        debug: bool,
        /// Disable history persistence
        #[arg(long, env = "AHK_NO_HISTORY")]
        no_history: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let cli_config = config::Config::from_env();

    let code = match cli.command {
        Commands::Run {
            file,
            debug,
            no_color,
        } => commands::run::run(&file, debug, no_color)?,
        Commands::Tokens { file } => commands::tokens::run(&file)?,
        Commands::Ast { file } => commands::ast::run(&file)?,
        Commands::Repl { debug, no_history } => {
            // Command-line flag overrides environment variable
            let disable_history = no_history || cli_config.no_history;
            commands::repl::run(debug, disable_history, &cli_config)?
        }
    };

    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
