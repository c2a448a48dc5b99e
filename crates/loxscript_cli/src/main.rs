//! loxsc: The loxscript scanner CLI.
//!
//! Usage:
//!   loxsc [options] [file...]
//!
//! Scans Lox source files (or stdin when no files are given) into tokens,
//! prints the token stream, and reports any scan diagnostics.

use clap::Parser as ClapParser;
use std::io::Read;
use std::process;
use std::time::Instant;

use loxscript_diagnostics::Diagnostic;
use loxscript_scanner::Scanner;

#[derive(ClapParser, Debug)]
#[command(name = "loxsc", about = "loxscript - a Lox scanner written in Rust", disable_version_flag = true)]
struct Cli {
    /// Lox source files to scan. Reads stdin when none are given.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Suppress the token dump; only report diagnostics.
    #[arg(short, long)]
    quiet: bool,

    /// Enable pretty printing for diagnostics.
    #[arg(long, default_value_t = true)]
    pretty: bool,

    /// Print the scanner version.
    #[arg(short = 'v', long)]
    version: bool,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("loxsc Version 0.1.0");
        return;
    }

    let exit_code = run_scan(&cli);
    process::exit(exit_code);
}

fn run_scan(cli: &Cli) -> i32 {
    let start = Instant::now();
    let use_color = cli.pretty && atty_is_terminal();

    let sources = match load_sources(cli) {
        Ok(sources) => sources,
        Err(msg) => {
            print_error(&msg);
            return 1;
        }
    };

    let mut total_errors = 0usize;
    for (name, text) in &sources {
        let (tokens, diagnostics) = Scanner::new(text).scan_tokens();

        if !cli.quiet {
            for token in &tokens {
                println!("{}", token);
            }
        }

        for diag in diagnostics.diagnostics() {
            print_diagnostic(name, diag, use_color);
        }
        total_errors += diagnostics.error_count();
    }

    let elapsed = start.elapsed();

    if total_errors > 0 {
        if use_color {
            eprintln!(
                "\n{}Found {} error{}.{}",
                RED,
                total_errors,
                if total_errors == 1 { "" } else { "s" },
                RESET
            );
        } else {
            eprintln!(
                "\nFound {} error{}.",
                total_errors,
                if total_errors == 1 { "" } else { "s" }
            );
        }
        return 2;
    }

    if use_color {
        eprintln!(
            "{}Scanned {} input{} in {:.2}s.{}",
            GRAY,
            sources.len(),
            if sources.len() == 1 { "" } else { "s" },
            elapsed.as_secs_f64(),
            RESET
        );
    }

    0
}

/// Resolve input sources as (display name, contents) pairs.
fn load_sources(cli: &Cli) -> Result<Vec<(String, String)>, String> {
    if cli.files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        return Ok(vec![("<stdin>".to_string(), text)]);
    }

    let mut sources = Vec::with_capacity(cli.files.len());
    for file in &cli.files {
        let text = std::fs::read_to_string(file)
            .map_err(|e| format!("Failed to read '{}': {}", file, e))?;
        sources.push((file.clone(), text));
    }
    Ok(sources)
}

fn print_diagnostic(file: &str, diag: &Diagnostic, use_color: bool) {
    if use_color {
        eprintln!(
            "{}{}{}: [line {}] {}{}error{} {}LX{}{}: {}",
            CYAN, file, RESET,
            diag.line,
            BOLD, RED, RESET,
            CYAN, diag.code, RESET,
            diag.message_text
        );
    } else {
        eprintln!("{}: {}", file, diag);
    }
}

fn print_error(msg: &str) {
    if atty_is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn atty_is_terminal() -> bool {
    // On Unix, check if stderr is a terminal.
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true // Assume terminal on other platforms
    }
}
