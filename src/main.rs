use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

use ttcn3_syntax::driver::CompilationState;
use ttcn3_syntax::lexer::format_tokens;
use ttcn3_syntax::printer;

#[derive(Parser)]
#[command(name = "ttcn3-syntax")]
#[command(author, version, about = "TTCN-3 lexer and syntax tree parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Rust debug rendering of the tree
    #[value(name = "debug")]
    Debug,
    /// Pretty-printed JSON
    #[value(name = "json")]
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a source file and print its syntax tree
    Parse {
        /// The source file to parse
        input: PathBuf,

        /// How to print the tree
        #[arg(long, value_enum, default_value = "debug")]
        format: OutputFormat,

        /// Dump tokens to stdout
        #[arg(long)]
        dump_tokens: bool,
    },

    /// Check source files for syntax errors
    Check {
        /// The source files to check
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Print the canonical rendering of a source file
    Fmt {
        /// The source file to format
        input: PathBuf,
    },

    /// Start an interactive REPL
    Repl,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Parse {
            input,
            format,
            dump_tokens,
        } => parse(input, format, dump_tokens),
        Commands::Check { inputs } => check(inputs),
        Commands::Fmt { input } => fmt(input),
        Commands::Repl => repl(),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn load(input: &PathBuf) -> Result<CompilationState> {
    CompilationState::new(input).with_context(|| format!("Failed to load {:?}", input))
}

fn parse(input: PathBuf, format: OutputFormat, dump_tokens: bool) -> Result<()> {
    let mut state = load(&input)?;
    let output = state.parse();

    if dump_tokens {
        println!("{}", "=== Tokens ===".blue().bold());
        println!("{}", format_tokens(&output.tokens));
        println!();
    }

    match format {
        OutputFormat::Debug => println!("{:#?}", output.source_file),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&output.source_file)
                .context("Failed to serialize the syntax tree")?
        ),
    }

    state.report_diagnostics()?;
    if state.has_errors() {
        anyhow::bail!("{} syntax error(s) in {:?}", state.error_count(), input);
    }
    Ok(())
}

fn check(inputs: Vec<PathBuf>) -> Result<()> {
    let mut failed = 0;
    for input in &inputs {
        let mut state = load(input)?;
        state.parse();
        state.report_diagnostics()?;

        if state.has_errors() {
            failed += 1;
            eprintln!(
                "{}: {} error(s), {} warning(s) in {}",
                "failed".red().bold(),
                state.error_count(),
                state.warning_count(),
                state.source_name
            );
        } else {
            log::debug!("{} is clean", state.source_name);
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} file(s) have syntax errors", failed, inputs.len());
    }
    println!("{}: No errors found", "success".green().bold());
    Ok(())
}

fn fmt(input: PathBuf) -> Result<()> {
    let mut state = load(&input)?;
    let output = state.parse();
    if state.has_errors() {
        state.report_diagnostics()?;
        anyhow::bail!("Refusing to format {:?}: it has syntax errors", input);
    }
    print!("{}", printer::render(&output.source_file));
    Ok(())
}

fn repl() -> Result<()> {
    println!("{}", "TTCN-3 syntax REPL".blue().bold());
    println!("Type ':quit' or ':q' to exit, ':help' for help\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line_number = 1;
    let mut show_tokens = false;

    loop {
        print!("ttcn3:{:03}> ", line_number);
        stdout.flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            ":quit" | ":q" => {
                println!("Goodbye!");
                break;
            }
            ":help" | ":h" => {
                println!("REPL commands:");
                println!("  :quit, :q    Exit the REPL");
                println!("  :help, :h    Show this help message");
                println!("  :tokens, :t  Toggle the token dump");
                println!("\nEnter a definition list or an expression to see its tree.");
                continue;
            }
            ":tokens" | ":t" => {
                show_tokens = !show_tokens;
                println!(
                    "{}: token dump {}",
                    "info".blue(),
                    if show_tokens { "on" } else { "off" }
                );
                continue;
            }
            "" => continue,
            _ => {}
        }

        let mut state =
            CompilationState::new_from_string(&format!("<repl:{}>", line_number), input.to_string());
        let output = state.parse();
        if show_tokens {
            println!("{}", format_tokens(&output.tokens));
        }
        println!("{:#?}", output.source_file.root);
        if let Err(e) = state.report_diagnostics() {
            eprintln!("{}: {}", "error".red(), e);
        }

        line_number += 1;
    }

    Ok(())
}
