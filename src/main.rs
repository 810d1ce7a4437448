//! boolc - boolean language translator

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use boolc::backend::DosBoilerplate;
use boolc::feedback::{CompileReport, Diagnostic};
use boolc::frontend::lexer::Lexer;
use boolc::frontend::source::SourceReader;
use boolc::{CompileOptions, Compiler, Error};

/// boolc compiler
#[derive(Parser, Debug)]
#[command(name = "boolc")]
#[command(version = "0.1.0")]
#[command(about = "Translate a boolean assignment program into 16-bit x86 assembly")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (defaults to the input with an .asm extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit declarations and program body only, without boilerplate
    #[arg(long)]
    body_only: bool,

    /// Print a JSON compilation report to stdout
    #[arg(long)]
    json: bool,

    /// Longest identifier or operator word accepted
    #[arg(
        long,
        default_value_t = boolc::frontend::lexer::MAX_IDENTIFIER_LEN,
        value_parser = parse_ident_len
    )]
    max_ident_len: usize,
}

/// Identifier length limits must allow at least one character
fn parse_ident_len(arg: &str) -> std::result::Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(len) => Ok(len),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a source file
    Build {
        /// Input source file
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a source file for errors
    Check {
        /// Input source file
        input: PathBuf,
    },
    /// Print the lexeme stream of a source file
    Tokens {
        /// Input source file
        input: PathBuf,
    },
    /// Print version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Build { input, output }) => build(input, output.clone(), &cli),
        Some(Commands::Check { input }) => check(input, &cli),
        Some(Commands::Tokens { input }) => tokens(input, &cli),
        Some(Commands::Version) => {
            println!("boolc 0.1.0");
            println!("License: Apache-2.0");
            Ok(true)
        }
        None => match cli.input {
            Some(ref input) => build(input, cli.output.clone(), &cli),
            None => {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: boolc <FILE> or boolc build <FILE>");
                process::exit(1);
            }
        },
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn compiler(cli: &Cli) -> Compiler {
    Compiler::new(CompileOptions {
        max_identifier_len: cli.max_ident_len,
    })
}

/// Print a fatal tokenizer error in the requested format
fn report_fatal(input: &Path, err: &Error, cli: &Cli) -> Result<bool> {
    if cli.json {
        let report = CompileReport::fatal(input.display().to_string(), Diagnostic::from(err));
        println!("{}", report.to_json()?);
    } else {
        eprintln!("{}: {}", input.display(), err);
    }
    Ok(false)
}

/// Compile a source file and write the listing. Returns whether it was clean.
fn build(input: &Path, output: Option<PathBuf>, cli: &Cli) -> Result<bool> {
    let compilation = match compiler(cli).compile_file(input) {
        Ok(c) => c,
        Err(Error::Io(msg)) => anyhow::bail!("reading {}: {}", input.display(), msg),
        Err(err) => return report_fatal(input, &err, cli),
    };

    let lines = if cli.body_only {
        compilation.body_listing()
    } else {
        compilation.listing(&DosBoilerplate)
    };

    let out_path = output.unwrap_or_else(|| input.with_extension("asm"));
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(&out_path, text).with_context(|| format!("writing {}", out_path.display()))?;

    if cli.json {
        let report = compilation.report(input.display().to_string());
        println!("{}", report.to_json()?);
    } else {
        for diagnostic in &compilation.diagnostics {
            eprintln!("{}: {}", input.display(), diagnostic);
        }
        println!("Wrote {} ({} lines)", out_path.display(), lines.len());
    }

    Ok(!compilation.has_errors())
}

/// Check a source file for errors without writing anything
fn check(input: &Path, cli: &Cli) -> Result<bool> {
    let compilation = match compiler(cli).compile_file(input) {
        Ok(c) => c,
        Err(Error::Io(msg)) => anyhow::bail!("reading {}: {}", input.display(), msg),
        Err(err) => return report_fatal(input, &err, cli),
    };

    if cli.json {
        let report = compilation.report(input.display().to_string());
        println!("{}", report.to_json()?);
    } else if compilation.has_errors() {
        for diagnostic in &compilation.diagnostics {
            eprintln!("{}: {}", input.display(), diagnostic);
        }
    } else {
        println!("No errors found");
    }

    Ok(!compilation.has_errors())
}

/// Dump the lexeme stream, one `"text" | Kind` per line
fn tokens(input: &Path, cli: &Cli) -> Result<bool> {
    let reader = SourceReader::from_file(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let lexer = Lexer::from_reader(reader).with_max_identifier_len(cli.max_ident_len);

    for token in lexer.tokenize()? {
        let text = token.lexeme.text().unwrap_or("");
        println!(
            "{:>4}:{:<3} \"{}\" | {}",
            token.location.line,
            token.location.column,
            text,
            token.lexeme.kind_name()
        );
    }
    Ok(true)
}
