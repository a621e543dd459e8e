//! STC Compiler CLI

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use stc::error::report_error;
use stc::fold::ConstantFolder;

#[derive(Parser)]
#[command(name = "stc", version, about = "IEC 61131-3 Structured Text compiler front-end")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Constant-fold an expression and print the root annotations
    Fold {
        /// Source file containing one ST expression
        file: PathBuf,
    },
    /// Parse, fold, and dump the annotated AST (debug)
    Parse {
        /// Source file to parse
        file: PathBuf,
    },
    /// Tokenize and dump tokens (debug)
    Tokens {
        /// Source file to tokenize
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Fold { file } => fold_file(&file),
        Command::Parse { file } => parse_file(&file),
        Command::Tokens { file } => tokenize_file(&file),
    };

    if result.is_err() {
        std::process::exit(1);
    }
}

fn load(path: &PathBuf) -> Result<(String, String), ()> {
    match std::fs::read_to_string(path) {
        Ok(source) => Ok((path.display().to_string(), source)),
        Err(e) => {
            eprintln!("Error: cannot read {}: {e}", path.display());
            Err(())
        }
    }
}

fn fold_file(path: &PathBuf) -> Result<(), ()> {
    let (filename, source) = load(path)?;
    let expr = fold_source(&filename, &source)?;

    let range = expr.span.resolve(&source);
    println!("{filename}:{range}:");
    println!("  bool: {}", expr.cvalues.as_bool);
    println!("  uint: {}", expr.cvalues.as_uint);
    println!("   int: {}", expr.cvalues.as_int);
    println!("  real: {}", expr.cvalues.as_real);
    Ok(())
}

fn parse_file(path: &PathBuf) -> Result<(), ()> {
    let (filename, source) = load(path)?;
    let expr = fold_source(&filename, &source)?;

    match serde_json::to_string_pretty(&expr) {
        Ok(json) => {
            println!("{json}");
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Err(())
        }
    }
}

fn tokenize_file(path: &PathBuf) -> Result<(), ()> {
    let (filename, source) = load(path)?;

    match stc::lexer::tokenize(&source) {
        Ok(tokens) => {
            for (tok, span) in &tokens {
                println!("{tok:?} @ {}..{}", span.start, span.end);
            }
            Ok(())
        }
        Err(e) => {
            report_error(&filename, &source, &e);
            Err(())
        }
    }
}

fn fold_source(filename: &str, source: &str) -> Result<stc::ast::Expr, ()> {
    let run = || -> stc::Result<stc::ast::Expr> {
        let tokens = stc::lexer::tokenize(source)?;
        let mut expr = stc::parser::parse(tokens)?;
        let mut folder = ConstantFolder::new();
        folder.fold(&mut expr)?;
        Ok(expr)
    };

    run().map_err(|e| report_error(filename, source, &e))
}
