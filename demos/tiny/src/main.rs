//! `tiny`: parse Tiny programs and print their syntax tree or tokens.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, WrapErr};
use tiny_lang::{Error, SyntaxDiagnostic, TinyLexer, TokenClass};

#[derive(Debug, Parser)]
#[command(name = "tiny", version, about = "Parse Tiny programs")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a file and print its syntax tree.
    Parse {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Tree)]
        format: Format,

        /// Write the tree here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the token stream of a file, one token per line.
    Tokens { file: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Tree,
    Json,
}

fn read(path: &Path) -> miette::Result<String> {
    fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))
}

fn parse(file: &Path, format: Format, output: Option<&Path>) -> miette::Result<()> {
    let source = read(file)?;
    let tree = match tiny_lang::parse(&source) {
        Ok(tree) => tree,
        Err(Error::Syntax(failure)) => {
            return Err(SyntaxDiagnostic::new(file.display().to_string(), &source, &failure).into());
        }
        Err(Error::Grammar(err)) => return Err(miette::miette!("{err}")),
    };
    log::debug!("parsed {} into {} nodes", file.display(), tree.ast().len());

    let rendered = match format {
        Format::Tree => tree.to_string(),
        Format::Json => serde_json::to_string_pretty(&tree).into_diagnostic()?,
    };
    match output {
        Some(path) => fs::write(path, rendered + "\n")
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {}", path.display())),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

fn tokens(file: &Path) -> miette::Result<()> {
    let source = read(file)?;
    for lexeme in TinyLexer::new(&source) {
        let token = lexeme.token;
        if lexeme.class == TokenClass::Error {
            if let Some(diagnostic) =
                SyntaxDiagnostic::lexical(file.display().to_string(), &source, &token)
            {
                return Err(diagnostic.into());
            }
        }
        println!("{}:{} {} {}", token.line, token.column, lexeme.class, token.text);
    }
    Ok(())
}

fn main() -> miette::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Parse {
            file,
            format,
            output,
        } => parse(&file, format, output.as_deref()),
        Command::Tokens { file } => tokens(&file),
    }
}
