// minijs: lexer and parser driver for the JavaScript subset

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser as ClapParser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use minijs::parser::lexer::Lexer;
use minijs::parser::parse::{Parser, ParserConfig};

/// Tokenize or parse a JavaScript-subset source file
#[derive(Debug, ClapParser)]
#[command(name = "minijs", version, about)]
struct Cli {
    /// Source file to read
    file: PathBuf,

    /// Print the token stream instead of the syntax tree
    #[arg(long)]
    tokens: bool,

    /// Maximum nesting depth of expressions and blocks
    #[arg(long, default_value_t = ParserConfig::default().max_nesting_depth)]
    max_depth: usize,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "minijs=warn",
        1 => "minijs=debug",
        _ => "minijs=trace",
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", cli.file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    debug!(file = %cli.file.display(), bytes = source.len(), "read source");

    if cli.tokens {
        let mut lexer = Lexer::new(&source);
        for token in lexer.by_ref() {
            println!("{:>4}  {:<10} {}", token.line, token.kind, token);
        }
        for err in lexer.errors() {
            eprintln!("line {}: {}", err.line(), err);
        }
        return ExitCode::SUCCESS;
    }

    let config = ParserConfig {
        max_nesting_depth: cli.max_depth,
    };
    let output = Parser::with_config(&source, config).parse();

    for err in &output.errors {
        eprintln!("line {}: {}", err.line(), err);
    }

    println!("{:#?}", output.program);

    if output.has_errors() {
        return ExitCode::FAILURE;
    }

    info!(items = output.program.len(), "parsed successfully");
    ExitCode::SUCCESS
}
