//! rill command-line.
//!
//! When called with a FILE it runs the statements of that file in order. Otherwise it drops into an
//! interactive prompt where every line is run in the same session, so declarations carry over from
//! one line to the next.

mod cli;
mod logger;

use anyhow::{self, Context};
use clap::Parser;
use cli::{Args, Config};
use console::style;
use rill::{RunError, Session};
use rill_eval::RuntimeError;
use rill_parser::printer::sexp;
use rill_source::{Diagnostic, DiagnosticKind, Source};
use std::fs;
use std::io::{self, prelude::*};
use std::process;

fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_args(Args::parse());
    logger::init(config.log_level).context("failed to install logger")?;

    let session = Session::new();
    match &config.file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if !run(&session, &config, &content) {
                process::exit(1);
            }
        }
        None => run_prompt(&session, &config)?,
    }

    Ok(())
}

fn run_prompt(session: &Session, config: &Config) -> Result<(), io::Error> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut input = String::new();
    loop {
        stdout.write_all(b"> ")?;
        stdout.flush()?;

        input.clear();
        let nbytes = stdin.read_line(&mut input)?;
        if nbytes == 0 {
            break;
        }

        // Failures are reported and the session keeps going.
        run(session, config, &input);
    }

    Ok(())
}

/// Runs `content` in `session` and reports the outcome. Returns `false` if it failed.
fn run(session: &Session, config: &Config, content: &str) -> bool {
    let source = Source::new(config.name.as_str(), content);
    let result = session.check_script(&source).and_then(|trees| {
        if config.dump_ast {
            for tree in &trees {
                eprintln!("{}", sexp(tree));
            }
        }
        session.evaluate_script(&trees)
    });

    match result {
        Ok(value) => {
            if let Some(value) = value {
                println!("{}", value);
            }
            true
        }
        Err(RunError::Diagnostics(diagnostics)) => {
            for diagnostic in &diagnostics {
                print_diagnostic(config, diagnostic);
            }
            false
        }
        Err(RunError::Runtime(error)) => {
            print_runtime_error(config, &error);
            false
        }
    }
}

fn print_diagnostic(config: &Config, diagnostic: &Diagnostic) {
    let kind = style(diagnostic.kind)
        .bold()
        .force_styling(config.color_enabled);
    let kind = match diagnostic.kind {
        DiagnosticKind::Error => kind.red(),
        DiagnosticKind::Warning => kind.yellow(),
        DiagnosticKind::Note => kind.cyan(),
    };
    eprintln!(
        "{}: {}: {}",
        diagnostic.location.start, kind, diagnostic.message
    );
}

fn print_runtime_error(config: &Config, error: &RuntimeError) {
    let kind = style("runtime error")
        .red()
        .bold()
        .force_styling(config.color_enabled);
    eprintln!("{}: {}: {}", error.location, kind, error.kind);
}
