//! Parse, check and evaluate rill source code.
//!
//! A [`Session`] keeps its root scope between runs, so variables declared by one run are visible
//! to the next one. This is what the REPL uses.

use rill_eval::Evaluator;
use rill_parser::ast::SyntaxTree;
use rill_parser::parser::Parser;
use rill_source::{Diagnostic, Source};
use std::rc::Rc;
use thiserror::Error;

pub use rill_eval::{RuntimeError, RuntimeErrorKind, Scope};
pub use rill_value::{Value, ValueType};

#[derive(Debug, Error)]
pub enum RunError {
    /// The source has lexical or syntax errors and was not evaluated. Holds every diagnostic that
    /// was reported, warnings and notes included.
    #[error("{}", display_diagnostics(.0))]
    Diagnostics(Vec<Diagnostic>),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

fn display_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct Session {
    scope: Rc<Scope>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            scope: Scope::new(None),
        }
    }

    /// The root scope shared by every run.
    pub fn scope(&self) -> &Rc<Scope> {
        &self.scope
    }

    /// Parses `source`. Fails if any error was reported.
    pub fn check(&self, source: &Source<'_>) -> Result<SyntaxTree, RunError> {
        let tree = Parser::new(source).parse();
        if source.diagnostics.has_errors() {
            return Err(RunError::Diagnostics(source.diagnostics.to_vec()));
        }
        for diagnostic in source.diagnostics.to_vec() {
            log::warn!("{}", diagnostic);
        }
        Ok(tree)
    }

    /// Parses `source` as a sequence of statements. Fails if any error was reported, in which case
    /// none of the statements should be evaluated.
    pub fn check_script(&self, source: &Source<'_>) -> Result<Vec<SyntaxTree>, RunError> {
        let trees = Parser::new(source).parse_script();
        if source.diagnostics.has_errors() {
            return Err(RunError::Diagnostics(source.diagnostics.to_vec()));
        }
        for diagnostic in source.diagnostics.to_vec() {
            log::warn!("{}", diagnostic);
        }
        Ok(trees)
    }

    /// Evaluates an already checked tree in the root scope.
    pub fn evaluate(&self, tree: &SyntaxTree) -> Result<Option<Value>, RunError> {
        let value = Evaluator::new(tree, Rc::clone(&self.scope)).evaluate()?;
        Ok(value)
    }

    /// Parses, checks and evaluates `content`. `name` is used in diagnostics and error locations.
    pub fn run(&self, name: &str, content: &str) -> Result<Option<Value>, RunError> {
        let source = Source::new(name, content);
        let tree = self.check(&source)?;
        self.evaluate(&tree)
    }

    /// Evaluates checked statements in order, stopping at the first runtime error. Returns the
    /// value of the last statement.
    pub fn evaluate_script(&self, trees: &[SyntaxTree]) -> Result<Option<Value>, RunError> {
        let mut value = None;
        for tree in trees {
            value = self.evaluate(tree)?;
        }
        Ok(value)
    }

    /// Like [`Session::run`], but `content` may hold any number of statements.
    pub fn run_script(&self, name: &str, content: &str) -> Result<Option<Value>, RunError> {
        let source = Source::new(name, content);
        let trees = self.check_script(&source)?;
        self.evaluate_script(&trees)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
