//! Tree-walking evaluation of a [`rill_parser::ast::SyntaxTree`].

pub mod error;
pub mod evaluator;
mod ops;
pub mod scope;

pub use error::{RuntimeError, RuntimeErrorKind};
pub use evaluator::Evaluator;
pub use scope::Scope;
