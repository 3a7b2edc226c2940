//! Source code representation and diagnostic management.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Represents source code.
pub struct Source<'a> {
    /// Name used when reporting locations (usually a file name).
    pub name: Arc<str>,
    /// Original source code.
    pub content: &'a str,
    /// Accumulated diagnostics.
    pub diagnostics: Diagnostics,
}

impl<'a> Source<'a> {
    /// Create a new `Source` named `name` with the specified `content`.
    pub fn new(name: impl Into<Arc<str>>, content: &'a str) -> Self {
        Self {
            name: name.into(),
            content,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Returns `true` if `Source` has no accumulated errors. Returns `false` otherwise.
    /// Warnings and notes are not considered.
    pub fn has_no_errors(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    /// Records an error diagnostic at `location`.
    pub fn error(&self, location: TokenLocation, message: impl ToString) {
        self.report(DiagnosticKind::Error, location, message);
    }

    /// Records a warning diagnostic at `location`.
    pub fn warning(&self, location: TokenLocation, message: impl ToString) {
        self.report(DiagnosticKind::Warning, location, message);
    }

    /// Records a note diagnostic at `location`.
    pub fn note(&self, location: TokenLocation, message: impl ToString) {
        self.report(DiagnosticKind::Note, location, message);
    }

    fn report(&self, kind: DiagnosticKind, location: TokenLocation, message: impl ToString) {
        self.diagnostics.add(Diagnostic {
            kind,
            location,
            message: message.to_string(),
            file: Arc::clone(&self.name),
        });
    }
}

impl<'a> Into<Source<'a>> for &'a str {
    fn into(self) -> Source<'a> {
        Source::new("<input>", self)
    }
}

/// A position in the source code.
///
/// `line` and `column` are 0-based and are displayed 1-based. `column` counts characters,
/// `offset` counts bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub filename: Arc<str>,
}

impl Location {
    pub fn new(filename: Arc<str>, offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
            filename,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.filename,
            self.line + 1,
            self.column + 1
        )
    }
}

/// The span of a token: where it starts and where it ends (exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLocation {
    pub start: Location,
    pub end: Location,
}

impl TokenLocation {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// An empty span at `location`.
    pub fn empty(location: Location) -> Self {
        Self {
            start: location.clone(),
            end: location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Error,
    Warning,
    Note,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticKind::Error => "error",
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Note => "note",
        })
    }
}

/// A compile time message (lexical or syntax error, warning or note).
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: TokenLocation,
    pub message: String,
    pub file: Arc<str>,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{file}:{line}:{column}: {kind}: {message}",
            file = self.file,
            line = self.location.start.line + 1,
            column = self.location.start.column + 1,
            kind = self.kind,
            message = self.message
        )
    }
}

/// Manages all the diagnostics, in insertion order.
///
/// Writes go through `&self` and are serialized by a mutex so that the lexer and the parser can
/// both report into the same container.
pub struct Diagnostics {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    /// Create an empty `Diagnostics`.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // A panic while pushing cannot leave the vector half-written.
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a diagnostic to the `Diagnostics`.
    pub fn add(&self, diagnostic: Diagnostic) {
        log::debug!("diagnostic: {}", diagnostic);
        self.lock().push(diagnostic);
    }

    /// Returns a copy of all the diagnostics recorded so far.
    pub fn to_vec(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn has_errors(&self) -> bool {
        self.lock().iter().any(Diagnostic::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.has_kind(DiagnosticKind::Warning)
    }

    pub fn has_notes(&self) -> bool {
        self.has_kind(DiagnosticKind::Note)
    }

    fn has_kind(&self, kind: DiagnosticKind) -> bool {
        self.lock().iter().any(|diagnostic| diagnostic.kind == kind)
    }

    /// Prints every diagnostic to stderr, one per line.
    pub fn print(&self) {
        eprint!("{}", self);
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.lock().iter()).finish()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in self.lock().iter() {
            writeln!(f, "{}", diagnostic)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn location(source: &Source, offset: usize, line: usize, column: usize) -> TokenLocation {
        TokenLocation::empty(Location::new(Arc::clone(&source.name), offset, line, column))
    }

    #[test]
    fn test_display_is_one_based() {
        let source = Source::new("main.rl", "1 +\n  $");
        source.error(location(&source, 6, 1, 2), "unrecognized character in input: '$'");
        assert_eq!(
            source.diagnostics.to_string(),
            "main.rl:2:3: error: unrecognized character in input: '$'\n"
        );
    }

    #[test]
    fn test_kinds() {
        let source = Source::new("main.rl", "");
        assert!(source.has_no_errors());
        assert!(source.diagnostics.is_empty());

        source.warning(location(&source, 0, 0, 0), "unused");
        source.note(location(&source, 0, 0, 0), "declared here");
        assert!(source.has_no_errors());
        assert!(source.diagnostics.has_warnings());
        assert!(source.diagnostics.has_notes());

        source.error(location(&source, 0, 0, 0), "boom");
        assert!(source.diagnostics.has_errors());
        assert_eq!(source.diagnostics.len(), 3);
        let errors: Vec<bool> = source
            .diagnostics
            .to_vec()
            .iter()
            .map(Diagnostic::is_error)
            .collect();
        assert_eq!(errors, [false, false, true]);

        source.diagnostics.clear();
        assert!(source.has_no_errors());
    }

    #[test]
    fn test_insertion_order_across_threads() {
        let source = Source::new("main.rl", "");
        thread::scope(|s| {
            s.spawn(|| {
                for i in 0..100 {
                    source.error(location(&source, i, 0, i), format!("lexer {}", i));
                }
            });
            for i in 0..100 {
                source.error(location(&source, i, 0, i), format!("parser {}", i));
            }
        });

        let diagnostics = source.diagnostics.to_vec();
        assert_eq!(diagnostics.len(), 200);
        let lexer: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.message.starts_with("lexer"))
            .map(|d| d.location.start.offset)
            .collect();
        assert_eq!(lexer, (0..100).collect::<Vec<_>>());
    }
}
