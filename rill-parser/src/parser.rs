use crate::ast::{Node, SyntaxTree, TypeAnnotation};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use rill_source::{Source, TokenLocation};
use std::collections::VecDeque;

mod expr;
mod stmt;

/// How deeply statements and expressions may nest. Every later stage walks the tree
/// recursively, so this also bounds their stack usage.
pub const MAX_NESTING: usize = 128;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Tokens pulled from the lexer but not consumed yet. `lookahead[0]` is the current token.
    lookahead: VecDeque<Token>,
    /// The end of file token, repeated once the lexer is exhausted.
    eof: Option<Token>,
    /// Number of tokens consumed so far.
    consumed: usize,
    /// Current nesting level, see [`MAX_NESTING`].
    depth: usize,
    /// Set once the nesting limit was hit. The rest of the input is skipped without reporting
    /// more syntax errors.
    abandoned: bool,
    /// Source code
    source: &'a Source<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        Self {
            lexer: Lexer::new(source),
            lookahead: VecDeque::new(),
            eof: None,
            consumed: 0,
            depth: 0,
            abandoned: false,
            source,
        }
    }
}

impl<'a> Parser<'a> {
    /// Parses statements until the end of the input, one tree per top-level statement.
    ///
    /// Like [`Parser::parse`], problems are reported to the source diagnostics.
    pub fn parse_script(&mut self) -> Vec<SyntaxTree> {
        let trees = self
            .parse_statement_list(TokenKind::Eof)
            .into_iter()
            .map(|root| SyntaxTree { root: Some(root) })
            .collect();

        for _ in self.lexer.by_ref() {}

        trees
    }

    /// Parses a single statement spanning the whole input.
    ///
    /// Never fails: problems are reported to the source diagnostics and the returned tree may
    /// contain [`Node::Error`] placeholders.
    pub fn parse(&mut self) -> SyntaxTree {
        let root = if self.at(TokenKind::Eof) {
            None
        } else {
            Some(self.parse_statement())
        };
        self.expect(TokenKind::Eof);

        // The rest of the input is not parsed, but lexical errors in it are still reported.
        for _ in self.lexer.by_ref() {}

        SyntaxTree { root }
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    /// Makes sure `lookahead` holds at least `offset + 1` tokens.
    fn fill(&mut self, offset: usize) {
        while self.lookahead.len() <= offset {
            let token = match self.lexer.next() {
                // Already reported by the lexer.
                Some(token) if token.kind == TokenKind::Bad => continue,
                Some(token) => token,
                None => self.eof.clone().unwrap_or_else(|| {
                    let end = self.source.content.len();
                    let location = rill_source::Location::new(self.source.name.clone(), end, 0, 0);
                    Token::new(TokenKind::Eof, "", TokenLocation::empty(location))
                }),
            };
            if token.kind == TokenKind::Eof {
                self.eof = Some(token.clone());
            }
            self.lookahead.push_back(token);
        }
    }

    /// Returns the token `offset` tokens ahead of the current one.
    fn peek(&mut self, offset: usize) -> &Token {
        self.fill(offset);
        &self.lookahead[offset]
    }

    fn current(&mut self) -> &Token {
        self.peek(0)
    }

    fn at(&mut self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Consumes and returns the current token. The end of file token is never consumed.
    fn next(&mut self) -> Token {
        self.fill(0);
        if self.lookahead[0].kind == TokenKind::Eof {
            return self.lookahead[0].clone();
        }
        self.consumed += 1;
        match self.lookahead.pop_front() {
            Some(token) => token,
            None => unreachable!("lookahead was just filled"),
        }
    }

    /// Predicate that tests whether the current token has the given kind and eats it if yes as a side effect.
    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.next())
        } else {
            None
        }
    }

    /// Eats a token of the given kind. Otherwise reports an error and returns a placeholder
    /// [`TokenKind::Unexpected`] token without consuming anything.
    fn expect(&mut self, kind: TokenKind) -> Token {
        match self.eat(kind) {
            Some(token) => token,
            None => {
                self.unexpected(kind.name());
                self.placeholder()
            }
        }
    }

    /// An empty [`TokenKind::Unexpected`] token located at the current token.
    fn placeholder(&mut self) -> Token {
        let location = self.current().location.clone();
        Token::new(TokenKind::Unexpected, "", location)
    }

    /// Raises an unexpected token error at the current token.
    fn unexpected(&mut self, expected: &str) {
        if self.abandoned {
            return;
        }
        let current = self.current().clone();
        log::trace!("unexpected {} at {}", current, current.location.start);
        self.source.error(
            current.location,
            format!("unexpected token {}, expected {}", current.kind, expected),
        );
    }

    /// A placeholder node located at the current token.
    fn error_node(&mut self) -> Node {
        Node::Error {
            location: self.current().location.clone(),
        }
    }

    /// Runs `parse` one nesting level deeper.
    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> Node) -> Node {
        if self.depth >= MAX_NESTING {
            return self.nesting_too_deep();
        }
        self.depth += 1;
        let node = parse(self);
        self.depth -= 1;
        node
    }

    /// Reports the nesting limit once and skips everything up to the end of file.
    fn nesting_too_deep(&mut self) -> Node {
        let node = self.error_node();
        if !self.abandoned {
            let location = self.current().location.clone();
            log::debug!("nesting limit reached at {}", location.start);
            self.source.error(location, "code is nested too deeply");
            self.abandoned = true;
        }
        while !self.at(TokenKind::Eof) {
            self.next();
        }
        node
    }
}
