//! Hand-written lexer.
//!
//! The lexer is a state machine: every state is a function that consumes zero or more characters,
//! emits zero or more tokens and returns the next state. The machine halts after emitting
//! [`TokenKind::Eof`]. Tokens are produced lazily, one [`Iterator::next`] call at a time.

mod state;

use crate::token::{Token, TokenKind};
use rill_source::{Location, Source, TokenLocation};
use state::StateFn;
use std::collections::VecDeque;

/// A position in the input being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    offset: usize,
    line: usize,
    column: usize,
}

pub struct Lexer<'a> {
    source: &'a Source<'a>,
    input: &'a str,
    /// Start of the token currently being scanned.
    start: Cursor,
    /// Current scanning position.
    pos: Cursor,
    /// Position before the last call to `next_char`, used by `backup`.
    last: Option<Cursor>,
    state: Option<StateFn>,
    /// Tokens emitted but not yet handed out.
    pending: VecDeque<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        let origin = Cursor {
            offset: 0,
            line: 0,
            column: 0,
        };
        Self {
            source,
            input: source.content,
            start: origin,
            pos: origin,
            last: None,
            state: Some(StateFn(state::lex_text)),
            pending: VecDeque::new(),
        }
    }

    /// Consumes and returns the next character or `None` at the end of the input.
    fn next_char(&mut self) -> Option<char> {
        self.last = Some(self.pos);
        let ch = self.input[self.pos.offset..].chars().next()?;
        self.pos.offset += ch.len_utf8();
        if ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 0;
        } else {
            self.pos.column += 1;
        }
        Some(ch)
    }

    /// Steps back over the last character returned by `next_char`. Can only be called once per
    /// call to `next_char`.
    fn backup(&mut self) {
        if let Some(last) = self.last.take() {
            self.pos = last;
        }
    }

    fn peek(&mut self) -> Option<char> {
        let ch = self.next_char();
        self.backup();
        ch
    }

    /// Consumes the next character if it is contained in `valid`.
    fn accept(&mut self, valid: &str) -> bool {
        match self.next_char() {
            Some(ch) if valid.contains(ch) => true,
            _ => {
                self.backup();
                false
            }
        }
    }

    /// Consumes a run of characters contained in `valid`.
    fn accept_run(&mut self, valid: &str) {
        while self.accept(valid) {}
    }

    /// Consumes a run of characters satisfying `pred`.
    fn accept_run_while(&mut self, pred: impl Fn(char) -> bool) {
        loop {
            match self.next_char() {
                Some(ch) if pred(ch) => {}
                _ => {
                    self.backup();
                    break;
                }
            }
        }
    }

    /// Text of the token being scanned.
    fn current_text(&self) -> &'a str {
        let input = self.input;
        &input[self.start.offset..self.pos.offset]
    }

    fn location(&self) -> TokenLocation {
        let name = &self.source.name;
        TokenLocation::new(
            Location::new(
                name.clone(),
                self.start.offset,
                self.start.line,
                self.start.column,
            ),
            Location::new(name.clone(), self.pos.offset, self.pos.line, self.pos.column),
        )
    }

    /// Skips over the pending input.
    fn ignore(&mut self) {
        self.start = self.pos;
    }

    fn emit(&mut self, kind: TokenKind) {
        let token = Token::new(kind, self.current_text(), self.location());
        log::trace!("emit {} at {}", token, token.location.start);
        self.pending.push_back(token);
        self.start = self.pos;
    }

    /// Emits the pending input as a [`TokenKind::Bad`] token and reports it.
    fn error(&mut self, message: impl ToString) {
        self.source.error(self.location(), message);
        self.emit(TokenKind::Bad);
    }

    fn at_end(&self) -> bool {
        self.pos.offset >= self.input.len()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            let StateFn(state) = self.state.take()?;
            self.state = state(self);
        }
    }
}
