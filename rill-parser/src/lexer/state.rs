//! State functions of the lexer.

use super::Lexer;
use crate::token::TokenKind;

/// A lexer state. Returns the next state or `None` to halt.
pub(super) struct StateFn(pub(super) fn(&mut Lexer<'_>) -> Option<StateFn>);

const WHITESPACE: &str = " \t\r\n";
const DIGITS: &str = "0123456789";
const OPERATORS: &str = "+-*/%!<>=:&|^";

fn next(state: fn(&mut Lexer<'_>) -> Option<StateFn>) -> Option<StateFn> {
    Some(StateFn(state))
}

pub(super) fn lex_text(l: &mut Lexer<'_>) -> Option<StateFn> {
    if l.at_end() {
        l.emit(TokenKind::Eof);
        return None;
    }

    match l.peek() {
        None => {
            l.emit(TokenKind::Eof);
            None
        }
        Some(ch) if WHITESPACE.contains(ch) => next(lex_whitespace),
        Some('(') | Some(')') | Some('{') | Some('}') => next(lex_delimiter),
        Some(ch) if OPERATORS.contains(ch) => next(lex_operator),
        Some(ch) if DIGITS.contains(ch) => next(lex_number),
        Some(ch) if ch.is_alphabetic() => next(lex_identifier_or_keyword),
        Some(ch) => {
            l.next_char();
            l.error(format!("unrecognized character in input: {:?}", ch));
            next(lex_text)
        }
    }
}

fn lex_whitespace(l: &mut Lexer<'_>) -> Option<StateFn> {
    l.accept_run(WHITESPACE);
    l.ignore();
    next(lex_text)
}

fn lex_delimiter(l: &mut Lexer<'_>) -> Option<StateFn> {
    let kind = match l.next_char() {
        Some('(') => TokenKind::LParen,
        Some(')') => TokenKind::RParen,
        Some('{') => TokenKind::LBrace,
        Some('}') => TokenKind::RBrace,
        _ => unreachable!("lex_delimiter is only entered on a delimiter"),
    };
    l.emit(kind);
    next(lex_text)
}

fn lex_number(l: &mut Lexer<'_>) -> Option<StateFn> {
    l.accept_run(DIGITS);
    l.emit(TokenKind::Number);
    next(lex_text)
}

fn lex_identifier_or_keyword(l: &mut Lexer<'_>) -> Option<StateFn> {
    l.accept_run_while(char::is_alphabetic);
    let kind = TokenKind::keyword(l.current_text()).unwrap_or(TokenKind::Ident);
    l.emit(kind);
    next(lex_text)
}

/// Consumes the longest operator starting at the current character.
fn lex_operator(l: &mut Lexer<'_>) -> Option<StateFn> {
    let kind = match l.next_char() {
        Some('>') => {
            if l.accept("=") {
                TokenKind::Gte
            } else if l.accept(">") {
                TokenKind::Shr
            } else {
                TokenKind::Gt
            }
        }
        Some('<') => {
            if l.accept("=") {
                TokenKind::Lte
            } else if l.accept("<") {
                TokenKind::Shl
            } else {
                TokenKind::Lt
            }
        }
        Some(':') => {
            if l.accept("=") {
                TokenKind::Declare
            } else {
                TokenKind::Colon
            }
        }
        Some('!') => {
            if l.accept("=") {
                TokenKind::Neq
            } else {
                TokenKind::Not
            }
        }
        Some('&') => {
            if l.accept("&") {
                TokenKind::And
            } else {
                TokenKind::BitAnd
            }
        }
        Some('|') => {
            if l.accept("|") {
                TokenKind::Or
            } else {
                TokenKind::BitOr
            }
        }
        Some('^') => TokenKind::Xor,
        Some('=') => {
            if l.accept("=") {
                TokenKind::Eq
            } else {
                TokenKind::Assign
            }
        }
        Some(ch) => {
            let compound = l.accept("=");
            match (ch, compound) {
                ('+', false) => TokenKind::Plus,
                ('+', true) => TokenKind::PlusAssign,
                ('-', false) => TokenKind::Minus,
                ('-', true) => TokenKind::MinusAssign,
                ('*', false) => TokenKind::Mul,
                ('*', true) => TokenKind::MulAssign,
                ('/', false) => TokenKind::Quo,
                ('/', true) => TokenKind::QuoAssign,
                ('%', false) => TokenKind::Rem,
                ('%', true) => TokenKind::RemAssign,
                _ => unreachable!("lex_operator is only entered on an operator character"),
            }
        }
        None => unreachable!("lex_operator is only entered on an operator character"),
    };
    l.emit(kind);
    next(lex_text)
}
