use crate::token::Token;
use rill_source::{Location, TokenLocation};

/// A parsed program. Owns every node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyntaxTree {
    /// `None` when the input contained no statement.
    pub root: Option<Node>,
}

impl SyntaxTree {
    /// Reconstructs the source text of the whole tree.
    pub fn text(&self) -> String {
        self.root.as_ref().map(Node::text).unwrap_or_default()
    }
}

/// A `: int` / `: bool` annotation on an assignment expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub colon: Token,
    pub ty: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An integer literal (e.g. `42`).
    Number { token: Token, value: i64 },
    /// `true` or `false`.
    Boolean { token: Token, value: bool },
    /// A binary expression (e.g. `1+1`).
    Binary {
        left: Box<Node>,
        op: Token,
        right: Box<Node>,
    },
    /// A prefix expression (e.g. `-x`, `!ok`).
    Unary { op: Token, operand: Box<Node> },
    Parenthesized {
        lparen: Token,
        inner: Box<Node>,
        rparen: Token,
    },
    /// `x = e`, `x += e` or `x: int = e`.
    Assignment {
        identifier: Token,
        annotation: Option<TypeAnnotation>,
        op: Token,
        right: Box<Node>,
    },
    /// `x := e` or `int x = e`.
    VariableDeclaration {
        ty: Option<Token>,
        identifier: Token,
        op: Token,
        initializer: Box<Node>,
    },
    /// An identifier (e.g. `foo`).
    Identifier { token: Token },
    If {
        if_token: Token,
        condition: Box<Node>,
        body: Box<Node>,
        /// Always a [`Node::Else`].
        else_clause: Option<Box<Node>>,
    },
    /// The body is either a statement or another [`Node::If`] for `else if` chains.
    Else { else_token: Token, body: Box<Node> },
    Block {
        lbrace: Token,
        statements: Vec<Node>,
        rbrace: Token,
    },
    /// Stands in for a construct that failed to parse. A diagnostic has been reported.
    Error { location: TokenLocation },
}

impl Node {
    /// Name of the variant, used for debugging output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Number { .. } => "Number",
            Node::Boolean { .. } => "Boolean",
            Node::Binary { .. } => "Binary",
            Node::Unary { .. } => "Unary",
            Node::Parenthesized { .. } => "Parenthesized",
            Node::Assignment { .. } => "Assignment",
            Node::VariableDeclaration { .. } => "VariableDeclaration",
            Node::Identifier { .. } => "Identifier",
            Node::If { .. } => "If",
            Node::Else { .. } => "Else",
            Node::Block { .. } => "Block",
            Node::Error { .. } => "Error",
        }
    }

    /// Where the node starts in the source.
    pub fn location(&self) -> &Location {
        match self {
            Node::Number { token, .. }
            | Node::Boolean { token, .. }
            | Node::Identifier { token } => &token.location.start,
            Node::Binary { left, .. } => left.location(),
            Node::Unary { op, .. } => &op.location.start,
            Node::Parenthesized { lparen, .. } => &lparen.location.start,
            Node::Assignment { identifier, .. } => &identifier.location.start,
            Node::VariableDeclaration { ty, identifier, .. } => {
                &ty.as_ref().unwrap_or(identifier).location.start
            }
            Node::If { if_token, .. } => &if_token.location.start,
            Node::Else { else_token, .. } => &else_token.location.start,
            Node::Block { lbrace, .. } => &lbrace.location.start,
            Node::Error { location } => &location.start,
        }
    }

    /// Byte offset where the node starts.
    pub fn position(&self) -> usize {
        self.location().offset
    }

    /// Direct children, in source order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Number { .. }
            | Node::Boolean { .. }
            | Node::Identifier { .. }
            | Node::Error { .. } => Vec::new(),
            Node::Binary { left, right, .. } => vec![&**left, &**right],
            Node::Unary { operand, .. } => vec![&**operand],
            Node::Parenthesized { inner, .. } => vec![&**inner],
            Node::Assignment { right, .. } => vec![&**right],
            Node::VariableDeclaration { initializer, .. } => vec![&**initializer],
            Node::If {
                condition,
                body,
                else_clause,
                ..
            } => {
                let mut children = vec![&**condition, &**body];
                children.extend(else_clause.as_deref());
                children
            }
            Node::Else { body, .. } => vec![&**body],
            Node::Block { statements, .. } => statements.iter().collect(),
        }
    }

    /// Reconstructs the source text of the node by concatenating its tokens.
    /// Only meant for display and debugging.
    pub fn text(&self) -> String {
        let mut buf = String::new();
        self.write_to(&mut buf);
        buf
    }

    fn write_to(&self, buf: &mut String) {
        match self {
            Node::Number { token, .. }
            | Node::Boolean { token, .. }
            | Node::Identifier { token } => push_token(buf, token),
            Node::Binary { left, op, right } => {
                left.write_to(buf);
                push_token(buf, op);
                right.write_to(buf);
            }
            Node::Unary { op, operand } => {
                push_token(buf, op);
                operand.write_to(buf);
            }
            Node::Parenthesized {
                lparen,
                inner,
                rparen,
            } => {
                push_token(buf, lparen);
                inner.write_to(buf);
                push_token(buf, rparen);
            }
            Node::Assignment {
                identifier,
                annotation,
                op,
                right,
            } => {
                push_token(buf, identifier);
                if let Some(TypeAnnotation { colon, ty }) = annotation {
                    push_token(buf, colon);
                    push_token(buf, ty);
                }
                push_token(buf, op);
                right.write_to(buf);
            }
            Node::VariableDeclaration {
                ty,
                identifier,
                op,
                initializer,
            } => {
                if let Some(ty) = ty {
                    push_token(buf, ty);
                }
                push_token(buf, identifier);
                push_token(buf, op);
                initializer.write_to(buf);
            }
            Node::If {
                if_token,
                condition,
                body,
                else_clause,
            } => {
                push_token(buf, if_token);
                condition.write_to(buf);
                body.write_to(buf);
                if let Some(else_clause) = else_clause {
                    else_clause.write_to(buf);
                }
            }
            Node::Else { else_token, body } => {
                push_token(buf, else_token);
                body.write_to(buf);
            }
            Node::Block {
                lbrace,
                statements,
                rbrace,
            } => {
                push_token(buf, lbrace);
                for statement in statements {
                    statement.write_to(buf);
                }
                push_token(buf, rbrace);
            }
            Node::Error { .. } => {}
        }
    }
}

const OPERATOR_CHARS: &str = "+-*/%!<>=:&|^";

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

/// Appends `token`, separated by a space only where the two neighbouring tokens would otherwise
/// lex as one (`int x`, `1 x`, `& &`).
fn push_token(buf: &mut String, token: &Token) {
    if let (Some(last), Some(first)) = (buf.chars().last(), token.text.chars().next()) {
        let glued = (is_word_char(last) && is_word_char(first))
            || (OPERATOR_CHARS.contains(last) && OPERATOR_CHARS.contains(first));
        if glued {
            buf.push(' ');
        }
    }
    buf.push_str(&token.text);
}
