//! S-expression rendering of the AST, for debugging.
//!
//! `x := 1 + 2 * 3` renders as `(:= x (+ 1 (* 2 3)))`.

use crate::ast::{Node, SyntaxTree, TypeAnnotation};
use crate::visitor::Visitor;

/// Renders a node as an S-expression.
pub fn sexp<'ast>(node: impl Into<Printable<'ast>>) -> String {
    let mut printer = Printer { buf: String::new() };
    match node.into() {
        Printable::Node(node) => printer.visit_node(node),
        Printable::Tree(tree) => {
            if let Some(root) = &tree.root {
                printer.visit_node(root);
            }
        }
    }
    printer.buf
}

/// Anything [`sexp`] can render.
pub enum Printable<'ast> {
    Node(&'ast Node),
    Tree(&'ast SyntaxTree),
}

impl<'ast> From<&'ast Node> for Printable<'ast> {
    fn from(node: &'ast Node) -> Self {
        Printable::Node(node)
    }
}

impl<'ast> From<&'ast SyntaxTree> for Printable<'ast> {
    fn from(tree: &'ast SyntaxTree) -> Self {
        Printable::Tree(tree)
    }
}

struct Printer {
    buf: String,
}

impl Printer {
    fn list<'ast>(&mut self, head: &str, children: impl IntoIterator<Item = &'ast Node>) {
        self.buf.push('(');
        self.buf.push_str(head);
        for child in children {
            self.buf.push(' ');
            self.visit_node(child);
        }
        self.buf.push(')');
    }
}

impl<'ast> Visitor<'ast> for Printer {
    fn visit_node(&mut self, node: &'ast Node) {
        match node {
            Node::Number { token, .. }
            | Node::Boolean { token, .. }
            | Node::Identifier { token } => self.buf.push_str(&token.text),
            Node::Binary { op, .. } | Node::Unary { op, .. } => {
                self.list(&op.text, node.children())
            }
            Node::Parenthesized { inner, .. } => self.list("paren", Some(&**inner)),
            Node::Assignment {
                identifier,
                annotation,
                op,
                right,
            } => {
                let mut head = format!("{} {}", op.text, identifier.text);
                if let Some(TypeAnnotation { colon, ty }) = annotation {
                    head.push_str(&colon.text);
                    head.push_str(&ty.text);
                }
                self.list(&head, Some(&**right));
            }
            Node::VariableDeclaration {
                ty,
                identifier,
                op,
                initializer,
            } => {
                let mut head = op.text.clone();
                if let Some(ty) = ty {
                    head.push(' ');
                    head.push_str(&ty.text);
                }
                head.push(' ');
                head.push_str(&identifier.text);
                self.list(&head, Some(&**initializer));
            }
            Node::If { .. } => self.list("if", node.children()),
            Node::Else { .. } => self.list("else", node.children()),
            Node::Block { .. } => self.list("block", node.children()),
            Node::Error { .. } => self.buf.push_str("<error>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use insta::assert_snapshot;

    fn tree(source: &str) -> String {
        let source = source.into();
        let tree = Parser::new(&source).parse();
        sexp(&tree)
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(tree(""), "");
    }

    #[test]
    fn test_program() {
        assert_snapshot!(
            tree("{ int x = 1 if x >= 1 { x: int = x * 2 } else { x -= 1 } }"),
            @"(block (= int x 1) (if (>= x 1) (block (= x:int (* x 2))) (else (block (-= x 1)))))"
        );
    }
}
