//! Visitor pattern for AST nodes.

use crate::ast::Node;

pub trait Visitor<'ast>: Sized {
    fn visit_node(&mut self, node: &'ast Node) {
        walk_node(self, node);
    }
}

/// Visits every direct child of `node`, in source order.
pub fn walk_node<'ast>(visitor: &mut impl Visitor<'ast>, node: &'ast Node) {
    match node {
        Node::Number { .. } => {}
        Node::Boolean { .. } => {}
        Node::Identifier { .. } => {}
        Node::Binary { left, op: _, right } => {
            visitor.visit_node(left);
            visitor.visit_node(right);
        }
        Node::Unary { op: _, operand } => visitor.visit_node(operand),
        Node::Parenthesized { inner, .. } => visitor.visit_node(inner),
        Node::Assignment { right, .. } => visitor.visit_node(right),
        Node::VariableDeclaration { initializer, .. } => visitor.visit_node(initializer),
        Node::If {
            if_token: _,
            condition,
            body,
            else_clause,
        } => {
            visitor.visit_node(condition);
            visitor.visit_node(body);
            if let Some(else_clause) = else_clause {
                visitor.visit_node(else_clause);
            }
        }
        Node::Else { else_token: _, body } => visitor.visit_node(body),
        Node::Block { statements, .. } => {
            for statement in statements {
                visitor.visit_node(statement);
            }
        }
        Node::Error { .. } => {}
    }
}
