use crate::error::{RuntimeError, RuntimeErrorKind};
use crate::ops;
use crate::scope::Scope;
use rill_parser::ast::{Node, SyntaxTree, TypeAnnotation};
use rill_parser::parser::MAX_NESTING;
use rill_parser::token::{Token, TokenKind};
use rill_source::Location;
use rill_value::{Value, ValueType};
use std::rc::Rc;

type EvalResult<T> = Result<T, RuntimeError>;

/// Deepest node evaluated before giving up. Leaves room above what the parser can produce, since
/// an `else if` chain nests two nodes per level.
const MAX_DEPTH: usize = 4 * MAX_NESTING;

/// Walks a [`SyntaxTree`] and computes its value.
///
/// Statements that produce nothing (such as an `if` whose condition is false and that has no
/// `else`) evaluate to `None`.
pub struct Evaluator<'t> {
    tree: &'t SyntaxTree,
    /// The innermost scope. Blocks push a child scope and restore this one when they end.
    scope: Rc<Scope>,
    depth: usize,
}

impl<'t> Evaluator<'t> {
    pub fn new(tree: &'t SyntaxTree, scope: Rc<Scope>) -> Self {
        Self {
            tree,
            scope,
            depth: 0,
        }
    }

    /// The current scope. Once evaluation is over this is the scope passed to [`Evaluator::new`].
    pub fn scope(&self) -> &Rc<Scope> {
        &self.scope
    }

    pub fn evaluate(&mut self) -> EvalResult<Option<Value>> {
        let tree = self.tree;
        match &tree.root {
            Some(root) => self.eval_node(root),
            None => Ok(None),
        }
    }
}

impl<'t> Evaluator<'t> {
    fn eval_node(&mut self, node: &'t Node) -> EvalResult<Option<Value>> {
        if self.depth >= MAX_DEPTH {
            return Err(RuntimeError::new(
                RuntimeErrorKind::NestedTooDeeply,
                node.location().clone(),
            ));
        }
        self.depth += 1;
        let result = self.eval_node_kind(node);
        self.depth -= 1;
        result
    }

    fn eval_node_kind(&mut self, node: &'t Node) -> EvalResult<Option<Value>> {
        log::trace!("evaluating {} at {}", node.kind_name(), node.location());

        match node {
            Node::Number { value, .. } => Ok(Some(Value::Integer(*value))),
            Node::Boolean { value, .. } => Ok(Some(Value::Boolean(*value))),
            Node::Identifier { token } => match self.scope.resolve(&token.text) {
                Some(value) => Ok(Some(value)),
                None => Err(error_at(
                    token,
                    RuntimeErrorKind::UndefinedVariable(token.text.clone()),
                )),
            },
            Node::Parenthesized { inner, .. } => self.eval_value(inner).map(Some),
            Node::Unary { op, operand } => {
                let operand = self.eval_value(operand)?;
                ops::unary(op.kind, &op.text, operand)
                    .map(Some)
                    .map_err(|kind| error_at(op, kind))
            }
            Node::Binary { left, op, right } => {
                // Both operands are always evaluated, `&&` and `||` included.
                let lhs = self.eval_value(left)?;
                let rhs = self.eval_value(right)?;
                ops::binary(op.kind, &op.text, lhs, rhs)
                    .map(Some)
                    .map_err(|kind| error_at(op, kind))
            }
            Node::Assignment {
                identifier,
                annotation,
                op,
                right,
            } => self
                .eval_assignment(identifier, annotation.as_ref(), op, right)
                .map(Some),
            Node::VariableDeclaration {
                ty,
                identifier,
                initializer,
                ..
            } => self
                .eval_declaration(ty.as_ref(), identifier, initializer)
                .map(Some),
            Node::If {
                condition,
                body,
                else_clause,
                ..
            } => {
                let value = self.eval_value(condition)?;
                match value.cast_to_boolean() {
                    Some(true) => self.eval_node(body),
                    Some(false) => match else_clause {
                        Some(else_clause) => self.eval_node(else_clause),
                        None => Ok(None),
                    },
                    None => Err(RuntimeError::new(
                        RuntimeErrorKind::NonBooleanCondition(value.value_type()),
                        condition.location().clone(),
                    )),
                }
            }
            Node::Else { body, .. } => self.eval_node(body),
            Node::Block { statements, .. } => self.eval_block(statements),
            Node::Error { location } => Err(RuntimeError::new(
                RuntimeErrorKind::Malformed,
                location.start.clone(),
            )),
        }
    }

    /// Evaluates an expression that must produce a value.
    fn eval_value(&mut self, node: &'t Node) -> EvalResult<Value> {
        match self.eval_node(node)? {
            Some(value) => Ok(value),
            None => Err(RuntimeError::new(
                RuntimeErrorKind::NoValue,
                node.location().clone(),
            )),
        }
    }

    /// Runs `statements` in a fresh child scope. The value of the block is the value of its last
    /// statement.
    fn eval_block(&mut self, statements: &'t [Node]) -> EvalResult<Option<Value>> {
        let enclosing = Rc::clone(&self.scope);
        self.scope = Scope::new(Some(Rc::clone(&enclosing)));

        let mut result = Ok(None);
        for statement in statements {
            result = self.eval_node(statement);
            if result.is_err() {
                break;
            }
        }

        // Restored on errors too, so that a session can keep using the outer scope.
        self.scope = enclosing;
        result
    }

    fn eval_assignment(
        &mut self,
        identifier: &Token,
        annotation: Option<&TypeAnnotation>,
        op: &Token,
        right: &'t Node,
    ) -> EvalResult<Value> {
        let name = &identifier.text;

        let value = match ops::compound_operator(op.kind) {
            None => {
                let value = self.eval_value(right)?;
                if let Some(TypeAnnotation { ty, .. }) = annotation {
                    check_declared_type(identifier, ty, value)?;
                }
                value
            }
            Some(operator) => {
                let current = self.scope.resolve(name).ok_or_else(|| {
                    error_at(
                        identifier,
                        RuntimeErrorKind::UndefinedAssignmentTarget(name.clone()),
                    )
                })?;
                let rhs = self.eval_value(right)?;
                let current = current.cast_to_integer().ok_or_else(|| {
                    error_at(
                        identifier,
                        RuntimeErrorKind::NotAnInteger {
                            name: name.clone(),
                            found: current.value_type(),
                        },
                    )
                })?;
                ops::binary(operator, &op.text, Value::Integer(current), rhs)
                    .map_err(|kind| error_at(op, kind))?
            }
        };

        log::trace!("{} = {}", name, value);
        self.scope.define(name.as_str(), value);
        Ok(value)
    }

    fn eval_declaration(
        &mut self,
        ty: Option<&Token>,
        identifier: &Token,
        initializer: &'t Node,
    ) -> EvalResult<Value> {
        let name = &identifier.text;
        let value = self.eval_value(initializer)?;

        if self.scope.resolve_local(name).is_some() {
            return Err(error_at(
                identifier,
                RuntimeErrorKind::Redeclaration(name.clone()),
            ));
        }
        if let Some(ty) = ty {
            check_declared_type(identifier, ty, value)?;
        }

        log::trace!("declare {} = {}", name, value);
        self.scope.define(name.as_str(), value);
        Ok(value)
    }
}

/// Checks that `value` matches the `int`/`bool` keyword `ty`.
fn check_declared_type(identifier: &Token, ty: &Token, value: Value) -> EvalResult<()> {
    let expected = match ty.kind {
        TokenKind::Int => ValueType::Integer,
        TokenKind::Bool => ValueType::Boolean,
        _ => return Err(error_at(ty, RuntimeErrorKind::Malformed)),
    };
    if value.value_type() == expected {
        Ok(())
    } else {
        Err(error_at(
            identifier,
            RuntimeErrorKind::TypeMismatch {
                name: identifier.text.clone(),
                expected,
                found: value.value_type(),
            },
        ))
    }
}

fn error_at(token: &Token, kind: RuntimeErrorKind) -> RuntimeError {
    RuntimeError::new(kind, start_of(token))
}

fn start_of(token: &Token) -> Location {
    token.location.start.clone()
}
