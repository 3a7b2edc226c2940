use rill_source::Location;
use rill_value::ValueType;
use thiserror::Error;

/// An error raised while evaluating a syntax tree. Evaluation stops at the first one.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{location}: {kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub location: Location,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, location: Location) -> Self {
        Self { kind, location }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeErrorKind {
    #[error("undefined variable {0}")]
    UndefinedVariable(String),
    /// Compound assignment to a name that is not bound anywhere.
    #[error("variable {0} not defined")]
    UndefinedAssignmentTarget(String),
    #[error("variable {0} already defined")]
    Redeclaration(String),
    #[error("cannot assign {found} to variable {name} of type {expected}")]
    TypeMismatch {
        name: String,
        expected: ValueType,
        found: ValueType,
    },
    #[error("variable {name} is not an integer, found {found}")]
    NotAnInteger { name: String, found: ValueType },
    #[error("operator {op} cannot be applied to {left} and {right}")]
    InvalidOperands {
        op: String,
        left: ValueType,
        right: ValueType,
    },
    #[error("operator {op} cannot be applied to {operand}")]
    InvalidOperand { op: String, operand: ValueType },
    #[error("division by zero")]
    DivisionByZero,
    #[error("negative shift amount {0}")]
    NegativeShift(i64),
    #[error("condition must be bool, found {0}")]
    NonBooleanCondition(ValueType),
    #[error("expression does not produce a value")]
    NoValue,
    /// The tree contains a construct that failed to parse.
    #[error("cannot evaluate code that failed to parse")]
    Malformed,
    #[error("code is nested too deeply")]
    NestedTooDeeply,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = RuntimeError::new(
            RuntimeErrorKind::InvalidOperands {
                op: "+".to_string(),
                left: ValueType::Integer,
                right: ValueType::Boolean,
            },
            Location::new("main.rl".into(), 4, 0, 4),
        );
        assert_eq!(
            error.to_string(),
            "main.rl:1:5: operator + cannot be applied to int and bool"
        );
    }
}
