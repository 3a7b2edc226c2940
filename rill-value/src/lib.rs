//! Runtime values.

use std::fmt;

/// A dynamically typed value. There is no "undefined" value: absence is represented by `None`
/// or by an error.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
}

/// The runtime type of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Boolean,
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::Boolean(_) => ValueType::Boolean,
        }
    }

    /// Attempts to cast the `Value` into an `i64` or `None` if wrong type.
    pub fn cast_to_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(val) => Some(*val),
            _ => None,
        }
    }

    /// Attempts to cast the `Value` into a `bool` or `None` if wrong type.
    pub fn cast_to_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(val) => Some(*val),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::Integer(val)
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Boolean(val)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Integer => "int",
            ValueType::Boolean => "bool",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_across_types() {
        assert_eq!(Value::from(1), Value::Integer(1));
        assert_ne!(Value::Integer(1), Value::Boolean(true));
        assert_ne!(Value::Integer(0), Value::Boolean(false));
    }

    #[test]
    fn test_casts() {
        assert_eq!(Value::Integer(3).cast_to_integer(), Some(3));
        assert_eq!(Value::Integer(3).cast_to_boolean(), None);
        assert_eq!(Value::Boolean(true).cast_to_boolean(), Some(true));
        assert_eq!(Value::Boolean(true).value_type(), ValueType::Boolean);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Integer(-7).to_string(), "-7");
        assert_eq!(Value::Boolean(false).to_string(), "false");
        assert_eq!(ValueType::Integer.to_string(), "int");
    }
}
