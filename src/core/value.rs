//! Value module for depval
//!
//! This module defines the Value enum, representing a single cell
//! returned by a database cursor.

use std::fmt;

use crate::core::errors::{Result, ValidationError};

/// A single cell of a result row
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

/// A result row
pub type Row = Vec<Value>;

impl Value {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get a string representation of the value's type
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    /// Interpret a boolean-ish scalar.
    ///
    /// Databases disagree on what `a = b` returns in a select list: a real
    /// boolean, an integer 0/1, or a string such as `t`.
    pub fn as_bool(&self) -> Result<bool> {
        let coerced = match self {
            Value::Boolean(b) => Some(*b),
            Value::Integer(0) => Some(false),
            Value::Integer(1) => Some(true),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "t" | "true" => Some(true),
                "0" | "f" | "false" => Some(false),
                _ => None,
            },
            _ => None,
        };

        coerced.ok_or_else(|| ValidationError::TypeCoercion {
            value: self.to_string(),
            target: "boolean",
        })
    }

    /// Cast the value to an integer for ordered comparison.
    ///
    /// Floats are truncated. Strings must parse as integers, so `'9'`
    /// and `'10'` compare numerically rather than lexically.
    pub fn as_i64(&self) -> Result<i64> {
        let coerced = match self {
            Value::Integer(i) => Some(*i),
            Value::Boolean(b) => Some(i64::from(*b)),
            Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        coerced.ok_or_else(|| ValidationError::TypeCoercion {
            value: self.to_string(),
            target: "integer",
        })
    }
}

/// Format a Value as a string
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_coercion() {
        assert!(Value::Boolean(true).as_bool().unwrap());
        assert!(Value::Integer(1).as_bool().unwrap());
        assert!(!Value::Integer(0).as_bool().unwrap());
        assert!(Value::from("t").as_bool().unwrap());
        assert!(!Value::from("false").as_bool().unwrap());

        assert!(matches!(
            Value::Integer(2).as_bool(),
            Err(ValidationError::TypeCoercion { target: "boolean", .. })
        ));
        assert!(Value::Null.as_bool().is_err());
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(Value::Integer(42).as_i64().unwrap(), 42);
        assert_eq!(Value::Float(3.9).as_i64().unwrap(), 3);
        assert_eq!(Value::from(" 10 ").as_i64().unwrap(), 10);

        assert!(matches!(
            Value::from("abc").as_i64(),
            Err(ValidationError::TypeCoercion { target: "integer", .. })
        ));
        assert!(Value::Float(f64::NAN).as_i64().is_err());
        assert!(Value::Null.as_i64().is_err());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Integer(7).to_string(), "7");
        assert_eq!(Value::from("x").to_string(), "\"x\"");
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(5i64)), Value::Integer(5));
    }
}
