//! Typed views over JSON values handed to parsers.

use serde_json::{Map, Value};
use std::fmt;

/// A borrowed JSON value, classified. `null` and a missing key are both `Absent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fragment<'a> {
    /// String, number or boolean.
    Scalar(&'a Value),
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
    Absent,
}

impl<'a> Fragment<'a> {
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Object(map)) => Self::Object(map),
            Some(Value::Array(items)) => Self::Array(items.as_slice()),
            Some(scalar) => Self::Scalar(scalar),
        }
    }

    /// The value at `key` in `object`.
    pub fn field(object: &'a Map<String, Value>, key: &str) -> Self {
        Self::of(object.get(key))
    }

    pub fn shape(&self) -> Option<Shape> {
        match self {
            Self::Scalar(_) => Some(Shape::Scalar),
            Self::Object(_) => Some(Shape::Object),
            Self::Array(_) => Some(Shape::Array),
            Self::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Text of a scalar: strings as is, numbers and booleans printed.
    pub fn as_string(&self) -> Option<String> {
        match self {
            Self::Scalar(Value::String(s)) => Some(s.clone()),
            Self::Scalar(Value::Number(n)) => Some(n.to_string()),
            Self::Scalar(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    /// `true` for the boolean or the string "true" (any case); other scalars are false.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(Value::Bool(b)) => Some(*b),
            Self::Scalar(_) => self.as_string().map(|s| s.eq_ignore_ascii_case("true")),
            _ => None,
        }
    }

    /// Numbers, and strings that parse as numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Scalar(Value::Number(n)) => n.as_f64(),
            Self::Scalar(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Scalar(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Self::Scalar(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&'a Map<String, Value>> {
        match self {
            Self::Object(map) => Some(*map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&'a [Value]> {
        match self {
            Self::Array(items) => Some(*items),
            _ => None,
        }
    }
}

/// What a parser accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar,
    Object,
    Array,
    /// Any present value.
    Any,
}

impl Shape {
    pub fn accepts(&self, fragment: &Fragment<'_>) -> bool {
        match (self, fragment.shape()) {
            (_, None) => false,
            (Self::Any, Some(_)) => true,
            (expected, Some(actual)) => *expected == actual,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Object => "object",
            Self::Array => "array",
            Self::Any => "any",
        })
    }
}
