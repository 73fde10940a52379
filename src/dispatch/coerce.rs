use std::fmt;

use strum::Display;

use crate::error::{NclipError, Result};

/// Declared type of a positional command parameter.
///
/// `Display` yields the label used in usage lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ParamType {
    #[strum(to_string = "any")]
    Any,
    #[strum(to_string = "integer")]
    Int,
    #[strum(to_string = "string")]
    String,
    #[strum(to_string = "true|false")]
    Bool,
    /// Captures every remaining argument as a raw string. Only meaningful as
    /// the sole declared type.
    #[strum(to_string = "string...")]
    Array,
}

/// A resolved argument handed to a command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Str(value) => f.write_str(value),
            Value::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// Converts raw tokens into values according to the declared parameter types.
///
/// Positions past the declared list, and `Any`/`String` positions, pass
/// through as strings.
pub fn coerce_args(types: &[ParamType], raw: &[String]) -> Result<Vec<Value>> {
    if types.first() == Some(&ParamType::Array) {
        return Ok(raw.iter().cloned().map(Value::Str).collect());
    }

    raw.iter()
        .enumerate()
        .map(|(index, arg)| coerce_one(types.get(index).copied(), index, arg))
        .collect()
}

fn coerce_one(declared: Option<ParamType>, index: usize, arg: &str) -> Result<Value> {
    match declared {
        Some(ParamType::Int) => arg
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| parse_error(index, arg, ParamType::Int)),
        Some(ParamType::Bool) => arg
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|_| parse_error(index, arg, ParamType::Bool)),
        Some(ParamType::Any | ParamType::String | ParamType::Array) | None => {
            Ok(Value::Str(arg.to_string()))
        }
    }
}

fn parse_error(index: usize, arg: &str, expected: ParamType) -> NclipError {
    NclipError::ArgumentParse {
        position: index + 1,
        value: arg.to_string(),
        expected,
    }
}

/// Best-effort guess at a token's type: integer, then boolean, else string.
///
/// Not used during dispatch; `Any` parameters stay raw strings.
pub fn infer_value(raw: &str) -> Value {
    if let Ok(value) = raw.parse::<i64>() {
        Value::Int(value)
    } else if let Ok(value) = raw.parse::<bool>() {
        Value::Bool(value)
    } else {
        Value::Str(raw.to_string())
    }
}
