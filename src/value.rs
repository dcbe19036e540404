// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Dynamically typed argument values passed to unit constructors.

use std::fmt;

use serde::Deserialize;

use crate::error::ValidationError;
use crate::offset::DataValue;

/// A single argument value. Values read from configuration files are never `NoOffset`; that
/// variant only exists for callers that want to bypass the data offset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    #[serde(skip)]
    NoOffset(i64),
}

impl Value {
    /// A short description of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::NoOffset(_) => "integer",
        }
    }

    /// Interprets the value as an integer subject to the data offset.
    pub fn as_data(&self, param: &'static str) -> Result<DataValue, ValidationError> {
        match self {
            Value::Int(n) => Ok(DataValue::Plain(*n)),
            Value::NoOffset(n) => Ok(DataValue::NoOffset(*n)),
            other => Err(other.wrong_type(param, "an integer")),
        }
    }

    /// Interprets the value as a plain integer. Offset immunity is irrelevant here and dropped.
    pub fn as_int(&self, param: &'static str) -> Result<i64, ValidationError> {
        match self {
            Value::Int(n) | Value::NoOffset(n) => Ok(*n),
            other => Err(other.wrong_type(param, "an integer")),
        }
    }

    /// Interprets the value as a float; integers are widened.
    pub fn as_float(&self, param: &'static str) -> Result<f64, ValidationError> {
        match self {
            Value::Int(n) | Value::NoOffset(n) => Ok(*n as f64),
            Value::Float(f) => Ok(*f),
            other => Err(other.wrong_type(param, "a number")),
        }
    }

    /// Interprets the value as a sequence.
    pub fn as_seq(&self, param: &'static str) -> Result<&[Value], ValidationError> {
        match self {
            Value::Seq(values) => Ok(values),
            other => Err(other.wrong_type(param, "a sequence")),
        }
    }

    pub(crate) fn wrong_type(&self, param: &'static str, expected: &'static str) -> ValidationError {
        ValidationError::WrongType {
            param,
            expected,
            got: format!("{} {}", self.type_name(), self),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "'{}'", s),
            Value::Seq(values) => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, ")")
            }
            Value::NoOffset(n) => write!(f, "NoOffset({})", n),
        }
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Value {
                    Value::Int(value.into())
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Value {
        Value::Float(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Value {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::Str(value)
    }
}

impl From<DataValue> for Value {
    fn from(value: DataValue) -> Value {
        match value {
            DataValue::Plain(n) => Value::Int(n),
            DataValue::NoOffset(n) => Value::NoOffset(n),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Value {
        Value::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Value {
        Value::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Value {
        Value::Seq(vec![a.into(), b.into()])
    }
}

#[cfg(test)]
mod test {
    use crate::error::ValidationError;
    use crate::offset::DataValue;

    use super::Value;

    #[test]
    fn conversions() {
        assert_eq!(Value::Int(5), 5u8.into());
        assert_eq!(Value::Float(0.5), 0.5.into());
        assert_eq!(Value::Str("c4".to_string()), "c4".into());
        assert_eq!(
            Value::Seq(vec![Value::Int(48), Value::Str("c5".to_string())]),
            (48, "c5").into()
        );
        assert_eq!(Value::NoOffset(3), DataValue::NoOffset(3).into());
    }

    #[test]
    fn accessors() {
        assert_eq!(Ok(DataValue::NoOffset(3)), Value::NoOffset(3).as_data("channel"));
        assert_eq!(Ok(64.0), Value::Int(64).as_float("fixed"));
        assert_eq!(
            Err(ValidationError::WrongType {
                param: "channel",
                expected: "an integer",
                got: "string 'one'".to_string(),
            }),
            Value::from("one").as_data("channel")
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            "(48, 'c5', 0.5)",
            Value::Seq(vec![48.into(), "c5".into(), 0.5.into()]).to_string()
        );
        assert_eq!("NoOffset(7)", Value::NoOffset(7).to_string());
    }
}
