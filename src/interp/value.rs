// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Operand stack values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Name(String),
    String(String),
    Array(Vec<Value>),
    Dictionary(BTreeMap<String, Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Name(_) => "name",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Dictionary(_) => "dictionary",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn numbers(values: &[f64]) -> Value {
        Value::Array(values.iter().map(|&n| Value::Number(n)).collect())
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

/// Rendering used by `=`
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write_number(f, *n),
            Value::Name(name) => write!(f, "{}", name),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Dictionary(entries) => {
                write!(f, "<<")?;
                for (key, value) in entries {
                    write!(f, " /{} {}", key, value)?;
                }
                write!(f, " >>")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_numbers() {
        assert_eq!(Value::Number(15.0).to_string(), "15");
        assert_eq!(Value::Number(-2.5).to_string(), "-2.5");
    }

    #[test]
    fn test_display_composites() {
        assert_eq!(Value::numbers(&[0.0, 1.5]).to_string(), "[0 1.5]");
        let mut dict = BTreeMap::new();
        dict.insert("LineWidth".to_string(), Value::Number(1.0));
        assert_eq!(Value::Dictionary(dict).to_string(), "<< /LineWidth 1 >>");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Name("x".into()).type_name(), "name");
        assert_eq!(Value::String("x".into()).type_name(), "string");
        assert_eq!(Value::Number(1.0).as_number(), Some(1.0));
        assert_eq!(Value::Name("x".into()).as_number(), None);
    }
}
