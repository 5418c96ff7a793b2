//! Row values
//!
//! Transient read results; rows are never persisted outside the store.

use std::fmt;

/// A single typed cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i32),

    /// Fixed-width text, padding included
    Text(String),
}

impl Value {
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Integer(_) => None,
            Value::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// One row: a value per schema field, in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    number: u32,
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn new(number: u32, values: Vec<Value>) -> Self {
        Self { number, values }
    }

    /// Row number this row was read from
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, field: usize) -> Option<&Value> {
        self.values.get(field)
    }

    /// Render the selected fields separated by single spaces
    ///
    /// Fields beyond the row's arity are skipped.
    pub fn project(&self, fields: &[usize]) -> String {
        fields
            .iter()
            .filter_map(|&i| self.values.get(i))
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
