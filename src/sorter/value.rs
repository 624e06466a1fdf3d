use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::SortError;

/// A single field value inside a [`Record`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(serde_json::Number),
    Text(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn int(n: i64) -> Self {
        Value::Number(n.into())
    }

    /// Returns `None` for non-finite floats, which JSON cannot carry anyway
    pub fn float(n: f64) -> Option<Self> {
        serde_json::Number::from_f64(n).map(Value::Number)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "text",
        }
    }

    /// Natural ordering of two values of the same kind.
    ///
    /// Numbers compare by exact value, so an integer and a float never round
    /// into each other. Text compares lexicographically. Number vs text has no
    /// ordering.
    pub fn try_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Number(a), Value::Number(b)) => match (integer(a), integer(b)) {
                (Some(x), Some(y)) => Some(x.cmp(&y)),
                (Some(x), None) => Some(cmp_int_float(x, b.as_f64()?)),
                (None, Some(y)) => Some(cmp_int_float(y, a.as_f64()?).reverse()),
                (None, None) => a.as_f64()?.partial_cmp(&b.as_f64()?),
            },
            _ => None,
        }
    }

    /// Comparison that reports a mismatch as a [`SortError`] tagged with the sort key
    pub fn compare(&self, other: &Value, key: &str) -> Result<Ordering, SortError> {
        self.try_cmp(other).ok_or_else(|| SortError::TypeMismatch {
            key: key.to_string(),
            left: self.kind(),
            right: other.kind(),
        })
    }

    /// Total ordering used where a sort must never fail: numbers rank before text
    pub(crate) fn total_cmp(&self, other: &Value) -> Ordering {
        match self.try_cmp(other) {
            Some(ord) => ord,
            None => match (self, other) {
                (Value::Number(_), Value::Text(_)) => Ordering::Less,
                (Value::Text(_), Value::Number(_)) => Ordering::Greater,
                _ => Ordering::Equal,
            },
        }
    }
}

fn integer(n: &serde_json::Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Exact comparison of an integer against a finite float
fn cmp_int_float(int: i128, float: f64) -> Ordering {
    // Every JSON integer fits well inside 2^127
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0_f64.total_cmp(&(float - whole)),
        ord => ord,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::int(n as i64)
    }
}

/// Lookup result for a field on a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    Present(&'a Value),
    Absent,
}

impl<'a> Field<'a> {
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    pub fn or(self, default: &'a Value) -> &'a Value {
        match self {
            Field::Present(v) => v,
            Field::Absent => default,
        }
    }
}

/// A key-value record, serialized as a flat JSON object in its original field order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Field<'_> {
        match self.0.get(key) {
            Some(v) => Field::Present(v),
            None => Field::Absent,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}
