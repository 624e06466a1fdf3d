//! Ordering of key-value records by a named field.
//!
//! All variants are stable and borrow the input: they return a new ordering of
//! `&Record`, never new records. Values under a key are expected to be of one
//! kind (all numbers or all text); see [`Value::try_cmp`].

pub mod value;

pub use value::{Field, Record, Value};

use log::warn;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SortError {
    #[error("cannot compare {left} with {right} under key '{key}'")]
    TypeMismatch {
        key: String,
        left: &'static str,
        right: &'static str,
    },

    #[error("record {index} has no key '{key}'")]
    MissingKey { key: String, index: usize },
}

/// Records split by whether they carry the sort key
#[derive(Debug, Clone, PartialEq)]
pub struct Partitioned<'a> {
    /// Records containing the key, sorted ascending
    pub sorted: Vec<&'a Record>,
    /// Records lacking the key, in input order
    pub missing: Vec<&'a Record>,
}

impl<'a> Partitioned<'a> {
    pub fn into_ordered(self) -> Vec<&'a Record> {
        let mut out = self.sorted;
        out.extend(self.missing);
        out
    }
}

/// Sort ascending by `key`, substituting `default` where the key is absent.
///
/// Never fails. If a key holds mixed kinds, numbers rank before text; the
/// relative order across kinds carries no further meaning.
pub fn sort_by_key_with_default<'a>(
    records: &'a [Record],
    key: &str,
    default: &Value,
) -> Vec<&'a Record> {
    let mut ordered: Vec<&Record> = records.iter().collect();
    ordered.sort_by(|a, b| a.field(key).or(default).total_cmp(b.field(key).or(default)));
    ordered
}

/// Sort the records that carry `key`, then append the ones that don't.
///
/// A type mismatch inside the keyed partition degrades to returning the input
/// unchanged; the warning log is the only signal.
pub fn sort_by_key_partitioned<'a>(records: &'a [Record], key: &str) -> Vec<&'a Record> {
    match try_sort_by_key_partitioned(records, key) {
        Ok(partitioned) => {
            if !partitioned.missing.is_empty() {
                warn!(
                    "{} record(s) missing key '{}'",
                    partitioned.missing.len(),
                    key
                );
            }
            partitioned.into_ordered()
        }
        Err(e) => {
            warn!("Sorting by '{}' failed, keeping input order: {}", key, e);
            records.iter().collect()
        }
    }
}

pub fn try_sort_by_key_partitioned<'a>(
    records: &'a [Record],
    key: &str,
) -> Result<Partitioned<'a>, SortError> {
    let (keyed, missing): (Vec<&Record>, Vec<&Record>) =
        records.iter().partition(|r| r.contains(key));

    let values: Vec<&Value> = keyed
        .iter()
        .filter_map(|r| match r.field(key) {
            Field::Present(v) => Some(v),
            Field::Absent => None,
        })
        .collect();
    ensure_comparable(&values, key)?;

    Ok(Partitioned {
        sorted: sort_checked(keyed, key)?,
        missing,
    })
}

/// Sort requiring every record to carry `key`.
pub fn sort_by_key_strict<'a>(records: &'a [Record], key: &str) -> Result<Vec<&'a Record>, SortError> {
    let mut values = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match record.field(key) {
            Field::Present(v) => values.push(v),
            Field::Absent => {
                return Err(SortError::MissingKey {
                    key: key.to_string(),
                    index,
                })
            }
        }
    }
    ensure_comparable(&values, key)?;
    sort_checked(records.iter().collect(), key)
}

/// Every value must be comparable with the first one for the sort to be total.
fn ensure_comparable(values: &[&Value], key: &str) -> Result<(), SortError> {
    if let Some((first, rest)) = values.split_first() {
        for v in rest {
            first.compare(v, key)?;
        }
        // A float with no ordering against itself (NaN) would slip past the loop above
        first.compare(first, key)?;
    }
    Ok(())
}

fn sort_checked<'a>(mut keyed: Vec<&'a Record>, key: &str) -> Result<Vec<&'a Record>, SortError> {
    let mut failure: Option<SortError> = None;
    keyed.sort_by(|a, b| match (a.field(key), b.field(key)) {
        (Field::Present(x), Field::Present(y)) => match x.compare(y, key) {
            Ok(ord) => ord,
            Err(e) => {
                failure.get_or_insert(e);
                Ordering::Equal
            }
        },
        (Field::Present(_), Field::Absent) => Ordering::Less,
        (Field::Absent, Field::Present(_)) => Ordering::Greater,
        (Field::Absent, Field::Absent) => Ordering::Equal,
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(keyed),
    }
}
