use crate::error::{DatasetError, ValueError};

use super::model::{Normalized, NormalizedRecord, Record, Value};

// ---------------------------------------------------------------------------
// Single values
// ---------------------------------------------------------------------------

/// Turn one value into its portable form.
///
/// * `Array` → every element in logical (row-major) order, as floats
/// * `List`  → rectangular nesting flattened row-major, as floats
/// * anything else → a single float, see [`to_float`]
///
/// The original shape is not kept.
pub fn normalize(value: &Value) -> Result<Normalized, ValueError> {
    match value {
        Value::Array(array) => array
            .iter()
            .map(to_float)
            .collect::<Result<Vec<_>, _>>()
            .map(Normalized::Sequence),
        Value::List(items) => flatten(items).map(Normalized::Sequence),
        scalar => to_float(scalar).map(Normalized::Scalar),
    }
}

/// Convert a scalar to `f64`.
///
/// Booleans count as `1.0` / `0.0`, strings are parsed after trimming
/// surrounding whitespace (`inf`, `nan` and exponents are accepted).
/// Underscores are accepted between two digits only, so `"1_000"` is
/// `1000.0` while `"_1"` and `"1__0"` are rejected.
pub fn to_float(value: &Value) -> Result<f64, ValueError> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Int(i) => Ok(*i as f64),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Str(s) => parse_number(s.trim()).ok_or_else(|| ValueError::InvalidNumber(s.clone())),
        other => Err(ValueError::NotNumeric(other.kind())),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    if !text.contains('_') {
        return text.parse().ok();
    }
    let bytes = text.as_bytes();
    let separators_ok = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if !separators_ok {
        return None;
    }
    text.replace('_', "").parse().ok()
}

/// Flatten a nested list row-major.
///
/// The shape is read off the first element at each depth; every other
/// element must agree with it.
pub fn flatten(items: &[Value]) -> Result<Vec<f64>, ValueError> {
    let shape = list_shape(items);
    let mut out = Vec::with_capacity(shape.iter().product());
    flatten_into(items, &shape, 0, &mut out)?;
    Ok(out)
}

fn list_shape(items: &[Value]) -> Vec<usize> {
    let mut shape = vec![items.len()];
    let mut current = items;
    while let Some(Value::List(inner)) = current.first() {
        shape.push(inner.len());
        current = inner;
    }
    shape
}

fn flatten_into(
    items: &[Value],
    shape: &[usize],
    depth: usize,
    out: &mut Vec<f64>,
) -> Result<(), ValueError> {
    if items.len() != shape[depth] {
        return Err(ValueError::Ragged { depth });
    }
    let leaf_level = depth + 1 == shape.len();
    for item in items {
        match item {
            Value::List(inner) if !leaf_level => flatten_into(inner, shape, depth + 1, out)?,
            Value::List(_) => return Err(ValueError::Ragged { depth: depth + 1 }),
            _ if !leaf_level => return Err(ValueError::Ragged { depth: depth + 1 }),
            leaf => out.push(to_float(leaf)?),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Records and datasets
// ---------------------------------------------------------------------------

/// Normalize every value of a record, keeping its keys.
///
/// On failure, returns the offending key with the error.
pub fn normalize_record(record: &Record) -> Result<NormalizedRecord, (String, ValueError)> {
    record
        .iter()
        .map(|(key, value)| {
            normalize(value)
                .map(|normalized| (key.clone(), normalized))
                .map_err(|e| (key.clone(), e))
        })
        .collect()
}

/// Normalize a whole dataset, keeping record order. Stops at the first failure.
pub fn normalize_dataset(records: &[Record]) -> Result<Vec<NormalizedRecord>, DatasetError> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            normalize_record(record).map_err(|(key, source)| DatasetError::Conversion {
                record: i,
                key,
                source,
            })
        })
        .collect()
}
