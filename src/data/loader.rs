use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use num_traits::ToPrimitive;
use serde_pickle::{HashableValue, Value as PickleValue};

use crate::error::{CodecError, DatasetError};

use super::model::{Dataset, Record, Value};
use super::Format;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a whole dataset into memory.  Dispatch by extension.
///
/// Supported formats:
/// * `.pkl` / `.pickle` – a pickled list of dicts
/// * `.json`            – `[{ "a": 1.5, "b": [[1, 2], [3, 4]] }, ...]`
/// * `.csv`             – one row per record, sequences `;`-separated
pub fn load_file(path: &Path) -> Result<Dataset, DatasetError> {
    let format = Format::from_path(path)?;
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let dataset = match format {
        Format::Pickle => load_pickle(reader),
        Format::Json => load_json(reader),
        Format::Csv => load_csv(reader),
    }
    .map_err(|source| DatasetError::Decode {
        path: path.to_path_buf(),
        format,
        source,
    })?;

    log::debug!(
        "decoded {} records from {} ({format})",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Pickle loader
// ---------------------------------------------------------------------------

/// A list (or tuple) of dicts mapping `str` keys to numbers, strings, nested
/// lists/tuples, or ndarray-encoded dicts. Pickled numpy objects are not
/// understood.
///
/// Decoded through `serde_pickle::Value` rather than serde so that Python
/// ints beyond the `i64` range survive as floats instead of failing.
fn load_pickle(reader: impl Read) -> Result<Dataset, CodecError> {
    match serde_pickle::value_from_reader(reader, serde_pickle::DeOptions::new())? {
        PickleValue::List(items) | PickleValue::Tuple(items) => {
            items.into_iter().map(record_from_pickle).collect()
        }
        other => Err(CodecError::Layout(format!(
            "expected a list of dicts at the top level, found {}",
            pickle_kind(&other)
        ))),
    }
}

fn record_from_pickle(value: PickleValue) -> Result<Record, CodecError> {
    match value {
        PickleValue::Dict(entries) => entries
            .into_iter()
            .map(|(key, value)| Ok::<_, CodecError>((pickle_key(key)?, from_pickle(value)?)))
            .collect(),
        other => Err(CodecError::Layout(format!(
            "expected a dict per record, found {}",
            pickle_kind(&other)
        ))),
    }
}

fn pickle_key(key: HashableValue) -> Result<String, CodecError> {
    match key {
        HashableValue::String(s) => Ok(s),
        other => Err(CodecError::Layout(format!(
            "dict keys must be str, found {}",
            pickle_kind(&other.into_value())
        ))),
    }
}

fn from_pickle(value: PickleValue) -> Result<Value, CodecError> {
    Ok(match value {
        PickleValue::None => Value::Null,
        PickleValue::Bool(b) => Value::Bool(b),
        PickleValue::I64(i) => Value::Int(i),
        PickleValue::Int(big) => big
            .to_f64()
            .map_or_else(|| Value::Str(big.to_string()), Value::Float),
        PickleValue::F64(v) => Value::Float(v),
        PickleValue::Bytes(bytes) => Value::Str(String::from_utf8_lossy(&bytes).into_owned()),
        PickleValue::String(s) => Value::Str(s),
        PickleValue::List(items) | PickleValue::Tuple(items) => Value::List(
            items
                .into_iter()
                .map(from_pickle)
                .collect::<Result<_, _>>()?,
        ),
        PickleValue::Set(items) | PickleValue::FrozenSet(items) => Value::List(
            items
                .into_iter()
                .map(|item| from_pickle(item.into_value()))
                .collect::<Result<_, _>>()?,
        ),
        PickleValue::Dict(entries) => Value::from_map(
            entries
                .into_iter()
                .map(|(key, value)| Ok::<_, CodecError>((pickle_key(key)?, from_pickle(value)?)))
                .collect::<Result<_, _>>()?,
        ),
    })
}

fn pickle_kind(value: &PickleValue) -> &'static str {
    match value {
        PickleValue::None => "None",
        PickleValue::Bool(_) => "bool",
        PickleValue::I64(_) | PickleValue::Int(_) => "int",
        PickleValue::F64(_) => "float",
        PickleValue::Bytes(_) => "bytes",
        PickleValue::String(_) => "str",
        PickleValue::List(_) => "list",
        PickleValue::Tuple(_) => "tuple",
        PickleValue::Set(_) => "set",
        PickleValue::FrozenSet(_) => "frozenset",
        PickleValue::Dict(_) => "dict",
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "Time": 0.0, "WFE RMS": [1.2e-8], "tip-tilt": [[0.1, 0.2]] },
///   ...
/// ]
/// ```
fn load_json(reader: impl Read) -> Result<Dataset, CodecError> {
    Ok(serde_json::from_reader(reader)?)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the record keys.
/// A cell holding `;` is a sequence: `"1;2;3"`, `"9;"` (one item), `";"` (empty).
/// Empty cells are keys absent from that row.
fn load_csv(reader: impl Read) -> Result<Dataset, CodecError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut dataset = Vec::new();
    for result in reader.records() {
        let row = result?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(key, cell)| (key.clone(), parse_cell(cell)))
            .collect();
        dataset.push(record);
    }
    Ok(dataset)
}

/// Cells are kept as text so the normalizer applies the usual scalar rule.
pub(crate) fn parse_cell(cell: &str) -> Value {
    if !cell.contains(';') {
        return Value::Str(cell.to_string());
    }
    let body = cell.strip_suffix(';').unwrap_or(cell);
    if body.is_empty() {
        return Value::List(Vec::new());
    }
    Value::List(
        body.split(';')
            .map(|tok| Value::Str(tok.to_string()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(items: &[&str]) -> Value {
        Value::List(items.iter().map(|s| Value::Str(s.to_string())).collect())
    }

    #[test]
    fn csv_cells() {
        assert_eq!(parse_cell("1.5"), Value::Str("1.5".into()));
        assert_eq!(parse_cell("1;2;3"), strs(&["1", "2", "3"]));
        assert_eq!(parse_cell("9;"), strs(&["9"]));
        assert_eq!(parse_cell(";"), Value::List(vec![]));
    }

    #[test]
    fn csv_rows_skip_empty_cells() {
        let text = "a,b\n1.5,1;2\n,7\n";
        let dataset = load_csv(text.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0]["a"], Value::Str("1.5".into()));
        assert_eq!(dataset[0]["b"], strs(&["1", "2"]));
        assert!(!dataset[1].contains_key("a"));
        assert_eq!(dataset[1]["b"], Value::Str("7".into()));
    }

    #[test]
    fn json_records() {
        let text = r#"[{"a": 1.5, "b": [[1, 2], [3, 4]]}, {}]"#;
        let dataset = load_json(text.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0]["a"], Value::Float(1.5));
        assert!(matches!(dataset[0]["b"], Value::List(ref rows) if rows.len() == 2));
        assert!(dataset[1].is_empty());
    }

    #[test]
    fn json_top_level_must_be_a_list() {
        assert!(matches!(
            load_json(r#"{"a": 1}"#.as_bytes()),
            Err(CodecError::Json(_))
        ));
    }
}
