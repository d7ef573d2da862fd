use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{CodecError, DatasetError};

use super::model::{Normalized, NormalizedRecord};
use super::Format;

/// Serialize normalized records, overwriting `path`.  Dispatch by extension.
///
/// The extension is checked before the file is created, so an unsupported
/// target leaves the filesystem untouched.
pub fn write_file(path: &Path, records: &[NormalizedRecord]) -> Result<(), DatasetError> {
    let format = Format::from_path(path)?;
    let file = File::create(path).map_err(|source| DatasetError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        Format::Pickle => write_pickle(&mut writer, records),
        Format::Json => write_json(&mut writer, records),
        Format::Csv => write_csv(&mut writer, records),
    }
    .map_err(|source| DatasetError::Encode {
        path: path.to_path_buf(),
        format,
        source,
    })?;

    writer.flush().map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "encoded {} records into {} ({format})",
        records.len(),
        path.display()
    );
    Ok(())
}

/// Protocol 3, readable by any Python 3 `pickle.load`.
fn write_pickle<W: Write>(writer: &mut W, records: &[NormalizedRecord]) -> Result<(), CodecError> {
    serde_pickle::to_writer(writer, &records, serde_pickle::SerOptions::new())?;
    Ok(())
}

/// `serde_json` writes NaN and infinities as `null`, which does not load back
/// as a number; use pickle when non-finite values must survive.
fn write_json<W: Write>(writer: &mut W, records: &[NormalizedRecord]) -> Result<(), CodecError> {
    serde_json::to_writer_pretty(&mut *writer, records)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Header is the union of all keys, in sorted order.
fn write_csv<W: Write>(writer: &mut W, records: &[NormalizedRecord]) -> Result<(), CodecError> {
    let columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect();

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&columns)?;
    for record in records {
        csv_writer.write_record(
            columns
                .iter()
                .map(|col| record.get(*col).map(format_cell).unwrap_or_default()),
        )?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Inverse of the loader's cell parsing: sequences always carry a `;`.
pub(crate) fn format_cell(value: &Normalized) -> String {
    match value {
        Normalized::Scalar(v) => v.to_string(),
        Normalized::Sequence(values) if values.len() == 1 => format!("{};", values[0]),
        Normalized::Sequence(values) if values.is_empty() => ";".to_string(),
        Normalized::Sequence(values) => values
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(";"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entries: &[(&str, Normalized)]) -> NormalizedRecord {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn cells() {
        assert_eq!(format_cell(&Normalized::Scalar(1.5)), "1.5");
        assert_eq!(format_cell(&Normalized::Scalar(7.0)), "7");
        assert_eq!(format_cell(&Normalized::Sequence(vec![9.0])), "9;");
        assert_eq!(format_cell(&Normalized::Sequence(vec![])), ";");
        assert_eq!(
            format_cell(&Normalized::Sequence(vec![1.0, 2.5, -3.0])),
            "1;2.5;-3"
        );
    }

    #[test]
    fn csv_uses_union_of_keys() {
        let records = vec![
            record(&[("a", Normalized::Scalar(1.5))]),
            record(&[("b", Normalized::Sequence(vec![1.0, 2.0]))]),
        ];
        let mut out = Vec::new();
        write_csv(&mut out, &records).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,b\n1.5,\n,1;2\n");
    }

    #[test]
    fn json_is_a_list_of_objects() {
        let records = vec![record(&[
            ("a", Normalized::Scalar(1.5)),
            ("b", Normalized::Sequence(vec![1.0, 2.0])),
        ])];
        let mut out = Vec::new();
        write_json(&mut out, &records).unwrap();
        let back: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(back, serde_json::json!([{"a": 1.5, "b": [1.0, 2.0]}]));
    }

    #[test]
    fn json_writes_non_finite_as_null() {
        let records = vec![record(&[
            ("a", Normalized::Scalar(f64::NAN)),
            ("b", Normalized::Sequence(vec![f64::INFINITY, 1.0])),
        ])];
        let mut out = Vec::new();
        write_json(&mut out, &records).unwrap();
        let back: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(back, serde_json::json!([{"a": null, "b": [null, 1.0]}]));
    }

    #[test]
    fn pickle_uses_protocol_3() {
        let records = vec![record(&[("a", Normalized::Scalar(1.5))])];
        let mut out = Vec::new();
        write_pickle(&mut out, &records).unwrap();
        assert_eq!(&out[..2], b"\x80\x03");
        assert_eq!(out.last(), Some(&b'.'));
    }
}
