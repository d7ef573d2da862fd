/// Data layer: core types, loading, normalization, and writing.
///
/// Architecture:
/// ```text
///  .pkl / .pickle / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (Vec<Record>)
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ normalizer  │  Value → Normalized (float or flat float list)
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  Vec<NormalizedRecord> → file
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod normalizer;
pub mod writer;

use std::fmt;
use std::path::Path;

use crate::error::DatasetError;

/// Serialization format of a dataset file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.pkl` / `.pickle` – Python pickle (protocol 3 on write).
    Pickle,
    /// `.json` – a top-level array of objects.
    Json,
    /// `.csv` – one row per record, sequences `;`-separated.
    Csv,
}

impl Format {
    /// Dispatch on the file extension.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "pkl" | "pickle" => Ok(Format::Pickle),
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            _ => Err(DatasetError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pickle => write!(f, "pickle"),
            Format::Json => write!(f, "JSON"),
            Format::Csv => write!(f, "CSV"),
        }
    }
}
