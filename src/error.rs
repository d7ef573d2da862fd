use std::io;
use std::path::PathBuf;

use crate::data::Format;

/// Failure of one value to become a float (or a flat list of floats).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("{0} value is not convertible to a float")]
    NotNumeric(&'static str),
    #[error("string {0:?} is not a number")]
    InvalidNumber(String),
    #[error("nested list is not rectangular at depth {depth}")]
    Ragged { depth: usize },
}

/// Errors raised by the underlying codecs.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Pickle(#[from] serde_pickle::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Layout(String),
}

/// Everything that can stop a conversion run.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("unsupported file extension: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("cannot open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot create {}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed {format} dataset in {}", .path.display())]
    Decode {
        path: PathBuf,
        format: Format,
        #[source]
        source: CodecError,
    },
    #[error("cannot encode {format} dataset into {}", .path.display())]
    Encode {
        path: PathBuf,
        format: Format,
        #[source]
        source: CodecError,
    },
    #[error("record {record}, key {key:?}")]
    Conversion {
        record: usize,
        key: String,
        #[source]
        source: ValueError,
    },
}
