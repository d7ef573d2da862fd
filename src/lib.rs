//! Dome seeing PSSn record flattening
//!
//! Loads a list of records whose values are scalars or n-dimensional arrays,
//! turns every value into a float or a flat list of floats, and writes the
//! records back out so that readers need no array library.

pub mod convert;
pub mod data;
pub mod domeseeing;
pub mod error;

pub use convert::{convert, Summary, INPUT_FILE, OUTPUT_FILE};
pub use data::model::{Dataset, Normalized, NormalizedRecord, Record, Value};
pub use domeseeing::{Band, DomeSeeing};
pub use error::{DatasetError, ValueError};
