use std::fmt;
use std::path::Path;

use crate::data::loader::load_file;
use crate::data::model::{Normalized, NormalizedRecord};
use crate::data::normalizer::normalize_dataset;
use crate::data::writer::write_file;
use crate::error::DatasetError;

/// Dome seeing records as exported from the simulation.
pub const INPUT_FILE: &str = "domeseeing_PSSN.pickle";
/// Flattened records, see [`crate::domeseeing::DomeSeeing::load`].
pub const OUTPUT_FILE: &str = "domeseeing_PSSN.rs.pkl";

/// What a conversion run produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub scalars: usize,
    pub sequences: usize,
    /// Total floats across all sequences.
    pub elements: usize,
}

impl Summary {
    fn tally(records: &[NormalizedRecord]) -> Self {
        let mut summary = Summary {
            records: records.len(),
            ..Default::default()
        };
        for value in records.iter().flat_map(|record| record.values()) {
            match value {
                Normalized::Scalar(_) => summary.scalars += 1,
                Normalized::Sequence(values) => {
                    summary.sequences += 1;
                    summary.elements += values.len();
                }
            }
        }
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records ({} scalars, {} sequences holding {} floats)",
            self.records, self.scalars, self.sequences, self.elements
        )
    }
}

/// Load `input`, normalize every value, and write the result to `output`.
///
/// The output file is only created once every record has been normalized.
pub fn convert(input: &Path, output: &Path) -> Result<Summary, DatasetError> {
    let dataset = load_file(input)?;
    log::info!("loaded {} records from {}", dataset.len(), input.display());

    let normalized = normalize_dataset(&dataset)?;
    drop(dataset);

    write_file(output, &normalized)?;
    let summary = Summary::tally(&normalized);
    log::info!("wrote {summary} to {}", output.display());
    Ok(summary)
}
