//! Typed view of a converted dome seeing file.

use std::fs::File;
use std::io::BufReader;
use std::ops::Deref;
use std::path::Path;

use serde::Deserialize;

use crate::convert::OUTPUT_FILE;
use crate::data::Format;
use crate::error::{CodecError, DatasetError};

/// Photometric band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    V,
    H,
}

/// One dome seeing sample
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Data {
    #[serde(rename = "Time")]
    pub time: f64,
    #[serde(rename = "V SE PSSn")]
    pub v_se_pssn: f64,
    #[serde(rename = "H SE PSSn")]
    pub h_se_pssn: f64,
    #[serde(rename = "WFE RMS")]
    pub wfe_rms: Vec<f64>,
    #[serde(rename = "tip-tilt")]
    pub tip_tilt: Vec<f64>,
    #[serde(rename = "segment tip-tilt")]
    pub segment_tip_tilt: Vec<f64>,
    #[serde(rename = "segment piston")]
    pub segment_piston: Vec<f64>,
    #[serde(rename = "V LE PSSn", default)]
    pub v_le_pssn: Option<f64>,
    #[serde(rename = "H LE PSSn", default)]
    pub h_le_pssn: Option<f64>,
    #[serde(rename = "V FRAME", default)]
    pub v_frame: Option<Vec<f64>>,
    #[serde(rename = "H FRAME", default)]
    pub h_frame: Option<Vec<f64>>,
}

/// Time series of dome seeing samples
#[derive(Deserialize, Debug, Clone)]
pub struct DomeSeeing(Vec<Data>);

impl Deref for DomeSeeing {
    type Target = [Data];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DomeSeeing {
    /// Load the time series from the converted file in `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Self::from_path(&dir.as_ref().join(OUTPUT_FILE))
    }

    /// Load the time series from a converted pickle file
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        serde_pickle::from_reader(BufReader::new(file), serde_pickle::DeOptions::new())
            .map(Self)
            .map_err(|e| DatasetError::Decode {
                path: path.to_path_buf(),
                format: Format::Pickle,
                source: CodecError::Pickle(e),
            })
    }

    /// Keeps only the first `len` samples
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wavefront error RMS [m], first entry of each sample
    pub fn wfe_rms(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().filter_map(|ds| ds.wfe_rms.first().copied())
    }

    /// Time vector and wavefront error RMS [m]
    pub fn wfe_rms_series(&self) -> (Vec<f64>, Vec<f64>) {
        self.iter()
            .filter_map(|ds| ds.wfe_rms.first().map(|&w| (ds.time, w)))
            .unzip()
    }

    /// Time vector and instantaneous PSSn
    pub fn se_pssn(&self, band: Band) -> (Vec<f64>, Vec<f64>) {
        self.iter()
            .map(|ds| match band {
                Band::V => (ds.time, ds.v_se_pssn),
                Band::H => (ds.time, ds.h_se_pssn),
            })
            .unzip()
    }

    /// Time vector and cumulative long exposure PSSn, for the samples that carry one
    pub fn le_pssn(&self, band: Band) -> (Vec<f64>, Vec<f64>) {
        self.iter()
            .filter_map(|ds| ds.le(band).map(|x| (ds.time, x)))
            .unzip()
    }

    /// Last long exposure PSSn of the series
    pub fn pssn(&self, band: Band) -> Option<f64> {
        self.iter().filter_map(|ds| ds.le(band)).last()
    }
}

impl Data {
    fn le(&self, band: Band) -> Option<f64> {
        match band {
            Band::V => self.v_le_pssn,
            Band::H => self.h_le_pssn,
        }
    }
}
