use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use ndarray::{Array, ArrayD, IxDyn};
use serde::Serialize;

use pssn_convert::INPUT_FILE;

/// Values as the simulation exports them: scalars, ndarray-encoded arrays,
/// and plain nested lists.
#[derive(Serialize)]
#[serde(untagged)]
enum SampleValue {
    Scalar(f64),
    Array(ArrayD<f64>),
    Nested(Vec<Vec<f64>>),
}

const N_SAMPLE: usize = 100;
const SAMPLING_FREQUENCY: f64 = 5.0; // Hz
const LE_EVERY: usize = 10;
const FRAME_SIZE: usize = 8;

/// Deterministic gaussian noise: splitmix64 uniforms through Box-Muller,
/// keeping the second deviate of each pair for the next draw.
struct Noise {
    state: u64,
    spare: Option<f64>,
}

impl Noise {
    fn new(seed: u64) -> Self {
        Noise { state: seed, spare: None }
    }

    fn uniform(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        // 53 random bits in (0, 1]
        ((z >> 11) + 1) as f64 / (1u64 << 53) as f64
    }

    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z = match self.spare.take() {
            Some(z) => z,
            None => {
                let radius = (-2.0 * self.uniform().ln()).sqrt();
                let angle = std::f64::consts::TAU * self.uniform();
                self.spare = Some(radius * angle.sin());
                radius * angle.cos()
            }
        };
        mean + std_dev * z
    }

    fn array(&mut self, shape: &[usize], std_dev: f64) -> ArrayD<f64> {
        Array::from_shape_simple_fn(IxDyn(shape), || self.gauss(0.0, std_dev))
    }
}

fn sample(rng: &mut Noise, i: usize) -> BTreeMap<&'static str, SampleValue> {
    let mut record = BTreeMap::new();
    record.insert("Time", SampleValue::Scalar(i as f64 / SAMPLING_FREQUENCY));
    record.insert("V SE PSSn", SampleValue::Scalar(rng.gauss(0.98, 0.005).min(1.0)));
    record.insert("H SE PSSn", SampleValue::Scalar(rng.gauss(0.995, 0.001).min(1.0)));
    record.insert("WFE RMS", SampleValue::Array(rng.array(&[1], 5e-9).mapv(f64::abs)));
    record.insert(
        "tip-tilt",
        SampleValue::Nested(vec![vec![rng.gauss(0.0, 1e-7), rng.gauss(0.0, 1e-7)]]),
    );
    record.insert("segment tip-tilt", SampleValue::Array(rng.array(&[2, 7], 1e-7)));
    record.insert("segment piston", SampleValue::Array(rng.array(&[7], 1e-8)));

    if (i + 1) % LE_EVERY == 0 {
        record.insert("V LE PSSn", SampleValue::Scalar(rng.gauss(0.97, 0.002).min(1.0)));
        record.insert("H LE PSSn", SampleValue::Scalar(rng.gauss(0.99, 0.001).min(1.0)));
        record.insert("V FRAME", SampleValue::Array(rng.array(&[FRAME_SIZE, FRAME_SIZE], 1.0)));
        record.insert("H FRAME", SampleValue::Array(rng.array(&[FRAME_SIZE, FRAME_SIZE], 1.0)));
    }
    record
}

fn main() -> Result<()> {
    let mut rng = Noise::new(42);

    let records: Vec<_> = (0..N_SAMPLE).map(|i| sample(&mut rng, i)).collect();

    let file = File::create(INPUT_FILE).with_context(|| format!("creating {INPUT_FILE}"))?;
    let mut writer = BufWriter::new(file);
    serde_pickle::to_writer(&mut writer, &records, serde_pickle::SerOptions::new())
        .context("pickling sample records")?;
    writer.flush().context("flushing sample records")?;

    println!(
        "Wrote {N_SAMPLE} dome seeing samples ({} with long exposure PSSn) to {INPUT_FILE}",
        N_SAMPLE / LE_EVERY
    );
    Ok(())
}
