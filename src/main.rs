use std::path::Path;

use anyhow::{Context, Result};
use pssn_convert::{convert, INPUT_FILE, OUTPUT_FILE};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    convert(Path::new(INPUT_FILE), Path::new(OUTPUT_FILE))
        .with_context(|| format!("converting {INPUT_FILE} into {OUTPUT_FILE}"))?;
    Ok(())
}
