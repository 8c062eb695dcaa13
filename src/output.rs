use crate::{error::Result, model::PipelineOutput};
use std::{fs, path::Path};
use tracing::info;

/// Writes `output` as JSON, creating or truncating the file at `path`.
pub fn write_output(path: impl AsRef<Path>, output: &PipelineOutput) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string(output)?;
    fs::write(path, json)?;
    info!(path = %path.display(), contests = output.len(), "wrote output");
    Ok(())
}

pub fn read_output(path: impl AsRef<Path>) -> Result<PipelineOutput> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
