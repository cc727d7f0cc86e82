//! Step artifacts: one `step<label>.qasm` per verified label.
//!
//! Files are written through a temp file in the same directory and renamed
//! into place, so a crashed batch never leaves a half-written artifact.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DriverError;
use crate::shards::DepthLabel;

/// `<output_dir>/step<label>.qasm`.
#[must_use]
pub fn step_artifact_path(output_dir: &Path, label: DepthLabel) -> PathBuf {
    output_dir.join(format!("step{label}.qasm"))
}

/// Write `qasm` as the artifact for `label`, creating `output_dir` if needed.
/// Returns the artifact path.
///
/// # Errors
///
/// Returns [`DriverError::Output`] if the directory or file cannot be written.
pub fn write_step_artifact(
    output_dir: &Path,
    label: DepthLabel,
    qasm: &str,
) -> Result<PathBuf, DriverError> {
    fs::create_dir_all(output_dir).map_err(|e| DriverError::Output {
        path: output_dir.to_path_buf(),
        detail: format!("create_dir_all: {e}"),
    })?;

    let path = step_artifact_path(output_dir, label);
    let temp_path = output_dir.join(format!(".tmp_step{label}.qasm"));
    fs::write(&temp_path, qasm).map_err(|e| DriverError::Output {
        path: temp_path.clone(),
        detail: format!("write: {e}"),
    })?;
    fs::rename(&temp_path, &path).map_err(|e| DriverError::Output {
        path: path.clone(),
        detail: format!("rename from {}: {e}", temp_path.display()),
    })?;
    Ok(path)
}
