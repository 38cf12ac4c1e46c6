//! Base directory resolution
//!
//! The pipeline runs relative to a fixed anchor: the parent of the
//! directory holding the pipeline definition. With the binary installed as
//! `<workspace>/ci/ci-pipeline` the anchor is `<workspace>`, whatever the
//! caller's working directory and however the binary was reached.

use crate::pipeline::PipelineError;
use std::path::{Path, PathBuf};

/// Location of the pipeline definition
///
/// `explicit` wins when given; otherwise the running executable is the
/// definition.
///
/// # Errors
///
/// Returns [`PipelineError::AnchorResolution`] when the executable path
/// cannot be determined.
pub fn definition_location(explicit: Option<&Path>) -> Result<PathBuf, PipelineError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    std::env::current_exe().map_err(|e| PipelineError::AnchorResolution {
        path: "<current executable>".to_string(),
        reason: e.to_string(),
    })
}

/// Resolves the anchor directory for `definition`
///
/// Symlinks are followed first, so a link to the definition anchors on
/// the real file's location. Relative paths resolve against the process'
/// current directory.
///
/// # Errors
///
/// Returns [`PipelineError::AnchorResolution`] when the definition does not
/// exist or has no grandparent directory.
pub fn resolve_anchor(definition: &Path) -> Result<PathBuf, PipelineError> {
    let failure = |reason: String| PipelineError::AnchorResolution {
        path: definition.display().to_string(),
        reason,
    };

    let real = definition
        .canonicalize()
        .map_err(|e| failure(e.to_string()))?;

    let anchor = real
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| failure("definition has no parent directory".to_string()))?;

    tracing::debug!(
        definition = %real.display(),
        anchor = %anchor.display(),
        "Resolved base directory"
    );

    Ok(anchor.to_path_buf())
}
