//! Output file naming and directory handling.

use crate::error::PipelineError;
use cardfit_layout::{LayoutError, PaperProfile};
use cardfit_types::Participant;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FOLDER: &str = "output";

/// `{name with spaces as underscores}_invitation_{paper label}.png`.
///
/// Names containing path separators are rejected instead of being written
/// outside the output folder.
pub fn card_file_name(
    participant: &Participant,
    paper: &PaperProfile,
) -> Result<String, PipelineError> {
    let name = participant.display_name.trim();
    if name.contains(['/', '\\']) {
        return Err(LayoutError::configuration(
            "participant",
            format!("'{}' contains a path separator", name),
        )
        .into());
    }
    Ok(format!(
        "{}_invitation_{}.png",
        name.replace(' ', "_"),
        paper.name()
    ))
}

/// Creates `folder` and any missing parents. Succeeds when it already exists,
/// including when another job created it concurrently.
pub fn ensure_output_dir(folder: &Path) -> io::Result<()> {
    match std::fs::create_dir_all(folder) {
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && folder.is_dir() => Ok(()),
        other => other,
    }
}

pub fn card_path(
    folder: &Path,
    participant: &Participant,
    paper: &PaperProfile,
) -> Result<PathBuf, PipelineError> {
    Ok(folder.join(card_file_name(participant, paper)?))
}
