//! Writing the rendered plan to disk

use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use super::PlanDocument;

/// Write the document to `path`, replacing any previous plan
///
/// The text goes to a sibling temporary file that is renamed into place, so
/// a failed write never leaves a partial plan at `path`.
pub fn save_document(document: &PlanDocument, path: &Path) -> std::io::Result<()> {
    debug!(path = %path.display(), bytes = document.as_str().len(), "save_document: called");

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "output path has no file name"))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let written = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(document.as_str().as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written?;

    info!(path = %path.display(), "Saved plan document");
    Ok(())
}
