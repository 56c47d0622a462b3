//! Output directory housekeeping

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Extensions of the files a run writes
const RUN_FILE_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// Create the output directory (and its parents) if it does not exist.
///
/// # Errors
/// Returns `Error::InvalidInput` if the path exists but is not a directory,
/// or the I/O error from creating it.
pub fn prepare_output_directory(directory: &Path) -> Result<()> {
    if directory.exists() && !directory.is_dir() {
        return Err(Error::InvalidInput(format!(
            "Output path is not a directory: {}",
            directory.display()
        )));
    }

    std::fs::create_dir_all(directory)?;
    Ok(())
}

/// Delete `<prefix>*.csv` and `<prefix>*.txt` directly inside `directory`.
///
/// Files without the prefix and files in subdirectories are left alone.
/// Returns the removed paths.
///
/// # Errors
/// Returns the I/O error of the first file that cannot be removed.
pub fn clear_prior_logs(directory: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    for extension in RUN_FILE_EXTENSIONS {
        let pattern = prior_log_pattern(directory, prefix, extension)?;
        let paths = glob::glob(&pattern)
            .map_err(|err| Error::InvalidInput(format!("Bad cleanup pattern {pattern}: {err}")))?;

        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    log::warn!("Skipping unreadable path during cleanup: {err}");
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }

            std::fs::remove_file(&path)?;
            log::debug!("Removed prior log {}", path.display());
            removed.push(path);
        }
    }

    if !removed.is_empty() {
        log::info!("Cleared {} prior files", removed.len());
    }
    Ok(removed)
}

fn prior_log_pattern(directory: &Path, prefix: &str, extension: &str) -> Result<String> {
    let directory = directory.to_str().ok_or_else(|| {
        Error::InvalidInput(format!(
            "Output directory is not valid UTF-8: {}",
            directory.display()
        ))
    })?;

    let base = glob::Pattern::escape(directory);
    let prefix = glob::Pattern::escape(prefix);
    Ok(format!("{base}{}{prefix}*.{extension}", std::path::MAIN_SEPARATOR))
}
