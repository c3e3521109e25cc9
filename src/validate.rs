//! Directory checks run before any measurement.

use std::fs;
use std::path::Path;

use tracing::error;

use crate::error::Error;

/// Check that `dir` is a directory we can both read and write.
pub fn check_directory(dir: &Path) -> Result<(), Error> {
    if !dir.is_dir() {
        error!(path = %dir.display(), "Invalid directory");
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    if !is_readable(dir) || !is_writable(dir) {
        error!(path = %dir.display(), "Directory is not readable or writable");
        return Err(Error::PermissionDenied(dir.to_path_buf()));
    }

    Ok(())
}

fn is_readable(dir: &Path) -> bool {
    fs::read_dir(dir).is_ok()
}

// The temp file is unlinked as soon as it is dropped.
fn is_writable(dir: &Path) -> bool {
    tempfile::tempfile_in(dir).is_ok()
}
