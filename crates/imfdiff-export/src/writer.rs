//! Atomic export file writes.
//!
//! Output goes to a temporary file next to the destination and is renamed over
//! it only once fully written and synced. The destination is never left
//! partially written; on error the temporary file is removed.

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ExportError, Result};

/// Write `path` through `write`, replacing any existing file atomically.
pub fn write_atomically<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<T>,
{
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    let value = {
        let mut out = BufWriter::new(tmp.as_file_mut());
        let value = write(&mut out).map_err(io_err)?;
        out.flush().map_err(io_err)?;
        value
    };
    tmp.as_file().sync_all().map_err(io_err)?;

    debug!(tmp = %tmp.path().display(), dest = %path.display(), "Replacing export file");
    tmp.persist(path).map_err(|e| ExportError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(value)
}
