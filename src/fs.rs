//! Path-level helpers: scoped opening for decode, atomic replacement for encode.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::BmpError;

pub(crate) fn open_source(path: &Path) -> Result<BufReader<File>, BmpError> {
    let file = File::open(path).map_err(|source| BmpError::IoOpen {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("opened {} for decoding", path.display());
    Ok(BufReader::new(file))
}

/// Run `write` against a temporary file beside `path`, then rename it over
/// `path`. The temporary file is deleted on every failure path.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> Result<(), BmpError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), BmpError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".bmp24-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|source| BmpError::IoOpen {
            path: path.to_path_buf(),
            source,
        })?;

    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write(&mut out)?;
        out.flush().map_err(BmpError::IoWrite)?;
    }
    tmp.as_file().sync_all().map_err(BmpError::IoWrite)?;
    tmp.persist(path).map_err(|e| BmpError::IoWrite(e.error))?;

    debug!("wrote {}", path.display());
    Ok(())
}
