//! Filesystem access: the pre-parse access check and the bounded content read.
//!
//! [`verify`] and [`read_file_bounded`] are separate filesystem operations, so
//! the file may change between them (a time-of-check-to-time-of-use gap).
//! This is accepted: a failure at read time surfaces as `IngestError::Read`,
//! and the read itself enforces the size limit on the bytes actually streamed.

use std::io::{self, Read};
use std::path::Path;

use crate::error::IngestError;

/// Confirm that `path` names an existing, inspectable regular file.
///
/// Performs a single metadata query (following symlinks); no content is read.
///
/// # Errors
///
/// - [`IngestError::NotFound`] if nothing exists at `path`.
/// - [`IngestError::AccessDenied`] if the metadata query is refused.
/// - [`IngestError::Access`] for any other I/O failure.
/// - [`IngestError::NotAFile`] for directories, pipes, sockets and devices.
pub fn verify(path: &Path) -> Result<(), IngestError> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => IngestError::NotFound {
            path: path.to_owned(),
        },
        io::ErrorKind::PermissionDenied => IngestError::AccessDenied {
            path: path.to_owned(),
            source: e,
        },
        _ => IngestError::Access {
            path: path.to_owned(),
            source: e,
        },
    })?;

    if !metadata.is_file() {
        return Err(IngestError::NotAFile {
            path: path.to_owned(),
        });
    }

    Ok(())
}

/// Read the whole file, enforcing `max_file_size`.
///
/// Streams at most `max_file_size + 1` bytes through `Read::take`, so an
/// oversized file is detected without loading it entirely.
///
/// # Errors
///
/// - [`IngestError::Read`] if the file cannot be opened or read.
/// - [`IngestError::FileTooLarge`] if the content exceeds `max_file_size`.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<Vec<u8>, IngestError> {
    let read_error = |source| IngestError::Read {
        path: path.to_owned(),
        source,
    };

    let file = std::fs::File::open(path).map_err(read_error)?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(read_error)?;

    if buffer.len() as u64 > max_file_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_owned(),
            limit: max_file_size,
        });
    }

    Ok(buffer)
}
