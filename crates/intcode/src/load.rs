//! Loading program images from disk.

use std::path::{Path, PathBuf};

use intcode_vm::{ParseProgramError, Program};
use thiserror::Error;

/// Errors that can occur when reading a program image file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read program at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse program at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: ParseProgramError,
    },
}

/// Read and parse a program image from `path`.
pub fn read_program(path: impl AsRef<Path>) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    text.parse().map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let err = read_program("/no/such/image.txt").unwrap_err();
        assert!(err.to_string().contains("/no/such/image.txt"));
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
