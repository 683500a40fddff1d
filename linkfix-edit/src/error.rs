//! Error types for linkfix-edit.
//!
//! Every failure here is an I/O failure tied to a path. There is no local
//! recovery: callers abort the run on the first error.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// The directory to scan could not be listed.
    #[error("list directory {dir}")]
    ListDir {
        dir: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A candidate file name is not valid UTF-8, so it cannot be processed or reported.
    #[error("candidate file in {dir} has a non UTF-8 name: {name}")]
    NonUtf8Name { dir: Utf8PathBuf, name: String },

    /// A candidate file could not be opened or was not valid UTF-8.
    #[error("read {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A modified file could not be written back.
    #[error("write {path}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EditError {
    /// Path of the file or directory the failed operation touched.
    pub fn path(&self) -> &Utf8Path {
        match self {
            EditError::ListDir { dir, .. } | EditError::NonUtf8Name { dir, .. } => dir,
            EditError::Read { path, .. } | EditError::Write { path, .. } => path,
        }
    }
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::EditError;
    use camino::{Utf8Path, Utf8PathBuf};
    use std::error::Error as _;
    use std::io;

    #[test]
    fn read_error_names_path_and_keeps_source() {
        let err = EditError::Read {
            path: Utf8PathBuf::from("about.html"),
            source: io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        };
        assert_eq!(err.to_string(), "read about.html");
        assert_eq!(err.path().as_str(), "about.html");
        let source = err.source().expect("source");
        assert!(source.to_string().contains("UTF-8"));
    }

    #[test]
    fn write_error_display() {
        let err = EditError::Write {
            path: Utf8PathBuf::from("index.html"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("write"));
        assert!(err.to_string().contains("index.html"));
    }

    #[test]
    fn non_utf8_name_points_at_directory() {
        let err = EditError::NonUtf8Name {
            dir: Utf8PathBuf::from("site"),
            name: "caf\u{fffd}.html".to_string(),
        };
        assert_eq!(err.path().as_str(), "site");
        assert!(err.to_string().contains("caf\u{fffd}.html"));
        assert!(err.source().is_none());
    }
}
