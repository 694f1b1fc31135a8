//! Errors raised while loading an IMF package.

use std::path::PathBuf;

use imfdiff_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImfError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("expected a {expected} document, found <{found}>")]
    UnexpectedDocument {
        expected: &'static str,
        found: String,
    },

    #[error("missing <{element}> in {context}")]
    MissingElement {
        element: &'static str,
        context: String,
    },

    #[error("invalid <{element}> value '{value}': {reason}")]
    InvalidValue {
        element: String,
        value: String,
        reason: String,
    },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("no composition playlist found in {}", .0.display())]
    NoCompositionPlaylist(PathBuf),

    #[error("{}: {source}", path.display())]
    InDocument {
        path: PathBuf,
        #[source]
        source: Box<ImfError>,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ImfError {
    /// Attach the document path to an error raised while reading it.
    pub(crate) fn in_document(self, path: impl Into<PathBuf>) -> Self {
        Self::InDocument {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for IMF loading.
pub type Result<T> = std::result::Result<T, ImfError>;
