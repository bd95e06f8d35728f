//! Error types for Astrolabe operations.
//!
//! [`AstrolabeError`] is the error returned by the public API. Document loading
//! failures are kept in their own [`LoadError`] type so callers can tell a
//! missing document from a malformed one.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{export, layout::LayoutError, scene::SceneError};

/// The main error type for Astrolabe operations.
#[derive(Debug, Error)]
pub enum AstrolabeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// The model is valid but has nothing drawable, e.g. no root.
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<export::Error> for AstrolabeError {
    fn from(error: export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

/// Line and column of a parse failure, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Failure to turn a stored document into a model.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing exists at the given path.
    #[error("document not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The document exists but is not valid JSON for its schema, or it
    /// violates a structural rule such as unique ids.
    #[error("malformed document {}: {message}", path.display())]
    Malformed {
        path: PathBuf,
        message: String,
        location: Option<Location>,
        /// Full document text, kept for diagnostics.
        src: String,
    },

    /// The document could not be read for another reason.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    /// Returns the path of the document that failed to load.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path } | Self::Malformed { path, .. } | Self::Read { path, .. } => {
                path
            }
        }
    }

    /// Short name of the failure kind, used in one-line diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not found",
            Self::Malformed { .. } => "malformed",
            Self::Read { .. } => "unreadable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display_names_path() {
        let err = LoadError::NotFound {
            path: PathBuf::from("dfa.json"),
        };
        assert_eq!(err.to_string(), "document not found: dfa.json");
        assert_eq!(err.kind(), "not found");
    }

    #[test]
    fn test_malformed_error_display() {
        let err = LoadError::Malformed {
            path: PathBuf::from("syntax_tree.json"),
            message: "duplicate node id 3".to_string(),
            location: None,
            src: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "malformed document syntax_tree.json: duplicate node id 3"
        );
        assert_eq!(err.path(), &PathBuf::from("syntax_tree.json"));
    }

    #[test]
    fn test_load_error_converts_transparently() {
        let err: AstrolabeError = LoadError::NotFound {
            path: PathBuf::from("x.json"),
        }
        .into();
        assert_eq!(err.to_string(), "document not found: x.json");
    }
}
