//! Document loading utilities
//!
//! `DocumentLoader` reads source text from a file or a string and scans it. The CLI and the
//! integration tests go through it so that file handling lives in one place.
//!
//! # Example
//!
//! ```rust,ignore
//! use brigates_scanner::DocumentLoader;
//!
//! let spans = DocumentLoader::from_path("rtl/counter.v")?.scan();
//! ```

use crate::scanner::scan;
use crate::span::SemanticSpan;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Error that can occur when loading documents
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    /// Load from a file path. The file must be UTF-8; a leading byte order mark is dropped.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let mut source = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if source.starts_with(BYTE_ORDER_MARK) {
            source.drain(..BYTE_ORDER_MARK.len_utf8());
        }
        tracing::debug!(path = %path.display(), bytes = source.len(), "document loaded");
        Ok(DocumentLoader { source })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn scan(&self) -> Vec<SemanticSpan> {
        scan(&self.source)
    }
}
