//! Error types for upload processing.
//!
//! The analyzer itself is total; everything here comes from the boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Request used something other than POST.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// No `file` field in the upload.
    #[error("No file in upload")]
    MissingFile,

    /// Declared content type or extension is not a supported document.
    #[error("Unsupported document type: {0}")]
    UnsupportedType(String),

    #[error("Upload too large: {size} bytes > {limit} bytes")]
    TooLarge {
        /// Size of the uploaded body.
        size: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// PDF text extraction failed.
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status the upload boundary answers with.
    pub fn status(&self) -> u16 {
        match self {
            Error::MethodNotAllowed(_) => 405,
            Error::TooLarge { .. } => 413,
            _ => 500,
        }
    }
}

/// Result type alias for upload operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(Error::MethodNotAllowed("GET".into()).status(), 405);
        assert_eq!(Error::TooLarge { size: 2, limit: 1 }.status(), 413);
        assert_eq!(Error::MissingFile.status(), 500);
        assert_eq!(Error::Pdf("bad xref".into()).status(), 500);
    }

    #[test]
    fn messages_carry_detail() {
        let err = Error::TooLarge { size: 20, limit: 10 };
        assert_eq!(err.to_string(), "Upload too large: 20 bytes > 10 bytes");
    }
}
