//! Word-frequency reports for uploaded text, PDF and HTML documents.

pub mod config;
pub mod error;
pub mod extract;
pub mod upload;
pub mod upload_types;
pub mod wc;

pub use config::Config;
pub use error::{Error, Result};
pub use extract::extract_text;
pub use upload::UploadHandler;
pub use upload_types::{
    DocumentKind, ErrorResponse, ResponseBody, UploadRequest, UploadResponse, UploadedFile,
    WordsResponse,
};
pub use wc::{analyze, analyze_with, FrequencyReport, TieOrder, WordCount};
