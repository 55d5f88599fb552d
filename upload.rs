//! Upload handling: validate, extract, analyze, answer with JSON.

use log::{error, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::extract_text;
use crate::upload_types::{UploadRequest, UploadResponse, WordsResponse};
use crate::wc::analyze_with;

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const PROCESSING_FAILED: &str = "Failed to process file";
pub const FILE_TOO_LARGE: &str = "File too large";

/// Stateless apart from its config; share freely across requests.
#[derive(Debug, Clone, Default)]
pub struct UploadHandler {
    config: Config,
}

impl UploadHandler {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Maps every failure to a coarse status; details go to the log only.
    pub fn handle(&self, request: &UploadRequest) -> UploadResponse {
        match self.process(request) {
            Ok(words) => UploadResponse::ok(words),
            Err(e) => {
                let message = match &e {
                    Error::MethodNotAllowed(_) => METHOD_NOT_ALLOWED,
                    Error::TooLarge { .. } => FILE_TOO_LARGE,
                    _ => PROCESSING_FAILED,
                };
                error!("File processing error: {}", e);
                UploadResponse::error(e.status(), message)
            }
        }
    }

    pub fn process(&self, request: &UploadRequest) -> Result<WordsResponse> {
        if request.method != "POST" {
            return Err(Error::MethodNotAllowed(request.method.clone()));
        }
        let file = request.file.as_ref().ok_or(Error::MissingFile)?;
        if file.bytes.len() > self.config.max_upload_bytes {
            return Err(Error::TooLarge {
                size: file.bytes.len(),
                limit: self.config.max_upload_bytes,
            });
        }
        let kind = file.kind().ok_or_else(|| {
            Error::UnsupportedType(
                file.content_type
                    .clone()
                    .or_else(|| file.file_name.clone())
                    .unwrap_or_else(|| "<unknown>".to_string()),
            )
        })?;

        let text = extract_text(kind, &file.bytes)?;
        let report = analyze_with(&text, self.config.tie_order);
        info!(
            "{}: {} tokens, {} distinct words",
            file.file_name.as_deref().unwrap_or("<upload>"),
            report.token_count(),
            report.len()
        );

        Ok(WordsResponse {
            words: report.into_entries(),
            char_count: text.encode_utf16().count(),
        })
    }
}
