use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::wc::WordCount;

/// Multipart field the upload is expected under.
pub const FILE_FIELD: &str = "file";

/// An incoming upload, already split out of the multipart body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    pub method: String,
    pub file: Option<UploadedFile>,
}

impl UploadRequest {
    /// POST carrying a single file.
    pub fn post(file: UploadedFile) -> Self {
        Self {
            method: "POST".to_string(),
            file: Some(file),
        }
    }
}

/// The `file` part of the upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub field_name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            field_name: FILE_FIELD.to_string(),
            file_name,
            content_type,
            bytes,
        }
    }

    /// Content type wins; the file extension is only a fallback.
    pub fn kind(&self) -> Option<DocumentKind> {
        match &self.content_type {
            Some(ct) => DocumentKind::from_mime(ct),
            None => self
                .file_name
                .as_deref()
                .and_then(|name| DocumentKind::from_path(Path::new(name))),
        }
    }
}

/// Document formats text can be extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Html,
}

impl DocumentKind {
    /// `text/plain; charset=utf-8` and friends; parameters are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("text/plain") {
            Some(DocumentKind::PlainText)
        } else if essence.eq_ignore_ascii_case("application/pdf") {
            Some(DocumentKind::Pdf)
        } else if essence.eq_ignore_ascii_case("text/html") {
            Some(DocumentKind::Html)
        } else {
            None
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|s| s.to_str())?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(DocumentKind::PlainText),
            "pdf" => Some(DocumentKind::Pdf),
            "htm" | "html" => Some(DocumentKind::Html),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            DocumentKind::PlainText => "text/plain",
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Html => "text/html",
        }
    }
}

/// 200 body: `{"words": [...], "charCount": N}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordsResponse {
    pub words: Vec<WordCount>,
    /// Length of the extracted text in UTF-16 code units.
    pub char_count: usize,
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Words(WordsResponse),
    Error(ErrorResponse),
}

/// Status code plus JSON body, ready for the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl UploadResponse {
    pub fn ok(words: WordsResponse) -> Self {
        Self {
            status: 200,
            body: ResponseBody::Words(words),
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Error(ErrorResponse {
                error: message.into(),
            }),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_resolution_ignores_parameters() {
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8"),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(DocumentKind::from_mime("Application/PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_mime("image/png"), None);
    }

    #[test]
    fn extension_fallback() {
        let file = UploadedFile::new(Some("Report.PDF".into()), None, Vec::new());
        assert_eq!(file.kind(), Some(DocumentKind::Pdf));
        let file = UploadedFile::new(Some("notes".into()), None, Vec::new());
        assert_eq!(file.kind(), None);
    }

    #[test]
    fn declared_type_wins_over_extension() {
        let file = UploadedFile::new(Some("a.txt".into()), Some("image/png".into()), Vec::new());
        assert_eq!(file.kind(), None);
    }

    #[test]
    fn response_shapes() {
        let ok = UploadResponse::ok(WordsResponse {
            words: vec![WordCount {
                word: "the".into(),
                count: 42,
            }],
            char_count: 7,
        });
        assert_eq!(
            ok.to_json().unwrap(),
            r#"{"words":[{"word":"the","count":42}],"charCount":7}"#
        );
        let err = UploadResponse::error(500, "Failed to process file");
        assert_eq!(err.to_json().unwrap(), r#"{"error":"Failed to process file"}"#);
    }
}
