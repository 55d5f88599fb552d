//! Raw text extraction from uploaded documents.

use encoding_rs::UTF_8;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use log::{debug, warn};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::{Error, Result};
use crate::upload_types::DocumentKind;

/// Full text content of one document.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String> {
    let text = match kind {
        DocumentKind::PlainText => decode_text(bytes),
        DocumentKind::Pdf => extract_pdf(bytes)?,
        DocumentKind::Html => strip_tags(&decode_text(bytes)),
    };
    debug!("extracted {} bytes of {:?} text", text.len(), kind);
    Ok(text)
}

/// UTF-8 unless a BOM says otherwise. Malformed sequences become U+FFFD.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, encoding, had_errors) = UTF_8.decode(bytes);
    if had_errors {
        warn!("malformed {} input replaced with U+FFFD", encoding.name());
    }
    text.into_owned()
}

// pdf-extract panics on some malformed inputs instead of returning Err
fn extract_pdf(bytes: &[u8]) -> Result<String> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(result) => result.map_err(|e| Error::Pdf(e.to_string())),
        Err(_) => Err(Error::Pdf("extractor panicked".to_string())),
    }
}

const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

// Elements whose edges separate words; inline markup does not.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "head", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody",
    "td", "tfoot", "th", "thead", "title", "tr", "ul",
];

/// Visible text of an HTML document, skipping script/style content
fn strip_tags(input: &str) -> String {
    let dom: RcDom = parse_document(RcDom::default(), Default::default()).one(input);
    fn recurse(handle: &Handle, out: &mut String) {
        let block = match &handle.data {
            NodeData::Element { name, .. } => {
                let tag = name.local.as_ref();
                if SKIPPED_TAGS.iter().any(|skip| tag.eq_ignore_ascii_case(skip)) {
                    return;
                }
                BLOCK_TAGS.iter().any(|b| tag.eq_ignore_ascii_case(b))
            }
            NodeData::Text { contents } => {
                out.push_str(&contents.borrow());
                false
            }
            _ => false,
        };
        if block {
            out.push(' ');
        }
        for child in handle.children.borrow().iter() {
            recurse(child, out);
        }
        if block {
            out.push(' ');
        }
    }
    let mut text = String::new();
    recurse(&dom.document, &mut text);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_decoded_as_utf8() {
        let text = extract_text(DocumentKind::PlainText, "naïve words".as_bytes()).unwrap();
        assert_eq!(text, "naïve words");
    }

    #[test]
    fn utf8_bom_is_dropped() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFhello"), "hello");
    }

    #[test]
    fn utf16_bom_switches_encoding() {
        let bytes = [0xFF, 0xFE, b'h', 0, b'i', 0];
        assert_eq!(decode_text(&bytes), "hi");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(decode_text(b"ok \xFF ok"), "ok \u{FFFD} ok");
    }

    #[test]
    fn html_text_skips_scripts() {
        let html = "<html><head><style>p { color: red }</style></head>\
                    <body><p>hello</p><p>world</p><script>var x = 1;</script></body></html>";
        let text = extract_text(DocumentKind::Html, html.as_bytes()).unwrap();
        let words: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(words, vec!["hello", "world"]);
    }

    #[test]
    fn inline_markup_does_not_split_words() {
        let html = "<p>un<em>believ</em>able <b>bold</b>ly</p><ul><li>one</li><li>two</li></ul>";
        let text = extract_text(DocumentKind::Html, html.as_bytes()).unwrap();
        let words: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(words, vec!["unbelievable", "boldly", "one", "two"]);
    }

    #[test]
    fn garbage_pdf_is_an_error() {
        let err = extract_text(DocumentKind::Pdf, b"not a pdf").unwrap_err();
        assert!(matches!(err, Error::Pdf(_)));
    }
}
