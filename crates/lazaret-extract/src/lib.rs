//! Text extraction for scanned objects
//!
//! Turns raw object bytes into the text the classifier sees. The format is
//! chosen from the object key's suffix; unknown formats fall back to a plain
//! text decode. Extraction never fails outright: parser errors and empty
//! output both collapse to `None`, which downstream treats as an empty file.

mod docx;

use std::fmt;

/// Document format, selected from the object key.
///
/// The fallback variant decodes unknown formats as plain text so that files
/// without a recognized suffix still get scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
    FallbackPlainText,
}

impl DocumentKind {
    /// Pick the extraction format from the object key's suffix,
    /// case-insensitively.
    pub fn from_key(key: &str) -> Self {
        let key = key.to_lowercase();
        if key.ends_with(".txt") {
            DocumentKind::PlainText
        } else if key.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if key.ends_with(".docx") {
            DocumentKind::Docx
        } else {
            DocumentKind::FallbackPlainText
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::PlainText => "plain_text",
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::FallbackPlainText => "fallback_plain_text",
        }
    }

    /// Extract text from raw object bytes.
    ///
    /// Returns `None` when the parser fails or when it yields no text at
    /// all. Callers cannot distinguish the two cases; both mean there is
    /// nothing to scan. Whitespace-only output is still text and is
    /// returned as-is for classification.
    pub fn extract_text(&self, data: &[u8]) -> Option<String> {
        let text = match self {
            DocumentKind::PlainText | DocumentKind::FallbackPlainText => {
                // Invalid UTF-8 sequences are replaced rather than fatal.
                Some(String::from_utf8_lossy(data).into_owned())
            }
            DocumentKind::Pdf => match pdf_extract::extract_text_from_mem(data) {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!(error = %e, "PDF text extraction failed");
                    None
                }
            },
            DocumentKind::Docx => docx::extract_text(data),
        };

        let text = text.filter(|t| !t.is_empty());
        if let Some(ref t) = text {
            tracing::debug!(format = self.as_str(), chars = t.len(), "extracted text");
        }
        text
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_dispatches_on_suffix() {
        assert_eq!(DocumentKind::from_key("notes.txt"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_key("report.pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_key("minutes.docx"), DocumentKind::Docx);
        assert_eq!(
            DocumentKind::from_key("data.csv"),
            DocumentKind::FallbackPlainText
        );
        assert_eq!(
            DocumentKind::from_key("no-extension"),
            DocumentKind::FallbackPlainText
        );
    }

    #[test]
    fn test_from_key_is_case_insensitive() {
        assert_eq!(DocumentKind::from_key("REPORT.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_key("Notes.TXT"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_key("Minutes.DocX"), DocumentKind::Docx);
    }

    #[test]
    fn test_plain_text_extraction() {
        let text = DocumentKind::PlainText
            .extract_text(b"hello scanner")
            .expect("text");
        assert_eq!(text, "hello scanner");
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let text = DocumentKind::PlainText
            .extract_text(b"caf\xc3\xa9 \xff ok")
            .expect("text");
        assert!(text.starts_with("café"));
        assert!(text.contains('\u{FFFD}'));
        assert!(text.ends_with("ok"));
    }

    #[test]
    fn test_empty_input_is_none() {
        assert_eq!(DocumentKind::PlainText.extract_text(b""), None);
        assert_eq!(DocumentKind::FallbackPlainText.extract_text(b""), None);
    }

    #[test]
    fn test_whitespace_only_is_still_text() {
        let text = DocumentKind::PlainText
            .extract_text(b"  \n\t  ")
            .expect("text");
        assert_eq!(text, "  \n\t  ");
        assert_eq!(
            DocumentKind::FallbackPlainText.extract_text(b"\n\n"),
            Some("\n\n".to_string())
        );
    }

    #[test]
    fn test_fallback_decodes_unknown_format_as_text() {
        let text = DocumentKind::from_key("data.csv")
            .extract_text(b"a,b,c\n1,2,3")
            .expect("text");
        assert_eq!(text, "a,b,c\n1,2,3");
    }

    #[test]
    fn test_malformed_pdf_is_none() {
        assert_eq!(DocumentKind::Pdf.extract_text(b"not a pdf at all"), None);
    }

    #[test]
    fn test_malformed_docx_is_none() {
        assert_eq!(DocumentKind::Docx.extract_text(b"not a zip archive"), None);
    }
}
