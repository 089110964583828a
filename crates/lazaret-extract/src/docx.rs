//! DOCX text extraction
//!
//! A DOCX file is a ZIP archive whose main part is `word/document.xml`. Text
//! lives in `<w:t>` runs grouped into `<w:p>` paragraphs; everything else is
//! formatting markup. The scrape below collects run text and joins paragraphs
//! with newlines, which matches how word processors render the body.

use std::io::{Cursor, Read};

use anyhow::Context;

/// Extract paragraph text from DOCX bytes. Any ZIP or XML failure is logged
/// and collapses to `None`.
pub(crate) fn extract_text(data: &[u8]) -> Option<String> {
    match read_document_xml(data) {
        Ok(xml) => Some(scrape_paragraph_text(&xml)),
        Err(e) => {
            tracing::warn!(error = %e, "DOCX text extraction failed");
            None
        }
    }
}

fn read_document_xml(data: &[u8]) -> anyhow::Result<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(data)).context("not a valid ZIP archive")?;
    let mut part = archive
        .by_name("word/document.xml")
        .context("word/document.xml missing from archive")?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .context("word/document.xml is not valid UTF-8")?;
    Ok(xml)
}

/// Collect the character data of `<w:t>` runs; each closed `<w:p>` ends a
/// paragraph.
fn scrape_paragraph_text(xml: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;
    let mut cursor = xml;

    while let Some(open) = cursor.find('<') {
        if in_text_run {
            current.push_str(&unescape_xml(&cursor[..open]));
        }
        let Some(close_offset) = cursor[open..].find('>') else {
            break;
        };
        let tag = &cursor[open + 1..open + close_offset];
        if tag == "w:t" || tag.starts_with("w:t ") {
            in_text_run = true;
        } else if tag == "/w:t" {
            in_text_run = false;
        } else if tag == "/w:p" {
            paragraphs.push(std::mem::take(&mut current));
        }
        cursor = &cursor[open + close_offset + 1..];
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs.join("\n")
}

// The five predefined XML entities. `&amp;` must be replaced last so that
// escaped entity names like `&amp;lt;` do not double-decode.
fn unescape_xml(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
