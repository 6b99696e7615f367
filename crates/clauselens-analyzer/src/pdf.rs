//! PDF text extraction

use crate::error::ExtractError;
use lopdf::Document;
use tracing::debug;

/// Extract the text of every page, concatenated in page order
///
/// No separator is inserted between pages beyond whatever the page text
/// itself ends with. A document with no extractable text yields an empty
/// string.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractError::Load(e.to_string()))?;
    let pages = doc.get_pages();

    debug!("PDF has {} pages", pages.len());

    let mut text = String::new();
    for &page in pages.keys() {
        let page_text = doc
            .extract_text(&[page])
            .map_err(|e| ExtractError::Page {
                page,
                message: e.to_string(),
            })?;
        text.push_str(&page_text);
    }

    Ok(text)
}
