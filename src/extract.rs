/*!
 * Document text extraction.
 *
 * Converts downloaded disclosure documents into the ordered line sequence
 * the owner parser consumes. The registry serves PDF extracts, so the
 * default implementation is PDF-backed; a plain-text implementation exists
 * for tests and for feeding pre-extracted text straight into the parser.
 */

use crate::errors::ExtractError;

/// Turns raw document bytes into trimmed text lines in reading order
pub trait LineExtractor: Send + Sync {
    /// Extract lines from the document, page order preserved.
    ///
    /// # Arguments
    /// * `bytes` - Raw document content as downloaded
    ///
    /// # Returns
    /// * `Result<Vec<String>, ExtractError>` - One string per line, or an error
    ///   if the document cannot be opened or decoded
    fn extract_lines(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError>;
}

/// PDF-backed extractor for the registry's disclosure documents
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfLineExtractor;

impl LineExtractor for PdfLineExtractor {
    fn extract_lines(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        // pdf-extract walks pages in document order and joins their text
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Unreadable(e.to_string()))?;

        Ok(split_lines(&text))
    }
}

/// Extractor for documents that are already plain UTF-8 text
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl LineExtractor for PlainTextExtractor {
    fn extract_lines(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ExtractError::Unreadable(e.to_string()))?;

        Ok(split_lines(text))
    }
}

// Lines are trimmed here once; the parser compares against trimmed markers
fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim().to_string()).collect()
}
