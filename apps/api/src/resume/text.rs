//! Raw text extraction from uploaded resume documents.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No text content found")]
    NoContent,

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),
}

/// Pulls trimmed text out of a document. PDFs go through `pdf-extract`;
/// `.txt`, `.md` and extension-less files are read as UTF-8 (lossy).
pub fn extract_document_text(file_name: &str, data: &[u8]) -> Result<String, ExtractionError> {
    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    let text = match extension.as_deref() {
        Some("pdf") => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?,
        Some("txt") | Some("md") | None => String::from_utf8_lossy(data).into_owned(),
        Some(other) => return Err(ExtractionError::UnsupportedFormat(other.to_string())),
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractionError::NoContent);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_trimmed() {
        let text = extract_document_text("resume.txt", b"  Jane Doe\njane@example.com \n").unwrap();
        assert_eq!(text, "Jane Doe\njane@example.com");
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(extract_document_text("RESUME.MD", b"# Jane").is_ok());
    }

    #[test]
    fn test_no_extension_reads_as_text() {
        assert_eq!(extract_document_text("resume", b"hello").unwrap(), "hello");
    }

    #[test]
    fn test_unsupported_format() {
        let err = extract_document_text("resume.docx", b"PK..").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ext) if ext == "docx"));
    }

    #[test]
    fn test_whitespace_only_is_no_content() {
        let err = extract_document_text("resume.txt", b" \n\t ").unwrap_err();
        assert!(matches!(err, ExtractionError::NoContent));
    }
}
