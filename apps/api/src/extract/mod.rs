//! Resume text extraction — converts an uploaded PDF or DOCX into plain text.
//!
//! Extraction failure is fatal for the submit request (unlike AI analysis,
//! which is best-effort); callers surface the error as-is.

use std::io::Read;

use crate::errors::AppError;

/// The two supported resume upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

const PDF_MAGIC: &[u8] = b"%PDF";
// DOCX is an OOXML zip container.
const ZIP_MAGIC: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

/// Determines the upload format from magic bytes, falling back to the
/// filename extension for empty or truncated uploads.
pub fn detect_format(bytes: &[u8], filename: &str) -> Result<ResumeFormat, AppError> {
    if bytes.starts_with(PDF_MAGIC) {
        return Ok(ResumeFormat::Pdf);
    }
    if bytes.starts_with(ZIP_MAGIC) {
        return Ok(ResumeFormat::Docx);
    }
    let lower = filename.to_lowercase();
    if lower.ends_with(".pdf") {
        return Ok(ResumeFormat::Pdf);
    }
    if lower.ends_with(".docx") {
        return Ok(ResumeFormat::Docx);
    }
    Err(AppError::UnsupportedFormat(format!(
        "'{filename}' is not a PDF or DOCX file"
    )))
}

/// Extracts plain text from a resume blob in either supported format.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, AppError> {
    let text = match detect_format(bytes, filename)? {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Validation(format!("Failed to parse PDF: {e}")))?,
        ResumeFormat::Docx => extract_docx_text(bytes)?,
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Validation(
            "Resume contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

/// Pulls `word/document.xml` out of the DOCX zip container and flattens the
/// WordprocessingML markup to plain text.
fn extract_docx_text(bytes: &[u8]) -> Result<String, AppError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| AppError::Validation(format!("Failed to open DOCX container: {e}")))?;

    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|_| AppError::Validation("DOCX is missing word/document.xml".to_string()))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Validation(format!("Failed to read DOCX body: {e}")))?;

    Ok(flatten_docx_xml(&xml))
}

/// Strips WordprocessingML tags, turning paragraph/break/tab elements into
/// their whitespace equivalents and decoding the XML entities that survive.
fn flatten_docx_xml(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len() / 4);
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        let tag = rest[open + 1..open + close].trim_end_matches('/');
        let name = tag.split_whitespace().next().unwrap_or(tag);
        if name == "/w:p" || name == "w:br" {
            out.push('\n');
        } else if name == "w:tab" {
            out.push('\t');
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);

    decode_xml_entities(&out)
}

fn decode_xml_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf_by_magic_bytes() {
        let format = detect_format(b"%PDF-1.7 rest", "upload.bin").unwrap();
        assert_eq!(format, ResumeFormat::Pdf);
    }

    #[test]
    fn test_detect_docx_by_zip_magic() {
        let bytes = [0x50, 0x4B, 0x03, 0x04, 0x00];
        let format = detect_format(&bytes, "upload.bin").unwrap();
        assert_eq!(format, ResumeFormat::Docx);
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(detect_format(b"", "resume.PDF").unwrap(), ResumeFormat::Pdf);
        assert_eq!(detect_format(b"", "resume.docx").unwrap(), ResumeFormat::Docx);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = detect_format(b"plain text body", "resume.txt");
        assert!(matches!(result, Err(AppError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_flatten_docx_paragraphs_become_newlines() {
        let xml = "<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p><w:p><w:r><w:t>Engineer</w:t></w:r></w:p>";
        assert_eq!(flatten_docx_xml(xml), "Jane Doe\nEngineer\n");
    }

    #[test]
    fn test_flatten_docx_tabs_and_breaks() {
        let xml = "<w:t>Rust</w:t><w:tab/><w:t>5 years</w:t><w:br/><w:t>Go</w:t>";
        assert_eq!(flatten_docx_xml(xml), "Rust\t5 years\nGo");
    }

    #[test]
    fn test_flatten_docx_decodes_entities() {
        let xml = "<w:t>C&amp;O Engineering &lt;Platform&gt;</w:t>";
        assert_eq!(flatten_docx_xml(xml), "C&O Engineering <Platform>");
    }

    #[test]
    fn test_extract_rejects_garbage_pdf() {
        // Magic bytes say PDF but the body is not parseable.
        let result = extract_text(b"%PDF-1.7 not really a pdf", "resume.pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_rejects_empty_docx_container() {
        // Zip magic but no valid archive behind it.
        let bytes = [0x50, 0x4B, 0x03, 0x04];
        let result = extract_text(&bytes, "resume.docx");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
