//! Uploaded resume file → plain text.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Content type wins; the file extension is the fallback.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let content_type = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase());
        match content_type.as_deref() {
            Some("application/pdf") => return Some(DocumentKind::Pdf),
            Some("text/plain") => return Some(DocumentKind::PlainText),
            _ => {}
        }

        let extension = file_name?.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

/// Extracts and cleans the text of an uploaded resume.
pub async fn extract_text(
    data: Bytes,
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<String, AppError> {
    let kind = DocumentKind::detect(content_type, file_name).ok_or_else(|| {
        warn!("Rejected upload {file_name:?} with content type {content_type:?}");
        AppError::Validation("unsupported file type".to_string())
    })?;

    let raw = match kind {
        DocumentKind::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&data)
        })
        .await
        .map_err(|e| {
            // pdf-extract panics on some malformed documents
            warn!("PDF extraction task failed: {e}");
            AppError::Validation("Could not read PDF".to_string())
        })?
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?,
        DocumentKind::PlainText => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Validation("Text file is not valid UTF-8".to_string()))?,
    };

    let text = clean_text(&raw);
    if text.is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the uploaded file".to_string(),
        ));
    }

    debug!("Extracted {} chars from {kind:?} upload", text.len());
    Ok(text)
}

/// Normalizes line endings, drops blank-line runs and trims.
pub fn clean_text(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
