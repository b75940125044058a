// ABOUTME: Multipart form parsing for image uploads with a hard body size ceiling
// ABOUTME: Extracts the uploaded file and requested icon size from the /generate form

use crate::constants::form;
use multipart::server::Multipart;
use std::io::{Cursor, Read};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub size: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Expected a multipart/form-data body")]
    NotMultipart,

    #[error("Malformed multipart body: {0}")]
    Malformed(String),

    #[error("Upload exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Extract the multipart boundary from a `Content-Type` header value.
pub fn boundary(content_type: &str) -> Result<String, UploadError> {
    let mime: mime::Mime = content_type
        .parse()
        .map_err(|_| UploadError::NotMultipart)?;

    if mime.type_() != mime::MULTIPART || mime.subtype() != mime::FORM_DATA {
        return Err(UploadError::NotMultipart);
    }

    mime.get_param(mime::BOUNDARY)
        .map(|b| b.as_str().to_string())
        .filter(|b| !b.is_empty())
        .ok_or_else(|| UploadError::Malformed("missing boundary".to_string()))
}

/// Read at most `limit` bytes of body.
pub fn read_body<R: Read>(body: R, limit: usize) -> Result<Vec<u8>, UploadError> {
    let mut buffer = Vec::new();
    body.take(limit as u64 + 1)
        .read_to_end(&mut buffer)
        .map_err(|e| UploadError::Malformed(e.to_string()))?;

    if buffer.len() > limit {
        return Err(UploadError::TooLarge { limit });
    }
    Ok(buffer)
}

/// Parse the upload form. Unknown fields are ignored; the first file wins.
pub fn parse_form<R: Read>(
    content_type: Option<&str>,
    body: R,
    limit: usize,
) -> Result<UploadForm, UploadError> {
    let boundary = boundary(content_type.ok_or(UploadError::NotMultipart)?)?;
    let body = read_body(body, limit)?;

    let mut multipart = Multipart::with_body(Cursor::new(body), boundary);
    let mut upload = UploadForm::default();

    while let Some(mut field) = multipart
        .read_entry()
        .map_err(|e| UploadError::Malformed(e.to_string()))?
    {
        match &*field.headers.name {
            form::FILE_FIELD if upload.file.is_none() => {
                let mut bytes = Vec::new();
                field
                    .data
                    .read_to_end(&mut bytes)
                    .map_err(|e| UploadError::Malformed(e.to_string()))?;
                upload.file = Some(UploadedFile {
                    filename: field.headers.filename.clone().unwrap_or_default(),
                    bytes,
                });
            }
            form::SIZE_FIELD => {
                let mut value = String::new();
                field
                    .data
                    .read_to_string(&mut value)
                    .map_err(|e| UploadError::Malformed(e.to_string()))?;
                upload.size = Some(value);
            }
            other => log::debug!("Ignoring form field '{}'", other),
        }
    }

    Ok(upload)
}
