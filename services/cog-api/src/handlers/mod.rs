//! HTTP request handlers.

pub mod artifacts;
pub mod health;
pub mod pages;
pub mod process;
pub mod status;

use std::path::Path;

use axum::{
    body::Body,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::error::ApiError;

/// Content type for an artifact, by extension.
pub(crate) fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// `Content-Disposition` value for a download, with the file name quoted.
pub(crate) fn attachment_disposition(download_name: &str) -> String {
    let mut quoted = String::with_capacity(download_name.len());
    for c in download_name.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    format!("attachment; filename=\"{quoted}\"")
}

/// Stream a file from disk as an attachment.
pub(crate) async fn file_attachment(
    path: &Path,
    download_name: &str,
    extra_headers: Vec<(&'static str, String)>,
) -> Result<Response, ApiError> {
    let file = tokio::fs::File::open(path).await?;
    let length = file.metadata().await?.len();
    let body = Body::from_stream(ReaderStream::new(file));

    let mut response = (
        [
            (header::CONTENT_TYPE, content_type_for(path).to_string()),
            (header::CONTENT_LENGTH, length.to_string()),
            (
                header::CONTENT_DISPOSITION,
                attachment_disposition(download_name),
            ),
        ],
        body,
    )
        .into_response();

    for (name, value) in extra_headers {
        let value = HeaderValue::from_str(&value)
            .map_err(|_| ApiError::Internal(format!("invalid header value for {name}")))?;
        response.headers_mut().insert(name, value);
    }

    Ok(response)
}
