use std::path::Path;

use bytes::Bytes;
use tokio::fs;

use crate::domain::errors::DomainError;
use crate::domain::models::avatar::SelectedFile;

/// Read a local image into a [`SelectedFile`].
///
/// The MIME type is guessed from the file extension, the way a browser file
/// input reports it; unknown extensions yield `application/octet-stream`.
pub async fn read_selected_file(path: &Path) -> Result<SelectedFile, DomainError> {
    let metadata = fs::metadata(path).await.map_err(|error| match error.kind() {
        std::io::ErrorKind::NotFound => {
            DomainError::InternalError(format!("File not found: {}", path.display()))
        }
        _ => DomainError::InternalError(format!(
            "Failed to inspect '{}': {}",
            path.display(),
            error
        )),
    })?;

    if !metadata.is_file() {
        return Err(DomainError::InternalError(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }

    let bytes = fs::read(path).await.map_err(|error| {
        tracing::error!("Failed to read '{}': {}", path.display(), error);
        DomainError::InternalError(format!("Failed to read '{}': {}", path.display(), error))
    })?;

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "avatar".to_string());

    tracing::debug!(
        "Read {} ({}, {} bytes)",
        file_name,
        mime_type,
        bytes.len()
    );

    Ok(SelectedFile::new(file_name, mime_type, Bytes::from(bytes)))
}
