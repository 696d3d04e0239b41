use std::path::Path;

use base64::Engine;
use tokio::fs;
use tracing::{debug, warn};

use super::mime::{guess_mime_type, is_supported};
use super::schema::UploadedFile;
use crate::error::IngestionError;

/// Encode raw bytes into an [`UploadedFile`].
///
/// `declared_type` may be empty; the selection then falls back to a generic
/// binary type. Empty content and content over `max_bytes` are rejected.
pub fn encode_bytes(
    name: &str,
    declared_type: &str,
    data: &[u8],
    max_bytes: u64,
) -> Result<UploadedFile, IngestionError> {
    if data.is_empty() {
        return Err(IngestionError::Empty { name: name.to_string() });
    }
    let size = data.len() as u64;
    if size > max_bytes {
        return Err(IngestionError::TooLarge {
            name: name.to_string(),
            size,
            limit: max_bytes,
        });
    }

    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    let file = UploadedFile::from_base64(name, declared_type, size, encoded);
    if !is_supported(&file.mime_type) {
        warn!(
            name = %file.name,
            mime = %file.mime_type,
            "File type may not be accepted by the model"
        );
    }
    Ok(file)
}

/// Read a file from disk, guessing its media type from the extension.
pub async fn load_file(path: &Path, max_bytes: u64) -> Result<UploadedFile, IngestionError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();

    let unreadable = |source: std::io::Error| IngestionError::Unreadable {
        path: path.display().to_string(),
        source,
    };

    // Refuse oversized files before pulling them into memory.
    let size = fs::metadata(path).await.map_err(unreadable)?.len();
    if size > max_bytes {
        return Err(IngestionError::TooLarge {
            name,
            size,
            limit: max_bytes,
        });
    }

    let data = fs::read(path).await.map_err(unreadable)?;

    let mime_type = guess_mime_type(&name);
    debug!(name = %name, bytes = data.len(), mime = %mime_type, "Loaded document");
    encode_bytes(&name, &mime_type, &data, max_bytes)
}
