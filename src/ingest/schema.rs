use serde::{Deserialize, Serialize};

/// Mime type used when the selection carries no declared type.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// A document selected by the user, held in memory as a base64 payload.
///
/// Created once per selection and never mutated. Replacing or clearing the
/// selection drops it together with any analysis derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    /// Media type as declared by the source; may be empty.
    pub media_type: String,
    pub size: u64,
    /// Base64 (standard alphabet) document bytes.
    pub data: String,
    /// Type sent to the model: `media_type`, or the fallback when empty.
    pub mime_type: String,
}

impl UploadedFile {
    /// Build from an already-encoded selection event.
    pub fn from_base64(name: &str, media_type: &str, size: u64, data: String) -> Self {
        let mime_type = if media_type.trim().is_empty() {
            FALLBACK_MIME_TYPE.to_string()
        } else {
            media_type.to_string()
        };
        Self {
            name: name.to_string(),
            media_type: media_type.to_string(),
            size,
            data,
            mime_type,
        }
    }
}
