/// Guess MIME type from filename extension.
pub fn guess_mime_type(filename: &str) -> String {
    let ext = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    };
    match ext.as_str() {
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Whether the model is expected to accept this type as inline document data.
///
/// Advisory only. Unsupported types are still sent; the service decides.
pub fn is_supported(mime_type: &str) -> bool {
    match mime_type {
        "application/pdf" => true,
        t if t.starts_with("text/") => true,
        t if t.starts_with("image/") => true,
        _ => false,
    }
}

/// Human label for a mime type, used when describing the selection.
pub fn kind_label(mime_type: &str) -> &'static str {
    match mime_type {
        "application/pdf" => "PDF document",
        "text/markdown" => "Markdown document",
        t if t.starts_with("text/") => "text document",
        t if t.starts_with("image/") => "image",
        _ => "file",
    }
}
