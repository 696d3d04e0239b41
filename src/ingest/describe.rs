use super::mime::kind_label;
use super::schema::UploadedFile;

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count with binary units and up to two decimals.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// One-line description of a selection, e.g. `brief.pdf (PDF document, 1.5 KB)`.
pub fn describe_file(file: &UploadedFile) -> String {
    format!(
        "{} ({}, {})",
        file.name,
        kind_label(&file.mime_type),
        format_size(file.size)
    )
}
