//! Shared path generation for storage backends.
//!
//! Path format: `documents/{owner-slug}/{unix-millis}_{filename}`.

use chrono::{DateTime, Utc};

/// Generate the storage path for a document owned by `owner`.
///
/// The owner email is reduced to a lowercase slug and the filename is stripped of
/// path separators and other unsafe characters, so the result never escapes the
/// `documents/` prefix.
pub fn generate_document_path(owner: &str, filename: &str, at: DateTime<Utc>) -> String {
    format!(
        "documents/{}/{}_{}",
        slugify(owner),
        at.timestamp_millis(),
        sanitize_filename(filename)
    )
}

fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "unknown".to_string()
    } else {
        slug.to_string()
    }
}

fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let mut cleaned = String::with_capacity(base.len());
    for c in base.chars() {
        let c = if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            c
        } else {
            '_'
        };
        // A run of dots collapses to one so the key never contains `..`
        if c == '.' && cleaned.ends_with('.') {
            continue;
        }
        cleaned.push(c);
    }
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}
