//! Asset key generation.

use uuid::Uuid;

/// Build a fresh, time-sortable key for an uploaded file:
/// `{prefix}/{uuid-v7}-{sanitized-name}`.
pub fn asset_key(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let name = sanitize_file_name(file_name);
    if prefix.is_empty() {
        format!("{}-{name}", Uuid::now_v7())
    } else {
        format!("{prefix}/{}-{name}", Uuid::now_v7())
    }
}

/// Lowercase the final path segment of `file_name`, keep `[a-z0-9._-]`
/// and collapse every other run of characters into a single `-`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .to_lowercase();

    let mut out = String::with_capacity(base.len());
    let mut pending_dash = false;
    for c in base.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '-');
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        "asset".to_string()
    } else {
        trimmed.to_string()
    }
}
