//! Credential validation, run once per required key at chain construction.

use crate::error::ChainError;

/// Validate an environment-sourced credential value.
///
/// Fails when the value is missing, empty, whitespace-only, or equal to the
/// well-known `your_<name>_here` placeholder (case-insensitive) that ships in
/// `.env` templates. On success the value is returned unchanged. The error
/// carries `name` so callers can report exactly which key is misconfigured.
pub fn validate(name: &'static str, raw: Option<&str>) -> Result<String, ChainError> {
    let value = raw.unwrap_or_default();
    let trimmed = value.trim();
    let placeholder = format!("your_{}_here", name.to_lowercase());

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(&placeholder) {
        return Err(ChainError::credential(name));
    }

    Ok(value.to_string())
}
