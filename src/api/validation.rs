use axum::http::HeaderMap;

use super::ApiError;
use crate::constants::cabinet::{DEFAULT_OWNER, MAX_OWNER_LEN, OWNER_HEADER};

pub fn validate_search_query(query: Option<&str>) -> Result<&str, ApiError> {
    let trimmed = query.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search term required"));
    }
    Ok(trimmed)
}

/// Catalog filter letter, upper-cased. Must be a single alphabetic character.
pub fn validate_letter(letter: &str) -> Result<char, ApiError> {
    let mut chars = letter.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(ApiError::validation(format!(
            "Invalid letter: '{}'. Expected a single letter",
            letter
        ))),
    }
}

pub fn validate_entry_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid medicine ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

/// Cabinet owner from the owner header; absent or blank means the default owner.
pub fn cabinet_owner(headers: &HeaderMap) -> Result<String, ApiError> {
    let Some(value) = headers.get(OWNER_HEADER) else {
        return Ok(DEFAULT_OWNER.to_string());
    };

    let owner = value
        .to_str()
        .map_err(|_| ApiError::validation("Cabinet owner must be visible ASCII"))?
        .trim();

    if owner.is_empty() {
        return Ok(DEFAULT_OWNER.to_string());
    }

    if owner.len() > MAX_OWNER_LEN {
        return Err(ApiError::validation(format!(
            "Cabinet owner must be {} characters or less",
            MAX_OWNER_LEN
        )));
    }

    if !owner
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '@')
    {
        return Err(ApiError::validation(
            "Cabinet owner can only contain letters, numbers, '-', '_', '.', and '@'",
        ));
    }

    Ok(owner.to_string())
}
