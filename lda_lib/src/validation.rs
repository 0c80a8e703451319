//! Validation of user-supplied names, pagination and raw filters before they reach the API.

use std::time::Duration;

use crate::error::LdaError;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_FILTER_KEY_LENGTH: usize = 64;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, LdaError> {
    if input.len() > max_len {
        return Err(LdaError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(LdaError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a client or lobbyist name: enforce length, strip control chars, trim.
pub fn validate_name(input: &str) -> Result<String, LdaError> {
    sanitize_text(input, MAX_NAME_LENGTH)
}

/// Validate a page number: must be >= 1.
pub fn validate_page(page: i64) -> Result<i64, LdaError> {
    if page < 1 {
        return Err(LdaError::InvalidInput("page must be >= 1".to_string()));
    }
    Ok(page)
}

/// Validate page size: must be between 1 and [`MAX_PAGE_SIZE`].
pub fn validate_page_size(page_size: i64) -> Result<i64, LdaError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(LdaError::InvalidInput(format!(
            "page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

/// Validate a page cap for bulk fetches: must be >= 1.
pub fn validate_max_pages(max_pages: u32) -> Result<u32, LdaError> {
    if max_pages == 0 {
        return Err(LdaError::InvalidInput("max_pages must be >= 1".to_string()));
    }
    Ok(max_pages)
}

/// Validate a pause between pages in seconds. Negative values are clamped to zero.
pub fn validate_pause(seconds: f64) -> Result<Duration, LdaError> {
    if !seconds.is_finite() {
        return Err(LdaError::InvalidInput(
            "pause must be a finite number of seconds".to_string(),
        ));
    }
    Duration::try_from_secs_f64(seconds.max(0.0))
        .map_err(|e| LdaError::InvalidInput(format!("pause of {} seconds: {}", seconds, e)))
}

/// Validate a request timeout in seconds: must be positive and finite.
pub fn validate_timeout(seconds: f64) -> Result<Duration, LdaError> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(LdaError::InvalidInput(
            "timeout must be a positive number of seconds".to_string(),
        ));
    }
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| LdaError::InvalidInput(format!("timeout of {} seconds: {}", seconds, e)))
}

/// Parse a raw `KEY=VALUE` filter. The key must be a lowercase API parameter
/// name (`[a-z0-9_]`); the value is sanitized like a name.
pub fn parse_filter(input: &str) -> Result<(String, String), LdaError> {
    let (key, value) = input.split_once('=').ok_or_else(|| {
        LdaError::InvalidInput(format!("filter '{}' must look like KEY=VALUE", input))
    })?;
    let key = key.trim();
    if key.is_empty() || key.len() > MAX_FILTER_KEY_LENGTH {
        return Err(LdaError::InvalidInput(format!(
            "filter key must be 1-{} characters",
            MAX_FILTER_KEY_LENGTH
        )));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(LdaError::InvalidInput(format!(
            "filter key '{}' may only contain a-z, 0-9 and _",
            key
        )));
    }
    let value = sanitize_text(value, MAX_NAME_LENGTH)?;
    Ok((key.to_string(), value))
}
