use crate::domain::{DomainError, DomainResult};
use crate::shared::types::{PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE, MAX_PAGE_SIZE};

pub fn validate_pagination(page: Option<u64>, page_size: Option<u64>) -> PageRequest {
    let page = page.unwrap_or(1).clamp(1, MAX_PAGE);
    let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    PageRequest { page, page_size }
}

/// Trim `value` and check its length in characters.
pub fn required_text(field: &str, value: &str, min: usize, max: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(DomainError::validation(format!(
            "{} must be {}–{} characters",
            field, min, max
        )));
    }
    Ok(trimmed.to_string())
}
