use crate::error::AppError;
use crate::models::Transaction;
use std::num::IntErrorKind;

pub const PAGE_SIZE: usize = 10;

pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}

/// `term` must already be normalized. Price matches when the term is a
/// substring of its decimal text, so non-numeric terms never match on price.
pub fn matches_search(transaction: &Transaction, term: &str) -> bool {
    transaction.title.to_lowercase().contains(term)
        || transaction.description.to_lowercase().contains(term)
        || transaction.price_text().contains(term)
}

pub fn apply_search(transactions: Vec<Transaction>, search: Option<&str>) -> Vec<Transaction> {
    match normalize_search(search) {
        Some(term) => transactions
            .into_iter()
            .filter(|t| matches_search(t, &term))
            .collect(),
        None => transactions,
    }
}

/// Missing pages default to 1. Zero and non-numeric pages are rejected.
/// Pages too large for `u64` saturate and so land past the last page.
pub fn parse_page(raw: Option<&str>) -> Result<u64, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(1);
    };
    match raw.parse::<u64>() {
        Ok(page) if page >= 1 => Ok(page),
        Err(e)
            if *e.kind() == IntErrorKind::PosOverflow
                && raw.bytes().all(|b| b.is_ascii_digit()) =>
        {
            Ok(u64::MAX)
        }
        _ => Err(AppError::InvalidPage(raw.to_string())),
    }
}

/// `page` is 1-based. Pages past the end are empty.
pub fn paginate<T>(items: &[T], page: u64) -> &[T] {
    let start = usize::try_from(page.saturating_sub(1))
        .ok()
        .and_then(|p| p.checked_mul(PAGE_SIZE))
        .unwrap_or(usize::MAX);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}
