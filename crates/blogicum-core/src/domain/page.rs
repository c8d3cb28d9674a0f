use serde::Serialize;

use crate::error::DomainError;

/// Largest row offset any backend accepts (Postgres binds it as `bigint`).
const MAX_OFFSET: u64 = i64::MAX as u64;

/// A 1-based page number paired with the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u64,
    size: u64,
}

impl PageRequest {
    pub fn new(number: u64, size: u64) -> Result<Self, DomainError> {
        if number == 0 {
            return Err(DomainError::Validation(
                "page numbers start at 1".to_string(),
            ));
        }
        if size == 0 {
            return Err(DomainError::Internal("page size must be positive".to_string()));
        }
        Ok(Self { number, size })
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Rows to skip, saturating far past the end of any real result set.
    pub fn offset(&self) -> u64 {
        (self.number - 1)
            .checked_mul(self.size)
            .map_or(MAX_OFFSET, |offset| offset.min(MAX_OFFSET))
    }
}

/// One page of an ordered result set.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            number: request.number,
            size: request.size,
            total_items,
            total_pages: total_items.div_ceil(request.size),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
