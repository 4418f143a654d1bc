//! Page-based listing parameters and results.

use serde::Deserialize;

use crate::{model::api::PaginatedDto, server::error::AppError};

pub const DEFAULT_ENTRIES: u64 = 10;
pub const MAX_ENTRIES: u64 = 100;

/// `?page=&entries=` query string accepted by every listing endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    DEFAULT_ENTRIES
}

/// Zero-indexed page request with `per_page` clamped to `1..=MAX_ENTRIES`.
///
/// The row offset `page * per_page` always fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
    pub per_page: u64,
}

impl PageParams {
    /// Builds params, capping `page` at the last page whose offset is addressable.
    pub fn new(page: u64, entries: u64) -> Self {
        let per_page = entries.clamp(1, MAX_ENTRIES);
        Self {
            page: page.min(max_page(per_page)),
            per_page,
        }
    }
}

fn max_page(per_page: u64) -> u64 {
    i64::MAX as u64 / per_page
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(0, DEFAULT_ENTRIES)
    }
}

impl TryFrom<PaginationQuery> for PageParams {
    type Error = AppError;

    /// # Returns
    /// - `Ok(PageParams)` - Query within range
    /// - `Err(AppError::BadRequest)` - `page * entries` does not fit a row offset
    fn try_from(query: PaginationQuery) -> Result<Self, Self::Error> {
        let per_page = query.entries.clamp(1, MAX_ENTRIES);
        if query.page > max_page(per_page) {
            return Err(AppError::BadRequest(format!(
                "Page {} is out of range",
                query.page
            )));
        }

        Ok(Self::new(query.page, query.entries))
    }
}

/// One page of domain models plus the totals needed to render pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, params: PageParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            per_page: params.per_page,
            total_pages: total.div_ceil(params.per_page),
        }
    }

    /// Converts the items with a fallible function, keeping the page metadata.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;

        Ok(Page {
            items,
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        })
    }

    pub fn into_dto<D>(self, f: impl FnMut(T) -> D) -> PaginatedDto<D> {
        PaginatedDto {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_entries() {
        assert_eq!(PageParams::new(0, 0).per_page, 1);
        assert_eq!(PageParams::new(0, 1000).per_page, MAX_ENTRIES);
        assert_eq!(PageParams::new(3, 25), PageParams { page: 3, per_page: 25 });
    }

    #[test]
    fn rejects_pages_past_addressable_offset() {
        let query = |page| PaginationQuery { page, entries: 10 };

        assert!(matches!(
            PageParams::try_from(query(u64::MAX)),
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(
            PageParams::try_from(query(4)).unwrap(),
            PageParams { page: 4, per_page: 10 }
        );

        let capped = PageParams::new(u64::MAX, 10);
        assert!(capped.page.checked_mul(capped.per_page).is_some());
        assert!(capped.page * capped.per_page <= i64::MAX as u64);
    }

    #[test]
    fn computes_total_pages() {
        let page = Page::new(vec![1, 2, 3], 21, PageParams::new(0, 10));
        assert_eq!(page.total_pages, 3);

        let empty: Page<i32> = Page::new(vec![], 0, PageParams::default());
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn into_dto_keeps_metadata() {
        let dto = Page::new(vec![1, 2], 12, PageParams::new(1, 10)).into_dto(|n| n * 10);

        assert_eq!(dto.items, vec![10, 20]);
        assert_eq!(dto.total, 12);
        assert_eq!(dto.page, 1);
        assert_eq!(dto.per_page, 10);
        assert_eq!(dto.total_pages, 2);
    }
}
