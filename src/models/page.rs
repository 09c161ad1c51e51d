//! Pagination helper types for list queries

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Requested page (1-based) and its size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Page numbers start at 1; anything lower is not a page, and neither
    /// is one whose offset does not fit in an i64.
    pub fn new(page: Option<i64>, per_page: i64) -> AppResult<Self> {
        let page = page.unwrap_or(1);
        if page < 1 || (page - 1).checked_mul(per_page).is_none() {
            return Err(AppError::NotFound("Invalid page".to_string()));
        }
        Ok(Self { page, per_page })
    }

    /// SQL OFFSET value
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// SQL LIMIT value
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Records of the current page
    pub items: Vec<T>,
    /// Total number of records
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Records per page
    pub per_page: i64,
    /// Number of pages (at least 1, an empty first page is valid)
    pub num_pages: i64,
}

impl<T> Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Wrap a page of records. Pages past the last one are not found,
    /// except the first page of an empty list.
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> AppResult<Self> {
        let num_pages = num_pages(total, request.per_page);
        if request.page > num_pages {
            return Err(AppError::NotFound("Invalid page".to_string()));
        }
        Ok(Self {
            items,
            total,
            page: request.page,
            per_page: request.per_page,
            num_pages,
        })
    }
}

fn num_pages(total: i64, per_page: i64) -> i64 {
    if per_page <= 0 || total <= 0 {
        return 1;
    }
    (total + per_page - 1) / per_page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::genre::Genre;

    fn genres(n: i32) -> Vec<Genre> {
        (1..=n)
            .map(|id| Genre { id, name: format!("Genre {}", id) })
            .collect()
    }

    #[test]
    fn test_offset_and_limit() {
        let req = PageRequest::new(Some(3), 10).unwrap();
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn test_page_defaults_to_first() {
        assert_eq!(PageRequest::new(None, 10).unwrap().page, 1);
    }

    #[test]
    fn test_page_zero_is_not_found() {
        assert!(matches!(PageRequest::new(Some(0), 10), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_huge_page_is_not_found() {
        assert!(matches!(PageRequest::new(Some(i64::MAX), 10), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_offset_saturates() {
        let req = PageRequest { page: i64::MAX, per_page: 10 };
        assert_eq!(req.offset(), i64::MAX);
    }

    #[test]
    fn test_num_pages() {
        assert_eq!(num_pages(0, 10), 1);
        assert_eq!(num_pages(10, 10), 1);
        assert_eq!(num_pages(11, 10), 2);
        assert_eq!(num_pages(25, 10), 3);
    }

    #[test]
    fn test_empty_first_page_is_valid() {
        let page = Page::new(genres(0), 0, PageRequest::new(Some(1), 10).unwrap()).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.num_pages, 1);
    }

    #[test]
    fn test_page_past_the_end_is_not_found() {
        let req = PageRequest::new(Some(3), 10).unwrap();
        assert!(matches!(Page::new(genres(0), 15, req), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_last_partial_page() {
        let req = PageRequest::new(Some(2), 10).unwrap();
        let page = Page::new(genres(5), 15, req).unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.num_pages, 2);
    }
}
