//! Page slicing and pagination metadata.
//!
//! Pages are 1-indexed. A requested page outside `[1, max(total_pages, 1)]`
//! snaps to the nearest valid page, so a stale page number in the UI (say,
//! page 9 after a search narrowed the list to two pages) still yields a page.
//!
//! An empty collection reports `total_pages == 0` with `current_page == 1`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pagination metadata for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// The page actually returned, after clamping (1-indexed).
    pub current_page: usize,
    /// `ceil(total_items / page_size)`; zero for an empty collection.
    pub total_pages: usize,
    /// Number of items across all pages.
    pub total_items: usize,
    /// Maximum number of items per page.
    pub page_size: usize,
    /// Whether a page follows this one.
    pub has_next_page: bool,
    /// Whether a page precedes this one.
    pub has_prev_page: bool,
}

impl Pagination {
    /// Computes the metadata for `page` of a collection of `total_items`.
    ///
    /// Fails with [`QueryError::InvalidPageSize`] when `page_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use sexton_query::Pagination;
    ///
    /// let p = Pagination::compute(25, 3, 10).unwrap();
    /// assert_eq!(p.current_page, 3);
    /// assert_eq!(p.total_pages, 3);
    /// assert_eq!(p.range(), 20..25);
    /// assert!(!p.has_next_page);
    /// assert!(p.has_prev_page);
    /// ```
    pub fn compute(total_items: usize, page: i64, page_size: usize) -> Result<Pagination> {
        if page_size == 0 {
            return Err(QueryError::InvalidPageSize { page_size });
        }

        let total_pages = total_items.div_ceil(page_size);
        let last_page = total_pages.max(1);
        let current_page = if page < 1 {
            1
        } else {
            usize::try_from(page).unwrap_or(usize::MAX).min(last_page)
        };

        Ok(Pagination {
            current_page,
            total_pages,
            total_items,
            page_size,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        })
    }

    /// Metadata reported when a query could not be evaluated.
    ///
    /// Describes a single empty page so that pagination controls render in
    /// their disabled state.
    pub fn fallback(page_size: usize) -> Pagination {
        Pagination {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            page_size,
            has_next_page: false,
            has_prev_page: false,
        }
    }

    /// Index range of the current page within the full sequence.
    pub fn range(&self) -> Range<usize> {
        let start = self
            .current_page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        start..end
    }
}

/// One page of items together with its [`Pagination`] metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    /// The items on this page, at most `pagination.page_size` of them.
    pub items: Vec<T>,
    /// Metadata describing this page's position in the whole.
    pub pagination: Pagination,
}

impl<T> PageResult<T> {
    /// An empty result carrying [`Pagination::fallback`] metadata.
    pub fn fallback(page_size: usize) -> Self {
        PageResult {
            items: Vec::new(),
            pagination: Pagination::fallback(page_size),
        }
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transforms each item, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

impl<T: Clone> PageResult<&T> {
    /// Clones the borrowed items into an owned page.
    pub fn cloned(self) -> PageResult<T> {
        self.map(T::clone)
    }
}

/// Slices one page out of `items`.
///
/// # Example
///
/// ```
/// use sexton_query::paginate;
///
/// let items: Vec<u32> = (1..=25).collect();
/// let page = paginate(&items, 3, 10).unwrap();
/// assert_eq!(page.items, vec![&21, &22, &23, &24, &25]);
/// assert_eq!(page.pagination.total_pages, 3);
/// ```
pub fn paginate<T>(items: &[T], page: i64, page_size: usize) -> Result<PageResult<&T>> {
    let pagination = Pagination::compute(items.len(), page, page_size)?;
    Ok(PageResult {
        items: items[pagination.range()].iter().collect(),
        pagination,
    })
}

/// Consumes an owned sequence and keeps only the requested page.
pub(crate) fn paginate_owned<T>(mut items: Vec<T>, page: i64, page_size: usize) -> Result<PageResult<T>> {
    let pagination = Pagination::compute(items.len(), page, page_size)?;
    let range = pagination.range();
    items.truncate(range.end);
    items.drain(..range.start);
    Ok(PageResult { items, pagination })
}
