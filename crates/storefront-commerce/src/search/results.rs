//! Paginated result pages.

use serde::{Deserialize, Serialize};

/// One page of the filtered catalog view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: usize,
    /// Requested page (1-indexed).
    pub page_number: usize,
    /// Requested page size.
    pub page_size: usize,
    /// Number of pages; 0 when there are no items.
    pub total_pages: usize,
}

impl<T: Clone> Page<T> {
    /// Slice `all` at `[(page_number - 1) * page_size, page_number * page_size)`.
    ///
    /// Out-of-range pages yield an empty item list. Page 0 and a page size of
    /// 0 are treated as out of range.
    pub fn slice(all: &[T], page_number: usize, page_size: usize) -> Self {
        let total = all.len();
        let items = if page_number == 0 || page_size == 0 {
            Vec::new()
        } else {
            let start = (page_number - 1).saturating_mul(page_size);
            let end = start.saturating_add(page_size).min(total);
            if start >= total {
                Vec::new()
            } else {
                all[start..end].to_vec()
            }
        };

        Self {
            items,
            total,
            page_number,
            page_size,
            total_pages: total_pages(total, page_size),
        }
    }
}

impl<T> Page<T> {
    /// Check if the page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there's a next page.
    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Whether there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    /// Get start item number (1-indexed), 0 for an empty page.
    pub fn start_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page_number - 1) * self.page_size + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.start_item() + self.items.len() - 1
        }
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page_number.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Map the items, keeping pagination info.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

/// `ceil(total / page_size)`, with 0 for an empty set or a zero page size.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}
