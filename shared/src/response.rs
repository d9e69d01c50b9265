//! Response types
//!
//! The uniform shape list endpoints are normalized into, whatever envelope
//! the API actually used.

use serde::{Deserialize, Serialize};

/// One page of results
///
/// ```json
/// { "items": [...], "count": 2, "total": 40, "page": 1, "pages": 20 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Items on this page
    pub count: u64,
    /// Items across all pages
    pub total: u64,
    /// 1-based
    pub page: u32,
    pub pages: u32,
}

impl<T> Page<T> {
    /// Single page holding everything
    pub fn single_page(items: Vec<T>) -> Self {
        let count = items.len() as u64;
        Self {
            items,
            count,
            total: count,
            page: 1,
            pages: 1,
        }
    }

    pub fn empty() -> Self {
        Self::single_page(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            total: self.total,
            page: self.page,
            pages: self.pages,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Pagination numbers as sent by the API, any of which may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub count: Option<u64>,
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub pages: Option<u32>,
}

impl PageMeta {
    /// Fill the gaps: count = items.len(), total = count, page = 1, pages = 1
    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        let count = self.count.unwrap_or(items.len() as u64);
        let total = self.total.unwrap_or(count);
        Page {
            items,
            count,
            total,
            page: self.page.unwrap_or(1),
            pages: self.pages.unwrap_or(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_defaults() {
        let page = PageMeta::default().into_page(vec!['a', 'b', 'c']);
        assert_eq!(page.count, 3);
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.pages, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_meta_total_defaults_to_given_count() {
        let meta = PageMeta {
            count: Some(10),
            ..Default::default()
        };
        let page = meta.into_page(vec![1, 2]);
        assert_eq!(page.count, 10);
        assert_eq!(page.total, 10);
    }

    #[test]
    fn test_meta_kept_when_present() {
        let meta = PageMeta {
            count: Some(2),
            total: Some(40),
            page: Some(3),
            pages: Some(20),
        };
        let page = meta.into_page(vec![1, 2]);
        assert_eq!((page.count, page.total, page.page, page.pages), (2, 40, 3, 20));
        assert!(page.has_next());
    }
}
