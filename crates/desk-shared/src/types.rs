//! Common types

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of items skipped before this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.per_page as usize
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: DEFAULT_PAGE_SIZE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_clamps_values() {
        let p = Pagination::new(Some(0), Some(500));
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, MAX_PAGE_SIZE);

        let p = Pagination::new(None, None);
        assert_eq!(p, Pagination::default());
    }

    #[test]
    fn test_pagination_offset() {
        assert_eq!(Pagination::new(Some(3), Some(10)).offset(), 20);
        assert_eq!(Pagination::default().offset(), 0);
    }
}
