//! Offset pagination over an already ordered result set.

use desk_shared::Pagination;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

pub fn paginate<T>(items: Vec<T>, pagination: Pagination) -> Page<T> {
    let total = items.len();
    let per_page = pagination.per_page.max(1);
    let total_pages = total.div_ceil(per_page as usize) as u32;
    let items = items
        .into_iter()
        .skip(pagination.offset())
        .take(per_page as usize)
        .collect();

    Page {
        items,
        total,
        page: pagination.page,
        per_page,
        total_pages,
    }
}
