//! Windowing over an already sorted result sequence

use serde::Serialize;

use crate::scoring::ScoredProduct;

/// A borrowed page of ranked results
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
    pub items: &'a [ScoredProduct],
    pub index: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
}

impl<'a> Page<'a> {
    /// Slice page `index` out of `items`. A size of zero is treated as one;
    /// an index past the end yields an empty page.
    pub fn window(items: &'a [ScoredProduct], index: usize, size: usize) -> Self {
        let size = size.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(size);

        let start = index.saturating_mul(size).min(total_items);
        let end = start.saturating_add(size).min(total_items);

        Self {
            items: &items[start..end],
            index,
            size,
            total_items,
            total_pages,
            has_next: end < total_items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
