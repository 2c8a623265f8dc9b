//! Fixed-size pages over an ordered result.

use serde::Serialize;

use crate::error::{Result, RosterError};
use crate::model::User;

const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Page sizes offered by the table.
pub fn page_size_options() -> &'static [usize] {
    &PAGE_SIZE_OPTIONS
}

/// One page of records together with the totals needed to render a pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
    pub items: Vec<&'a User>,
    /// 1-based page number as requested.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl Page<'_> {
    /// Returns `true` if an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Cuts page `page` (1-based) of `page_size` records out of `records`.
///
/// Page 0 is treated as page 1. A page past the end has no items but still
/// reports the totals.
pub fn paginate<'a>(records: &[&'a User], page: usize, page_size: usize) -> Result<Page<'a>> {
    if page_size == 0 {
        return Err(RosterError::InvalidArgument(
            "page size must be at least 1".to_string(),
        ));
    }

    let page = page.max(1);
    let total_items = records.len();
    let total_pages = total_items.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);

    let items = records
        .iter()
        .skip(start)
        .take(page_size)
        .copied()
        .collect();

    Ok(Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    })
}
