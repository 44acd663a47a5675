//! Page-number pagination termination rules.
//!
//! The product endpoint is paged with `page` (1-based) and `limit` query
//! parameters and exposes no total count, so the end of a listing is only
//! discovered by inspecting each page:
//!
//! 1. no data (empty page or exhausted retries) stops before anything is kept;
//! 2. a configured page cap stops once page `max_pages` has been kept;
//! 3. a short page (fewer records than `limit`) is the last page.

use qcat_core::PageStop;

use crate::types::RawRecord;

/// Records gathered for one category by the page loop.
#[derive(Debug, Clone)]
pub struct PagedRecords {
    /// Concatenation of every kept page, in page order.
    pub records: Vec<RawRecord>,
    /// Pages that returned data and were kept.
    pub pages_fetched: u32,
    pub stop: PageStop,
}

/// Decides whether the loop continues after page `page` returned
/// `returned` records and those records were kept.
///
/// `max_pages` of `None` or `Some(0)` means unlimited.
#[must_use]
pub fn stop_after_page(
    page: u32,
    returned: usize,
    page_size: u32,
    max_pages: Option<u32>,
) -> Option<PageStop> {
    if max_pages.is_some_and(|max| max > 0 && page >= max) {
        return Some(PageStop::MaxPages);
    }
    if returned < page_size as usize {
        return Some(PageStop::ShortPage);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_page_without_cap_continues() {
        assert_eq!(stop_after_page(1, 20, 20, None), None);
        assert_eq!(stop_after_page(7, 20, 20, Some(0)), None);
    }

    #[test]
    fn short_page_stops() {
        assert_eq!(stop_after_page(3, 5, 20, None), Some(PageStop::ShortPage));
    }

    #[test]
    fn oversized_page_is_not_short() {
        assert_eq!(stop_after_page(1, 25, 20, None), None);
    }

    #[test]
    fn page_cap_stops_on_the_capped_page() {
        assert_eq!(stop_after_page(1, 20, 20, Some(2)), None);
        assert_eq!(stop_after_page(2, 20, 20, Some(2)), Some(PageStop::MaxPages));
    }

    #[test]
    fn page_cap_takes_precedence_over_short_page() {
        assert_eq!(stop_after_page(2, 3, 20, Some(2)), Some(PageStop::MaxPages));
    }
}
