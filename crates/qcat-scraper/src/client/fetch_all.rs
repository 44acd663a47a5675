//! Multi-page product fetch loop for `CatalogClient`.

use qcat_core::PageStop;

use crate::interrupt::InterruptFlag;
use crate::pagination::{stop_after_page, PagedRecords};
use crate::rate_limit::FetchOutcome;
use crate::types::RawRecord;

use super::CatalogClient;

impl CatalogClient {
    /// Fetches every page of a category's product listing, starting at page 1.
    ///
    /// Pages are requested strictly in order. The loop ends on the first
    /// empty page, on a page whose retries were exhausted, after page
    /// `max_pages` (when set and non-zero), after a short page, or when
    /// `interrupt` has been requested. Records gathered up to that point are
    /// always returned; nothing here fails.
    pub async fn fetch_all_products(
        &self,
        category_id: &str,
        page_size: u32,
        max_pages: Option<u32>,
        interrupt: &InterruptFlag,
    ) -> PagedRecords {
        let mut records: Vec<RawRecord> = Vec::new();
        let mut page = 1u32;

        let stop = loop {
            if interrupt.is_requested() {
                break PageStop::Interrupted;
            }

            let batch = match self.fetch_products_page(category_id, page, page_size).await {
                FetchOutcome::Data(batch) => batch,
                FetchOutcome::Exhausted => break PageStop::Exhausted,
            };

            if batch.is_empty() {
                break PageStop::EmptyPage;
            }

            let returned = batch.len();
            records.extend(batch);

            if let Some(stop) = stop_after_page(page, returned, page_size, max_pages) {
                if stop == PageStop::MaxPages {
                    tracing::info!(category_id, max_pages = page, "reached max pages limit");
                }
                break stop;
            }

            page += 1;
        };

        // `page` is the page that ended the loop; only pages that returned
        // data were kept.
        let pages_fetched = match stop {
            PageStop::MaxPages | PageStop::ShortPage => page,
            _ => page - 1,
        };

        tracing::info!(
            category_id,
            total = records.len(),
            pages = pages_fetched,
            stop = %stop,
            "finished category pagination"
        );

        PagedRecords {
            records,
            pages_fetched,
            stop,
        }
    }
}
