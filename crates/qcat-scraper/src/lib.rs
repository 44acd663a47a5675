pub mod aggregate;
pub mod categories;
pub mod client;
pub mod error;
pub mod images;
pub mod interrupt;
pub mod normalize;
pub mod pagination;
pub(crate) mod parse_helpers;
pub mod pipeline;
pub mod rate_limit;
pub mod types;

pub use aggregate::analyze_products;
pub use categories::resolve_category;
pub use client::{CatalogClient, RequestMethod};
pub use error::ScraperError;
pub use images::ImageCapture;
pub use interrupt::InterruptFlag;
pub use normalize::{normalize_product, normalize_product_at};
pub use pagination::PagedRecords;
pub use pipeline::{CatalogPipeline, CategoryCount, RunSummary};
pub use rate_limit::{FetchOutcome, RetryPolicy};
pub use types::{CategorySummary, RawRecord};
