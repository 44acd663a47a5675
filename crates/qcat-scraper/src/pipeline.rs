//! Run orchestration: resolve, paginate, normalize, capture images, persist.
//!
//! Categories are processed one at a time. Nothing in a category's run is
//! fatal once the pipeline is built; an unresolved name, exhausted retries,
//! failed image downloads and failed writes all degrade to a smaller (or
//! empty) [`CategoryResult`] plus log lines.

use chrono::Local;
use qcat_core::{AppConfig, CategoryResult};
use serde::Serialize;

use crate::categories::resolve_category;
use crate::client::CatalogClient;
use crate::error::ScraperError;
use crate::images::ImageCapture;
use crate::interrupt::InterruptFlag;
use crate::normalize::normalize_product;
use crate::types::CategorySummary;

/// Composes the client, normalizer, image capture and export for one run.
pub struct CatalogPipeline<'a> {
    config: &'a AppConfig,
    client: CatalogClient,
    images: Option<ImageCapture>,
    interrupt: InterruptFlag,
}

impl<'a> CatalogPipeline<'a> {
    /// # Errors
    ///
    /// Returns [`ScraperError`] if either HTTP client cannot be built.
    pub fn new(config: &'a AppConfig, interrupt: InterruptFlag) -> Result<Self, ScraperError> {
        let client = CatalogClient::new(config)?;
        let images = if config.download_images {
            Some(ImageCapture::new(
                config.image_dir.clone(),
                &config.user_agent,
            )?)
        } else {
            None
        };

        Ok(Self {
            config,
            client,
            images,
            interrupt,
        })
    }

    #[must_use]
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    #[must_use]
    pub fn interrupt(&self) -> &InterruptFlag {
        &self.interrupt
    }

    /// The category listing for the configured location.
    pub async fn list_categories(&self) -> Vec<CategorySummary> {
        self.client.fetch_categories().await
    }

    /// Scrapes a single category by name, fetching the listing first.
    pub async fn scrape_category(&self, name: &str) -> CategoryResult {
        let listing = self.client.fetch_categories().await;
        self.scrape_resolved(name, &listing).await
    }

    /// Scrapes each named category in order against a single listing fetch.
    ///
    /// Repeated names are scraped once. An interrupt seen between categories
    /// leaves the remaining names out of the result.
    pub async fn scrape_categories(&self, names: &[String]) -> Vec<CategoryResult> {
        let listing = self.client.fetch_categories().await;
        let mut results: Vec<CategoryResult> = Vec::with_capacity(names.len());

        for (index, name) in names.iter().enumerate() {
            if results.iter().any(|r| &r.category == name) {
                tracing::debug!(category = %name, "category already scraped in this run");
                continue;
            }
            if self.interrupt.is_requested() {
                tracing::warn!(
                    remaining = names.len() - index,
                    "interrupt requested, skipping remaining categories"
                );
                break;
            }
            results.push(self.scrape_resolved(name, &listing).await);
        }

        results
    }

    async fn scrape_resolved(&self, name: &str, listing: &[CategorySummary]) -> CategoryResult {
        let Some((summary, category_id)) = resolve_category(listing, name)
            .and_then(|summary| summary.id_string().map(|id| (summary, id)))
        else {
            tracing::warn!(category = name, "category not found in listing");
            return CategoryResult::unresolved(name);
        };

        tracing::info!(
            category = name,
            matched = %summary.name,
            category_id = %category_id,
            "scraping category"
        );

        let paged = self
            .client
            .fetch_all_products(
                &category_id,
                self.config.products_per_page,
                self.config.page_limit(),
                &self.interrupt,
            )
            .await;

        let mut products = Vec::with_capacity(paged.records.len());
        let mut images_saved = 0usize;
        for record in &paged.records {
            let product = normalize_product(record);
            if let Some(images) = &self.images {
                if images.capture(&product.product_id, &product.image_url).await.is_some() {
                    images_saved += 1;
                }
            }
            products.push(product);
        }
        if let Some(images) = &self.images {
            tracing::info!(
                category = name,
                saved = images_saved,
                dir = %images.dir().display(),
                "captured product images"
            );
        }

        let result = CategoryResult {
            category: name.to_owned(),
            category_id: Some(category_id),
            pages_fetched: paged.pages_fetched,
            stop: paged.stop,
            products,
        };

        self.persist(&result);
        result
    }

    fn persist(&self, result: &CategoryResult) {
        if result.is_empty() {
            tracing::info!(category = %result.category, "no products, nothing to save");
            return;
        }

        let timestamp = Local::now().naive_local();
        if let Err(e) = qcat_export::export_category(
            &self.config.output_dir,
            &self.config.file_prefix,
            &result.category,
            &result.products,
            self.config.output_format,
            timestamp,
        ) {
            tracing::error!(category = %result.category, error = %e, "failed to save category");
        }
    }
}

/// Per-category product counts for a finished run, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub categories: Vec<CategoryCount>,
    pub total_products: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub products: usize,
}

impl RunSummary {
    #[must_use]
    pub fn from_results(results: &[CategoryResult]) -> Self {
        let categories: Vec<CategoryCount> = results
            .iter()
            .map(|r| CategoryCount {
                category: r.category.clone(),
                products: r.len(),
            })
            .collect();
        let total_products = categories.iter().map(|c| c.products).sum();
        Self {
            categories,
            total_products,
        }
    }

    #[must_use]
    pub fn categories_scraped(&self) -> usize {
        self.categories.len()
    }
}
