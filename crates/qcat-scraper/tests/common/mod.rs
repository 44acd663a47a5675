//! Shared fixtures for the integration tests.

use std::path::Path;

use qcat_core::{AppConfig, OutputFormat};
use qcat_scraper::InterruptFlag;
use serde_json::{json, Value};
use wiremock::{Request, Respond, ResponseTemplate};

/// Config pointed at a mock server: no delays, three attempts, export and
/// image directories under `dir`.
pub fn test_config(base_url: &str, dir: &Path) -> AppConfig {
    AppConfig {
        base_url: base_url.to_owned(),
        categories_endpoint: "/categories".to_owned(),
        products_endpoint: "/products".to_owned(),
        latitude: 12.9716,
        longitude: 77.5946,
        log_level: "debug".to_owned(),
        user_agent: "qcat-test/0.1".to_owned(),
        app_version: "14.8.0".to_owned(),
        platform: "android".to_owned(),
        request_timeout_secs: 5,
        rate_limit_delay_ms: 0,
        backoff_unit_ms: 0,
        max_retries: 3,
        products_per_page: 20,
        max_pages: 0,
        categories: Vec::new(),
        output_format: OutputFormat::Both,
        output_dir: dir.join("output"),
        file_prefix: "zepto".to_owned(),
        download_images: false,
        image_dir: dir.join("images"),
    }
}

/// `{"products": [...]}` with `count` records whose ids start at `first_id`.
pub fn products_page(first_id: usize, count: usize) -> Value {
    let products: Vec<Value> = (first_id..first_id + count)
        .map(|i| {
            json!({
                "id": format!("p{i}"),
                "name": format!("Product {i}"),
                "brand": "Amul",
                "price": 40,
                "mrp": 50,
                "in_stock": true,
            })
        })
        .collect();
    json!({ "products": products })
}

/// Serves `body` and requests an interrupt, as if Ctrl-C arrived while the
/// response was in flight.
pub struct InterruptingResponder {
    interrupt: InterruptFlag,
    body: Value,
}

impl InterruptingResponder {
    pub fn new(interrupt: InterruptFlag, body: Value) -> Self {
        Self { interrupt, body }
    }
}

impl Respond for InterruptingResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.interrupt.request();
        ResponseTemplate::new(200).set_body_json(self.body.clone())
    }
}
