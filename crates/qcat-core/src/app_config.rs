use std::path::PathBuf;
use std::str::FromStr;

/// Which flat representations are written for each scraped category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Both,
}

impl OutputFormat {
    #[must_use]
    pub fn writes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    #[must_use]
    pub fn writes_csv(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Both)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Both => write!(f, "both"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "both" => Ok(OutputFormat::Both),
            other => Err(format!(
                "unknown output format '{other}'; expected json, csv, or both"
            )),
        }
    }
}

/// Run configuration. Built once before the pipeline starts and only ever
/// borrowed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub categories_endpoint: String,
    pub products_endpoint: String,
    pub latitude: f64,
    pub longitude: f64,
    pub log_level: String,
    pub user_agent: String,
    pub app_version: String,
    pub platform: String,
    pub request_timeout_secs: u64,
    /// Courtesy pause after every successful response.
    pub rate_limit_delay_ms: u64,
    /// One backoff unit; attempt `n` waits `backoff_unit_ms * 2^n`.
    pub backoff_unit_ms: u64,
    /// Total attempts per request, including the first.
    pub max_retries: u32,
    pub products_per_page: u32,
    /// `0` means no page limit.
    pub max_pages: u32,
    /// Category names scraped when none are given on the command line.
    pub categories: Vec<String>,
    pub output_format: OutputFormat,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub download_images: bool,
    pub image_dir: PathBuf,
}

impl AppConfig {
    #[must_use]
    pub fn categories_url(&self) -> String {
        join_url(&self.base_url, &self.categories_endpoint)
    }

    #[must_use]
    pub fn products_url(&self) -> String {
        join_url(&self.base_url, &self.products_endpoint)
    }

    /// Returns the configured page cap, or `None` when unlimited.
    #[must_use]
    pub fn page_limit(&self) -> Option<u32> {
        (self.max_pages > 0).then_some(self.max_pages)
    }
}

fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
