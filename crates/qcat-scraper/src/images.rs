//! Best-effort product image capture.
//!
//! Images are saved as `{image_dir}/{product_id}.{ext}`. A failed download
//! is logged and skipped; it never affects the product record or the run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use qcat_core::SENTINEL;

use crate::error::ScraperError;

const IMAGE_TIMEOUT_SECS: u64 = 10;
const FALLBACK_EXTENSION: &str = "jpg";

/// Downloads product images into a local directory.
pub struct ImageCapture {
    client: reqwest::Client,
    dir: PathBuf,
}

impl ImageCapture {
    /// # Errors
    ///
    /// Returns [`ScraperError::Client`] if the HTTP client cannot be built.
    pub fn new(dir: impl Into<PathBuf>, user_agent: &str) -> Result<Self, ScraperError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(IMAGE_TIMEOUT_SECS))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            dir: dir.into(),
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Downloads one image. Returns the written path, or `None` when the URL
    /// is absent or any step fails.
    pub async fn capture(&self, product_id: &str, url: &str) -> Option<PathBuf> {
        if url.is_empty() || url == SENTINEL {
            return None;
        }

        match self.download(product_id, url).await {
            Ok(path) => {
                tracing::debug!(product_id, path = %path.display(), "saved image");
                Some(path)
            }
            Err(CaptureError::Status(status)) => {
                tracing::debug!(product_id, url, status, "image not available");
                None
            }
            Err(e) => {
                tracing::warn!(product_id, url, error = %e, "image download failed");
                None
            }
        }
    }

    async fn download(&self, product_id: &str, url: &str) -> Result<PathBuf, CaptureError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CaptureError::Fetch(ScraperError::from_transport(url, e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(CaptureError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CaptureError::Fetch(ScraperError::from_transport(url, e)))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(CaptureError::Io)?;
        let path = self.dir.join(image_file_name(product_id, url));
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(CaptureError::Io)?;
        Ok(path)
    }
}

#[derive(Debug, thiserror::Error)]
enum CaptureError {
    #[error(transparent)]
    Fetch(ScraperError),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("write failed: {0}")]
    Io(std::io::Error),
}

/// `{product_id}.{ext}` with path separators in the id replaced.
fn image_file_name(product_id: &str, url: &str) -> String {
    let id: String = product_id
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{id}.{}", image_extension(url))
}

/// Extension taken from the last `.` segment of the URL with any query or
/// fragment removed; `jpg` when that segment does not look like one.
#[must_use]
pub fn image_extension(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let Some((before, ext)) = path.rsplit_once('.') else {
        return FALLBACK_EXTENSION;
    };
    let has_file_name = before
        .rsplit_once('/')
        .map_or(!before.is_empty(), |(_, name)| !name.is_empty());
    if has_file_name
        && !ext.is_empty()
        && ext.len() <= 5
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        ext
    } else {
        FALLBACK_EXTENSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_strips_query_string() {
        assert_eq!(image_extension("https://cdn.example.com/a/b.png?w=200"), "png");
        assert_eq!(image_extension("https://cdn.example.com/a/b.webp#frag"), "webp");
    }

    #[test]
    fn extension_falls_back_to_jpg() {
        assert_eq!(image_extension("https://cdn.example.com/images/12345"), "jpg");
        assert_eq!(image_extension("https://cdn.example.com/img.php/x"), "jpg");
        assert_eq!(image_extension(""), "jpg");
    }

    #[test]
    fn extension_keeps_last_segment() {
        assert_eq!(image_extension("https://cdn.example.com/p/item.large.jpeg"), "jpeg");
    }

    #[test]
    fn file_name_uses_product_id() {
        assert_eq!(
            image_file_name("sku-1", "https://cdn.example.com/x.png"),
            "sku-1.png"
        );
        assert_eq!(
            image_file_name("a/b", "https://cdn.example.com/x"),
            "a_b.jpg"
        );
    }

    #[tokio::test]
    async fn sentinel_url_is_not_fetched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let capture = ImageCapture::new(dir.path(), "test").expect("client");
        assert!(capture.capture("p1", SENTINEL).await.is_none());
        assert!(capture.capture("p1", "").await.is_none());
        assert_eq!(
            std::fs::read_dir(dir.path()).expect("read dir").count(),
            0
        );
    }
}
