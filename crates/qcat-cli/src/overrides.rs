//! Command-line overrides applied on top of the env-derived config.
//!
//! The merged [`AppConfig`] is built once here and never changed afterwards.

use qcat_core::AppConfig;

use crate::Cli;

/// Applies every flag the user passed. Flags that were not passed leave the
/// env value in place.
///
/// # Errors
///
/// Returns an error if `--delay` is negative or not finite.
pub(crate) fn apply(mut config: AppConfig, cli: &Cli) -> anyhow::Result<AppConfig> {
    if let Some(lat) = cli.lat {
        config.latitude = lat;
    }
    if let Some(lon) = cli.lon {
        config.longitude = lon;
    }
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    if let Some(dir) = &cli.output {
        config.output_dir.clone_from(dir);
    }
    if cli.download_images {
        config.download_images = true;
    }
    if let Some(dir) = &cli.image_dir {
        config.image_dir.clone_from(dir);
    }
    if let Some(secs) = cli.delay {
        config.rate_limit_delay_ms = delay_millis(secs)?;
    }
    if let Some(pages) = cli.max_pages {
        config.max_pages = pages;
    }
    Ok(config)
}

fn delay_millis(secs: f64) -> anyhow::Result<u64> {
    if !secs.is_finite() || secs < 0.0 {
        anyhow::bail!("--delay must be a non-negative number of seconds, got {secs}");
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let millis = (secs * 1000.0).round() as u64;
    Ok(millis)
}
