//! Human-readable console output.

use std::fmt::Write;

use qcat_core::{AggregateReport, AppConfig};
use qcat_scraper::{CategorySummary, RunSummary};

const CURRENCY: &str = "₹";

pub(crate) fn format_category_listing(listing: &[CategorySummary]) -> String {
    let mut out = String::from("\nAvailable categories:\n\n");
    for (i, category) in listing.iter().enumerate() {
        let name = if category.name.is_empty() {
            "Unknown"
        } else {
            category.name.as_str()
        };
        let _ = writeln!(out, "{:3}. {name}", i + 1);
    }
    let _ = writeln!(out, "\nTotal: {} categories", listing.len());
    out
}

pub(crate) fn format_analysis(report: &AggregateReport) -> String {
    let c = CURRENCY;
    let r = &report.price_ranges;
    let mut out = String::from("\nAnalysis:\n");
    let _ = writeln!(out, "Total Products: {}", report.total_products);
    let _ = writeln!(out, "Available: {}", report.available_products);
    let _ = writeln!(out, "Unavailable: {}", report.unavailable_products);
    out.push_str("\nPricing:\n");
    let _ = writeln!(out, "  Average Price: {c}{:.2}", report.average_price);
    let _ = writeln!(out, "  Average MRP: {c}{:.2}", report.average_mrp);
    let _ = writeln!(out, "  Average Discount: {:.2}%", report.average_discount);
    let _ = writeln!(
        out,
        "  Price Range: {c}{:.2} - {c}{:.2}",
        report.min_price, report.max_price
    );
    out.push_str("\nPrice Distribution:\n");
    let _ = writeln!(out, "  Under {c}50: {}", r.under_50);
    let _ = writeln!(out, "  {c}50-100: {}", r.from_50_to_100);
    let _ = writeln!(out, "  {c}100-200: {}", r.from_100_to_200);
    let _ = writeln!(out, "  Over {c}200: {}", r.over_200);
    let _ = writeln!(out, "\nBrands: {}", report.brands.len());
    let _ = writeln!(out, "Categories: {}", report.categories.len());
    out
}

pub(crate) fn format_summary(summary: &RunSummary, config: &AppConfig) -> String {
    let mut out = String::from("\nSummary:\n");
    let _ = writeln!(
        out,
        "Total categories scraped: {}",
        summary.categories_scraped()
    );
    let _ = writeln!(out, "Total products scraped: {}", summary.total_products);
    for entry in &summary.categories {
        let _ = writeln!(out, "  {}: {} products", entry.category, entry.products);
    }
    let _ = writeln!(out, "\nData saved to: {}", config.output_dir.display());
    if config.download_images {
        let _ = writeln!(out, "Images saved to: {}", config.image_dir.display());
    }
    out
}
