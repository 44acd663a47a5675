//! Resolving a user-supplied category name against the category listing.

use crate::types::CategorySummary;

/// Returns the first listed category whose name contains `query`,
/// compared case-insensitively. Entries without a usable id are skipped.
#[must_use]
pub fn resolve_category<'a>(
    categories: &'a [CategorySummary],
    query: &str,
) -> Option<&'a CategorySummary> {
    let needle = query.trim().to_lowercase();
    categories
        .iter()
        .filter(|c| c.id_string().is_some())
        .find(|c| c.name.to_lowercase().contains(&needle))
}
