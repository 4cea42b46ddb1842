//! Final row ordering.

use std::collections::HashMap;

use crate::types::VariantRow;

/// Sorts rows by filename, then by the size's position in `sizes`.
///
/// Filenames compare as plain text; sizes compare by configured position,
/// so `XL` precedes `2XL` when listed that way. Sizes missing from the list
/// sort after all listed ones. The sort is stable.
pub fn assemble(mut rows: Vec<VariantRow>, sizes: &[String]) -> Vec<VariantRow> {
    let mut rank: HashMap<&str, usize> = HashMap::with_capacity(sizes.len());
    for (i, size) in sizes.iter().enumerate() {
        rank.entry(size.as_str()).or_insert(i);
    }
    let position = |size: &str| rank.get(size).copied().unwrap_or(usize::MAX);

    rows.sort_by(|a, b| {
        a.filename
            .cmp(&b.filename)
            .then_with(|| position(&a.size).cmp(&position(&b.size)))
    });

    rows
}
