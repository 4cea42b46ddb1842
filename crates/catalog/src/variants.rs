//! Size-variant expansion.

use crate::config::CatalogConfig;
use crate::sku::{child_sku, parent_sku, product_name, product_words};
use crate::types::{UploadedRecord, VariantRow};

/// Expands every record into one row per configured size.
///
/// The parent SKU and color are derived once per record; rows for a record
/// follow the order of `config.sizes`. Output length is
/// `records.len() * config.sizes.len()`.
pub fn expand(records: &[UploadedRecord], config: &CatalogConfig) -> Vec<VariantRow> {
    let mut rows = Vec::with_capacity(records.len() * config.sizes.len());

    for record in records {
        let (parent, color) = parent_sku(
            &record.filename,
            &config.parent_sku_prefix,
            config.child_sku_chars,
        );
        let words = product_words(&record.filename);

        for size in &config.sizes {
            rows.push(VariantRow {
                filename: record.filename.clone(),
                url: record.url.clone(),
                parent_sku: parent.clone(),
                color: color.clone(),
                size: size.clone(),
                child_sku: child_sku(&parent, &color, size),
                product_name: product_name(
                    &words,
                    &color,
                    size,
                    &config.product_name_prefix,
                    &config.product_name_append,
                ),
            });
        }
    }

    tracing::debug!(
        records = records.len(),
        sizes = config.sizes.len(),
        rows = rows.len(),
        "expanded size variants"
    );

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(sizes: &[&str]) -> CatalogConfig {
        CatalogConfig {
            parent_sku_prefix: "HDIE".into(),
            product_name_prefix: "On Coast".into(),
            product_name_append: "Pride Novelty Hoodie".into(),
            sizes: sizes.iter().map(|s| (*s).to_string()).collect(),
            child_sku_chars: 8,
        }
    }

    fn records(n: usize) -> Vec<UploadedRecord> {
        (0..n)
            .map(|i| {
                UploadedRecord::new(
                    format!("Design {i} Rainbow-Red.png"),
                    format!("https://i.ibb.co/{i}/img.png"),
                )
            })
            .collect()
    }

    #[test]
    fn produces_cross_product() {
        let sizes = ["S", "M", "L", "XL", "2XL"];
        let rows = expand(&records(3), &config(&sizes));

        assert_eq!(rows.len(), 15);
        for size in sizes {
            assert_eq!(rows.iter().filter(|r| r.size == size).count(), 3);
        }
    }

    #[test]
    fn empty_records_yield_no_rows() {
        assert!(expand(&[], &config(&["S"])).is_empty());
    }

    #[test]
    fn rows_follow_size_order_and_share_parent() {
        let rows = expand(&records(1), &config(&["XL", "S", "M"]));

        let sizes: Vec<&str> = rows.iter().map(|r| r.size.as_str()).collect();
        assert_eq!(sizes, vec!["XL", "S", "M"]);
        assert!(rows.iter().all(|r| r.parent_sku == "HDIE-DESIGN0R"));
        assert!(rows.iter().all(|r| r.color == "Red"));
        assert!(rows.iter().all(|r| r.url == "https://i.ibb.co/0/img.png"));
    }

    #[test]
    fn child_fields_are_per_size() {
        let rows = expand(&records(1), &config(&["S", "M"]));

        assert_eq!(rows[0].child_sku, "HDIE-DESIGN0R-Red-S");
        assert_eq!(rows[1].child_sku, "HDIE-DESIGN0R-Red-M");
        assert_eq!(
            rows[0].product_name,
            "On Coast Design 0 Rainbow Pride Novelty Hoodie, Red, S"
        );
        assert_eq!(
            rows[1].product_name,
            "On Coast Design 0 Rainbow Pride Novelty Hoodie, Red, M"
        );
    }
}
