//! Records flowing through the catalog pipeline.

use serde::{Deserialize, Serialize};

/// An image that made it to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedRecord {
    pub filename: String,
    pub url: String,
}

impl UploadedRecord {
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
        }
    }
}

/// One sellable size/color combination.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRow {
    pub filename: String,
    pub url: String,
    pub parent_sku: String,
    pub color: String,
    pub size: String,
    pub child_sku: String,
    pub product_name: String,
}

impl VariantRow {
    /// Column names, in serialization order.
    pub const COLUMNS: [&'static str; 7] = [
        "filename",
        "url",
        "parent_sku",
        "color",
        "size",
        "child_sku",
        "product_name",
    ];

    /// Field values in [`COLUMNS`](Self::COLUMNS) order.
    pub fn values(&self) -> [&str; 7] {
        [
            self.filename.as_str(),
            self.url.as_str(),
            self.parent_sku.as_str(),
            self.color.as_str(),
            self.size.as_str(),
            self.child_sku.as_str(),
            self.product_name.as_str(),
        ]
    }
}
