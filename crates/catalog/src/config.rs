//! Catalog naming configuration.

use serde::{Deserialize, Serialize};

/// Apparel sizes offered by default, in listing order.
pub const DEFAULT_SIZES: [&str; 8] = ["S", "M", "L", "XL", "2XL", "3XL", "4XL", "5XL"];

/// Default product name prefix (the store brand).
pub const DEFAULT_PRODUCT_NAME_PREFIX: &str = "On Coast";

/// Default number of filename characters used in the parent SKU.
pub const DEFAULT_CHILD_SKU_CHARS: usize = 8;

/// Errors for configurations that cannot produce a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("size list is empty")]
    EmptySizeList,

    #[error("size list contains a blank entry")]
    BlankSize,

    #[error("child SKU character count must be at least 1")]
    ZeroChildSkuChars,
}

/// Naming inputs read once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub parent_sku_prefix: String,
    pub product_name_prefix: String,
    pub product_name_append: String,
    /// Sizes in listing order. Position decides row order in the output.
    pub sizes: Vec<String>,
    pub child_sku_chars: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            parent_sku_prefix: String::new(),
            product_name_prefix: DEFAULT_PRODUCT_NAME_PREFIX.into(),
            product_name_append: String::new(),
            sizes: DEFAULT_SIZES.iter().map(|s| (*s).to_string()).collect(),
            child_sku_chars: DEFAULT_CHILD_SKU_CHARS,
        }
    }
}

impl CatalogConfig {
    /// Checks the preconditions of the catalog pipeline.
    ///
    /// Sizes are trimmed and repeated sizes collapse onto their first
    /// occurrence, so each size maps to exactly one position.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.child_sku_chars == 0 {
            return Err(ConfigError::ZeroChildSkuChars);
        }

        let mut sizes: Vec<String> = Vec::with_capacity(self.sizes.len());
        for size in &self.sizes {
            let size = size.trim();
            if size.is_empty() {
                return Err(ConfigError::BlankSize);
            }
            if !sizes.iter().any(|s| s == size) {
                sizes.push(size.to_string());
            }
        }
        if sizes.is_empty() {
            return Err(ConfigError::EmptySizeList);
        }

        self.sizes = sizes;
        Ok(self)
    }

    /// Position of `size` in the configured list.
    pub fn size_index(&self, size: &str) -> Option<usize> {
        self.sizes.iter().position(|s| s == size)
    }
}
