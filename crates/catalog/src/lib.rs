//! Amazon catalog rows from uploaded product images.
//!
//! Everything in this crate is pure: given `{filename, url}` records and a
//! [`CatalogConfig`], it derives parent/child SKUs, colors and product names,
//! expands each record into one row per configured size, sorts the rows,
//! and renders them as CSV.
//!
//! # Filename convention
//!
//! Words are separated by spaces or hyphens and the last word is the color,
//! e.g. `Zen Ramen Bowl T-Shirt Blue.png` → product `Zen Ramen Bowl T Shirt`,
//! color `Blue`.

pub mod assemble;
pub mod config;
pub mod export;
pub mod sku;
pub mod types;
pub mod variants;

pub use assemble::assemble;
pub use config::{CatalogConfig, ConfigError, DEFAULT_SIZES};
pub use export::{
    DEFAULT_OUTPUT_PREFIX, ExportError, output_file_name, render_table, write_csv, write_csv_file,
};
pub use sku::{child_sku, parent_sku, product_name, split_words, title_case};
pub use types::{UploadedRecord, VariantRow};
pub use variants::expand;
