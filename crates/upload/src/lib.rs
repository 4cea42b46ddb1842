//! Batch image upload: scan, encode, upload with retry, aggregate.
//!
//! This crate implements the upload side of the product wizard. It is a
//! library crate with no UI dependencies. Front ends hand it a list of
//! [`ImageFile`]s and an [`UploadConfig`] and get back the images that made
//! it to the host plus a [`BatchSummary`].
//!
//! # Pipeline
//!
//! 1. **Scan**: list `.png`/`.jpg`/`.jpeg` files in a directory
//! 2. **Encode**: read the image bytes and base64-encode them
//! 3. **Upload**: post to the [`ImageHost`], retrying each image up to
//!    [`MAX_ATTEMPTS`] times
//! 4. **Aggregate**: keep successes, count failures, time the batch

pub mod encoder;
pub mod error;
pub mod host;
pub mod orchestrator;
pub mod scanner;
pub mod types;

pub use encoder::{decode, encode_bytes, encode_image};
pub use error::UploadError;
pub use host::{ImageHost, UploadFuture};
pub use orchestrator::UploadOrchestrator;
pub use scanner::{is_supported_image, scan_images};
pub use types::{
    BatchReport, BatchSummary, ImageFile, ImageSource, MAX_ATTEMPTS, RetryPolicy, UploadConfig,
    UploadEvent,
};
