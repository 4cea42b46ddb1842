//! Image host trait.
//!
//! `ImageHost` is the seam between the retry logic and the HTTP client.
//! [`wizard_imgbb::Client`] implements it; tests use in-memory mocks.

use std::future::Future;
use std::pin::Pin;

use wizard_imgbb::RawResponse;

use crate::error::UploadError;

/// Boxed future returned by [`ImageHost::upload`].
pub type UploadFuture<'a> = Pin<Box<dyn Future<Output = Result<RawResponse, UploadError>> + Send + 'a>>;

/// Remote host that stores one base64-encoded image per call.
pub trait ImageHost: Send + Sync {
    /// Sends one upload request. Implementations must not retry.
    fn upload<'a>(&'a self, encoded_image: &'a str, api_key: &'a str) -> UploadFuture<'a>;
}

impl ImageHost for wizard_imgbb::Client {
    fn upload<'a>(&'a self, encoded_image: &'a str, api_key: &'a str) -> UploadFuture<'a> {
        Box::pin(async move {
            Ok(wizard_imgbb::Client::upload(self, encoded_image, api_key).await?)
        })
    }
}

impl<H: ImageHost + ?Sized> ImageHost for std::sync::Arc<H> {
    fn upload<'a>(&'a self, encoded_image: &'a str, api_key: &'a str) -> UploadFuture<'a> {
        (**self).upload(encoded_image, api_key)
    }
}
