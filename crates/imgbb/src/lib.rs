//! ImgBB API client for image uploads.
//!
//! Provides an async client for the [ImgBB](https://api.imgbb.com) upload
//! endpoint. Images are sent base64-encoded in a form body together with the
//! account API key; the JSON response is returned as a [`RawResponse`] and
//! interpreted with [`RawResponse::outcome`].

pub mod client;
pub mod types;

pub use client::{Client, Error};
pub use types::{ImageInfo, RawResponse, SUCCESS_STATUS, UploadOutcome};
