//! Base64 transport encoding of image bytes.

use std::borrow::Cow;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::UploadError;
use crate::types::{ImageFile, ImageSource};

/// Encodes raw bytes as padded standard base64.
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes base64 produced by [`encode_bytes`].
pub fn decode(text: &str) -> Result<Vec<u8>, UploadError> {
    STANDARD
        .decode(text)
        .map_err(|e| UploadError::Decode(format!("invalid base64: {e}")))
}

/// Returns the image's bytes, reading them from disk for path-backed images.
pub async fn read_image(image: &ImageFile) -> Result<Cow<'_, [u8]>, UploadError> {
    match &image.source {
        ImageSource::Path(path) => tokio::fs::read(path)
            .await
            .map(Cow::Owned)
            .map_err(|source| UploadError::Read {
                path: path.clone(),
                source,
            }),
        ImageSource::Memory(bytes) => Ok(Cow::Borrowed(bytes)),
    }
}

/// Reads and encodes one image.
pub async fn encode_image(image: &ImageFile) -> Result<String, UploadError> {
    let bytes = read_image(image).await?;
    Ok(encode_bytes(&bytes))
}
