//! API response types for ImgBB.

use serde::{Deserialize, Serialize};

use crate::client::Error;

/// Body `status` value ImgBB uses for a stored image.
pub const SUCCESS_STATUS: u16 = 200;

/// Parsed upload response.
///
/// Success bodies carry `status`; error bodies carry `status_code` and an
/// `error` object. Older deployments put diagnostics in `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    #[serde(alias = "status_code")]
    pub status: u16,
    #[serde(default)]
    pub data: Option<ImageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_txt: Option<String>,
}

/// Image metadata returned on success (subset of ImgBB's `data` object).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display_url: String,
    #[serde(default)]
    pub url_viewer: String,
    #[serde(default)]
    pub delete_url: String,
}

/// Result of a single upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success { url: String },
    Failure { reason: String },
}

impl RawResponse {
    /// Returns `true` if the body reports a stored image.
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Interprets the response.
    ///
    /// A success status without `data.url` is a protocol violation.
    pub fn outcome(&self) -> Result<UploadOutcome, Error> {
        if !self.is_success() {
            return Ok(UploadOutcome::Failure {
                reason: self.failure_detail(),
            });
        }

        match self.data.as_ref().map(|d| d.url.as_str()) {
            Some(url) if !url.is_empty() => Ok(UploadOutcome::Success {
                url: url.to_string(),
            }),
            _ => Err(Error::Protocol(format!(
                "status {} without data.url",
                self.status
            ))),
        }
    }

    /// Best available diagnostic text for a failed upload.
    pub fn failure_detail(&self) -> String {
        if let Some(text) = self.content.as_ref().map(value_text) {
            return text;
        }
        if let Some(err) = &self.error {
            if let Some(msg) = err.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            return value_text(err);
        }
        self.status_txt
            .clone()
            .unwrap_or_else(|| "no diagnostic content".into())
    }
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
