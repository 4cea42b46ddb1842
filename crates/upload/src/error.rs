//! Upload error types.

use std::path::PathBuf;

/// Errors produced by a single upload attempt.
///
/// None of these escape [`UploadOrchestrator::run`](crate::UploadOrchestrator::run);
/// they are logged and retried.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed host response: {0}")]
    Decode(String),

    #[error("host rejected upload (status {status}): {detail}")]
    HostRejected { status: u16, detail: String },

    #[error("cancelled")]
    Cancelled,
}

impl From<wizard_imgbb::Error> for UploadError {
    fn from(err: wizard_imgbb::Error) -> Self {
        match err {
            wizard_imgbb::Error::Http(e) => Self::Network(e.to_string()),
            wizard_imgbb::Error::Json(e) => Self::Decode(e.to_string()),
            wizard_imgbb::Error::Protocol(msg) => Self::Decode(msg),
            wizard_imgbb::Error::InvalidKey => Self::HostRejected {
                status: 0,
                detail: "invalid API key".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imgbb_errors_map_to_taxonomy() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            UploadError::from(wizard_imgbb::Error::Json(json_err)),
            UploadError::Decode(_)
        ));
        assert!(matches!(
            UploadError::from(wizard_imgbb::Error::Protocol("no url".into())),
            UploadError::Decode(msg) if msg == "no url"
        ));
        assert!(matches!(
            UploadError::from(wizard_imgbb::Error::InvalidKey),
            UploadError::HostRejected { .. }
        ));
    }

    #[test]
    fn read_error_mentions_path() {
        let err = UploadError::Read {
            path: PathBuf::from("images/missing.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("images/missing.png"), "{msg}");
    }
}
