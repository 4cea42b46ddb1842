//! Data types for the upload flow.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wizard_catalog::UploadedRecord;

/// Upload attempts per image before it is given up.
pub const MAX_ATTEMPTS: u32 = 5;

/// Where an image's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Read from disk on every attempt.
    Path(PathBuf),
    /// Already in memory (e.g. received from an upload form).
    Memory(Vec<u8>),
}

/// A named image to upload. The name is the identity within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub source: ImageSource,
}

impl ImageFile {
    /// Image backed by a file; the name is the file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            source: ImageSource::Path(path),
        }
    }

    /// Image backed by an in-memory buffer.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: ImageSource::Memory(bytes),
        }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            ImageSource::Path(p) => Some(p),
            ImageSource::Memory(_) => None,
        }
    }
}

/// Per-image retry bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Pause between a failed attempt and the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            delay: Duration::ZERO,
        }
    }
}

/// Config passed to the upload orchestrator.
#[derive(Clone)]
pub struct UploadConfig {
    pub api_key: String,
    pub retry: RetryPolicy,
    /// Images uploaded at the same time. `1` uploads strictly in order.
    pub concurrency: usize,
}

impl UploadConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            retry: RetryPolicy::default(),
            concurrency: 1,
        }
    }
}

impl fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadConfig")
            .field("api_key", &"<redacted>")
            .field("retry", &self.retry)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

/// Progress event emitted during a batch.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// First attempt for an image is about to start.
    Started { index: usize, filename: String },
    /// One attempt failed; another may follow.
    AttemptFailed {
        filename: String,
        attempt: u32,
        max_attempts: u32,
        error: String,
    },
    /// Image stored on the host.
    Succeeded {
        filename: String,
        url: String,
        attempts: u32,
    },
    /// Every attempt failed; the image is left out of the result.
    Exhausted { filename: String, attempts: u32 },
    /// Batch was cancelled before this image finished.
    Skipped { filename: String },
    /// Batch finished.
    Finished(BatchSummary),
}

/// Counts and timing for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }

    /// Fraction of images uploaded; `0.0` for an empty batch.
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.attempted as f64
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn is_complete(&self) -> bool {
        self.succeeded == self.attempted
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed.as_secs_f64();
        write!(
            f,
            "Uploaded {}/{} images in {}m{}s",
            self.succeeded,
            self.attempted,
            (secs / 60.0).floor(),
            (secs % 60.0).round()
        )
    }
}

/// Result of [`UploadOrchestrator::run`](crate::UploadOrchestrator::run).
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Uploaded images, in input order.
    pub records: Vec<UploadedRecord>,
    pub summary: BatchSummary,
}
