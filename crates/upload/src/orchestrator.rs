//! Upload orchestrator with bounded per-image retry.
//!
//! Drives encode + upload over a batch of images. Each image gets up to
//! `max_attempts` tries; an image that never succeeds is dropped from the
//! result and the batch carries on. Nothing in the batch raises.

use std::time::Instant;

use futures_util::StreamExt;
use futures_util::stream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use wizard_catalog::UploadedRecord;
use wizard_imgbb::UploadOutcome;

use crate::encoder::encode_image;
use crate::error::UploadError;
use crate::host::ImageHost;
use crate::types::{BatchReport, BatchSummary, ImageFile, UploadConfig, UploadEvent};

/// Where one image stands in its retry loop.
#[derive(Debug)]
enum ItemState {
    Pending,
    Attempting(u32),
    Succeeded { record: UploadedRecord, attempts: u32 },
    ExhaustedFailed { attempts: u32 },
    Cancelled,
}

/// Uploads batches of images to an [`ImageHost`].
pub struct UploadOrchestrator<H> {
    host: H,
    events_tx: mpsc::UnboundedSender<UploadEvent>,
    events_rx: Option<mpsc::UnboundedReceiver<UploadEvent>>,
    cancel: CancellationToken,
}

impl<H: ImageHost> UploadOrchestrator<H> {
    /// Creates a new orchestrator over `host`.
    pub fn new(host: H) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            host,
            events_tx,
            events_rx: Some(events_rx),
            cancel: CancellationToken::new(),
        }
    }

    /// Takes the event receiver. Can only be called once.
    ///
    /// The channel closes when the orchestrator is dropped.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<UploadEvent>> {
        self.events_rx.take()
    }

    /// Returns a cancellation token for this orchestrator.
    ///
    /// Cancelling stops new attempts; images already uploaded are kept.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Uploads every image and returns the successes in input order.
    ///
    /// With `config.concurrency > 1` several images are in flight at once;
    /// retries for one image always stay sequential.
    pub async fn run(&self, images: Vec<ImageFile>, config: &UploadConfig) -> BatchReport {
        let started = Instant::now();
        let total = images.len();
        let concurrency = config.concurrency.max(1);

        info!(
            images = total,
            concurrency,
            max_attempts = config.retry.max_attempts,
            "upload batch started"
        );

        let mut slots: Vec<Option<UploadedRecord>> = (0..total).map(|_| None).collect();
        let mut uploads = stream::iter(images.iter().enumerate())
            .map(|(index, image)| async move { (index, self.upload_one(index, image, config).await) })
            .buffer_unordered(concurrency);

        while let Some((index, record)) = uploads.next().await {
            slots[index] = record;
        }
        drop(uploads);

        let records: Vec<UploadedRecord> = slots.into_iter().flatten().collect();
        let summary = BatchSummary {
            attempted: total,
            succeeded: records.len(),
            elapsed: started.elapsed(),
        };

        if summary.is_complete() {
            info!(
                attempted = summary.attempted,
                succeeded = summary.succeeded,
                elapsed_secs = summary.elapsed_seconds(),
                "{summary}"
            );
        } else {
            warn!(
                attempted = summary.attempted,
                succeeded = summary.succeeded,
                failed = summary.failed(),
                elapsed_secs = summary.elapsed_seconds(),
                "{summary}"
            );
        }
        let _ = self.events_tx.send(UploadEvent::Finished(summary));

        BatchReport { records, summary }
    }

    /// Runs the retry loop for one image.
    async fn upload_one(
        &self,
        index: usize,
        image: &ImageFile,
        config: &UploadConfig,
    ) -> Option<UploadedRecord> {
        let max_attempts = config.retry.max_attempts.max(1);
        let mut state = ItemState::Pending;

        loop {
            state = match state {
                ItemState::Pending => {
                    if self.cancel.is_cancelled() {
                        ItemState::Cancelled
                    } else {
                        info!(file = %image.name, "upload start");
                        self.emit(UploadEvent::Started {
                            index,
                            filename: image.name.clone(),
                        });
                        ItemState::Attempting(1)
                    }
                }

                ItemState::Attempting(attempt) => match self.attempt(image, &config.api_key).await {
                    Ok(url) => ItemState::Succeeded {
                        record: UploadedRecord::new(image.name.clone(), url),
                        attempts: attempt,
                    },
                    Err(UploadError::Cancelled) => ItemState::Cancelled,
                    Err(err) => {
                        warn!(
                            file = %image.name,
                            attempt,
                            max_attempts,
                            error = %err,
                            "upload attempt failed"
                        );
                        self.emit(UploadEvent::AttemptFailed {
                            filename: image.name.clone(),
                            attempt,
                            max_attempts,
                            error: err.to_string(),
                        });

                        if attempt >= max_attempts {
                            ItemState::ExhaustedFailed { attempts: attempt }
                        } else if self.pause(config).await.is_err() {
                            ItemState::Cancelled
                        } else {
                            debug!(file = %image.name, next = attempt + 1, "retrying");
                            ItemState::Attempting(attempt + 1)
                        }
                    }
                },

                ItemState::Succeeded { record, attempts } => {
                    info!(file = %image.name, attempts, url = %record.url, "upload succeeded");
                    self.emit(UploadEvent::Succeeded {
                        filename: record.filename.clone(),
                        url: record.url.clone(),
                        attempts,
                    });
                    return Some(record);
                }

                ItemState::ExhaustedFailed { attempts } => {
                    error!(file = %image.name, attempts, "final attempt failed, skipping image");
                    self.emit(UploadEvent::Exhausted {
                        filename: image.name.clone(),
                        attempts,
                    });
                    return None;
                }

                ItemState::Cancelled => {
                    warn!(file = %image.name, "upload cancelled");
                    self.emit(UploadEvent::Skipped {
                        filename: image.name.clone(),
                    });
                    return None;
                }
            };
        }
    }

    /// One encode + upload round trip, yielding the hosted URL.
    async fn attempt(&self, image: &ImageFile, api_key: &str) -> Result<String, UploadError> {
        if self.cancel.is_cancelled() {
            return Err(UploadError::Cancelled);
        }

        let encoded = encode_image(image).await?;
        let response = self.host.upload(&encoded, api_key).await?;

        match response.outcome()? {
            UploadOutcome::Success { url } => Ok(url),
            UploadOutcome::Failure { reason } => Err(UploadError::HostRejected {
                status: response.status,
                detail: reason,
            }),
        }
    }

    /// Waits out the retry delay. Fails if the batch was cancelled.
    async fn pause(&self, config: &UploadConfig) -> Result<(), UploadError> {
        if config.retry.delay.is_zero() {
            return if self.cancel.is_cancelled() {
                Err(UploadError::Cancelled)
            } else {
                Ok(())
            };
        }

        tokio::select! {
            _ = self.cancel.cancelled() => Err(UploadError::Cancelled),
            _ = tokio::time::sleep(config.retry.delay) => Ok(()),
        }
    }

    fn emit(&self, event: UploadEvent) {
        // Nobody listening is fine.
        let _ = self.events_tx.send(event);
    }
}
