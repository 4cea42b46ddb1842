//! Terminal progress output for upload events.

use tokio::sync::mpsc;
use wizard_upload::UploadEvent;

/// One progress line for `event`, or `None` for events that print nothing.
pub fn describe(event: &UploadEvent, total: usize) -> Option<String> {
    match event {
        UploadEvent::Started { index, filename } => {
            Some(format!("[{}/{total}] Uploading {filename}...", index + 1))
        }
        UploadEvent::AttemptFailed {
            filename,
            attempt,
            max_attempts,
            error,
        } => Some(format!(
            "  {filename}: attempt {attempt}/{max_attempts} failed: {error}"
        )),
        UploadEvent::Succeeded {
            filename,
            url,
            attempts,
        } => {
            let retries = match *attempts {
                1 => String::new(),
                n => format!(" after {n} attempts"),
            };
            Some(format!("  {filename} -> {url}{retries}"))
        }
        UploadEvent::Exhausted { filename, attempts } => Some(format!(
            "  {filename}: giving up after {attempts} attempts"
        )),
        UploadEvent::Skipped { filename } => Some(format!("  {filename}: skipped")),
        UploadEvent::Finished(_) => None,
    }
}

/// Prints events until the orchestrator drops its sender.
pub async fn print_events(mut rx: mpsc::UnboundedReceiver<UploadEvent>, total: usize) {
    while let Some(event) = rx.recv().await {
        if let Some(line) = describe(&event, total) {
            eprintln!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wizard_upload::BatchSummary;

    #[test]
    fn started_is_one_based() {
        let line = describe(
            &UploadEvent::Started {
                index: 0,
                filename: "Hat Navy.png".into(),
            },
            3,
        );
        assert_eq!(line.as_deref(), Some("[1/3] Uploading Hat Navy.png..."));
    }

    #[test]
    fn success_mentions_retries() {
        let first = UploadEvent::Succeeded {
            filename: "a.png".into(),
            url: "https://i.ibb.co/a.png".into(),
            attempts: 1,
        };
        assert_eq!(
            describe(&first, 1).as_deref(),
            Some("  a.png -> https://i.ibb.co/a.png")
        );

        let retried = UploadEvent::Succeeded {
            filename: "a.png".into(),
            url: "https://i.ibb.co/a.png".into(),
            attempts: 3,
        };
        assert!(describe(&retried, 1).unwrap().ends_with("after 3 attempts"));
    }

    #[test]
    fn failure_lines() {
        let failed = UploadEvent::AttemptFailed {
            filename: "a.png".into(),
            attempt: 2,
            max_attempts: 5,
            error: "network error: timed out".into(),
        };
        assert_eq!(
            describe(&failed, 1).as_deref(),
            Some("  a.png: attempt 2/5 failed: network error: timed out")
        );

        let exhausted = UploadEvent::Exhausted {
            filename: "a.png".into(),
            attempts: 5,
        };
        assert!(describe(&exhausted, 1).unwrap().contains("giving up"));
    }

    #[test]
    fn finished_prints_nothing() {
        let event = UploadEvent::Finished(BatchSummary {
            attempted: 1,
            succeeded: 1,
            elapsed: Duration::ZERO,
        });
        assert!(describe(&event, 1).is_none());
    }
}
