//! Copy-to-clipboard actions with a short-lived "copied" acknowledgement.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long a copy button shows its acknowledgement.
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
#[error("Clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Write-only clipboard access. Implemented by `MemoryClipboard` for the HTTP
/// layer and by failing doubles in tests.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Holds whatever was written last. The copy handler returns this text to the
/// browser, which performs the real clipboard write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    last: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn last(&self) -> Option<String> {
        self.last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self
            .last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(text.to_string());
        Ok(())
    }
}

/// What a copy button on the hiring screen copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CopyTarget {
    JobDescription,
    Scorecard,
    NextStepsEmail,
    RejectionEmail,
    OnboardingPlan,
}

impl CopyTarget {
    pub const ALL: [CopyTarget; 5] = [
        CopyTarget::JobDescription,
        CopyTarget::Scorecard,
        CopyTarget::NextStepsEmail,
        CopyTarget::RejectionEmail,
        CopyTarget::OnboardingPlan,
    ];
}

/// Acknowledgement state of one copy button.
///
/// Each copy restarts the timer; only the most recent copy's timer clears the flag.
/// Must be used inside a tokio runtime.
#[derive(Debug, Default)]
pub struct CopyButton {
    copied: Arc<AtomicBool>,
    presses: Arc<AtomicU64>,
}

impl CopyButton {
    pub fn copy(&self, clipboard: &dyn Clipboard, text: &str) -> Result<(), ClipboardError> {
        clipboard.write_text(text)?;

        self.copied.store(true, Ordering::SeqCst);
        let press = self.presses.fetch_add(1, Ordering::SeqCst) + 1;

        let copied = Arc::clone(&self.copied);
        let presses = Arc::clone(&self.presses);
        tokio::spawn(async move {
            tokio::time::sleep(COPY_ACK_DURATION).await;
            if presses.load(Ordering::SeqCst) == press {
                copied.store(false, Ordering::SeqCst);
            }
        });
        Ok(())
    }

    pub fn copied(&self) -> bool {
        self.copied.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError("denied".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_writes_text_and_acknowledges_for_two_seconds() {
        let clipboard = MemoryClipboard::default();
        let button = CopyButton::default();

        button.copy(&clipboard, "Role: X").unwrap();
        assert_eq!(clipboard.last().as_deref(), Some("Role: X"));
        assert!(button.copied());

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(button.copied());

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(!button.copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_copy_extends_acknowledgement() {
        let clipboard = MemoryClipboard::default();
        let button = CopyButton::default();

        button.copy(&clipboard, "first").unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        button.copy(&clipboard, "second").unwrap();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        tokio::task::yield_now().await;
        assert!(button.copied(), "first timer must not clear the second copy");
        assert_eq!(clipboard.last().as_deref(), Some("second"));

        tokio::time::sleep(Duration::from_millis(1001)).await;
        tokio::task::yield_now().await;
        assert!(!button.copied());
    }

    #[tokio::test]
    async fn test_failed_write_does_not_acknowledge() {
        let button = CopyButton::default();
        assert!(button.copy(&BrokenClipboard, "text").is_err());
        assert!(!button.copied());
    }
}
