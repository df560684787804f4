use std::{
    sync::atomic::{AtomicBool, Ordering},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::notifier::Notifier;

pub const CONTACT_SENT_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const CONTACT_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Delivers a submitted contact form. Field validation happens upstream.
#[async_trait]
pub trait ContactSender: Send + Sync {
    async fn send(&self, form: &ContactForm) -> anyhow::Result<()>;
}

/// Pretends to deliver the form after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedSender {
    delay: Duration,
}

impl SimulatedSender {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSender {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

#[async_trait]
impl ContactSender for SimulatedSender {
    async fn send(&self, _form: &ContactForm) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Delivered; the host should reset the form fields.
    Sent,
    Failed,
    /// A previous submission is still in flight.
    Busy,
}

/// Re-enables submission when dropped, including when the awaiting future
/// is abandoned mid-send.
struct SubmittingFlag<'a>(&'a AtomicBool);

impl Drop for SubmittingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ContactFormHandler {
    sender: Arc<dyn ContactSender>,
    notifier: Notifier,
    submitting: AtomicBool,
}

impl ContactFormHandler {
    pub fn new(sender: Arc<dyn ContactSender>, notifier: Notifier) -> Self {
        Self {
            sender,
            notifier,
            submitting: AtomicBool::new(false),
        }
    }

    /// Whether the submit button is currently disabled.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub async fn submit(&self, form: &ContactForm) -> SubmitOutcome {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            info!("contact: submission already in flight");
            return SubmitOutcome::Busy;
        }
        let _submitting = SubmittingFlag(&self.submitting);

        match self.sender.send(form).await {
            Ok(()) => {
                info!(subject = %form.subject, "contact: message sent");
                self.notifier.success(CONTACT_SENT_MESSAGE);
                SubmitOutcome::Sent
            }
            Err(err) => {
                warn!(error = %err, "contact: send failed");
                self.notifier.error(CONTACT_FAILED_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/contact_tests.rs"]
mod tests;
