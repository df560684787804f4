use super::*;
use crate::journal::{SurfaceCall, SurfaceJournal};
use anyhow::anyhow;
use shared::domain::NotificationKind;

struct FailingSender;

#[async_trait]
impl ContactSender for FailingSender {
    async fn send(&self, _form: &ContactForm) -> anyhow::Result<()> {
        Err(anyhow!("smtp relay unavailable"))
    }
}

fn form() -> ContactForm {
    ContactForm {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        subject: "Hello".to_string(),
        message: "Nice portfolio".to_string(),
    }
}

fn shown_kinds(journal: &SurfaceJournal) -> Vec<(NotificationKind, String)> {
    journal
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            SurfaceCall::NotificationShown { kind, message, .. } => Some((kind, message)),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn successful_submission_notifies_and_reenables() {
    let journal = SurfaceJournal::new();
    let handler = ContactFormHandler::new(
        Arc::new(SimulatedSender::default()),
        Notifier::new(Arc::new(journal.clone())),
    );

    assert_eq!(handler.submit(&form()).await, SubmitOutcome::Sent);
    assert!(!handler.is_submitting());
    assert_eq!(
        shown_kinds(&journal),
        [(NotificationKind::Success, CONTACT_SENT_MESSAGE.to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn second_submission_while_in_flight_is_rejected() {
    let journal = SurfaceJournal::new();
    let handler = Arc::new(ContactFormHandler::new(
        Arc::new(SimulatedSender::new(Duration::from_secs(2))),
        Notifier::new(Arc::new(journal.clone())),
    ));

    let first = tokio::spawn({
        let handler = handler.clone();
        async move { handler.submit(&form()).await }
    });
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(handler.is_submitting());
    assert_eq!(handler.submit(&form()).await, SubmitOutcome::Busy);

    assert_eq!(first.await.expect("join"), SubmitOutcome::Sent);
    assert_eq!(shown_kinds(&journal).len(), 1);
}

#[tokio::test]
async fn failed_submission_surfaces_error() {
    let journal = SurfaceJournal::new();
    let handler = ContactFormHandler::new(
        Arc::new(FailingSender),
        Notifier::new(Arc::new(journal.clone())),
    );

    assert_eq!(handler.submit(&form()).await, SubmitOutcome::Failed);
    assert!(!handler.is_submitting());
    assert_eq!(
        shown_kinds(&journal),
        [(NotificationKind::Error, CONTACT_FAILED_MESSAGE.to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn abandoned_submission_reenables_the_form() {
    let journal = SurfaceJournal::new();
    let handler = Arc::new(ContactFormHandler::new(
        Arc::new(SimulatedSender::new(Duration::from_secs(2))),
        Notifier::new(Arc::new(journal.clone())),
    ));

    let abandoned = tokio::spawn({
        let handler = handler.clone();
        async move { handler.submit(&form()).await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(handler.is_submitting());

    abandoned.abort();
    assert!(abandoned.await.expect_err("aborted").is_cancelled());
    assert!(!handler.is_submitting());

    assert_eq!(handler.submit(&form()).await, SubmitOutcome::Sent);
    assert_eq!(shown_kinds(&journal).len(), 1);
}
