//! Contact-form submissions: persist, then notify by email.
//!
//! A submission only counts as successful when both steps succeed. A failed
//! send leaves the stored record in place and reports the request as failed;
//! there is no rollback and no retry.

use std::sync::Arc;

use uuid::Uuid;

use crate::errors::AppError;
use crate::mailer::{contact_notification, Notifier};
use crate::models::contact::{Contact, ContactInput};
use crate::storage::ContactStore;

#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
    notifier: Arc<dyn Notifier>,
    recipient: String,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>, notifier: Arc<dyn Notifier>, recipient: String) -> Self {
        Self {
            store,
            notifier,
            recipient,
        }
    }

    pub async fn create(&self, input: ContactInput) -> Result<Uuid, AppError> {
        input.validate()?;

        let contact = Contact::new(input);
        self.store.insert(&contact).await?;

        let email = contact_notification(&contact, &self.recipient);
        self.notifier.send(&email).await?;

        tracing::info!(id = %contact.id, "contact form submitted");
        Ok(contact.id)
    }

    pub async fn list(&self) -> Result<Vec<Contact>, AppError> {
        self.store.list().await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::mailer::fake::RecordingNotifier;
    use crate::storage::memory::InMemoryContactStore;

    fn input() -> ContactInput {
        ContactInput {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            subject: "Hi".to_string(),
            message: "line1\nline2".to_string(),
        }
    }

    fn service(
        notifier: RecordingNotifier,
    ) -> (ContactService, Arc<InMemoryContactStore>, Arc<RecordingNotifier>) {
        let store = Arc::new(InMemoryContactStore::default());
        let notifier = Arc::new(notifier);
        let service = ContactService::new(
            store.clone(),
            notifier.clone(),
            "admin@example.com".to_string(),
        );
        (service, store, notifier)
    }

    #[tokio::test]
    async fn test_create_persists_record_and_sends_email() {
        let (service, store, notifier) = service(RecordingNotifier::default());

        service.create(input()).await.unwrap();

        let stored = store.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "A");
        assert_eq!(stored[0].email, "a@x.com");
        assert_eq!(stored[0].subject, "Hi");
        assert_eq!(stored[0].message, "line1\nline2");

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "admin@example.com");
        assert_eq!(sent[0].subject, "New Contact Form Submission: Hi");
        assert!(sent[0].html_body.contains("line1<br>line2"));
    }

    #[tokio::test]
    async fn test_mail_failure_fails_request_but_record_remains() {
        let (service, store, _notifier) = service(RecordingNotifier::failing());

        let err = service.create(input()).await.unwrap_err();
        assert!(matches!(err, AppError::Mail(_)));
        // Accepted inconsistency: the record was persisted before the send.
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_persists_nothing_and_sends_nothing() {
        let (service, store, notifier) = service(RecordingNotifier::default());

        let mut bad = input();
        bad.message.clear();
        let err = service.create(bad).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.len(), 0);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let (service, store, _notifier) = service(RecordingNotifier::default());
        let base = Utc::now();
        for (subject, age_minutes) in [("old", 30), ("newest", 0), ("middle", 10)] {
            let mut contact = Contact::new(ContactInput {
                subject: subject.to_string(),
                ..input()
            });
            contact.created_at = base - Duration::minutes(age_minutes);
            store.insert(&contact).await.unwrap();
        }

        let listed = service.list().await.unwrap();
        let subjects: Vec<&str> = listed.iter().map(|c| c.subject.as_str()).collect();
        assert_eq!(subjects, ["newest", "middle", "old"]);
    }
}
