//! Outbound email behind a trait seam.
//!
//! Production uses `SmtpNotifier` (lettre async SMTP over STARTTLS).
//! Tests substitute a recording fake. Carried in `AppState` as
//! `Arc<dyn Notifier>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::errors::AppError;
use crate::models::contact::Contact;

/// A rendered email ready for dispatch.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), AppError>;
}

/// SMTP relay notifier. The configured account doubles as the From address.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpNotifier {
    pub fn new(host: &str, user: &str, pass: &str) -> Result<Self, AppError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| AppError::Mail(format!("invalid SMTP relay '{host}': {e}")))?
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            .build();
        Ok(SmtpNotifier {
            transport,
            from: user.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), AppError> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| AppError::Mail(format!("invalid From address: {e}")))?,
            )
            .to(email
                .to
                .parse()
                .map_err(|e| AppError::Mail(format!("invalid To address: {e}")))?)
            .subject(&email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| AppError::Mail(format!("failed to build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;

        tracing::info!(to = %email.to, "notification email sent");
        Ok(())
    }
}

/// Renders the contact-form notification email for `recipient`.
/// Line breaks in the message become `<br>` in the HTML body.
pub fn contact_notification(contact: &Contact, recipient: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: recipient.to_string(),
        subject: format!("New Contact Form Submission: {}", contact.subject),
        html_body: render_contact_body(contact, contact.created_at),
    }
}

fn render_contact_body(contact: &Contact, submitted_at: DateTime<Utc>) -> String {
    format!(
        r#"<h2>New Contact Form Submission</h2>
<p><strong>Name:</strong> {name}</p>
<p><strong>Email:</strong> {email}</p>
<p><strong>Subject:</strong> {subject}</p>
<p><strong>Message:</strong></p>
<p>{message}</p>
<p><strong>Submitted At:</strong> {submitted_at}</p>
"#,
        name = contact.name,
        email = contact.email,
        subject = contact.subject,
        message = contact.message.replace('\n', "<br>"),
        submitted_at = submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}
