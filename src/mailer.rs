//! SMTP delivery of the email digest.
//!
//! Connects with STARTTLS and logs in with the sender address. One message is
//! sent per recipient so that recipients do not see each other.

use crate::config::MailSettings;
use chrono::{DateTime, Local};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::error::Error;
use tracing::{info, instrument};

/// Sends digest emails through an authenticated SMTP relay.
pub struct EmailSender {
    from: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl std::fmt::Debug for EmailSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSender")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

impl EmailSender {
    /// Build a sender for `settings`. No connection is made until the first
    /// message is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay cannot be configured for STARTTLS.
    pub fn new(settings: &MailSettings) -> Result<Self, Box<dyn Error>> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.server)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.address.clone(),
                settings.password.clone(),
            ))
            .build();
        Ok(Self {
            from: settings.address.clone(),
            transport,
        })
    }

    /// Build the HTML digest message for one recipient.
    pub fn build_message(
        &self,
        recipient: &str,
        digest_html: &str,
        sent_at: &DateTime<Local>,
    ) -> Result<Message, Box<dyn Error>> {
        let message = Message::builder()
            .from(self.from.parse()?)
            .to(recipient.parse()?)
            .subject(subject(sent_at))
            .header(ContentType::TEXT_HTML)
            .body(digest_html.to_string())?;
        Ok(message)
    }

    /// Send the digest to `recipient`.
    #[instrument(level = "info", skip(self, digest_html))]
    pub async fn send_digest(
        &self,
        recipient: &str,
        digest_html: &str,
    ) -> Result<(), Box<dyn Error>> {
        let message = self.build_message(recipient, digest_html, &Local::now())?;
        self.transport.send(message).await?;
        info!("Email sent");
        Ok(())
    }
}

/// `📰 Daily News Digest - YYYY-MM-DD`
pub fn subject(at: &DateTime<Local>) -> String {
    format!("📰 Daily News Digest - {}", at.format("%Y-%m-%d"))
}
