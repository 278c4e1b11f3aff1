//! User preferences and mail settings.
//!
//! Preferences are a small JSON file next to the binary:
//!
//! ```json
//! {
//!   "topics": ["climate", "open source"],
//!   "max_articles": 10,
//!   "sources": ["bbc-news"],
//!   "send_email": true,
//!   "email_recipients": ["me@example.com"]
//! }
//! ```
//!
//! Only `topics` is required.

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

fn default_max_articles() -> usize {
    10
}

fn default_send_email() -> bool {
    true
}

/// What to fetch and who gets the digest.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Preferences {
    /// Search queries, one request per topic.
    pub topics: Vec<String>,
    /// Upper bound on articles across all topics.
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
    /// Optional NewsAPI source identifiers to restrict the search to.
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default = "default_send_email")]
    pub send_email: bool,
    #[serde(default)]
    pub email_recipients: Vec<String>,
}

impl Preferences {
    /// Read and parse the preferences file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw = fs::read_to_string(path).await?;
        let preferences: Preferences = serde_json::from_str(&raw)?;
        info!(
            topics = preferences.topics.len(),
            max_articles = preferences.max_articles,
            recipients = preferences.email_recipients.len(),
            "Loaded preferences"
        );
        Ok(preferences)
    }
}

/// SMTP submission settings.
#[derive(Clone)]
pub struct MailSettings {
    pub server: String,
    pub port: u16,
    /// Sender address and SMTP login.
    pub address: String,
    pub password: String,
}

impl std::fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailSettings")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl MailSettings {
    /// Mail settings from the CLI, or `None` when the address or password is
    /// missing.
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        let address = cli.email_address.clone().filter(|a| !a.is_empty())?;
        let password = cli.email_password.clone().filter(|p| !p.is_empty())?;
        Some(Self {
            server: cli.smtp_server.clone(),
            port: cli.smtp_port,
            address,
            password,
        })
    }
}
