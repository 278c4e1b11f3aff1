//! # News Digest
//!
//! Fetches recent news on configured topics, summarizes every article, and
//! publishes the result as an HTML report, an email digest, and a plain-text
//! backup.
//!
//! ## Usage
//!
//! ```sh
//! news_digest -p user_preferences.json -o ./digests
//! ```
//!
//! ## Architecture
//!
//! The application runs once, one article at a time:
//! 1. **Fetching**: query the news search API once per topic
//! 2. **Summarizing**: model summary when available, otherwise extractive
//!    (see `news_digest::summarizer`)
//! 3. **Output**: HTML report, email digest, text backup, optional JSON

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use news_digest::cli::Cli;
use news_digest::config::{MailSettings, Preferences};
use news_digest::fetcher::NewsFetcher;
use news_digest::mailer::EmailSender;
use news_digest::models::{Article, ArticleSummary, Digest};
use news_digest::outputs::{email, html, json, text};
use news_digest::summarizer::{ModelSummarizer, Summarizer, SummaryProvider};
use news_digest::utils::ensure_writable_dir;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let dotenv = dotenvy::dotenv();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_digest starting up");
    match &dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env loaded"),
    }

    let args = Cli::parse();
    debug!(?args.preferences, ?args.output_dir, ?args.json_output_dir, "Parsed CLI arguments");

    // Early check: ensure the output dir is writable before any network work
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let preferences = Preferences::load(&args.preferences).await?;

    // ---- Fetch ----
    let fetcher = NewsFetcher::new(args.news_api_key.clone())?;
    let articles = fetcher
        .get_articles(
            &preferences.topics,
            preferences.sources.as_deref(),
            preferences.max_articles,
        )
        .await;
    info!(count = articles.len(), "Fetched articles");

    // ---- Summarize ----
    let model = if args.no_model {
        info!("Model disabled; using extractive summaries");
        None
    } else {
        match ModelSummarizer::load(&args.template).await {
            Ok(model) => Some(model),
            Err(e) => {
                warn!(error = %e, "Model unavailable; using extractive summaries");
                None
            }
        }
    };
    let summarizer = Summarizer::new(model);
    let items = summarize_articles(&summarizer, &articles).await;
    let digest = Digest::new(Local::now(), items);

    // ---- HTML report ----
    match html::write_report(&digest, &args.output_dir).await {
        Ok(path) => info!(path = %path.display(), "Report generated"),
        Err(e) => error!(error = %e, "Failed to write HTML report"),
    }

    // ---- Email ----
    if args.no_email || !preferences.send_email {
        info!("Email digest disabled");
    } else {
        send_digest_emails(&args, &preferences, &digest).await;
    }

    // ---- Text backup ----
    if let Err(e) = text::write_text_backup(&digest, &args.output_dir).await {
        error!(error = %e, "Failed to write text backup");
    }

    // ---- JSON export ----
    if let Some(json_dir) = &args.json_output_dir {
        if let Err(e) = json::write_digest(&digest, json_dir).await {
            error!(error = %e, "Failed to write JSON digest");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = digest.article_count(),
        sources = digest.source_count(),
        "Digest completed"
    );

    Ok(())
}

/// Summarize each article in turn.
#[instrument(
    level = "info",
    skip_all,
    fields(count = articles.len(), model = summarizer.has_provider())
)]
async fn summarize_articles<P: SummaryProvider>(
    summarizer: &Summarizer<P>,
    articles: &[Article],
) -> Vec<ArticleSummary> {
    let mut items = Vec::with_capacity(articles.len());
    for (i, article) in articles.iter().enumerate() {
        debug!(index = i, source = %article.source, "Summarizing article");
        let summary = summarizer.summarize(&article.content).await;
        items.push(ArticleSummary::new(article, summary));
    }
    info!(count = items.len(), "Summarized articles");
    items
}

/// Email the digest to every recipient. Failures are logged per recipient.
#[instrument(level = "info", skip_all, fields(recipients = preferences.email_recipients.len()))]
async fn send_digest_emails(args: &Cli, preferences: &Preferences, digest: &Digest) {
    if preferences.email_recipients.is_empty() {
        info!("No email recipients configured");
        return;
    }
    let Some(settings) = MailSettings::from_cli(args) else {
        warn!("EMAIL_ADDRESS or EMAIL_PASSWORD not set; skipping email digest");
        return;
    };
    let sender = match EmailSender::new(&settings) {
        Ok(sender) => sender,
        Err(e) => {
            error!(server = %settings.server, error = %e, "Email sending failed");
            return;
        }
    };

    let body = email::render_email(digest);
    let mut sent = 0usize;
    for recipient in &preferences.email_recipients {
        match sender.send_digest(recipient, &body).await {
            Ok(()) => sent += 1,
            Err(e) => error!(%recipient, error = %e, "Email error"),
        }
    }
    info!(
        sent,
        failed = preferences.email_recipients.len() - sent,
        "Email digest delivered"
    );
}
