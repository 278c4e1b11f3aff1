//! Command-line interface definitions for News Digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Secrets come from environment variables (a `.env` file in the working
//! directory is loaded first), everything else from flags.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the News Digest application.
///
/// # Examples
///
/// ```sh
/// # Fetch, summarize, write the report, and email it
/// NEWS_API_KEY=... EMAIL_ADDRESS=... EMAIL_PASSWORD=... news_digest
///
/// # Extractive summaries only, no email, output to ./out
/// news_digest --no-model --no-email -o ./out
///
/// # Also export the digest as JSON
/// news_digest -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the user preferences JSON file
    #[arg(short, long, default_value = "user_preferences.json")]
    pub preferences: PathBuf,

    /// Output directory for the HTML report and text backup
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Optional output directory for a JSON export of the digest
    #[arg(short, long)]
    pub json_output_dir: Option<PathBuf>,

    /// awful_aj chat template used for model summaries
    #[arg(long, default_value = "news_summarizer")]
    pub template: String,

    /// Skip the model and summarize extractively
    #[arg(long)]
    pub no_model: bool,

    /// Do not send the email digest, whatever the preferences say
    #[arg(long)]
    pub no_email: bool,

    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: String,

    /// Sender address, also used as the SMTP login
    #[arg(long, env = "EMAIL_ADDRESS")]
    pub email_address: Option<String>,

    /// SMTP password
    #[arg(long, env = "EMAIL_PASSWORD", hide_env_values = true)]
    pub email_password: Option<String>,

    /// SMTP server host
    #[arg(long, env = "SMTP_SERVER", default_value = "smtp.gmail.com")]
    pub smtp_server: String,

    /// SMTP submission port (STARTTLS)
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,
}
