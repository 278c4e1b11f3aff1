//! # News Digest
//!
//! Library side of the `news_digest` binary: article fetching, summarization,
//! rendering, and delivery. The summarizer is usable on its own:
//!
//! ```ignore
//! use news_digest::summarizer::{clean, extractive_summary};
//!
//! let text = clean("[+150 chars]The cat sat. The cat slept on the mat. Dogs barked.");
//! let summary = extractive_summary(&text, 2);
//! ```

pub mod cli;
pub mod config;
pub mod fetcher;
pub mod mailer;
pub mod models;
pub mod outputs;
pub mod summarizer;
pub mod utils;
