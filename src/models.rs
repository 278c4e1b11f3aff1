//! Data models for fetched articles and the digest built from them.
//!
//! - [`Article`]: an article as returned by the news search provider
//! - [`ArticleSummary`]: one summarized entry of the digest
//! - [`Digest`]: everything a single run publishes

use chrono::{DateTime, Local};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Estimated reading time per summarized article, in minutes.
pub const MINUTES_PER_ARTICLE: usize = 2;

/// A news article as fetched, before summarization.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Article {
    pub title: String,
    /// Article body, or the provider description when the body was cut short.
    pub content: String,
    pub url: String,
    /// Display name of the publishing outlet.
    pub source: String,
    /// Publication timestamp as reported by the provider.
    pub published: String,
}

/// A summarized article, ready for rendering.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleSummary {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
}

impl ArticleSummary {
    pub fn new(article: &Article, summary: String) -> Self {
        Self {
            title: article.title.clone(),
            summary,
            url: article.url.clone(),
            source: article.source.clone(),
        }
    }
}

/// The output of one run: every summarized article and when it was made.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Digest {
    pub generated_at: DateTime<Local>,
    pub items: Vec<ArticleSummary>,
}

impl Digest {
    pub fn new(generated_at: DateTime<Local>, items: Vec<ArticleSummary>) -> Self {
        Self {
            generated_at,
            items,
        }
    }

    pub fn article_count(&self) -> usize {
        self.items.len()
    }

    /// Number of distinct outlets in the digest.
    pub fn source_count(&self) -> usize {
        self.items.iter().map(|item| item.source.as_str()).unique().count()
    }

    pub fn read_minutes(&self) -> usize {
        self.items.len() * MINUTES_PER_ARTICLE
    }
}
