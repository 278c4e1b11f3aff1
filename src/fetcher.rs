//! Article search through the NewsAPI `everything` endpoint.
//!
//! One request is made per topic, restricted to English articles from the
//! last 24 hours and sorted newest first. The per-topic page size splits
//! `max_articles` evenly across topics.
//!
//! NewsAPI truncates `content` on the free tier and appends a marker such as
//! `[+2345 chars]`. When that happens the article `description` is used
//! instead, if there is one.

use crate::models::Article;
use crate::summarizer::clean::has_truncation_marker;
use chrono::{DateTime, Duration, Local};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::Html;
use serde::Deserialize;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use url::Url;

pub const NEWS_API_BASE: &str = "https://newsapi.org/v2";

/// Articles whose content is not longer than this are skipped.
const MIN_CONTENT_CHARS: usize = 100;

/// NewsAPI rejects larger pages.
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<ApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiArticle {
    #[serde(default)]
    source: ApiSource,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSource {
    name: Option<String>,
}

/// Client for the news search API.
#[derive(Debug)]
pub struct NewsFetcher {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsFetcher {
    /// Create a fetcher for the public NewsAPI endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Box<dyn Error>> {
        Self::with_base_url(api_key, NEWS_API_BASE)
    }

    /// Create a fetcher for a NewsAPI-compatible endpoint at `base_url`.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the `everything` search URL for one topic.
    pub fn everything_url(
        &self,
        topic: &str,
        sources: Option<&[String]>,
        page_size: usize,
        since: DateTime<Local>,
    ) -> Result<Url, url::ParseError> {
        let page_size = page_size.to_string();
        let from = since.naive_local().format("%Y-%m-%dT%H:%M:%S").to_string();
        let mut params = vec![
            ("q", topic.to_string()),
            ("apiKey", self.api_key.clone()),
            ("language", "en".to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("pageSize", page_size),
            ("from", from),
        ];
        if let Some(sources) = sources.filter(|s| !s.is_empty()) {
            params.push(("sources", sources.join(",")));
        }
        Url::parse_with_params(&format!("{}/everything", self.base_url), &params)
    }

    /// Fetch up to `max_articles` recent articles across `topics`.
    ///
    /// Topics are queried one after another. A topic whose request fails is
    /// logged and skipped.
    #[instrument(
        level = "info",
        skip_all,
        fields(topics = topics.len(), max_articles = max_articles)
    )]
    pub async fn get_articles(
        &self,
        topics: &[String],
        sources: Option<&[String]>,
        max_articles: usize,
    ) -> Vec<Article> {
        if topics.is_empty() || max_articles == 0 {
            info!("Nothing to fetch");
            return Vec::new();
        }

        let page_size = per_topic_page_size(max_articles, topics.len());
        let since = Local::now() - Duration::days(1);

        let mut articles: Vec<Article> = stream::iter(topics)
            .then(|topic| async move {
                match self.fetch_topic(topic, sources, page_size, since).await {
                    Ok(found) => {
                        debug!(%topic, count = found.len(), "Fetched topic");
                        found
                    }
                    Err(e) => {
                        error!(%topic, error = %e, "Error fetching news for topic");
                        Vec::new()
                    }
                }
            })
            .concat()
            .await;

        articles.truncate(max_articles);
        info!(count = articles.len(), "Fetched articles");
        articles
    }

    #[instrument(level = "info", skip(self, sources, since))]
    async fn fetch_topic(
        &self,
        topic: &str,
        sources: Option<&[String]>,
        page_size: usize,
        since: DateTime<Local>,
    ) -> Result<Vec<Article>, Box<dyn Error>> {
        let url = self.everything_url(topic, sources, page_size, since)?;
        let response: EverythingResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.articles.into_iter().filter_map(into_article).collect())
    }
}

/// Split `max_articles` across topics, at least one and at most one page each.
pub fn per_topic_page_size(max_articles: usize, topic_count: usize) -> usize {
    (max_articles / topic_count.max(1)).clamp(1, MAX_PAGE_SIZE)
}

/// Keep articles with substantial content, preferring the description when
/// the content was cut short by the provider.
fn into_article(api: ApiArticle) -> Option<Article> {
    let content = api.content.filter(|c| c.chars().count() > MIN_CONTENT_CHARS)?;

    let content = if has_truncation_marker(&content) {
        api.description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(content)
    } else {
        content
    };

    Some(Article {
        title: api.title.unwrap_or_default(),
        content: strip_markup(&content),
        url: api.url.unwrap_or_default(),
        source: api.source.name.unwrap_or_default(),
        published: api.published_at.unwrap_or_default(),
    })
}

/// Reduce HTML fragments (`<ul><li>…`) that some outlets leave in content to
/// their text.
fn strip_markup(text: &str) -> String {
    if !text.contains('<') {
        return text.to_string();
    }
    let fragment = Html::parse_fragment(text);
    fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
