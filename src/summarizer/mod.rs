//! Article summarization with staged degradation.
//!
//! [`Summarizer::summarize`] cleans the article, returns short texts as-is,
//! and otherwise walks an ordered chain of [`Strategy`] values until one
//! produces a summary:
//!
//! | Strategy | Input | Declines when |
//! |----------|-------|---------------|
//! | [`Strategy::Model`] | cleaned text, first 1024 chars | no provider, error, ≤ 50 chars |
//! | [`Strategy::Extractive`] | cleaned text | segmentation fails, nothing scorable |
//! | [`Strategy::LeadSentences`] | raw text | segmentation fails |
//!
//! When every strategy declines, the raw text is truncated to 200 characters
//! plus `...`. Declines are logged and never reach the caller.

pub mod clean;
pub mod error;
pub mod extractive;
pub mod provider;

pub use clean::clean;
pub use error::SummarizeError;
pub use extractive::{
    DEFAULT_SUMMARY_SENTENCES, SentenceSegmenter, UnicodeSegmenter, extractive_summary,
};
pub use provider::{ModelSummarizer, SummaryOptions, SummaryProvider};

use crate::utils::take_chars;
use extractive::{lead_sentences, select_sentences, truncate_with_ellipsis};
use std::fmt;
use tracing::{debug, warn};

/// Cleaned texts shorter than this are returned without summarizing.
pub const SHORT_TEXT_CHARS: usize = 100;

/// Input ceiling of the model provider.
pub const MODEL_INPUT_CHARS: usize = 1024;

/// A model answer must be longer than this to be accepted.
pub const MIN_MODEL_SUMMARY_CHARS: usize = 50;

/// Sentences kept when falling back to the start of the article.
const LEAD_SENTENCES: usize = 2;

/// One way of producing a summary. Any strategy may decline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Model,
    Extractive,
    LeadSentences,
}

impl Strategy {
    /// Strategies in the order they are tried.
    pub const CHAIN: [Strategy; 3] = [
        Strategy::Model,
        Strategy::Extractive,
        Strategy::LeadSentences,
    ];
}

/// Summarizes article text, optionally with a model provider.
pub struct Summarizer<P> {
    provider: Option<P>,
    options: SummaryOptions,
    num_sentences: usize,
    segmenter: Box<dyn SentenceSegmenter + Send + Sync>,
}

impl<P: fmt::Debug> fmt::Debug for Summarizer<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Summarizer")
            .field("provider", &self.provider)
            .field("options", &self.options)
            .field("num_sentences", &self.num_sentences)
            .finish()
    }
}

impl<P: SummaryProvider> Summarizer<P> {
    /// A summarizer using `provider` when present, with default options and
    /// Unicode sentence segmentation.
    pub fn new(provider: Option<P>) -> Self {
        Self {
            provider,
            options: SummaryOptions::default(),
            num_sentences: DEFAULT_SUMMARY_SENTENCES,
            segmenter: Box::new(UnicodeSegmenter),
        }
    }

    /// Replace the sentence segmenter.
    pub fn with_segmenter(
        mut self,
        segmenter: impl SentenceSegmenter + Send + Sync + 'static,
    ) -> Self {
        self.segmenter = Box::new(segmenter);
        self
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Summarize raw article text. Always returns a string.
    pub async fn summarize(&self, text: &str) -> String {
        let cleaned = clean(text);
        if cleaned.chars().count() < SHORT_TEXT_CHARS {
            debug!(
                chars = cleaned.chars().count(),
                "Text already short; returning cleaned text"
            );
            return cleaned;
        }

        for strategy in Strategy::CHAIN {
            match self.attempt(strategy, text, &cleaned).await {
                Ok(summary) => {
                    debug!(?strategy, chars = summary.chars().count(), "Summary produced");
                    return summary;
                }
                Err(e) => debug!(?strategy, error = %e, "Strategy declined"),
            }
        }

        warn!("All summary strategies declined; truncating");
        truncate_with_ellipsis(text)
    }

    async fn attempt(
        &self,
        strategy: Strategy,
        raw: &str,
        cleaned: &str,
    ) -> Result<String, SummarizeError> {
        match strategy {
            Strategy::Model => self.ask_model(cleaned).await,
            Strategy::Extractive => {
                select_sentences(cleaned, self.num_sentences, &*self.segmenter)
            }
            Strategy::LeadSentences => lead_sentences(raw, LEAD_SENTENCES, &*self.segmenter),
        }
    }

    async fn ask_model(&self, cleaned: &str) -> Result<String, SummarizeError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| SummarizeError::ProviderUnavailable("no model configured".into()))?;

        let input = take_chars(cleaned, MODEL_INPUT_CHARS);
        let summary = match provider.summarize(input, &self.options).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Model summarization failed; falling back");
                return Err(SummarizeError::ProviderUnavailable(e.to_string()));
            }
        };

        let summary = summary.trim();
        let chars = summary.chars().count();
        if chars > MIN_MODEL_SUMMARY_CHARS {
            Ok(summary.to_string())
        } else {
            Err(SummarizeError::ProviderRejected {
                chars,
                min: MIN_MODEL_SUMMARY_CHARS,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::error::Error;

    #[derive(Debug)]
    struct StubProvider {
        reply: Result<String, String>,
        seen: RefCell<Vec<(usize, SummaryOptions)>>,
    }

    impl StubProvider {
        fn answering(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl SummaryProvider for StubProvider {
        async fn summarize(
            &self,
            text: &str,
            options: &SummaryOptions,
        ) -> Result<String, Box<dyn Error>> {
            self.seen.borrow_mut().push((text.chars().count(), *options));
            self.reply.clone().map_err(Into::into)
        }
    }

    struct BrokenSegmenter;

    impl SentenceSegmenter for BrokenSegmenter {
        fn segment(&self, _text: &str) -> Result<Vec<String>, SummarizeError> {
            Err(SummarizeError::SegmentationFailure("tokenizer data missing".into()))
        }
    }

    const ARTICLE: &str = "The city council approved the new transit budget on Monday \
        after a long debate. \
        Budget hearings lasted three days and drew hundreds of residents. \
        Residents praised the transit budget and the council for listening. \
        The weather was mild throughout the week. \
        Transit officials expect the budget to fund forty new electric buses.";

    fn without_model() -> Summarizer<StubProvider> {
        Summarizer::new(None)
    }

    #[tokio::test]
    async fn test_short_text_returns_cleaned() {
        let summarizer = without_model();
        let raw = "[+150 chars]Breaking   news today!!";
        assert_eq!(summarizer.summarize(raw).await, clean(raw));
    }

    #[tokio::test]
    async fn test_short_text_skips_model() {
        let summarizer = Summarizer::new(Some(StubProvider::answering(&"x".repeat(80))));
        assert_eq!(summarizer.summarize("Tiny story.").await, "Tiny story.");
        assert!(summarizer.provider.as_ref().unwrap().seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_empty_input() {
        assert_eq!(without_model().summarize("").await, "");
        assert_eq!(without_model().summarize(" \n\t ").await, "");
    }

    #[tokio::test]
    async fn test_accepts_long_model_summary() {
        let answer = "  The council approved a transit budget that funds forty electric buses.  ";
        let summarizer = Summarizer::new(Some(StubProvider::answering(answer)));
        assert_eq!(summarizer.summarize(ARTICLE).await, answer.trim());
    }

    #[tokio::test]
    async fn test_rejects_short_model_summary() {
        let reply = "Council approves a budget plan.";
        let summarizer = Summarizer::new(Some(StubProvider::answering(reply)));
        let expected = extractive_summary(&clean(ARTICLE), 2);
        assert_eq!(summarizer.summarize(ARTICLE).await, expected);
    }

    #[tokio::test]
    async fn test_boundary_of_model_summary_length() {
        let fifty = "a".repeat(50);
        let summarizer = Summarizer::new(Some(StubProvider::answering(&fifty)));
        assert_ne!(summarizer.summarize(ARTICLE).await, fifty);

        let fifty_one = "a".repeat(51);
        let summarizer = Summarizer::new(Some(StubProvider::answering(&fifty_one)));
        assert_eq!(summarizer.summarize(ARTICLE).await, fifty_one);
    }

    #[tokio::test]
    async fn test_model_error_falls_back_to_extractive() {
        let summarizer = Summarizer::new(Some(StubProvider::failing("connection refused")));
        let expected = extractive_summary(&clean(ARTICLE), 2);
        assert_eq!(summarizer.summarize(ARTICLE).await, expected);
    }

    #[tokio::test]
    async fn test_without_model_uses_extractive() {
        let summary = without_model().summarize(ARTICLE).await;
        assert_eq!(summary, extractive_summary(&clean(ARTICLE), 2));
        assert!(summary.len() < ARTICLE.len());
    }

    #[tokio::test]
    async fn test_model_input_is_capped_and_options_forwarded() {
        let long = ARTICLE.repeat(10);
        let summarizer = Summarizer::new(Some(StubProvider::answering(&"y".repeat(60))));
        summarizer.summarize(&long).await;

        let seen = summarizer.provider.as_ref().unwrap().seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, MODEL_INPUT_CHARS);
        assert_eq!(seen[0].1, SummaryOptions::default());
    }

    #[tokio::test]
    async fn test_segmentation_failure_truncates_raw_text() {
        let summarizer = without_model().with_segmenter(BrokenSegmenter);
        let summary = summarizer.summarize(ARTICLE).await;
        assert_eq!(summary, format!("{}...", take_chars(ARTICLE, 200)));
    }

    #[tokio::test]
    async fn test_unscorable_text_uses_raw_lead_sentences() {
        let raw = "It is what it is. So it was, and so it will be. And then it is. \
                   It was. It is not. It is not what it was.";
        let summary = without_model().summarize(raw).await;
        assert_eq!(summary, "It is what it is. So it was, and so it will be.");
    }

    #[test]
    fn test_chain_order() {
        assert_eq!(
            Strategy::CHAIN,
            [
                Strategy::Model,
                Strategy::Extractive,
                Strategy::LeadSentences
            ]
        );
    }
}
