use thiserror::Error;

/// Why a summarization strategy declined to produce a summary.
///
/// None of these reach the caller of [`super::Summarizer::summarize`]; each
/// one moves the chain on to the next strategy.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SummarizeError {
    /// No model provider is configured, or the provider call failed.
    #[error("summarization provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider answered, but too briefly to count as a summary.
    #[error("provider summary rejected: {chars} chars is not above the {min} char floor")]
    ProviderRejected { chars: usize, min: usize },

    /// The sentence segmenter could not split the text.
    #[error("sentence segmentation failed: {0}")]
    SegmentationFailure(String),

    /// Segmentation worked but no sentence carried a scoring token.
    #[error("no sentence contains a scoring token")]
    NoScorableSentences,
}
