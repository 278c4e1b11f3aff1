//! Frequency-based extractive summarization.
//!
//! A sentence scores the mean corpus frequency of its informative tokens.
//! The highest scoring sentences are kept and re-emitted in the order they
//! appear in the article.
//!
//! # Algorithm
//!
//! 1. Split the text into sentences (UAX #29 boundaries plus an abbreviation
//!    merge pass, see [`UnicodeSegmenter`]).
//! 2. Texts of two sentences or fewer are returned untouched.
//! 3. Count every lowercase, purely alphanumeric, non-stopword token of the
//!    whole text.
//! 4. Score each sentence as `sum(count) / n` over its tokens present in the
//!    table. Sentences with no such token are not ranked at all.
//! 5. Keep the top `n` by score. Equal scores keep document order.
//! 6. Emit the kept sentences in document order, joined by single spaces.
//!
//! Sentences are selected by position, so two sentences with identical text
//! are independent candidates.

use super::error::SummarizeError;
use crate::utils::take_chars;
use itertools::Itertools;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use stop_words::{LANGUAGE, get};
use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

/// Default number of sentences kept by [`extractive_summary`].
pub const DEFAULT_SUMMARY_SENTENCES: usize = 2;

/// Texts with at most this many sentences are already short enough.
const PASSTHROUGH_SENTENCES: usize = 2;

/// Sentences kept by the lead-sentence fallback.
const LEAD_SENTENCES: usize = 2;

/// Characters kept by the last-resort truncation fallback.
const TRUNCATE_CHARS: usize = 200;

/// English stopwords (the NLTK list), loaded once.
static STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| {
    let words: Vec<String> = get(LANGUAGE::English);
    words.into_iter().map(|w| w.to_lowercase()).collect()
});

/// Titles that never end a sentence.
const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "vs", "gov", "gen", "sen", "rep", "lt", "col", "sgt", "capt",
];

/// Stems that may or may not end a sentence: months, suffixes, and the like.
const AMBIGUOUS: &[&str] = &[
    "sr", "jr", "st", "inc", "ltd", "corp", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec",
];

/// Splits text into sentences.
///
/// Implementations must be deterministic and keep document order.
pub trait SentenceSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, SummarizeError>;
}

/// Unicode sentence segmentation (UAX #29) with a merge pass for common
/// abbreviations and single-letter initials, so `Dr. Jones` or `J. Smith`
/// do not end a sentence.
///
/// Titles always continue the sentence. Initials, months and company
/// suffixes only do when the next word starts with a digit or is a
/// capitalized non-stopword: `Jan. 5` and `J. Doe` stay together while
/// `in Jan. Then` and `Vitamin C. Then` split.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeSegmenter;

impl SentenceSegmenter for UnicodeSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, SummarizeError> {
        let mut sentences: Vec<String> = Vec::new();
        let mut pending = String::new();
        let pieces: Vec<&str> = text.split_sentence_bounds().collect();

        for (i, piece) in pieces.iter().enumerate() {
            pending.push_str(piece);
            let next = pieces.get(i + 1).copied().unwrap_or_default();
            if continues_after_period(pending.trim_end(), next) {
                continue;
            }
            push_sentence(&mut sentences, pending.trim());
            pending.clear();
        }
        push_sentence(&mut sentences, pending.trim());

        Ok(sentences)
    }
}

/// Append `candidate` as a new sentence, or glue punctuation-only fragments
/// onto the previous one.
fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
    if candidate.is_empty() {
        return;
    }
    if candidate.chars().any(char::is_alphanumeric) {
        sentences.push(candidate.to_string());
    } else if let Some(last) = sentences.last_mut() {
        last.push(' ');
        last.push_str(candidate);
    }
}

/// Whether a boundary after `fragment` is an abbreviation period rather
/// than a sentence end, given the `next` piece of text.
fn continues_after_period(fragment: &str, next: &str) -> bool {
    let Some(word) = fragment.split_whitespace().last() else {
        return false;
    };
    if !word.ends_with('.') {
        return false;
    }
    let stem = word.trim_end_matches('.').to_lowercase();
    if TITLES.contains(&stem.as_str()) {
        return true;
    }

    let mut chars = stem.chars();
    let ambiguous = match (chars.next(), chars.next()) {
        // "I." is a pronoun, not an initial
        (Some(c), None) => c.is_alphabetic() && c != 'i' && word.starts_with(char::is_uppercase),
        (Some(_), Some(_)) => AMBIGUOUS.contains(&stem.as_str()),
        _ => false,
    };
    ambiguous && starts_continuation(next)
}

/// The next word reads as the middle of a sentence: a number, or a
/// capitalized word that is not a common sentence opener.
fn starts_continuation(next: &str) -> bool {
    let Some(word) = next.split_whitespace().next() else {
        return false;
    };
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
    match word.chars().next() {
        Some(c) if c.is_ascii_digit() => true,
        Some(c) if c.is_uppercase() => {
            let token: String = word
                .chars()
                .take_while(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            !STOPWORDS.contains(&token)
        }
        _ => false,
    }
}

/// Lowercase word tokens of `text`, punctuation excluded.
pub fn word_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .unicode_words()
        .map(str::to_string)
        .collect()
}

/// Token counts over a whole text, restricted to alphanumeric non-stopwords.
#[derive(Debug, Default)]
pub struct WordFrequencies {
    counts: HashMap<String, usize>,
}

impl WordFrequencies {
    pub fn from_text(text: &str) -> Self {
        let mut counts = HashMap::new();
        for token in word_tokens(text) {
            if token.chars().all(char::is_alphanumeric) && !STOPWORDS.contains(&token) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    pub fn count(&self, token: &str) -> Option<usize> {
        self.counts.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Mean frequency of the sentence's tokens that appear in `table`.
///
/// `None` when no token of the sentence is in the table.
pub fn score_sentence(sentence: &str, table: &WordFrequencies) -> Option<f64> {
    let (sum, eligible) = word_tokens(sentence)
        .iter()
        .filter_map(|token| table.count(token))
        .fold((0usize, 0usize), |(sum, n), count| (sum + count, n + 1));

    (eligible > 0).then(|| sum as f64 / eligible as f64)
}

/// Pick the `num_sentences` best sentences of `text`.
///
/// Returns `text` unchanged when it has two sentences or fewer.
pub fn select_sentences(
    text: &str,
    num_sentences: usize,
    segmenter: &dyn SentenceSegmenter,
) -> Result<String, SummarizeError> {
    let sentences = segmenter.segment(text)?;
    if sentences.len() <= PASSTHROUGH_SENTENCES {
        return Ok(text.to_string());
    }

    let table = WordFrequencies::from_text(text);
    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .filter_map(|(position, sentence)| {
            score_sentence(sentence, &table).map(|score| (position, score))
        })
        .collect();

    if scored.is_empty() {
        return Err(SummarizeError::NoScorableSentences);
    }

    // Stable sort: equal scores stay in document order.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut chosen: Vec<usize> = scored
        .into_iter()
        .take(num_sentences)
        .map(|(position, _)| position)
        .collect();
    chosen.sort_unstable();

    debug!(
        total = sentences.len(),
        vocabulary = table.len(),
        chosen = ?chosen,
        "Selected sentences"
    );

    Ok(chosen.into_iter().map(|i| sentences[i].as_str()).join(" "))
}

/// The first `count` sentences of `text`, joined by a space.
pub fn lead_sentences(
    text: &str,
    count: usize,
    segmenter: &dyn SentenceSegmenter,
) -> Result<String, SummarizeError> {
    let sentences = segmenter.segment(text)?;
    Ok(sentences.iter().take(count).join(" "))
}

/// The first 200 characters of `text` followed by `...`.
pub fn truncate_with_ellipsis(text: &str) -> String {
    format!("{}...", take_chars(text, TRUNCATE_CHARS))
}

/// Extractive summary using [`UnicodeSegmenter`]. Never fails.
pub fn extractive_summary(text: &str, num_sentences: usize) -> String {
    extractive_summary_with(text, num_sentences, &UnicodeSegmenter)
}

/// Extractive summary with an explicit segmenter.
///
/// Falls back to the first two sentences when ranking fails, and to a
/// 200-character truncation when segmentation itself fails.
pub fn extractive_summary_with(
    text: &str,
    num_sentences: usize,
    segmenter: &dyn SentenceSegmenter,
) -> String {
    match select_sentences(text, num_sentences, segmenter) {
        Ok(summary) => summary,
        Err(e) => {
            warn!(error = %e, "Extractive summarization failed; using lead sentences");
            match lead_sentences(text, LEAD_SENTENCES, segmenter) {
                Ok(lead) => lead,
                Err(e) => {
                    warn!(error = %e, "Segmentation unavailable; truncating");
                    truncate_with_ellipsis(text)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSegmenter;

    impl SentenceSegmenter for FailingSegmenter {
        fn segment(&self, _text: &str) -> Result<Vec<String>, SummarizeError> {
            Err(SummarizeError::SegmentationFailure("no model data".into()))
        }
    }

    const ARTICLE: &str = "The council approved the new transit budget on Monday. \
        Budget hearings lasted three days. \
        Residents praised the transit budget and the council. \
        The weather was mild. \
        Transit officials expect the budget to fund new buses.";

    #[test]
    fn test_segments_simple_sentences() {
        let sentences = UnicodeSegmenter
            .segment("One fish swam. Two fish dove! Did red fish hide? Blue fish slept.")
            .unwrap();
        assert_eq!(
            sentences,
            vec![
                "One fish swam.",
                "Two fish dove!",
                "Did red fish hide?",
                "Blue fish slept."
            ]
        );
    }

    #[test]
    fn test_segmenter_keeps_abbreviations_together() {
        let sentences = UnicodeSegmenter
            .segment("Dr. Jones met Mr. Smith in Jan. Later they spoke. J. Doe agreed.")
            .unwrap();
        assert_eq!(
            sentences,
            vec![
                "Dr. Jones met Mr. Smith in Jan. Later they spoke.",
                "J. Doe agreed."
            ]
        );
    }

    #[test]
    fn test_segmenter_splits_after_initials_and_months_at_sentence_end() {
        assert_eq!(
            UnicodeSegmenter
                .segment("She took Vitamin C. Then she slept well. Done now.")
                .unwrap(),
            vec!["She took Vitamin C.", "Then she slept well.", "Done now."]
        );
        assert_eq!(
            UnicodeSegmenter
                .segment("He arrived in Jan. Then he left town. Done now.")
                .unwrap(),
            vec!["He arrived in Jan.", "Then he left town.", "Done now."]
        );
    }

    #[test]
    fn test_segmenter_keeps_month_before_day_number() {
        let sentences = UnicodeSegmenter
            .segment("Voting closes Oct. 12 at noon. Results follow. Turnout was high.")
            .unwrap();
        assert_eq!(
            sentences,
            vec![
                "Voting closes Oct. 12 at noon.",
                "Results follow.",
                "Turnout was high."
            ]
        );
    }

    #[test]
    fn test_segmenter_empty_input() {
        assert!(UnicodeSegmenter.segment("").unwrap().is_empty());
        assert!(UnicodeSegmenter.segment("   ").unwrap().is_empty());
    }

    #[test]
    fn test_word_tokens_lowercase_without_punctuation() {
        assert_eq!(
            word_tokens("The Cat, the HAT!"),
            vec!["the", "cat", "the", "hat"]
        );
    }

    #[test]
    fn test_frequency_table_skips_stopwords_and_symbols() {
        let table = WordFrequencies::from_text("The cat and the other cat. It's 5.5 degrees");
        assert_eq!(table.count("cat"), Some(2));
        assert_eq!(table.count("the"), None);
        assert_eq!(table.count("and"), None);
        assert_eq!(table.count("5.5"), None);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_frequency_table_keeps_common_news_words() {
        let table = WordFrequencies::from_text("They said new rules");
        assert_eq!(table.count("said"), Some(1));
        assert_eq!(table.count("new"), Some(1));
        assert_eq!(table.count("rules"), Some(1));
        assert_eq!(table.count("they"), None);
    }

    #[test]
    fn test_score_is_mean_of_eligible_counts() {
        let table = WordFrequencies::from_text("cat cat cat dog");
        // "the" is not in the table and is excluded from both sum and count
        let score = score_sentence("The cat and the dog.", &table).unwrap();
        assert!((score - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sentence_without_eligible_tokens_has_no_score() {
        let table = WordFrequencies::from_text("cat dog");
        assert_eq!(score_sentence("It was the one.", &table), None);
    }

    #[test]
    fn test_cat_scenario() {
        let text = "The cat sat. The cat slept on the mat. Dogs barked loudly outside all night.";
        assert_eq!(extractive_summary(text, 2), "The cat sat. The cat slept on the mat.");
    }

    #[test]
    fn test_reporting_verbs_count_toward_score() {
        let text = "Crops failed badly. Crops failed again. \
            Officials said new ideas, said new rules, said new plans. Weather mild.";
        assert_eq!(
            extractive_summary(text, 2),
            "Crops failed again. Officials said new ideas, said new rules, said new plans."
        );
    }

    #[test]
    fn test_short_text_passthrough() {
        let text = "Only one sentence here.  Maybe two!";
        assert_eq!(extractive_summary(text, 1), text);
        assert_eq!(extractive_summary("", 2), "");
    }

    #[test]
    fn test_sentence_count_bound() {
        for n in 1..=3 {
            let summary = extractive_summary(ARTICLE, n);
            let count = UnicodeSegmenter.segment(&summary).unwrap().len();
            assert!(count <= n, "expected at most {n} sentences, got {count}");
        }
    }

    #[test]
    fn test_order_preserved() {
        let summary = extractive_summary(ARTICLE, 3);
        let sentences = UnicodeSegmenter.segment(ARTICLE).unwrap();
        let positions: Vec<usize> = UnicodeSegmenter
            .segment(&summary)
            .unwrap()
            .iter()
            .map(|s| sentences.iter().position(|o| o == s).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_ties_keep_document_order() {
        // Every token occurs once, so every sentence scores exactly 1.
        let text = "Zebras graze. Quokkas smile. Walruses swim. Pelicans dive.";
        assert_eq!(extractive_summary(text, 2), "Zebras graze. Quokkas smile.");
    }

    #[test]
    fn test_duplicate_sentences_selected_by_position() {
        let text = "Storm hits coast. Quiet day. Storm hits coast. Nothing else.";
        assert_eq!(
            extractive_summary(text, 2),
            "Storm hits coast. Storm hits coast."
        );
    }

    #[test]
    fn test_more_requested_than_available() {
        let text = "Rain fell. Rain stopped. Sun rose.";
        assert_eq!(extractive_summary(text, 10), text);
    }

    #[test]
    fn test_unscorable_text_falls_back_to_lead() {
        let text = "It is. So it was. And then it is.";
        assert_eq!(extractive_summary(text, 2), "It is. So it was.");
    }

    #[test]
    fn test_segmentation_failure_truncates() {
        let text = "x".repeat(500);
        let summary = extractive_summary_with(&text, 2, &FailingSegmenter);
        assert_eq!(summary, format!("{}...", "x".repeat(200)));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "é".repeat(300);
        let truncated = truncate_with_ellipsis(&text);
        assert_eq!(truncated.chars().count(), 203);
    }
}
