//! Generated summaries from an OpenAI-compatible model.
//!
//! The model is optional. [`ModelSummarizer::load`] reads the `awful_aj`
//! configuration and chat template once at startup; if either is missing the
//! caller runs without a model and every article goes straight to the
//! extractive strategy.
//!
//! The model receives the cleaned article text prefixed with an instruction
//! that carries the [`SummaryOptions`]. Sampling settings such as temperature
//! live in the `awful_aj` `config.yaml`.

use crate::utils::truncate_for_log;
use awful_aj::api::ask;
use awful_aj::{config, config::AwfulJadeConfig, config_dir, template, template::ChatTemplate};
use std::error::Error;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Generation options forwarded to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Upper bound on summary length, in words.
    pub max_length: usize,
    /// Lower bound on summary length, in words.
    pub min_length: usize,
    /// Ask for the same answer every time for the same input.
    pub deterministic: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_length: 100,
            min_length: 40,
            deterministic: true,
        }
    }
}

/// Something that can turn article text into a generated summary.
pub trait SummaryProvider {
    /// Produce a summary of `text`, or an error if the provider could not.
    async fn summarize(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<String, Box<dyn Error>>;
}

/// [`SummaryProvider`] backed by `awful_aj::api::ask`.
pub struct ModelSummarizer {
    /// LLM configuration (API keys, endpoints, model settings).
    config: AwfulJadeConfig,
    /// Chat template defining the system prompt.
    template: ChatTemplate,
    template_name: String,
}

impl fmt::Debug for ModelSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSummarizer")
            .field("template", &self.template_name)
            .finish()
    }
}

impl ModelSummarizer {
    /// Load `config.yaml` from the `awful_aj` config directory and the named
    /// chat template.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be resolved, or the
    /// config or template cannot be loaded.
    #[instrument(level = "info")]
    pub async fn load(template_name: &str) -> Result<Self, Box<dyn Error>> {
        let conf_file = config_dir()?.join("config.yaml");
        let config_path = conf_file
            .to_str()
            .ok_or("awful_aj config path is not valid UTF-8")?;
        let config = config::load_config(config_path)?;
        info!(config_path, "Loaded model configuration");

        let template = template::load_template(template_name).await?;
        info!(template = template_name, "Loaded summarization template");

        Ok(Self {
            config,
            template,
            template_name: template_name.to_string(),
        })
    }
}

impl SummaryProvider for ModelSummarizer {
    #[instrument(level = "info", skip_all, fields(chars = text.chars().count()))]
    async fn summarize(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let request = render_request(text, options);
        let res = ask(&self.config, request, &self.template, None, None).await;
        let dt = t0.elapsed();

        match &res {
            Ok(summary) => debug!(
                elapsed_ms = dt.as_millis() as u128,
                response_preview = %truncate_for_log(summary, 120),
                "Model answered"
            ),
            Err(e) => warn!(elapsed_ms = dt.as_millis() as u128, error = %e, "Model call failed"),
        }
        res
    }
}

/// Prefix `text` with the length and determinism instructions.
pub fn render_request(text: &str, options: &SummaryOptions) -> String {
    let style = if options.deterministic {
        "Use only facts stated in the article; do not speculate or vary the wording."
    } else {
        "You may paraphrase freely."
    };
    format!(
        "Summarize the following news article in {} to {} words. {} \
         Reply with the summary only.\n\n{}",
        options.min_length, options.max_length, style, text
    )
}
