//! Résumé analysis pipeline: PDF text → prompt → language model → validated result.
//!
//! Both analyses (score and review) share one pipeline parameterised by
//! [`AnalysisMode`]. Every call is single-shot and either fully succeeds or
//! fails with exactly one [`AnalysisError`] kind.

pub mod extract;
pub mod prompts;
pub mod validation;

#[cfg(test)]
pub mod test_support;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::analysis::extract::extract_text;
use crate::analysis::prompts::build_prompt;
use crate::analysis::validation::validate_response;
use crate::llm_client::{LanguageModel, LlmError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Score,
    Review,
}

impl AnalysisMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMode::Score => "score",
            AnalysisMode::Review => "review",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A résumé quality score in `0..=10`.
///
/// `0` is the model's signal that the document is not a résumé at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeScore(u8);

impl ResumeScore {
    pub const NOT_A_RESUME: ResumeScore = ResumeScore(0);
    pub const MAX: u8 = 10;

    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(ResumeScore)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_resume(self) -> bool {
        self != Self::NOT_A_RESUME
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Score(ResumeScore),
    Review(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("PDF contains no extractable text")]
    EmptyText,

    #[error("language model API key is not configured")]
    Configuration,

    #[error("language model request failed: {0}")]
    RemoteService(String),

    #[error("model returned a non-integer score: {0:?}")]
    InvalidScoreFormat(String),

    #[error("model returned a score outside 0-10: {0}")]
    ScoreOutOfRange(String),

    #[error("model returned an empty review")]
    EmptyReview,
}

impl AnalysisOutcome {
    pub fn score(&self) -> Option<ResumeScore> {
        match self {
            AnalysisOutcome::Score(score) => Some(*score),
            AnalysisOutcome::Review(_) => None,
        }
    }

    pub fn into_review(self) -> Option<String> {
        match self {
            AnalysisOutcome::Review(review) => Some(review),
            AnalysisOutcome::Score(_) => None,
        }
    }
}

impl AnalysisError {
    /// Stable machine-readable code, persisted alongside the résumé record.
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::Extraction(_) => "extraction_failed",
            AnalysisError::EmptyText => "empty_text",
            AnalysisError::Configuration => "configuration",
            AnalysisError::RemoteService(_) => "remote_service",
            AnalysisError::InvalidScoreFormat(_) => "invalid_score_format",
            AnalysisError::ScoreOutOfRange(_) => "score_out_of_range",
            AnalysisError::EmptyReview => "empty_review",
        }
    }
}

/// Entry point of the analysis core. Cheap to clone; holds only the shared model client.
#[derive(Clone)]
pub struct ResumeAnalyzer {
    llm: Arc<dyn LanguageModel>,
}

impl ResumeAnalyzer {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    /// Runs the full pipeline for one mode. Each call is single-shot.
    pub async fn analyze(
        &self,
        path: &Path,
        mode: AnalysisMode,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let owned = path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || extract_text(&owned))
            .await
            .map_err(|e| AnalysisError::Extraction(format!("extraction task aborted: {e}")))?
            .inspect_err(|e| warn!(%mode, path = %path.display(), "{e}"))?;
        debug!(%mode, chars = text.len(), "extracted resume text");

        let prompt = build_prompt(&text, mode);

        let raw = self.llm.complete(&prompt).await.map_err(|e| match e {
            LlmError::MissingApiKey => {
                error!(%mode, "cannot analyze resume: {e}");
                AnalysisError::Configuration
            }
            other => {
                warn!(%mode, "language model call failed: {other}");
                AnalysisError::RemoteService(other.to_string())
            }
        })?;
        debug!(%mode, response_len = raw.len(), "received model response");

        validate_response(&raw, mode)
    }
}
