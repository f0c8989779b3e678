use std::num::IntErrorKind;

use crate::analysis::{AnalysisError, AnalysisMode, AnalysisOutcome, ResumeScore};

/// Validates a raw model response against the output contract of `mode`.
pub fn validate_response(raw: &str, mode: AnalysisMode) -> Result<AnalysisOutcome, AnalysisError> {
    match mode {
        AnalysisMode::Score => parse_score(raw).map(AnalysisOutcome::Score),
        AnalysisMode::Review => parse_review(raw).map(AnalysisOutcome::Review),
    }
}

/// Strict integer parse of a score response.
///
/// Only an optional sign followed by ASCII digits is accepted. Decimals,
/// words, and embedded whitespace are format errors; integers outside
/// `0..=10` (including ones too large to represent) are range errors.
pub fn parse_score(raw: &str) -> Result<ResumeScore, AnalysisError> {
    let trimmed = raw.trim();

    let value = trimmed.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            AnalysisError::ScoreOutOfRange(trimmed.to_string())
        }
        _ => AnalysisError::InvalidScoreFormat(trimmed.to_string()),
    })?;

    ResumeScore::new(value).ok_or_else(|| AnalysisError::ScoreOutOfRange(trimmed.to_string()))
}

pub fn parse_review(raw: &str) -> Result<String, AnalysisError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::EmptyReview);
    }
    Ok(trimmed.to_string())
}
