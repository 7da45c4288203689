//! Scan request and report types.
//!
//! The report is backend-defined analysis output: the client stores and
//! replaces it wholesale, exposing only display-oriented accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request payload for `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeTextRequest {
    /// Raw text to analyze
    pub text_content: String,
}

/// Per-sentence verdict inside a [`ScanReport`].
///
/// A score of `-1.0` marks a sentence the detector declined to judge
/// (foreign language); `skipped` marks sentences outside the sampled window
/// of very long documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceVerdict {
    /// Sentence text as segmented by the backend
    pub text: String,
    /// AI-likelihood score in `0.0..=100.0`, or `-1.0` when not judged
    pub score: f64,
    /// ISO 639-1 language code, present only for foreign sentences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Whether the sentence was skipped by long-document sampling
    #[serde(default)]
    pub skipped: bool,
}

impl SentenceVerdict {
    /// Whether the detector produced a usable score for this sentence.
    pub fn is_judged(&self) -> bool {
        !self.skipped && self.score >= 0.0
    }
}

/// Completed analysis result as reported by `POST /analyze`,
/// `POST /analyze-file`, and `GET /history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Unique scan identifier
    pub id: i64,
    /// Owning account, absent for anonymous scans
    pub user_id: Option<i64>,
    /// Text that was analyzed
    pub text_content: String,
    /// Overall AI probability in `0.0..=100.0`
    pub ai_probability: f64,
    /// Mean language-model loss over the document
    pub perplexity: f64,
    /// Sentence-length variation coefficient
    pub burstiness: f64,
    /// Human-readable verdict label (e.g. `"Likely AI"`)
    pub status: String,
    /// Per-sentence breakdown, absent for legacy history rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentences: Option<Vec<SentenceVerdict>>,
    /// Sentences judged AI-written
    #[serde(default)]
    pub ai_count: i64,
    /// Sentences judged paraphrased
    #[serde(default)]
    pub para_count: i64,
    /// Sentences with mixed signals
    #[serde(default)]
    pub mix_count: i64,
    /// Sentences judged human-written
    #[serde(default)]
    pub human_count: i64,
    /// Whether long-document sampling left part of the text unanalyzed
    #[serde(default)]
    pub partially_analyzed: bool,
    /// Timestamp the scan completed
    pub created_at: DateTime<Utc>,
}
