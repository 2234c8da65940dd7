use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::{AnalysisSummary, TranscriptResponse};

/// Analysis scores merged with the transcript text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub lie_probability: f64,
    pub audio_score: f64,
    pub macro_score: f64,
    pub micro_score: f64,
    pub comparison_vector: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_vector: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macro_vector: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_vector: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment_score: Option<f64>,
    pub transcript: String,
}

/// Final result of one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub summary: Summary,
}

/// Merge the lie-detection result with the transcript result.
///
/// Scores and the comparison vector always come from `analysis`. Optional
/// fields missing there are filled from `transcript.summary` when it has
/// them. The text is always `transcript.transcript`.
pub fn merge(analysis: &AnalysisSummary, transcript: &TranscriptResponse) -> Summary {
    let fallback = transcript.summary.as_ref();

    Summary {
        lie_probability: analysis.lie_probability,
        audio_score: analysis.audio_score,
        macro_score: analysis.macro_score,
        micro_score: analysis.micro_score,
        comparison_vector: analysis.comparison_vector.clone(),
        audio_vector: analysis
            .audio_vector
            .clone()
            .or_else(|| fallback.and_then(|s| s.audio_vector.clone())),
        macro_vector: analysis
            .macro_vector
            .clone()
            .or_else(|| fallback.and_then(|s| s.macro_vector.clone())),
        llm_vector: analysis
            .llm_vector
            .clone()
            .or_else(|| fallback.and_then(|s| s.llm_vector.clone())),
        alignment_score: analysis
            .alignment_score
            .or_else(|| fallback.and_then(|s| s.alignment_score)),
        transcript: transcript.transcript.clone(),
    }
}
