use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::error::RequestError;

/// Which side of the conversation the recorded subject is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Questioner,
    Answerer,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Questioner => "questioner",
            ParticipantRole::Answerer => "answerer",
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "questioner" => Ok(ParticipantRole::Questioner),
            "answerer" => Ok(ParticipantRole::Answerer),
            other => Err(format!(
                "unknown participant role '{}' (expected questioner or answerer)",
                other
            )),
        }
    }
}

/// JSON body of the analyze and transcript calls
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub session_id: String,
}

/// Acknowledgment returned by `POST /upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub session_id: String,
    pub video_key: String,
    /// Only present when the service split the audio track out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_key: Option<String>,
    /// Echoed as sent, any value accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Scores produced by the lie-detection pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    /// Final lie probability (0.0 to 1.0)
    pub lie_probability: f64,
    pub audio_score: f64,
    pub macro_score: f64,
    pub micro_score: f64,

    /// Fixed-length emotion comparison vector
    pub comparison_vector: Vec<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_vector: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macro_vector: Option<Vec<f64>>,

    /// Emotion label → weight, as estimated from the transcript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_vector: Option<BTreeMap<String, f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment_score: Option<f64>,

    /// Some deployments echo the transcript here; never authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

impl AnalysisSummary {
    /// Reject scores that are not finite or fall outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), RequestError> {
        let scores = [
            ("lieProbability", Some(self.lie_probability)),
            ("audioScore", Some(self.audio_score)),
            ("macroScore", Some(self.macro_score)),
            ("microScore", Some(self.micro_score)),
            ("alignmentScore", self.alignment_score),
        ];

        for (name, value) in scores {
            if let Some(v) = value {
                if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                    return Err(RequestError::Decode(format!(
                        "{} out of range: {}",
                        name, v
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Response of `POST /liedetect`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LieDetectResponse {
    pub session_id: String,
    pub summary: AnalysisSummary,
}

/// Response of `POST /transcript`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    pub session_id: String,
    /// May be empty, never absent
    pub transcript: String,
    /// Server-side re-packaging of the analysis; `null` and missing are equivalent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<AnalysisSummary>,
}
