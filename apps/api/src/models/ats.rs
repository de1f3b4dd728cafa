use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ATS match result returned by the scoring call.
///
/// `score` is an integer so a fractional score from the model fails
/// deserialization instead of being silently truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsResult {
    pub score: i64,
    pub strengths: String,
    pub suggestions: Vec<String>,
}

/// Coarse rating of an ATS score, as shown next to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn for_score(score: i64) -> Self {
        if score >= 85 {
            ScoreBand::Strong
        } else if score >= 70 {
            ScoreBand::Fair
        } else {
            ScoreBand::Weak
        }
    }
}

/// The most recent ATS check, until it is dismissed or replaced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub result: AtsResult,
    pub band: ScoreBand,
    pub checked_at: DateTime<Utc>,
}

impl AtsReport {
    pub fn new(result: AtsResult) -> Self {
        Self {
            band: ScoreBand::for_score(result.score),
            result,
            checked_at: Utc::now(),
        }
    }
}
