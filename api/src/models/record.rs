use chrono::{DateTime, Utc};
use profiles::{HistoryAnalysis, Pricing, W2Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub first_name: String,
    pub last_name: String,
    pub ssn_masked: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerificationResults {
    pub employment_history: Vec<W2Record>,
    pub analysis: HistoryAnalysis,
}

/// A created employment verification, returned verbatim on lookup
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub request_id: String,
    pub status: String,
    pub customer: String,
    pub created_at: DateTime<Utc>,
    pub candidate: CandidateSummary,
    /// `employer_info` as submitted
    pub employer: Value,
    pub pricing: Pricing,
    pub results: VerificationResults,
}
