// src/models.rs
use serde::{Deserialize, Deserializer, Serialize};

/// Classified outcome of one submission. Built once per request by
/// [`crate::classifier::classify`] and consumed by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnalysisResult {
    /// The service rejected the datasets before any analysis ran.
    ContractViolation { errors: Vec<String> },
    Success(Box<AnalysisPayload>),
    Failure { kind: FailureKind, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Network error, timeout or an undecodable body.
    Transport,
    /// The service answered but did not report success.
    Service,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "Transport"),
            FailureKind::Service => write!(f, "Service"),
        }
    }
}

impl AnalysisResult {
    pub fn transport_failure(message: impl Into<String>) -> Self {
        AnalysisResult::Failure {
            kind: FailureKind::Transport,
            message: message.into(),
        }
    }

    pub fn service_failure(message: impl Into<String>) -> Self {
        AnalysisResult::Failure {
            kind: FailureKind::Service,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success(_))
    }
}

/// The `data` object of a successful analysis response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    pub html_report: String,
    pub automation: Automation,
    pub financials: Financials,
    pub rigor: Rigor,
    pub model_health: ModelHealth,
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub meta: Option<RunMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Automation {
    pub action: String,
    /// CSS colour token chosen by the rule engine, e.g. `#ff0055`.
    pub color: String,
    pub rule: String,
    pub details: String,
    pub pipeline: String,
    pub strategy: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    pub risk_amount: String,
    pub disclaimer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rigor {
    pub fairness: Vec<FairnessIssue>,
    pub p_values: Vec<FeaturePValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessIssue {
    pub group: String,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub disparity: f64,
    /// Protected attribute the group belongs to (`sex`, `race`, ...).
    #[serde(default)]
    pub feature: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePValue {
    pub feature: String,
    pub p_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelHealth {
    pub reliability: Reliability,
    pub est_f1_drop: String,
    #[serde(default)]
    pub target_drift: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Reliability {
    Stable,
    Other(String),
}

impl From<String> for Reliability {
    fn from(value: String) -> Self {
        if value == "STABLE" {
            Reliability::Stable
        } else {
            Reliability::Other(value)
        }
    }
}

impl From<Reliability> for String {
    fn from(value: Reliability) -> Self {
        value.as_str().to_string()
    }
}

impl Reliability {
    pub fn as_str(&self) -> &str {
        match self {
            Reliability::Stable => "STABLE",
            Reliability::Other(label) => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub feature: String,
    pub impact_tag: ImpactTag,
    pub suggested_action: String,
    pub detected: bool,
    pub score: f64,
    #[serde(default)]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImpactTag {
    Critical,
    High,
    Other(String),
}

impl From<String> for ImpactTag {
    fn from(value: String) -> Self {
        match value.as_str() {
            "CRITICAL" => ImpactTag::Critical,
            "HIGH" => ImpactTag::High,
            _ => ImpactTag::Other(value),
        }
    }
}

impl From<ImpactTag> for String {
    fn from(value: ImpactTag) -> Self {
        value.as_str().to_string()
    }
}

impl ImpactTag {
    pub fn as_str(&self) -> &str {
        match self {
            ImpactTag::Critical => "CRITICAL",
            ImpactTag::High => "HIGH",
            ImpactTag::Other(label) => label,
        }
    }
}

/// Run metadata the service attaches next to the verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMeta {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub cooldown: bool,
}

// The fairness auditor formats disparities as "0.62" strings; accept both.
fn number_or_numeric_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("disparity is not numeric: {s:?}"))),
    }
}
