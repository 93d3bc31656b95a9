// src/dashboard.rs
use serde::Serialize;

use crate::models::{AnalysisPayload, FairnessIssue, FeaturePValue, LeaderboardEntry, Reliability, RunMeta};
use crate::palette;

/// Disparity ratio below which a protected group counts as disadvantaged.
/// Shown for context only; the service has already made the call.
pub const FAIRNESS_THRESHOLD: f64 = 0.8;
/// Significance level the service used when listing p-values.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

pub const BIAS_DETECTED_LABEL: &str = "BIAS DETECTED";

/// Everything the dashboard shows for one successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub automation: AutomationPanel,
    pub financials: FinancialPanel,
    pub score: ScorePanel,
    pub diagnostics: Vec<Diagnostic>,
    pub leaderboard: Vec<LeaderboardRow>,
    pub meta: Option<RunMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomationPanel {
    pub action: String,
    pub color: String,
    pub rule: String,
    pub details: String,
    pub pipeline: String,
    pub strategy: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialPanel {
    pub risk_amount: String,
    /// Supplementary text, shown on hover or as a footnote.
    pub disclaimer: String,
}

/// The score card shows either the bias warning or the model health, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorePanel {
    BiasDetected {
        label: String,
        color: String,
    },
    Health {
        reliability: String,
        color: String,
        est_f1_drop: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

impl Diagnostic {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            message: message.into(),
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warn,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub feature: String,
    pub impact_tag: String,
    pub badge_color: String,
    pub suggested_action: String,
    /// Score fixed to two decimals.
    pub score: String,
    pub score_color: String,
}

/// Derives the full dashboard from a payload. Pure: the same payload always
/// gives the same view, so re-running it is harmless.
pub fn update_dashboard(payload: &AnalysisPayload) -> DashboardView {
    let automation = &payload.automation;
    let mut diagnostics = Vec::new();

    let score = if payload.rigor.fairness.is_empty() {
        diagnostics.push(Diagnostic::info("Fairness Audit Passed"));
        health_panel(&payload.model_health.reliability, &payload.model_health.est_f1_drop)
    } else {
        diagnostics.push(Diagnostic::warn("FAIRNESS AUDIT FAILED"));
        diagnostics.extend(payload.rigor.fairness.iter().map(fairness_line));
        ScorePanel::BiasDetected {
            label: BIAS_DETECTED_LABEL.to_string(),
            color: palette::ALERT.to_string(),
        }
    };

    diagnostics.extend(significance_lines(&payload.rigor.p_values));

    DashboardView {
        automation: AutomationPanel {
            action: automation.action.clone(),
            color: automation.color.clone(),
            rule: automation.rule.clone(),
            details: automation.details.clone(),
            pipeline: automation.pipeline.clone(),
            strategy: automation.strategy.clone(),
            status: automation.status.clone(),
        },
        financials: FinancialPanel {
            risk_amount: payload.financials.risk_amount.clone(),
            disclaimer: payload.financials.disclaimer.clone(),
        },
        score,
        diagnostics,
        leaderboard: payload.leaderboard.iter().map(leaderboard_row).collect(),
        meta: payload.meta.clone(),
    }
}

fn health_panel(reliability: &Reliability, est_f1_drop: &str) -> ScorePanel {
    let color = match reliability {
        Reliability::Stable => palette::NOMINAL,
        Reliability::Other(_) => palette::DEGRADED,
    };
    ScorePanel::Health {
        reliability: reliability.as_str().to_string(),
        color: color.to_string(),
        est_f1_drop: est_f1_drop.to_string(),
    }
}

fn fairness_line(issue: &FairnessIssue) -> Diagnostic {
    let attribute = issue
        .feature
        .as_deref()
        .map(|f| format!(" ({f})"))
        .unwrap_or_default();
    Diagnostic::warn(format!(
        "Protected Group [{}]{}: Disparity {} (threshold {})",
        issue.group, attribute, issue.disparity, FAIRNESS_THRESHOLD
    ))
}

fn significance_lines(p_values: &[FeaturePValue]) -> Vec<Diagnostic> {
    let mut lines = vec![Diagnostic::info(format!(
        "Statistical Significance (KS-Test p < {SIGNIFICANCE_LEVEL})"
    ))];
    if p_values.is_empty() {
        lines.push(Diagnostic::info("No statistically significant drift detected."));
    } else {
        lines.extend(p_values.iter().map(|p| {
            Diagnostic::info(format!(
                "Feature: {:<20} | p-value: {}",
                p.feature,
                format_p_value(p.p_value)
            ))
        }));
    }
    lines
}

/// Tiny p-values switch to exponent notation, as a JS number would print.
fn format_p_value(p: f64) -> String {
    if p != 0.0 && p.abs() < 1e-6 {
        format!("{p:e}")
    } else {
        p.to_string()
    }
}

/// Two decimals with ties rounded away from zero (`0.125` -> `0.13`).
fn format_score(score: f64) -> String {
    format!("{:.2}", (score * 100.0).round() / 100.0)
}

fn leaderboard_row(entry: &LeaderboardEntry) -> LeaderboardRow {
    LeaderboardRow {
        feature: entry.feature.clone(),
        impact_tag: entry.impact_tag.as_str().to_string(),
        badge_color: palette::impact_color(&entry.impact_tag).to_string(),
        suggested_action: entry.suggested_action.clone(),
        score: format_score(entry.score),
        score_color: palette::score_color(&entry.impact_tag, entry.detected).to_string(),
    }
}

/// Writes the diagnostic lines to the log. Never affects control flow.
pub fn emit_diagnostics(view: &DashboardView) {
    for line in &view.diagnostics {
        match line.level {
            DiagnosticLevel::Warn => log::warn!("{}", line.message),
            DiagnosticLevel::Info => log::info!("{}", line.message),
        }
    }
}
