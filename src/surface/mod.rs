// src/surface/mod.rs

use serde::Serialize;

use crate::dashboard::DashboardView;
use crate::errors::Result;
use crate::models::FailureKind;
use crate::report::ReportDocument;
use crate::ui::{Phase, Visibility};

pub mod recording;
pub mod terminal;

pub use recording::{RecordingSurface, SurfaceEvent};
pub use terminal::TerminalSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    Validation,
    ContractViolation,
    Transport,
    Service,
}

impl AlertCategory {
    pub fn title(&self) -> &'static str {
        match self {
            AlertCategory::Validation => "⚠️ System Alert",
            AlertCategory::ContractViolation => "❌ DATA CONTRACT VIOLATION",
            AlertCategory::Transport => "❌ Transport Error",
            AlertCategory::Service => "❌ Analysis Failed",
        }
    }
}

impl From<FailureKind> for AlertCategory {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::Transport => AlertCategory::Transport,
            FailureKind::Service => AlertCategory::Service,
        }
    }
}

/// A blocking notification shown before the dashboard returns to idle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub category: AlertCategory,
    pub message: String,
}

impl Alert {
    pub fn new(category: AlertCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// All contract errors, one per line, in the order the service sent them.
    pub fn contract_violation(errors: &[String]) -> Self {
        Self::new(AlertCategory::ContractViolation, errors.join("\n"))
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:\n{}", self.category.title(), self.message)
    }
}

/// Where the dashboard is drawn.
///
/// The orchestrator drives every call; implementations only display what
/// they are handed and keep no decision logic of their own.
pub trait Surface {
    /// Shows or hides the form, progress indicator, report and panels.
    fn apply(&mut self, phase: Phase, visibility: &Visibility);

    fn alert(&mut self, alert: &Alert);

    /// Replaces the whole report view with `document`.
    fn show_report(&mut self, document: &ReportDocument) -> Result<()>;

    fn show_dashboard(&mut self, view: &DashboardView);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_alert_lists_errors_in_order() {
        let alert = Alert::contract_violation(&["missing column X".to_string(), "type mismatch Y".to_string()]);
        let text = alert.to_string();
        let x = text.find("missing column X").unwrap();
        let y = text.find("type mismatch Y").unwrap();
        assert!(x < y);
        assert!(text.starts_with("❌ DATA CONTRACT VIOLATION"));
    }
}
