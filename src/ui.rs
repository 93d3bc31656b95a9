// src/ui.rs
use serde::Serialize;

use crate::errors::{DashError, Result};

/// The single authoritative state of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Processing,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// User submitted both datasets.
    Submit,
    /// A terminal failure path; back to the initial form.
    Reset,
    /// Report and dashboard are on screen.
    Reveal,
}

/// Which parts of the dashboard are shown. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub submit_enabled: bool,
    pub initial_view: bool,
    pub processing_indicator: bool,
    pub report_view: bool,
    pub risk_panel: bool,
    pub leaderboard_panel: bool,
}

#[derive(Debug, Clone)]
pub struct UiState {
    phase: Phase,
    panels_revealed: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            panels_revealed: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Applies a transition. This is the only place the phase changes.
    pub fn dispatch(&mut self, transition: Transition) -> Result<Visibility> {
        let next = match (self.phase, transition) {
            (Phase::Idle | Phase::Revealed, Transition::Submit) => Phase::Processing,
            (Phase::Processing, Transition::Reset) => Phase::Idle,
            (Phase::Processing, Transition::Reveal) => Phase::Revealed,
            (from, transition) => {
                return Err(DashError::InvalidTransition { from, transition });
            }
        };

        log::debug!("ui transition {:?} --{:?}--> {:?}", self.phase, transition, next);
        self.phase = next;
        Ok(self.visibility())
    }

    /// Risk and leaderboard panels stay up once the first dashboard landed.
    pub fn reveal_panels(&mut self) -> Visibility {
        self.panels_revealed = true;
        self.visibility()
    }

    pub fn visibility(&self) -> Visibility {
        let (submit_enabled, initial_view, processing_indicator, report_view) = match self.phase {
            Phase::Idle => (true, true, false, false),
            Phase::Processing => (false, false, true, false),
            Phase::Revealed => (true, false, false, true),
        };

        Visibility {
            submit_enabled,
            initial_view,
            processing_indicator,
            report_view,
            risk_panel: self.panels_revealed,
            leaderboard_panel: self.panels_revealed,
        }
    }
}
