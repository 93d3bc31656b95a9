// src/surface/recording.rs
use crate::dashboard::DashboardView;
use crate::errors::Result;
use crate::report::ReportDocument;
use crate::surface::{Alert, Surface};
use crate::ui::{Phase, Visibility};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Applied(Phase, Visibility),
    Alerted(Alert),
    Report(ReportDocument),
    Dashboard(DashboardView),
}

/// Keeps every call in memory. Used by tests and by `--json` output.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<&Alert> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Alerted(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    pub fn last_visibility(&self) -> Option<(Phase, Visibility)> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Applied(phase, vis) => Some((*phase, *vis)),
            _ => None,
        })
    }

    pub fn last_dashboard(&self) -> Option<&DashboardView> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Dashboard(view) => Some(view),
            _ => None,
        })
    }

    pub fn last_report(&self) -> Option<&ReportDocument> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Report(doc) => Some(doc),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn apply(&mut self, phase: Phase, visibility: &Visibility) {
        self.events.push(SurfaceEvent::Applied(phase, *visibility));
    }

    fn alert(&mut self, alert: &Alert) {
        self.events.push(SurfaceEvent::Alerted(alert.clone()));
    }

    fn show_report(&mut self, document: &ReportDocument) -> Result<()> {
        self.events.push(SurfaceEvent::Report(document.clone()));
        Ok(())
    }

    fn show_dashboard(&mut self, view: &DashboardView) {
        self.events.push(SurfaceEvent::Dashboard(view.clone()));
    }
}
