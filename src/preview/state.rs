// src/preview/state.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::dashboard::DashboardView;
use crate::report::ReportDocument;
use crate::surface::Alert;
use crate::ui::{Phase, UiState, Visibility};

/// What the preview page shows right now. Each cycle overwrites it.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub visibility: Visibility,
    pub dashboard: Option<DashboardView>,
    #[serde(skip)]
    pub report: Option<ReportDocument>,
    pub alert: Option<Alert>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Snapshot {
    fn default() -> Self {
        let ui = UiState::new();
        Self {
            phase: ui.phase(),
            visibility: ui.visibility(),
            dashboard: None,
            report: None,
            alert: None,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Clone, Default)]
pub struct PreviewState {
    snapshot: Arc<RwLock<Snapshot>>,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicked writer leaves a snapshot that is still worth showing.
    pub fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.snapshot.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        let mut guard = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        guard.updated_at = Utc::now();
        guard
    }
}
