// src/orchestrator.rs
use std::time::Instant;
use uuid::Uuid;

use crate::classifier::classify;
use crate::client::{AnalysisClient, AnalysisRequest, DatasetFile, RawResponse};
use crate::dashboard;
use crate::errors::Result;
use crate::models::{AnalysisPayload, AnalysisResult, FailureKind};
use crate::pacing::RevealPacer;
use crate::report::ReportRenderer;
use crate::surface::{Alert, AlertCategory, Surface};
use crate::ui::{Phase, Transition, UiState};

/// Drives one submission from the form to a terminal UI state.
///
/// `submit` borrows the orchestrator mutably for the whole cycle, so a
/// second submission cannot start while one is in flight.
pub struct Orchestrator<C, S> {
    client: C,
    surface: S,
    ui: UiState,
    pacer: RevealPacer,
    renderer: ReportRenderer,
}

impl<C: AnalysisClient, S: Surface> Orchestrator<C, S> {
    pub fn new(client: C, surface: S, pacer: RevealPacer) -> Self {
        let mut orchestrator = Self {
            client,
            surface,
            ui: UiState::new(),
            pacer,
            renderer: ReportRenderer::default(),
        };
        orchestrator.publish();
        orchestrator
    }

    pub fn phase(&self) -> Phase {
        self.ui.phase()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Validates the pair, sends it, and renders whatever comes back.
    ///
    /// A missing or empty dataset returns [`crate::errors::DashError::Validation`] without
    /// touching the network or the UI phase. Every other path ends with the
    /// submit control enabled again.
    pub async fn submit(
        &mut self,
        reference: Option<DatasetFile>,
        current: Option<DatasetFile>,
    ) -> Result<AnalysisResult> {
        let request = match AnalysisRequest::new(reference, current) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("submission rejected locally: {}", e);
                self.surface
                    .alert(&Alert::new(AlertCategory::Validation, "Both datasets required."));
                return Err(e);
            }
        };

        self.transition(Transition::Submit)?;

        let submission_id = Uuid::new_v4();
        let start = Instant::now();
        log::info!(
            "🚀 Submission {}: {} vs {}",
            submission_id,
            request.reference().name,
            request.current().name
        );

        let result = match self.client.analyze(&request).await {
            Ok(raw) => classify(&raw),
            Err(e) => AnalysisResult::transport_failure(e.to_string()),
        };

        log::info!(
            "Submission {} classified as {} after {}ms",
            submission_id,
            outcome_label(&result),
            start.elapsed().as_millis()
        );

        match &result {
            AnalysisResult::Success(payload) => {
                self.pacer.pause().await;
                self.reveal(payload)?;
            }
            failed => {
                if let Some(alert) = failure_alert(failed) {
                    self.fail(alert)?;
                }
            }
        }

        Ok(result)
    }

    fn reveal(&mut self, payload: &AnalysisPayload) -> Result<()> {
        let document = self.renderer.render(&payload.html_report);
        if let Err(e) = self.surface.show_report(&document) {
            log::error!("report could not be displayed: {}", e);
            self.fail(Alert::new(AlertCategory::Service, e.to_string()))?;
            return Err(e);
        }

        let visibility = self.ui.reveal_panels();
        self.surface.apply(self.ui.phase(), &visibility);

        let view = dashboard::update_dashboard(payload);
        dashboard::emit_diagnostics(&view);
        self.surface.show_dashboard(&view);

        self.transition(Transition::Reveal)
    }

    fn fail(&mut self, alert: Alert) -> Result<()> {
        log::warn!("{}: {}", alert.category.title(), alert.message);
        self.surface.alert(&alert);
        self.transition(Transition::Reset)
    }

    fn transition(&mut self, transition: Transition) -> Result<()> {
        let visibility = self.ui.dispatch(transition)?;
        self.surface.apply(self.ui.phase(), &visibility);
        Ok(())
    }

    fn publish(&mut self) {
        let visibility = self.ui.visibility();
        self.surface.apply(self.ui.phase(), &visibility);
    }
}

fn outcome_label(result: &AnalysisResult) -> &'static str {
    match result {
        AnalysisResult::ContractViolation { .. } => "contract violation",
        AnalysisResult::Success(_) => "success",
        AnalysisResult::Failure { kind: FailureKind::Transport, .. } => "transport failure",
        AnalysisResult::Failure { kind: FailureKind::Service, .. } => "service failure",
    }
}

/// Renders an already received response without any network call or UI phase.
///
/// Used to replay a saved verdict; goes through the same classifier and
/// dashboard mapping as a live submission.
pub fn replay<S: Surface>(
    raw: &RawResponse,
    surface: &mut S,
    renderer: &ReportRenderer,
) -> Result<AnalysisResult> {
    let result = classify(raw);
    match &result {
        AnalysisResult::Success(payload) => {
            surface.show_report(&renderer.render(&payload.html_report))?;
            let view = dashboard::update_dashboard(payload);
            dashboard::emit_diagnostics(&view);
            surface.show_dashboard(&view);
        }
        failed => {
            if let Some(alert) = failure_alert(failed) {
                surface.alert(&alert);
            }
        }
    }
    Ok(result)
}

/// The notification for a failed outcome; `None` for a success.
pub fn failure_alert(result: &AnalysisResult) -> Option<Alert> {
    match result {
        AnalysisResult::Success(_) => None,
        AnalysisResult::ContractViolation { errors } => Some(Alert::contract_violation(errors)),
        AnalysisResult::Failure { kind, message } => {
            Some(Alert::new(AlertCategory::from(*kind), message.clone()))
        }
    }
}
