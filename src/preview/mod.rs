// src/preview/mod.rs
//! Local preview server mirroring the dashboard in a browser.

use actix_web::{App, HttpServer, dev::Server, middleware, web};

use crate::dashboard::DashboardView;
use crate::errors::Result;
use crate::report::ReportDocument;
use crate::surface::{Alert, Surface};
use crate::ui::{Phase, Visibility};

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::configure_routes;
pub use state::{PreviewState, Snapshot};

/// Publishes every surface call to the preview state, then forwards it.
pub struct PreviewSurface<S> {
    inner: S,
    state: PreviewState,
}

impl<S: Surface> PreviewSurface<S> {
    pub fn new(inner: S, state: PreviewState) -> Self {
        Self { inner, state }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Surface> Surface for PreviewSurface<S> {
    fn apply(&mut self, phase: Phase, visibility: &Visibility) {
        {
            let mut snapshot = self.state.write();
            snapshot.phase = phase;
            snapshot.visibility = *visibility;
            if phase == Phase::Processing {
                snapshot.alert = None;
            }
        }
        self.inner.apply(phase, visibility);
    }

    fn alert(&mut self, alert: &Alert) {
        self.state.write().alert = Some(alert.clone());
        self.inner.alert(alert);
    }

    fn show_report(&mut self, document: &ReportDocument) -> Result<()> {
        self.state.write().report = Some(document.clone());
        self.inner.show_report(document)
    }

    fn show_dashboard(&mut self, view: &DashboardView) {
        self.state.write().dashboard = Some(view.clone());
        self.inner.show_dashboard(view);
    }
}

/// Binds the preview app; the caller decides where to run the returned server.
pub fn start_server(bind: &str, state: PreviewState) -> std::io::Result<(Server, Vec<std::net::SocketAddr>)> {
    let data = web::Data::new(state);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .workers(1)
    .bind(bind)?;

    let addrs = server.addrs();
    Ok((server.run(), addrs))
}
