// src/report.rs
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::errors::{DashError, Result};

/// Strictest sandbox: no scripts, no same-origin access, no forms.
pub const SANDBOX_POLICY: &str = "sandbox";

pub const REPORT_FILE_NAME: &str = "report.html";

/// A complete report document ready for an isolated display surface.
///
/// The markup comes from the analysis service and is passed through
/// untouched. Surfaces that can isolate it apply `content_security_policy`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub html: String,
    pub content_security_policy: String,
}

#[derive(Debug, Clone)]
pub struct ReportRenderer {
    policy: String,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self {
            policy: SANDBOX_POLICY.to_string(),
        }
    }
}

impl ReportRenderer {
    pub fn render(&self, html_report: &str) -> ReportDocument {
        ReportDocument {
            html: html_report.to_string(),
            content_security_policy: self.policy.clone(),
        }
    }
}

/// Replaces the report file in `dir` with `document`, creating `dir` if needed.
pub fn write_report(dir: &Path, document: &ReportDocument) -> Result<PathBuf> {
    let path = dir.join(REPORT_FILE_NAME);
    let wrap = |source: std::io::Error| DashError::ReportWrite {
        path: path.display().to_string(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(wrap)?;
    std::fs::write(&path, &document.html).map_err(wrap)?;
    Ok(path)
}
