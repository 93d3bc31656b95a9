// src/client.rs

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::errors::{DashError, Result};

/// One dataset chosen by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl DatasetFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a dataset from disk, keeping only the file name for the upload.
    pub fn read(path: &std::path::Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

/// A reference/current pair that passed local validation.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    reference: DatasetFile,
    current: DatasetFile,
}

impl AnalysisRequest {
    /// Both datasets must be chosen and non-empty; nothing is sent otherwise.
    pub fn new(reference: Option<DatasetFile>, current: Option<DatasetFile>) -> Result<Self> {
        let reference = require("reference", reference)?;
        let current = require("current", current)?;
        Ok(Self { reference, current })
    }

    pub fn reference(&self) -> &DatasetFile {
        &self.reference
    }

    pub fn current(&self) -> &DatasetFile {
        &self.current
    }
}

fn require(slot: &str, file: Option<DatasetFile>) -> Result<DatasetFile> {
    match file {
        None => Err(DashError::Validation(format!("no {slot} dataset chosen"))),
        Some(f) if f.bytes.is_empty() => Err(DashError::Validation(format!(
            "{slot} dataset '{}' is empty",
            f.name
        ))),
        Some(f) => Ok(f),
    }
}

/// Status and body as received, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// The network seam: sends one request and awaits exactly one response.
///
/// Implementers must not retry; transport problems come back as
/// [`DashError::Transport`] or [`DashError::Request`].
pub trait AnalysisClient {
    fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> impl std::future::Future<Output = Result<RawResponse>>;
}

/// Talks to the remote analysis service over HTTP.
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.api_base))
    }

    pub fn with_client(client: Client, api_base: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/analyze", api_base.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn file_part(file: &DatasetFile) -> Result<Part> {
    let mime = mime_guess::from_path(&file.name).first_or_octet_stream();
    Ok(Part::bytes(file.bytes.clone())
        .file_name(file.name.clone())
        .mime_str(mime.as_ref())?)
}

impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<RawResponse> {
        let form = Form::new()
            .part("reference_file", file_part(request.reference())?)
            .part("current_file", file_part(request.current())?);

        log::info!(
            "📡 POST {} ({} vs {})",
            self.endpoint,
            request.reference().name,
            request.current().name
        );

        let start = Instant::now();
        let resp = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DashError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| DashError::Transport(e.to_string()))?
            .to_vec();

        log::info!(
            "📥 Analysis response status: {} ({}ms, {} bytes)",
            status,
            start.elapsed().as_millis(),
            body.len()
        );

        Ok(RawResponse { status, body })
    }
}
