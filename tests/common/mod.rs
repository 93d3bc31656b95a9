// tests/common/mod.rs
#![allow(dead_code)]

use driftdeck::client::{AnalysisClient, AnalysisRequest, DatasetFile, RawResponse};
use driftdeck::errors::{DashError, Result};
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub enum Reply {
    Json(u16, Value),
    Bytes(u16, Vec<u8>),
    Unreachable(String),
}

/// Ordered record of what happened, shared between a client and a surface.
pub type Timeline = Rc<RefCell<Vec<String>>>;

/// Answers every request with a canned reply and counts the calls.
pub struct FakeClient {
    reply: Reply,
    pub calls: Rc<Cell<usize>>,
    timeline: Option<Timeline>,
}

impl FakeClient {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Rc::new(Cell::new(0)),
            timeline: None,
        }
    }

    /// Appends `"request"` to `timeline` whenever `analyze` runs.
    pub fn with_timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = Some(timeline);
        self
    }
}

impl AnalysisClient for FakeClient {
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<RawResponse> {
        self.calls.set(self.calls.get() + 1);
        if let Some(timeline) = &self.timeline {
            timeline.borrow_mut().push("request".to_string());
        }
        match &self.reply {
            Reply::Json(status, body) => Ok(RawResponse {
                status: *status,
                body: serde_json::to_vec(body)?,
            }),
            Reply::Bytes(status, body) => Ok(RawResponse {
                status: *status,
                body: body.clone(),
            }),
            Reply::Unreachable(msg) => Err(DashError::Transport(msg.clone())),
        }
    }
}

pub fn reference() -> DatasetFile {
    DatasetFile::new("reference.csv", b"age,income\n39,50000\n".to_vec())
}

pub fn current() -> DatasetFile {
    DatasetFile::new("current.csv", b"age,income\n52,71000\n".to_vec())
}

/// A complete success body as the analysis service sends it.
pub fn success_body(data_overrides: Value) -> Value {
    let mut data = json!({
        "html_report": "<html><body><h1>Drift Report</h1></body></html>",
        "meta": {"version": "v3", "timestamp": "2026-10-19 09:00:00", "cooldown": false},
        "automation": {
            "action": "NO ACTION", "status": "HEALTHY", "color": "#22c55e", "rule": "Nominal",
            "details": "Stable.", "pipeline": "Monitor", "strategy": "N/A"
        },
        "financials": {
            "risk_amount": "$3,450",
            "disclaimer": "*Risk = Vol * $150 (Avg Cost) * Est. Error Rate"
        },
        "rigor": {"fairness": [], "p_values": []},
        "model_health": {"reliability": "STABLE", "est_f1_drop": "-0.4%", "target_drift": "0.010"},
        "leaderboard": [
            {"feature": "income", "impact_tag": "CRITICAL", "suggested_action": "URGENT: Label Shift",
             "detected": true, "score": 0.873, "weight": 10.0},
            {"feature": "age", "impact_tag": "HIGH", "suggested_action": "Retrain (Demographic Shift)",
             "detected": false, "score": 0.41, "weight": 2.5}
        ]
    });
    if let (Some(target), Some(patch)) = (data.as_object_mut(), data_overrides.as_object()) {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
    json!({"status": "success", "data": data})
}
