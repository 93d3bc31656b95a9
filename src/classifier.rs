// src/classifier.rs
use serde::Deserialize;
use serde_json::Value;

use crate::client::RawResponse;
use crate::errors::DashError;
use crate::models::{AnalysisPayload, AnalysisResult};

pub const CONTRACT_VIOLATION_STATUS: u16 = 400;
pub const DEFAULT_FAILURE_MESSAGE: &str = "Analysis Failed";

#[derive(Deserialize)]
struct ContractViolationBody {
    detail: ContractViolationDetail,
}

#[derive(Deserialize)]
struct ContractViolationDetail {
    errors: Vec<String>,
}

/// Maps a raw response onto exactly one [`AnalysisResult`].
///
/// Rules, first match wins:
/// 1. HTTP 400 is a data-contract violation carrying `detail.errors`.
/// 2. A body with `status == "success"` is decoded into the full payload.
/// 3. Anything else is a failure, using `message` when the body has one.
///
/// Bodies that cannot be decoded become transport failures.
pub fn classify(raw: &RawResponse) -> AnalysisResult {
    if raw.status == CONTRACT_VIOLATION_STATUS {
        return match serde_json::from_slice::<ContractViolationBody>(&raw.body) {
            Ok(body) => AnalysisResult::ContractViolation {
                errors: body.detail.errors,
            },
            Err(e) => AnalysisResult::transport_failure(format!(
                "unreadable contract violation body: {e}"
            )),
        };
    }

    let body: Value = match serde_json::from_slice(&raw.body) {
        Ok(body) => body,
        Err(e) => {
            return AnalysisResult::transport_failure(format!(
                "response body is not JSON (HTTP {}): {e}",
                raw.status
            ));
        }
    };

    if body.get("status").and_then(Value::as_str) == Some("success") {
        return match decode_payload(&body) {
            Ok(payload) => AnalysisResult::Success(Box::new(payload)),
            Err(e) => AnalysisResult::transport_failure(e.to_string()),
        };
    }

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_FAILURE_MESSAGE);
    AnalysisResult::service_failure(message)
}

fn decode_payload(body: &Value) -> Result<AnalysisPayload, DashError> {
    let data = body
        .get("data")
        .ok_or_else(|| DashError::MalformedPayload("missing field `data`".to_string()))?;
    AnalysisPayload::deserialize(data).map_err(|e| DashError::MalformedPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FailureKind;
    use serde_json::json;

    fn raw(status: u16, body: Value) -> RawResponse {
        RawResponse {
            status,
            body: serde_json::to_vec(&body).unwrap(),
        }
    }

    fn success_body() -> Value {
        json!({
            "status": "success",
            "data": {
                "html_report": "<html><body>report</body></html>",
                "automation": {
                    "action": "NO ACTION", "color": "#22c55e", "rule": "Nominal",
                    "details": "Stable.", "pipeline": "Monitor", "strategy": "N/A"
                },
                "financials": {"risk_amount": "$1,200", "disclaimer": "*Risk = Vol * $150"},
                "rigor": {"fairness": [], "p_values": []},
                "model_health": {"reliability": "STABLE", "est_f1_drop": "-0.0%"},
                "leaderboard": []
            }
        })
    }

    #[test]
    fn test_contract_violation_keeps_error_order() {
        let result = classify(&raw(
            400,
            json!({"detail": {"message": "Data Contract Violation", "errors": ["missing column X", "type mismatch Y"]}}),
        ));
        assert_eq!(
            result,
            AnalysisResult::ContractViolation {
                errors: vec!["missing column X".to_string(), "type mismatch Y".to_string()]
            }
        );
    }

    #[test]
    fn test_contract_violation_wins_over_success_status() {
        let result = classify(&raw(400, json!({"status": "success", "detail": {"errors": ["bad"]}})));
        assert!(matches!(result, AnalysisResult::ContractViolation { .. }));
    }

    #[test]
    fn test_malformed_400_is_transport_failure() {
        let result = classify(&raw(400, json!({"detail": "oops"})));
        assert!(matches!(
            result,
            AnalysisResult::Failure { kind: FailureKind::Transport, .. }
        ));
    }

    #[test]
    fn test_success_decodes_payload() {
        let result = classify(&raw(200, success_body()));
        match result {
            AnalysisResult::Success(payload) => {
                assert_eq!(payload.automation.action, "NO ACTION");
                assert!(payload.meta.is_none());
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_success_missing_field_fails_loudly() {
        let mut body = success_body();
        body["data"].as_object_mut().unwrap().remove("financials");
        match classify(&raw(200, body)) {
            AnalysisResult::Failure { kind, message } => {
                assert_eq!(kind, FailureKind::Transport);
                assert!(message.contains("financials"), "message: {message}");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_uses_service_message() {
        let result = classify(&raw(200, json!({"status": "error", "message": "engine crashed"})));
        assert_eq!(result, AnalysisResult::service_failure("engine crashed"));
    }

    #[test]
    fn test_failure_without_message_uses_default() {
        let result = classify(&raw(500, json!({"detail": "Internal Server Error"})));
        assert_eq!(result, AnalysisResult::service_failure(DEFAULT_FAILURE_MESSAGE));
    }

    #[test]
    fn test_non_json_body_is_transport_failure() {
        let result = classify(&RawResponse {
            status: 502,
            body: b"<html>Bad Gateway</html>".to_vec(),
        });
        assert!(matches!(
            result,
            AnalysisResult::Failure { kind: FailureKind::Transport, .. }
        ));
    }
}
