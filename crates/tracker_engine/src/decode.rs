use serde::Deserialize;
use serde_json::Value;
use tracker_core::{StatusReply, TaskStatus};

use crate::{FailureKind, StatusQueryError};

#[derive(Debug, Deserialize)]
struct WireStatus {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Value,
}

/// Decode a status response body: `{ "status": string, "error"?: any }`.
///
/// A truthy `error` takes precedence over `status`; non-string values are
/// shown as their JSON text.
pub fn decode_status_body(bytes: &[u8]) -> Result<StatusReply, StatusQueryError> {
    let wire: WireStatus = serde_json::from_slice(bytes)
        .map_err(|err| StatusQueryError::new(FailureKind::Decode, err.to_string()))?;

    if let Some(message) = error_message(wire.error) {
        return Ok(StatusReply::Rejected { message });
    }

    match wire.status {
        Some(status) => Ok(StatusReply::Status(TaskStatus::from_wire(&status))),
        None => Err(StatusQueryError::new(
            FailureKind::Decode,
            "payload has neither status nor error",
        )),
    }
}

/// `null`, `false`, `0` and `""` mean "no error".
fn error_message(error: Value) -> Option<String> {
    match error {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) => (!message.is_empty()).then_some(message),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_and_unknown_statuses() {
        assert_eq!(
            decode_status_body(br#"{"status":"in_progress"}"#).unwrap(),
            StatusReply::Status(TaskStatus::Pending)
        );
        assert_eq!(
            decode_status_body(br#"{"status":"paused","extra":1}"#).unwrap(),
            StatusReply::Status(TaskStatus::Unknown("paused".to_string()))
        );
    }

    #[test]
    fn error_field_wins_over_status() {
        assert_eq!(
            decode_status_body(br#"{"status":"done","error":"bad id"}"#).unwrap(),
            StatusReply::Rejected {
                message: "bad id".to_string()
            }
        );
    }

    #[test]
    fn empty_or_null_error_is_ignored() {
        assert_eq!(
            decode_status_body(br#"{"status":"done","error":""}"#).unwrap(),
            StatusReply::Status(TaskStatus::Done)
        );
        assert_eq!(
            decode_status_body(br#"{"status":"done","error":null}"#).unwrap(),
            StatusReply::Status(TaskStatus::Done)
        );
    }

    #[test]
    fn non_string_error_is_shown_as_text() {
        assert_eq!(
            decode_status_body(br#"{"error":404}"#).unwrap(),
            StatusReply::Rejected {
                message: "404".to_string()
            }
        );
        assert_eq!(
            decode_status_body(br#"{"error":{"code":7}}"#).unwrap(),
            StatusReply::Rejected {
                message: r#"{"code":7}"#.to_string()
            }
        );
        assert_eq!(
            decode_status_body(br#"{"status":"done","error":0}"#).unwrap(),
            StatusReply::Status(TaskStatus::Done)
        );
        assert_eq!(
            decode_status_body(br#"{"status":"done","error":false}"#).unwrap(),
            StatusReply::Status(TaskStatus::Done)
        );
    }

    #[test]
    fn malformed_bodies_are_decode_failures() {
        for body in [&b"not json"[..], br#"{}"#, br#"{"status":5}"#, b"[]"] {
            let err = decode_status_body(body).unwrap_err();
            assert_eq!(err.kind, FailureKind::Decode, "body {:?}", body);
        }
    }
}
