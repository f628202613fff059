//! Backend error mapping.
//!
//! The comparison endpoint reports validation failures as structured field
//! errors with paths like `left.inputs.milkingVacuumMaxInHg`. This module
//! folds those back into the same field-keyed per-side shape the local
//! validator produces, so both error sources render identically. Every
//! parse and property access is guarded: malformed payloads degrade to a
//! generic message, never a panic.

use lf_settings::{FieldErrors, FieldKey, Sides};
use serde_json::Value;

/// HTTP status the backend uses for validation rejections.
const STATUS_UNPROCESSABLE: u16 = 422;

/// Shown when a failure carries no usable message at all.
pub const MSG_COMPARE_FALLBACK: &str = "Errore durante il confronto impostazioni.";

/// Summary used when the backend sends field errors without a message.
pub const MSG_INVALID_INPUTS: &str = "Invalid inputs";

/// Failure from a comparison call: HTTP status when one was received, the
/// raw error message, and the response body when it parsed as JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportError {
    pub status: Option<u16>,
    pub message: String,
    pub payload: Option<Value>,
}

/// Uniform rendering shape for local and remote validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedCompareError {
    pub message: String,
    pub field_errors: Sides<FieldErrors>,
    pub is_validation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SideTag {
    Left,
    Right,
}

/// Map a failed comparison call into per-side field errors.
pub fn map_compare_error(err: &TransportError) -> MappedCompareError {
    let payload = resolve_payload(err);

    if let Some(payload) = &payload {
        // Unwrap one `detail` envelope, but only when it nests an object;
        // a bare `{"detail": "text"}` body is handled below as-is.
        let detail = match payload.get("detail") {
            Some(d) if d.is_object() => d,
            _ => payload,
        };

        if let Some(fields) = detail.pointer("/error/fields").and_then(Value::as_array) {
            return map_field_errors(detail, fields);
        }
        if let Some(text) = detail.get("detail").and_then(Value::as_str) {
            return plain(text, err.status);
        }
        if let Some(text) = detail.get("message").and_then(Value::as_str) {
            return plain(text, err.status);
        }
    }

    if !err.message.is_empty() {
        return plain(&err.message, err.status);
    }

    MappedCompareError {
        message: MSG_COMPARE_FALLBACK.to_string(),
        field_errors: Sides::default(),
        is_validation: false,
    }
}

/// Prefer the parsed body; otherwise try the message string, which some
/// transports deliver JSON-encoded, occasionally twice.
fn resolve_payload(err: &TransportError) -> Option<Value> {
    if let Some(payload) = &err.payload {
        return Some(payload.clone());
    }
    let parsed: Value = serde_json::from_str(&err.message).ok()?;
    if let Value::String(inner) = &parsed {
        return serde_json::from_str(inner).ok();
    }
    Some(parsed)
}

fn map_field_errors(detail: &Value, fields: &[Value]) -> MappedCompareError {
    let mut field_errors = Sides::<FieldErrors>::default();
    for entry in fields {
        let Some(path) = entry.get("path").and_then(Value::as_str) else {
            continue;
        };
        let Some(reason) = entry.get("reason").and_then(Value::as_str) else {
            continue;
        };
        let Some((side, field)) = split_error_path(path) else {
            continue;
        };
        let Some(key) = FieldKey::from_key(canonical_field(field)) else {
            tracing::debug!(path, "skipping unrecognized field in backend error");
            continue;
        };
        let errors = match side {
            SideTag::Left => &mut field_errors.left,
            SideTag::Right => &mut field_errors.right,
        };
        errors.insert(key, reason.to_string());
    }

    let message = detail
        .pointer("/error/message")
        .and_then(Value::as_str)
        .unwrap_or(MSG_INVALID_INPUTS)
        .to_string();

    MappedCompareError {
        message,
        field_errors,
        is_validation: true,
    }
}

/// Split `left.inputs.<field>` / `right.inputs.<field>`; anything else is
/// not a field error we can place.
fn split_error_path(path: &str) -> Option<(SideTag, &str)> {
    let (tag, field) = if let Some(rest) = path.strip_prefix("left.inputs.") {
        (SideTag::Left, rest)
    } else if let Some(rest) = path.strip_prefix("right.inputs.") {
        (SideTag::Right, rest)
    } else {
        return None;
    };
    (!field.is_empty()).then_some((tag, field))
}

/// Imperial wire names map back to the canonical metric-named keys; all
/// other names pass through unchanged.
fn canonical_field(name: &str) -> &str {
    match name {
        "milkingVacuumMaxInHg" => "milkingVacuumMaxKpa",
        "pfVacuumInHg" => "pfVacuumKpa",
        "omVacuumInHg" => "omVacuumKpa",
        other => other,
    }
}

fn plain(message: &str, status: Option<u16>) -> MappedCompareError {
    MappedCompareError {
        message: message.to_string(),
        field_errors: Sides::default(),
        is_validation: status == Some(STATUS_UNPROCESSABLE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_payload(status: Option<u16>, payload: Value) -> TransportError {
        TransportError {
            status,
            message: String::new(),
            payload: Some(payload),
        }
    }

    #[test]
    fn structured_field_errors_map_to_sides() {
        let err = with_payload(
            Some(422),
            json!({
                "detail": {
                    "error": {
                        "message": "Inputs out of range",
                        "fields": [
                            { "path": "left.inputs.milkingVacuumMaxInHg", "reason": "too high" },
                            { "path": "right.inputs.ratioPct", "reason": "out of range" }
                        ]
                    }
                }
            }),
        );
        let mapped = map_compare_error(&err);

        assert!(mapped.is_validation);
        assert_eq!(mapped.message, "Inputs out of range");
        assert_eq!(
            mapped
                .field_errors
                .left
                .get(&FieldKey::MilkingVacuumMaxKpa)
                .map(String::as_str),
            Some("too high")
        );
        assert_eq!(
            mapped
                .field_errors
                .right
                .get(&FieldKey::RatioPct)
                .map(String::as_str),
            Some("out of range")
        );
        assert_eq!(mapped.field_errors.left.len(), 1);
    }

    #[test]
    fn field_errors_without_summary_get_default_message() {
        let err = with_payload(
            Some(422),
            json!({
                "detail": {
                    "error": {
                        "fields": [
                            { "path": "left.inputs.pfVacuumKpa", "reason": "bad" }
                        ]
                    }
                }
            }),
        );
        let mapped = map_compare_error(&err);
        assert_eq!(mapped.message, MSG_INVALID_INPUTS);
        assert!(mapped.is_validation);
    }

    #[test]
    fn malformed_entries_and_foreign_paths_are_skipped() {
        let err = with_payload(
            Some(422),
            json!({
                "detail": {
                    "error": {
                        "fields": [
                            { "path": "left.inputs.", "reason": "empty field" },
                            { "path": "center.inputs.ratioPct", "reason": "no such side" },
                            { "path": "left.inputs.notAField", "reason": "unknown" },
                            { "reason": "no path" },
                            { "path": "right.inputs.omVacuumInHg" },
                            { "path": "right.inputs.omVacuumInHg", "reason": "kept" }
                        ]
                    }
                }
            }),
        );
        let mapped = map_compare_error(&err);
        assert!(mapped.field_errors.left.is_empty());
        assert_eq!(
            mapped
                .field_errors
                .right
                .get(&FieldKey::OmVacuumKpa)
                .map(String::as_str),
            Some("kept")
        );
    }

    #[test]
    fn double_encoded_message_is_unwrapped() {
        let body = json!({
            "detail": {
                "error": {
                    "fields": [{ "path": "left.inputs.frequencyBpm", "reason": "too fast" }]
                }
            }
        });
        // Encode twice: the message is a JSON string holding more JSON.
        let once = serde_json::to_string(&body).unwrap();
        let twice = serde_json::to_string(&once).unwrap();
        let err = TransportError {
            status: Some(422),
            message: twice,
            payload: None,
        };
        let mapped = map_compare_error(&err);
        assert_eq!(
            mapped
                .field_errors
                .left
                .get(&FieldKey::FrequencyBpm)
                .map(String::as_str),
            Some("too fast")
        );
    }

    #[test]
    fn detail_string_respects_status() {
        let err = with_payload(Some(422), json!({ "detail": "limit exceeded" }));
        let mapped = map_compare_error(&err);
        assert_eq!(mapped.message, "limit exceeded");
        assert!(mapped.is_validation);
        assert!(mapped.field_errors.left.is_empty());

        let err = with_payload(Some(500), json!({ "detail": "boom" }));
        let mapped = map_compare_error(&err);
        assert_eq!(mapped.message, "boom");
        assert!(!mapped.is_validation);
    }

    #[test]
    fn message_property_in_payload_is_used() {
        let err = with_payload(Some(400), json!({ "message": "bad request" }));
        let mapped = map_compare_error(&err);
        assert_eq!(mapped.message, "bad request");
        assert!(!mapped.is_validation);
    }

    #[test]
    fn unparseable_message_falls_back_verbatim() {
        let err = TransportError {
            status: Some(503),
            message: "connection reset".to_string(),
            payload: None,
        };
        let mapped = map_compare_error(&err);
        assert_eq!(mapped.message, "connection reset");
        assert!(!mapped.is_validation);
        assert!(mapped.field_errors.left.is_empty());
        assert!(mapped.field_errors.right.is_empty());
    }

    #[test]
    fn empty_error_gets_generic_fallback() {
        let mapped = map_compare_error(&TransportError::default());
        assert_eq!(mapped.message, MSG_COMPARE_FALLBACK);
        assert!(!mapped.is_validation);
    }

    #[test]
    fn unrecognized_json_payload_falls_through_to_message() {
        let err = TransportError {
            status: None,
            message: "original text".to_string(),
            payload: Some(json!({ "foo": 1 })),
        };
        let mapped = map_compare_error(&err);
        assert_eq!(mapped.message, "original text");
        assert!(!mapped.is_validation);
    }
}
