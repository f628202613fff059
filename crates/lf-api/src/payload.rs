//! Request payload shaping.

use crate::error::{ApiError, ApiResult};
use crate::schema::{COMPARE_SCHEMA_VERSION, CompareRequest, SideRequest};
use lf_core::{CoreError, Real, ensure_finite, kpa_to_inhg};
use lf_settings::{FieldKey, SideValues, UnitSystem};
use std::collections::BTreeMap;

/// One side of a comparison ready for submission: the product application
/// being compared plus its validated values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidePayload {
    pub product_application_id: i64,
    pub values: SideValues,
}

/// Key the backend expects for a field under the given unit system. Only
/// the pressure fields are renamed; everything else keeps its canonical
/// name.
fn wire_key(key: FieldKey, system: UnitSystem) -> &'static str {
    if system == UnitSystem::Imperial {
        match key {
            FieldKey::MilkingVacuumMaxKpa => return "milkingVacuumMaxInHg",
            FieldKey::PfVacuumKpa => return "pfVacuumInHg",
            FieldKey::OmVacuumKpa => return "omVacuumInHg",
            _ => {}
        }
    }
    key.as_key()
}

fn side_inputs(values: &SideValues, system: UnitSystem) -> ApiResult<BTreeMap<String, Real>> {
    let mut inputs = BTreeMap::new();
    for key in FieldKey::ALL {
        let value = values
            .get(key)
            .ok_or(ApiError::MissingField { field: key })?;
        let value = ensure_finite(value, key.as_key())?;
        // Converted values go out unrounded; rounding is display-only.
        let value = if system == UnitSystem::Imperial && key.is_pressure() {
            kpa_to_inhg(value).ok_or(CoreError::NonFinite {
                what: key.as_key(),
                value,
            })?
        } else {
            value
        };
        inputs.insert(wire_key(key, system).to_string(), value);
    }
    Ok(inputs)
}

/// Build the comparison request body from two validated sides.
///
/// Callers run [`lf_settings::validate_compare_inputs`] first; a side with
/// any missing field is rejected here rather than sent half-filled.
pub fn build_compare_request(
    system: UnitSystem,
    left: &SidePayload,
    right: &SidePayload,
) -> ApiResult<CompareRequest> {
    let request = CompareRequest {
        schema_version: COMPARE_SCHEMA_VERSION,
        request_id: uuid::Uuid::new_v4().to_string(),
        left: SideRequest {
            product_application_id: left.product_application_id,
            inputs: side_inputs(&left.values, system)?,
        },
        right: SideRequest {
            product_application_id: right.product_application_id,
            inputs: side_inputs(&right.values, system)?,
        },
    };
    tracing::debug!(request_id = %request.request_id, "built comparison request");
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_values() -> SideValues {
        SideValues {
            milking_vacuum_max_kpa: Some(45.0),
            pf_vacuum_kpa: Some(33.0),
            om_vacuum_kpa: Some(38.0),
            om_duration_sec: Some(0.2),
            frequency_bpm: Some(60.0),
            ratio_pct: Some(60.0),
            phase_a_ms: Some(150.0),
            phase_c_ms: Some(120.0),
        }
    }

    fn payload(id: i64) -> SidePayload {
        SidePayload {
            product_application_id: id,
            values: complete_values(),
        }
    }

    #[test]
    fn metric_request_keeps_kpa_keys() {
        let request =
            build_compare_request(UnitSystem::Metric, &payload(11), &payload(22)).unwrap();
        assert_eq!(request.schema_version, COMPARE_SCHEMA_VERSION);
        assert_eq!(request.left.product_application_id, 11);
        assert_eq!(request.right.product_application_id, 22);
        assert_eq!(request.left.inputs["milkingVacuumMaxKpa"], 45.0);
        assert_eq!(request.left.inputs["frequencyBpm"], 60.0);
        assert_eq!(request.left.inputs.len(), 8);
    }

    #[test]
    fn imperial_request_renames_and_converts_pressures() {
        let request =
            build_compare_request(UnitSystem::Imperial, &payload(11), &payload(22)).unwrap();
        let inputs = &request.left.inputs;
        assert!(!inputs.contains_key("milkingVacuumMaxKpa"));
        assert!((inputs["milkingVacuumMaxInHg"] - 13.2885).abs() < 1e-3);
        assert!(inputs.contains_key("pfVacuumInHg"));
        assert!(inputs.contains_key("omVacuumInHg"));
        // Non-pressure fields pass through untouched.
        assert_eq!(inputs["ratioPct"], 60.0);
        assert_eq!(inputs["phaseAMs"], 150.0);
        assert_eq!(inputs.len(), 8);
    }

    #[test]
    fn missing_field_is_rejected() {
        let mut side = payload(11);
        side.values.phase_c_ms = None;
        let err = build_compare_request(UnitSystem::Metric, &side, &payload(22)).unwrap_err();
        assert!(matches!(
            err,
            ApiError::MissingField {
                field: FieldKey::PhaseCMs
            }
        ));
    }

    #[test]
    fn request_ids_are_unique_per_build() {
        let a = build_compare_request(UnitSystem::Metric, &payload(1), &payload(2)).unwrap();
        let b = build_compare_request(UnitSystem::Metric, &payload(1), &payload(2)).unwrap();
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn request_serializes_camel_case() {
        let request =
            build_compare_request(UnitSystem::Metric, &payload(1), &payload(2)).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("schemaVersion").is_some());
        assert!(json.get("requestId").is_some());
        assert!(json.pointer("/left/productApplicationId").is_some());
        assert!(json.pointer("/left/inputs/milkingVacuumMaxKpa").is_some());
    }
}
