//! Comparison request wire schema.

use lf_core::Real;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire schema revision understood by the comparison endpoint.
pub const COMPARE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub schema_version: u32,
    /// Unique per submission; lets the backend deduplicate retries.
    pub request_id: String,
    pub left: SideRequest,
    pub right: SideRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SideRequest {
    pub product_application_id: i64,
    /// Field-keyed numeric inputs. Pressure keys are the metric `*Kpa`
    /// names, or renamed `*InHg` with converted values under Imperial.
    pub inputs: BTreeMap<String, Real>,
}
