//! Two-side comparison validation.

use crate::side::{FieldErrors, SideInput, SideValues, validate_side};
use serde::Serialize;

/// Left/right pair. The two sides of a comparison never interact, so most
/// operations map over both independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Sides<T> {
    pub left: T,
    pub right: T,
}

/// Aggregated outcome of validating both sides.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareReport {
    pub has_errors: bool,
    pub errors: Sides<FieldErrors>,
    pub normalized: Sides<SideValues>,
}

/// Run the side validator on each side and aggregate. A left-side value
/// never constrains a right-side field.
pub fn validate_compare_inputs(left: &SideInput, right: &SideInput) -> CompareReport {
    let left = validate_side(left);
    let right = validate_side(right);
    let has_errors = !left.errors.is_empty() || !right.errors.is_empty();
    CompareReport {
        has_errors,
        errors: Sides {
            left: left.errors,
            right: right.errors,
        },
        normalized: Sides {
            left: left.values,
            right: right.values,
        },
    }
}
