//! lf-settings: pulsation setting input validation.
//!
//! The setting calculator compares two liner configurations. Each side
//! carries eight raw form values (vacuum levels, pulsation timing); this
//! crate parses them, applies the per-field and cross-field rules, and
//! reports errors keyed by field so a front-end can highlight the exact
//! input. No I/O and no shared state: every function is pure.

pub mod compare;
pub mod fields;
pub mod side;

pub use compare::{CompareReport, Sides, validate_compare_inputs};
pub use fields::{FieldDef, FieldKey, UnitSystem, setting_fields};
pub use side::{FieldErrors, RawValue, SideInput, SideReport, SideValues, validate_side};
