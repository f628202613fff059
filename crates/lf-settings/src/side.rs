//! Single-side input validation.
//!
//! Rule order is load-bearing: the error map uses last-write-wins per
//! field, so a later rule replaces an earlier message when both fire.

use crate::fields::FieldKey;
use lf_core::{Real, parse_decimal};
use serde::Serialize;
use std::collections::BTreeMap;

pub const MSG_REQUIRED: &str = "Required";
pub const MSG_NON_NEGATIVE: &str = "Must be >= 0";
pub const MSG_POSITIVE: &str = "Must be > 0";
pub const MSG_RATIO_RANGE: &str = "Must be between 0 and 100";
pub const MSG_LE_MILKING_MAX: &str = "Must be <= Milking Vacuum Max";
pub const MSG_GE_PF_VACUUM: &str = "Must be >= PF Vacuum";
pub const MSG_EXCEEDS_ON_TIME: &str = "Cannot exceed ON time";
pub const MSG_EXCEEDS_OFF_TIME: &str = "Cannot exceed OFF time";

/// Raw value as captured from a form control.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(Real),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<Real> for RawValue {
    fn from(n: Real) -> Self {
        RawValue::Number(n)
    }
}

/// Raw per-field values for one side of a comparison. Missing entries mean
/// the operator left the input empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideInput {
    values: BTreeMap<FieldKey, RawValue>,
}

impl SideInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: FieldKey, value: impl Into<RawValue>) {
        self.values.insert(key, value.into());
    }

    /// Builder-style `set`, convenient in tests and callers that assemble a
    /// full side in one expression.
    pub fn with(mut self, key: FieldKey, value: impl Into<RawValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: FieldKey) -> Option<&RawValue> {
        self.values.get(&key)
    }

    pub fn clear(&mut self, key: FieldKey) {
        self.values.remove(&key);
    }
}

/// Parsed numeric values for one side; `None` marks an absent or
/// unparseable input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideValues {
    pub milking_vacuum_max_kpa: Option<Real>,
    pub pf_vacuum_kpa: Option<Real>,
    pub om_vacuum_kpa: Option<Real>,
    pub om_duration_sec: Option<Real>,
    pub frequency_bpm: Option<Real>,
    pub ratio_pct: Option<Real>,
    pub phase_a_ms: Option<Real>,
    pub phase_c_ms: Option<Real>,
}

impl SideValues {
    pub fn get(&self, key: FieldKey) -> Option<Real> {
        match key {
            FieldKey::MilkingVacuumMaxKpa => self.milking_vacuum_max_kpa,
            FieldKey::PfVacuumKpa => self.pf_vacuum_kpa,
            FieldKey::OmVacuumKpa => self.om_vacuum_kpa,
            FieldKey::OmDurationSec => self.om_duration_sec,
            FieldKey::FrequencyBpm => self.frequency_bpm,
            FieldKey::RatioPct => self.ratio_pct,
            FieldKey::PhaseAMs => self.phase_a_ms,
            FieldKey::PhaseCMs => self.phase_c_ms,
        }
    }

    pub fn set(&mut self, key: FieldKey, value: Option<Real>) {
        match key {
            FieldKey::MilkingVacuumMaxKpa => self.milking_vacuum_max_kpa = value,
            FieldKey::PfVacuumKpa => self.pf_vacuum_kpa = value,
            FieldKey::OmVacuumKpa => self.om_vacuum_kpa = value,
            FieldKey::OmDurationSec => self.om_duration_sec = value,
            FieldKey::FrequencyBpm => self.frequency_bpm = value,
            FieldKey::RatioPct => self.ratio_pct = value,
            FieldKey::PhaseAMs => self.phase_a_ms = value,
            FieldKey::PhaseCMs => self.phase_c_ms = value,
        }
    }

    pub fn is_complete(&self) -> bool {
        FieldKey::ALL.iter().all(|&key| self.get(key).is_some())
    }
}

/// Field-keyed error messages; absence of a key means no error.
pub type FieldErrors = BTreeMap<FieldKey, String>;

/// Outcome of validating one side: every field parsed (or `None`) plus the
/// error map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SideReport {
    pub values: SideValues,
    pub errors: FieldErrors,
}

impl SideReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn parse_raw(raw: Option<&RawValue>) -> Option<Real> {
    match raw {
        Some(RawValue::Number(n)) if n.is_finite() => Some(*n),
        Some(RawValue::Number(_)) => None,
        Some(RawValue::Text(s)) => parse_decimal(s),
        None => None,
    }
}

/// Validate and normalize one side's raw values.
///
/// All eight fields are parsed first; numeric rules run only on parsed
/// values, cross-field rules only when both operands parsed.
pub fn validate_side(input: &SideInput) -> SideReport {
    let mut values = SideValues::default();
    let mut errors = FieldErrors::new();

    for key in FieldKey::ALL {
        let parsed = parse_raw(input.get(key));
        values.set(key, parsed);
        match parsed {
            None => {
                errors.insert(key, MSG_REQUIRED.to_string());
            }
            Some(v) if v < 0.0 => {
                errors.insert(key, MSG_NON_NEGATIVE.to_string());
            }
            Some(_) => {}
        }
    }

    // Field-specific lower bounds. These replace the generic >= 0 message
    // where both fire.
    if let Some(f) = values.frequency_bpm
        && f <= 0.0
    {
        errors.insert(FieldKey::FrequencyBpm, MSG_POSITIVE.to_string());
    }
    if let Some(r) = values.ratio_pct
        && (r <= 0.0 || r >= 100.0)
    {
        errors.insert(FieldKey::RatioPct, MSG_RATIO_RANGE.to_string());
    }
    if let Some(a) = values.phase_a_ms
        && a <= 0.0
    {
        errors.insert(FieldKey::PhaseAMs, MSG_POSITIVE.to_string());
    }
    if let Some(c) = values.phase_c_ms
        && c <= 0.0
    {
        errors.insert(FieldKey::PhaseCMs, MSG_POSITIVE.to_string());
    }
    if let Some(max) = values.milking_vacuum_max_kpa
        && max <= 0.0
    {
        errors.insert(FieldKey::MilkingVacuumMaxKpa, MSG_POSITIVE.to_string());
    }

    // Vacuum ordering: pf <= max, om <= max, then om >= pf (later wins).
    if let Some(pf) = values.pf_vacuum_kpa
        && let Some(max) = values.milking_vacuum_max_kpa
        && pf > max
    {
        errors.insert(FieldKey::PfVacuumKpa, MSG_LE_MILKING_MAX.to_string());
    }
    if let Some(om) = values.om_vacuum_kpa
        && let Some(max) = values.milking_vacuum_max_kpa
        && om > max
    {
        errors.insert(FieldKey::OmVacuumKpa, MSG_LE_MILKING_MAX.to_string());
    }
    if let Some(om) = values.om_vacuum_kpa
        && let Some(pf) = values.pf_vacuum_kpa
        && om < pf
    {
        errors.insert(FieldKey::OmVacuumKpa, MSG_GE_PF_VACUUM.to_string());
    }

    // Duty-cycle timing: phases must fit inside the ON/OFF windows derived
    // from frequency and ratio.
    if let Some(f) = values.frequency_bpm
        && let Some(r) = values.ratio_pct
        && f != 0.0
        && r != 0.0
    {
        let cycle_ms = 60_000.0 / f;
        let on_ms = cycle_ms * (r / 100.0);
        let off_ms = cycle_ms - on_ms;
        if let Some(a) = values.phase_a_ms
            && a > on_ms
        {
            errors.insert(FieldKey::PhaseAMs, MSG_EXCEEDS_ON_TIME.to_string());
        }
        if let Some(c) = values.phase_c_ms
            && c > off_ms
        {
            errors.insert(FieldKey::PhaseCMs, MSG_EXCEEDS_OFF_TIME.to_string());
        }
    }

    SideReport { values, errors }
}
