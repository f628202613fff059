//! Setting field catalog.

use lf_core::Real;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display unit system the operator is working in. The backend stores
/// vacuum levels in kPa; Imperial only changes what the form shows and
/// how the payload names the pressure fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

/// One of the eight recognized setting inputs. Variant order is the fixed
/// catalog order: it drives form layout and validation iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    MilkingVacuumMaxKpa,
    PfVacuumKpa,
    OmVacuumKpa,
    OmDurationSec,
    FrequencyBpm,
    RatioPct,
    PhaseAMs,
    PhaseCMs,
}

impl FieldKey {
    pub const ALL: [FieldKey; 8] = [
        FieldKey::MilkingVacuumMaxKpa,
        FieldKey::PfVacuumKpa,
        FieldKey::OmVacuumKpa,
        FieldKey::OmDurationSec,
        FieldKey::FrequencyBpm,
        FieldKey::RatioPct,
        FieldKey::PhaseAMs,
        FieldKey::PhaseCMs,
    ];

    /// Canonical wire/form name (camelCase, metric-named even for pressure).
    pub fn as_key(&self) -> &'static str {
        match self {
            FieldKey::MilkingVacuumMaxKpa => "milkingVacuumMaxKpa",
            FieldKey::PfVacuumKpa => "pfVacuumKpa",
            FieldKey::OmVacuumKpa => "omVacuumKpa",
            FieldKey::OmDurationSec => "omDurationSec",
            FieldKey::FrequencyBpm => "frequencyBpm",
            FieldKey::RatioPct => "ratioPct",
            FieldKey::PhaseAMs => "phaseAMs",
            FieldKey::PhaseCMs => "phaseCMs",
        }
    }

    pub fn from_key(key: &str) -> Option<FieldKey> {
        FieldKey::ALL.iter().copied().find(|k| k.as_key() == key)
    }

    /// The three vacuum fields whose display unit follows the unit system.
    pub fn is_pressure(&self) -> bool {
        matches!(
            self,
            FieldKey::MilkingVacuumMaxKpa | FieldKey::PfVacuumKpa | FieldKey::OmVacuumKpa
        )
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Static definition of one setting input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    pub key: FieldKey,
    pub label: &'static str,
    pub unit: &'static str,
    pub step: Real,
    pub min: Option<Real>,
    pub max: Option<Real>,
    pub required: bool,
}

// Declared (metric) units; setting_fields swaps the pressure labels.
const SETTING_FIELDS: [FieldDef; 8] = [
    FieldDef {
        key: FieldKey::MilkingVacuumMaxKpa,
        label: "Milking Vacuum Max",
        unit: "kPa",
        step: 0.1,
        min: Some(0.0),
        max: None,
        required: true,
    },
    FieldDef {
        key: FieldKey::PfVacuumKpa,
        label: "PF Vacuum",
        unit: "kPa",
        step: 0.1,
        min: Some(0.0),
        max: None,
        required: true,
    },
    FieldDef {
        key: FieldKey::OmVacuumKpa,
        label: "OM Vacuum",
        unit: "kPa",
        step: 0.1,
        min: Some(0.0),
        max: None,
        required: true,
    },
    FieldDef {
        key: FieldKey::OmDurationSec,
        label: "OM Duration",
        unit: "sec",
        step: 0.1,
        min: Some(0.0),
        max: None,
        required: true,
    },
    FieldDef {
        key: FieldKey::FrequencyBpm,
        label: "Frequency",
        unit: "bpm",
        step: 1.0,
        min: Some(0.0),
        max: None,
        required: true,
    },
    FieldDef {
        key: FieldKey::RatioPct,
        label: "Ratio",
        unit: "%",
        step: 1.0,
        min: Some(0.0),
        max: Some(100.0),
        required: true,
    },
    FieldDef {
        key: FieldKey::PhaseAMs,
        label: "Phase A",
        unit: "ms",
        step: 1.0,
        min: Some(0.0),
        max: None,
        required: true,
    },
    FieldDef {
        key: FieldKey::PhaseCMs,
        label: "Phase C",
        unit: "ms",
        step: 1.0,
        min: Some(0.0),
        max: None,
        required: true,
    },
];

/// Ordered catalog for the given unit system.
pub fn setting_fields(system: UnitSystem) -> [FieldDef; 8] {
    let mut fields = SETTING_FIELDS;
    if system == UnitSystem::Imperial {
        for field in &mut fields {
            if field.key.is_pressure() {
                field.unit = "inHg";
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_order_matches_key_order() {
        let fields = setting_fields(UnitSystem::Metric);
        let keys: Vec<FieldKey> = fields.iter().map(|f| f.key).collect();
        assert_eq!(keys, FieldKey::ALL.to_vec());
    }

    #[test]
    fn keys_are_unique() {
        let mut seen = HashSet::new();
        for key in FieldKey::ALL {
            assert!(seen.insert(key.as_key()), "duplicate key: {}", key);
        }
    }

    #[test]
    fn key_round_trip() {
        for key in FieldKey::ALL {
            assert_eq!(FieldKey::from_key(key.as_key()), Some(key));
        }
        assert_eq!(FieldKey::from_key("milkingVacuumMaxInHg"), None);
    }

    #[test]
    fn imperial_swaps_exactly_the_pressure_units() {
        let metric = setting_fields(UnitSystem::Metric);
        let imperial = setting_fields(UnitSystem::Imperial);
        for (m, i) in metric.iter().zip(imperial.iter()) {
            if m.key.is_pressure() {
                assert_eq!(m.unit, "kPa");
                assert_eq!(i.unit, "inHg");
            } else {
                assert_eq!(m.unit, i.unit);
            }
        }
    }

    #[test]
    fn only_ratio_has_an_upper_bound() {
        for field in setting_fields(UnitSystem::Metric) {
            assert!(field.required);
            if field.key == FieldKey::RatioPct {
                assert_eq!(field.max, Some(100.0));
            } else {
                assert_eq!(field.max, None);
            }
        }
    }
}
