//! Raw two-side input decoding.
//!
//! Form state arrives as loose JSON: each side maps field names to strings
//! or numbers, exactly as typed. Unknown names and non-scalar values are
//! ignored; validation reports anything missing as "Required".

use lf_settings::{FieldKey, SideInput, Sides};
use serde::Deserialize;
use serde_json::{Map, Value};

/// A two-side raw input document, e.g. read from a saved form snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareInputsDoc {
    #[serde(default)]
    pub left: Map<String, Value>,
    #[serde(default)]
    pub right: Map<String, Value>,
}

impl CompareInputsDoc {
    pub fn side_inputs(&self) -> Sides<SideInput> {
        Sides {
            left: decode_side(&self.left),
            right: decode_side(&self.right),
        }
    }
}

fn decode_side(map: &Map<String, Value>) -> SideInput {
    let mut input = SideInput::new();
    for (name, value) in map {
        let Some(key) = FieldKey::from_key(name) else {
            continue;
        };
        match value {
            Value::String(s) => input.set(key, s.as_str()),
            Value::Number(n) => {
                if let Some(v) = n.as_f64() {
                    input.set(key, v);
                }
            }
            _ => {}
        }
    }
    input
}
