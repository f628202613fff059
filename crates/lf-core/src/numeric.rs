use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// Parse a raw decimal field value as typed out by an operator.
///
/// Both `.` and `,` are accepted as the decimal separator. Empty or
/// whitespace-only text, unparseable text, and non-finite results all map
/// to `None`; callers treat `None` as "no value entered".
pub fn parse_decimal(raw: &str) -> Option<Real> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<Real>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}
