// ── Input forms ──
//
// Raw text input for create / edit operations, validated into the typed
// payloads the stores send. Validation never touches the network; every
// failing field is reported at once.

mod campaign;
mod router;
mod segment;

pub use campaign::{CampaignForm, slugify};
pub use router::RouterForm;
pub use segment::SegmentForm;

use crate::error::FieldErrors;

pub const REQUIRED: &str = "Requerido";
pub const NUMBER: &str = "Número";
pub const MAX_BELOW_MIN: &str = "Debe ser ≥ mínima";
pub const INVALID_CHOICE: &str = "Opción inválida";

/// Trimmed value, or a `Requerido` error for `field`.
pub(crate) fn required(errors: &mut FieldErrors, field: &str, raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    }
    value.to_owned()
}

/// Parsed finite number, or a `Número` error for `field`.
pub(crate) fn number(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<f64> {
    let parsed = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    if parsed.is_none() {
        errors.add(field, NUMBER);
    }
    parsed
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn number_accepts_padded_decimals() {
        let mut errors = FieldErrors::new();
        assert_eq!(number(&mut errors, "latitud", " 20.67 "), Some(20.67));
        assert_eq!(number(&mut errors, "x", "-3"), Some(-3.0));
        assert!(errors.is_empty());
    }

    #[test]
    fn number_rejects_blank_text_and_infinity() {
        for raw in ["", "  ", "abc", "inf", "NaN"] {
            let mut errors = FieldErrors::new();
            assert_eq!(number(&mut errors, "longitud", raw), None, "{raw:?}");
            assert_eq!(errors.get("longitud"), Some(NUMBER));
        }
    }
}
