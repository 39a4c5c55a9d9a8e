//! Best-effort scaling of free-text dosages by field area.
//!
//! Dosages come straight from the catalog ("2 kg/acre", "1.5 tonnes per acre",
//! "apply as needed"), so parsing never fails: anything that cannot be scaled
//! is handed back verbatim as [`ScaledDosage::Unscaled`].

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

fn number_pattern() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| Regex::new(r"(\d+\.?\d*|\.\d+)").expect("valid number pattern"))
}

fn per_acre_pattern() -> &'static Regex {
    static PER_ACRE: OnceLock<Regex> = OnceLock::new();
    PER_ACRE.get_or_init(|| {
        Regex::new(r"(?i)(?:\s*/\s*|\s+per\s+)?acres?\b").expect("valid per-acre pattern")
    })
}

/// Outcome of scaling a dosage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScaledDosage {
    /// Per-acre rate multiplied out over the requested area
    Scaled { total: f64, unit: String, acres: f64 },
    /// Not area-denominated, or not parseable: the catalog text as-is
    Unscaled { original: String },
}

impl ScaledDosage {
    pub fn is_scaled(&self) -> bool {
        matches!(self, ScaledDosage::Scaled { .. })
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScaledDosage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaledDosage::Scaled { total, unit, acres } => write!(
                f,
                "{} {} total for {} acres",
                format_quantity(*total),
                unit,
                format_quantity(*acres)
            ),
            ScaledDosage::Unscaled { original } => f.write_str(original),
        }
    }
}

/// Scale `dosage` by `acres` when it is a per-acre rate.
pub fn scale(dosage: &str, acres: f64) -> ScaledDosage {
    match try_scale(dosage, acres) {
        Some(scaled) => scaled,
        None => ScaledDosage::Unscaled {
            original: dosage.to_string(),
        },
    }
}

fn try_scale(dosage: &str, acres: f64) -> Option<ScaledDosage> {
    if !dosage.to_lowercase().contains("acre") || !acres.is_finite() {
        return None;
    }

    let number = number_pattern().find(dosage)?;
    let rate: f64 = number.as_str().parse().ok()?;

    let mut unit = String::with_capacity(dosage.len());
    unit.push_str(&dosage[..number.start()]);
    unit.push(' ');
    unit.push_str(&dosage[number.end()..]);
    let unit = per_acre_pattern().replace_all(&unit, " ");
    let unit = unit
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let unit = unit.trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '-' | '/'));
    let unit = unit.trim();

    if unit.is_empty() {
        return None;
    }

    let total = rate * acres;
    if !total.is_finite() {
        return None;
    }

    Some(ScaledDosage::Scaled {
        total,
        unit: unit.to_string(),
        acres,
    })
}

const SIGNIFICANT_DIGITS: i32 = 6;

/// Render a quantity to six significant digits with no trailing zeros
fn format_quantity(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - magnitude).max(0) as usize;
    let s = format!("{:.*}", decimals, value);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_per_acre_rate() {
        let scaled = scale("2 kg/acre", 3.0);
        assert_eq!(
            scaled,
            ScaledDosage::Scaled {
                total: 6.0,
                unit: "kg".to_string(),
                acres: 3.0
            }
        );
        assert_eq!(scaled.render(), "6 kg total for 3 acres");
    }

    #[test]
    fn test_scales_per_acre_phrase() {
        let scaled = scale("1.5 tonnes per acre", 2.0);
        assert_eq!(scaled.render(), "3 tonnes total for 2 acres");

        let scaled = scale("250 ml Neem oil / Acre", 0.5);
        assert_eq!(scaled.render(), "125 ml Neem oil total for 0.5 acres");
    }

    #[test]
    fn test_fractional_totals() {
        assert_eq!(scale("2.5 L/acre", 1.5).render(), "3.75 L total for 1.5 acres");
        assert_eq!(scale("1 kg/acre", 1.0 / 3.0).render(), "0.333333 kg total for 0.333333 acres");
        assert_eq!(scale("0.1 kg/acre", 3.0).render(), "0.3 kg total for 3 acres");
        assert_eq!(scale("40 kg/acre", 250.0).render(), "10000 kg total for 250 acres");
    }

    #[test]
    fn test_small_quantities_keep_their_digits() {
        assert_eq!(scale("2 kg/acre", 0.0004).render(), "0.0008 kg total for 0.0004 acres");
        assert_eq!(scale("0.0002 L/acre", 1.0).render(), "0.0002 L total for 1 acres");
    }

    #[test]
    fn test_leading_dot_rate() {
        assert_eq!(scale(".5 kg/acre", 2.0).render(), "1 kg total for 2 acres");
        assert_eq!(scale("2.5 kg/acre", 2.0).render(), "5 kg total for 2 acres");
    }

    #[test]
    fn test_not_area_denominated_is_unchanged() {
        let scaled = scale("apply as needed", 5.0);
        assert!(!scaled.is_scaled());
        assert_eq!(scaled.render(), "apply as needed");

        assert_eq!(scale("5 kg total", 4.0).render(), "5 kg total");
    }

    #[test]
    fn test_unparseable_falls_back() {
        assert_eq!(scale("not a number", 2.0).render(), "not a number");
        assert_eq!(scale("some per acre", 2.0).render(), "some per acre");
        // Nothing left for a unit
        assert_eq!(scale("2/acre", 2.0).render(), "2/acre");
        assert_eq!(scale("2 kg/acre", f64::NAN).render(), "2 kg/acre");
    }
}
