use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One chemical → organic alternative entry of the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Chemical product the record was indexed under
    pub chemical: String,
    /// Crop the record was indexed under
    pub crop: String,
    pub problem_or_pest: String,
    pub organic_alternative: String,
    /// Free-text application rate, e.g. "2 kg/acre"
    pub dosage: String,
    pub application_time: String,
    pub safety_note: String,
}

impl Record {
    /// Text the vectorizer sees for this record. Same shape as [`Query::text`].
    pub fn indexed_text(&self) -> String {
        query_text(&self.chemical, &self.crop)
    }
}

/// A validated recommendation request
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    chemical: String,
    crop: String,
    acres: f64,
}

impl Query {
    /// Validate raw inputs. Blank names and non-positive or non-finite areas
    /// are rejected.
    pub fn new(chemical: impl Into<String>, crop: impl Into<String>, acres: f64) -> Result<Self> {
        let chemical = chemical.into();
        let crop = crop.into();

        if chemical.trim().is_empty() || crop.trim().is_empty() {
            return Err(Error::Validation("Missing required fields.".to_string()));
        }
        if !acres.is_finite() || acres <= 0.0 {
            return Err(Error::Validation(format!(
                "acres must be a positive number, got {}",
                acres
            )));
        }

        Ok(Self { chemical, crop, acres })
    }

    pub fn chemical(&self) -> &str {
        &self.chemical
    }

    pub fn crop(&self) -> &str {
        &self.crop
    }

    pub fn acres(&self) -> f64 {
        self.acres
    }

    /// Lower-cased "chemical crop" string fed to the matcher
    pub fn text(&self) -> String {
        query_text(&self.chemical, &self.crop)
    }
}

fn query_text(chemical: &str, crop: &str) -> String {
    format!("{} {}", chemical.trim(), crop.trim()).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_text_is_lowercased() {
        let q = Query::new("Glyphosate", " Wheat ", 2.0).unwrap();
        assert_eq!(q.text(), "glyphosate wheat");
        assert_eq!(q.chemical(), "Glyphosate");
    }

    #[test]
    fn test_query_rejects_blank_fields() {
        assert!(matches!(Query::new("", "wheat", 2.0), Err(Error::Validation(_))));
        assert!(matches!(Query::new("urea", "   ", 2.0), Err(Error::Validation(_))));
    }

    #[test]
    fn test_query_rejects_bad_acres() {
        assert!(Query::new("urea", "rice", 0.0).is_err());
        assert!(Query::new("urea", "rice", -1.5).is_err());
        assert!(Query::new("urea", "rice", f64::NAN).is_err());
        assert!(Query::new("urea", "rice", f64::INFINITY).is_err());
        assert!(Query::new("urea", "rice", 0.25).is_ok());
    }
}
