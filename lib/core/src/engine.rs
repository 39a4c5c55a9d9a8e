use crate::dosage::{self, ScaledDosage};
use crate::{Catalog, ConfidenceGate, Error, MatchResult, Query, Record, Result, SimilarityMatcher, Vectorizer};

/// A query resolved against the catalog: the accepted match, its record and
/// the dosage scaled to the requested area.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    pub record: &'a Record,
    pub matched: MatchResult,
    pub dosage: ScaledDosage,
}

impl Resolution<'_> {
    /// Match score rounded to 4 decimal places
    pub fn confidence(&self) -> f64 {
        round_confidence(self.matched.score)
    }
}

pub fn round_confidence(score: f32) -> f64 {
    (f64::from(score) * 10_000.0).round() / 10_000.0
}

/// Vectorizer, catalog and confidence gate bundled as one immutable context.
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    vectorizer: Vectorizer,
    catalog: Catalog,
    gate: ConfidenceGate,
}

impl RecommendationEngine {
    pub fn new(vectorizer: Vectorizer, catalog: Catalog) -> Result<Self> {
        if vectorizer.dim() != catalog.dim() {
            return Err(Error::InvalidDimension {
                expected: vectorizer.dim(),
                actual: catalog.dim(),
            });
        }
        Ok(Self {
            vectorizer,
            catalog,
            gate: ConfidenceGate::default(),
        })
    }

    /// Fit and index `records` in one go
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        let (vectorizer, catalog) = Catalog::build(records)?;
        Self::new(vectorizer, catalog)
    }

    #[must_use]
    pub fn with_gate(mut self, gate: ConfidenceGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn gate(&self) -> ConfidenceGate {
        self.gate
    }

    pub fn matcher(&self) -> SimilarityMatcher<'_> {
        SimilarityMatcher::new(&self.vectorizer, &self.catalog)
    }

    /// Match, gate, fetch and scale. Fails with `NoReliableMatch` when the
    /// best score does not clear the gate.
    pub fn resolve(&self, query: &Query) -> Result<Resolution<'_>> {
        let matched = self.matcher().best_match(&query.text());

        if !self.gate.accept(matched.score) {
            tracing::warn!(
                chemical = query.chemical(),
                crop = query.crop(),
                score = matched.score,
                threshold = self.gate.threshold(),
                "match rejected by confidence gate"
            );
            return Err(Error::NoReliableMatch {
                chemical: query.chemical().to_string(),
                crop: query.crop().to_string(),
            });
        }

        let record = self.catalog.get(matched.record_index)?;
        let dosage = dosage::scale(&record.dosage, query.acres());

        Ok(Resolution {
            record,
            matched,
            dosage,
        })
    }
}
