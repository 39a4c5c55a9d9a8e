use serde::Serialize;

use crate::{Catalog, Vectorizer};

/// Best catalog entry for a query and its cosine similarity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchResult {
    pub record_index: usize,
    pub score: f32,
}

/// Exhaustive cosine matcher over a catalog. O(N·D) per query, which is fine
/// for catalogs up to a few thousand entries.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityMatcher<'a> {
    vectorizer: &'a Vectorizer,
    catalog: &'a Catalog,
}

impl<'a> SimilarityMatcher<'a> {
    pub fn new(vectorizer: &'a Vectorizer, catalog: &'a Catalog) -> Self {
        Self { vectorizer, catalog }
    }

    /// Vectorize `query_text` and return the highest scoring record.
    ///
    /// Ties go to the lowest index. A query made only of unknown terms scores
    /// 0 everywhere and therefore returns index 0 with score 0.
    pub fn best_match(&self, query_text: &str) -> MatchResult {
        let query = self.vectorizer.transform(query_text);

        let mut best = MatchResult {
            record_index: 0,
            score: 0.0,
        };
        let mut first = true;
        for (index, vector) in self.catalog.vectors().iter().enumerate() {
            let score = query.cosine_similarity(vector);
            if first || score > best.score {
                best = MatchResult {
                    record_index: index,
                    score,
                };
                first = false;
            }
        }

        tracing::debug!(
            query = query_text,
            index = best.record_index,
            score = best.score,
            "best catalog match"
        );
        best
    }
}
