// TF-IDF vectorizer for short catalog texts
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Error, Result, Vector};

/// Fitted text-to-vector model: vocabulary term -> column, plus one IDF
/// weight per column. Immutable once fitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vectorizer {
    vocabulary: AHashMap<String, usize>,
    idf: Vec<f32>,
}

impl Vectorizer {
    /// Tokenize text for indexing and querying.
    /// Lowercases, splits on anything that is not alphanumeric or `_`, and
    /// drops single-character tokens.
    #[inline]
    pub fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|s| s.chars().count() > 1)
            .map(str::to_string)
            .collect()
    }

    /// Fit a vocabulary and smoothed IDF weights over `documents`.
    ///
    /// Columns are assigned in lexicographic term order so that the same
    /// corpus always yields the same layout.
    pub fn fit<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // term -> document frequency
        let mut term_dfs: BTreeMap<String, u32> = BTreeMap::new();
        let mut total_docs: u32 = 0;

        for doc in documents {
            total_docs += 1;
            let mut tokens = Self::tokenize(doc.as_ref());
            tokens.sort_unstable();
            tokens.dedup();
            for token in tokens {
                *term_dfs.entry(token).or_insert(0) += 1;
            }
        }

        let n = f64::from(total_docs);
        let mut vocabulary = AHashMap::with_capacity(term_dfs.len());
        let mut idf = Vec::with_capacity(term_dfs.len());

        for (column, (term, df)) in term_dfs.into_iter().enumerate() {
            // Smoothed IDF: ln((1 + n) / (1 + df)) + 1
            let weight = ((1.0 + n) / (1.0 + f64::from(df))).ln() + 1.0;
            vocabulary.insert(term, column);
            idf.push(weight as f32);
        }

        tracing::debug!(docs = total_docs, terms = idf.len(), "fitted vectorizer");
        Self { vocabulary, idf }
    }

    /// Vector dimension (vocabulary size)
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.idf.len()
    }

    #[inline]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    #[inline]
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_index(term).map(|i| self.idf[i])
    }

    /// Map text to an L2-normalized TF-IDF vector.
    /// Terms outside the vocabulary contribute nothing.
    pub fn transform(&self, text: &str) -> Vector {
        let mut term_freqs: AHashMap<usize, u32> = AHashMap::new();
        for token in Self::tokenize(text) {
            if let Some(column) = self.term_index(&token) {
                *term_freqs.entry(column).or_insert(0) += 1;
            }
        }

        let mut vector = Vector::zeros(self.dim());
        let data = vector.as_mut_slice();
        for (column, tf) in term_freqs {
            data[column] = tf as f32 * self.idf[column];
        }
        vector.normalize();
        vector
    }

    /// Check that a deserialized model is internally consistent
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(Error::Load(format!(
                "vectorizer has {} terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }

        let mut seen = vec![false; self.idf.len()];
        for (term, &column) in &self.vocabulary {
            match seen.get_mut(column) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(Error::Load(format!(
                        "vectorizer column {} assigned twice (term '{}')",
                        column, term
                    )))
                }
                None => {
                    return Err(Error::Load(format!(
                        "vectorizer term '{}' points past the last column ({})",
                        term, column
                    )))
                }
            }
        }

        if let Some(w) = self.idf.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(Error::Load(format!("vectorizer has invalid idf weight {}", w)));
        }

        Ok(())
    }
}
