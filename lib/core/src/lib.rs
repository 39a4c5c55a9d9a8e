//! # Organix Core
//!
//! Core library for the Organix organic-alternative recommender.
//!
//! This crate provides the recommendation engine and its building blocks:
//!
//! - [`Record`] / [`Query`] - catalog entries and validated requests
//! - [`Vectorizer`] - TF-IDF text vectorizer
//! - [`Catalog`] - records with their precomputed vectors
//! - [`SimilarityMatcher`] - exhaustive cosine best-match lookup
//! - [`ConfidenceGate`] - strict minimum-similarity threshold
//! - [`dosage`] - best-effort per-acre dosage scaling
//! - [`RecommendationEngine`] - all of the above as one immutable context
//!
//! ## Example
//!
//! ```rust
//! use organix_core::{Query, Record, RecommendationEngine};
//!
//! let records = vec![Record {
//!     chemical: "urea".to_string(),
//!     crop: "rice".to_string(),
//!     problem_or_pest: "nitrogen deficiency".to_string(),
//!     organic_alternative: "Vermicompost".to_string(),
//!     dosage: "2 tonnes/acre".to_string(),
//!     application_time: "before transplanting".to_string(),
//!     safety_note: "use well-decomposed compost".to_string(),
//! }];
//! let engine = RecommendationEngine::from_records(records).unwrap();
//!
//! let query = Query::new("Urea", "Rice", 3.0).unwrap();
//! let resolution = engine.resolve(&query).unwrap();
//! assert_eq!(resolution.dosage.render(), "6 tonnes total for 3 acres");
//! ```

pub mod catalog;
pub mod dosage;
pub mod engine;
pub mod error;
pub mod gate;
pub mod matcher;
pub mod record;
pub mod vector;
pub mod vectorizer;

pub use catalog::Catalog;
pub use dosage::ScaledDosage;
pub use engine::{round_confidence, RecommendationEngine, Resolution};
pub use error::{Error, Result};
pub use gate::{ConfidenceGate, DEFAULT_MIN_CONFIDENCE};
pub use matcher::{MatchResult, SimilarityMatcher};
pub use record::{Query, Record};
pub use vector::Vector;
pub use vectorizer::Vectorizer;
