//! # Organix
//!
//! Recommends an organic alternative to a chemical pesticide or fertilizer
//! for a given crop, scales its dosage to the farm's area and asks an LLM for
//! farmer-facing advice.
//!
//! ## Quick Start
//!
//! ### Build the catalog artifacts
//!
//! ```bash
//! organix build --records data/records.json --out ./artifacts
//! ```
//!
//! ### Serve
//!
//! ```bash
//! GEMINI_API_KEY=... organix serve --artifacts-dir ./artifacts --http-port 5000
//! curl -X POST localhost:5000/recommend \
//!      -H 'content-type: application/json' \
//!      -d '{"chemical": "glyphosate", "crop": "wheat", "acres": 2}'
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use organix::prelude::*;
//!
//! let shared = SharedCatalog::new(ArtifactStore::new("./artifacts"));
//! let engine = shared.get_or_load().unwrap();
//!
//! let query = Query::new("glyphosate", "wheat", 2.0).unwrap();
//! let resolution = engine.resolve(&query).unwrap();
//! println!("{} ({})", resolution.record.organic_alternative, resolution.dosage);
//! ```
//!
//! ## Crate Structure
//!
//! - `organix-core` - vectorizer, catalog, matcher, confidence gate, dosage scaler
//! - `organix-storage` - catalog artifacts on disk and the load-once shared catalog
//! - `organix-advisor` - recommendation orchestration and the Gemini client
//! - `organix-api` - REST API

// Re-export core types
pub use organix_core::{
    Catalog, ConfidenceGate, MatchResult, Query, Record, RecommendationEngine, Resolution,
    ScaledDosage, SimilarityMatcher, Vector, Vectorizer,
    Error, Result,
};

// Re-export storage
pub use organix_storage::{ArtifactStore, Manifest, SharedCatalog};

// Re-export advisor
pub use organix_advisor::{AdviceError, AdviceGenerator, Advisor, GeminiClient, Recommendation};

// Re-export API
pub use organix_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, ConfidenceGate, MatchResult, Query, Record, RecommendationEngine, Resolution,
        ScaledDosage, SimilarityMatcher, Vector, Vectorizer,
        Error, Result,
        ArtifactStore, SharedCatalog,
        AdviceError, AdviceGenerator, Advisor, GeminiClient, Recommendation,
        RestApi,
    };
}

/// Best-effort dosage scaling
pub mod dosage {
    pub use organix_core::dosage::scale;
}
