//! # Organix Advisor
//!
//! Turns a `(chemical, crop, acres)` request into a [`Recommendation`]:
//! the core engine picks and scales the catalog entry, then an
//! [`AdviceGenerator`] (Gemini in production) writes farmer-facing advice.
//!
//! Advice generation is best-effort. Errors and timeouts from the generator
//! become a placeholder `advice_text` and never fail the recommendation.

pub mod advisor;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompt;

pub use advisor::{advice_text, Advisor, Recommendation, DEFAULT_ADVICE_TIMEOUT};
pub use error::AdviceError;
pub use gemini::GeminiClient;
pub use generator::AdviceGenerator;
pub use prompt::AdvicePrompt;
