use organix_core::{Query, RecommendationEngine, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::prompt::AdvicePrompt;
use crate::{AdviceError, AdviceGenerator};

pub const DEFAULT_ADVICE_TIMEOUT: Duration = Duration::from_secs(20);

/// Everything returned to the caller for one accepted query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub alternative: String,
    /// Dosage scaled to the requested area when it was a per-acre rate
    pub dosage: String,
    pub application_time: String,
    pub safety_note: String,
    pub advice_text: String,
    /// Match score rounded to 4 decimal places
    pub confidence_score: f64,
}

/// Fallback step for advice generation: generated text, or a placeholder
/// naming the failure.
pub fn advice_text(result: std::result::Result<String, AdviceError>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "advice generation failed, using placeholder");
            format!("Advice unavailable: {}", e)
        }
    }
}

/// Runs one recommendation cycle: validate, match, gate, scale, then ask the
/// generator for advice.
pub struct Advisor<G> {
    engine: Arc<RecommendationEngine>,
    generator: G,
    advice_timeout: Duration,
}

impl<G: AdviceGenerator> Advisor<G> {
    pub fn new(engine: Arc<RecommendationEngine>, generator: G) -> Self {
        Self {
            engine,
            generator,
            advice_timeout: DEFAULT_ADVICE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_advice_timeout(mut self, timeout: Duration) -> Self {
        self.advice_timeout = timeout;
        self
    }

    /// Fails only with `Validation` or `NoReliableMatch`; advice failures
    /// are folded into `advice_text`.
    pub async fn recommend(&self, chemical: &str, crop: &str, acres: f64) -> Result<Recommendation> {
        let query = Query::new(chemical, crop, acres)?;
        let resolution = self.engine.resolve(&query)?;

        let prompt = AdvicePrompt::new(&query, &resolution).render();
        let advice = self.generate_advice(prompt).await;

        tracing::info!(
            chemical = query.chemical(),
            crop = query.crop(),
            index = resolution.matched.record_index,
            score = resolution.matched.score,
            advice_ok = advice.is_ok(),
            "recommendation served"
        );

        let record = resolution.record;
        Ok(Recommendation {
            alternative: record.organic_alternative.clone(),
            dosage: resolution.dosage.render(),
            application_time: record.application_time.clone(),
            safety_note: record.safety_note.clone(),
            advice_text: advice_text(advice),
            confidence_score: resolution.confidence(),
        })
    }

    async fn generate_advice(&self, prompt: String) -> std::result::Result<String, AdviceError> {
        match tokio::time::timeout(self.advice_timeout, self.generator.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(AdviceError::Timeout(self.advice_timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use organix_core::{Error, Record};
    use std::sync::Mutex;

    struct Canned {
        reply: std::result::Result<String, AdviceError>,
        prompts: Mutex<Vec<String>>,
    }

    impl Canned {
        fn new(reply: std::result::Result<String, AdviceError>) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl AdviceGenerator for Canned {
        async fn generate(&self, prompt: String) -> std::result::Result<String, AdviceError> {
            self.prompts.lock().unwrap().push(prompt);
            self.reply.clone()
        }
    }

    struct Stalled;

    impl AdviceGenerator for Stalled {
        async fn generate(&self, _prompt: String) -> std::result::Result<String, AdviceError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("too late".to_string())
        }
    }

    fn engine() -> Arc<RecommendationEngine> {
        let records = vec![
            Record {
                chemical: "glyphosate".to_string(),
                crop: "wheat".to_string(),
                problem_or_pest: "broadleaf weeds".to_string(),
                organic_alternative: "Vinegar weed spray".to_string(),
                dosage: "2 kg/acre".to_string(),
                application_time: "dry sunny mornings".to_string(),
                safety_note: "avoid crop leaves".to_string(),
            },
            Record {
                chemical: "chlorpyrifos".to_string(),
                crop: "cotton".to_string(),
                problem_or_pest: "bollworm".to_string(),
                organic_alternative: "Neem oil".to_string(),
                dosage: "apply as needed".to_string(),
                application_time: "evening".to_string(),
                safety_note: "keep away from bees".to_string(),
            },
        ];
        Arc::new(RecommendationEngine::from_records(records).unwrap())
    }

    #[tokio::test]
    async fn test_recommend_success() {
        let advisor = Advisor::new(engine(), Canned::new(Ok("- Use vinegar".to_string())));
        let rec = advisor.recommend("glyphosate", "wheat", 2.0).await.unwrap();

        assert_eq!(rec.alternative, "Vinegar weed spray");
        assert_eq!(rec.dosage, "4 kg total for 2 acres");
        assert_eq!(rec.application_time, "dry sunny mornings");
        assert_eq!(rec.safety_note, "avoid crop leaves");
        assert_eq!(rec.advice_text, "- Use vinegar");
        assert_eq!(rec.confidence_score, 1.0);

        let prompts = advisor.generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("4 kg total for 2 acres"));
    }

    #[tokio::test]
    async fn test_validation_skips_generator() {
        let advisor = Advisor::new(engine(), Canned::new(Ok(String::new())));
        let err = advisor.recommend("", "wheat", 2.0).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(advisor.generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_reliable_match() {
        let advisor = Advisor::new(engine(), Canned::new(Ok(String::new())));
        let err = advisor.recommend("unknownchem123", "banana", 2.0).await.unwrap_err();
        assert!(matches!(err, Error::NoReliableMatch { .. }));
        assert!(err.to_string().contains("unknownchem123"));
        assert!(err.to_string().contains("banana"));
    }

    #[tokio::test]
    async fn test_generator_failure_degrades() {
        let failure = AdviceError::Status {
            status: 503,
            body: "model overloaded".to_string(),
        };
        let advisor = Advisor::new(engine(), Canned::new(Err(failure)));
        let rec = advisor.recommend("chlorpyrifos", "cotton", 5.0).await.unwrap();

        assert_eq!(rec.alternative, "Neem oil");
        assert_eq!(rec.dosage, "apply as needed");
        assert!(rec.advice_text.starts_with("Advice unavailable:"));
        assert!(rec.advice_text.contains("model overloaded"));
    }

    #[tokio::test]
    async fn test_generator_timeout_degrades() {
        let advisor = Advisor::new(engine(), Stalled).with_advice_timeout(Duration::from_millis(20));
        let rec = advisor.recommend("glyphosate", "wheat", 1.0).await.unwrap();
        assert_eq!(rec.dosage, "2 kg total for 1 acres");
        assert!(rec.advice_text.contains("timed out"));
    }
}
