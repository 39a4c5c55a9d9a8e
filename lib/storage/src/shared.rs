use organix_core::{ConfidenceGate, RecommendationEngine, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use crate::artifacts::ArtifactStore;

/// Load-once handle on the recommendation engine.
///
/// The first caller loads the artifacts while holding the init mutex;
/// concurrent first callers wait on it and then reuse the result. Afterwards
/// every call is a lock-free read. A failed load is not cached, so the next
/// caller retries.
pub struct SharedCatalog {
    store: ArtifactStore,
    gate: ConfidenceGate,
    engine: OnceLock<Arc<RecommendationEngine>>,
    init: Mutex<()>,
    loads: AtomicUsize,
}

impl SharedCatalog {
    pub fn new(store: ArtifactStore) -> Self {
        Self {
            store,
            gate: ConfidenceGate::default(),
            engine: OnceLock::new(),
            init: Mutex::new(()),
            loads: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_gate(mut self, gate: ConfidenceGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn get_or_load(&self) -> Result<Arc<RecommendationEngine>> {
        if let Some(engine) = self.engine.get() {
            return Ok(engine.clone());
        }

        let _guard = self.init.lock();
        if let Some(engine) = self.engine.get() {
            return Ok(engine.clone());
        }

        let (vectorizer, catalog) = self.store.load()?;
        let engine = Arc::new(RecommendationEngine::new(vectorizer, catalog)?.with_gate(self.gate));
        self.loads.fetch_add(1, Ordering::Release);

        let engine = self.engine.get_or_init(|| engine).clone();
        Ok(engine)
    }

    pub fn is_loaded(&self) -> bool {
        self.engine.get().is_some()
    }

    /// How many times the artifacts were actually read
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::build_artifacts;
    use organix_core::Record;
    use std::sync::Barrier;

    fn record(chemical: &str, crop: &str) -> Record {
        Record {
            chemical: chemical.to_string(),
            crop: crop.to_string(),
            problem_or_pest: "aphids".to_string(),
            organic_alternative: "Neem oil".to_string(),
            dosage: "1 L/acre".to_string(),
            application_time: "evening".to_string(),
            safety_note: "keep away from water bodies".to_string(),
        }
    }

    #[test]
    fn test_concurrent_first_use_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        build_artifacts(&store, vec![record("imidacloprid", "mustard"), record("urea", "rice")]).unwrap();

        let shared = Arc::new(SharedCatalog::new(store));
        let barrier = Arc::new(Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    shared.get_or_load().unwrap()
                })
            })
            .collect();

        let engines: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(shared.load_count(), 1);
        assert!(engines.iter().all(|e| Arc::ptr_eq(e, &engines[0])));
    }

    #[test]
    fn test_failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let shared = SharedCatalog::new(store.clone()).with_gate(ConfidenceGate::new(0.5));

        assert!(shared.get_or_load().is_err());
        assert!(!shared.is_loaded());

        build_artifacts(&store, vec![record("urea", "rice")]).unwrap();
        let engine = shared.get_or_load().unwrap();
        assert!(shared.is_loaded());
        assert_eq!(engine.gate().threshold(), 0.5);
        assert_eq!(shared.load_count(), 1);
    }
}
