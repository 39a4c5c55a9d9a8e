/// Default minimum similarity a match must strictly exceed
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.40;

/// Rejects matches that are not confidently similar to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceGate {
    threshold: f32,
}

impl ConfidenceGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Strict: a score equal to the threshold is rejected
    #[inline]
    pub fn accept(&self, score: f32) -> bool {
        score > self.threshold
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_boundary() {
        let gate = ConfidenceGate::default();
        assert!(!gate.accept(0.40));
        assert!(gate.accept(0.4000001));
        assert!(!gate.accept(0.0));
        assert!(gate.accept(1.0));
    }

    #[test]
    fn test_custom_threshold() {
        let gate = ConfidenceGate::new(0.75);
        assert!(!gate.accept(0.6));
        assert!(gate.accept(0.8));
    }
}
