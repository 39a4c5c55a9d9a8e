use std::future::Future;

use crate::AdviceError;

/// External text-generation collaborator: one prompt in, generated text out
pub trait AdviceGenerator: Send + Sync {
    fn generate(&self, prompt: String) -> impl Future<Output = Result<String, AdviceError>> + Send;
}
