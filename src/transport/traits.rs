use crate::{
    error::Result,
    models::{GenerationRequest, GenerationResult},
};
use async_trait::async_trait;

#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// One round-trip to the generation service. Errors are transport-level only;
    /// a reported failure status comes back as an `Ok` record.
    async fn submit(&self, request: &GenerationRequest) -> Result<GenerationResult>;

    fn endpoint(&self) -> &str;
}
