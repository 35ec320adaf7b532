use async_trait::async_trait;
use reportroute_common::Result;

/// A single completion request sent to the oracle
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Optional system instruction
    pub system: Option<String>,

    /// User prompt text
    pub prompt: String,

    /// Sampling temperature (0.0 - 1.0)
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create new request with a system instruction
    pub fn new(
        system: impl Into<String>,
        prompt: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            system: Some(system.into()),
            prompt: prompt.into(),
            temperature,
        }
    }
}

/// Common trait for completion clients
///
/// Implementations must be stateless request/response: safe to share
/// across concurrent callers without locking.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a prompt and return the completion text
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}
