pub mod connection;
pub mod endpoints;
pub mod fake;

use async_trait::async_trait;

pub use connection::ApiConnectionError;
pub use endpoints::{GenerationSettings, Provider};
pub use fake::FakeBackend;

/// Anything that turns a prompt into model text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn generate_text(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, ApiConnectionError>;

    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}
