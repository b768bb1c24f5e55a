pub mod client;

pub use client::LlmClient;

use async_trait::async_trait;

/// Narrow contract over the generative backend.
///
/// The backend may fail with a transport/API error, or it may hand back a
/// degraded textual error message as a normal response; callers must tolerate
/// both.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, String>;
}
