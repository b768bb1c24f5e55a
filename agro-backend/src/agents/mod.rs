pub mod crop;
pub mod economic;
pub mod health;
pub mod resources;
pub mod weather;

pub use crop::CropAgent;
pub use economic::EconomicAgent;
pub use health::HealthAgent;
pub use resources::ResourcesAgent;
pub use weather::WeatherAgent;

use crate::ai::TextGenerator;
use crate::orchestrator::{AgentRegistry, ExecutionContext, ResponseCache};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A domain expert able to answer a farming question given the shared
/// request context. Stateless with respect to orchestration: one call, one
/// answer, no writes to the context.
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    async fn answer(&self, query: &str, context: &ExecutionContext) -> Result<String, String>;
}

/// "Contexte actuel" block appended to the agents' system prompts.
pub(crate) fn context_block(context: &ExecutionContext) -> String {
    if context.is_empty() {
        return String::new();
    }
    let mut block = String::from("Contexte actuel :\n");
    for (key, value) in context.iter() {
        block.push_str(&format!("- {}: {}\n", key, value));
    }
    block
}

/// Region named by the request, or the country-wide default.
pub(crate) fn region_from_context(context: &ExecutionContext) -> &str {
    context.get("region").unwrap_or("Centre")
}

/// Build the full expert panel. The registry is fixed from here on; changing
/// the panel means building a new registry and orchestrator.
pub fn create_default_registry(
    generator: Arc<dyn TextGenerator>,
    cache: Arc<ResponseCache>,
    agent_cache_ttl: Duration,
    weather_cache_ttl: Duration,
) -> AgentRegistry {
    let mut registry = AgentRegistry::new();
    registry.register(Arc::new(WeatherAgent::new(
        generator.clone(),
        cache.clone(),
        weather_cache_ttl,
    )));
    registry.register(Arc::new(CropAgent::new(
        generator.clone(),
        cache.clone(),
        agent_cache_ttl,
    )));
    registry.register(Arc::new(HealthAgent::new(
        generator.clone(),
        cache.clone(),
        agent_cache_ttl,
    )));
    registry.register(Arc::new(EconomicAgent::new(
        generator.clone(),
        cache.clone(),
        agent_cache_ttl,
    )));
    registry.register(Arc::new(ResourcesAgent::new(
        generator,
        cache,
        agent_cache_ttl,
    )));
    registry
}
