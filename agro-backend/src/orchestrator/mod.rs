pub mod cache;
pub mod context;
pub mod dispatcher;
pub mod registry;
pub mod router;
pub mod synthesizer;
pub mod types;

pub use cache::ResponseCache;
pub use context::ExecutionContext;
pub use registry::AgentRegistry;
pub use types::AgentOutcome;

use crate::ai::TextGenerator;
use dispatcher::Dispatcher;
use router::Router;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use synthesizer::Synthesizer;

/// Tuning knobs for the orchestration core.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Fan-out cap: how many agents may answer one query.
    pub max_agents_per_query: usize,
    /// Word budget for the synthesized answer.
    pub synthesis_max_words: usize,
    pub routing_cache_ttl: Duration,
    pub synthesis_cache_ttl: Duration,
    /// Per-agent deadline during dispatch.
    pub agent_timeout: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        OrchestratorSettings {
            max_agents_per_query: 2,
            synthesis_max_words: 250,
            routing_cache_ttl: Duration::from_secs(3600),
            synthesis_cache_ttl: Duration::from_secs(1800),
            agent_timeout: Duration::from_secs(60),
        }
    }
}

/// Result of one orchestrated query.
#[derive(Debug, Clone, Serialize)]
pub struct OrchestrationResult {
    pub selected_agents: Vec<String>,
    pub individual_responses: HashMap<String, String>,
    pub final_response: String,
}

/// Ties router, dispatcher and synthesizer together over one fixed registry.
pub struct Orchestrator {
    registry: AgentRegistry,
    router: Router,
    dispatcher: Dispatcher,
    synthesizer: Synthesizer,
}

impl Orchestrator {
    pub fn new(
        registry: AgentRegistry,
        generator: Arc<dyn TextGenerator>,
        cache: Arc<ResponseCache>,
        settings: OrchestratorSettings,
    ) -> Self {
        let router = Router::new(
            generator.clone(),
            cache.clone(),
            settings.max_agents_per_query,
            settings.routing_cache_ttl,
        );
        let dispatcher = Dispatcher::new(settings.agent_timeout);
        let synthesizer = Synthesizer::new(
            generator,
            cache,
            settings.synthesis_max_words,
            settings.synthesis_cache_ttl,
        );

        Orchestrator {
            registry,
            router,
            dispatcher,
            synthesizer,
        }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Route, dispatch and synthesize one query. Classification completes
    /// before dispatch starts; dispatch settles before synthesis runs.
    pub async fn handle_query(
        &self,
        query: &str,
        context: &ExecutionContext,
    ) -> OrchestrationResult {
        let selected = self.router.route(&self.registry, query).await;
        log::info!("[ORCHESTRATOR] Selected agents: {:?}", selected);

        let outcomes = self
            .dispatcher
            .dispatch(&self.registry, query, context, &selected)
            .await;

        let final_response = self.synthesizer.synthesize(query, &outcomes).await;

        let individual_responses = outcomes
            .iter()
            .map(|(name, outcome)| (name.clone(), outcome.text().to_string()))
            .collect();

        OrchestrationResult {
            selected_agents: selected,
            individual_responses,
            final_response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::Agent;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedAgent {
        name: &'static str,
        description: &'static str,
        response: &'static str,
    }

    #[async_trait]
    impl Agent for CannedAgent {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        async fn answer(
            &self,
            _query: &str,
            _context: &ExecutionContext,
        ) -> Result<String, String> {
            Ok(self.response.to_string())
        }
    }

    /// Answers the routing prompt with a fixed agent list and the synthesis
    /// prompt with a fixed merged text.
    struct TwoPhaseGenerator {
        routing_response: &'static str,
        synthesis_response: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl crate::ai::TextGenerator for TwoPhaseGenerator {
        async fn complete(
            &self,
            prompt: &str,
            _system_instruction: Option<&str>,
        ) -> Result<String, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if prompt.starts_with("Voici une requête") {
                Ok(self.routing_response.to_string())
            } else if prompt.starts_with("Synthétise") {
                Ok(self.synthesis_response.to_string())
            } else {
                Err(format!("unexpected prompt: {}", prompt))
            }
        }
    }

    fn weather_and_crop_registry() -> AgentRegistry {
        let mut registry = AgentRegistry::new();
        registry.register(Arc::new(CannedAgent {
            name: "WeatherAgent",
            description: "Expert météo",
            response: "24°C, ensoleillé",
        }));
        registry.register(Arc::new(CannedAgent {
            name: "CropAgent",
            description: "Expert cultures",
            response: "plantez le maïs maintenant",
        }));
        registry
    }

    #[tokio::test]
    async fn test_full_pipeline_merges_weather_and_planting_advice() {
        let generator = Arc::new(TwoPhaseGenerator {
            routing_response: "WeatherAgent, CropAgent",
            synthesis_response: "Avec 24°C et un temps ensoleillé, vous pouvez planter le maïs dès maintenant.",
            calls: AtomicUsize::new(0),
        });
        let orchestrator = Orchestrator::new(
            weather_and_crop_registry(),
            generator.clone(),
            Arc::new(ResponseCache::new()),
            OrchestratorSettings::default(),
        );

        let context = ExecutionContext::new().with("region", "Centre");
        let result = orchestrator
            .handle_query("Puis-je planter du maïs aujourd'hui ?", &context)
            .await;

        assert_eq!(result.selected_agents, vec!["WeatherAgent", "CropAgent"]);
        assert_eq!(result.individual_responses.len(), 2);
        assert_eq!(result.individual_responses["WeatherAgent"], "24°C, ensoleillé");

        // One routing call plus one merge call.
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
        assert!(result.final_response.contains("24°C"));
        assert!(result.final_response.contains("maïs"));
        assert!(
            synthesizer::word_count(&result.final_response)
                <= OrchestratorSettings::default().synthesis_max_words
        );
    }

    #[tokio::test]
    async fn test_single_agent_route_skips_the_merge_call() {
        let generator = Arc::new(TwoPhaseGenerator {
            routing_response: "WeatherAgent",
            synthesis_response: "jamais utilisé",
            calls: AtomicUsize::new(0),
        });
        let orchestrator = Orchestrator::new(
            weather_and_crop_registry(),
            generator.clone(),
            Arc::new(ResponseCache::new()),
            OrchestratorSettings::default(),
        );

        let context = ExecutionContext::new().with("region", "Centre");
        let result = orchestrator.handle_query("Quel temps fait-il ?", &context).await;

        assert_eq!(result.selected_agents, vec!["WeatherAgent"]);
        // The lone answer is returned verbatim: routing was the only call.
        assert_eq!(result.final_response, "24°C, ensoleillé");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }
}
