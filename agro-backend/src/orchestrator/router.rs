use crate::ai::TextGenerator;
use crate::orchestrator::cache::ResponseCache;
use crate::orchestrator::registry::AgentRegistry;
use std::sync::Arc;
use std::time::Duration;

const ROUTING_INSTRUCTION: &str = "Tu es le routeur d'un système multi-agents agricole. \
Tu réponds uniquement par une liste de noms d'agents séparés par des virgules.";

/// Selects which agents should answer a query by asking the backend to
/// classify it against the registry's capability descriptions.
pub struct Router {
    generator: Arc<dyn TextGenerator>,
    cache: Arc<ResponseCache>,
    max_agents: usize,
    cache_ttl: Duration,
}

impl Router {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        cache: Arc<ResponseCache>,
        max_agents: usize,
        cache_ttl: Duration,
    ) -> Self {
        Router {
            generator,
            cache,
            max_agents: max_agents.max(1),
            cache_ttl,
        }
    }

    /// Pick 1..=max_agents registered agent names for the query, ordered by
    /// the classifier's relevance ranking, without duplicates. Falls back to
    /// the first registered agent when classification yields nothing usable,
    /// so the result is never empty.
    pub async fn route(&self, registry: &AgentRegistry, query: &str) -> Vec<String> {
        let prompt = self.build_classification_prompt(registry, query);

        let selected = match self
            .cache
            .get_or_compute(ROUTING_INSTRUCTION, &prompt, self.cache_ttl, || {
                self.generator.complete(&prompt, Some(ROUTING_INSTRUCTION))
            })
            .await
        {
            Ok(response) => self.parse_selection(registry, &response),
            Err(e) => {
                log::warn!("[ROUTER] Classification call failed: {}", e);
                Vec::new()
            }
        };

        if !selected.is_empty() {
            return selected;
        }

        match registry.first() {
            Some(agent) => {
                log::info!(
                    "[ROUTER] No valid agent selected, falling back to {}",
                    agent.name()
                );
                vec![agent.name().to_string()]
            }
            None => Vec::new(),
        }
    }

    fn build_classification_prompt(&self, registry: &AgentRegistry, query: &str) -> String {
        let mut listing = String::new();
        for (name, description) in registry.list() {
            listing.push_str(&format!("- {}: {}\n", name, description));
        }

        format!(
            "Voici une requête utilisateur : \"{}\"\n\n\
             Voici les agents disponibles :\n{}\n\
             Quels agents sont les plus pertinents pour répondre ?\n\
             Réponds UNIQUEMENT par une liste de noms d'agents séparés par des virgules \
             (ex: WeatherAgent, CropAgent).\n\
             Si aucun ne correspond parfaitement, choisis le plus proche.",
            query, listing
        )
    }

    /// Tolerant parse of the classifier output: comma-separated names,
    /// unknown tokens dropped, duplicates collapsed, truncated to the cap.
    fn parse_selection(&self, registry: &AgentRegistry, response: &str) -> Vec<String> {
        let mut selected: Vec<String> = Vec::new();

        for token in response.split(',') {
            let token = token.trim().trim_matches(|c| c == '"' || c == '\'' || c == '.');
            if token.is_empty() {
                continue;
            }
            match registry.lookup(token) {
                Some(agent) => {
                    let name = agent.name().to_string();
                    if !selected.contains(&name) {
                        selected.push(name);
                    }
                }
                None => {
                    log::debug!("[ROUTER] Dropping unrecognized agent token '{}'", token);
                }
            }
            if selected.len() == self.max_agents {
                break;
            }
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::Agent;
    use crate::orchestrator::ExecutionContext;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubAgent {
        name: &'static str,
    }

    #[async_trait]
    impl Agent for StubAgent {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "stub"
        }

        async fn answer(
            &self,
            _query: &str,
            _context: &ExecutionContext,
        ) -> Result<String, String> {
            Ok("ok".to_string())
        }
    }

    struct FixedGenerator {
        response: Result<String, String>,
        calls: AtomicUsize,
    }

    impl FixedGenerator {
        fn ok(response: &str) -> Self {
            FixedGenerator {
                response: Ok(response.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn err(message: &str) -> Self {
            FixedGenerator {
                response: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl crate::ai::TextGenerator for FixedGenerator {
        async fn complete(
            &self,
            _prompt: &str,
            _system_instruction: Option<&str>,
        ) -> Result<String, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn test_registry() -> AgentRegistry {
        let mut registry = AgentRegistry::new();
        registry.register(Arc::new(StubAgent {
            name: "WeatherAgent",
        }));
        registry.register(Arc::new(StubAgent { name: "CropAgent" }));
        registry.register(Arc::new(StubAgent { name: "HealthAgent" }));
        registry
    }

    fn router_for(generator: FixedGenerator, max_agents: usize) -> Router {
        Router::new(
            Arc::new(generator),
            Arc::new(ResponseCache::new()),
            max_agents,
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn test_route_drops_unknown_collapses_duplicates_and_caps() {
        let registry = test_registry();
        let router = router_for(
            FixedGenerator::ok("WeatherAgent, Zorro, CropAgent, WeatherAgent"),
            2,
        );

        let selected = router.route(&registry, "Quel temps fera-t-il ?").await;
        assert_eq!(selected, vec!["WeatherAgent", "CropAgent"]);
    }

    #[tokio::test]
    async fn test_route_is_case_and_whitespace_tolerant() {
        let registry = test_registry();
        let router = router_for(FixedGenerator::ok("  weatheragent ,  CROPAGENT."), 3);

        let selected = router.route(&registry, "question").await;
        assert_eq!(selected, vec!["WeatherAgent", "CropAgent"]);
    }

    #[tokio::test]
    async fn test_route_falls_back_on_garbage_output() {
        let registry = test_registry();
        let router = router_for(FixedGenerator::ok("je ne sais pas trop, désolé"), 2);

        let selected = router.route(&registry, "question").await;
        assert_eq!(selected, vec!["WeatherAgent"]);
    }

    #[tokio::test]
    async fn test_route_falls_back_on_empty_output() {
        let registry = test_registry();
        let router = router_for(FixedGenerator::ok(""), 2);

        let selected = router.route(&registry, "question").await;
        assert_eq!(selected, vec!["WeatherAgent"]);
    }

    #[tokio::test]
    async fn test_route_falls_back_on_backend_error() {
        let registry = test_registry();
        let router = router_for(FixedGenerator::err("backend down"), 2);

        let selected = router.route(&registry, "question").await;
        assert_eq!(selected, vec!["WeatherAgent"]);
    }

    #[tokio::test]
    async fn test_repeated_route_uses_cache() {
        let registry = test_registry();
        let generator = Arc::new(FixedGenerator::ok("CropAgent"));
        let router = Router::new(
            generator.clone(),
            Arc::new(ResponseCache::new()),
            2,
            Duration::from_secs(60),
        );

        let first = router.route(&registry, "même question").await;
        let second = router.route(&registry, "même question").await;

        assert_eq!(first, second);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }
}
