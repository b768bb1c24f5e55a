use crate::agents::Agent;
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed set of expert agents, assembled once at startup.
///
/// Routing and dispatch only read the registry; changing the agent set means
/// building a new orchestrator, never mutating a live one.
pub struct AgentRegistry {
    agents: Vec<Arc<dyn Agent>>,
    by_name: HashMap<String, usize>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        AgentRegistry {
            agents: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Add an agent. Construction-time only; duplicate names are ignored so
    /// the first registration wins.
    pub fn register(&mut self, agent: Arc<dyn Agent>) {
        let key = agent.name().to_lowercase();
        if self.by_name.contains_key(&key) {
            log::warn!(
                "[REGISTRY] Agent '{}' already registered, ignoring duplicate",
                agent.name()
            );
            return;
        }
        self.by_name.insert(key, self.agents.len());
        self.agents.push(agent);
    }

    /// Case-insensitive lookup. Unknown names are a routing problem, not a
    /// crash: callers get None.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Agent>> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&idx| self.agents[idx].clone())
    }

    /// (name, description) pairs in registration order.
    pub fn list(&self) -> Vec<(String, String)> {
        self.agents
            .iter()
            .map(|a| (a.name().to_string(), a.description().to_string()))
            .collect()
    }

    /// The first registered agent, used as the routing fallback.
    pub fn first(&self) -> Option<Arc<dyn Agent>> {
        self.agents.first().cloned()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::ExecutionContext;
    use async_trait::async_trait;

    struct NamedAgent {
        name: &'static str,
        description: &'static str,
    }

    #[async_trait]
    impl Agent for NamedAgent {
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
            Ok("ok".to_string())
        }
    }

    fn registry_with(names: &[&'static str]) -> AgentRegistry {
        let mut registry = AgentRegistry::new();
        for name in names {
            registry.register(Arc::new(NamedAgent {
                name,
                description: "expert",
            }));
        }
        registry
    }

    #[test]
    fn test_lookup_ignores_case_and_surrounding_space() {
        let registry = registry_with(&["WeatherAgent"]);
        assert!(registry.lookup("weatheragent").is_some());
        assert!(registry.lookup("  WEATHERAGENT ").is_some());
        assert!(registry.lookup("CropAgent").is_none());
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let registry = registry_with(&["B", "A", "C"]);
        let names: Vec<String> = registry.list().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(registry.first().unwrap().name(), "B");
    }

    #[test]
    fn test_duplicate_registration_keeps_the_first() {
        let mut registry = registry_with(&["A"]);
        registry.register(Arc::new(NamedAgent {
            name: "a",
            description: "usurpateur",
        }));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("A").unwrap().description(), "expert");
    }
}
