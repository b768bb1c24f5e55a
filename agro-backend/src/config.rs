use crate::orchestrator::OrchestratorSettings;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Runtime configuration, read once from the environment at startup.
#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub llm_endpoint: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub default_region: String,
    pub max_agents_per_query: usize,
    pub synthesis_max_words: usize,
    pub routing_cache_ttl_secs: u64,
    pub agent_cache_ttl_secs: u64,
    pub weather_cache_ttl_secs: u64,
    pub synthesis_cache_ttl_secs: u64,
    pub agent_timeout_secs: u64,
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{} must be a valid number", key)),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: parse_env("PORT", 8080),
            llm_endpoint: env::var("LLM_ENDPOINT")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1/chat/completions".to_string()),
            llm_api_key: env::var("LLM_API_KEY").unwrap_or_default(),
            llm_model: env::var("LLM_MODEL")
                .unwrap_or_else(|_| "google/gemini-2.0-flash-001".to_string()),
            default_region: env::var("DEFAULT_REGION").unwrap_or_else(|_| "Centre".to_string()),
            max_agents_per_query: parse_env("MAX_AGENTS_PER_QUERY", 2),
            synthesis_max_words: parse_env("SYNTHESIS_MAX_WORDS", 250),
            routing_cache_ttl_secs: parse_env("ROUTING_CACHE_TTL_SECS", 3600),
            agent_cache_ttl_secs: parse_env("AGENT_CACHE_TTL_SECS", 1800),
            // Weather answers go stale quickly, so their TTL is much shorter.
            weather_cache_ttl_secs: parse_env("WEATHER_CACHE_TTL_SECS", 600),
            synthesis_cache_ttl_secs: parse_env("SYNTHESIS_CACHE_TTL_SECS", 1800),
            agent_timeout_secs: parse_env("AGENT_TIMEOUT_SECS", 60),
        }
    }

    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            max_agents_per_query: self.max_agents_per_query,
            synthesis_max_words: self.synthesis_max_words,
            routing_cache_ttl: Duration::from_secs(self.routing_cache_ttl_secs),
            synthesis_cache_ttl: Duration::from_secs(self.synthesis_cache_ttl_secs),
            agent_timeout: Duration::from_secs(self.agent_timeout_secs),
        }
    }

    pub fn agent_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.agent_cache_ttl_secs)
    }

    pub fn weather_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.weather_cache_ttl_secs)
    }
}
