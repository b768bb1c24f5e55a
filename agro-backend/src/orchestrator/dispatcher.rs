use crate::orchestrator::context::ExecutionContext;
use crate::orchestrator::registry::AgentRegistry;
use crate::orchestrator::types::AgentOutcome;
use futures_util::future::join_all;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Runs the selected agents concurrently and collects one outcome per agent.
pub struct Dispatcher {
    agent_timeout: Duration,
}

impl Dispatcher {
    pub fn new(agent_timeout: Duration) -> Self {
        Dispatcher { agent_timeout }
    }

    /// Invoke every named agent in parallel: all futures are created before
    /// any is awaited, so their suspensions overlap instead of serializing.
    ///
    /// Each invocation is isolated: an error or timeout becomes a `Failure`
    /// outcome and never disturbs the other in-flight agents. The map is
    /// returned only once every invocation has settled.
    pub async fn dispatch(
        &self,
        registry: &AgentRegistry,
        query: &str,
        context: &ExecutionContext,
        agent_names: &[String],
    ) -> HashMap<String, AgentOutcome> {
        let mut invocations = Vec::new();

        for name in agent_names {
            let agent = match registry.lookup(name) {
                Some(a) => a,
                None => {
                    // Unreachable when names come from the router; skip
                    // instead of crashing if a caller hands us junk.
                    log::warn!("[DISPATCH] Skipping unregistered agent '{}'", name);
                    continue;
                }
            };

            invocations.push(async move {
                let name = agent.name().to_string();
                let started = Instant::now();

                let outcome =
                    match tokio::time::timeout(self.agent_timeout, agent.answer(query, context))
                        .await
                    {
                        Ok(Ok(text)) => AgentOutcome::Success(text),
                        Ok(Err(e)) => {
                            log::error!("[DISPATCH] Agent {} failed: {}", name, e);
                            AgentOutcome::Failure(format!(
                                "L'agent {} est indisponible pour le moment.",
                                name
                            ))
                        }
                        Err(_) => {
                            log::error!(
                                "[DISPATCH] Agent {} timed out after {}s",
                                name,
                                self.agent_timeout.as_secs()
                            );
                            AgentOutcome::Failure(format!(
                                "L'agent {} n'a pas répondu à temps.",
                                name
                            ))
                        }
                    };

                log::info!(
                    "[DISPATCH] Agent {} settled in {}ms (success: {})",
                    name,
                    started.elapsed().as_millis(),
                    outcome.is_success()
                );

                (name, outcome)
            });
        }

        join_all(invocations).await.into_iter().collect()
    }
}
