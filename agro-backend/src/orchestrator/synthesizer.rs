use crate::ai::TextGenerator;
use crate::orchestrator::cache::ResponseCache;
use crate::orchestrator::types::AgentOutcome;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const NO_ANSWER_MESSAGE: &str = "Je n'ai pas pu trouver de réponse à votre question.";

const SYNTHESIS_INSTRUCTION: &str = "Tu es un conseiller agricole camerounais qui rédige \
des synthèses claires et pratiques en français.";

/// Merges the dispatched agents' outcomes into one bounded-length answer.
pub struct Synthesizer {
    generator: Arc<dyn TextGenerator>,
    cache: Arc<ResponseCache>,
    max_words: usize,
    cache_ttl: Duration,
}

impl Synthesizer {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        cache: Arc<ResponseCache>,
        max_words: usize,
        cache_ttl: Duration,
    ) -> Self {
        Synthesizer {
            generator,
            cache,
            max_words,
            cache_ttl,
        }
    }

    /// Produce the final user-facing answer.
    ///
    /// A single outcome is returned verbatim with no backend call; several
    /// outcomes are merged through one generative call, with at most one
    /// follow-up condensation when the merge overshoots the word budget.
    pub async fn synthesize(
        &self,
        query: &str,
        outcomes: &HashMap<String, AgentOutcome>,
    ) -> String {
        if outcomes.is_empty() {
            return NO_ANSWER_MESSAGE.to_string();
        }

        if outcomes.len() == 1 {
            // A lone failure surfaces as its failure message.
            return outcomes
                .values()
                .next()
                .map(|o| o.text().to_string())
                .unwrap_or_else(|| NO_ANSWER_MESSAGE.to_string());
        }

        let transcript = build_transcript(outcomes);
        let prompt = format!(
            "Synthétise ces réponses d'experts agricoles pour répondre à la question : \"{}\".\n\
             La réponse doit être fluide, pratique et intégrée (pas de \"Agent X a dit que...\").\n\
             Conserve tous les chiffres importants (prix, doses, températures, dates).\n\
             Reste sous {} mots.\n\
             Contexte camerounais.\n\n\
             Données :\n{}",
            query, self.max_words, transcript
        );

        let merged = match self
            .cache
            .get_or_compute(SYNTHESIS_INSTRUCTION, &prompt, self.cache_ttl, || {
                self.generator.complete(&prompt, Some(SYNTHESIS_INSTRUCTION))
            })
            .await
        {
            Ok(text) => text,
            Err(e) => {
                log::warn!("[SYNTH] Merge call failed, returning raw transcript: {}", e);
                return transcript;
            }
        };

        if word_count(&merged) <= self.max_words {
            return merged;
        }

        // One bounded correction: the backend rarely honors length limits on
        // the first attempt, and an unbounded retry loop is worse than a
        // slightly long answer.
        log::info!(
            "[SYNTH] Merged answer is {} words (budget {}), condensing once",
            word_count(&merged),
            self.max_words
        );

        let condense_prompt = format!(
            "Condense le texte suivant en {} mots maximum, en conservant les chiffres clés \
             et les actions recommandées :\n\n{}",
            self.max_words, merged
        );

        match self
            .cache
            .get_or_compute(SYNTHESIS_INSTRUCTION, &condense_prompt, self.cache_ttl, || {
                self.generator
                    .complete(&condense_prompt, Some(SYNTHESIS_INSTRUCTION))
            })
            .await
        {
            Ok(condensed) => condensed,
            Err(e) => {
                log::warn!("[SYNTH] Condensation call failed, keeping merged text: {}", e);
                merged
            }
        }
    }
}

/// One section per agent, in name order so the prompt is byte-stable for the
/// cache regardless of map iteration order.
fn build_transcript(outcomes: &HashMap<String, AgentOutcome>) -> String {
    let mut names: Vec<&String> = outcomes.keys().collect();
    names.sort();

    let mut transcript = String::new();
    for name in names {
        transcript.push_str(&format!(
            "--- Réponse de {} ---\n{}\n\n",
            name,
            outcomes[name].text()
        ));
    }
    transcript
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::TextGenerator;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Returns the queued responses in order, then repeats the last one.
    struct ScriptedGenerator {
        responses: Vec<Result<String, String>>,
        calls: AtomicUsize,
        last_prompt: Mutex<String>,
    }

    impl ScriptedGenerator {
        fn new(responses: Vec<Result<String, String>>) -> Self {
            ScriptedGenerator {
                responses,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(String::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn complete(
            &self,
            prompt: &str,
            _system_instruction: Option<&str>,
        ) -> Result<String, String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = prompt.to_string();
            self.responses
                .get(call)
                .or_else(|| self.responses.last())
                .cloned()
                .unwrap_or_else(|| Err("no scripted response".to_string()))
        }
    }

    fn synthesizer_for(generator: Arc<ScriptedGenerator>, max_words: usize) -> Synthesizer {
        Synthesizer::new(
            generator,
            Arc::new(ResponseCache::new()),
            max_words,
            Duration::from_secs(60),
        )
    }

    fn outcomes(pairs: &[(&str, AgentOutcome)]) -> HashMap<String, AgentOutcome> {
        pairs
            .iter()
            .map(|(name, outcome)| (name.to_string(), outcome.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_empty_outcomes_return_fixed_message() {
        let generator = Arc::new(ScriptedGenerator::new(vec![]));
        let synthesizer = synthesizer_for(generator.clone(), 100);

        let answer = synthesizer.synthesize("question", &HashMap::new()).await;
        assert_eq!(answer, NO_ANSWER_MESSAGE);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_single_success_is_returned_verbatim_without_backend_call() {
        let generator = Arc::new(ScriptedGenerator::new(vec![]));
        let synthesizer = synthesizer_for(generator.clone(), 100);

        let map = outcomes(&[("A", AgentOutcome::Success("X".to_string()))]);
        let answer = synthesizer.synthesize("question", &map).await;

        assert_eq!(answer, "X");
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_single_failure_surfaces_its_message() {
        let generator = Arc::new(ScriptedGenerator::new(vec![]));
        let synthesizer = synthesizer_for(generator.clone(), 100);

        let map = outcomes(&[(
            "A",
            AgentOutcome::Failure("L'agent A est indisponible pour le moment.".to_string()),
        )]);
        let answer = synthesizer.synthesize("question", &map).await;

        assert!(answer.contains("indisponible"));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_multiple_outcomes_are_merged_with_one_call() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Ok(
            "Il fait 24°C et vous pouvez planter le maïs.".to_string(),
        )]));
        let synthesizer = synthesizer_for(generator.clone(), 100);

        let map = outcomes(&[
            ("WeatherAgent", AgentOutcome::Success("24°C, ensoleillé".to_string())),
            (
                "CropAgent",
                AgentOutcome::Success("plantez le maïs maintenant".to_string()),
            ),
        ]);
        let answer = synthesizer.synthesize("Puis-je planter du maïs ?", &map).await;

        assert_eq!(answer, "Il fait 24°C et vous pouvez planter le maïs.");
        assert_eq!(generator.call_count(), 1);

        // The merge prompt carried both expert answers under their headings.
        let prompt = generator.last_prompt.lock().unwrap().clone();
        assert!(prompt.contains("--- Réponse de WeatherAgent ---"));
        assert!(prompt.contains("24°C, ensoleillé"));
        assert!(prompt.contains("plantez le maïs maintenant"));
    }

    #[tokio::test]
    async fn test_over_budget_answer_is_condensed_once() {
        let long = "mot ".repeat(40).trim_end().to_string();
        let short = "Réponse courte avec les chiffres clés.".to_string();
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(long),
            Ok(short.clone()),
        ]));
        let synthesizer = synthesizer_for(generator.clone(), 10);

        let map = outcomes(&[
            ("A", AgentOutcome::Success("aaa".to_string())),
            ("B", AgentOutcome::Success("bbb".to_string())),
        ]);
        let answer = synthesizer.synthesize("question", &map).await;

        assert_eq!(answer, short);
        assert_eq!(generator.call_count(), 2);
        assert!(word_count(&answer) <= 10);
    }

    #[tokio::test]
    async fn test_condensation_is_never_retried() {
        // The backend ignores the budget both times; the second answer is
        // still returned rather than looping.
        let long = "mot ".repeat(40).trim_end().to_string();
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(long.clone()),
            Ok(long.clone()),
        ]));
        let synthesizer = synthesizer_for(generator.clone(), 10);

        let map = outcomes(&[
            ("A", AgentOutcome::Success("aaa".to_string())),
            ("B", AgentOutcome::Success("bbb".to_string())),
        ]);
        let answer = synthesizer.synthesize("question", &map).await;

        assert_eq!(answer, long);
        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test]
    async fn test_merge_failure_degrades_to_raw_transcript() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Err(
            "backend down".to_string(),
        )]));
        let synthesizer = synthesizer_for(generator.clone(), 100);

        let map = outcomes(&[
            ("A", AgentOutcome::Success("aaa".to_string())),
            ("B", AgentOutcome::Success("bbb".to_string())),
        ]);
        let answer = synthesizer.synthesize("question", &map).await;

        assert!(answer.contains("--- Réponse de A ---"));
        assert!(answer.contains("aaa"));
        assert!(answer.contains("bbb"));
    }

    #[test]
    fn test_word_count_splits_on_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("un deux  trois\nquatre"), 4);
    }
}
