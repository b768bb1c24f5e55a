use crate::agents::{context_block, region_from_context, Agent};
use crate::ai::TextGenerator;
use crate::data::planting_calendar::windows_for_region;
use crate::data::regions::region_by_name;
use crate::orchestrator::{ExecutionContext, ResponseCache};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Agronomy expert for crop choice, planting windows and field practices.
pub struct CropAgent {
    generator: Arc<dyn TextGenerator>,
    cache: Arc<ResponseCache>,
    cache_ttl: Duration,
}

impl CropAgent {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        cache: Arc<ResponseCache>,
        cache_ttl: Duration,
    ) -> Self {
        CropAgent {
            generator,
            cache,
            cache_ttl,
        }
    }

    fn calendar_block(region_name: &str) -> String {
        let windows = windows_for_region(region_name);
        if windows.is_empty() {
            return String::new();
        }
        let mut block = String::from("Calendrier de plantation local :\n");
        for window in windows {
            block.push_str(&format!(
                "- {}: semis de {} à {}. {}\n",
                window.crop, window.start, window.end, window.notes
            ));
        }
        block
    }
}

#[async_trait]
impl Agent for CropAgent {
    fn name(&self) -> &str {
        "CropAgent"
    }

    fn description(&self) -> &str {
        "Agronome expert spécialisé dans les cultures camerounaises (Cacao, Café, Coton, \
         Vivriers). Donne des conseils sur les itinéraires techniques, les semis et les récoltes."
    }

    async fn answer(&self, query: &str, context: &ExecutionContext) -> Result<String, String> {
        let region_name = region_from_context(context);
        let region = region_by_name(region_name);

        let crops = region
            .map(|r| r.major_crops.join(", "))
            .unwrap_or_else(|| "Toutes cultures".to_string());
        let climate = region.map(|r| r.climate_description).unwrap_or("");
        let region_notes = region.map(|r| r.description).unwrap_or("");

        let system_prompt = format!(
            "Tu es un agronome expert au Cameroun.\n\
             Région actuelle : {}. {}\n\
             Cultures principales de la région : {}.\n\n\
             {}\n\
             {}\n\
             Utilise tes connaissances générales sur l'agriculture tropicale ET les \
             spécificités locales.\n\
             Si l'utilisateur demande \"quand planter\", réfère-toi au calendrier local et \
             aux saisons des pluies de la région ({}).\n\
             Réponds de manière concise et utile pour un agriculteur camerounais.",
            region_name,
            region_notes,
            crops,
            Self::calendar_block(region_name),
            context_block(context),
            climate
        );

        self.cache
            .get_or_compute(&system_prompt, query, self.cache_ttl, || {
                self.generator.complete(query, Some(&system_prompt))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_block_lists_regional_and_default_windows() {
        let block = CropAgent::calendar_block("Centre");
        assert!(block.contains("Cacao"));
        assert!(block.contains("Tomate")); // country-wide default
        assert!(block.contains("semis de Mars"));
    }
}
