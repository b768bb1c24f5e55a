use crate::agents::{context_block, region_from_context, Agent};
use crate::ai::TextGenerator;
use crate::data::regions::region_by_name;
use crate::orchestrator::{ExecutionContext, ResponseCache};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Soil, water and resource-management expert.
pub struct ResourcesAgent {
    generator: Arc<dyn TextGenerator>,
    cache: Arc<ResponseCache>,
    cache_ttl: Duration,
}

impl ResourcesAgent {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        cache: Arc<ResponseCache>,
        cache_ttl: Duration,
    ) -> Self {
        ResourcesAgent {
            generator,
            cache,
            cache_ttl,
        }
    }
}

#[async_trait]
impl Agent for ResourcesAgent {
    fn name(&self) -> &str {
        "ResourcesAgent"
    }

    fn description(&self) -> &str {
        "Spécialiste en gestion des sols, de l'eau et des ressources agricoles. Optimise \
         la fertilité et l'irrigation pour une agriculture durable."
    }

    async fn answer(&self, query: &str, context: &ExecutionContext) -> Result<String, String> {
        let region_name = region_from_context(context);
        let soils = region_by_name(region_name)
            .map(|r| r.soil_types.join(", "))
            .unwrap_or_else(|| "Non renseignés".to_string());

        let system_prompt = format!(
            "Tu es un expert pédologue et hydrologue agricole au Cameroun.\n\
             Ton rôle est d'analyser les besoins du sol, de recommander des engrais \
             (organiques et chimiques) et d'optimiser l'irrigation.\n\
             Région actuelle : {}. Types de sols dominants : {}.\n\n\
             {}\n\
             Règles :\n\
             - Privilégier les ressources locales (compost, fientes de volailles, fumier, \
               cendres de bois)\n\
             - Donner des doses précises (kg/ha, tonnes) et un calendrier d'application\n\
             - Mentionner les prix FCFA des intrants quand c'est pertinent\n\
             - Proposer des amendements adaptés au type de sol\n\
             Réponds de manière concise et utile pour un agriculteur camerounais.",
            region_name,
            soils,
            context_block(context)
        );

        self.cache
            .get_or_compute(&system_prompt, query, self.cache_ttl, || {
                self.generator.complete(query, Some(&system_prompt))
            })
            .await
    }
}
