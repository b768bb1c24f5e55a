use crate::agents::{context_block, Agent};
use crate::ai::TextGenerator;
use crate::data::market_prices;
use crate::orchestrator::{ExecutionContext, ResponseCache};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Agricultural economist: market prices, trends, profitability.
pub struct EconomicAgent {
    generator: Arc<dyn TextGenerator>,
    cache: Arc<ResponseCache>,
    cache_ttl: Duration,
}

impl EconomicAgent {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        cache: Arc<ResponseCache>,
        cache_ttl: Duration,
    ) -> Self {
        EconomicAgent {
            generator,
            cache,
            cache_ttl,
        }
    }
}

#[async_trait]
impl Agent for EconomicAgent {
    fn name(&self) -> &str {
        "EconomicAgent"
    }

    fn description(&self) -> &str {
        "Économiste agricole. Informe sur les prix du marché, les tendances et la \
         rentabilité des cultures."
    }

    async fn answer(&self, query: &str, context: &ExecutionContext) -> Result<String, String> {
        let system_prompt = format!(
            "Tu es un expert économiste agricole spécialisé dans les marchés camerounais.\n\
             Ton rôle est d'analyser la rentabilité des cultures, les tendances du marché et \
             de conseiller les agriculteurs sur les aspects économiques.\n\n\
             Prix actuels du marché (FCFA) :\n{}\n\n\
             {}\n\
             Règles d'analyse :\n\
             - Tous les montants en FCFA, chiffres précis (pas de \"environ\")\n\
             - Inclure coûts de production réalistes et variations saisonnières\n\
             - Adapter aux petites exploitations (0.5-2 ha)\n\
             - Distinguer prix bord champ et prix marché urbain\n\
             Réponds en 200 mots maximum, de manière concise et chiffrée.",
            market_prices::format_for_prompt(),
            context_block(context)
        );

        self.cache
            .get_or_compute(&system_prompt, query, self.cache_ttl, || {
                self.generator.complete(query, Some(&system_prompt))
            })
            .await
    }
}
