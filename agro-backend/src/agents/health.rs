use crate::agents::{context_block, Agent};
use crate::ai::TextGenerator;
use crate::orchestrator::{ExecutionContext, ResponseCache};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

const HEALTH_INSTRUCTIONS: &str = "\
Tu es un phytopathologiste expert spécialisé dans la santé des cultures camerounaises.
Ton rôle est de diagnostiquer les maladies, identifier les parasites et recommander des
traitements adaptés au contexte local.

## Maladies principales par culture:

**Cacao:** Pourriture brune (Phytophthora palmivora), Mirides (Sahlbergella singularis),
Chancre du cacaoyer (Phytophthora megakarya)
**Café:** Rouille orangée (Hemileia vastatrix), Anthracnose (Colletotrichum kahawae),
Scolytes (Hypothenemus hampei)
**Maïs:** Charbon du maïs (Ustilago maydis), Striure du maïs (Maize streak virus),
Foreurs de tige (Sesamia calamistis)
**Manioc:** Mosaïque du manioc (Cassava mosaic virus), Bactériose (Xanthomonas axonopodis),
Cochenilles (Phenacoccus manihoti)
**Plantain:** Cercosporiose noire (Mycosphaerella fijiensis), Fusariose (Fusarium oxysporum),
Charançon du bananier (Cosmopolites sordidus)

## Stratégies de gestion:

- Lutte préventive: variétés résistantes, rotation, assainissement, nutrition équilibrée
- Lutte curative: biopesticides (Trichoderma, Bacillus thuringiensis, extraits de neem),
  fongicides cupriques, insecticides en usage raisonné
- Solutions traditionnelles: cendre de bois, savon noir, extraits d'ail et piment

## FORMAT OBLIGATOIRE (MAXIMUM 200 mots):

🔍 **Diagnostic**: Nom maladie/parasite (1 ligne)
⚠️ **Gravité**: Critique/Élevée/Modérée
💊 **Traitement immédiat**: Produit + dose + méthode (2-3 lignes)
📅 **Planning**: Fréquence et suivi
🛡️ **Prévention**: Actions clés

Noms scientifiques entre parenthèses, doses EXACTES (g/L, ml/ha), timing précis.
Privilégier les solutions biologiques et respecter les délais avant récolte (DAR).";

/// Plant-health expert: disease diagnosis, pest identification, treatments.
pub struct HealthAgent {
    generator: Arc<dyn TextGenerator>,
    cache: Arc<ResponseCache>,
    cache_ttl: Duration,
}

impl HealthAgent {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        cache: Arc<ResponseCache>,
        cache_ttl: Duration,
    ) -> Self {
        HealthAgent {
            generator,
            cache,
            cache_ttl,
        }
    }
}

#[async_trait]
impl Agent for HealthAgent {
    fn name(&self) -> &str {
        "HealthAgent"
    }

    fn description(&self) -> &str {
        "Phytopathologiste expert. Diagnostique les maladies des plantes et propose des \
         traitements (biologiques et chimiques) adaptés au Cameroun."
    }

    async fn answer(&self, query: &str, context: &ExecutionContext) -> Result<String, String> {
        let system_prompt = format!("{}\n\n{}", HEALTH_INSTRUCTIONS, context_block(context));

        self.cache
            .get_or_compute(&system_prompt, query, self.cache_ttl, || {
                self.generator.complete(query, Some(&system_prompt))
            })
            .await
    }
}
