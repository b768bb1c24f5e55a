use crate::agents::{context_block, region_from_context, Agent};
use crate::ai::TextGenerator;
use crate::data::regions::region_by_name;
use crate::orchestrator::{ExecutionContext, ResponseCache};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Coordinates of the regional capitals, used for the Open-Meteo lookup.
const REGION_COORDINATES: &[(&str, f64, f64)] = &[
    ("Centre", 3.8480, 11.5021),
    ("Littoral", 4.0511, 9.7679),
    ("Ouest", 5.4777, 10.4176),
    ("Nord-Ouest", 5.9631, 10.1591),
    ("Sud-Ouest", 4.1500, 9.2333),
    ("Sud", 2.9167, 11.1500),
    ("Est", 4.5833, 13.6833),
    ("Adamaoua", 7.3167, 13.5833),
    ("Nord", 9.3000, 13.4000),
    ("Extrême-Nord", 10.5972, 14.3158),
];

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
}

/// Weather and agro-climate expert. Enriches its prompt with live
/// Open-Meteo readings for the region when the API is reachable.
pub struct WeatherAgent {
    generator: Arc<dyn TextGenerator>,
    cache: Arc<ResponseCache>,
    cache_ttl: Duration,
    http: Client,
}

impl WeatherAgent {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        cache: Arc<ResponseCache>,
        cache_ttl: Duration,
    ) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        WeatherAgent {
            generator,
            cache,
            cache_ttl,
            http,
        }
    }

    fn region_coordinates(region: &str) -> Option<(f64, f64)> {
        REGION_COORDINATES
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(region))
            .map(|&(_, lat, lon)| (lat, lon))
    }

    async fn fetch_current_weather(&self, region: &str) -> Option<CurrentWeather> {
        let (lat, lon) = Self::region_coordinates(region)?;
        let url = format!(
            "https://api.open-meteo.com/v1/forecast?latitude={}&longitude={}&current_weather=true",
            lat, lon
        );

        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                log::warn!("[WEATHER] Failed to fetch weather for {}: {}", region, e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::warn!(
                "[WEATHER] Open-Meteo returned status {} for {}",
                response.status(),
                region
            );
            return None;
        }

        match response.json::<ForecastResponse>().await {
            Ok(forecast) => forecast.current_weather,
            Err(e) => {
                log::warn!("[WEATHER] Failed to parse weather payload: {}", e);
                None
            }
        }
    }

    fn format_weather(weather: Option<&CurrentWeather>) -> String {
        match weather {
            Some(w) => format!(
                "Température: {}°C, Vitesse du vent: {} km/h.",
                w.temperature, w.windspeed
            ),
            None => "Données météo non disponibles temporairement.".to_string(),
        }
    }
}

#[async_trait]
impl Agent for WeatherAgent {
    fn name(&self) -> &str {
        "WeatherAgent"
    }

    fn description(&self) -> &str {
        "Expert en climatologie et météo agricole pour le Cameroun. Fournit des prévisions \
         et des conseils climatiques par région."
    }

    async fn answer(&self, query: &str, context: &ExecutionContext) -> Result<String, String> {
        let region_name = region_from_context(context);
        let weather = self.fetch_current_weather(region_name).await;
        let weather_desc = Self::format_weather(weather.as_ref());

        let region_desc = match region_by_name(region_name) {
            Some(region) => format!(
                "{} (Capitale: {}). Climat: {} Météo actuelle: {}",
                region.name, region.capital, region.climate_description, weather_desc
            ),
            None => format!("Région inconnue. Météo actuelle: {}", weather_desc),
        };

        let system_prompt = format!(
            "Tu es l'agent météo spécialisé pour le Cameroun.\n\
             La région concernée est : {}.\n\n\
             {}\n\
             Appuie-toi sur les mesures fournies quand l'utilisateur demande la météo actuelle.\n\
             Donne des conseils agricoles liés à ce climat (irrigation, risques de maladies \
             liés à l'humidité).\n\
             Réponds de manière concise et utile pour un agriculteur camerounais.",
            region_desc,
            context_block(context)
        );

        self.cache
            .get_or_compute(&system_prompt, query, self.cache_ttl, || {
                self.generator.complete(query, Some(&system_prompt))
            })
            .await
    }
}
