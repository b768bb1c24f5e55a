use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod agents;
mod ai;
mod config;
mod controllers;
mod data;
mod orchestrator;

use ai::{LlmClient, TextGenerator};
use config::Config;
use orchestrator::{Orchestrator, ResponseCache};

pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<Orchestrator>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    log::info!(
        "Initializing LLM client for {} (model {})",
        config.llm_endpoint,
        config.llm_model
    );
    let client = LlmClient::new(&config.llm_api_key, &config.llm_endpoint, &config.llm_model)
        .expect("Failed to initialize LLM client");
    let generator: Arc<dyn TextGenerator> = Arc::new(client);

    let cache = Arc::new(ResponseCache::new());

    log::info!(
        "Loaded {} reference regions",
        data::regions::all_regions().len()
    );

    log::info!("Building agent registry");
    let registry = agents::create_default_registry(
        generator.clone(),
        cache.clone(),
        config.agent_cache_ttl(),
        config.weather_cache_ttl(),
    );
    log::info!("Registered {} agents", registry.len());

    let orchestrator = Arc::new(Orchestrator::new(
        registry,
        generator,
        cache,
        config.orchestrator_settings(),
    ));

    let state = web::Data::new(AppState {
        config,
        orchestrator,
    });

    log::info!("Starting server on port {}", port);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(controllers::query::config)
            .configure(controllers::agents::config)
            .configure(controllers::health::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
