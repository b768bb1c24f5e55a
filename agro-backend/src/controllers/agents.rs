use crate::AppState;
use actix_web::{web, HttpResponse, Responder};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/agents").route(web::get().to(list_agents)));
}

/// The registry's (name, description) pairs, verbatim.
async fn list_agents(state: web::Data<AppState>) -> impl Responder {
    let agents: Vec<serde_json::Value> = state
        .orchestrator
        .registry()
        .list()
        .into_iter()
        .map(|(name, description)| {
            serde_json::json!({
                "name": name,
                "description": description,
            })
        })
        .collect();

    HttpResponse::Ok().json(agents)
}
