use crate::orchestrator::ExecutionContext;
use crate::AppState;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    query: Option<String>,
    region: Option<String>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/query").route(web::post().to(handle_query)));
}

/// Run one query through the orchestrator: route, dispatch, synthesize.
async fn handle_query(
    state: web::Data<AppState>,
    body: web::Json<QueryRequest>,
) -> impl Responder {
    let query = match body.query.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q,
        _ => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Query parameter is required"
            }));
        }
    };

    let region = body
        .region
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(state.config.default_region.as_str())
        .to_string();

    log::info!("[QUERY] region={} query={}", region, query);

    let context = ExecutionContext::new().with("region", region.clone());
    let result = state.orchestrator.handle_query(query, &context).await;

    HttpResponse::Ok().json(serde_json::json!({
        "query": query,
        "region": region,
        "orchestration": {
            "selected_agents": result.selected_agents,
            "individual_responses": result.individual_responses,
        },
        "final_response": result.final_response,
    }))
}
