//! One-shot query harness
//!
//! Sends a single question to a running agro-backend server and prints the
//! orchestration details without needing a frontend.
//!
//! Usage:
//!   ASK_QUERY="Puis-je planter du maïs cette semaine ?" \
//!   ASK_REGION="Centre" \
//!   ASK_SERVER_URL="http://localhost:8080" \
//!   cargo run --bin ask

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct QueryRequest {
    query: String,
    region: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    orchestration: Orchestration,
    final_response: String,
}

#[derive(Debug, Deserialize)]
struct Orchestration {
    selected_agents: Vec<String>,
    individual_responses: HashMap<String, String>,
}

#[tokio::main]
async fn main() {
    let query = match env::var("ASK_QUERY") {
        Ok(q) if !q.trim().is_empty() => q,
        _ => {
            eprintln!("ASK_QUERY must be set to the question to ask");
            std::process::exit(1);
        }
    };
    let region = env::var("ASK_REGION").unwrap_or_else(|_| "Centre".to_string());
    let server_url =
        env::var("ASK_SERVER_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

    println!("--- Agriculture Cameroun ---");
    println!("Région: {}", region);
    println!("Question: {}", query);
    println!("Traitement en cours...\n");

    let client = Client::builder()
        .timeout(Duration::from_secs(300))
        .build()
        .expect("Failed to build HTTP client");

    let request = QueryRequest { query, region };
    let response = match client
        .post(format!("{}/api/query", server_url.trim_end_matches('/')))
        .json(&request)
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Request to {} failed: {}", server_url, e);
            std::process::exit(1);
        }
    };

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        eprintln!("Server returned {}: {}", status, body);
        std::process::exit(1);
    }

    let result: QueryResponse = match response.json().await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to parse server response: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Agents consultés: {}\n",
        result.orchestration.selected_agents.join(", ")
    );
    for (name, text) in &result.orchestration.individual_responses {
        println!("--- {} ---", name);
        println!("{}\n", text);
    }

    println!("--- Synthèse Finale ---");
    println!("{}", result.final_response);
}
