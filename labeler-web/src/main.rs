//! Servidor Axum que aplica os esquemas de rotulagem a datasets enviados em JSON

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use labeler_core::{Dataset, LabelerConfig, SchemeKind, DEFAULT_MUTATION_CLASS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Estado compartilhado da aplicação
struct AppState {
    /// Configuração usada quando a requisição não especifica os campos
    defaults: LabelerConfig,
}

#[derive(Deserialize)]
struct LabelRequest {
    dataset: Dataset,
    #[serde(default)]
    scheme: Option<SchemeKind>,
    #[serde(default)]
    mutation_class: Option<String>,
    #[serde(default)]
    parallel: Option<bool>,
}

#[derive(Serialize)]
struct LabelResponse {
    dataset: Dataset,
    scheme: SchemeKind,
    total_tokens: usize,
    processing_ms: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let defaults = match std::env::var("LABELER_CONFIG") {
        Ok(json) => match LabelerConfig::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                warn!("LABELER_CONFIG inválido ({e}); usando padrões");
                LabelerConfig::default()
            }
        },
        Err(_) => LabelerConfig::default(),
    };
    info!(?defaults, "configuração padrão");
    let state = Arc::new(AppState { defaults });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/schemes", get(schemes_handler))
        .route("/label", post(label_handler))
        .layer(cors)
        .with_state(state);

    let addr = std::env::var("LABELER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("não foi possível escutar em {addr}: {e}");
            return;
        }
    };
    info!("Servidor de rotulagem iniciado em http://{addr}");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("servidor encerrado com erro: {e}");
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// Lista os esquemas disponíveis
async fn schemes_handler() -> impl IntoResponse {
    let schemes: Vec<&str> = SchemeKind::all().iter().map(|s| s.name()).collect();
    Json(serde_json::json!({
        "schemes": schemes,
        "default_mutation_class": DEFAULT_MUTATION_CLASS,
    }))
}

/// Rotula o dataset recebido e devolve-o com os rótulos preenchidos
async fn label_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LabelRequest>,
) -> impl IntoResponse {
    let config = LabelerConfig {
        scheme: req.scheme.unwrap_or(state.defaults.scheme),
        mutation_class: req
            .mutation_class
            .unwrap_or_else(|| state.defaults.mutation_class.clone()),
        parallel: req.parallel.unwrap_or(state.defaults.parallel),
    };
    let scheme = config.scheme;
    let mut dataset = req.dataset;

    info!(
        scheme = scheme.name(),
        parts = dataset.parts.len(),
        "rotulando dataset via HTTP"
    );

    // A rotulagem é síncrona; roda fora do runtime para não bloqueá-lo
    let started = std::time::Instant::now();
    let result = tokio::task::spawn_blocking(move || {
        config.run(&mut dataset).map(|()| dataset)
    })
    .await;

    match result {
        Ok(Ok(dataset)) => {
            let total_tokens = dataset.token_count();
            Json(LabelResponse {
                dataset,
                scheme,
                total_tokens,
                processing_ms: started.elapsed().as_millis() as u64,
            })
            .into_response()
        }
        Ok(Err(e)) => {
            warn!("falha na rotulagem: {e}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
