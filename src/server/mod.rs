use crate::pipeline::{run_translation, TranslationPreview};
use crate::translation::Translator;
use crate::utils::{AppConfig, XlsxTranslatorError};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Read-only state shared by every request. Runs never share mutable data.
pub struct ServerState {
    pub config: AppConfig,
    pub translator: Arc<dyn Translator>,
}

pub type SharedState = Arc<ServerState>;

#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    /// Comma-separated language codes, e.g. `de,fr`.
    pub languages: Option<String>,
}

impl LanguageQuery {
    pub fn resolve(&self, config: &AppConfig) -> Vec<String> {
        let requested: Vec<String> = self
            .languages
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if requested.is_empty() {
            config.translation.default_languages.clone()
        } else {
            requested
        }
    }
}

#[derive(Debug, Serialize)]
struct PreviewResponse {
    run_id: String,
    messages: Vec<String>,
    previews: Vec<TranslationPreview>,
    file_name: String,
}

pub fn router(state: SharedState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/languages", get(languages))
        .route("/translate", post(translate_handler))
        .route("/preview", post(preview_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub async fn serve(state: SharedState, bind_addr: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{}:{}", bind_addr, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("HTTP Server listening on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health     - Health check");
    tracing::info!("  GET  /info       - Server info");
    tracing::info!("  GET  /languages  - Offered target languages");
    tracing::info!("  POST /translate  - Upload .xlsx, download translated workbook");
    tracing::info!("  POST /preview    - Upload .xlsx, get translated tables as JSON");
    tracing::info!("Example:");
    tracing::info!(
        "  curl -X POST 'http://{}/translate?languages=de,fr' --data-binary @input.xlsx -o translated.xlsx",
        addr
    );

    axum::serve(listener, router(state)).await?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "xlsx-translator",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn info(State(state): State<SharedState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.config.server.name,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Translate every cell of an Excel workbook and download original and translated columns side by side",
        "provider": state.translator.name(),
        "endpoints": {
            "GET /health": "Health check",
            "GET /info": "Server info",
            "GET /languages": "Offered target languages and the default selection",
            "POST /translate?languages=de,fr": "Body: .xlsx bytes. Returns the translated workbook",
            "POST /preview?languages=de,fr": "Body: .xlsx bytes. Returns translated tables as JSON"
        }
    }))
}

async fn languages(State(state): State<SharedState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "languages": state.config.translation.languages,
        "default": state.config.translation.default_languages
    }))
}

async fn translate_handler(
    State(state): State<SharedState>,
    Query(query): Query<LanguageQuery>,
    body: Bytes,
) -> Response {
    let languages = query.resolve(&state.config);

    match run_translation(&body, &languages, state.translator.as_ref(), &state.config).await {
        Ok(output) => {
            let disposition = format!("attachment; filename=\"{}\"", output.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, output.mime_type.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                output.workbook,
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

async fn preview_handler(
    State(state): State<SharedState>,
    Query(query): Query<LanguageQuery>,
    body: Bytes,
) -> Response {
    let languages = query.resolve(&state.config);

    match run_translation(&body, &languages, state.translator.as_ref(), &state.config).await {
        Ok(output) => Json(PreviewResponse {
            run_id: output.run_id,
            messages: output.messages,
            previews: output.previews,
            file_name: output.file_name,
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}

pub fn error_status(err: &XlsxTranslatorError) -> StatusCode {
    if err.is_input_error() {
        StatusCode::BAD_REQUEST
    } else if err.is_translation_error() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn error_response(err: &XlsxTranslatorError) -> Response {
    let status = error_status(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "Translation run failed");
    }
    (status, Json(serde_json::json!({"error": err.to_string()}))).into_response()
}
