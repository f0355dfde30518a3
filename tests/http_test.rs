mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{five_row_inventory, RecordingTranslator, UnavailableTranslator};
use std::sync::Arc;
use tower::ServiceExt;
use xlsx_translator::{server, AppConfig, ServerState, Translator};

fn app_with(translator: Arc<dyn Translator>) -> Router {
    server::router(Arc::new(ServerState {
        config: AppConfig::default(),
        translator,
    }))
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app_with(Arc::new(RecordingTranslator::default()));
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn languages_lists_offer_and_default() {
    let app = app_with(Arc::new(RecordingTranslator::default()));
    let response = app
        .oneshot(Request::get("/languages").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(
        body["languages"],
        serde_json::json!(["de", "fr", "es", "it", "zh", "ja", "pl"])
    );
    assert_eq!(body["default"], serde_json::json!(["de"]));
}

#[tokio::test]
async fn translate_returns_a_downloadable_workbook() {
    let translator = Arc::new(RecordingTranslator::default());
    let app = app_with(translator.clone());

    let response = app
        .oneshot(post("/translate?languages=de,es", five_row_inventory()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"translated.xlsx\""
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"PK"));
    assert_eq!(translator.call_count(), 28);
}

#[tokio::test]
async fn translate_without_languages_uses_the_default() {
    let translator = Arc::new(RecordingTranslator::default());
    let app = app_with(translator.clone());

    let response = app
        .oneshot(post("/translate", five_row_inventory()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(translator
        .calls
        .lock()
        .unwrap()
        .iter()
        .all(|(_, target)| target == "de"));
}

#[tokio::test]
async fn preview_returns_translated_tables() {
    let app = app_with(Arc::new(RecordingTranslator::default()));
    let response = app
        .oneshot(post("/preview?languages=fr", five_row_inventory()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["messages"][1], "Translation completed!");
    assert_eq!(body["previews"][0]["title"], "Translated File (FR)");
    assert_eq!(body["previews"][0]["table"]["rows"][0][0], "Pain");
    assert_eq!(body["previews"][0]["table"]["rows"][2][2], "");
}

#[tokio::test]
async fn bad_upload_is_a_client_error_without_api_calls() {
    let translator = Arc::new(RecordingTranslator::default());
    let app = app_with(translator.clone());

    let response = app
        .oneshot(post("/translate?languages=de", b"not a spreadsheet".to_vec()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Error processing file:"));
    assert_eq!(translator.call_count(), 0);
}

#[tokio::test]
async fn unsupported_language_is_a_client_error() {
    let app = app_with(Arc::new(RecordingTranslator::default()));
    let response = app
        .oneshot(post("/translate?languages=de,xx", five_row_inventory()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn translation_api_failure_is_a_bad_gateway() {
    let app = app_with(Arc::new(UnavailableTranslator::default()));
    let response = app
        .oneshot(post("/translate?languages=de", five_row_inventory()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "API error: API returned 503");
}
