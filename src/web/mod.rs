// Web server: JSON API over the comparison pipeline.
//
// Resources are loaded once at startup and shared by every request. Inputs
// arrive as text in the request body (GO lists, accession lists or FASTA),
// so the browser front end never needs files on the server side.
//
// Scoring is CPU-bound and runs on the blocking pool.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::input::{self, InputFormat};
use crate::pipeline::{LoadedInput, Resources};

pub mod handlers;

/// Request bodies carry whole FASTA files.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub resources: Arc<Resources>,
    pub config: Arc<Config>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, resources: Resources, port: u16, bind: &str) -> Result<()> {
    let state = AppState {
        resources: Arc::new(resources),
        config: Arc::new(config),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Mega-GO API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/status", get(handlers::status::get_status))
        .route("/api/compare", post(handlers::compare::compare))
        .route("/api/matrix", post(handlers::compare::matrix))
        .route("/api/term", post(handlers::term::compare_terms))
        .route("/api/stats", post(handlers::stats::stats))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check, always 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

/// One input as posted by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct TextInput {
    /// Shown in results in place of a file name.
    #[serde(default)]
    pub label: Option<String>,
    pub text: String,
}

/// Parse and resolve a posted input. Unlabelled inputs are numbered from 1.
pub(crate) fn load_text_input(
    resources: &Resources,
    posted: &TextInput,
    position: usize,
    format: Option<InputFormat>,
) -> Result<LoadedInput, Response> {
    let label = posted
        .label
        .clone()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| format!("input {}", position + 1));

    let parsed = input::parse_input(&posted.text, format)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, &format!("{label}: {e}")))?;
    let loaded = LoadedInput::new(Path::new(&label), parsed, resources);
    if loaded.terms.is_empty() {
        warn!(input = %label, "Posted input has no usable GO terms");
    }
    Ok(loaded)
}

/// Run CPU-bound scoring off the async runtime.
pub(crate) async fn run_blocking<F>(work: F) -> Response
where
    F: FnOnce() -> Response + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Scoring task failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Scoring task failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::annotations::AssociationParser;
    use crate::ontology::{OboParser, Relations};

    const OBO: &str = "\
[Term]
id: GO:0008150
name: biological_process
namespace: biological_process

[Term]
id: GO:0009987
name: cellular process
namespace: biological_process
is_a: GO:0008150

[Term]
id: GO:0008152
name: metabolic process
namespace: biological_process
is_a: GO:0008150

[Term]
id: GO:0044237
name: cellular metabolic process
namespace: biological_process
is_a: GO:0008152
is_a: GO:0009987

[Term]
id: GO:0006915
name: apoptotic process
namespace: biological_process
is_a: GO:0009987
";

    const ASSOCIATIONS: &str = "P1\tGO:0044237\nP2\tGO:0006915\nP3\tGO:0008152\n";

    fn test_app() -> Router {
        let terms = OboParser::parse_str(OBO).unwrap();
        let associations = AssociationParser::parse_str(ASSOCIATIONS).unwrap();
        let state = AppState {
            resources: Arc::new(Resources::from_parts(terms, associations, Relations::IsA)),
            config: Arc::new(Config::from_vars(|_| None).unwrap()),
        };
        build_router(state)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn assert_close(actual: &serde_json::Value, expected: f64) {
        let actual = actual.as_f64().unwrap();
        assert!((actual - expected).abs() < 1e-6, "expected {expected}, got {actual}");
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_status_reports_loaded_resources() {
        let request = Request::get("/api/status").body(Body::empty()).unwrap();
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["terms"], 5);
        assert_eq!(body["proteins"], 3);
        assert_eq!(body["relations"], "is_a");
        assert_eq!(body["namespaces"]["BPO"], 5);
    }

    #[tokio::test]
    async fn test_compare_go_lists() {
        let body = serde_json::json!({
            "a": { "label": "first", "text": "GO:0044237\n" },
            "b": { "text": "GO:0006915 GO:0044237" },
        });
        let (status, body) = send(test_app(), post_json("/api/compare", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["command"], "compare");
        assert_eq!(body["measure"], "rel");
        assert_eq!(body["results"]["left"], "first");
        assert_eq!(body["results"]["right"], "input 2");
        assert_close(&body["results"]["similarity"]["BPO"], 0.5307559);
        assert!(body["results"]["similarity"]["MFO"].is_null());
    }

    #[tokio::test]
    async fn test_compare_accessions_with_measure_override() {
        let body = serde_json::json!({
            "a": { "text": "P1\n" },
            "b": { "text": "P1\n" },
            "format": "accessions",
            "measure": "lin",
        });
        let (status, body) = send(test_app(), post_json("/api/compare", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["measure"], "lin");
        assert_close(&body["results"]["similarity"]["BPO"], 1.0);
    }

    #[tokio::test]
    async fn test_malformed_fasta_is_a_bad_request() {
        let body = serde_json::json!({
            "a": { "text": "ACGT\n>P1\nMKV\n" },
            "b": { "text": "GO:0044237" },
            "format": "fasta",
        });
        let (status, body) = send(test_app(), post_json("/api/compare", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("input 1"));
    }

    #[tokio::test]
    async fn test_matrix_needs_two_inputs() {
        let one = serde_json::json!({ "inputs": [{ "text": "GO:0044237" }] });
        let (status, _) = send(test_app(), post_json("/api/matrix", one)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let three = serde_json::json!({
            "inputs": [
                { "text": "GO:0044237" },
                { "text": "GO:0006915" },
                { "text": "GO:0008152" },
            ]
        });
        let (status, body) = send(test_app(), post_json("/api/matrix", three)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_term_pair() {
        let body = serde_json::json!({ "a": "GO:0044237", "b": "GO:0006915" });
        let (status, body) = send(test_app(), post_json("/api/term", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"]["mica"]["id"], "GO:0009987");
        assert_close(&body["results"]["score"], 0.1230234);
    }

    #[tokio::test]
    async fn test_unknown_term_is_not_found() {
        let body = serde_json::json!({ "a": "GO:0044237", "b": "GO:0001234" });
        let (status, body) = send(test_app(), post_json("/api/term", body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("GO:0001234"));
    }

    #[tokio::test]
    async fn test_stats_per_input() {
        let body = serde_json::json!({
            "inputs": [{ "label": "cells", "text": "GO:0044237 GO:0006915 GO:9999999" }]
        });
        let (status, body) = send(test_app(), post_json("/api/stats", body)).await;
        assert_eq!(status, StatusCode::OK);
        let file = &body["results"][0];
        assert_eq!(file["label"], "cells");
        assert_eq!(file["total_terms"], 2);
        assert_eq!(file["unknown_terms"], 1);
    }
}
