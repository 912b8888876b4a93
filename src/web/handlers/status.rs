// GET /api/status: what the server loaded at startup.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::web::AppState;

/// GET /api/status: ontology and association counts plus defaults.
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let resources = &state.resources;

    let namespaces: serde_json::Map<String, serde_json::Value> = resources
        .dag
        .namespace_counts()
        .into_iter()
        .map(|(namespace, count)| (namespace.short_label().to_string(), count.into()))
        .collect();
    let obsolete = resources.dag.iter().filter(|t| t.is_obsolete).count();

    Json(serde_json::json!({
        "measure": state.config.measure,
        "relations": resources.relations(),
        "obo_path": state.config.obo_path.display().to_string(),
        "associations_path": state.config.associations_path.display().to_string(),
        "terms": resources.dag.len(),
        "obsolete_terms": obsolete,
        "namespaces": namespaces,
        "proteins": resources.associations.len(),
        "annotations": resources.associations.annotation_count(),
    }))
}
