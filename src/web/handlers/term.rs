// POST /api/term: similarity of two GO terms with the IC details.
//
// Unknown ids and obsolete ids without a replacement are 404s.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::ontology::{GoId, Resolution};
use crate::output::report::Report;
use crate::pipeline;
use crate::similarity::Measure;
use crate::web::{api_error, AppState};

#[derive(Debug, Deserialize)]
pub struct TermRequest {
    pub a: GoId,
    pub b: GoId,
    #[serde(default)]
    pub measure: Option<Measure>,
}

/// POST /api/term: compare two single GO terms.
pub async fn compare_terms(
    State(state): State<AppState>,
    Json(request): Json<TermRequest>,
) -> Response {
    let resources = &state.resources;
    for id in [request.a, request.b] {
        match resources.dag.resolve(id) {
            Resolution::Unknown(_) => {
                return api_error(
                    StatusCode::NOT_FOUND,
                    &format!("{id} is not in the ontology"),
                )
            }
            Resolution::Obsolete(_) => {
                return api_error(
                    StatusCode::NOT_FOUND,
                    &format!("{id} is obsolete and has no replacement"),
                )
            }
            _ => {}
        }
    }

    let measure = request.measure.unwrap_or(state.config.measure);
    match pipeline::compare_terms(resources, measure, request.a, request.b) {
        Ok(result) => {
            Json(Report::new("term", measure, resources.relations(), &result)).into_response()
        }
        Err(e) => api_error(StatusCode::BAD_REQUEST, &format!("{e:#}")),
    }
}
