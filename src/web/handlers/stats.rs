// POST /api/stats: per-input statistics for posted inputs.
//
// Same body as /api/matrix; a single input is fine.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::output::report::Report;
use crate::pipeline::{self, Resources};
use crate::similarity::{Measure, SetComparer};
use crate::web::handlers::compare::InputsRequest;
use crate::web::{api_error, load_text_input, run_blocking, AppState};

/// POST /api/stats: terms, namespaces, IC and coherence per input.
pub async fn stats(State(state): State<AppState>, Json(request): Json<InputsRequest>) -> Response {
    if request.inputs.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "no inputs given");
    }

    let measure = request.measure.unwrap_or(state.config.measure);
    let resources = state.resources.clone();
    run_blocking(move || input_stats(&resources, &request, measure).unwrap_or_else(|e| e)).await
}

fn input_stats(
    resources: &Resources,
    request: &InputsRequest,
    measure: Measure,
) -> Result<Response, Response> {
    let similarity = measure.build();
    let mut comparer = SetComparer::new(resources.context(), similarity.as_ref());

    let mut stats = Vec::with_capacity(request.inputs.len());
    for (i, input) in request.inputs.iter().enumerate() {
        let loaded = load_text_input(resources, input, i, request.format)?;
        stats.push(pipeline::file_stats(resources, &mut comparer, &loaded));
    }

    let report = Report::new("stats", measure, resources.relations(), &stats);
    Ok(Json(report).into_response())
}
