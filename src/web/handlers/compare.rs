// Set comparisons over posted inputs.
//
// POST /api/compare: two inputs, one BMA score per namespace
// POST /api/matrix: every unordered pair of two or more inputs
//
// Bodies carry the input text itself. `format` forces the input format for
// every input (default: detect per input) and `measure` overrides the
// server default.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::input::InputFormat;
use crate::output::report::Report;
use crate::pipeline::{self, Resources};
use crate::similarity::{Measure, SetComparer};
use crate::web::{api_error, load_text_input, run_blocking, AppState, TextInput};

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub a: TextInput,
    pub b: TextInput,
    #[serde(default)]
    pub format: Option<InputFormat>,
    #[serde(default)]
    pub measure: Option<Measure>,
}

/// Body shared by the endpoints that take a list of inputs.
#[derive(Debug, Deserialize)]
pub struct InputsRequest {
    pub inputs: Vec<TextInput>,
    #[serde(default)]
    pub format: Option<InputFormat>,
    #[serde(default)]
    pub measure: Option<Measure>,
}

/// POST /api/compare: similarity of two inputs.
pub async fn compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Response {
    let measure = request.measure.unwrap_or(state.config.measure);
    let resources = state.resources.clone();
    run_blocking(move || score_pair(&resources, &request, measure).unwrap_or_else(|e| e)).await
}

fn score_pair(
    resources: &Resources,
    request: &CompareRequest,
    measure: Measure,
) -> Result<Response, Response> {
    let left = load_text_input(resources, &request.a, 0, request.format)?;
    let right = load_text_input(resources, &request.b, 1, request.format)?;

    let similarity = measure.build();
    let mut comparer = SetComparer::new(resources.context(), similarity.as_ref());
    let result = pipeline::compare_pair(&mut comparer, &left, &right);

    let report = Report::new("compare", measure, resources.relations(), &result);
    Ok(Json(report).into_response())
}

/// POST /api/matrix: all-pairs similarity of two or more inputs.
pub async fn matrix(
    State(state): State<AppState>,
    Json(request): Json<InputsRequest>,
) -> Response {
    if request.inputs.len() < 2 {
        return api_error(
            StatusCode::BAD_REQUEST,
            &format!(
                "matrix needs at least two inputs, got {}",
                request.inputs.len()
            ),
        );
    }

    let measure = request.measure.unwrap_or(state.config.measure);
    let resources = state.resources.clone();
    run_blocking(move || score_matrix(&resources, &request, measure).unwrap_or_else(|e| e)).await
}

fn score_matrix(
    resources: &Resources,
    request: &InputsRequest,
    measure: Measure,
) -> Result<Response, Response> {
    let inputs = request
        .inputs
        .iter()
        .enumerate()
        .map(|(i, input)| load_text_input(resources, input, i, request.format))
        .collect::<Result<Vec<_>, _>>()?;

    let similarity = measure.build();
    let mut comparer = SetComparer::new(resources.context(), similarity.as_ref());
    let results = pipeline::compare_matrix(&mut comparer, &inputs, false);

    let report = Report::new("matrix", measure, resources.relations(), &results);
    Ok(Json(report).into_response())
}
