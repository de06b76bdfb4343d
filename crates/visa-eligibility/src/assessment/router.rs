use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::EligibilityEngine;
use crate::intake::QuestionnaireDraft;

/// Router builder exposing scoring and reference-catalogue endpoints.
pub fn assessment_router(engine: EligibilityEngine<'static>) -> Router {
    Router::new()
        .route("/api/v1/assessments", post(assess_handler))
        .route(
            "/api/v1/reference/countries/:code",
            get(country_handler),
        )
        .route("/api/v1/reference/programs", get(programs_handler))
        .route("/api/v1/reference/fields", get(fields_handler))
        .with_state(engine)
}

pub(crate) async fn assess_handler(
    State(engine): State<EligibilityEngine<'static>>,
    axum::Json(draft): axum::Json<QuestionnaireDraft>,
) -> Response {
    match draft.finish() {
        Ok(record) => {
            let report = engine.report(&record);
            (StatusCode::OK, axum::Json(report)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
                "step": error.step(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn country_handler(
    State(engine): State<EligibilityEngine<'static>>,
    Path(code): Path<String>,
) -> Response {
    let reference = engine.reference();
    let payload = json!({
        "code": code.to_ascii_uppercase(),
        "country": reference.country_info(&code),
        "financialRequirements": reference.financial_requirements(&code),
        "documents": reference.document_requirements(&code),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn programs_handler(
    State(engine): State<EligibilityEngine<'static>>,
) -> Response {
    axum::Json(engine.reference().programs()).into_response()
}

pub(crate) async fn fields_handler(State(engine): State<EligibilityEngine<'static>>) -> Response {
    let fields: Vec<_> = engine.reference().study_fields().collect();
    axum::Json(fields).into_response()
}
