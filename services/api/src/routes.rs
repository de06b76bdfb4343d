use crate::infra::{deserialize_optional_date, today, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use visa_eligibility::assessment::{assessment_router, AssessmentReport, EligibilityEngine};
use visa_eligibility::error::AppError;
use visa_eligibility::intake::{import_questionnaires, QuestionnaireDraft, QuestionnaireStep};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchAssessmentRequest {
    /// Questionnaire export with camelCase headers, one applicant per row.
    pub(crate) csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) assessed_on: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchAssessmentResponse {
    pub(crate) assessed_on: NaiveDate,
    pub(crate) completed: usize,
    pub(crate) rejected: usize,
    pub(crate) rows: Vec<BatchRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchRow {
    pub(crate) row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) report: Option<AssessmentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) step: Option<QuestionnaireStep>,
}

pub(crate) fn with_assessment_routes(engine: EligibilityEngine<'static>) -> axum::Router {
    assessment_router(engine)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/assessments/batch",
            axum::routing::post(batch_assessment_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn batch_assessment_endpoint(
    Json(payload): Json<BatchAssessmentRequest>,
) -> Result<Json<BatchAssessmentResponse>, AppError> {
    let BatchAssessmentRequest { csv, assessed_on } = payload;

    let drafts = import_questionnaires(Cursor::new(csv.into_bytes()))?;
    let rows = assess_batch(EligibilityEngine::standard(), drafts);
    let completed = rows.iter().filter(|row| row.report.is_some()).count();

    Ok(Json(BatchAssessmentResponse {
        assessed_on: assessed_on.unwrap_or_else(today),
        completed,
        rejected: rows.len() - completed,
        rows,
    }))
}

/// Rows are numbered from 1 in export order; incomplete rows carry the intake error.
pub(crate) fn assess_batch(
    engine: EligibilityEngine<'_>,
    drafts: Vec<QuestionnaireDraft>,
) -> Vec<BatchRow> {
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| match draft.finish() {
            Ok(record) => BatchRow {
                row: index + 1,
                report: Some(engine.report(&record)),
                error: None,
                step: None,
            },
            Err(err) => BatchRow {
                row: index + 1,
                report: None,
                step: err.step(),
                error: Some(err.to_string()),
            },
        })
        .collect()
}
