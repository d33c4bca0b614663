//! Survey-export surface, shaped after the Qualtrics export-responses
//! workflow: start an export, poll its progress, then fetch the file.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use cursor_sim_export::JobStatus;

use crate::api::types::{QualtricsEnvelope, QualtricsMeta, QualtricsResult, StartExportRequest};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn envelope(result: QualtricsResult, http_status: StatusCode) -> QualtricsEnvelope {
    QualtricsEnvelope {
        result,
        meta: QualtricsMeta { request_id: uuid::Uuid::new_v4().to_string(), http_status: http_status.as_str().to_string() },
    }
}

fn job_status_label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::InProgress => "inProgress",
        JobStatus::Complete => "complete",
        JobStatus::Failed => "failed",
    }
}

pub async fn start_export(
    State(state): State<Arc<AppState>>,
    Path(survey_id): Path<String>,
    Json(_body): Json<StartExportRequest>,
) -> AppResult<Json<QualtricsEnvelope>> {
    if !state.knows_survey(&survey_id) {
        return Err(AppError::NotFound(format!("unknown survey: {survey_id}")));
    }
    let Some(manager) = &state.export_manager else {
        return Err(AppError::NotFound("survey-export surface is not enabled".to_string()));
    };

    let job = manager.start_export(&survey_id);
    Ok(Json(envelope(
        QualtricsResult {
            progress_id: job.progress_id,
            percent_complete: job.percent_complete,
            status: job_status_label(job.status),
            file_id: job.file_id,
        },
        StatusCode::OK,
    )))
}

pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    Path((survey_id, progress_id)): Path<(String, String)>,
) -> AppResult<Json<QualtricsEnvelope>> {
    if !state.knows_survey(&survey_id) {
        return Err(AppError::NotFound(format!("unknown survey: {survey_id}")));
    }
    let Some(manager) = &state.export_manager else {
        return Err(AppError::NotFound("survey-export surface is not enabled".to_string()));
    };

    let job = manager.get_progress(&progress_id)?;
    Ok(Json(envelope(
        QualtricsResult {
            progress_id: job.progress_id,
            percent_complete: job.percent_complete,
            status: job_status_label(job.status),
            file_id: job.file_id,
        },
        StatusCode::OK,
    )))
}

pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path((survey_id, file_id)): Path<(String, String)>,
) -> AppResult<Response> {
    if !state.knows_survey(&survey_id) {
        return Err(AppError::NotFound(format!("unknown survey: {survey_id}")));
    }
    let Some(manager) = &state.export_manager else {
        return Err(AppError::NotFound("survey-export surface is not enabled".to_string()));
    };

    let bytes = manager.get_file(&file_id)?;
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .body(axum::body::Body::from(bytes))
        .expect("static response is well-formed");
    Ok(response.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn unknown_survey_is_rejected_before_touching_the_export_manager() {
        let state = crate::test_support::state_with_export_manager();
        let result = start_export(
            State(state),
            Path("SV_unknown".to_string()),
            Json(StartExportRequest { format: None }),
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn disabled_surface_yields_not_found() {
        let state = crate::test_support::state_with_all_surfaces();
        let result =
            start_export(State(state), Path("SV_test".to_string()), Json(StartExportRequest { format: None }))
                .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn export_runs_to_completion_and_serves_a_file() {
        let state = crate::test_support::state_with_export_manager();
        let Json(started) =
            start_export(State(state.clone()), Path("SV_test".to_string()), Json(StartExportRequest { format: None }))
                .await
                .unwrap();
        assert_eq!(started.result.status, "inProgress");

        let Json(progressed) = get_progress(
            State(state.clone()),
            Path(("SV_test".to_string(), started.result.progress_id.clone())),
        )
        .await
        .unwrap();
        assert_eq!(progressed.result.status, "complete");
        let file_id = progressed.result.file_id.expect("completed job has a file id");

        let response = get_file(State(state), Path(("SV_test".to_string(), file_id))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
