//! Axum route handlers for the résumé screening API.

use std::io::Write;
use std::path::Path as FsPath;

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::{AnalysisMode, AnalysisOutcome};
use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRow};
use crate::state::AppState;

const MAX_CANDIDATE_NAME_CHARS: usize = 100;
const DEFAULT_FILE_NAME: &str = "resume.pdf";

/// Raw multipart fields as received; nothing is validated yet.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub candidate_name: Option<String>,
    pub email: Option<String>,
    pub file_name: Option<String>,
    pub file_bytes: Option<Vec<u8>>,
}

#[derive(Debug)]
pub struct ValidUpload {
    pub candidate_name: String,
    pub email: String,
    pub file_name: String,
    pub file_bytes: Vec<u8>,
}

/// POST /api/v1/resumes
///
/// Stores the upload in a temporary file, runs score and review analyses,
/// persists the record and removes the file. Analysis failures are recorded
/// on the record as error codes; they never fail the request.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let upload = validate_upload(read_upload_form(&mut multipart).await?)?;

    let mut temp = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(".pdf")
        .tempfile_in(&state.config.upload_dir)
        .context("failed to create temporary upload file")?;
    temp.write_all(&upload.file_bytes)
        .context("failed to write temporary upload file")?;
    temp.flush().context("failed to write temporary upload file")?;

    let (score, review) = tokio::join!(
        state.analyzer.analyze(temp.path(), AnalysisMode::Score),
        state.analyzer.analyze(temp.path(), AnalysisMode::Review)
    );

    let score_value = score.as_ref().ok().and_then(AnalysisOutcome::score);

    let record = NewResume {
        candidate_name: upload.candidate_name,
        email: upload.email,
        file_name: upload.file_name,
        score: score_value.map(|s| i16::from(s.value())),
        review: review.as_ref().ok().cloned().and_then(AnalysisOutcome::into_review),
        score_error: score.as_ref().err().map(|e| e.code().to_string()),
        review_error: review.as_ref().err().map(|e| e.code().to_string()),
    };
    let row = state.store.insert(record).await?;

    if let Err(e) = temp.close() {
        warn!("failed to remove temporary upload file: {e}");
    }

    if score_value.is_some_and(|s| !s.is_resume()) {
        info!(id = %row.id, "model judged the upload not to be a resume");
    }
    info!(
        id = %row.id,
        score = ?row.score,
        score_error = ?row.score_error,
        review_error = ?row.review_error,
        "screened resume upload"
    );

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Resume {id} not found")))
    }
}

async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("candidate_name") => {
                form.candidate_name = Some(field.text().await.map_err(multipart_error)?)
            }
            Some("email") => form.email = Some(field.text().await.map_err(multipart_error)?),
            Some("resume_file") => {
                form.file_name = field.file_name().map(str::to_string);
                form.file_bytes = Some(field.bytes().await.map_err(multipart_error)?.to_vec());
            }
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("malformed multipart body: {}", e.body_text()))
    }
}

pub fn validate_upload(form: UploadForm) -> Result<ValidUpload, AppError> {
    let candidate_name = form.candidate_name.unwrap_or_default().trim().to_string();
    if candidate_name.is_empty() {
        return Err(AppError::Validation("candidate_name is required".to_string()));
    }
    if candidate_name.chars().count() > MAX_CANDIDATE_NAME_CHARS {
        return Err(AppError::Validation(format!(
            "candidate_name must be at most {MAX_CANDIDATE_NAME_CHARS} characters"
        )));
    }

    let email = form.email.unwrap_or_default().trim().to_string();
    if !is_valid_email(&email) {
        return Err(AppError::Validation("email is not a valid address".to_string()));
    }

    let file_bytes = form
        .file_bytes
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("resume_file is required".to_string()))?;

    // Only the final path component of the client-supplied name is kept.
    let file_name = form
        .file_name
        .as_deref()
        .and_then(|name| FsPath::new(name).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or(DEFAULT_FILE_NAME)
        .to_string();

    Ok(ValidUpload {
        candidate_name,
        email,
        file_name,
        file_bytes,
    })
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
