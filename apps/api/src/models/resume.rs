use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored résumé upload with the outcome of both analyses.
///
/// For each analysis exactly one of the value and the `*_error` code is set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub candidate_name: String,
    pub email: String,
    pub file_name: String,
    pub upload_date: DateTime<Utc>,
    pub score: Option<i16>,
    pub review: Option<String>,
    pub score_error: Option<String>,
    pub review_error: Option<String>,
}

/// Insert payload for [`ResumeRow`]; `id` and `upload_date` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub candidate_name: String,
    pub email: String,
    pub file_name: String,
    pub score: Option<i16>,
    pub review: Option<String>,
    pub score_error: Option<String>,
    pub review_error: Option<String>,
}
