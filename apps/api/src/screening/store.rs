use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::{NewResume, ResumeRow};

/// Persistence for résumé records. Carried in `AppState` as `Arc<dyn ResumeStore>`.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn insert(&self, resume: NewResume) -> Result<ResumeRow, sqlx::Error>;

    /// All records, newest upload first.
    async fn list(&self) -> Result<Vec<ResumeRow>, sqlx::Error>;

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error>;

    /// Returns `false` when no record had this id.
    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error>;
}

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn insert(&self, resume: NewResume) -> Result<ResumeRow, sqlx::Error> {
        sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes
                (id, candidate_name, email, file_name, score, review, score_error, review_error)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&resume.candidate_name)
        .bind(&resume.email)
        .bind(&resume.file_name)
        .bind(resume.score)
        .bind(&resume.review)
        .bind(&resume.score_error)
        .bind(&resume.review_error)
        .fetch_one(&self.pool)
        .await
    }

    async fn list(&self) -> Result<Vec<ResumeRow>, sqlx::Error> {
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY upload_date DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// In-memory store for handler tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryResumeStore {
    rows: std::sync::Mutex<Vec<ResumeRow>>,
}

#[cfg(test)]
impl MemoryResumeStore {
    pub fn rows(&self) -> Vec<ResumeRow> {
        self.rows.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn insert(&self, resume: NewResume) -> Result<ResumeRow, sqlx::Error> {
        let row = ResumeRow {
            id: Uuid::new_v4(),
            candidate_name: resume.candidate_name,
            email: resume.email,
            file_name: resume.file_name,
            upload_date: chrono::Utc::now(),
            score: resume.score,
            review: resume.review,
            score_error: resume.score_error,
            review_error: resume.review_error,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<ResumeRow>, sqlx::Error> {
        let mut rows = self.rows();
        rows.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
        Ok(self.rows().into_iter().find(|r| r.id == id))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() != before)
    }
}
