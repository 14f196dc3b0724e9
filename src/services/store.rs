// src/services/store.rs

use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use crate::{
    error::QuizError,
    models::{quiz::QuizPayload, record::QuizRecord},
};

/// Append-only log of generated quizzes.
///
/// `insert` assigns the id and creation time. `list_all` returns newest first.
#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn insert(
        &self,
        url: &str,
        title: &str,
        payload: &QuizPayload,
    ) -> Result<QuizRecord, QuizError>;

    async fn list_all(&self) -> Result<Vec<QuizRecord>, QuizError>;
}

/// `quiz_records` table in Postgres.
#[derive(Clone)]
pub struct PgQuizStore {
    pool: PgPool,
}

impl PgQuizStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizStore for PgQuizStore {
    async fn insert(
        &self,
        url: &str,
        title: &str,
        payload: &QuizPayload,
    ) -> Result<QuizRecord, QuizError> {
        sqlx::query_as::<_, QuizRecord>(
            r#"
            INSERT INTO quiz_records (url, title, data)
            VALUES ($1, $2, $3)
            RETURNING id, url, title, data, created_at
            "#,
        )
        .bind(url)
        .bind(title)
        .bind(Json(payload))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert quiz record: {:?}", e);
            QuizError::from(e)
        })
    }

    async fn list_all(&self) -> Result<Vec<QuizRecord>, QuizError> {
        sqlx::query_as::<_, QuizRecord>(
            r#"
            SELECT id, url, title, data, created_at
            FROM quiz_records
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list quiz records: {:?}", e);
            QuizError::from(e)
        })
    }
}

/// Process-local store. Records are lost on restart.
#[derive(Default)]
pub struct MemoryQuizStore {
    records: Mutex<Vec<QuizRecord>>,
}

impl MemoryQuizStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStore for MemoryQuizStore {
    async fn insert(
        &self,
        url: &str,
        title: &str,
        payload: &QuizPayload,
    ) -> Result<QuizRecord, QuizError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| QuizError::Store(e.to_string()))?;

        let record = QuizRecord {
            id: records.last().map_or(1, |r| r.id + 1),
            url: url.to_string(),
            title: title.to_string(),
            data: Json(payload.clone()),
            created_at: chrono::Utc::now(),
        };
        records.push(record.clone());

        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<QuizRecord>, QuizError> {
        let records = self
            .records
            .lock()
            .map_err(|e| QuizError::Store(e.to_string()))?;

        let mut newest_first = records.clone();
        newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(newest_first)
    }
}
