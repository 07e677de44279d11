//! Poster usage events (`poster_analytics` table).

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// What happened to a poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterEventKind {
    Generated,
    Regenerated,
    Viewed,
}

impl PosterEventKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PosterEventKind::Generated => "generated",
            PosterEventKind::Regenerated => "regenerated",
            PosterEventKind::Viewed => "viewed",
        }
    }
}

impl std::fmt::Display for PosterEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row from the `poster_analytics` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PosterEventRow {
    pub id: i64,
    pub user_id: Uuid,
    pub poster_id: Option<Uuid>,
    pub event_type: String,
    pub event_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Insert one analytics event and return its id.
///
/// # Errors
///
/// Returns [`DbError`] on database query failure.
pub async fn insert_poster_event(
    pool: &PgPool,
    owner: Uuid,
    poster_id: Option<Uuid>,
    kind: PosterEventKind,
    metadata: &serde_json::Value,
) -> Result<i64, DbError> {
    Ok(sqlx::query_scalar::<_, i64>(
        "INSERT INTO poster_analytics (user_id, poster_id, event_type, event_data) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(owner)
    .bind(poster_id)
    .bind(kind.as_str())
    .bind(metadata)
    .fetch_one(pool)
    .await?)
}

/// Record an event without letting a failure reach the caller.
///
/// Errors are logged at `warn` and dropped.
pub async fn record_poster_event_best_effort(
    pool: &PgPool,
    owner: Uuid,
    poster_id: Option<Uuid>,
    kind: PosterEventKind,
    metadata: &serde_json::Value,
) {
    if let Err(e) = insert_poster_event(pool, owner, poster_id, kind, metadata).await {
        tracing::warn!(
            user_id = %owner,
            poster_id = ?poster_id,
            event = %kind,
            error = %e,
            "failed to record poster event"
        );
    }
}

/// Events for one poster owned by `owner`, oldest first.
///
/// # Errors
///
/// Returns [`DbError`] on database query failure.
pub async fn list_poster_events(
    pool: &PgPool,
    owner: Uuid,
    poster_id: Uuid,
) -> Result<Vec<PosterEventRow>, DbError> {
    Ok(sqlx::query_as::<_, PosterEventRow>(
        "SELECT id, user_id, poster_id, event_type, event_data, created_at \
         FROM poster_analytics \
         WHERE user_id = $1 AND poster_id = $2 \
         ORDER BY created_at, id",
    )
    .bind(owner)
    .bind(poster_id)
    .fetch_all(pool)
    .await?)
}
