//! Database operations for the `posters` table.
//!
//! Every query is scoped by `user_id`; a poster owned by someone else reads
//! as absent and cannot be updated or deleted.

use adcraft_core::{BusinessProfile, GeneratedContent, VisualDirection};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

const MAX_LIST_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `posters` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PosterRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_name: String,
    pub industry: String,
    pub services: String,
    pub target_audience: String,
    pub brand_personality: String,
    pub cultural_context: String,
    pub language: String,
    pub headline: String,
    pub subheading: String,
    pub description: String,
    pub call_to_action: String,
    pub visual_direction: Json<VisualDirection>,
    pub marketing_psychology: String,
    pub performance_score: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PosterRow {
    /// The profile the poster was generated from.
    #[must_use]
    pub fn profile(&self) -> BusinessProfile {
        BusinessProfile {
            business_name: self.business_name.clone(),
            industry: self.industry.clone(),
            services: self.services.clone(),
            target_audience: self.target_audience.clone(),
            brand_personality: self.brand_personality.clone(),
            cultural_context: self.cultural_context.clone(),
            language: self.language.clone(),
        }
    }

    /// Rebuild the stored content.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidRecord`] if the stored score is outside `0..=100`.
    pub fn content(&self) -> Result<GeneratedContent, DbError> {
        let performance_score = u8::try_from(self.performance_score)
            .ok()
            .filter(|score| *score <= 100)
            .ok_or_else(|| {
                DbError::InvalidRecord(format!(
                    "poster {} has out-of-range score {}",
                    self.id, self.performance_score
                ))
            })?;

        Ok(GeneratedContent {
            headline: self.headline.clone(),
            subheading: self.subheading.clone(),
            description: self.description.clone(),
            call_to_action: self.call_to_action.clone(),
            visual_direction: self.visual_direction.0.clone(),
            marketing_psychology: self.marketing_psychology.clone(),
            performance_score,
        })
    }
}

fn ensure_complete(content: &GeneratedContent) -> Result<(), DbError> {
    let missing = content.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DbError::InvalidRecord(format!(
            "poster content is missing: {}",
            missing.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Store a generated poster and return its id.
///
/// # Errors
///
/// Returns [`DbError::InvalidRecord`] if the profile or content is
/// incomplete, or [`DbError`] on database query failure.
pub async fn insert_poster(
    pool: &PgPool,
    owner: Uuid,
    profile: &BusinessProfile,
    content: &GeneratedContent,
) -> Result<Uuid, DbError> {
    profile.validate()?;
    ensure_complete(content)?;

    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO posters \
           (id, user_id, business_name, industry, services, target_audience, \
            brand_personality, cultural_context, language, headline, subheading, \
            description, call_to_action, visual_direction, marketing_psychology, \
            performance_score) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
    )
    .bind(id)
    .bind(owner)
    .bind(&profile.business_name)
    .bind(&profile.industry)
    .bind(&profile.services)
    .bind(&profile.target_audience)
    .bind(&profile.brand_personality)
    .bind(&profile.cultural_context)
    .bind(&profile.language)
    .bind(&content.headline)
    .bind(&content.subheading)
    .bind(&content.description)
    .bind(&content.call_to_action)
    .bind(Json(&content.visual_direction))
    .bind(&content.marketing_psychology)
    .bind(i16::from(content.performance_score))
    .execute(pool)
    .await?;

    tracing::debug!(poster_id = %id, user_id = %owner, "poster stored");
    Ok(id)
}

/// Fetch one poster owned by `owner`.
///
/// # Errors
///
/// Returns [`DbError`] on database query failure.
pub async fn get_poster(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<Option<PosterRow>, DbError> {
    Ok(sqlx::query_as::<_, PosterRow>(
        "SELECT id, user_id, business_name, industry, services, target_audience, \
                brand_personality, cultural_context, language, headline, subheading, \
                description, call_to_action, visual_direction, marketing_psychology, \
                performance_score, created_at, updated_at \
         FROM posters WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await?)
}

/// List an owner's posters, newest first. `limit` is clamped to `1..=100`.
///
/// # Errors
///
/// Returns [`DbError`] on database query failure.
pub async fn list_posters(pool: &PgPool, owner: Uuid, limit: i64) -> Result<Vec<PosterRow>, DbError> {
    Ok(sqlx::query_as::<_, PosterRow>(
        "SELECT id, user_id, business_name, industry, services, target_audience, \
                brand_personality, cultural_context, language, headline, subheading, \
                description, call_to_action, visual_direction, marketing_psychology, \
                performance_score, created_at, updated_at \
         FROM posters WHERE user_id = $1 \
         ORDER BY created_at DESC, id \
         LIMIT $2",
    )
    .bind(owner)
    .bind(limit.clamp(1, MAX_LIST_LIMIT))
    .fetch_all(pool)
    .await?)
}

/// Replace the generated content of an existing poster.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if `owner` has no poster with `id`,
/// [`DbError::InvalidRecord`] for incomplete content, or [`DbError`] on
/// database query failure.
pub async fn update_poster_content(
    pool: &PgPool,
    owner: Uuid,
    id: Uuid,
    content: &GeneratedContent,
) -> Result<(), DbError> {
    ensure_complete(content)?;

    let result = sqlx::query(
        "UPDATE posters SET \
           headline             = $3, \
           subheading           = $4, \
           description          = $5, \
           call_to_action       = $6, \
           visual_direction     = $7, \
           marketing_psychology = $8, \
           performance_score    = $9, \
           updated_at           = NOW() \
         WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(owner)
    .bind(&content.headline)
    .bind(&content.subheading)
    .bind(&content.description)
    .bind(&content.call_to_action)
    .bind(Json(&content.visual_direction))
    .bind(&content.marketing_psychology)
    .bind(i16::from(content.performance_score))
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Delete a poster owned by `owner`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no such poster exists for `owner`, or
/// [`DbError`] on database query failure.
pub async fn delete_poster(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM posters WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
