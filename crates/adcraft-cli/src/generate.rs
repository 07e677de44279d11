//! `generate` command: profile file in, poster content JSON out.

use std::path::Path;

use adcraft_core::{BusinessProfile, GeneratedContent};
use adcraft_db::PosterEventKind;
use adcraft_generator::{generate_poster_content, GenerationError};
use uuid::Uuid;

use crate::context::AppContext;

/// Attach the end-user message to a generation failure so it is what the
/// binary prints first.
pub(crate) fn user_facing(err: GenerationError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

/// Exit status for a failed command: `75` (`EX_TEMPFAIL`) when the failure
/// is a generation error worth retrying, `1` otherwise.
pub(crate) fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<GenerationError>() {
        Some(gen_err) if gen_err.is_retryable() => RETRYABLE_EXIT_STATUS,
        _ => 1,
    }
}

const RETRYABLE_EXIT_STATUS: u8 = 75;

/// Generate content for the profile at `profile_path` and print it as JSON.
///
/// With `save`, the poster is stored under `owner` and a `generated` event
/// is recorded. The event is best-effort.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded, generation fails, or
/// `save` is requested without an owner or a database.
pub(crate) async fn run_generate(
    ctx: &AppContext,
    profile_path: &Path,
    owner: Option<Uuid>,
    save: bool,
) -> anyhow::Result<()> {
    let storage = match (save, owner) {
        (false, _) => None,
        (true, None) => anyhow::bail!("--save requires --owner"),
        (true, Some(owner)) => Some((ctx.pool().await?, owner)),
    };

    let profile = adcraft_core::load_profile(profile_path)?;
    let content = generate(ctx, &profile).await?;
    println!("{}", serde_json::to_string_pretty(&content)?);

    if let Some((pool, owner)) = storage {
        let poster_id = adcraft_db::insert_poster(pool, owner, &profile, &content).await?;
        let gateway = ctx.generation_gateway().map_err(user_facing)?;
        let metadata = serde_json::json!({
            "provider": gateway.provider_name(),
            "model": gateway.model(),
            "score": content.performance_score,
        });
        adcraft_db::record_poster_event_best_effort(
            pool,
            owner,
            Some(poster_id),
            PosterEventKind::Generated,
            &metadata,
        )
        .await;
        eprintln!("saved poster {poster_id}");
    }

    Ok(())
}

/// Run the pipeline through the context's gateway.
///
/// # Errors
///
/// Returns the deferred configuration error or any pipeline failure, with
/// the end-user message attached.
pub(crate) async fn generate(
    ctx: &AppContext,
    profile: &BusinessProfile,
) -> anyhow::Result<GeneratedContent> {
    let gateway = ctx.generation_gateway().map_err(user_facing)?;
    generate_poster_content(gateway, profile)
        .await
        .map_err(user_facing)
}
