//! Stored-poster command handlers for the CLI.

use adcraft_db::PosterEventKind;
use clap::Subcommand;
use uuid::Uuid;

use crate::context::AppContext;
use crate::generate::generate;

/// Sub-commands available under `posters`.
#[derive(Debug, Subcommand)]
pub enum PostersCommands {
    /// List stored posters, newest first
    List {
        #[arg(long, env = "ADCRAFT_OWNER_ID")]
        owner: Uuid,
        /// Maximum number of posters to show
        #[arg(long, default_value = "20")]
        limit: i64,
    },
    /// Print one poster's content and its recorded events
    Show {
        #[arg(long, env = "ADCRAFT_OWNER_ID")]
        owner: Uuid,
        id: Uuid,
    },
    /// Generate fresh content for a stored poster's profile
    Regenerate {
        #[arg(long, env = "ADCRAFT_OWNER_ID")]
        owner: Uuid,
        id: Uuid,
    },
    /// Delete a stored poster
    Delete {
        #[arg(long, env = "ADCRAFT_OWNER_ID")]
        owner: Uuid,
        id: Uuid,
    },
}

pub(crate) async fn run_posters(ctx: &AppContext, command: PostersCommands) -> anyhow::Result<()> {
    match command {
        PostersCommands::List { owner, limit } => run_posters_list(ctx, owner, limit).await,
        PostersCommands::Show { owner, id } => run_posters_show(ctx, owner, id).await,
        PostersCommands::Regenerate { owner, id } => run_posters_regenerate(ctx, owner, id).await,
        PostersCommands::Delete { owner, id } => {
            adcraft_db::delete_poster(ctx.pool().await?, owner, id).await?;
            println!("deleted poster {id}");
            Ok(())
        }
    }
}

async fn run_posters_list(ctx: &AppContext, owner: Uuid, limit: i64) -> anyhow::Result<()> {
    let posters = adcraft_db::list_posters(ctx.pool().await?, owner, limit).await?;
    if posters.is_empty() {
        println!("no posters stored");
        return Ok(());
    }

    println!("{:<36}  {:<24}  {:>5}  {}", "ID", "BUSINESS", "SCORE", "HEADLINE");
    for poster in &posters {
        println!(
            "{:<36}  {:<24}  {:>5}  {}",
            poster.id,
            truncate(&poster.business_name, 24),
            poster.performance_score,
            poster.headline
        );
    }
    Ok(())
}

async fn run_posters_show(ctx: &AppContext, owner: Uuid, id: Uuid) -> anyhow::Result<()> {
    let pool = ctx.pool().await?;
    let poster = adcraft_db::get_poster(pool, owner, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("poster {id} not found"))?;
    let events = adcraft_db::list_poster_events(pool, owner, id).await?;

    let output = serde_json::json!({
        "id": poster.id,
        "profile": poster.profile(),
        "content": poster.content()?,
        "created_at": poster.created_at,
        "events": events
            .iter()
            .map(|e| serde_json::json!({ "type": e.event_type, "at": e.created_at }))
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    adcraft_db::record_poster_event_best_effort(
        pool,
        owner,
        Some(id),
        PosterEventKind::Viewed,
        &serde_json::json!({}),
    )
    .await;
    Ok(())
}

async fn run_posters_regenerate(ctx: &AppContext, owner: Uuid, id: Uuid) -> anyhow::Result<()> {
    let pool = ctx.pool().await?;
    let poster = adcraft_db::get_poster(pool, owner, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("poster {id} not found"))?;

    let content = generate(ctx, &poster.profile()).await?;
    adcraft_db::update_poster_content(pool, owner, id, &content).await?;
    adcraft_db::record_poster_event_best_effort(
        pool,
        owner,
        Some(id),
        PosterEventKind::Regenerated,
        &serde_json::json!({ "previous_score": poster.performance_score, "score": content.performance_score }),
    )
    .await;

    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}

/// Shorten `s` to at most `max` characters for table output.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}
