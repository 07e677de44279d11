//! Invoice command handlers for the CLI.

use std::path::{Path, PathBuf};

use adcraft_core::InvoiceDraft;
use adcraft_generator::generate_payment_note;
use clap::Subcommand;
use uuid::Uuid;

use crate::context::AppContext;
use crate::generate::user_facing;
use crate::posters::truncate;

/// Sub-commands available under `invoice`.
#[derive(Debug, Subcommand)]
pub enum InvoiceCommands {
    /// Store an invoice from a YAML or JSON draft
    Create {
        /// Path to the invoice draft
        #[arg(long)]
        file: PathBuf,
        #[arg(long, env = "ADCRAFT_OWNER_ID")]
        owner: Uuid,
        /// Ask the LLM for a short payment note
        #[arg(long)]
        ai_note: bool,
    },
    /// Replace the parties, items and notes of a stored invoice
    Update {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, env = "ADCRAFT_OWNER_ID")]
        owner: Uuid,
        #[arg(long)]
        ai_note: bool,
        id: Uuid,
    },
    /// List stored invoices, newest first
    List {
        #[arg(long, env = "ADCRAFT_OWNER_ID")]
        owner: Uuid,
        #[arg(long, default_value = "20")]
        limit: i64,
    },
    /// Print one stored invoice as JSON
    Show {
        #[arg(long, env = "ADCRAFT_OWNER_ID")]
        owner: Uuid,
        id: Uuid,
    },
    /// Delete a stored invoice
    Delete {
        #[arg(long, env = "ADCRAFT_OWNER_ID")]
        owner: Uuid,
        id: Uuid,
    },
}

pub(crate) async fn run_invoice(ctx: &AppContext, command: InvoiceCommands) -> anyhow::Result<()> {
    match command {
        InvoiceCommands::Create {
            file,
            owner,
            ai_note,
        } => {
            let (draft, note) = load_draft(ctx, &file, ai_note).await?;
            let id = adcraft_db::insert_invoice(ctx.pool().await?, owner, &draft, note.as_deref()).await?;
            println!("created invoice {id} (total R{:.2})", draft.total()?);
            Ok(())
        }
        InvoiceCommands::Update {
            file,
            owner,
            ai_note,
            id,
        } => {
            let (draft, note) = load_draft(ctx, &file, ai_note).await?;
            adcraft_db::update_invoice(ctx.pool().await?, owner, id, &draft, note.as_deref()).await?;
            println!("updated invoice {id} (total R{:.2})", draft.total()?);
            Ok(())
        }
        InvoiceCommands::List { owner, limit } => run_invoice_list(ctx, owner, limit).await,
        InvoiceCommands::Show { owner, id } => {
            let invoice = adcraft_db::get_invoice(ctx.pool().await?, owner, id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("invoice {id} not found"))?;
            let output = serde_json::json!({
                "id": invoice.id,
                "invoice_number": invoice.invoice_number,
                "invoice": invoice.draft(),
                "payment_note": invoice.payment_note,
                "total": invoice.total,
                "created_at": invoice.created_at,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        InvoiceCommands::Delete { owner, id } => {
            adcraft_db::delete_invoice(ctx.pool().await?, owner, id).await?;
            println!("deleted invoice {id}");
            Ok(())
        }
    }
}

/// Load and validate a draft, optionally asking the gateway for a payment note.
///
/// A failed note request fails the command; no placeholder note is stored.
async fn load_draft(
    ctx: &AppContext,
    path: &Path,
    ai_note: bool,
) -> anyhow::Result<(InvoiceDraft, Option<String>)> {
    let draft = adcraft_core::load_invoice_draft(path)?;
    draft.validate()?;

    let note = if ai_note {
        let gateway = ctx.generation_gateway().map_err(user_facing)?;
        let note = generate_payment_note(gateway, &draft)
            .await
            .map_err(user_facing)?;
        tracing::info!(chars = note.chars().count(), "payment note generated");
        Some(note)
    } else {
        None
    };

    Ok((draft, note))
}

async fn run_invoice_list(ctx: &AppContext, owner: Uuid, limit: i64) -> anyhow::Result<()> {
    let invoices = adcraft_db::list_invoices(ctx.pool().await?, owner, limit).await?;
    if invoices.is_empty() {
        println!("no invoices stored");
        return Ok(());
    }

    println!("{:<36}  {:<18}  {:<24}  {:>12}", "ID", "NUMBER", "CLIENT", "TOTAL");
    for invoice in &invoices {
        println!(
            "{:<36}  {:<18}  {:<24}  {:>12}",
            invoice.id,
            invoice.invoice_number,
            truncate(&invoice.client_info.0.name, 24),
            format!("R{:.2}", invoice.total)
        );
    }
    Ok(())
}
