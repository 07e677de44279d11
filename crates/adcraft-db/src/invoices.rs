//! Database operations for the `invoices` table.

use adcraft_core::{InvoiceDraft, InvoiceItem, PartyInfo};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

const MAX_LIST_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `invoices` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvoiceRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub invoice_number: String,
    pub business_info: Json<PartyInfo>,
    pub client_info: Json<PartyInfo>,
    pub items: Json<Vec<InvoiceItem>>,
    pub notes: Option<String>,
    pub payment_note: Option<String>,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InvoiceRow {
    /// The stored invoice as an editable draft.
    #[must_use]
    pub fn draft(&self) -> InvoiceDraft {
        InvoiceDraft {
            business: self.business_info.0.clone(),
            client: self.client_info.0.clone(),
            items: self.items.0.clone(),
            notes: self.notes.clone(),
        }
    }
}

fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Validate and store an invoice, returning its id.
///
/// The total and the invoice number are computed here, never taken from
/// the caller.
///
/// # Errors
///
/// Returns [`DbError::InvalidRecord`] if the draft fails validation, or
/// [`DbError`] on database query failure.
pub async fn insert_invoice(
    pool: &PgPool,
    owner: Uuid,
    draft: &InvoiceDraft,
    payment_note: Option<&str>,
) -> Result<Uuid, DbError> {
    draft.validate()?;

    let id = Uuid::new_v4();
    let total = draft.total()?;
    let invoice_number = InvoiceDraft::invoice_number(Utc::now());

    sqlx::query(
        "INSERT INTO invoices \
           (id, user_id, invoice_number, business_info, client_info, items, notes, \
            payment_note, total) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(id)
    .bind(owner)
    .bind(&invoice_number)
    .bind(Json(&draft.business))
    .bind(Json(&draft.client))
    .bind(Json(&draft.items))
    .bind(blank_to_none(draft.notes.as_deref()))
    .bind(blank_to_none(payment_note))
    .bind(total)
    .execute(pool)
    .await?;

    tracing::debug!(invoice_id = %id, user_id = %owner, %invoice_number, %total, "invoice stored");
    Ok(id)
}

/// Fetch one invoice owned by `owner`.
///
/// # Errors
///
/// Returns [`DbError`] on database query failure.
pub async fn get_invoice(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<Option<InvoiceRow>, DbError> {
    Ok(sqlx::query_as::<_, InvoiceRow>(
        "SELECT id, user_id, invoice_number, business_info, client_info, items, notes, \
                payment_note, total, created_at, updated_at \
         FROM invoices WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await?)
}

/// List an owner's invoices, newest first. `limit` is clamped to `1..=100`.
///
/// # Errors
///
/// Returns [`DbError`] on database query failure.
pub async fn list_invoices(pool: &PgPool, owner: Uuid, limit: i64) -> Result<Vec<InvoiceRow>, DbError> {
    Ok(sqlx::query_as::<_, InvoiceRow>(
        "SELECT id, user_id, invoice_number, business_info, client_info, items, notes, \
                payment_note, total, created_at, updated_at \
         FROM invoices WHERE user_id = $1 \
         ORDER BY created_at DESC, id \
         LIMIT $2",
    )
    .bind(owner)
    .bind(limit.clamp(1, MAX_LIST_LIMIT))
    .fetch_all(pool)
    .await?)
}

/// Replace the parties, items and notes of an invoice and recompute its total.
///
/// The invoice number is kept.
///
/// # Errors
///
/// Returns [`DbError::InvalidRecord`] if the draft fails validation,
/// [`DbError::NotFound`] if `owner` has no invoice with `id`, or [`DbError`]
/// on database query failure.
pub async fn update_invoice(
    pool: &PgPool,
    owner: Uuid,
    id: Uuid,
    draft: &InvoiceDraft,
    payment_note: Option<&str>,
) -> Result<(), DbError> {
    draft.validate()?;
    let total = draft.total()?;

    let result = sqlx::query(
        "UPDATE invoices SET \
           business_info = $3, \
           client_info   = $4, \
           items         = $5, \
           notes         = $6, \
           payment_note  = $7, \
           total         = $8, \
           updated_at    = NOW() \
         WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(owner)
    .bind(Json(&draft.business))
    .bind(Json(&draft.client))
    .bind(Json(&draft.items))
    .bind(blank_to_none(draft.notes.as_deref()))
    .bind(blank_to_none(payment_note))
    .bind(total)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Delete an invoice owned by `owner`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no such invoice exists for `owner`, or
/// [`DbError`] on database query failure.
pub async fn delete_invoice(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM invoices WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn party(name: &str) -> PartyInfo {
        PartyInfo {
            name: name.to_string(),
            contact: String::new(),
            address: String::new(),
        }
    }

    #[test]
    fn row_round_trips_to_draft() {
        let now = Utc::now();
        let items = vec![InvoiceItem {
            description: "Braids".to_string(),
            quantity: 2,
            unit_price: Decimal::from_str("225.00").unwrap(),
        }];
        let row = InvoiceRow {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            invoice_number: "INV-1".to_string(),
            business_info: Json(party("Thandi's Salon")),
            client_info: Json(party("Lerato M.")),
            items: Json(items.clone()),
            notes: Some("Thanks".to_string()),
            payment_note: None,
            total: Decimal::from_str("450.00").unwrap(),
            created_at: now,
            updated_at: now,
        };

        let draft = row.draft();
        assert_eq!(draft.business.name, "Thandi's Salon");
        assert_eq!(draft.items, items);
        assert_eq!(draft.total().unwrap(), row.total);
        assert_eq!(draft.notes.as_deref(), Some("Thanks"));
    }

    #[test]
    fn blank_notes_are_stored_as_null() {
        assert_eq!(blank_to_none(Some("   ")), None);
        assert_eq!(blank_to_none(None), None);
        assert_eq!(blank_to_none(Some(" Pay by EFT ")), Some("Pay by EFT"));
    }
}
