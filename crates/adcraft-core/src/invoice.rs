use std::path::Path;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, CoreError};

/// Largest total the `NUMERIC(14, 2)` invoice column can hold.
const MAX_INVOICE_TOTAL: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Name and contact details for either side of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyInfo {
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: u32,
    /// Price per unit, serialized as a decimal string.
    pub unit_price: Decimal,
}

impl InvoiceItem {
    /// `quantity * unit_price`, or `None` if the product overflows.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// An invoice as entered by the user, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub business: PartyInfo,
    pub client: PartyInfo,
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InvoiceDraft {
    /// Check required fields: business name, client name, at least one item,
    /// and a description on every item. Prices may not be negative, and the
    /// total must fit the stored `NUMERIC(14, 2)` column.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.business.name.trim().is_empty() {
            return Err(CoreError::MissingField("business.name"));
        }
        if self.client.name.trim().is_empty() {
            return Err(CoreError::MissingField("client.name"));
        }
        if self.items.is_empty() {
            return Err(CoreError::InvalidRecord(
                "invoice must contain at least one item".to_string(),
            ));
        }
        for (idx, item) in self.items.iter().enumerate() {
            if item.description.trim().is_empty() {
                return Err(CoreError::InvalidRecord(format!(
                    "item {} has no description",
                    idx + 1
                )));
            }
            if item.unit_price.is_sign_negative() {
                return Err(CoreError::InvalidRecord(format!(
                    "item {} has a negative price",
                    idx + 1
                )));
            }
        }

        let total = self.total()?;
        if total > MAX_INVOICE_TOTAL {
            return Err(CoreError::InvalidRecord(format!(
                "invoice total {total} exceeds the maximum of {MAX_INVOICE_TOTAL}"
            )));
        }
        Ok(())
    }

    /// Sum of `quantity * unit_price` over all items.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRecord`] if a line total or the sum overflows.
    pub fn total(&self) -> Result<Decimal, CoreError> {
        self.items
            .iter()
            .enumerate()
            .try_fold(Decimal::ZERO, |acc, (idx, item)| {
                item.line_total()
                    .and_then(|line| acc.checked_add(line))
                    .ok_or_else(|| {
                        CoreError::InvalidRecord(format!(
                            "item {} pushes the invoice total out of range",
                            idx + 1
                        ))
                    })
            })
    }

    /// Human-facing invoice number derived from the creation time.
    #[must_use]
    pub fn invoice_number(now: DateTime<Utc>) -> String {
        format!("INV-{}", now.timestamp_millis())
    }
}

/// Load and validate an invoice draft from a YAML or JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_invoice_draft(path: &Path) -> Result<InvoiceDraft, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InputFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let draft: InvoiceDraft = serde_yaml::from_str(&content)?;
    draft
        .validate()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;

    Ok(draft)
}
