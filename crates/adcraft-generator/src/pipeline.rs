//! End-to-end generation: profile in, enriched content out.

use adcraft_core::{BusinessProfile, GeneratedContent, InvoiceDraft};
use serde::Deserialize;

use crate::enricher::{enrich, ContentDraft};
use crate::error::GenerationError;
use crate::gateway::GenerationGateway;
use crate::prompt::{build_payment_note_prompt, GenerationRequest};

#[derive(Debug, Deserialize)]
struct PaymentNote {
    #[serde(rename = "paymentNote")]
    payment_note: String,
}

/// Generate enriched poster content for a business profile.
///
/// 1. Validate the profile.
/// 2. Render the prompt.
/// 3. Call the provider once and parse its JSON answer.
/// 4. Apply palette, cultural fragments and the performance score.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidInput`] for an incomplete profile, or
/// whatever the gateway or enricher reports. No fallback content is produced.
pub async fn generate_poster_content(
    gateway: &GenerationGateway,
    profile: &BusinessProfile,
) -> Result<GeneratedContent, GenerationError> {
    profile
        .validate()
        .map_err(|e| GenerationError::InvalidInput(e.to_string()))?;

    let request = GenerationRequest::new(profile.clone());
    tracing::info!(
        business = %request.profile.business_name,
        provider = gateway.provider_name(),
        "generating poster content"
    );

    let result = gateway
        .complete_json::<ContentDraft>(&request.prompt)
        .await
        .and_then(|draft| enrich(draft, &request.profile));

    match &result {
        Ok(content) => tracing::info!(
            business = %request.profile.business_name,
            provider = gateway.provider_name(),
            score = content.performance_score,
            "poster content generated"
        ),
        Err(e) => tracing::error!(
            business = %request.profile.business_name,
            provider = gateway.provider_name(),
            error = %e,
            "poster content generation failed"
        ),
    }

    result
}

/// Generate a short payment note for an invoice.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidInput`] for an invalid draft,
/// [`GenerationError::MalformedContent`] if the note comes back blank, or
/// whatever the gateway reports.
pub async fn generate_payment_note(
    gateway: &GenerationGateway,
    draft: &InvoiceDraft,
) -> Result<String, GenerationError> {
    let total = draft
        .validate()
        .and_then(|()| draft.total())
        .map_err(|e| GenerationError::InvalidInput(e.to_string()))?;
    let prompt = build_payment_note_prompt(draft, total);
    tracing::info!(
        business = %draft.business.name,
        client = %draft.client.name,
        %total,
        "generating invoice payment note"
    );

    let note: PaymentNote = gateway.complete_json(&prompt).await?;
    let text = note.payment_note.trim();
    if text.is_empty() {
        return Err(GenerationError::MalformedContent {
            reason: "payment note is empty".to_owned(),
        });
    }

    Ok(text.to_owned())
}
