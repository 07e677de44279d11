//! Rendering business profiles and invoices into model prompts.
//!
//! All functions here are pure: the same input always yields the same prompt.

use adcraft_core::{BusinessProfile, InvoiceDraft};
use rust_decimal::Decimal;

/// Keys the poster prompt requires in the model's JSON answer.
pub const POSTER_REQUIRED_KEYS: [&str; 6] = [
    "headline",
    "subheading",
    "description",
    "call_to_action",
    "visual_direction",
    "marketing_psychology",
];

/// Keys required inside `visual_direction`.
pub const VISUAL_DIRECTION_KEYS: [&str; 6] = [
    "primary_colors",
    "secondary_colors",
    "typography",
    "mood",
    "cultural_elements",
    "layout_style",
];

const POSTER_SCHEMA: &str = r##"{
  "headline": "At most 4 words that stop a scrolling customer",
  "subheading": "Benefit-led tagline, fewer than 8 words",
  "description": "At most 2 sentences and 25 words: emotion, action, community benefit",
  "call_to_action": "Urgent action phrase, fewer than 4 words",
  "visual_direction": {
    "primary_colors": ["#hex1", "#hex2", "#hex3"],
    "secondary_colors": ["#hex1", "#hex2"],
    "typography": "Font pairing and hierarchy",
    "mood": "Visual atmosphere",
    "cultural_elements": "Specific local design elements and patterns",
    "layout_style": "Composition approach for the target audience"
  },
  "marketing_psychology": "Why this converts customers here: trust, community, value"
}"##;

/// Copywriting guidance for a normalised industry tag.
#[must_use]
pub fn industry_guidance(tag: &str) -> &'static str {
    match tag {
        "food" => "Focus on taste, freshness and family gatherings. Use warm colours with appetite appeal.",
        "retail" => "Emphasise value, quality and customer satisfaction. Highlight deals and community trust.",
        "services" => "Build credibility, show expertise and demonstrate results. Focus on solving problems.",
        "tech" => "Convey innovation, efficiency and forward thinking while staying accessible.",
        "beauty" => "Celebrate confidence, self-expression and diverse local beauty.",
        "education" => "Speak to growth, opportunity and community development. Inspire and motivate.",
        "healthcare" => "Lead with trust, care and wellness. Professional yet approachable.",
        "construction" => "Stress reliability, strength and craftsmanship, quality and durability.",
        _ => "Focus on quality, value and community benefit. Build trust and show expertise.",
    }
}

/// Audience guidance for a normalised cultural-context tag.
#[must_use]
pub fn cultural_guidance(tag: &str) -> &'static str {
    match tag {
        "urban" => "Fast-paced, modern, tech-savvy audience. Emphasise convenience and efficiency.",
        "rural" => "Community-focused audience with traditional values where word of mouth matters. Build personal connection.",
        "township" => "Entrepreneurial, resilient audience that supports its own. Keep the tone authentic and relatable.",
        "suburban" => "Family-oriented, quality-conscious, aspirational audience. Balance modern and traditional values.",
        "mixed" => "Diverse audience. Use inclusive messaging: universal values with local flavour.",
        _ => "Use inclusive messaging that resonates across different community contexts.",
    }
}

/// Render the poster-content prompt for a profile.
///
/// Every profile value is embedded verbatim, followed by the exact JSON
/// schema and the list of required keys.
#[must_use]
pub fn build_poster_prompt(profile: &BusinessProfile) -> String {
    format!(
        "You are a senior brand strategist and copywriter who has run campaigns for \
         small businesses across Africa, from township spaza shops to city start-ups.\n\
         \n\
         Write marketing poster content for {name}, serving {audience}.\n\
         \n\
         Business details:\n\
         - Business name: {name}\n\
         - Industry: {industry}\n\
         - Services: {services}\n\
         - Target audience: {audience}\n\
         - Brand personality: {personality}\n\
         - Cultural context: {context}\n\
         - Language: {language}\n\
         \n\
         Industry guidance: {industry_hint}\n\
         Audience guidance: {context_hint}\n\
         \n\
         Write all copy in {language}. Respect community and interconnectedness, local \
         purchasing power and mobile-first customers.\n\
         \n\
         Return ONLY a JSON object with exactly this structure:\n\
         {schema}\n\
         \n\
         Required top-level keys: {keys}.\n\
         Required visual_direction keys: {vd_keys}.\n\
         Formatting rules: headline at most 4 words; subheading fewer than 8 words; \
         description at most 2 sentences and 25 words; call_to_action fewer than 4 words; \
         primary_colors is an array of exactly 3 hex colour strings; secondary_colors is an \
         array of exactly 2 hex colour strings. Do not add any text outside the JSON object.",
        name = profile.business_name,
        audience = profile.target_audience,
        industry = profile.industry,
        services = profile.services,
        personality = profile.brand_personality,
        context = profile.cultural_context,
        language = profile.language,
        industry_hint = industry_guidance(&profile.industry_tag()),
        context_hint = cultural_guidance(&profile.cultural_tag()),
        schema = POSTER_SCHEMA,
        keys = POSTER_REQUIRED_KEYS.join(", "),
        vd_keys = VISUAL_DIRECTION_KEYS.join(", "),
    )
}

/// Render the prompt for an invoice payment note.
#[must_use]
pub fn build_payment_note_prompt(draft: &InvoiceDraft, total: Decimal) -> String {
    format!(
        "You are a professional business communication expert.\n\
         \n\
         Write a payment note for an invoice with these details:\n\
         - Business: {business}\n\
         - Client: {client}\n\
         - Total amount due: R{total:.2}\n\
         \n\
         The note must be 2-3 friendly but professional sentences that thank the client, \
         mention the amount due, state that payment is due within 30 days, and keep a \
         positive business relationship.\n\
         \n\
         Return ONLY a JSON object with this structure:\n\
         {{\"paymentNote\": \"The payment note\"}}",
        business = draft.business.name,
        client = draft.client.name,
    )
}

/// A prompt together with the profile it was rendered from.
///
/// Built per generation call and never stored.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub profile: BusinessProfile,
    pub prompt: String,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(profile: BusinessProfile) -> Self {
        let prompt = build_poster_prompt(&profile);
        Self { profile, prompt }
    }
}
