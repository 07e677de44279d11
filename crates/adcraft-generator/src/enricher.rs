//! Deterministic, rule-based enrichment of model output.
//!
//! Nothing here calls a model: palettes and cultural fragments come from
//! static tables, and the performance score is a fixed additive rubric.

use adcraft_core::{BusinessProfile, GeneratedContent, VisualDirection};
use serde::Deserialize;

use crate::error::GenerationError;

/// Fixed three-colour palettes keyed by industry tag.
pub(crate) const INDUSTRY_PALETTES: &[(&str, [&str; 3])] = &[
    ("food", ["#FF6B35", "#F29E4C", "#EFEA5A"]),
    ("retail", ["#16537e", "#f39c12", "#e74c3c"]),
    ("tech", ["#3498db", "#9b59b6", "#1abc9c"]),
    ("beauty", ["#e91e63", "#ff9800", "#673ab7"]),
    ("healthcare", ["#2196f3", "#4caf50", "#00bcd4"]),
    ("education", ["#ff5722", "#607d8b", "#795548"]),
];

/// Text appended to `cultural_elements`, keyed by cultural-context tag.
pub(crate) const CULTURAL_FRAGMENTS: &[(&str, &str)] = &[
    (
        "township",
        "Bold street art influences, vibrant community colors",
    ),
    ("rural", "Traditional patterns, earth tones, nature elements"),
];

const HEADLINE_MAX_CHARS: usize = 20;
const SCORE_CAP: u8 = 100;

/// The model's answer to the poster prompt, before enrichment.
///
/// Every key is required; a missing key fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentDraft {
    pub headline: String,
    pub subheading: String,
    pub description: String,
    pub call_to_action: String,
    pub visual_direction: VisualDirection,
    pub marketing_psychology: String,
}

/// Palette for a normalised industry tag (see
/// [`BusinessProfile::industry_tag`]), if the industry has one.
#[must_use]
pub fn industry_palette(tag: &str) -> Option<[&'static str; 3]> {
    INDUSTRY_PALETTES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, palette)| *palette)
}

/// Fragment appended to `cultural_elements` for a normalised context tag,
/// if any.
#[must_use]
pub fn cultural_fragment(tag: &str) -> Option<&'static str> {
    CULTURAL_FRAGMENTS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, fragment)| *fragment)
}

/// Heuristic quality score in `0..=100`.
///
/// | check                                         | points |
/// |-----------------------------------------------|--------|
/// | headline is at most 20 characters             | 25     |
/// | call to action contains `now`                 | 20     |
/// | cultural elements is non-empty                | 25     |
/// | marketing psychology contains `community`     | 15     |
/// | at least 3 primary colours                    | 15     |
///
/// Token checks are case-sensitive. The result is a pure function of the
/// content and ignores the existing `performance_score`.
#[must_use]
pub fn performance_score(content: &GeneratedContent) -> u8 {
    let vd = &content.visual_direction;
    let mut score: u8 = 0;

    if !content.headline.is_empty() && content.headline.chars().count() <= HEADLINE_MAX_CHARS {
        score += 25;
    }
    if content.call_to_action.contains("now") {
        score += 20;
    }
    if !vd.cultural_elements.is_empty() {
        score += 25;
    }
    if content.marketing_psychology.contains("community") {
        score += 15;
    }
    if vd.primary_colors.len() >= 3 {
        score += 15;
    }

    score.min(SCORE_CAP)
}

/// Layer palette, cultural fragment and score onto a model draft.
///
/// # Errors
///
/// Returns [`GenerationError::MalformedContent`] if any field is still blank
/// after enrichment. Partial content is never returned.
pub fn enrich(
    draft: ContentDraft,
    profile: &BusinessProfile,
) -> Result<GeneratedContent, GenerationError> {
    let mut visual_direction = draft.visual_direction;

    if let Some(palette) = industry_palette(&profile.industry_tag()) {
        visual_direction.primary_colors = palette.iter().map(|c| (*c).to_owned()).collect();
    }

    if let Some(fragment) = cultural_fragment(&profile.cultural_tag()) {
        append_fragment(&mut visual_direction.cultural_elements, fragment);
    }

    let mut content = GeneratedContent {
        headline: draft.headline,
        subheading: draft.subheading,
        description: draft.description,
        call_to_action: draft.call_to_action,
        visual_direction,
        marketing_psychology: draft.marketing_psychology,
        performance_score: 0,
    };

    let missing = content.missing_fields();
    if !missing.is_empty() {
        return Err(GenerationError::malformed(format!(
            "generated content is missing: {}",
            missing.join(", ")
        )));
    }

    content.performance_score = performance_score(&content);
    Ok(content)
}

fn append_fragment(target: &mut String, fragment: &str) {
    let trimmed_len = target.trim_end().len();
    target.truncate(trimmed_len);
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(fragment);
}
