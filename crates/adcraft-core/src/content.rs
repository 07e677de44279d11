use serde::{Deserialize, Serialize};

/// Colour, type and layout guidance for rendering a poster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualDirection {
    /// Hex colour codes, e.g. `"#FF6B35"`.
    pub primary_colors: Vec<String>,
    pub secondary_colors: Vec<String>,
    pub typography: String,
    pub mood: String,
    pub cultural_elements: String,
    pub layout_style: String,
}

/// Marketing copy for one poster after enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub headline: String,
    pub subheading: String,
    pub description: String,
    pub call_to_action: String,
    pub visual_direction: VisualDirection,
    pub marketing_psychology: String,
    /// Heuristic quality estimate in `0..=100`.
    pub performance_score: u8,
}

impl GeneratedContent {
    /// Names of every field that is blank (or, for colour lists, empty).
    ///
    /// Content with any missing field must not be shown or stored.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let vd = &self.visual_direction;
        let text_fields = [
            ("headline", self.headline.as_str()),
            ("subheading", self.subheading.as_str()),
            ("description", self.description.as_str()),
            ("call_to_action", self.call_to_action.as_str()),
            ("marketing_psychology", self.marketing_psychology.as_str()),
            ("visual_direction.typography", vd.typography.as_str()),
            ("visual_direction.mood", vd.mood.as_str()),
            ("visual_direction.cultural_elements", vd.cultural_elements.as_str()),
            ("visual_direction.layout_style", vd.layout_style.as_str()),
        ];

        let mut missing: Vec<&'static str> = text_fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if vd.primary_colors.iter().all(|c| c.trim().is_empty()) {
            missing.push("visual_direction.primary_colors");
        }
        if vd.secondary_colors.iter().all(|c| c.trim().is_empty()) {
            missing.push("visual_direction.secondary_colors");
        }

        missing
    }
}
