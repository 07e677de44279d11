use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, CoreError};

/// Attributes describing the business a piece of content is generated for.
///
/// Field names accept both the camelCase keys used by form payloads
/// (`businessName`) and snake_case keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    #[serde(alias = "business_name")]
    pub business_name: String,
    pub industry: String,
    pub services: String,
    #[serde(alias = "target_audience")]
    pub target_audience: String,
    #[serde(alias = "brand_personality")]
    pub brand_personality: String,
    #[serde(alias = "cultural_context")]
    pub cultural_context: String,
    pub language: String,
}

impl BusinessProfile {
    /// Check that every field the prompt embeds is populated.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("business_name", &self.business_name),
            ("industry", &self.industry),
            ("services", &self.services),
            ("target_audience", &self.target_audience),
            ("brand_personality", &self.brand_personality),
            ("cultural_context", &self.cultural_context),
            ("language", &self.language),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(CoreError::MissingField(name));
            }
        }
        Ok(())
    }

    /// Lowercased, trimmed industry tag used for table lookups.
    #[must_use]
    pub fn industry_tag(&self) -> String {
        self.industry.trim().to_ascii_lowercase()
    }

    /// Lowercased, trimmed cultural-context tag used for table lookups.
    #[must_use]
    pub fn cultural_tag(&self) -> String {
        self.cultural_context.trim().to_ascii_lowercase()
    }
}

/// Load and validate a business profile from a YAML or JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or a required
/// field is blank.
pub fn load_profile(path: &Path) -> Result<BusinessProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InputFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profile: BusinessProfile = serde_yaml::from_str(&content)?;
    profile
        .validate()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> BusinessProfile {
        BusinessProfile {
            business_name: "Mama's Kitchen".to_string(),
            industry: "food".to_string(),
            services: "Home-cooked meals and catering".to_string(),
            target_audience: "Families in the village".to_string(),
            brand_personality: "warm".to_string(),
            cultural_context: "rural".to_string(),
            language: "english".to_string(),
        }
    }

    #[test]
    fn complete_profile_validates() {
        assert!(profile().validate().is_ok());
    }

    #[test]
    fn blank_business_name_is_rejected() {
        let mut p = profile();
        p.business_name = "   ".to_string();
        assert_eq!(p.validate(), Err(CoreError::MissingField("business_name")));
    }

    #[test]
    fn blank_services_is_rejected() {
        let mut p = profile();
        p.services = String::new();
        assert_eq!(p.validate(), Err(CoreError::MissingField("services")));
    }

    #[test]
    fn tags_are_normalised() {
        let mut p = profile();
        p.industry = " Food ".to_string();
        p.cultural_context = "RURAL".to_string();
        assert_eq!(p.industry_tag(), "food");
        assert_eq!(p.cultural_tag(), "rural");
    }

    #[test]
    fn deserializes_camel_case_form_payload() {
        let json = serde_json::json!({
            "businessName": "Mama's Kitchen",
            "industry": "food",
            "services": "meals",
            "targetAudience": "families",
            "brandPersonality": "warm",
            "culturalContext": "rural",
            "language": "english"
        });
        let p: BusinessProfile = serde_json::from_value(json).unwrap();
        assert_eq!(p.business_name, "Mama's Kitchen");
        assert_eq!(p.cultural_context, "rural");
    }

    #[test]
    fn deserializes_snake_case_yaml() {
        let yaml = "business_name: Kofi Tech\nindustry: tech\nservices: phone repair\n\
                    target_audience: students\nbrand_personality: bold\n\
                    cultural_context: urban\nlanguage: english\n";
        let p: BusinessProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(p.business_name, "Kofi Tech");
        assert_eq!(p.target_audience, "students");
    }

    #[test]
    fn load_profile_reports_missing_file() {
        let err = load_profile(Path::new("/nonexistent/profile.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::InputFileIo { .. }));
    }
}
