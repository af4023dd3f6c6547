use crate::models::RuleCategory;
use crate::rules::TEMPLATE_RULES;
use crate::{RebrandError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

const FALLBACK_ADDRESS_HE: &str = "כתובת העסק";
const FALLBACK_ADDRESS_EN: &str = "Business Address";

/// Customer-specific values that replace the template defaults.
///
/// Field names follow the upstream profile format (camelCase). Optional
/// fields resolve through the accessor methods, which document the fallback
/// used when a value is absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub business_name: String,
    pub owner_phone: String,
    pub bundle_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_address_he: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_address_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

impl BusinessProfile {
    pub fn new(business_name: impl Into<String>, owner_phone: impl Into<String>, bundle_id: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
            owner_phone: owner_phone.into(),
            bundle_id: bundle_id.into(),
            owner_email: None,
            domain: None,
            business_address: None,
            business_address_he: None,
            business_address_en: None,
            primary_color: None,
            app_name: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_owner_email(mut self, email: impl Into<String>) -> Self {
        self.owner_email = Some(email.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.business_address = Some(address.into());
        self
    }

    pub fn with_localized_addresses(mut self, hebrew: impl Into<String>, english: impl Into<String>) -> Self {
        self.business_address_he = Some(hebrew.into());
        self.business_address_en = Some(english.into());
        self
    }

    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = Some(color.into());
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Last dot-separated segment of the bundle id (`com.acme.salon` -> `salon`)
    pub fn bundle_slug(&self) -> Option<&str> {
        self.bundle_id.rsplit('.').next().filter(|s| !s.is_empty())
    }

    /// `domain` when given, otherwise `<bundle slug>.com`
    pub fn email_domain(&self) -> Option<String> {
        match non_empty(&self.domain) {
            Some(domain) => Some(domain.to_string()),
            None => self.bundle_slug().map(|slug| format!("{}.com", slug)),
        }
    }

    /// `businessAddressHe`, then `businessAddress`, then a placeholder
    pub fn address_he(&self) -> &str {
        non_empty(&self.business_address_he)
            .or_else(|| non_empty(&self.business_address))
            .unwrap_or(FALLBACK_ADDRESS_HE)
    }

    /// `businessAddressEn`, then `businessAddress`, then a placeholder
    pub fn address_en(&self) -> &str {
        non_empty(&self.business_address_en)
            .or_else(|| non_empty(&self.business_address))
            .unwrap_or(FALLBACK_ADDRESS_EN)
    }

    /// `appName` when given, otherwise the business name
    pub fn app_name(&self) -> &str {
        non_empty(&self.app_name).unwrap_or(&self.business_name)
    }

    pub fn primary_color(&self) -> Option<&str> {
        non_empty(&self.primary_color)
    }

    /// Check every field against the formats the profile producer enforces
    pub fn validate(&self) -> Result<()> {
        if self.business_name.trim().is_empty() {
            return Err(RebrandError::Validation("Business name cannot be empty".to_string()));
        }

        // A name the brand rules match would be rewritten again on every run
        for template in TEMPLATE_RULES.iter().filter(|r| r.value.category() == RuleCategory::Brand) {
            let brand = RegexBuilder::new(template.pattern).case_insensitive(true).build()?;
            if brand.is_match(&self.business_name) {
                return Err(RebrandError::Validation(format!(
                    "Business name '{}' contains the template brand",
                    self.business_name
                )));
            }
        }

        let phone_re = Regex::new(r"^\+?1?\d{9,15}$")?;
        let compact_phone: String = self.owner_phone.chars().filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.')).collect();
        if !phone_re.is_match(&compact_phone) {
            return Err(RebrandError::Validation(format!("Invalid owner phone: {}", self.owner_phone)));
        }

        let bundle_re = Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*(\.[a-zA-Z][a-zA-Z0-9]*)+$")?;
        if !bundle_re.is_match(&self.bundle_id) {
            return Err(RebrandError::Validation(format!("Invalid bundle id: {}", self.bundle_id)));
        }

        if let Some(email) = non_empty(&self.owner_email) {
            let email_re = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")?;
            if !email_re.is_match(email) {
                return Err(RebrandError::Validation(format!("Invalid owner email: {}", email)));
            }
        }

        if let Some(color) = self.primary_color() {
            let color_re = Regex::new(r"^#(?:[0-9a-fA-F]{3}){1,2}$")?;
            if !color_re.is_match(color) {
                return Err(RebrandError::Validation(format!("Invalid primary color: {}", color)));
            }
        }

        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Load and validate a profile from a YAML (`.yaml`/`.yml`) or JSON file
pub fn load_profile(path: &Path) -> Result<BusinessProfile> {
    if !path.exists() {
        return Err(RebrandError::NotFound(format!("Profile file {}", path.display())));
    }

    let content = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let profile: BusinessProfile = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    profile.validate()?;
    debug!(business = %profile.business_name, bundle_id = %profile.bundle_id, "Loaded business profile");
    Ok(profile)
}
