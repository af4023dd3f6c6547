pub mod defaults;

pub use defaults::{ReplacementValue, TemplateRule, TEMPLATE_RULES};

use crate::models::{RuleSet, SubstitutionRule};
use crate::phone::{bare_digits, normalize_to_e164, Region};
use crate::profile::BusinessProfile;
use tracing::{debug, warn};

/// Turns a business profile into the ordered substitution rules for a tree
#[derive(Debug, Clone)]
pub struct RuleGenerator {
    region: Region,
}

/// Profile values resolved once per generation
struct ResolvedValues<'a> {
    profile: &'a BusinessProfile,
    email_domain: Option<String>,
    phone: Option<String>,
}

impl RuleGenerator {
    pub fn new(region: Region) -> Self {
        Self { region }
    }

    /// Produce the rule list in template declaration order.
    ///
    /// Rules whose replacement would be empty are left out, so incomplete
    /// profile data never blanks text in the tree.
    pub fn generate(&self, profile: &BusinessProfile) -> RuleSet {
        let phone = match normalize_to_e164(&profile.owner_phone, self.region) {
            Ok(phone) => Some(phone),
            Err(e) => {
                warn!("Owner phone '{}' not usable ({}); phone rules omitted", profile.owner_phone, e);
                None
            }
        };

        let values = ResolvedValues {
            profile,
            email_domain: profile.email_domain(),
            phone,
        };

        let mut rule_set = RuleSet::new();
        for template in TEMPLATE_RULES {
            let Some(replacement) = values.resolve(template.value) else {
                debug!(rule = template.name, "Dropping rule without a profile value");
                continue;
            };

            let rule = SubstitutionRule::new(template.name, template.value.category(), template.pattern, replacement);
            match rule.validate() {
                Ok(()) => rule_set = rule_set.add_rule(rule),
                Err(e) => debug!(rule = template.name, "Dropping rule: {}", e),
            }
        }

        rule_set
    }
}

impl Default for RuleGenerator {
    fn default() -> Self {
        Self::new(Region::default())
    }
}

impl ResolvedValues<'_> {
    fn resolve(&self, value: ReplacementValue) -> Option<String> {
        let name = self.profile.business_name.trim();
        match value {
            ReplacementValue::BusinessName => Some(name.to_string()),
            ReplacementValue::BusinessNameUpper => Some(name.to_uppercase()),
            ReplacementValue::BusinessNameLower => Some(name.to_lowercase()),
            ReplacementValue::Email { local_part } => {
                self.email_domain.as_ref().map(|domain| format!("{}@{}", local_part, domain))
            }
            ReplacementValue::Phone => self.phone.clone(),
            ReplacementValue::AddressHe => Some(self.profile.address_he().to_string()),
            ReplacementValue::AddressEn => Some(self.profile.address_en().to_string()),
            ReplacementValue::BundleId => Some(self.profile.bundle_id.trim().to_string()),
            ReplacementValue::Scheme => self
                .profile
                .bundle_slug()
                .map(|slug| format!(r#""scheme": "{}""#, slug)),
            ReplacementValue::DeepLinkPhone => self
                .phone
                .as_deref()
                .map(|phone| format!("https://wa.me/{}", bare_digits(phone))),
        }
    }
}

/// Generate rules for `profile` using the default phone region
pub fn generate_rules(profile: &BusinessProfile) -> RuleSet {
    RuleGenerator::default().generate(profile)
}
