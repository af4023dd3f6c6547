//! Values baked into the stock template, and the replacement each one takes.
//!
//! The table order is the application order. Brand rules run before the
//! email, identifier and scheme rules and may therefore consume text those
//! later rules would otherwise have matched.

use crate::models::RuleCategory;

/// Profile-derived value a template rule is replaced with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementValue {
    BusinessName,
    BusinessNameUpper,
    BusinessNameLower,
    Email { local_part: &'static str },
    Phone,
    AddressHe,
    AddressEn,
    BundleId,
    Scheme,
    DeepLinkPhone,
}

impl ReplacementValue {
    pub fn category(&self) -> RuleCategory {
        match self {
            ReplacementValue::BusinessName
            | ReplacementValue::BusinessNameUpper
            | ReplacementValue::BusinessNameLower => RuleCategory::Brand,
            ReplacementValue::Email { .. } => RuleCategory::Email,
            ReplacementValue::Phone => RuleCategory::Phone,
            ReplacementValue::AddressHe | ReplacementValue::AddressEn => RuleCategory::Address,
            ReplacementValue::BundleId | ReplacementValue::Scheme => RuleCategory::Identifier,
            ReplacementValue::DeepLinkPhone => RuleCategory::DeepLink,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateRule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub value: ReplacementValue,
}

const fn rule(name: &'static str, pattern: &'static str, value: ReplacementValue) -> TemplateRule {
    TemplateRule { name, pattern, value }
}

pub const TEMPLATE_RULES: &[TemplateRule] = &[
    // Brand names
    rule("brand_latin", r"\bBarbersbar\b", ReplacementValue::BusinessName),
    rule("brand_hebrew", r"\bברבר בר\b", ReplacementValue::BusinessName),
    rule("brand_generic", r"\bBarber Shop\b", ReplacementValue::BusinessName),
    rule("brand_generic_upper", r"\bBARBER SHOP\b", ReplacementValue::BusinessNameUpper),
    rule("brand_generic_lower", r"\bbarber shop\b", ReplacementValue::BusinessNameLower),
    // Contact emails
    rule("email_info_com", r"\binfo@barbersbar\.com?\b", ReplacementValue::Email { local_part: "info" }),
    rule("email_info_il", r"\binfo@barbersbar\.co\.il\b", ReplacementValue::Email { local_part: "info" }),
    rule("email_support_com", r"\bsupport@barbersbar\.com?\b", ReplacementValue::Email { local_part: "support" }),
    rule("email_support_il", r"\bsupport@barbersbar\.co\.il\b", ReplacementValue::Email { local_part: "support" }),
    // Phone numbers in every separator style
    rule("phone_054_intl", r"\+972[-\s]?54[-\s]?835[-\s]?3232", ReplacementValue::Phone),
    rule("phone_052_intl", r"\+972[-\s]?52[-\s]?398[-\s]?5505", ReplacementValue::Phone),
    rule("phone_054_local", r"054[-\s]?835[-\s]?3232", ReplacementValue::Phone),
    rule("phone_052_local", r"052[-\s]?398[-\s]?5505", ReplacementValue::Phone),
    // Addresses; anything after the street number up to a quote or newline is part of the match
    rule("address_he_street", r#"רפיח ים \d+[^"'\n]*"#, ReplacementValue::AddressHe),
    rule("address_he_neighborhood", r"נתיבות נווה שרון \d+", ReplacementValue::AddressHe),
    rule("address_en_street", r"Netivot rafiah yam \d+", ReplacementValue::AddressEn),
    rule("address_en_upper", r#"HAGEFEN \d+, NETIVOT[^"'\n]*"#, ReplacementValue::AddressEn),
    // Identifiers
    rule("bundle_id", r"com\.barbersbar\.app", ReplacementValue::BundleId),
    rule("app_scheme", r#""scheme":\s*"barbersbar""#, ReplacementValue::Scheme),
    // WhatsApp deep links carry bare digits
    rule("whatsapp_054", r"https://wa\.me/972548353232", ReplacementValue::DeepLinkPhone),
    rule("whatsapp_052", r"https://wa\.me/972523985505", ReplacementValue::DeepLinkPhone),
];
