pub mod config;
pub mod discovery;
pub mod error;
pub mod legacy;
pub mod manifest;
pub mod models;
pub mod phone;
pub mod profile;
pub mod rewrite;
pub mod rules;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::RebrandConfig;
pub use discovery::FileEnumerator;
pub use error::{PhoneError, RebrandError, Result};
pub use legacy::{LegacyScanner, RequiredFile, LEGACY_DETECTORS};
pub use manifest::{update_manifests, ManifestReport, ManifestStatus};
pub use models::{
    CheckReport, CompiledRule, DetectorFindings, FileChange, FileCheck, FileError, FilePreview, FileStatus,
    LegacyFinding, ReplacementResult, RuleCategory, RuleSet, SubstitutionRule,
};
pub use phone::{normalize_to_e164, Region};
pub use profile::{load_profile, BusinessProfile};
pub use rewrite::{apply_rules, PreviewLimits, RewriteEngine};
pub use rules::{generate_rules, RuleGenerator};

use std::path::Path;

/// Generate rules from `profile` and rewrite the tree under `root`
pub fn rewrite_project(root: &Path, profile: &BusinessProfile, config: &RebrandConfig, preview: bool) -> Result<ReplacementResult> {
    let rule_set = RuleGenerator::new(config.phone.region).generate(profile);
    RewriteEngine::new(&rule_set, config.scan.enumerator())?
        .with_preview_limits(config.preview.limits())
        .rewrite_tree(root, preview)
}

/// Scan the tree under `root` for template defaults and missing required files
pub fn check_project(root: &Path, config: &RebrandConfig) -> Result<CheckReport> {
    LegacyScanner::new(config.scan.enumerator())?
        .with_required_files(config.check.required_files.clone())
        .check(root)
}
