use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What kind of template value a substitution rule targets
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Brand,
    Email,
    Phone,
    Address,
    Identifier,
    DeepLink,
}

/// A single pattern -> replacement pair.
///
/// Patterns are matched case-insensitively in multi-line mode against the
/// whole file. Replacements are inserted literally (`$` is not expanded).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubstitutionRule {
    pub name: String,
    pub category: RuleCategory,
    pub pattern: String,
    pub replacement: String,
}

/// Ordered list of substitution rules.
///
/// Order is significant: every rule sees the content produced by the rules
/// before it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    pub rules: Vec<SubstitutionRule>,
}

/// A rule with its pattern compiled once for reuse across files
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: SubstitutionRule,
    pub regex: Regex,
}

/// Replacement count for one changed file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileChange {
    pub path: PathBuf,
    pub replacements: usize,
}

/// Unified diff of one changed file, produced in preview mode
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FilePreview {
    pub path: PathBuf,
    pub diff: String,
}

/// A file that could not be read or written and was skipped
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileError {
    pub path: PathBuf,
    pub message: String,
}

/// Aggregate outcome of a whole-tree rewrite
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReplacementResult {
    pub preview: bool,
    pub files_scanned: usize,
    pub files_touched: usize,
    pub total_replacements: usize,
    pub changes: Vec<FileChange>,
    pub previews: Vec<FilePreview>,
    pub errors: Vec<FileError>,
}

/// One occurrence of a template default left in the tree
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LegacyFinding {
    pub detector: String,
    pub file_path: PathBuf,
    pub line_number: usize,
    pub line_content: String,
}

/// All findings of a single detector, in enumeration order
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetectorFindings {
    pub detector: String,
    pub description: String,
    pub findings: Vec<LegacyFinding>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Exists,
    Missing,
}

/// Presence of one required output file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileCheck {
    pub path: PathBuf,
    pub description: String,
    pub status: FileStatus,
}

/// Combined result of the legacy content scan and the structural check
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    pub files_checked: usize,
    pub findings: Vec<DetectorFindings>,
    pub file_status: Vec<FileCheck>,
    pub errors: Vec<FileError>,
}

impl SubstitutionRule {
    pub fn new(name: impl Into<String>, category: RuleCategory, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.pattern.trim().is_empty() {
            return Err(crate::RebrandError::Validation(format!("Rule '{}' has an empty pattern", self.name)));
        }
        if self.replacement.is_empty() {
            return Err(crate::RebrandError::Validation(format!("Rule '{}' has an empty replacement", self.name)));
        }
        Ok(())
    }

    pub fn compile(&self) -> crate::Result<CompiledRule> {
        let regex = RegexBuilder::new(&self.pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()?;
        Ok(CompiledRule {
            rule: self.clone(),
            regex,
        })
    }
}

impl RuleSet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(mut self, rule: SubstitutionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubstitutionRule> {
        self.rules.iter()
    }

    pub fn count_by_category(&self, category: RuleCategory) -> usize {
        self.rules.iter().filter(|r| r.category == category).count()
    }

    /// Compile every rule, keeping declaration order
    pub fn compile(&self) -> crate::Result<Vec<CompiledRule>> {
        self.rules.iter().map(SubstitutionRule::compile).collect()
    }
}

impl ReplacementResult {
    pub fn new(preview: bool) -> Self {
        Self {
            preview,
            ..Self::default()
        }
    }

    pub fn record_change(&mut self, path: PathBuf, replacements: usize) {
        self.files_touched += 1;
        self.total_replacements += replacements;
        self.changes.push(FileChange { path, replacements });
    }

    pub fn record_error(&mut self, path: PathBuf, message: String) {
        self.errors.push(FileError { path, message });
    }

    /// Changed files in enumeration order
    pub fn files_with_changes(&self) -> Vec<&Path> {
        self.changes.iter().map(|c| c.path.as_path()).collect()
    }
}

impl CheckReport {
    pub fn total_findings(&self) -> usize {
        self.findings.iter().map(|d| d.findings.len()).sum()
    }

    pub fn findings_for(&self, detector: &str) -> &[LegacyFinding] {
        self.findings
            .iter()
            .find(|d| d.detector == detector)
            .map(|d| d.findings.as_slice())
            .unwrap_or(&[])
    }

    pub fn missing_files(&self) -> Vec<&FileCheck> {
        self.file_status
            .iter()
            .filter(|f| f.status == FileStatus::Missing)
            .collect()
    }

    /// True when no template defaults remain and every required file exists
    pub fn passed(&self) -> bool {
        self.total_findings() == 0 && self.missing_files().is_empty()
    }
}
