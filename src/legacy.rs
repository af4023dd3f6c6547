use crate::discovery::FileEnumerator;
use crate::models::{CheckReport, DetectorFindings, FileCheck, FileError, FileStatus, LegacyFinding};
use crate::rewrite::read_lenient;
use crate::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// A fixed detector for a template default that must not survive generation
#[derive(Debug, Clone, Copy)]
pub struct DetectorSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub pattern: &'static str,
    /// Matches immediately preceded by this text are ignored
    pub not_preceded_by: Option<&'static str>,
}

const fn detector(name: &'static str, description: &'static str, pattern: &'static str) -> DetectorSpec {
    DetectorSpec {
        name,
        description,
        pattern,
        not_preceded_by: None,
    }
}

pub const LEGACY_DETECTORS: &[DetectorSpec] = &[
    detector("barbersbar_brand", "Barbersbar brand", r"\b[Bb]arbersbar\b"),
    detector("barber_shop_generic", "Generic Barber Shop name", r"\bBarber Shop\b"),
    detector("hebrew_brand", "Hebrew brand name", r"ברבר בר"),
    detector("old_emails", "Template email domains", r"barbersbar\.co(?:\.il|m)"),
    detector("israeli_phone_054", "Template phone 054-835-3232", r"054[-\s]?835[-\s]?3232"),
    detector("israeli_phone_052", "Template phone 052-398-5505", r"052[-\s]?398[-\s]?5505"),
    DetectorSpec {
        name: "non_e164_phones",
        description: "Local phone numbers not in E.164",
        pattern: r"\b0[5-9]\d{8}\b",
        not_preceded_by: Some("+972"),
    },
    detector("old_addresses", "Template addresses", r"רפיח ים \d+|נתיבות נווה שרון"),
    detector("old_bundle_id", "Template bundle identifier", r"com\.barbersbar\.app"),
];

/// A file the generated project must contain
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RequiredFile {
    pub path: PathBuf,
    pub description: String,
}

impl RequiredFile {
    pub fn new(path: impl Into<PathBuf>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }
}

pub fn default_required_files() -> Vec<RequiredFile> {
    vec![
        RequiredFile::new("app/utils/links.ts", "Link utilities"),
        RequiredFile::new("assets/REPLACE_DEMO_IMAGES.md", "Image replacement guide"),
        RequiredFile::new(".env.example", "Environment template"),
        RequiredFile::new("app/i18n/locales/he.json", "Hebrew localization"),
        RequiredFile::new("app/i18n/locales/en.json", "English localization"),
    ]
}

#[derive(Debug, Clone)]
enum DetectorMatcher {
    Regex(Regex),
    RegexNotPreceded { regex: Regex, prefix: &'static str },
}

#[derive(Debug, Clone)]
struct CompiledDetector {
    spec: DetectorSpec,
    matcher: DetectorMatcher,
}

impl CompiledDetector {
    /// Number of matches of this detector in a single line
    fn count_matches(&self, line: &str) -> usize {
        match &self.matcher {
            DetectorMatcher::Regex(regex) => regex.find_iter(line).count(),
            DetectorMatcher::RegexNotPreceded { regex, prefix } => regex
                .find_iter(line)
                .filter(|m| !line[..m.start()].ends_with(prefix))
                .count(),
        }
    }
}

/// Scans a generated tree for template defaults and missing required files.
///
/// Never writes to the tree.
#[derive(Debug, Clone)]
pub struct LegacyScanner {
    detectors: Vec<CompiledDetector>,
    enumerator: FileEnumerator,
    required_files: Vec<RequiredFile>,
}

impl LegacyScanner {
    pub fn new(enumerator: FileEnumerator) -> Result<Self> {
        Self::with_detectors(LEGACY_DETECTORS, enumerator)
    }

    pub fn with_detectors(specs: &[DetectorSpec], enumerator: FileEnumerator) -> Result<Self> {
        let detectors = specs
            .iter()
            .map(|spec| {
                let regex = Regex::new(spec.pattern)?;
                let matcher = match spec.not_preceded_by {
                    Some(prefix) => DetectorMatcher::RegexNotPreceded { regex, prefix },
                    None => DetectorMatcher::Regex(regex),
                };
                Ok(CompiledDetector { spec: *spec, matcher })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            detectors,
            enumerator,
            required_files: default_required_files(),
        })
    }

    pub fn with_required_files(mut self, required_files: Vec<RequiredFile>) -> Self {
        self.required_files = required_files;
        self
    }

    /// Findings for one file's content, grouped in detector order
    pub fn scan_content(&self, file_path: &Path, content: &str) -> Vec<LegacyFinding> {
        let mut findings = Vec::new();

        for (index, line) in content.lines().enumerate() {
            for detector in &self.detectors {
                for _ in 0..detector.count_matches(line) {
                    findings.push(LegacyFinding {
                        detector: detector.spec.name.to_string(),
                        file_path: file_path.to_path_buf(),
                        line_number: index + 1,
                        line_content: line.trim().to_string(),
                    });
                }
            }
        }

        findings
    }

    /// Findings for the single file `root/relative`; a read failure is logged
    /// and returned as the file's error
    pub fn scan_file(&self, root: &Path, relative: &Path) -> std::result::Result<Vec<LegacyFinding>, FileError> {
        match read_lenient(&root.join(relative)) {
            Ok(content) => Ok(self.scan_content(relative, &content)),
            Err(e) => {
                warn!("Error checking {}: {}", relative.display(), e);
                Err(FileError {
                    path: relative.to_path_buf(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Run every detector over every enumerated file under `root`
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn scan_tree(&self, root: &Path) -> Result<(usize, Vec<DetectorFindings>, Vec<FileError>)> {
        let files = self.enumerator.find_files(root)?;
        info!("Checking {} files for legacy content", files.len());

        let mut grouped: Vec<DetectorFindings> = self
            .detectors
            .iter()
            .map(|d| DetectorFindings {
                detector: d.spec.name.to_string(),
                description: d.spec.description.to_string(),
                findings: Vec::new(),
            })
            .collect();
        let mut errors = Vec::new();

        for relative in &files {
            let findings = match self.scan_file(root, relative) {
                Ok(findings) => findings,
                Err(error) => {
                    errors.push(error);
                    continue;
                }
            };

            for finding in findings {
                debug!(detector = %finding.detector, file = %relative.display(), line = finding.line_number, "Legacy value found");
                if let Some(group) = grouped.iter_mut().find(|g| g.detector == finding.detector) {
                    group.findings.push(finding);
                }
            }
        }

        grouped.retain(|g| !g.findings.is_empty());
        Ok((files.len(), grouped, errors))
    }

    /// Presence of every required file under `root`
    pub fn check_file_structure(&self, root: &Path) -> Vec<FileCheck> {
        self.required_files
            .iter()
            .map(|required| FileCheck {
                path: required.path.clone(),
                description: required.description.clone(),
                status: if root.join(&required.path).exists() {
                    FileStatus::Exists
                } else {
                    FileStatus::Missing
                },
            })
            .collect()
    }

    /// Content scan plus structural check
    pub fn check(&self, root: &Path) -> Result<CheckReport> {
        let (files_checked, findings, errors) = self.scan_tree(root)?;
        let file_status = self.check_file_structure(root);

        let report = CheckReport {
            files_checked,
            findings,
            file_status,
            errors,
        };

        info!(
            findings = report.total_findings(),
            missing = report.missing_files().len(),
            passed = report.passed(),
            "Post-generation check finished"
        );
        Ok(report)
    }
}
