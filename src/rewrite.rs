use crate::discovery::FileEnumerator;
use crate::models::{CompiledRule, FilePreview, ReplacementResult, RuleSet};
use crate::Result;
use regex::NoExpand;
use similar::TextDiff;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Limits on the diff output produced in preview mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLimits {
    /// Only the first `max_files` changed files get a diff
    pub max_files: usize,
    /// Each diff is cut after this many lines
    pub max_lines: usize,
    pub context_lines: usize,
}

impl Default for PreviewLimits {
    fn default() -> Self {
        Self {
            max_files: 3,
            max_lines: 20,
            context_lines: 2,
        }
    }
}

/// Applies an ordered rule list across a tree of text files
#[derive(Debug, Clone)]
pub struct RewriteEngine {
    rules: Vec<CompiledRule>,
    enumerator: FileEnumerator,
    limits: PreviewLimits,
}

impl RewriteEngine {
    pub fn new(rule_set: &RuleSet, enumerator: FileEnumerator) -> Result<Self> {
        Ok(Self {
            rules: rule_set.compile()?,
            enumerator,
            limits: PreviewLimits::default(),
        })
    }

    pub fn with_preview_limits(mut self, limits: PreviewLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Rewrite every enumerated file under `root`.
    ///
    /// With `preview` set nothing is written; diffs for the first few changed
    /// files are attached to the result while counts still cover the whole
    /// tree. A file that cannot be read or written is logged, recorded in
    /// `errors` and skipped.
    #[instrument(skip(self), fields(root = %root.display(), rules = self.rules.len()))]
    pub fn rewrite_tree(&self, root: &Path, preview: bool) -> Result<ReplacementResult> {
        let files = self.enumerator.find_files(root)?;
        let mut result = ReplacementResult::new(preview);
        result.files_scanned = files.len();

        info!("Scanning {} files for hardcoded content", files.len());
        if preview {
            info!("Preview mode: no files will be modified");
        }

        for relative in &files {
            self.rewrite_file(root, relative, &mut result);
        }

        info!(
            files_touched = result.files_touched,
            total_replacements = result.total_replacements,
            "Content replacement finished"
        );
        Ok(result)
    }

    /// Rewrite the single file `root/relative`, accumulating into `result`.
    ///
    /// Honors `result.preview`. Read and write failures are logged and
    /// recorded in `result.errors`; they never propagate.
    pub fn rewrite_file(&self, root: &Path, relative: &Path, result: &mut ReplacementResult) {
        let full_path = root.join(relative);

        let original = match read_lenient(&full_path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Error reading {}: {}", relative.display(), e);
                result.record_error(relative.to_path_buf(), e.to_string());
                return;
            }
        };

        let (modified, replacements) = apply_rules(&original, &self.rules);
        if replacements == 0 {
            return;
        }

        debug!(file = %relative.display(), replacements, "File changed");

        if result.preview {
            if result.previews.len() < self.limits.max_files {
                result.previews.push(FilePreview {
                    path: relative.to_path_buf(),
                    diff: unified_preview(relative, &original, &modified, self.limits),
                });
            }
        } else if let Err(e) = fs::write(&full_path, modified.as_bytes()) {
            warn!("Error writing {}: {}", relative.display(), e);
            result.record_error(relative.to_path_buf(), e.to_string());
            return;
        }

        result.record_change(relative.to_path_buf(), replacements);
    }
}

/// Apply `rules` in order to `content`, each against the output of the ones
/// before it.
///
/// Returns the final content and the number of non-overlapping matches,
/// counted for each rule before that rule's own substitution.
pub fn apply_rules(content: &str, rules: &[CompiledRule]) -> (String, usize) {
    let mut current = content.to_string();
    let mut total = 0;

    for compiled in rules {
        if compiled.rule.replacement.is_empty() {
            continue;
        }

        let matches = compiled.regex.find_iter(&current).count();
        if matches == 0 {
            continue;
        }

        total += matches;
        current = compiled
            .regex
            .replace_all(&current, NoExpand(&compiled.rule.replacement))
            .into_owned();
    }

    (current, total)
}

/// Read a file as UTF-8, dropping malformed byte sequences
pub fn read_lenient(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect())
}

/// Unified diff of `old` -> `new`, truncated to `limits.max_lines` lines
pub fn unified_preview(path: &Path, old: &str, new: &str, limits: PreviewLimits) -> String {
    let display = path.to_string_lossy();
    let diff = TextDiff::from_lines(old, new);
    let rendered = diff
        .unified_diff()
        .context_radius(limits.context_lines)
        .header(&format!("a/{}", display), &format!("b/{}", display))
        .to_string();

    rendered
        .split_inclusive('\n')
        .take(limits.max_lines)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RuleCategory, SubstitutionRule};
    use crate::test_helpers::TestProject;

    fn compile(rules: &[(&str, &str)]) -> Vec<CompiledRule> {
        rules
            .iter()
            .enumerate()
            .map(|(i, (pattern, replacement))| {
                SubstitutionRule::new(format!("rule{}", i), RuleCategory::Brand, *pattern, *replacement)
                    .compile()
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_apply_counts_all_matches() {
        let rules = compile(&[(r"\bBarbersbar\b", "Test Salon")]);
        let (content, count) = apply_rules("Barbersbar and barbersbar and BARBERSBAR", &rules);
        assert_eq!(content, "Test Salon and Test Salon and Test Salon");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_later_rule_sees_earlier_output() {
        let rules = compile(&[("alpha", "beta"), ("beta", "gamma")]);
        let (content, count) = apply_rules("alpha beta", &rules);
        assert_eq!(content, "gamma gamma");
        // one match for the first rule, two for the second
        assert_eq!(count, 3);
    }

    #[test]
    fn test_earlier_rule_shadows_later_one() {
        let rules = compile(&[("Barber Shop", "First"), ("BARBER SHOP", "Second")]);
        let (content, count) = apply_rules("BARBER SHOP", &rules);
        assert_eq!(content, "First");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_replacement_is_literal() {
        let rules = compile(&[("price", "$1 and ${name}")]);
        let (content, _) = apply_rules("price", &rules);
        assert_eq!(content, "$1 and ${name}");
    }

    #[test]
    fn test_no_match_leaves_content_untouched() {
        let rules = compile(&[("Barbersbar", "X")]);
        let (content, count) = apply_rules("nothing here", &rules);
        assert_eq!(content, "nothing here");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_read_lenient_drops_invalid_bytes() {
        let project = TestProject::new().unwrap();
        let path = project.add_bytes("bad.md", b"Barber\xff Shop\xc3").unwrap();
        assert_eq!(read_lenient(&path).unwrap(), "Barber Shop");
    }

    #[test]
    fn test_unified_preview_is_bounded() {
        let old: String = (0..50).map(|i| format!("line {}\n", i)).collect();
        let new = old.replace("line 1", "LINE 1");
        let limits = PreviewLimits {
            max_files: 3,
            max_lines: 5,
            context_lines: 2,
        };

        let diff = unified_preview(Path::new("src/a.ts"), &old, &new, limits);
        assert!(diff.starts_with("--- a/src/a.ts"));
        assert!(diff.contains("+++ b/src/a.ts"));
        assert_eq!(diff.lines().count(), 5);
    }

    #[test]
    fn test_rewrite_tree_writes_and_counts() {
        let project = TestProject::new().unwrap();
        project.add_file("src/a.ts", "const name = 'Barbersbar';\n").unwrap();
        project.add_file("src/b.ts", "const other = 1;\n").unwrap();

        let rule_set = RuleSet::new().add_rule(SubstitutionRule::new("brand", RuleCategory::Brand, r"\bBarbersbar\b", "Test Salon"));
        let engine = RewriteEngine::new(&rule_set, FileEnumerator::new()).unwrap();

        let result = engine.rewrite_tree(project.root(), false).unwrap();
        assert_eq!(result.files_scanned, 2);
        assert_eq!(result.files_touched, 1);
        assert_eq!(result.total_replacements, 1);
        assert!(result.previews.is_empty());
        assert_eq!(project.read("src/a.ts").unwrap(), "const name = 'Test Salon';\n");
    }

    #[test]
    fn test_unreadable_file_is_recorded_and_next_file_still_rewritten() {
        let project = TestProject::new().unwrap();
        // A directory with a source-like name: reading it fails with EISDIR
        project.add_file("src/folder.ts/keep.txt", "").unwrap();
        project.add_file("src/b.ts", "Barbersbar\n").unwrap();

        let rule_set = RuleSet::new().add_rule(SubstitutionRule::new("brand", RuleCategory::Brand, r"\bBarbersbar\b", "Test Salon"));
        let engine = RewriteEngine::new(&rule_set, FileEnumerator::new()).unwrap();

        let mut result = ReplacementResult::new(false);
        engine.rewrite_file(project.root(), Path::new("src/folder.ts"), &mut result);
        engine.rewrite_file(project.root(), Path::new("src/b.ts"), &mut result);

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, Path::new("src/folder.ts"));
        assert!(!result.errors[0].message.is_empty());
        assert_eq!(result.files_touched, 1);
        assert_eq!(result.files_with_changes(), vec![Path::new("src/b.ts")]);
        assert_eq!(project.read("src/b.ts").unwrap(), "Test Salon\n");
    }

    #[test]
    fn test_preview_caps_diffs_but_counts_everything() {
        let project = TestProject::new().unwrap();
        for i in 0..5 {
            project.add_file(&format!("f{}.md", i), "Barbersbar\n").unwrap();
        }

        let rule_set = RuleSet::new().add_rule(SubstitutionRule::new("brand", RuleCategory::Brand, r"\bBarbersbar\b", "Test Salon"));
        let engine = RewriteEngine::new(&rule_set, FileEnumerator::new()).unwrap();

        let result = engine.rewrite_tree(project.root(), true).unwrap();
        assert_eq!(result.files_touched, 5);
        assert_eq!(result.previews.len(), 3);
        assert_eq!(result.previews[0].path, Path::new("f0.md"));
        assert_eq!(project.read("f4.md").unwrap(), "Barbersbar\n");
    }
}
