use rebrand::{check_project, FileStatus, LegacyScanner, RebrandConfig, RequiredFile};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_required_files(root: &Path) {
    for required in RebrandConfig::default().check.required_files {
        create_file(root, required.path.to_str().unwrap(), "{}\n");
    }
}

#[test]
fn test_clean_tree_passes() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_required_files(root);
    create_file(root, "src/business.ts", "export const NAME = 'Test Salon';\nexport const PHONE = '+972523456789';\n");

    let report = check_project(root, &RebrandConfig::default()).unwrap();

    assert!(report.passed());
    assert_eq!(report.total_findings(), 0);
    assert!(report.missing_files().is_empty());
    assert!(report.files_checked >= 3);
}

#[test]
fn test_one_finding_per_seeded_default() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_required_files(root);
    create_file(
        root,
        "src/leftovers.ts",
        "const name = 'Barber Shop';\nconst phone = '054-835-3232';\nconst address = 'רפיח ים 7';\nconst id = 'com.barbersbar.app';\n",
    );

    let report = check_project(root, &RebrandConfig::default()).unwrap();
    assert!(!report.passed());

    let expected = [
        ("barber_shop_generic", 1),
        ("israeli_phone_054", 2),
        ("old_addresses", 3),
        ("old_bundle_id", 4),
    ];
    for (detector, line) in expected {
        let findings = report.findings_for(detector);
        assert_eq!(findings.len(), 1, "detector {}", detector);
        assert_eq!(findings[0].file_path, PathBuf::from("src/leftovers.ts"));
        assert_eq!(findings[0].line_number, line);
    }

    // The identifier also carries the brand token
    assert_eq!(report.findings_for("barbersbar_brand").len(), 1);
    assert!(report.findings_for("israeli_phone_052").is_empty());
}

#[test]
fn test_international_number_is_not_flagged_as_local() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_file(root, "src/phones.ts", "a = '+9720523456789';\nb = '0523456789';\n");

    let scanner = LegacyScanner::new(RebrandConfig::default().scan.enumerator())
        .unwrap()
        .with_required_files(Vec::new());
    let report = scanner.check(root).unwrap();

    let findings = report.findings_for("non_e164_phones");
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line_number, 2);
}

#[test]
fn test_missing_required_file_fails_check() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_file(root, "README.md", "# Test Salon\n");

    let mut config = RebrandConfig::default();
    config.check.required_files = vec![
        RequiredFile::new("README.md", "Readme"),
        RequiredFile::new(".env.example", "Environment template"),
    ];

    let report = check_project(root, &config).unwrap();

    assert_eq!(report.total_findings(), 0);
    assert!(!report.passed());
    assert_eq!(report.file_status.len(), 2);
    assert_eq!(report.file_status[0].status, FileStatus::Exists);
    let missing = report.missing_files();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].path, PathBuf::from(".env.example"));
}

#[test]
fn test_check_never_writes() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let content = "Barbersbar support@barbersbar.com 052-398-5505\n";
    create_file(root, "docs/about.md", content);

    let report = check_project(root, &RebrandConfig::default()).unwrap();

    assert!(!report.passed());
    assert_eq!(report.findings_for("old_emails").len(), 1);
    assert_eq!(report.findings_for("israeli_phone_052").len(), 1);
    assert_eq!(fs::read_to_string(root.join("docs/about.md")).unwrap(), content);
}

#[test]
fn test_missing_root_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = check_project(&temp_dir.path().join("does-not-exist"), &RebrandConfig::default());
    assert!(result.is_err());
}
