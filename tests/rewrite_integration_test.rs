use rebrand::{
    check_project, load_profile, rewrite_project, update_manifests, BusinessProfile, FileEnumerator, ManifestStatus,
    RebrandConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files: Vec<(PathBuf, Vec<u8>)> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| (e.path().to_path_buf(), fs::read(e.path()).unwrap()))
        .collect();
    files.sort();
    files
}

fn salon() -> BusinessProfile {
    BusinessProfile::new("Test Salon", "+972523456789", "com.testsalon.app")
}

fn seed_template(root: &Path) {
    create_file(
        root,
        "app/constants/business.ts",
        "export const BUSINESS = {\n  name: 'Barber Shop',\n  phone: '054-835-3232',\n  whatsapp: 'https://wa.me/972548353232',\n  address: 'HAGEFEN 12, NETIVOT',\n};\n",
    );
    create_file(
        root,
        "app/i18n/locales/he.json",
        "{\n  \"title\": \"ברבר בר\",\n  \"address\": \"רפיח ים 7, נתיבות\"\n}\n",
    );
    create_file(
        root,
        "app/i18n/locales/en.json",
        "{\n  \"title\": \"BARBER SHOP\",\n  \"address\": \"Netivot rafiah yam 7\"\n}\n",
    );
    create_file(root, "README.md", "# Barbersbar\n\nContact support@barbersbar.co.il or 052 398 5505.\n");
    create_file(root, "node_modules/pkg/index.js", "module.exports = 'Barber Shop';\n");
}

#[test]
fn test_end_to_end_test_salon() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_file(root, "src/business.ts", "export const NAME = 'Barber Shop';\nexport const PHONE = '054-835-3232';\n");

    let config = RebrandConfig::default();
    let result = rewrite_project(root, &salon(), &config, false).unwrap();

    assert_eq!(result.files_touched, 1);
    assert_eq!(result.total_replacements, 2);

    let content = fs::read_to_string(root.join("src/business.ts")).unwrap();
    assert!(content.contains("Test Salon"));
    assert!(content.contains("+972523456789"));
    assert!(!content.contains("Barber Shop"));
    assert!(!content.contains("054-835-3232"));

    let report = check_project(root, &config).unwrap();
    assert!(report.findings_for("barber_shop_generic").is_empty());
    assert!(report.findings_for("israeli_phone_054").is_empty());
    assert_eq!(report.total_findings(), 0);
}

#[test]
fn test_second_rewrite_makes_no_replacements() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    seed_template(root);

    let config = RebrandConfig::default();
    let first = rewrite_project(root, &salon(), &config, false).unwrap();
    assert!(first.total_replacements > 0);

    let after_first = snapshot(root);
    let second = rewrite_project(root, &salon(), &config, false).unwrap();

    assert_eq!(second.total_replacements, 0);
    assert_eq!(second.files_touched, 0);
    assert_eq!(snapshot(root), after_first);
}

#[test]
fn test_preview_leaves_tree_untouched_with_same_counts() {
    let preview_dir = TempDir::new().unwrap();
    let real_dir = TempDir::new().unwrap();
    seed_template(preview_dir.path());
    seed_template(real_dir.path());

    let config = RebrandConfig::default();
    let before = snapshot(preview_dir.path());

    let previewed = rewrite_project(preview_dir.path(), &salon(), &config, true).unwrap();
    assert_eq!(snapshot(preview_dir.path()), before);

    let applied = rewrite_project(real_dir.path(), &salon(), &config, false).unwrap();
    assert_eq!(previewed.total_replacements, applied.total_replacements);
    assert_eq!(previewed.files_touched, applied.files_touched);
    assert_eq!(previewed.files_with_changes(), applied.files_with_changes());

    assert!(previewed.preview);
    assert!(!previewed.previews.is_empty());
    assert!(previewed.previews.len() <= 3);
    assert!(applied.previews.is_empty());
}

#[test]
fn test_excluded_directories_are_never_rewritten() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    seed_template(root);

    let files = FileEnumerator::new().find_files(root).unwrap();
    assert!(files.iter().all(|f| !f.starts_with("node_modules")));

    rewrite_project(root, &salon(), &RebrandConfig::default(), false).unwrap();
    let vendored = fs::read_to_string(root.join("node_modules/pkg/index.js")).unwrap();
    assert_eq!(vendored, "module.exports = 'Barber Shop';\n");
}

#[test]
fn test_earlier_replacement_is_seen_by_later_rules() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_file(root, "src/footer.ts", "export const FOOTER = 'Barber Shop';\n");

    // The brand replacement itself contains a template email
    let profile = BusinessProfile::new("info@barbersbar.com", "+972523456789", "com.testsalon.app");
    let result = rewrite_project(root, &profile, &RebrandConfig::default(), false).unwrap();

    let content = fs::read_to_string(root.join("src/footer.ts")).unwrap();
    assert_eq!(content, "export const FOOTER = 'info@app.com';\n");
    assert_eq!(result.total_replacements, 2);
}

#[test]
fn test_addresses_map_to_locale_variants() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    seed_template(root);

    let profile = salon().with_localized_addresses("הרצל 1, תל אביב", "1 Herzl St, Tel Aviv");
    rewrite_project(root, &profile, &RebrandConfig::default(), false).unwrap();

    let he = fs::read_to_string(root.join("app/i18n/locales/he.json")).unwrap();
    assert!(he.contains("\"address\": \"הרצל 1, תל אביב\""));
    assert!(he.contains("\"title\": \"Test Salon\""));

    let en = fs::read_to_string(root.join("app/i18n/locales/en.json")).unwrap();
    assert!(en.contains("\"address\": \"1 Herzl St, Tel Aviv\""));
    // Matching is case-insensitive, so the mixed-case brand rule claims the upper-case form first
    assert!(en.contains("\"title\": \"Test Salon\""));

    let business = fs::read_to_string(root.join("app/constants/business.ts")).unwrap();
    assert!(business.contains("address: '1 Herzl St, Tel Aviv'"));
    assert!(business.contains("https://wa.me/972523456789"));
}

#[test]
fn test_invalid_utf8_is_dropped_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let path = root.join("src/broken.ts");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"const a = 'Barber Shop';\xff\xfe\n").unwrap();
    create_file(root, "src/ok.ts", "const b = 'Barber Shop';\n");

    let result = rewrite_project(root, &salon(), &RebrandConfig::default(), false).unwrap();

    assert_eq!(result.files_touched, 2);
    assert!(result.errors.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "const a = 'Test Salon';\n");
}

#[test]
fn test_manifests_then_rewrite_from_profile_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_file(
        root,
        "app.json",
        r#"{
  "expo": {
    "name": "Barbersbar",
    "slug": "barbersbar",
    "scheme": "barbersbar",
    "ios": { "bundleIdentifier": "com.barbersbar.app" },
    "android": { "package": "com.barbersbar.app" }
  }
}
"#,
    );
    create_file(root, "package.json", "{\n  \"name\": \"barbersbar\",\n  \"version\": \"1.0.0\"\n}\n");

    let profile_path = create_file(
        root,
        "profile.yaml",
        "businessName: Test Salon\nownerPhone: \"052-345-6789\"\nbundleId: com.testsalon.app\n",
    );
    let profile = load_profile(&profile_path).unwrap();

    let manifests = update_manifests(root, &profile, false);
    assert_eq!(manifests.status_of("app.json"), Some(&ManifestStatus::Updated));
    assert_eq!(manifests.status_of("package.json"), Some(&ManifestStatus::Updated));
    assert_eq!(manifests.status_of("eas.json"), Some(&ManifestStatus::Skipped));

    let app: serde_json::Value = serde_json::from_str(&fs::read_to_string(root.join("app.json")).unwrap()).unwrap();
    assert_eq!(app["expo"]["name"], "Test Salon");
    assert_eq!(app["expo"]["ios"]["bundleIdentifier"], "com.testsalon.app");
    assert_eq!(app["expo"]["android"]["package"], "com.testsalon.app");

    let package: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("package.json")).unwrap()).unwrap();
    assert_eq!(package["name"], "app");
    assert_eq!(package["version"], "1.0.0");

    rewrite_project(root, &profile, &RebrandConfig::default(), false).unwrap();

    let report = check_project(root, &RebrandConfig::default()).unwrap();
    assert_eq!(report.total_findings(), 0, "unexpected findings: {:?}", report.findings);
}

#[test]
fn test_rerunning_manifests_and_rewrite_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_file(root, "package.json", "{\n  \"name\": \"barbersbar\",\n  \"version\": \"1.0.0\"\n}\n");
    create_file(
        root,
        "app.json",
        "{\n  \"expo\": {\n    \"name\": \"Barbersbar\",\n    \"scheme\": \"barbersbar\"\n  }\n}\n",
    );

    let profile = salon();
    let config = RebrandConfig::default();

    update_manifests(root, &profile, false);
    rewrite_project(root, &profile, &config, false).unwrap();
    let after_first = snapshot(root);

    let manifests = update_manifests(root, &profile, false);
    let second = rewrite_project(root, &profile, &config, false).unwrap();

    assert_eq!(manifests.status_of("package.json"), Some(&ManifestStatus::Unchanged));
    assert_eq!(manifests.status_of("app.json"), Some(&ManifestStatus::Unchanged));
    assert_eq!(second.total_replacements, 0, "changed: {:?}", second.files_with_changes());
    assert_eq!(snapshot(root), after_first);
}
