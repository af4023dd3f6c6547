//! Field-level updates of the template's structured config files.
//!
//! Every document is optional: a missing file is skipped, a malformed one is
//! reported and the remaining documents are still processed.

use crate::profile::BusinessProfile;
use crate::{RebrandError, Result};
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const APP_MANIFEST: &str = "app.json";
pub const PACKAGE_MANIFEST: &str = "package.json";
pub const BUILD_PROFILES: &str = "eas.json";
pub const THEME_CONFIG: &str = "tailwind.config.js";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum ManifestStatus {
    Updated,
    Unchanged,
    Skipped,
    Failed(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ManifestUpdate {
    pub path: PathBuf,
    pub status: ManifestStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ManifestReport {
    pub preview: bool,
    pub updates: Vec<ManifestUpdate>,
}

impl ManifestReport {
    pub fn status_of(&self, path: &str) -> Option<&ManifestStatus> {
        self.updates
            .iter()
            .find(|u| u.path == Path::new(path))
            .map(|u| &u.status)
    }

    pub fn updated_count(&self) -> usize {
        self.updates
            .iter()
            .filter(|u| u.status == ManifestStatus::Updated)
            .count()
    }
}

/// Update `app.json`, `package.json`, `eas.json` and the theme color under `root`
pub fn update_manifests(root: &Path, profile: &BusinessProfile, preview: bool) -> ManifestReport {
    let mut report = ManifestReport {
        preview,
        updates: Vec::new(),
    };

    let json_documents: [(&str, fn(&mut Value, &BusinessProfile)); 3] = [
        (APP_MANIFEST, apply_app_manifest),
        (PACKAGE_MANIFEST, apply_package_manifest),
        (BUILD_PROFILES, apply_build_profiles),
    ];

    for (name, apply) in json_documents {
        let status = update_json_document(&root.join(name), profile, preview, apply);
        log_status(name, &status);
        report.updates.push(ManifestUpdate {
            path: PathBuf::from(name),
            status,
        });
    }

    let status = update_theme_color(&root.join(THEME_CONFIG), profile, preview);
    log_status(THEME_CONFIG, &status);
    report.updates.push(ManifestUpdate {
        path: PathBuf::from(THEME_CONFIG),
        status,
    });

    report
}

fn log_status(name: &str, status: &ManifestStatus) {
    match status {
        ManifestStatus::Updated => info!("Updated {}", name),
        ManifestStatus::Failed(reason) => warn!("Could not update {}: {}", name, reason),
        ManifestStatus::Unchanged | ManifestStatus::Skipped => {}
    }
}

fn update_json_document(
    path: &Path,
    profile: &BusinessProfile,
    preview: bool,
    apply: fn(&mut Value, &BusinessProfile),
) -> ManifestStatus {
    if !path.exists() {
        return ManifestStatus::Skipped;
    }

    match rewrite_json(path, profile, preview, apply) {
        Ok(true) => ManifestStatus::Updated,
        Ok(false) => ManifestStatus::Unchanged,
        Err(e) => ManifestStatus::Failed(e.to_string()),
    }
}

fn rewrite_json(path: &Path, profile: &BusinessProfile, preview: bool, apply: fn(&mut Value, &BusinessProfile)) -> Result<bool> {
    let original: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    if !original.is_object() {
        return Err(RebrandError::Validation(format!("{} is not a JSON object", path.display())));
    }

    let mut document = original.clone();
    apply(&mut document, profile);

    if document == original {
        return Ok(false);
    }
    if !preview {
        let mut rendered = serde_json::to_string_pretty(&document)?;
        rendered.push('\n');
        fs::write(path, rendered)?;
    }
    Ok(true)
}

/// Object stored under `key`, replacing any non-object value
fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let entry = map.entry(key.to_string()).or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    match entry {
        Value::Object(object) => object,
        _ => unreachable!("entry was just made an object"),
    }
}

fn apply_app_manifest(document: &mut Value, profile: &BusinessProfile) {
    let Some(root) = document.as_object_mut() else {
        return;
    };
    let expo = object_entry(root, "expo");

    expo.insert("name".to_string(), Value::from(profile.app_name()));
    if let Some(slug) = profile.bundle_slug() {
        expo.insert("slug".to_string(), Value::from(slug));
    }
    object_entry(expo, "ios").insert("bundleIdentifier".to_string(), Value::from(profile.bundle_id.as_str()));
    object_entry(expo, "android").insert("package".to_string(), Value::from(profile.bundle_id.as_str()));
    if let Some(color) = profile.primary_color() {
        object_entry(expo, "splash").insert("backgroundColor".to_string(), Value::from(color));
    }
}

fn apply_package_manifest(document: &mut Value, profile: &BusinessProfile) {
    let Some(root) = document.as_object_mut() else {
        return;
    };

    if let Some(slug) = profile.bundle_slug() {
        root.insert("name".to_string(), Value::from(slug));
    }
    // Must not contain a template brand string, or every rerun rewrites it again
    root.insert(
        "description".to_string(),
        Value::from(format!("{} Booking App", profile.business_name.trim())),
    );
}

/// Only identifiers already present in a build profile are replaced
fn apply_build_profiles(document: &mut Value, profile: &BusinessProfile) {
    let Some(build) = document.get_mut("build").and_then(Value::as_object_mut) else {
        return;
    };

    for build_profile in build.values_mut() {
        if let Some(ios) = build_profile.get_mut("ios").and_then(Value::as_object_mut) {
            if ios.contains_key("bundleIdentifier") {
                ios.insert("bundleIdentifier".to_string(), Value::from(profile.bundle_id.as_str()));
            }
        }
        if let Some(android) = build_profile.get_mut("android").and_then(Value::as_object_mut) {
            if android.contains_key("package") {
                android.insert("package".to_string(), Value::from(profile.bundle_id.as_str()));
            }
        }
    }
}

fn update_theme_color(path: &Path, profile: &BusinessProfile, preview: bool) -> ManifestStatus {
    let Some(color) = profile.primary_color() else {
        return ManifestStatus::Skipped;
    };
    if !path.exists() {
        return ManifestStatus::Skipped;
    }

    let result = (|| -> Result<bool> {
        let content = fs::read_to_string(path)?;
        let primary = Regex::new(r#"primary:\s*['"]#[0-9a-fA-F]{6}['"]"#)?;
        let replacement = format!("primary: '{}'", color);
        let updated = primary.replace_all(&content, NoExpand(&replacement));

        if updated == content {
            return Ok(false);
        }
        if !preview {
            fs::write(path, updated.as_bytes())?;
        }
        Ok(true)
    })();

    match result {
        Ok(true) => ManifestStatus::Updated,
        Ok(false) => ManifestStatus::Unchanged,
        Err(e) => ManifestStatus::Failed(e.to_string()),
    }
}
