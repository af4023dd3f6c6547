//! Test helpers for creating hermetic template trees
//!
//! # Usage
//!
//! ```rust,ignore
//! use rebrand::test_helpers::TestProject;
//!
//! let project = TestProject::with_template_content()?;
//! // run rewrite / check against project.root()
//! ```

use crate::{RebrandError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary project directory that is removed when dropped
pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    /// Create a new empty test project in a temporary directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()
            .map_err(|e| RebrandError::Internal(format!("Failed to create temp directory: {}", e)))?;
        Ok(Self { temp_dir })
    }

    /// Create a project seeded with the stock template's default values.
    ///
    /// Files created:
    /// - `app/constants/business.ts` - brand, phones, emails, addresses
    /// - `app/i18n/locales/he.json` and `en.json` - localized strings
    /// - `app.json` - identifier and scheme
    /// - `node_modules/pkg/index.js` - must never be touched
    pub fn with_template_content() -> Result<Self> {
        let project = Self::new()?;

        project.add_file(
            "app/constants/business.ts",
            "export const BUSINESS = {\n\
             \x20 name: 'Barber Shop',\n\
             \x20 phone: '054-835-3232',\n\
             \x20 whatsapp: 'https://wa.me/972548353232',\n\
             \x20 address: 'HAGEFEN 12, NETIVOT',\n\
             };\n",
        )?;
        project.add_file(
            "app/i18n/locales/he.json",
            "{\n  \"title\": \"ברבר בר\",\n  \"address\": \"רפיח ים 7, נתיבות\"\n}\n",
        )?;
        project.add_file(
            "app/i18n/locales/en.json",
            "{\n  \"title\": \"BARBER SHOP\",\n  \"address\": \"Netivot rafiah yam 7\"\n}\n",
        )?;
        project.add_file(
            "app.json",
            "{\n  \"expo\": {\n    \"android\": { \"package\": \"com.barbersbar.app\" }\n  }\n}\n",
        )?;
        project.add_file("node_modules/pkg/index.js", "module.exports = 'Barbersbar';\n")?;

        Ok(project)
    }

    /// Write a text file at `relative_path`, creating parent directories
    pub fn add_file(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        self.add_bytes(relative_path, content.as_bytes())
    }

    /// Write raw bytes, for files that are not valid UTF-8
    pub fn add_bytes(&self, relative_path: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.root().join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| RebrandError::Internal(format!("Failed to create parent directories: {}", e)))?;
        }

        fs::write(&file_path, content)
            .map_err(|e| RebrandError::Internal(format!("Failed to write file {}: {}", file_path.display(), e)))?;

        Ok(file_path)
    }

    /// Create the files the structural check expects after generation
    pub fn add_required_files(&self, required: &[&str]) -> Result<()> {
        for path in required {
            self.add_file(path, "")?;
        }
        Ok(())
    }

    pub fn read(&self, relative_path: &str) -> Result<String> {
        Ok(fs::read_to_string(self.root().join(relative_path))?)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }
}
