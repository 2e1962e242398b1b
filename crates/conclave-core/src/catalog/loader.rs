//! Persona TOML Loader
//!
//! Loads one `AgentDescriptor` per TOML file from the persona directory.

use super::AgentDescriptor;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default persona directory
const DEFAULT_PERSONA_DIR: &str = "config/personas";

/// Persona TOML Loader
#[derive(Debug)]
pub struct PersonaLoader {
    persona_dir: PathBuf,
}

impl PersonaLoader {
    /// Create loader with default path (`config/personas/`)
    #[must_use]
    pub fn new() -> Self {
        Self {
            persona_dir: PathBuf::from(DEFAULT_PERSONA_DIR),
        }
    }

    /// Create loader with custom path
    #[must_use]
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            persona_dir: path.as_ref().to_path_buf(),
        }
    }

    /// Return persona directory path
    #[must_use]
    pub fn persona_dir(&self) -> &Path {
        &self.persona_dir
    }

    /// Whether the persona directory exists
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.persona_dir.is_dir()
    }

    /// Load all personas, ordered by id
    ///
    /// # Errors
    /// - Directory read failure
    /// - Individual file parse failures are warned and skipped
    pub fn load_all(&self) -> Result<Vec<AgentDescriptor>> {
        let mut descriptors = Vec::new();

        if !self.persona_dir.exists() {
            warn!("Persona directory not found: {:?}", self.persona_dir);
            return Ok(descriptors);
        }

        let entries = std::fs::read_dir(&self.persona_dir).map_err(|e| {
            Error::Configuration(format!(
                "Failed to read persona directory {:?}: {}",
                self.persona_dir, e
            ))
        })?;

        for entry in entries.flatten() {
            let path = entry.path();

            if !Self::is_toml_file(&path) {
                continue;
            }

            match self.load_file(&path) {
                Ok(descriptor) => {
                    info!(
                        "Loaded persona: {} (tier {})",
                        descriptor.codename, descriptor.tier
                    );
                    descriptors.push(descriptor);
                }
                Err(e) => {
                    warn!("Failed to load {:?}: {}", path, e);
                }
            }
        }

        descriptors.sort_by(|a, b| a.id.cmp(&b.id));

        debug!(
            "Loaded {} personas from {:?}",
            descriptors.len(),
            self.persona_dir
        );
        Ok(descriptors)
    }

    fn load_file(&self, path: &Path) -> Result<AgentDescriptor> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Configuration(format!("Failed to read {:?}: {}", path, e)))?;

        let descriptor: AgentDescriptor = toml::from_str(&content)
            .map_err(|e| Error::Configuration(format!("Failed to parse {:?}: {}", path, e)))?;

        descriptor.validate()?;
        Ok(descriptor)
    }

    fn is_toml_file(path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "toml")
    }
}

impl Default for PersonaLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ReplyStyle;
    use tempfile::TempDir;

    fn persona_toml(id: &str, codename: &str) -> String {
        format!(
            r#"
id = "{id}"
codename = "{codename}"
title = "Test Title"
tier = 2
specialty = "Testing"
philosophy = "Test everything"
directives = ["First", "Second"]
style = "review"
"#
        )
    }

    #[test]
    fn test_loader_new() {
        let loader = PersonaLoader::new();
        assert_eq!(loader.persona_dir(), Path::new(DEFAULT_PERSONA_DIR));
    }

    #[test]
    fn test_loader_nonexistent_dir() {
        let loader = PersonaLoader::with_path("/nonexistent/path");
        assert!(!loader.is_present());
        assert!(loader.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_loader_reads_persona_fields() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("scout.toml"),
            persona_toml("20-scout", "SCOUT"),
        )
        .unwrap();

        let loader = PersonaLoader::with_path(temp_dir.path());
        let descriptors = loader.load_all().unwrap();
        assert_eq!(descriptors.len(), 1);

        let descriptor = &descriptors[0];
        assert_eq!(descriptor.codename, "SCOUT");
        assert_eq!(descriptor.tier, 2);
        assert_eq!(descriptor.directives, vec!["First", "Second"]);
        assert_eq!(descriptor.style, ReplyStyle::Review);
    }

    #[test]
    fn test_loader_load_all_sorted_by_id() {
        let temp_dir = TempDir::new().unwrap();
        for (file, id, codename) in [("b", "02-beta", "BETA"), ("a", "01-alpha", "ALPHA")] {
            std::fs::write(
                temp_dir.path().join(format!("{file}.toml")),
                persona_toml(id, codename),
            )
            .unwrap();
        }
        std::fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let loader = PersonaLoader::with_path(temp_dir.path());
        let descriptors = loader.load_all().unwrap();

        let ids: Vec<_> = descriptors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["01-alpha", "02-beta"]);
    }

    #[test]
    fn test_loader_skips_invalid_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("broken.toml"), "invalid toml {{{").unwrap();
        std::fs::write(
            temp_dir.path().join("tier0.toml"),
            persona_toml("03-zero", "ZERO").replace("tier = 2", "tier = 0"),
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join("good.toml"),
            persona_toml("04-good", "GOOD"),
        )
        .unwrap();

        let loader = PersonaLoader::with_path(temp_dir.path());
        let descriptors = loader.load_all().unwrap();

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].codename, "GOOD");
    }
}
