//! Agent Descriptor Definitions
//!
//! Persona metadata, loaded from TOML or the built-in roster.

use crate::error::{Error, Result};
use crate::mention::is_mention_char;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reply template used by the persona formatter
///
/// Persona wording is data; the style only picks the section layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStyle {
    /// Numbered approach list
    #[default]
    Standard,
    /// Review checklist
    Review,
    /// Layered design outline
    Blueprint,
    /// Threat/risk findings
    Audit,
}

impl ReplyStyle {
    /// Return string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Review => "review",
            Self::Blueprint => "blueprint",
            Self::Audit => "audit",
        }
    }
}

impl fmt::Display for ReplyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agent persona descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Stable unique identifier (e.g., "01-apex")
    pub id: String,
    /// Mention key, matched case-insensitively (e.g., "APEX")
    pub codename: String,
    /// Display title (e.g., "Elite Computer Science Engineering")
    #[serde(default)]
    pub title: String,
    /// Tier (1 = most senior)
    pub tier: u8,
    /// Specialty summary
    pub specialty: String,
    /// Guiding philosophy, quoted in replies
    pub philosophy: String,
    /// Ordered working directives
    #[serde(default)]
    pub directives: Vec<String>,
    /// Reply template
    #[serde(default)]
    pub style: ReplyStyle,
}

impl AgentDescriptor {
    /// Create a descriptor with empty directives and the standard style
    pub fn new(
        id: impl Into<String>,
        codename: impl Into<String>,
        tier: u8,
        specialty: impl Into<String>,
        philosophy: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            codename: codename.into(),
            title: String::new(),
            tier,
            specialty: specialty.into(),
            philosophy: philosophy.into(),
            directives: Vec::new(),
            style: ReplyStyle::Standard,
        }
    }

    /// Set directives
    #[must_use]
    pub fn with_directives(mut self, directives: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.directives = directives.into_iter().map(Into::into).collect();
        self
    }

    /// Set reply style
    #[must_use]
    pub fn with_style(mut self, style: ReplyStyle) -> Self {
        self.style = style;
        self
    }

    /// Set display title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Lowercased codename used as the lookup key
    #[must_use]
    pub fn key(&self) -> String {
        self.codename.to_lowercase()
    }

    /// Title, or the specialty when no title is set
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.specialty
        } else {
            &self.title
        }
    }

    /// Check the descriptor can be registered
    ///
    /// # Errors
    /// - Empty id
    /// - Codename empty or containing characters a mention cannot carry
    /// - Tier 0
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Configuration(format!(
                "agent '{}' has an empty id",
                self.codename
            )));
        }

        if self.codename.is_empty() || !self.codename.chars().all(is_mention_char) {
            return Err(Error::Configuration(format!(
                "agent '{}' has invalid codename '{}' (letters, digits, '_' and '-' only)",
                self.id, self.codename
            )));
        }

        if self.tier == 0 {
            return Err(Error::Configuration(format!(
                "agent '{}' has tier 0 (tiers start at 1)",
                self.codename
            )));
        }

        Ok(())
    }
}
