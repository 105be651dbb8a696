//! Built-in template catalog and selection resolution

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

/// Menu key for a user-supplied template
pub const CUSTOM_TEMPLATE: &str = "custom";

/// Embedded catalog document, fixed at compile time
const BUILTIN_CATALOG: &str = include_str!("catalog.yaml");

/// Errors raised while resolving a template selection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("both a template name and a template url are required for a custom template")]
    MissingCustomTemplate,

    #[error("template '{name}' not found. Available templates: {available}")]
    UnknownTemplate { name: String, available: String },
}

/// A concrete template to clone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSelection {
    pub identifier: String,
    pub source_location: String,
}

/// One built-in template
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub identifier: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
}

/// Ordered mapping from template identifier to repository location
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateCatalog {
    templates: Vec<CatalogEntry>,
}

impl TemplateCatalog {
    /// Load the catalog shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG).context("Failed to parse built-in template catalog")
    }

    /// Parse and check a catalog document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let catalog: TemplateCatalog = serde_yaml::from_str(content)?;

        for (idx, entry) in catalog.templates.iter().enumerate() {
            if entry.identifier.trim().is_empty() || entry.location.trim().is_empty() {
                anyhow::bail!("Catalog entry {} has an empty identifier or location", idx);
            }
            if entry.identifier == CUSTOM_TEMPLATE {
                anyhow::bail!("'{}' is reserved and cannot be a catalog entry", CUSTOM_TEMPLATE);
            }
            if catalog.templates[..idx]
                .iter()
                .any(|e| e.identifier == entry.identifier)
            {
                anyhow::bail!("Duplicate catalog entry: {}", entry.identifier);
            }
        }

        Ok(catalog)
    }

    /// Entries in menu order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.templates
    }

    pub fn get(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.templates.iter().find(|e| e.identifier == identifier)
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.templates.iter().map(|e| e.identifier.as_str()).collect()
    }

    /// Turn a menu choice (or `--template` value) into a concrete selection
    ///
    /// Pure lookup: performs no I/O, so a rejected selection leaves nothing
    /// behind on disk.
    pub fn resolve(
        &self,
        choice: &str,
        custom_name: Option<&str>,
        custom_url: Option<&str>,
    ) -> Result<TemplateSelection, ConfigError> {
        if choice == CUSTOM_TEMPLATE {
            let name = custom_name.map(str::trim).unwrap_or_default();
            let url = custom_url.map(str::trim).unwrap_or_default();
            if name.is_empty() || url.is_empty() {
                return Err(ConfigError::MissingCustomTemplate);
            }
            return Ok(TemplateSelection {
                identifier: name.to_string(),
                source_location: url.to_string(),
            });
        }

        match self.get(choice) {
            Some(entry) => Ok(TemplateSelection {
                identifier: entry.identifier.clone(),
                source_location: entry.location.clone(),
            }),
            None => Err(ConfigError::UnknownTemplate {
                name: choice.to_string(),
                available: self.identifiers().join(", "),
            }),
        }
    }
}
