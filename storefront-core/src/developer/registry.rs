//! Developer registry
//!
//! Ordered collection of developers with case-insensitive name uniqueness
//! and snapshot persistence.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Developer, DeveloperRef};
use crate::validation;
use crate::API_VERSION;

/// The developer registry file payload
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrySnapshot {
    /// API version for schema compatibility
    api_version: String,
    /// When this snapshot was written
    generated: String,
    /// All registered developers, in registration order
    developers: Vec<DeveloperRef>,
}

/// Ordered collection of developers, unique by name (case-insensitive)
#[derive(Debug, Default)]
pub struct DeveloperRegistry {
    developers: Vec<DeveloperRef>,
}

impl DeveloperRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a developer. Rejected (no-op, returns false) when a
    /// developer with the same name already exists, ignoring case.
    pub fn add_developer(&mut self, developer: Developer) -> bool {
        if self.is_valid_developer(&developer.name) {
            return false;
        }
        self.developers.push(DeveloperRef::new(developer));
        true
    }

    /// Look up a developer by name, ignoring case.
    pub fn developer_by_name(&self, name: &str) -> Option<DeveloperRef> {
        self.index_of(name).map(|index| self.developers[index].clone())
    }

    /// Look up a developer by position; out-of-range yields `None`.
    pub fn developer_by_index(&self, index: usize) -> Option<DeveloperRef> {
        if validation::valid_index(index, self.developers.len()) {
            Some(self.developers[index].clone())
        } else {
            None
        }
    }

    /// Replace a developer's website in place. The update is visible through
    /// every app holding the developer's handle. False when no developer of
    /// that name exists.
    pub fn update_developer_website(&mut self, name: &str, website: &str) -> bool {
        match self.developer_by_name(name) {
            Some(developer) => {
                developer.set_website(website);
                true
            }
            None => false,
        }
    }

    /// Remove and return the first developer whose name matches, ignoring
    /// case.
    pub fn remove_developer(&mut self, name: &str) -> Option<DeveloperRef> {
        self.index_of(name).map(|index| self.developers.remove(index))
    }

    /// True when a developer of this name is registered, ignoring case.
    pub fn is_valid_developer(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Position of the first developer whose name matches, ignoring case.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.developers
            .iter()
            .position(|developer| developer.name().eq_ignore_ascii_case(name))
    }

    /// One line per developer in registration order, or the `No developers`
    /// sentinel. Each line resolves its index by name.
    pub fn list_developers(&self) -> String {
        if self.developers.is_empty() {
            return "No developers".to_string();
        }
        let mut list = String::new();
        for developer in &self.developers {
            if let Some(index) = self.index_of(&developer.name()) {
                list.push_str(&format!("{index}: {developer}\n"));
            }
        }
        list
    }

    pub fn number_of_developers(&self) -> usize {
        self.developers.len()
    }

    /// All registered developers, in registration order
    pub fn developers(&self) -> &[DeveloperRef] {
        &self.developers
    }

    /// Load a registry snapshot. Missing or malformed files are errors; the
    /// caller's in-memory registry is only replaced on success.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read developer registry: {}", path.display()))?;

        let snapshot: RegistrySnapshot = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse developer registry: {}", path.display()))?;

        if snapshot.api_version != API_VERSION {
            anyhow::bail!(
                "Unsupported apiVersion '{}' in {}. Expected '{}'",
                snapshot.api_version,
                path.display(),
                API_VERSION
            );
        }

        tracing::debug!(
            "Loaded {} developer(s) from {}",
            snapshot.developers.len(),
            path.display()
        );

        Ok(Self {
            developers: snapshot.developers,
        })
    }

    /// Load a registry snapshot, or an empty registry when the file does not
    /// exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_path(path)
    }

    /// Write the registry snapshot.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let snapshot = RegistrySnapshot {
            api_version: API_VERSION.to_string(),
            generated: chrono::Utc::now().to_rfc3339(),
            developers: self.developers.clone(),
        };

        let content = serde_yaml_ng::to_string(&snapshot)
            .context("Failed to serialize developer registry")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write developer registry: {}", path.display()))?;

        tracing::debug!(
            "Saved {} developer(s) to {}",
            self.developers.len(),
            path.display()
        );
        Ok(())
    }
}
