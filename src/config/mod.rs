//! Configuration loading and management

use crate::core::descriptor::{FilterBuilder, FilterFieldDescriptor};
use crate::core::error::ConfigError;
use crate::core::pipeline::Pipeline;
use crate::core::query::{DEFAULT_PER_PAGE, QueryState};
use crate::entities::{Document, User};
use crate::storage::Latency;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

/// Simulated delays, in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub list_ms: u64,
    pub get_ms: u64,
    pub write_ms: u64,
}

impl From<LatencyConfig> for Latency {
    fn from(config: LatencyConfig) -> Self {
        Latency {
            list: Duration::from_millis(config.list_ms),
            get: Duration::from_millis(config.get_ms),
            write: Duration::from_millis(config.write_ms),
        }
    }
}

/// Configuration for one list collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Collection name (e.g., "users", "documents")
    pub name: String,

    /// Initial page size
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Simulated delays of the in-memory store
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Fields scanned by free-text search
    pub search_fields: Vec<String>,

    /// Fields offered by the filter builder
    #[serde(default)]
    pub filter_fields: Vec<FilterFieldDescriptor>,
}

impl CollectionConfig {
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.search_fields.iter().cloned())
    }

    pub fn filter_builder(&self) -> FilterBuilder {
        FilterBuilder::new(self.filter_fields.clone())
    }

    pub fn latency(&self) -> Latency {
        self.latency.into()
    }

    /// Query a fresh list view of this collection starts from
    pub fn initial_state(&self) -> QueryState {
        QueryState::default().with_per_page(self.per_page)
    }
}

/// Complete configuration of the list collections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub collections: Vec<CollectionConfig>,
}

impl ListConfig {
    /// Load and validate configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load and validate configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Find a collection by name
    pub fn collection(&self, name: &str) -> Result<&CollectionConfig, ConfigError> {
        self.collections
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConfigError::UnknownCollection {
                name: name.to_string(),
            })
    }

    /// Check page sizes, name uniqueness and filter field ids
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for collection in &self.collections {
            if !seen.insert(collection.name.as_str()) {
                return Err(ConfigError::DuplicateCollection {
                    name: collection.name.clone(),
                });
            }
            if collection.per_page == 0 {
                return Err(ConfigError::InvalidValue {
                    collection: collection.name.clone(),
                    field: "per_page".to_string(),
                    message: "must be greater than zero".to_string(),
                });
            }
            if collection.filter_fields.iter().any(|f| f.id.trim().is_empty()) {
                return Err(ConfigError::InvalidValue {
                    collection: collection.name.clone(),
                    field: "filter_fields".to_string(),
                    message: "field id must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Configuration of the users and documents dashboard
    pub fn default_config() -> Self {
        let search =
            |fields: &[&str]| -> Vec<String> { fields.iter().map(|f| f.to_string()).collect() };
        Self {
            collections: vec![
                CollectionConfig {
                    name: "users".to_string(),
                    per_page: DEFAULT_PER_PAGE,
                    latency: LatencyConfig::default(),
                    search_fields: search(&["name", "email", "position"]),
                    filter_fields: User::filter_fields(),
                },
                CollectionConfig {
                    name: "documents".to_string(),
                    per_page: DEFAULT_PER_PAGE,
                    latency: LatencyConfig {
                        list_ms: 800,
                        get_ms: 500,
                        write_ms: 1000,
                    },
                    search_fields: search(&["title", "description", "created_by"]),
                    filter_fields: Document::filter_fields(),
                },
            ],
        }
    }
}
