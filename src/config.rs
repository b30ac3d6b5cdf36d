//! Engine configuration
//!
//! Every field has a default matching the stock weighting scheme, so an empty
//! YAML document (or `JobGraphConfig::default()`) gives the standard engine.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Relationship weight for each kind of similarity between two jobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityWeights {
    /// Same company, different title
    pub same_company: f64,
    /// Same title, different company
    pub same_title: f64,
    /// Nothing in common
    pub unrelated: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            same_company: 0.25,
            same_title: 0.8,
            unrelated: 0.0,
        }
    }
}

/// Weight increment applied to the seed node for each event kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventIncrements {
    pub click: f64,
    pub like: f64,
    pub dislike: f64,
}

impl Default for EventIncrements {
    fn default() -> Self {
        Self {
            click: 1.0,
            like: 10.0,
            dislike: -10.0,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobGraphConfig {
    /// Label carried by every job node
    pub label: String,
    /// Type of the similarity relationships
    pub relationship_type: String,
    /// Weight of a freshly ingested job
    pub default_node_weight: f64,
    pub similarity: SimilarityWeights,
    pub increments: EventIncrements,
    /// Job properties to index on startup
    pub indexes: Vec<String>,
    /// How long to wait for each index to come online
    pub index_timeout_secs: u64,
}

impl Default for JobGraphConfig {
    fn default() -> Self {
        Self {
            label: "Job".to_string(),
            relationship_type: "LIKE".to_string(),
            default_node_weight: 10.0,
            similarity: SimilarityWeights::default(),
            increments: EventIncrements::default(),
            indexes: vec!["jobId".to_string()],
            index_timeout_secs: 10,
        }
    }
}

impl JobGraphConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.label.trim().is_empty() {
            return Err(ConfigError::Invalid("label must not be empty".into()));
        }
        if self.relationship_type.trim().is_empty() {
            return Err(ConfigError::Invalid("relationship_type must not be empty".into()));
        }

        let numbers = [
            ("default_node_weight", self.default_node_weight),
            ("similarity.same_company", self.similarity.same_company),
            ("similarity.same_title", self.similarity.same_title),
            ("similarity.unrelated", self.similarity.unrelated),
            ("increments.click", self.increments.click),
            ("increments.like", self.increments.like),
            ("increments.dislike", self.increments.dislike),
        ];
        if let Some((name, value)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{} must be finite, got {}", name, value)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = JobGraphConfig::default();
        assert_eq!(config.label, "Job");
        assert_eq!(config.relationship_type, "LIKE");
        assert_eq!(config.default_node_weight, 10.0);
        assert_eq!(config.similarity.same_company, 0.25);
        assert_eq!(config.similarity.same_title, 0.8);
        assert_eq!(config.similarity.unrelated, 0.0);
        assert_eq!(config.increments.dislike, -10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = JobGraphConfig::from_yaml_str(
            "default_node_weight: 5.0\nincrements:\n  like: 20.0\n",
        )
        .unwrap();
        assert_eq!(config.default_node_weight, 5.0);
        assert_eq!(config.increments.like, 20.0);
        assert_eq!(config.increments.click, 1.0);
        assert_eq!(config.label, "Job");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = JobGraphConfig::from_yaml_str("label: \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let mut config = JobGraphConfig::default();
        config.similarity.same_title = f64::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        assert!(matches!(
            JobGraphConfig::from_yaml_str("indexes: 12"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "relationship_type: SIMILAR\nindexes: [jobId, company]").unwrap();

        let config = JobGraphConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.relationship_type, "SIMILAR");
        assert_eq!(config.indexes, vec!["jobId".to_string(), "company".to_string()]);

        assert!(matches!(
            JobGraphConfig::from_yaml_file("/nonexistent/jobgraph.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
