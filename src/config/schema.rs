//! Configuration schema definitions for packtrain.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format, plus load-time validation. The config file
//! is optional; every field has a sensible default.

use crate::catalog::{package_name, Catalog, CatalogBuilder, ALL_INTEGRATION};
use crate::error::{PacktrainError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Root configuration structure for `.packtrain.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PacktrainConfig {
    /// PyPI distribution name used in install hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,

    /// Python interpreter used to reach pip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,

    /// Deadline for the `pip freeze` query, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Project-specific integration definitions.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub integrations: HashMap<String, IntegrationConfig>,
}

/// A project-specific integration definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Requirement specifiers in declaration order.
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl PacktrainConfig {
    /// Validate structure and values.
    ///
    /// Rejects the reserved `all` name, empty names, and requirement
    /// strings that do not satisfy the package-name grammar. Called by the
    /// loader so that a config that parses but cannot be acted on is a
    /// typed error rather than a later surprise.
    pub fn validate(&self) -> Result<()> {
        if let Some(dist) = &self.distribution {
            if dist.trim().is_empty() {
                return Err(PacktrainError::ConfigValidation {
                    message: "distribution must not be empty".to_string(),
                });
            }
        }

        for (name, integration) in &self.integrations {
            if name.trim().is_empty() {
                return Err(PacktrainError::ConfigValidation {
                    message: "integration names must not be empty".to_string(),
                });
            }
            if name == ALL_INTEGRATION {
                return Err(PacktrainError::ConfigValidation {
                    message: format!(
                        "the integration name '{}' is reserved for the derived aggregate",
                        ALL_INTEGRATION
                    ),
                });
            }
            for spec in &integration.requirements {
                if package_name(spec).is_none() {
                    return Err(PacktrainError::ConfigValidation {
                        message: format!(
                            "integration '{}' has a malformed requirement '{}'",
                            name, spec
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// Assemble the catalog: builtin declarations merged with this config.
    pub fn catalog(&self) -> Catalog {
        let mut builder = CatalogBuilder::builtin().with_custom(&self.integrations);
        if let Some(dist) = &self.distribution {
            builder = builder.distribution(dist.clone());
        }
        builder.build()
    }

    /// The configured freeze deadline, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PacktrainConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
distribution: mypipelines
python: /usr/local/bin/python3.9
timeout_secs: 30
integrations:
  vault:
    requirements:
      - hvac==0.10.14
"#;
        let config: PacktrainConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.distribution.as_deref(), Some("mypipelines"));
        assert_eq!(config.python.as_deref(), Some("/usr/local/bin/python3.9"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.integrations["vault"].requirements.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: PacktrainConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.distribution.is_none());
        assert!(config.python.is_none());
        assert!(config.timeout().is_none());
        assert!(config.integrations.is_empty());
    }

    #[test]
    fn reserved_all_name_is_rejected() {
        let yaml = r#"
integrations:
  all:
    requirements: [foo==1.0]
"#;
        let config: PacktrainConfig = serde_yaml::from_str(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PacktrainError::ConfigValidation { .. }));
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn malformed_requirement_is_rejected() {
        let yaml = r#"
integrations:
  broken:
    requirements: ["==1.0"]
"#;
        let config: PacktrainConfig = serde_yaml::from_str(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("broken"));
        assert!(err.to_string().contains("==1.0"));
    }

    #[test]
    fn empty_distribution_is_rejected() {
        let config = PacktrainConfig {
            distribution: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn catalog_merges_custom_integrations() {
        let yaml = r#"
distribution: mypipelines
integrations:
  vault:
    requirements: [hvac==0.10.14]
"#;
        let config: PacktrainConfig = serde_yaml::from_str(yaml).unwrap();
        let catalog = config.catalog();
        assert!(catalog.get("vault").is_some());
        assert!(catalog.get("aws").is_some());
        assert_eq!(catalog.install_hint("vault"), "pip install mypipelines[vault]");
    }
}
