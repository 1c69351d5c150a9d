//! Integration catalog and aggregate derivation.
//!
//! The catalog maps integration names to their package requirement lists.
//! It is assembled once per invocation — builtin declarations first, then
//! any project-specific integrations from config — and is read-only
//! afterwards. The `all` entry is never hand-authored: it is derived as
//! the base requirement list followed by every named integration's list,
//! in declaration order, without deduplication.

pub mod integration;
pub mod requirement;

pub use integration::Integration;
pub use requirement::{package_name, Requirement};

use crate::config::IntegrationConfig;
use std::collections::HashMap;

/// Name of the derived aggregate integration.
pub const ALL_INTEGRATION: &str = "all";

/// Default PyPI distribution name used in install hints.
pub const DEFAULT_DISTRIBUTION: &str = "packtrain";

/// Requirements installed regardless of which integrations are enabled.
const BASE_REQUIREMENTS: &[&str] = &[
    "click==8.0.1",
    "pyyaml==5.4.1",
    "python-dateutil==2.8.1",
    "gitpython==3.1.18",
    "distro==1.5.0",
    "nbformat==5.1.3",
    "pandas==1.1.5",
    "apache-beam==2.30.0",
];

/// Builtin integrations in declaration order: providers, tooling, datasources.
const BUILTIN_INTEGRATIONS: &[(&str, &[&str])] = &[
    (
        "gcp",
        &[
            "apache-beam[gcp]==2.28.0",
            "apache-beam==2.28.0",
            "google-apitools==0.5.31",
        ],
    ),
    ("aws", &["boto3==1.16.62"]),
    ("pytorch", &["torch>=1.7.0"]),
    ("cortex", &["cortex>=0.29.0"]),
    (
        "postgres",
        &["beam-nuggets==0.17.0", "pg8000==1.16.5", "sqlalchemy>=1.3.22"],
    ),
    ("huggingface", &["transformers>=4.3.3", "tokenizers>=0.10.1"]),
];

/// The complete, immutable set of integrations known for one invocation.
///
/// Iteration yields named integrations in declaration order with the
/// derived `all` entry last, so reporting is deterministic and
/// restartable.
#[derive(Debug, Clone)]
pub struct Catalog {
    distribution: String,
    base: Vec<Requirement>,
    entries: Vec<Integration>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build the catalog from builtin declarations only.
    pub fn builtin() -> Self {
        CatalogBuilder::builtin().build()
    }

    /// Look up an integration by name.
    pub fn get(&self, name: &str) -> Option<&Integration> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// All integration names in catalog order (`all` last).
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|i| i.name()).collect()
    }

    /// Iterate over the integrations in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Integration> {
        self.entries.iter()
    }

    /// Number of integrations, including the derived `all` entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The base requirements applied regardless of integration choice.
    pub fn base(&self) -> &[Requirement] {
        &self.base
    }

    /// The PyPI distribution name used in install hints.
    pub fn distribution(&self) -> &str {
        &self.distribution
    }

    /// The pip command that installs an integration's extra.
    pub fn install_hint(&self, name: &str) -> String {
        format!("pip install {}[{}]", self.distribution, name)
    }
}

/// Assembles a [`Catalog`] from declarations.
///
/// The builder holds only named integrations; `build` derives the `all`
/// aggregate last so that late additions (project config) still satisfy
/// the invariant that every named integration is a subset of `all`.
#[derive(Debug)]
pub struct CatalogBuilder {
    distribution: String,
    base: Vec<Requirement>,
    named: Vec<Integration>,
}

impl CatalogBuilder {
    /// Create an empty builder with no base requirements.
    pub fn new() -> Self {
        Self {
            distribution: DEFAULT_DISTRIBUTION.to_string(),
            base: Vec::new(),
            named: Vec::new(),
        }
    }

    /// Create a builder pre-populated with the builtin declarations.
    pub fn builtin() -> Self {
        let mut builder = Self::new();
        builder.base = BASE_REQUIREMENTS.iter().map(|s| Requirement::new(*s)).collect();
        for (name, specs) in BUILTIN_INTEGRATIONS {
            builder = builder.integration(
                *name,
                specs.iter().map(|s| Requirement::new(*s)).collect(),
            );
        }
        builder
    }

    /// Override the distribution name used in install hints.
    pub fn distribution(mut self, name: impl Into<String>) -> Self {
        self.distribution = name.into();
        self
    }

    /// Set the base requirement list.
    pub fn base(mut self, requirements: Vec<Requirement>) -> Self {
        self.base = requirements;
        self
    }

    /// Declare a named integration.
    ///
    /// A declaration with an already-known name replaces the earlier one in
    /// place, keeping its position in declaration order. The name `all` is
    /// reserved for the derived aggregate; config validation rejects it
    /// before it can reach this builder.
    pub fn integration(mut self, name: impl Into<String>, requirements: Vec<Requirement>) -> Self {
        let name = name.into();
        debug_assert_ne!(name, ALL_INTEGRATION, "the 'all' integration is derived");
        if let Some(existing) = self.named.iter_mut().find(|i| i.name() == name) {
            *existing = Integration::new(name, requirements);
        } else {
            self.named.push(Integration::new(name, requirements));
        }
        self
    }

    /// Merge project-specific integrations from config.
    ///
    /// Entries are applied in name order so assembly is deterministic
    /// regardless of map iteration order. A custom entry with a builtin
    /// name replaces the builtin declaration.
    pub fn with_custom(mut self, custom: &HashMap<String, IntegrationConfig>) -> Self {
        let mut names: Vec<&String> = custom.keys().collect();
        names.sort();
        for name in names {
            let requirements = custom[name]
                .requirements
                .iter()
                .map(Requirement::new)
                .collect();
            self = self.integration(name.clone(), requirements);
        }
        self
    }

    /// Derive the `all` aggregate and freeze the catalog.
    pub fn build(self) -> Catalog {
        let mut all = self.base.clone();
        for integration in &self.named {
            all.extend(integration.requirements().iter().cloned());
        }

        let mut entries = self.named;
        entries.push(Integration::new(ALL_INTEGRATION, all));

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, integration)| (integration.name().to_string(), i))
            .collect();

        Catalog {
            distribution: self.distribution,
            base: self.base,
            entries,
            index,
        }
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
