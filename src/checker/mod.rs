//! Compatibility checking of integrations against the live environment.
//!
//! The [`CompatibilityChecker`] reconciles a catalog entry's requirements
//! with what the injected [`PackageLister`] reports as installed. It is a
//! pure verifier: no caching, no retries, no installation.

use crate::catalog::Catalog;
use crate::error::{PacktrainError, Result};
use crate::inspector::PackageLister;

/// Verifies that an integration's packages are installed.
pub struct CompatibilityChecker<'a> {
    catalog: &'a Catalog,
    lister: &'a dyn PackageLister,
}

impl<'a> CompatibilityChecker<'a> {
    /// Create a checker over a catalog and an installed-package source.
    pub fn new(catalog: &'a Catalog, lister: &'a dyn PackageLister) -> Self {
        Self { catalog, lister }
    }

    /// Check an integration, failing on the first missing package.
    ///
    /// The installed set is queried fresh on every call. Errors:
    /// [`PacktrainError::UnknownIntegration`] when the name is not in the
    /// catalog (the message lists every valid name),
    /// [`PacktrainError::MissingDependency`] for the first requirement
    /// whose bare package name is absent, and
    /// [`PacktrainError::EnvironmentQuery`] when the installed set cannot
    /// be determined.
    pub fn check(&self, name: &str) -> Result<()> {
        let integration = self.lookup(name)?;
        let installed = self.lister.installed_packages()?;

        for req in integration.requirements() {
            let package = self.package_of(name, req)?;
            if !installed.contains(package) {
                tracing::debug!("integration '{}' is missing '{}'", name, package);
                return Err(PacktrainError::MissingDependency {
                    integration: name.to_string(),
                    package: package.to_string(),
                    distribution: self.catalog.distribution().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Collect every missing package for an integration.
    ///
    /// Companion to [`check`](Self::check) for callers that want the full
    /// gap in one pass rather than fixing one package at a time. Returns
    /// bare package names in requirement order, without duplicates; an
    /// empty list means the integration is fully installed.
    pub fn missing(&self, name: &str) -> Result<Vec<String>> {
        let integration = self.lookup(name)?;
        let installed = self.lister.installed_packages()?;

        let mut missing = Vec::new();
        for req in integration.requirements() {
            let package = self.package_of(name, req)?;
            if !installed.contains(package) && !missing.iter().any(|m| m == package) {
                missing.push(package.to_string());
            }
        }
        Ok(missing)
    }

    fn lookup(&self, name: &str) -> Result<&crate::catalog::Integration> {
        self.catalog
            .get(name)
            .ok_or_else(|| PacktrainError::UnknownIntegration {
                name: name.to_string(),
                known: self.catalog.names().iter().map(|n| n.to_string()).collect(),
            })
    }

    fn package_of<'r>(
        &self,
        name: &str,
        req: &'r crate::catalog::Requirement,
    ) -> Result<&'r str> {
        req.package_name()
            .ok_or_else(|| PacktrainError::InvalidRequirement {
                integration: name.to_string(),
                spec: req.spec().to_string(),
            })
    }
}
