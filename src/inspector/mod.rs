//! Installed-package inspection.
//!
//! The checker never talks to the environment directly; it goes through
//! the [`PackageLister`] capability so tests can substitute a fixed set
//! instead of spawning processes.
//!
//! # Modules
//!
//! - [`pip`] - Production lister that shells out to `pip freeze`

pub mod pip;

pub use pip::PipFreeze;

use crate::error::Result;
use std::collections::HashSet;

/// Capability for discovering which packages are installed.
///
/// The result reflects the environment at the instant of the call;
/// implementations must not cache across calls, since installed packages
/// can change between checks in long-running or test processes.
pub trait PackageLister {
    /// The set of bare package names currently installed.
    fn installed_packages(&self) -> Result<HashSet<String>>;
}

/// Lister backed by a fixed set of package names.
///
/// Used by tests and dry runs where spawning the real package manager is
/// undesirable.
#[derive(Debug, Clone, Default)]
pub struct FixedLister {
    packages: HashSet<String>,
}

impl FixedLister {
    /// Create a lister that reports the given packages as installed.
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }
}

impl PackageLister for FixedLister {
    fn installed_packages(&self) -> Result<HashSet<String>> {
        Ok(self.packages.clone())
    }
}
