//! Catalog enumeration for human and machine inspection.
//!
//! Presentation-only: the entries produced here carry everything a caller
//! needs to render one block per integration (name, dependency list,
//! install hint). Rendering goes through the UI sink in the CLI layer.

use crate::catalog::{Catalog, Requirement};
use serde::Serialize;

/// One integration as presented by `packtrain list`.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry<'a> {
    /// Integration name.
    pub name: &'a str,
    /// Requirement specifiers in declaration order.
    #[serde(serialize_with = "specs")]
    pub requirements: &'a [Requirement],
    /// The pip command that installs this integration's extra.
    pub install_hint: String,
}

fn specs<S>(requirements: &&[Requirement], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(requirements.iter().map(Requirement::spec))
}

/// Enumerate the catalog lazily, in catalog order.
///
/// The iterator is finite and restartable: it borrows the immutable
/// catalog, so calling this again yields the identical sequence.
pub fn describe_catalog(catalog: &Catalog) -> impl Iterator<Item = CatalogEntry<'_>> {
    catalog.iter().map(move |integration| CatalogEntry {
        name: integration.name(),
        requirements: integration.requirements(),
        install_hint: catalog.install_hint(integration.name()),
    })
}
