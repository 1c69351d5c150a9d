//! Named integration groups.

use super::requirement::Requirement;

/// A named, immutable group of package requirements enabling one optional
/// feature area of the pipeline SDK.
#[derive(Debug, Clone)]
pub struct Integration {
    name: String,
    requirements: Vec<Requirement>,
}

impl Integration {
    /// Create an integration from a name and its ordered requirement list.
    ///
    /// Duplicates in the list are preserved; the aggregate entry relies on
    /// additive composition rather than set semantics.
    pub fn new(name: impl Into<String>, requirements: Vec<Requirement>) -> Self {
        Self {
            name: name.into(),
            requirements,
        }
    }

    /// The integration's unique name within the catalog.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered requirement list.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_holds_name_and_requirements() {
        let integration = Integration::new(
            "aws",
            vec![Requirement::new("boto3==1.16.62")],
        );
        assert_eq!(integration.name(), "aws");
        assert_eq!(integration.requirements().len(), 1);
        assert_eq!(integration.requirements()[0].spec(), "boto3==1.16.62");
    }

    #[test]
    fn empty_requirement_list_is_allowed() {
        let integration = Integration::new("bare", Vec::new());
        assert!(integration.requirements().is_empty());
    }

    #[test]
    fn duplicate_requirements_are_preserved() {
        let integration = Integration::new(
            "dup",
            vec![
                Requirement::new("apache-beam==2.28.0"),
                Requirement::new("apache-beam==2.28.0"),
            ],
        );
        assert_eq!(integration.requirements().len(), 2);
    }
}
