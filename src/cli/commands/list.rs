//! List command implementation.
//!
//! The `packtrain list` command enumerates the integration catalog: each
//! integration's name, its dependency list, and the pip command that
//! installs it.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::cli::args::ListArgs;
use crate::config::{load_config, load_config_file, PacktrainConfig};
use crate::error::Result;
use crate::report::{describe_catalog, CatalogEntry};
use crate::ui::theme::PacktrainTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, config_path: Option<PathBuf>, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path,
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn catalog(&self) -> Result<Catalog> {
        let config = match &self.config_path {
            Some(path) => Some(load_config_file(path)?),
            None => load_config(&self.project_root)?,
        };
        Ok(config
            .as_ref()
            .map(PacktrainConfig::catalog)
            .unwrap_or_else(Catalog::builtin))
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let catalog = self.catalog()?;

        if self.args.json {
            let entries: Vec<CatalogEntry<'_>> = describe_catalog(&catalog).collect();
            let rendered = serde_json::to_string_pretty(&entries).map_err(anyhow::Error::from)?;
            ui.message(&rendered);
            return Ok(CommandResult::success());
        }

        let theme = PacktrainTheme::new();

        ui.message(&format!("  {}", theme.key.apply_to("Integrations:")));
        for entry in describe_catalog(&catalog) {
            let count = entry.requirements.len();
            ui.message(&format!(
                "    {} {}",
                theme.highlight.apply_to(entry.name),
                theme.dim.apply_to(format!(
                    "({} package{})",
                    count,
                    if count == 1 { "" } else { "s" }
                )),
            ));
            for req in entry.requirements {
                ui.message(&format!("      {}", theme.dim.apply_to(req.spec())));
            }
            ui.message(&format!(
                "      {} {}",
                theme.dim.apply_to("To install:"),
                theme.command.apply_to(&entry.install_hint),
            ));
        }

        Ok(CommandResult::success())
    }
}
