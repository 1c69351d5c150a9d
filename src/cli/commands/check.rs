//! Check command implementation.
//!
//! The `packtrain check` command verifies that an integration's packages
//! are present in the active Python environment. Exit codes: 0 when
//! satisfied, 1 on a missing dependency or environment failure, 2 when
//! the integration name is unknown.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::Catalog;
use crate::checker::CompatibilityChecker;
use crate::cli::args::CheckArgs;
use crate::config::{load_config, load_config_file, PacktrainConfig};
use crate::error::{PacktrainError, Result};
use crate::inspector::pip::{DEFAULT_PYTHON, DEFAULT_TIMEOUT};
use crate::inspector::PipFreeze;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config_path: Option<PathBuf>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path,
            args,
        }
    }

    fn load_config(&self) -> Result<Option<PacktrainConfig>> {
        match &self.config_path {
            Some(path) => load_config_file(path).map(Some),
            None => load_config(&self.project_root),
        }
    }

    fn resolve_lister(&self, config: Option<&PacktrainConfig>) -> PipFreeze {
        let python = self
            .args
            .python
            .clone()
            .or_else(|| config.and_then(|c| c.python.clone()))
            .unwrap_or_else(|| DEFAULT_PYTHON.to_string());
        let timeout = self
            .args
            .timeout
            .map(Duration::from_secs)
            .or_else(|| config.and_then(|c| c.timeout()))
            .unwrap_or(DEFAULT_TIMEOUT);
        PipFreeze::new(python, timeout)
    }

    fn execute_json(
        &self,
        checker: &CompatibilityChecker<'_>,
        catalog: &Catalog,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let name = &self.args.integration;
        match checker.missing(name) {
            Ok(missing) => {
                let satisfied = missing.is_empty();
                let payload = serde_json::json!({
                    "integration": name,
                    "satisfied": satisfied,
                    "missing": missing,
                    "install_hint": catalog.install_hint(name),
                });
                let rendered =
                    serde_json::to_string_pretty(&payload).map_err(anyhow::Error::from)?;
                ui.message(&rendered);
                if satisfied {
                    Ok(CommandResult::success())
                } else {
                    Ok(CommandResult::failure(1))
                }
            }
            Err(e @ PacktrainError::UnknownIntegration { .. }) => {
                ui.error(&e.to_string());
                Ok(CommandResult::failure(2))
            }
            Err(e) => Err(e),
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.load_config()?;
        let catalog = config
            .as_ref()
            .map(PacktrainConfig::catalog)
            .unwrap_or_else(Catalog::builtin);

        let lister = self.resolve_lister(config.as_ref());
        let checker = CompatibilityChecker::new(&catalog, &lister);
        let name = &self.args.integration;

        if self.args.json {
            return self.execute_json(&checker, &catalog, ui);
        }

        if ui.output_mode().shows_detail() {
            if let Some(integration) = catalog.get(name) {
                for req in integration.requirements() {
                    ui.message(&format!("  requires {}", req));
                }
            }
        }

        let mut spinner = ui.start_spinner(&format!(
            "Checking integration '{}' with {}",
            name,
            lister.python()
        ));

        if self.args.full {
            match checker.missing(name) {
                Ok(missing) if missing.is_empty() => {
                    spinner.finish_success(&format!("Integration '{}' is ready", name));
                    Ok(CommandResult::success())
                }
                Ok(missing) => {
                    spinner.finish_error(&format!(
                        "Integration '{}' is missing {} package{}",
                        name,
                        missing.len(),
                        if missing.len() == 1 { "" } else { "s" },
                    ));
                    for package in &missing {
                        ui.message(&format!("  - {}", package));
                    }
                    ui.message(&format!("To install: {}", catalog.install_hint(name)));
                    Ok(CommandResult::failure(1))
                }
                Err(e) => self.fail(spinner.as_mut(), ui, e),
            }
        } else {
            match checker.check(name) {
                Ok(()) => {
                    spinner.finish_success(&format!("Integration '{}' is ready", name));
                    Ok(CommandResult::success())
                }
                Err(e) => self.fail(spinner.as_mut(), ui, e),
            }
        }
    }
}

impl CheckCommand {
    fn fail(
        &self,
        spinner: &mut dyn crate::ui::SpinnerHandle,
        ui: &mut dyn UserInterface,
        err: PacktrainError,
    ) -> Result<CommandResult> {
        match err {
            e @ PacktrainError::UnknownIntegration { .. } => {
                spinner.finish_error(&format!(
                    "No integration named '{}'",
                    self.args.integration
                ));
                ui.error(&e.to_string());
                Ok(CommandResult::failure(2))
            }
            e @ PacktrainError::MissingDependency { .. } => {
                spinner.finish_error(&format!(
                    "Integration '{}' is not installed",
                    self.args.integration
                ));
                ui.error(&e.to_string());
                Ok(CommandResult::failure(1))
            }
            e => {
                spinner.finish_error(&format!(
                    "Could not check integration '{}'",
                    self.args.integration
                ));
                Err(e)
            }
        }
    }
}
