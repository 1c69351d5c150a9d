//! Installed-package discovery via `pip freeze`.
//!
//! Spawns `<python> -m pip freeze` with captured stdio and a bounded
//! deadline, then parses the `name==version` lines into a set of bare
//! package names. Every failure mode — spawn error, non-zero exit,
//! timeout, unparsable output — surfaces as
//! [`PacktrainError::EnvironmentQuery`].

use crate::error::{PacktrainError, Result};
use crate::inspector::PackageLister;
use std::collections::HashSet;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Default Python interpreter used to reach pip.
pub const DEFAULT_PYTHON: &str = "python3";

/// Default deadline for the freeze invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Interval between child exit polls while waiting on the deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Production [`PackageLister`] backed by `pip freeze`.
#[derive(Debug, Clone)]
pub struct PipFreeze {
    python: String,
    timeout: Duration,
}

impl PipFreeze {
    /// Create a lister for the given interpreter and deadline.
    pub fn new(python: impl Into<String>, timeout: Duration) -> Self {
        Self {
            python: python.into(),
            timeout,
        }
    }

    /// The interpreter this lister invokes.
    pub fn python(&self) -> &str {
        &self.python
    }

    fn freeze_output(&self) -> Result<String> {
        tracing::debug!("running `{} -m pip freeze`", self.python);

        let mut child = Command::new(&self.python)
            .args(["-m", "pip", "freeze"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PacktrainError::EnvironmentQuery {
                message: format!("failed to run `{} -m pip freeze`: {}", self.python, e),
            })?;

        let stdout = child.stdout.take().unwrap();
        let stderr = child.stderr.take().unwrap();

        let stdout_handle = thread::spawn(move || {
            let mut buf = String::new();
            let mut reader = stdout;
            reader.read_to_string(&mut buf).map(|_| buf)
        });
        let stderr_handle = thread::spawn(move || {
            let mut buf = String::new();
            let mut reader = stderr;
            reader.read_to_string(&mut buf).map(|_| buf)
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(PacktrainError::EnvironmentQuery {
                            message: format!(
                                "`{} -m pip freeze` timed out after {:.0?}",
                                self.python, self.timeout
                            ),
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    return Err(PacktrainError::EnvironmentQuery {
                        message: format!("failed waiting on `{} -m pip freeze`: {}", self.python, e),
                    });
                }
            }
        };

        let stdout = stdout_handle.join().unwrap_or_else(|_| Ok(String::new()))?;
        let stderr = stderr_handle.join().unwrap_or_else(|_| Ok(String::new()))?;

        if !status.success() {
            let detail = stderr.trim();
            return Err(PacktrainError::EnvironmentQuery {
                message: format!(
                    "`{} -m pip freeze` exited with {}{}{}",
                    self.python,
                    status
                        .code()
                        .map_or_else(|| "signal".to_string(), |c| format!("code {}", c)),
                    if detail.is_empty() { "" } else { ": " },
                    detail,
                ),
            });
        }

        Ok(stdout)
    }
}

impl Default for PipFreeze {
    fn default() -> Self {
        Self::new(DEFAULT_PYTHON, DEFAULT_TIMEOUT)
    }
}

impl PackageLister for PipFreeze {
    fn installed_packages(&self) -> Result<HashSet<String>> {
        let output = self.freeze_output()?;
        parse_freeze_output(&output)
    }
}

/// Parse `pip freeze` output into a set of bare package names.
///
/// Each non-empty line must have the `name==version` shape; anything else
/// (editable installs, direct URL references) means the environment cannot
/// be verified and is reported as a query failure rather than silently
/// skipped.
pub fn parse_freeze_output(output: &str) -> Result<HashSet<String>> {
    let mut packages = HashSet::new();
    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once("==") {
            Some((name, _version)) if !name.trim().is_empty() => {
                packages.insert(name.trim().to_string());
            }
            _ => {
                return Err(PacktrainError::EnvironmentQuery {
                    message: format!("unexpected line in pip freeze output: '{}'", line),
                });
            }
        }
    }
    Ok(packages)
}
