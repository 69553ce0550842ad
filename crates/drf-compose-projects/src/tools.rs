//! External program invocation
//!
//! Runs the project/app scaffolding program and the code formatter. Each
//! call is awaited to completion and its exit status is checked.

use crate::error::{Error, Result};
use camino::Utf8Path;
use drf_compose_core::GeneratorConfig;
use tokio::process::Command;
use tracing::debug;

/// Scaffolding and formatting programs configured for a run
#[derive(Debug)]
pub struct ExternalTools<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ExternalTools<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// `<django_admin> startproject <name> <dir>`
    pub async fn start_project(&self, name: &str, dir: &Utf8Path) -> Result<()> {
        if self.config.skip_scaffold {
            debug!("Skipping startproject for {}", name);
            return Ok(());
        }
        debug!("Scaffolding project {} in {}", name, dir);
        run(&self.config.django_admin, &["startproject", name, dir.as_str()]).await
    }

    /// `<django_admin> startapp <name> <dir>`
    pub async fn start_app(&self, name: &str, dir: &Utf8Path) -> Result<()> {
        if self.config.skip_scaffold {
            debug!("Skipping startapp for {}", name);
            return Ok(());
        }
        debug!("Scaffolding app {} in {}", name, dir);
        run(&self.config.django_admin, &["startapp", name, dir.as_str()]).await
    }

    /// `<formatter> <dir> -q`
    ///
    /// Returns `false` when formatting was skipped or the formatter is not
    /// installed.
    pub async fn format(&self, dir: &Utf8Path) -> Result<bool> {
        if self.config.skip_format {
            debug!("Skipping formatter");
            return Ok(false);
        }
        if !is_command_available(&self.config.formatter) {
            debug!(
                "{} not found, generated code is left unformatted",
                self.config.formatter
            );
            return Ok(false);
        }
        debug!("Formatting {} with {}", dir, self.config.formatter);
        run(&self.config.formatter, &[dir.as_str(), "-q"]).await?;
        Ok(true)
    }
}

/// Check if a command is available in PATH
pub fn is_command_available(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

async fn run(program: &str, args: &[&str]) -> Result<()> {
    let resolved = which::which(program).map_err(|_| Error::tool_not_found(program))?;

    debug!("Running: {} {}", program, args.join(" "));
    let output = Command::new(&resolved)
        .args(args)
        .output()
        .await
        .map_err(|e| Error::external_tool(program, e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        return Err(Error::external_tool(
            program,
            if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                format!("exited with {}: {}", output.status, stderr)
            },
        ));
    }

    Ok(())
}
