//! Compose file loading and parsing
//!
//! The compose file is parsed into an untyped `serde_json::Value` first so
//! the schema validator can report missing keys in a fixed order with its
//! own messages. YAML input is converted into the same value model.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use std::fmt;
use std::fs;
use tracing::debug;

/// Default compose file name, looked up relative to the working directory
pub const DEFAULT_COMPOSE_FILE: &str = "drf-compose.json";

/// Syntax of a compose file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeFormat {
    #[default]
    Json,
    Yaml,
}

impl ComposeFormat {
    /// Select the format from the `--yaml` flag
    pub fn from_yaml_flag(yaml: bool) -> Self {
        if yaml {
            Self::Yaml
        } else {
            Self::Json
        }
    }
}

impl fmt::Display for ComposeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Parse compose file content in the given format
pub fn parse_compose(content: &str, format: ComposeFormat) -> Result<Value> {
    let value = match format {
        ComposeFormat::Json => serde_json::from_str(content)?,
        ComposeFormat::Yaml => serde_yaml_ng::from_str(content)?,
    };
    Ok(value)
}

/// A compose file on disk
#[derive(Debug, Clone)]
pub struct ComposeSource {
    path: Utf8PathBuf,
    format: ComposeFormat,
}

impl ComposeSource {
    pub fn new(path: impl Into<Utf8PathBuf>, format: ComposeFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn format(&self) -> ComposeFormat {
        self.format
    }

    /// Directory the generated project is placed in by default
    pub fn dir(&self) -> Utf8PathBuf {
        self.path
            .parent()
            .map(|p| p.to_owned())
            .unwrap_or_else(|| Utf8PathBuf::from("."))
    }

    /// Read and parse the compose file
    pub fn load(&self) -> Result<Value> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::compose_not_found(self.path.as_str())
            } else {
                Error::Io(e)
            }
        })?;

        debug!("Parsing {} as {}", self.path, self.format);
        parse_compose(&content, self.format)
    }
}
