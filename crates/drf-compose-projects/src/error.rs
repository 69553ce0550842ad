//! Error types for drf-compose-projects

use thiserror::Error;

/// Result type alias using drf-compose-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project generation error types
#[derive(Error, Debug)]
pub enum Error {
    /// Project directory already exists
    #[error("Project folder with the specified project name ({name}) already exists at: {path}")]
    ProjectExists { name: String, path: String },

    /// External program exited unsuccessfully
    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },

    /// External program is not installed
    #[error("Required command not found: {tool}. Please ensure it is installed and in PATH")]
    ToolNotFound { tool: String },

    /// Template not found
    #[error("Template not found: {template}")]
    TemplateNotFound { template: String },

    /// Template error from Tera
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    /// Writing a generated file or directory failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Core library error
    #[error(transparent)]
    Core(#[from] drf_compose_core::Error),

    /// Embedded template is not UTF-8
    #[error("Embedded template is not valid UTF-8: {template}")]
    TemplateEncoding { template: String },
}

impl Error {
    /// Create a project exists error
    pub fn project_exists(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::ProjectExists {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create an external tool error
    pub fn external_tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a tool not found error
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a write error for a path
    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create a template not found error
    pub fn template_not_found(template: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            template: template.into(),
        }
    }

    /// Create a template encoding error
    pub fn template_encoding(template: impl Into<String>) -> Self {
        Self::TemplateEncoding {
            template: template.into(),
        }
    }
}
