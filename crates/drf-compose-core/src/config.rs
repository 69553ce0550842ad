//! Generator configuration
//!
//! Built once at process start (from CLI flags and environment) and passed
//! by reference to the project generator.

use camino::{Utf8Path, Utf8PathBuf};

/// Default project/app scaffolding program
pub const DEFAULT_DJANGO_ADMIN: &str = "django-admin";

/// Default code formatter
pub const DEFAULT_FORMATTER: &str = "black";

/// Settings for a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Program invoked as `<django_admin> startproject|startapp`
    pub django_admin: String,

    /// Program invoked as `<formatter> <project_dir> -q`
    pub formatter: String,

    /// Create package directories without invoking `django_admin`
    pub skip_scaffold: bool,

    /// Do not run the formatter after rendering
    pub skip_format: bool,

    /// Directory the project is created in; defaults to the compose file's directory
    pub output_dir: Option<Utf8PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            django_admin: DEFAULT_DJANGO_ADMIN.to_string(),
            formatter: DEFAULT_FORMATTER.to_string(),
            skip_scaffold: false,
            skip_format: false,
            output_dir: None,
        }
    }
}

impl GeneratorConfig {
    /// Configuration that only renders templates, without external tools
    pub fn offline() -> Self {
        Self {
            skip_scaffold: true,
            skip_format: true,
            ..Self::default()
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Directory a project named `project_name` is created in
    pub fn project_dir(&self, source_dir: &Utf8Path, project_name: &str) -> Utf8PathBuf {
        self.output_dir
            .as_deref()
            .unwrap_or(source_dir)
            .join(project_name)
    }
}
