//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::Parser;
use drf_compose_core::compose::DEFAULT_COMPOSE_FILE;
use drf_compose_core::config::{DEFAULT_DJANGO_ADMIN, DEFAULT_FORMATTER};
use drf_compose_core::{ComposeFormat, GeneratorConfig};

/// drf-compose - Generate a Django REST framework project from a compose file
#[derive(Parser, Debug)]
#[command(name = "drf-compose")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the compose file
    #[arg(short, long, default_value = DEFAULT_COMPOSE_FILE, value_parser = existing_file)]
    pub source: Utf8PathBuf,

    /// Parse the compose file as YAML instead of JSON
    #[arg(long)]
    pub yaml: bool,

    /// Create the project here instead of next to the compose file
    #[arg(short, long)]
    pub output_dir: Option<Utf8PathBuf>,

    /// Program used for `startproject` and `startapp`
    #[arg(long, env = "DRF_COMPOSE_DJANGO_ADMIN", default_value = DEFAULT_DJANGO_ADMIN)]
    pub django_admin: String,

    /// Program used to format the generated code
    #[arg(long, env = "DRF_COMPOSE_FORMATTER", default_value = DEFAULT_FORMATTER)]
    pub formatter: String,

    /// Create package directories without running the scaffolding program
    #[arg(long)]
    pub skip_scaffold: bool,

    /// Leave the generated code unformatted
    #[arg(long)]
    pub no_format: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn format(&self) -> ComposeFormat {
        ComposeFormat::from_yaml_flag(self.yaml)
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            django_admin: self.django_admin.clone(),
            formatter: self.formatter.clone(),
            skip_scaffold: self.skip_scaffold,
            skip_format: self.no_format,
            output_dir: self.output_dir.clone(),
        }
    }
}

fn existing_file(value: &str) -> Result<Utf8PathBuf, String> {
    let path = Utf8PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("compose file not found: {}", path))
    }
}
