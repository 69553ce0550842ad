//! Generate command

use crate::cli::Cli;
use crate::output;
use anyhow::{Context, Result};
use drf_compose_core::{validate, ComposeSource};
use drf_compose_projects::ProjectGenerator;
use tracing::debug;

pub async fn run(cli: &Cli) -> Result<()> {
    let source = ComposeSource::new(cli.source.clone(), cli.format());

    let value = source
        .load()
        .with_context(|| format!("Failed to load {}", source.path()))?;
    let description = validate(&value).context("Invalid compose file")?;
    debug!(
        "Validated {} with {} app(s)",
        source.path(),
        description.app_with_model.len()
    );

    let config = cli.generator_config();
    let generator = ProjectGenerator::new(&config)?;

    if !cli.quiet {
        output::header(&format!("Generating {}", description.name));
    }

    // Spinner and -v log output share stderr
    let spinner =
        (!cli.quiet && cli.verbose == 0).then(|| output::spinner("Writing project files..."));
    let result = generator.generate(&description, &source.dir()).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let project = result.with_context(|| format!("Failed to generate {}", description.name))?;

    if !cli.quiet {
        output::success(&format!("Project {} created", description.name));
        output::kv("Location", project.project_dir.as_str());
        output::kv("Files", &project.files.len().to_string());
        if !project.formatted && !config.skip_format {
            output::warning(&format!(
                "{} did not run, generated code is unformatted",
                config.formatter
            ));
        }
    }

    Ok(())
}
