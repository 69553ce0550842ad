//! Project generation
//!
//! Turns a validated compose description into a project directory:
//! scaffold the project, render project level files, then every app, then
//! the auth app, and finally run the formatter. Output is not rolled back
//! when a later step fails.

use crate::error::{Error, Result};
use crate::templates::{Template, TemplateRegistry, AUTH_TEMPLATES, MODEL_TEMPLATES};
use crate::tools::ExternalTools;
use camino::{Utf8Path, Utf8PathBuf};
use drf_compose_core::context::{
    AppConfigContext, AuthContext, ModelContext, ProjectContext, APPS_PACKAGE,
};
use drf_compose_core::{AppSpec, AuthAppSpec, ComposeDescription, GeneratorConfig};
use rand::Rng;
use std::fs;
use tera::Context;
use tracing::debug;

/// Characters Django draws secret keys from
const SECRET_KEY_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*(-_=+)";

const SECRET_KEY_LENGTH: usize = 50;

/// Generate a random Django secret key
pub fn generate_secret_key() -> String {
    let mut rng = rand::rng();
    (0..SECRET_KEY_LENGTH)
        .map(|_| SECRET_KEY_CHARS[rng.random_range(0..SECRET_KEY_CHARS.len())] as char)
        .collect()
}

/// Result of a successful generation run
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    /// Root directory of the generated project
    pub project_dir: Utf8PathBuf,

    /// Rendered files, in the order they were written
    pub files: Vec<Utf8PathBuf>,

    /// Whether the formatter ran over the project
    pub formatted: bool,
}

/// Generates a Django REST framework project from a compose description
pub struct ProjectGenerator<'a> {
    config: &'a GeneratorConfig,
    registry: TemplateRegistry,
    tools: ExternalTools<'a>,
}

impl<'a> ProjectGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Result<Self> {
        Ok(Self {
            config,
            registry: TemplateRegistry::new()?,
            tools: ExternalTools::new(config),
        })
    }

    /// Generate the project next to the compose file in `source_dir`
    /// (or in the configured output directory).
    pub async fn generate(
        &self,
        description: &ComposeDescription,
        source_dir: &Utf8Path,
    ) -> Result<GeneratedProject> {
        let project_name = description.name.as_str();
        let project_dir = self.config.project_dir(source_dir, project_name);

        if project_dir.exists() {
            return Err(Error::project_exists(project_name, project_dir.as_str()));
        }

        debug!("Generating project {} in {}", project_name, project_dir);
        let mut files = Vec::new();

        create_dir(&project_dir)?;
        self.tools.start_project(project_name, &project_dir).await?;

        self.write_project_files(description, &project_dir, &mut files)?;

        let apps_dir = project_dir.join(APPS_PACKAGE);
        create_package(&apps_dir)?;

        for app in &description.app_with_model {
            self.write_app(app, &apps_dir, &mut files).await?;
        }

        if let Some(auth_app) = &description.auth_app {
            self.write_auth_app(auth_app, description, &apps_dir, &mut files)
                .await?;
        }

        let formatted = self.tools.format(&project_dir).await?;

        debug!("Generated {} file(s) for {}", files.len(), project_name);
        Ok(GeneratedProject {
            project_dir,
            files,
            formatted,
        })
    }

    fn write_project_files(
        &self,
        description: &ComposeDescription,
        project_dir: &Utf8Path,
        files: &mut Vec<Utf8PathBuf>,
    ) -> Result<()> {
        let mut context = ProjectContext::build(description).to_tera_context()?;
        context.insert("secret_key", &generate_secret_key());

        let package_dir = project_dir.join(&description.name);
        create_package(&package_dir)?;

        self.render_to(Template::ProjectSettings, &context, &package_dir, files)?;
        self.render_to(Template::ProjectUrls, &context, &package_dir, files)?;
        self.render_to(Template::Requirements, &context, project_dir, files)
    }

    async fn write_app(
        &self,
        app: &AppSpec,
        apps_dir: &Utf8Path,
        files: &mut Vec<Utf8PathBuf>,
    ) -> Result<()> {
        let app_dir = self.scaffold_app(&app.app_name, apps_dir).await?;

        let config_context = AppConfigContext::build(&app.app_name).to_tera_context()?;
        self.render_to(Template::AppConfig, &config_context, &app_dir, files)?;

        if !app.has_models() {
            debug!("App {} has no models, skipping model files", app.app_name);
            return Ok(());
        }

        let context = ModelContext::build(app).to_tera_context()?;
        for template in MODEL_TEMPLATES {
            self.render_to(template, &context, &app_dir, files)?;
        }
        Ok(())
    }

    async fn write_auth_app(
        &self,
        auth_app: &AuthAppSpec,
        description: &ComposeDescription,
        apps_dir: &Utf8Path,
        files: &mut Vec<Utf8PathBuf>,
    ) -> Result<()> {
        let app_dir = self.scaffold_app(&auth_app.app_name, apps_dir).await?;

        let context =
            AuthContext::build(auth_app, description.include.as_ref()).to_tera_context()?;
        for template in AUTH_TEMPLATES {
            self.render_to(template, &context, &app_dir, files)?;
        }

        let config_context = AppConfigContext::build(&auth_app.app_name).to_tera_context()?;
        self.render_to(Template::AppConfig, &config_context, &app_dir, files)
    }

    /// Create an app directory, running `startapp` only when it is new
    async fn scaffold_app(&self, app_name: &str, apps_dir: &Utf8Path) -> Result<Utf8PathBuf> {
        let app_dir = apps_dir.join(app_name);
        if !app_dir.exists() {
            create_dir(&app_dir)?;
            self.tools.start_app(app_name, &app_dir).await?;
        }
        create_package(&app_dir)?;
        Ok(app_dir)
    }

    fn render_to(
        &self,
        template: Template,
        context: &Context,
        dir: &Utf8Path,
        files: &mut Vec<Utf8PathBuf>,
    ) -> Result<()> {
        let path = dir.join(template.file_name());
        let content = self.registry.render(template, context)?;

        fs::write(&path, content).map_err(|e| Error::write(path.as_str(), e))?;
        debug!("Wrote {}", path);

        files.push(path);
        Ok(())
    }
}

fn create_dir(dir: &Utf8Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::write(dir.as_str(), e))
}

/// Make `dir` an importable Python package
fn create_package(dir: &Utf8Path) -> Result<()> {
    create_dir(dir)?;
    let init = dir.join("__init__.py");
    if !init.exists() {
        fs::write(&init, "").map_err(|e| Error::write(init.as_str(), e))?;
    }
    Ok(())
}
