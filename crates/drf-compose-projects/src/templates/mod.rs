//! Template registry for generated project files
//!
//! Templates are embedded at compile time from `templates/` and rendered
//! with Tera. Python-specific formatting is done by the filters in
//! [`filters`].

mod filters;

use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use tera::{Context, Tera};
use tracing::debug;

/// Embedded Tera templates
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates/"]
struct ProjectTemplates;

/// A template and the file it produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    ProjectSettings,
    ProjectUrls,
    Requirements,
    AppConfig,
    AppModels,
    AppSerializers,
    AppViews,
    AppAdmin,
    AppUrls,
    AuthModels,
    AuthManager,
    AuthSerializers,
    AuthViews,
    AuthAdmin,
    AuthUrls,
}

/// Files rendered for an app that declares models
pub const MODEL_TEMPLATES: [Template; 5] = [
    Template::AppModels,
    Template::AppSerializers,
    Template::AppViews,
    Template::AppAdmin,
    Template::AppUrls,
];

/// Files rendered for the custom user model app
pub const AUTH_TEMPLATES: [Template; 6] = [
    Template::AuthModels,
    Template::AuthManager,
    Template::AuthSerializers,
    Template::AuthViews,
    Template::AuthAdmin,
    Template::AuthUrls,
];

impl Template {
    /// Embedded template name
    pub fn name(self) -> &'static str {
        match self {
            Self::ProjectSettings => "project/settings.py.tera",
            Self::ProjectUrls => "project/urls.py.tera",
            Self::Requirements => "project/requirements.txt.tera",
            Self::AppConfig => "app/apps.py.tera",
            Self::AppModels => "app/models.py.tera",
            Self::AppSerializers => "app/serializers.py.tera",
            Self::AppViews => "app/views.py.tera",
            Self::AppAdmin => "app/admin.py.tera",
            Self::AppUrls => "app/urls.py.tera",
            Self::AuthModels => "auth_app/models.py.tera",
            Self::AuthManager => "auth_app/manager.py.tera",
            Self::AuthSerializers => "auth_app/serializers.py.tera",
            Self::AuthViews => "auth_app/views.py.tera",
            Self::AuthAdmin => "auth_app/admin.py.tera",
            Self::AuthUrls => "auth_app/urls.py.tera",
        }
    }

    /// Name of the generated file inside its package directory
    pub fn file_name(self) -> &'static str {
        match self {
            Self::ProjectSettings => "settings.py",
            Self::ProjectUrls | Self::AppUrls | Self::AuthUrls => "urls.py",
            Self::Requirements => "requirements.txt",
            Self::AppConfig => "apps.py",
            Self::AppModels | Self::AuthModels => "models.py",
            Self::AppSerializers | Self::AuthSerializers => "serializers.py",
            Self::AppViews | Self::AuthViews => "views.py",
            Self::AppAdmin | Self::AuthAdmin => "admin.py",
            Self::AuthManager => "manager.py",
        }
    }
}

/// Tera instance loaded with every embedded template and the Python filters
pub struct TemplateRegistry {
    tera: Tera,
}

impl TemplateRegistry {
    /// Create a new template registry with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.register_filter("clean_field_type", filters::clean_field_type_filter);
        tera.register_filter("clean_option", filters::clean_option_filter);
        tera.register_filter("py_repr", filters::py_repr_filter);

        let mut templates = Vec::new();
        for file in ProjectTemplates::iter() {
            if let Some(content) = ProjectTemplates::get(&file) {
                let content = String::from_utf8(content.data.into_owned())
                    .map_err(|_| Error::template_encoding(file.to_string()))?;
                debug!("Loading embedded template: {}", file);
                templates.push((file.to_string(), content));
            }
        }
        tera.add_raw_templates(templates)?;

        Ok(Self { tera })
    }

    /// Render a template with the given context
    pub fn render(&self, template: Template, context: &Context) -> Result<String> {
        let name = template.name();
        if !self.tera.get_template_names().any(|n| n == name) {
            return Err(Error::template_not_found(name));
        }
        debug!("Rendering template: {}", name);
        Ok(self.tera.render(name, context)?)
    }

    /// Names of all loaded templates
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}
