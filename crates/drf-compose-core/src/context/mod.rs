//! Template contexts for generated project files
//!
//! Each context is derived from an already validated node and serialised
//! into a Tera context by the renderer.

mod fields;

pub use fields::{
    normalize_field_type, python_expr, python_repr, quote_option_value, STRING_OPTIONS,
};

use crate::error::{Error, Result};
use crate::types::{AppSpec, AuthAppSpec, ComposeDescription, ModelSpec};
use serde::Serialize;
use serde_json::Value;

/// Python package all generated applications live in
pub const APPS_PACKAGE: &str = "apps";

/// `include` entry that turns on token authentication
const TOKEN_AUTH_INCLUDE: &str = "jwt";

/// Qualify an application name with the apps package, e.g. `apps.post`
pub fn qualify_app_name(app_name: &str) -> String {
    format!("{APPS_PACKAGE}.{app_name}")
}

/// Whether the opaque `include` value asks for token authentication.
///
/// Accepts `"jwt"`, a sequence containing `"jwt"`, or a mapping with a
/// `jwt` key.
pub fn wants_token_auth(include: Option<&Value>) -> bool {
    let is_jwt = |text: &str| text.eq_ignore_ascii_case(TOKEN_AUTH_INCLUDE);
    match include {
        Some(Value::String(text)) => is_jwt(text),
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).any(is_jwt),
        Some(Value::Object(map)) => map.keys().any(|key| is_jwt(key)),
        _ => false,
    }
}

/// Django `AppConfig` class name for an app, as `startapp` derives it
pub fn app_config_class(app_name: &str) -> String {
    let mut class_name = String::with_capacity(app_name.len() + "Config".len());
    let mut previous_alphabetic = false;

    for c in app_name.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                class_name.extend(c.to_lowercase());
            } else {
                class_name.extend(c.to_uppercase());
            }
        } else if c != '_' {
            class_name.push(c);
        }
        previous_alphabetic = c.is_alphabetic();
    }

    class_name.push_str("Config");
    class_name
}

fn to_tera_context<T: Serialize>(value: &T) -> Result<tera::Context> {
    tera::Context::from_serialize(value).map_err(|e| Error::Template(e.to_string()))
}

/// An app whose routes are included in the project URL configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutedApp {
    pub app_name: String,
    /// Qualified module path, e.g. `apps.post`
    pub module: String,
}

impl RoutedApp {
    fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            module: qualify_app_name(app_name),
        }
    }
}

/// Context for the project level settings, urls and requirements
#[derive(Debug, Clone, Serialize)]
pub struct ProjectContext {
    pub project_name: String,

    /// Qualified app names; the auth app, when present, comes first
    pub local_apps: Vec<String>,

    /// Apps with a generated `urls.py`
    pub routed_apps: Vec<RoutedApp>,

    pub auth_app: Option<AuthAppSpec>,

    pub token_auth: bool,
}

impl ProjectContext {
    pub fn build(description: &ComposeDescription) -> Self {
        let auth_app = description.auth_app.as_ref();

        // The custom user model must be installed (and migrated) first.
        let local_apps = auth_app
            .map(|auth| qualify_app_name(&auth.app_name))
            .into_iter()
            .chain(
                description
                    .app_with_model
                    .iter()
                    .map(|app| qualify_app_name(&app.app_name)),
            )
            .collect();

        let routed_apps = auth_app
            .map(|auth| RoutedApp::new(&auth.app_name))
            .into_iter()
            .chain(
                description
                    .apps_with_models()
                    .map(|app| RoutedApp::new(&app.app_name)),
            )
            .collect();

        Self {
            project_name: description.name.clone(),
            local_apps,
            routed_apps,
            auth_app: description.auth_app.clone(),
            token_auth: wants_token_auth(description.include.as_ref()),
        }
    }

    pub fn to_tera_context(&self) -> Result<tera::Context> {
        to_tera_context(self)
    }
}

/// Context for an app's `apps.py`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfigContext {
    pub app_name: String,
    pub app_label: String,
    pub config_class: String,
}

impl AppConfigContext {
    pub fn build(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            app_label: qualify_app_name(app_name),
            config_class: app_config_class(app_name),
        }
    }

    pub fn to_tera_context(&self) -> Result<tera::Context> {
        to_tera_context(self)
    }
}

/// Context for an app's models, serializers, views, admin and urls
#[derive(Debug, Clone, Serialize)]
pub struct ModelContext {
    pub app_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelSpec>>,
}

impl ModelContext {
    pub fn build(app: &AppSpec) -> Self {
        Self {
            app_name: app.app_name.clone(),
            models: app.models.clone(),
        }
    }

    pub fn to_tera_context(&self) -> Result<tera::Context> {
        to_tera_context(self)
    }
}

/// Context for the custom user model app
#[derive(Debug, Clone, Serialize)]
pub struct AuthContext {
    pub model: AuthAppSpec,

    pub include: Option<Value>,

    pub username_field: String,

    pub token_auth: bool,
}

impl AuthContext {
    pub fn build(auth_app: &AuthAppSpec, include: Option<&Value>) -> Self {
        Self {
            model: auth_app.clone(),
            include: include.cloned(),
            username_field: auth_app.username_field().to_string(),
            token_auth: wants_token_auth(include),
        }
    }

    /// Whether the declared fields already include the username field
    pub fn declares_username_field(&self) -> bool {
        self.model
            .fields
            .iter()
            .any(|field| field.name == self.username_field)
    }

    pub fn to_tera_context(&self) -> Result<tera::Context> {
        let mut context = to_tera_context(self)?;
        context.insert("declares_username_field", &self.declares_username_field());
        Ok(context)
    }
}
