//! Required-key validation for compose descriptions
//!
//! The walk is top-down and left-to-right and stops at the first failure:
//! root keys, every app name, each app's models and their fields, then the
//! auth app. A description that passes comes back as typed nodes.

use crate::error::{Error, Result};
use crate::types::{AppSpec, AuthAppSpec, ComposeDescription, FieldSpec, ModelSpec};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Container type a required value must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    List,
    Mapping,
    String,
}

impl Expected {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::List => value.is_array(),
            Self::Mapping => value.is_object(),
            Self::String => value.is_string(),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Mapping => write!(f, "mapping"),
            Self::String => write!(f, "string"),
        }
    }
}

const PROJECT_NAME_REQUIRED: &str = "project name is required";
const MODEL_NAME_REQUIRED: &str = "model's name is required";
const MODEL_FIELDS_REQUIRED: &str = "model's list of fields is required";
const FIELD_NAME_REQUIRED: &str = "field's name is required";
const FIELD_TYPE_REQUIRED: &str = "field's type is required";
const AUTH_APP_NAME_REQUIRED: &str = "auth app_name is required";
const AUTH_MODEL_NAME_REQUIRED: &str = "auth model_name is required";

/// Look up a compulsory key.
///
/// A node that is not a mapping has no keys. The value is returned as-is.
pub fn require<'a>(
    node: &'a Value,
    key: &str,
    expected: Option<Expected>,
    message: Option<&str>,
) -> Result<&'a Value> {
    let value = node.as_object().and_then(|map| map.get(key)).ok_or_else(|| {
        Error::validation(
            message
                .map(str::to_string)
                .unwrap_or_else(|| format!("{key} is required")),
        )
    })?;

    match expected {
        Some(expected) if !expected.matches(value) => Err(type_mismatch(key, expected)),
        _ => Ok(value),
    }
}

fn type_mismatch(key: &str, expected: Expected) -> Error {
    Error::validation(format!("{key} is expected to be a {expected}"))
}

fn require_str<'a>(node: &'a Value, key: &str, message: Option<&str>) -> Result<&'a str> {
    require(node, key, Some(Expected::String), message)?
        .as_str()
        .ok_or_else(|| type_mismatch(key, Expected::String))
}

fn require_list<'a>(node: &'a Value, key: &str, message: Option<&str>) -> Result<&'a [Value]> {
    require(node, key, Some(Expected::List), message)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| type_mismatch(key, Expected::List))
}

/// A required string used as a directory name in the generated project
fn require_dir_name<'a>(node: &'a Value, key: &str, message: Option<&str>) -> Result<&'a str> {
    let value = require_str(node, key, message)?;
    if value.is_empty() {
        return Err(Error::validation(format!("{key} must not be empty")));
    }
    if matches!(value, "." | "..") || value.contains(['/', '\\', '\0']) {
        return Err(Error::validation(format!(
            "{key} must be a single directory name, got '{value}'"
        )));
    }
    Ok(value)
}

fn duplicate_app_name(app_name: &str) -> Error {
    Error::validation(format!("app_name '{app_name}' is declared more than once"))
}

/// Present, non-null value of an optional key
fn optional<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get(key).filter(|value| !value.is_null())
}

/// Keys of a node that the typed model does not name
fn remaining(node: &Value, known: &[&str]) -> Map<String, Value> {
    node.as_object()
        .map(|map| {
            map.iter()
                .filter(|(key, _)| !known.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Validate a parsed compose file and build its typed description
pub fn validate(root: &Value) -> Result<ComposeDescription> {
    let name = require_dir_name(root, "name", Some(PROJECT_NAME_REQUIRED))?;
    let apps = require_list(root, "app_with_model", None)?;

    let app_names = apps
        .iter()
        .map(|app| require_dir_name(app, "app_name", None))
        .collect::<Result<Vec<_>>>()?;
    for (index, app_name) in app_names.iter().enumerate() {
        if app_names[..index].contains(app_name) {
            return Err(duplicate_app_name(app_name));
        }
    }

    let app_with_model = apps
        .iter()
        .zip(&app_names)
        .map(|(app, app_name)| validate_app(app, app_name))
        .collect::<Result<Vec<_>>>()?;

    let auth_app = optional(root, "auth_app")
        .map(validate_auth_app)
        .transpose()?;
    if let Some(auth) = &auth_app {
        if app_names.contains(&auth.app_name.as_str()) {
            return Err(duplicate_app_name(&auth.app_name));
        }
    }

    debug!(
        "Compose description for '{}' is valid ({} app(s), auth app: {})",
        name,
        app_with_model.len(),
        auth_app.is_some()
    );

    Ok(ComposeDescription {
        name: name.to_string(),
        app_with_model,
        auth_app,
        include: optional(root, "include").cloned(),
        extra: remaining(root, &["name", "app_with_model", "auth_app", "include"]),
    })
}

fn validate_app(app: &Value, app_name: &str) -> Result<AppSpec> {
    let models = match app.get("models") {
        Some(Value::Array(models)) => Some(
            models
                .iter()
                .map(validate_model)
                .collect::<Result<Vec<_>>>()?,
        ),
        _ => {
            debug!("App '{}' declares no models", app_name);
            None
        }
    };

    Ok(AppSpec {
        app_name: app_name.to_string(),
        models,
        extra: remaining(app, &["app_name", "models"]),
    })
}

fn validate_model(model: &Value) -> Result<ModelSpec> {
    let name = require_str(model, "name", Some(MODEL_NAME_REQUIRED))?;
    let fields = require_list(model, "fields", Some(MODEL_FIELDS_REQUIRED))?
        .iter()
        .map(validate_field)
        .collect::<Result<Vec<_>>>()?;

    Ok(ModelSpec {
        name: name.to_string(),
        fields,
        meta: optional(model, "meta").cloned(),
        use_uuid_as_key: optional(model, "use_uuid_as_key").cloned(),
        str_field: optional(model, "str").cloned(),
        extra: remaining(model, &["name", "fields", "meta", "use_uuid_as_key", "str"]),
    })
}

fn validate_field(field: &Value) -> Result<FieldSpec> {
    let name = require_str(field, "name", Some(FIELD_NAME_REQUIRED))?;
    let field_type = require_str(field, "type", Some(FIELD_TYPE_REQUIRED))?;

    let options = match optional(field, "options") {
        None => Map::new(),
        Some(Value::Object(options)) => options.clone(),
        Some(_) => return Err(type_mismatch("options", Expected::Mapping)),
    };

    Ok(FieldSpec {
        name: name.to_string(),
        field_type: field_type.to_string(),
        options,
        extra: remaining(field, &["name", "type", "options"]),
    })
}

fn validate_auth_app(auth_app: &Value) -> Result<AuthAppSpec> {
    let app_name = require_dir_name(auth_app, "app_name", Some(AUTH_APP_NAME_REQUIRED))?;
    let model_name = require_str(auth_app, "model_name", Some(AUTH_MODEL_NAME_REQUIRED))?;

    let fields = match auth_app.get("fields") {
        Some(Value::Array(fields)) => fields
            .iter()
            .map(validate_field)
            .collect::<Result<Vec<_>>>()?,
        _ => Vec::new(),
    };

    Ok(AuthAppSpec {
        app_name: app_name.to_string(),
        model_name: model_name.to_string(),
        fields,
        meta: optional(auth_app, "meta").cloned(),
        username_field: optional(auth_app, "username_field").cloned(),
        required_fields: optional(auth_app, "required_fields").cloned(),
        use_uuid_as_key: optional(auth_app, "use_uuid_as_key").cloned(),
        str_field: optional(auth_app, "str").cloned(),
        extra: remaining(
            auth_app,
            &[
                "app_name",
                "model_name",
                "fields",
                "meta",
                "username_field",
                "required_fields",
                "use_uuid_as_key",
                "str",
            ],
        ),
    })
}
