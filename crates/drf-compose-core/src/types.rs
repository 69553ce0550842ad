//! Typed compose description nodes
//!
//! These are produced by [`crate::schema::validate`] and never mutated
//! afterwards. Every node keeps the keys it does not model in `extra`, so
//! serialising a node hands templates a superset of the raw input.

use serde::Serialize;
use serde_json::{Map, Value};

/// Root of a compose file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposeDescription {
    /// Project name, also the generated project directory name
    pub name: String,

    /// Applications in declaration order
    pub app_with_model: Vec<AppSpec>,

    /// Optional custom authentication application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_app: Option<AuthAppSpec>,

    /// Opaque value handed to the auth app templates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComposeDescription {
    /// Apps whose `models` produced at least one model
    pub fn apps_with_models(&self) -> impl Iterator<Item = &AppSpec> {
        self.app_with_model.iter().filter(|app| app.has_models())
    }
}

/// One generated application
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppSpec {
    pub app_name: String,

    /// `None` when `models` is absent or not a sequence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelSpec>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AppSpec {
    /// Whether model, serializer, view, admin and route files are generated
    pub fn has_models(&self) -> bool {
        self.models.as_ref().is_some_and(|models| !models.is_empty())
    }
}

/// A data model of an application
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSpec {
    pub name: String,

    pub fields: Vec<FieldSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_uuid_as_key: Option<Value>,

    /// Field used for `__str__`
    #[serde(rename = "str", skip_serializing_if = "Option::is_none")]
    pub str_field: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One attribute of a model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,

    /// Short type token such as `char` or `fk`
    #[serde(rename = "type")]
    pub field_type: String,

    /// Keyword arguments of the generated field, in declaration order
    pub options: Map<String, Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Custom user model application
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthAppSpec {
    pub app_name: String,

    pub model_name: String,

    /// Empty when `fields` is absent or not a sequence
    pub fields: Vec<FieldSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username_field: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_fields: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_uuid_as_key: Option<Value>,

    #[serde(rename = "str", skip_serializing_if = "Option::is_none")]
    pub str_field: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthAppSpec {
    /// Name of the field Django authenticates with
    pub fn username_field(&self) -> &str {
        self.username_field
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or("email")
    }
}
