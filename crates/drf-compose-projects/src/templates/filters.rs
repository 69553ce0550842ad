//! Tera filters for the Python templates

use drf_compose_core::context::{
    normalize_field_type, python_expr, python_repr, quote_option_value,
};
use std::collections::HashMap;
use tera::Value;

/// `{{ field.type | clean_field_type }}`
pub(super) fn clean_field_type_filter(
    value: &Value,
    _args: &HashMap<String, Value>,
) -> tera::Result<Value> {
    let token = match value {
        Value::String(token) => token.clone(),
        other => python_expr(other),
    };
    Ok(Value::String(normalize_field_type(&token)))
}

/// `{{ value | clean_option(name=key) }}`
pub(super) fn clean_option_filter(
    value: &Value,
    args: &HashMap<String, Value>,
) -> tera::Result<Value> {
    let name = args
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("clean_option requires a `name` argument"))?;

    Ok(Value::String(python_expr(&quote_option_value(name, value))))
}

/// `{{ meta_value | py_repr }}`
pub(super) fn py_repr_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(python_repr(value)))
}
