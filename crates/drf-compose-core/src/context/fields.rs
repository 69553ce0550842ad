//! Field type and option helpers used by the model templates
//!
//! Option values are written into generated Python source. Values of the
//! options in [`STRING_OPTIONS`] are string literals; everything else is
//! emitted as a raw expression (`models.CASCADE`, `True`, `200`).

use serde_json::Value;

/// Options whose values are emitted as quoted string literals
pub const STRING_OPTIONS: &[&str] = &[
    "to",
    "related_name",
    "related_query_name",
    "to_field",
    "db_column",
    "help_text",
    "verbose_name",
];

/// Map a short field type token to the Django field class name.
///
/// Matching is case-insensitive. Tokens already naming a field class
/// (containing "field") are returned unchanged.
pub fn normalize_field_type(token: &str) -> String {
    let lowercase = token.to_lowercase();
    match lowercase.as_str() {
        "char" | "text" => format!("{}Field", capitalize(token)),
        "url" => "URLField".to_string(),
        "datetime" => "DateTimeField".to_string(),
        "fk" => "ForeignKey".to_string(),
        "m2m" => "ManyToManyField".to_string(),
        "o2o" => "OneToOneField".to_string(),
        _ if lowercase.contains("field") => token.to_string(),
        _ => format!("{}Field", capitalize(token)),
    }
}

/// Upper-case the first character and lower-case the rest
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Quote the value of a string-literal option; other values pass through.
pub fn quote_option_value(option_name: &str, value: &Value) -> Value {
    if !STRING_OPTIONS.contains(&option_name) {
        return value.clone();
    }

    let text = match value {
        Value::String(text) => text.clone(),
        other => python_expr(other),
    };
    Value::String(format!("'{}'", escape_single_quoted(&text)))
}

/// Render a value as a Python expression. Strings are emitted raw.
pub fn python_expr(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => python_repr(other),
    }
}

/// Render a value as a Python literal
pub fn python_repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => format!("'{}'", escape_single_quoted(text)),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(python_repr).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| {
                    format!("'{}': {}", escape_single_quoted(key), python_repr(value))
                })
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

fn escape_single_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}
