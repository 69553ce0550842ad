//! # drf-compose-core
//!
//! Core library for the drf-compose CLI providing:
//! - Compose file parsing (JSON and YAML)
//! - Required-key schema validation into typed compose nodes
//! - Template context derivation for generated project files
//! - Generator configuration

pub mod compose;
pub mod config;
pub mod context;
pub mod error;
pub mod schema;
pub mod types;

pub use compose::{parse_compose, ComposeFormat, ComposeSource};
pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use schema::validate;
pub use types::{AppSpec, AuthAppSpec, ComposeDescription, FieldSpec, ModelSpec};
