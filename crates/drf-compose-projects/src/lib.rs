//! # drf-compose-projects
//!
//! Project generation library for the drf-compose CLI providing:
//! - Embedded Tera templates for Django project, app and auth app files
//! - Scaffolding and formatting via external programs
//! - The generator that writes a project from a compose description
//!
//! # Examples
//!
//! ```no_run
//! use drf_compose_core::{validate, ComposeSource, GeneratorConfig};
//! use drf_compose_projects::ProjectGenerator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = ComposeSource::new("drf-compose.json", Default::default());
//! let description = validate(&source.load()?)?;
//!
//! let config = GeneratorConfig::default();
//! let generator = ProjectGenerator::new(&config)?;
//! let project = generator.generate(&description, &source.dir()).await?;
//! println!("Created {}", project.project_dir);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;
pub mod tools;

pub use error::{Error, Result};
pub use generator::{generate_secret_key, GeneratedProject, ProjectGenerator};
pub use templates::{Template, TemplateRegistry};
pub use tools::ExternalTools;
