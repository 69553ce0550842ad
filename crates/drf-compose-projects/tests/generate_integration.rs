//! End-to-end generation tests
//!
//! External tools are disabled, so these only exercise rendering and file
//! layout.

use camino::{Utf8Path, Utf8PathBuf};
use drf_compose_core::{parse_compose, validate, ComposeDescription, ComposeFormat, GeneratorConfig};
use drf_compose_projects::{Error, ProjectGenerator};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const JSON_COMPOSE: &str = include_str!("../../../fixtures/drf-compose.json");

fn temp_dir() -> (TempDir, Utf8PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();
    (temp, path)
}

fn fixture() -> ComposeDescription {
    validate(&parse_compose(JSON_COMPOSE, ComposeFormat::Json).unwrap()).unwrap()
}

fn read(path: impl AsRef<Utf8Path>) -> String {
    fs::read_to_string(path.as_ref()).unwrap_or_else(|e| panic!("{}: {}", path.as_ref(), e))
}

#[tokio::test]
async fn test_generate_fixture_project() {
    let (_temp, dir) = temp_dir();
    let config = GeneratorConfig::offline();
    let generator = ProjectGenerator::new(&config).unwrap();

    let project = generator.generate(&fixture(), &dir).await.unwrap();
    let root = dir.join("delight_blog");

    assert_eq!(project.project_dir, root);
    assert!(!project.formatted);

    for file in [
        "requirements.txt",
        "delight_blog/__init__.py",
        "delight_blog/settings.py",
        "delight_blog/urls.py",
        "apps/__init__.py",
        "apps/post/__init__.py",
        "apps/post/apps.py",
        "apps/post/models.py",
        "apps/post/serializers.py",
        "apps/post/views.py",
        "apps/post/admin.py",
        "apps/post/urls.py",
        "apps/category/models.py",
        "apps/authentication/models.py",
        "apps/authentication/manager.py",
        "apps/authentication/urls.py",
        "apps/authentication/apps.py",
    ] {
        assert!(root.join(file).is_file(), "missing {}", file);
    }

    let settings = read(root.join("delight_blog/settings.py"));
    assert!(settings.contains(r#"AUTH_USER_MODEL = "authentication.CustomUser""#));
    assert!(settings.contains(r#""apps.category","#));

    let category = read(root.join("apps/category/models.py"));
    assert!(category.contains("class Category(models.Model):"));
    assert!(category.contains("class Label(models.Model):"));

    let urls = read(root.join("delight_blog/urls.py"));
    assert!(urls.contains(r#"include("apps.category.urls")"#));

    assert!(project.files.contains(&root.join("apps/post/models.py")));
}

#[tokio::test]
async fn test_generate_into_output_dir() {
    let (_source, source_dir) = temp_dir();
    let (_output, output_dir) = temp_dir();
    let config = GeneratorConfig::offline().with_output_dir(output_dir.clone());

    let description = validate(&json!({
        "name": "shop",
        "app_with_model": [{"app_name": "product", "models": [
            {"name": "Product", "fields": [{"name": "price", "type": "decimal",
                "options": {"max_digits": 8, "decimal_places": 2}}]}
        ]}]
    }))
    .unwrap();

    ProjectGenerator::new(&config)
        .unwrap()
        .generate(&description, &source_dir)
        .await
        .unwrap();

    assert!(!source_dir.join("shop").exists());
    let models = read(output_dir.join("shop/apps/product/models.py"));
    assert!(models.contains("price = models.DecimalField(max_digits=8, decimal_places=2)"));

    let settings = read(output_dir.join("shop/shop/settings.py"));
    assert!(!settings.contains("AUTH_USER_MODEL"));
}

#[tokio::test]
async fn test_second_run_reports_existing_project() {
    let (_temp, dir) = temp_dir();
    let config = GeneratorConfig::offline();
    let generator = ProjectGenerator::new(&config).unwrap();
    let description = fixture();

    generator.generate(&description, &dir).await.unwrap();
    let settings = read(dir.join("delight_blog/delight_blog/settings.py"));

    let err = generator.generate(&description, &dir).await.unwrap_err();
    assert!(matches!(err, Error::ProjectExists { .. }));
    assert!(err
        .to_string()
        .starts_with("Project folder with the specified project name (delight_blog) already exists at:"));

    // Existing output is left untouched
    assert_eq!(read(dir.join("delight_blog/delight_blog/settings.py")), settings);
}

#[tokio::test]
async fn test_app_without_models_gets_no_model_files() {
    let (_temp, dir) = temp_dir();
    let config = GeneratorConfig::offline();
    let description = validate(&json!({
        "name": "blog",
        "app_with_model": [
            {"app_name": "pages"},
            {"app_name": "empty", "models": []}
        ]
    }))
    .unwrap();

    let project = ProjectGenerator::new(&config)
        .unwrap()
        .generate(&description, &dir)
        .await
        .unwrap();

    for app in ["pages", "empty"] {
        let app_dir = dir.join("blog/apps").join(app);
        assert!(app_dir.join("__init__.py").is_file());
        assert!(app_dir.join("apps.py").is_file());
        assert!(!app_dir.join("models.py").exists());
        assert!(!app_dir.join("urls.py").exists());
    }

    let urls = read(dir.join("blog/blog/urls.py"));
    assert!(!urls.contains("apps.pages.urls"));
    assert_eq!(project.files.len(), 5);
}

#[tokio::test]
async fn test_missing_scaffolder_fails_after_creating_project_dir() {
    let (_temp, dir) = temp_dir();
    let config = GeneratorConfig {
        django_admin: "drf-compose-test-tool-that-does-not-exist".to_string(),
        skip_scaffold: false,
        ..GeneratorConfig::offline()
    };

    let err = ProjectGenerator::new(&config)
        .unwrap()
        .generate(&fixture(), &dir)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ToolNotFound { .. }));
    assert!(dir.join("delight_blog").is_dir());
}
