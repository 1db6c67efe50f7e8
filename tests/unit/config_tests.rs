//! Unit tests for UI resource catalog parsing, validation, and listing.

use std::io::Write;

use mcp_ui_bridge::{AppError, CatalogConfig};

fn sample_toml() -> &'static str {
    r#"
page_size = 2

[[resources]]
uri = "ui://dashboard/main"
name = "dashboard"
title = "Dashboard"
mime_type = "text/html"

[[resources]]
uri = "ui://weather/seattle"
name = "weather-seattle"

[[resources]]
uri = "ui://docs"
name = "docs"
mime_type = "text/uri-list"

[[templates]]
uri_template = "ui://weather/{city}"
name = "weather"
"#
}

#[test]
fn parses_resources_and_templates() {
    let config = CatalogConfig::from_toml_str(sample_toml()).expect("valid catalog");
    assert_eq!(config.page_size, 2);
    assert_eq!(config.resources.len(), 3);
    assert_eq!(config.resources[0].mime_type.as_deref(), Some("text/html"));
    assert_eq!(config.resources[0].title.as_deref(), Some("Dashboard"));
    assert_eq!(config.templates[0].uri_template, "ui://weather/{city}");
}

#[test]
fn empty_catalog_uses_defaults() {
    let config = CatalogConfig::from_toml_str("").expect("valid catalog");
    assert_eq!(config.page_size, 50);
    assert!(config.resources.is_empty());
    assert!(config.templates.is_empty());
}

#[test]
fn resource_lookup_by_uri() {
    let config = CatalogConfig::from_toml_str(sample_toml()).expect("valid catalog");
    assert_eq!(
        config.resource("ui://docs").map(|r| r.name.as_str()),
        Some("docs")
    );
    assert!(config.resource("ui://missing").is_none());
}

#[test]
fn list_resources_pages_with_cursor() {
    let config = CatalogConfig::from_toml_str(sample_toml()).expect("valid catalog");

    let first = config.list_resources(None).expect("first page");
    assert_eq!(first.resources.len(), 2);
    assert_eq!(first.next_cursor.as_deref(), Some("2"));

    let second = config
        .list_resources(first.next_cursor.as_deref())
        .expect("second page");
    assert_eq!(second.resources.len(), 1);
    assert_eq!(second.resources[0].uri, "ui://docs");
    assert!(second.next_cursor.is_none());
}

#[test]
fn list_resources_rejects_foreign_cursor() {
    let config = CatalogConfig::from_toml_str(sample_toml()).expect("valid catalog");
    for cursor in ["abc", "-1", "99"] {
        assert_eq!(
            config.list_resources(Some(cursor)),
            Err(AppError::Validation(format!("invalid cursor: {cursor}")))
        );
    }
}

#[test]
fn non_ui_scheme_is_rejected() {
    let err = CatalogConfig::from_toml_str(
        r#"
[[resources]]
uri = "https://example.com"
name = "site"
"#,
    )
    .expect_err("must fail");
    assert!(matches!(err, AppError::Config(_)));
    assert!(err.to_string().contains("must start with ui://"), "{err}");
}

#[test]
fn duplicate_resource_uri_is_rejected() {
    let err = CatalogConfig::from_toml_str(
        r#"
[[resources]]
uri = "ui://a"
name = "first"

[[resources]]
uri = "ui://a"
name = "second"
"#,
    )
    .expect_err("must fail");
    assert_eq!(
        err,
        AppError::Config("duplicate resource uri: ui://a".into())
    );
}

#[test]
fn zero_page_size_is_rejected() {
    let err = CatalogConfig::from_toml_str("page_size = 0").expect_err("must fail");
    assert!(err.to_string().contains("page_size"), "{err}");
}

#[test]
fn template_without_name_is_rejected() {
    let err = CatalogConfig::from_toml_str(
        r#"
[[templates]]
uri_template = "ui://weather/{city}"
name = ""
"#,
    )
    .expect_err("must fail");
    assert!(err.to_string().contains("name is missing"), "{err}");
}

#[test]
fn invalid_toml_is_config_error() {
    let err = CatalogConfig::from_toml_str("[[resources]\nuri =").expect_err("must fail");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn load_from_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(sample_toml().as_bytes()).expect("write");

    let config = CatalogConfig::load_from_path(file.path()).expect("load");
    assert_eq!(config.resources.len(), 3);
}

#[test]
fn load_from_missing_path_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.toml");
    let err = CatalogConfig::load_from_path(&path).expect_err("must fail");
    assert!(matches!(err, AppError::Io(_)), "{err}");
}
