//! UI resource catalog configuration.
//!
//! A server declares the UI resources and templates it offers in a TOML
//! file. The catalog is validated on load and answers `resources/list`
//! requests with cursor-based pagination.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::models::content::Annotations;
use crate::models::resource::{ListUiResourcesResult, UiResource, UiResourceTemplate};
use crate::{AppError, Result};

fn default_page_size() -> usize {
    50
}

/// Resource catalog parsed from `catalog.toml`.
///
/// ```toml
/// page_size = 20
///
/// [[resources]]
/// uri = "ui://dashboard/main"
/// name = "dashboard"
/// title = "Dashboard"
/// mime_type = "text/html"
///
/// [[templates]]
/// uri_template = "ui://weather/{city}"
/// name = "weather"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(from = "CatalogFile")]
pub struct CatalogConfig {
    /// Maximum number of resources per `resources/list` page.
    pub page_size: usize,
    /// Declared UI resources, in listing order.
    pub resources: Vec<UiResource>,
    /// Declared UI resource templates.
    pub templates: Vec<UiResourceTemplate>,
}

/// On-disk catalog layout; keys are snake_case, unlike the wire records.
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
struct CatalogFile {
    #[serde(default = "default_page_size")]
    page_size: usize,
    #[serde(default)]
    resources: Vec<ResourceEntry>,
    #[serde(default)]
    templates: Vec<TemplateEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
struct ResourceEntry {
    uri: String,
    name: String,
    title: Option<String>,
    description: Option<String>,
    mime_type: Option<String>,
    annotations: Option<Annotations>,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
struct TemplateEntry {
    uri_template: String,
    name: String,
    title: Option<String>,
    description: Option<String>,
    mime_type: Option<String>,
    annotations: Option<Annotations>,
}

impl From<ResourceEntry> for UiResource {
    fn from(entry: ResourceEntry) -> Self {
        Self {
            uri: entry.uri,
            name: entry.name,
            title: entry.title,
            description: entry.description,
            mime_type: entry.mime_type,
            annotations: entry.annotations,
        }
    }
}

impl From<TemplateEntry> for UiResourceTemplate {
    fn from(entry: TemplateEntry) -> Self {
        Self {
            uri_template: entry.uri_template,
            name: entry.name,
            title: entry.title,
            description: entry.description,
            mime_type: entry.mime_type,
            annotations: entry.annotations,
        }
    }
}

impl From<CatalogFile> for CatalogConfig {
    fn from(file: CatalogFile) -> Self {
        Self {
            page_size: file.page_size,
            resources: file.resources.into_iter().map(Into::into).collect(),
            templates: file.templates.into_iter().map(Into::into).collect(),
        }
    }
}

impl CatalogConfig {
    /// Load and validate a catalog from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read, or
    /// `AppError::Config` if it contains invalid TOML or fails validation.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Io(format!("failed to read catalog: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse and validate a catalog from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        debug!(
            resources = config.resources.len(),
            templates = config.templates.len(),
            "catalog loaded"
        );
        Ok(config)
    }

    /// Look up a declared resource by exact URI.
    #[must_use]
    pub fn resource(&self, uri: &str) -> Option<&UiResource> {
        self.resources.iter().find(|r| r.uri == uri)
    }

    /// One page of declared resources starting at `cursor`.
    ///
    /// The cursor is the opaque `nextCursor` of a previous page; `None`
    /// starts from the beginning.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the cursor was not issued by this
    /// catalog.
    pub fn list_resources(&self, cursor: Option<&str>) -> Result<ListUiResourcesResult> {
        let total = self.resources.len();
        let start = match cursor {
            None => 0,
            Some(raw) => self.cursor_offset(raw)?,
        };

        let end = start.saturating_add(self.page_size).min(total);
        let next_cursor = (end < total).then(|| end.to_string());

        Ok(ListUiResourcesResult {
            resources: self.resources[start..end].to_vec(),
            next_cursor,
        })
    }

    fn cursor_offset(&self, raw: &str) -> Result<usize> {
        match raw.parse::<usize>() {
            Ok(offset) if offset <= self.resources.len() => Ok(offset),
            _ => Err(AppError::Validation(format!("invalid cursor: {raw}"))),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(AppError::Config("page_size must be positive".into()));
        }

        let mut seen = HashSet::new();
        for resource in &self.resources {
            let uri = &resource.uri;
            if let Err(err) = resource.validate() {
                return Err(AppError::Config(format!("resource {uri:?}: {err}")));
            }
            if !seen.insert(uri.as_str()) {
                return Err(AppError::Config(format!("duplicate resource uri: {uri}")));
            }
        }

        for template in &self.templates {
            let uri = &template.uri_template;
            if let Err(err) = template.validate() {
                return Err(AppError::Config(format!("template {uri:?}: {err}")));
            }
        }

        Ok(())
    }
}
