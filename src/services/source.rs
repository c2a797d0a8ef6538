//! Where catalog documents come from.
//!
//! The loader asks a [`CatalogSource`] for documents by relative path
//! (`data/xml/countries24.xml`). Sources exist for a local directory, an HTTP
//! server and an in-memory map.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{CatalogError, Result};

/// A provider of catalog document text.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the document at `path`, relative to the catalog root.
    async fn fetch(&self, path: &str) -> Result<String>;
}

/// Rejects absolute paths and parent components in document paths.
fn check_relative(path: &str) -> Result<()> {
    let escapes = Path::new(path)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || path.is_empty() {
        return Err(CatalogError::fetch(path, "invalid document path"));
    }
    Ok(())
}

/// Reads documents from a directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// A source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory documents are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl CatalogSource for FsSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        check_relative(path)?;
        tokio::fs::read_to_string(self.root.join(path))
            .await
            .map_err(|e| CatalogError::fetch(path, e))
    }
}

/// Fetches documents over HTTP from a base URL.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    /// Creates a source rooted at `base_url` (trailing slash optional).
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!("monument-designer/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { base_url, client })
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        check_relative(path)?;
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::fetch(path, e))?;
        let response = response
            .error_for_status()
            .map_err(|e| CatalogError::fetch(path, e))?;
        response.text().await.map_err(|e| CatalogError::fetch(path, e))
    }
}

/// Serves documents from memory and records every fetch.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    documents: HashMap<String, String>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl MemorySource {
    /// An empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document.
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(path.into(), text.into());
        self
    }

    /// Paths fetched so far, in order.
    #[must_use]
    pub fn fetched(&self) -> Vec<String> {
        self.fetched
            .lock()
            .map(|fetched| fetched.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CatalogSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<String> {
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(path.to_string());
        }
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| CatalogError::fetch(path, "not found"))
    }
}

/// Picks a source for a configured catalog root: URLs become an
/// [`HttpSource`], anything else a directory.
///
/// # Errors
///
/// Fails when an HTTP root is configured but the client cannot be built, or
/// when the `http` feature is disabled.
pub fn source_for_root(root: &str) -> anyhow::Result<Arc<dyn CatalogSource>> {
    if root.starts_with("http://") || root.starts_with("https://") {
        #[cfg(feature = "http")]
        {
            return Ok(Arc::new(HttpSource::new(root)?));
        }
        #[cfg(not(feature = "http"))]
        {
            anyhow::bail!("HTTP catalog roots need the `http` feature: {root}");
        }
    }
    Ok(Arc::new(FsSource::new(root)))
}
