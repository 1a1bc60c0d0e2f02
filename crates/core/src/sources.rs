//! Source adapters behind a common capability contract.
//!
//! Each remote service gets one type implementing [`CatalogSource`]; the host
//! looks adapters up by id through [`SourceRegistry`] and calls them
//! polymorphically.

pub mod flask_novel_reader;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use scraper::Html;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::SourceError;
use crate::model::{BookResult, ChapterResult, LanguageCode, PagedList};
use crate::network::{NetworkClient, ReqwestNetworkClient};
use crate::response::Response;

use self::flask_novel_reader::FlaskNovelReader;

/// Static metadata every source exposes.
pub trait SourceInterface: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn base_url(&self) -> &str;
    fn icon_url(&self) -> Option<&str>;
    fn language(&self) -> Option<LanguageCode>;
}

/// Operations of a source that offers a browsable catalog.
///
/// None of these return `Err` or panic on remote failures; problems surface
/// as [`Response::Failure`].
#[async_trait]
pub trait CatalogSource: SourceInterface {
    fn catalog_url(&self) -> &str;

    /// Extract chapter text from an already fetched chapter page.
    fn get_chapter_text(&self, doc: &Html) -> String;

    async fn get_book_cover_image_url(&self, book_url: &str) -> Response<Option<String>>;

    async fn get_book_description(&self, book_url: &str) -> Response<Option<String>>;

    async fn get_chapter_list(&self, book_url: &str) -> Response<Vec<ChapterResult>>;

    async fn get_catalog_list(&self, index: usize) -> Response<PagedList<BookResult>>;

    async fn get_catalog_search(&self, index: usize, input: &str) -> Response<PagedList<BookResult>>;
}

/// Serializable snapshot of a source's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
    pub base_url: String,
    pub catalog_url: String,
    pub icon_url: Option<String>,
    pub language: Option<LanguageCode>,
}

impl SourceInfo {
    pub fn of(source: &dyn CatalogSource) -> Self {
        Self {
            id: source.id().to_string(),
            name: source.name().to_string(),
            base_url: source.base_url().to_string(),
            catalog_url: source.catalog_url().to_string(),
            icon_url: source.icon_url().map(String::from),
            language: source.language(),
        }
    }
}

/// Mapping from source id to implementation.
#[derive(Default, Clone)]
pub struct SourceRegistry {
    sources: BTreeMap<String, Arc<dyn CatalogSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in source, using a `reqwest` transport.
    pub fn with_defaults(config: &AppConfig) -> Result<Self, SourceError> {
        let client = Arc::new(ReqwestNetworkClient::new(&config.network)?);
        Ok(Self::with_client(config, client))
    }

    /// Registry with every built-in source sharing `client`.
    pub fn with_client(config: &AppConfig, client: Arc<dyn NetworkClient>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(FlaskNovelReader::with_base_url(
            client,
            &config.sources.flask_novel_reader_base_url,
        )));
        registry
    }

    /// Add a source, replacing any previous one with the same id.
    pub fn register(&mut self, source: Arc<dyn CatalogSource>) {
        let id = source.id().to_string();
        if self.sources.insert(id.clone(), source).is_some() {
            tracing::debug!("Replaced source '{}'", id);
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn CatalogSource>> {
        self.sources.get(id).cloned()
    }

    pub fn require(&self, id: &str) -> Result<Arc<dyn CatalogSource>, SourceError> {
        self.get(id).ok_or_else(|| SourceError::UnknownSource(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn CatalogSource>> {
        self.sources.values()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HttpResponse;

    struct Offline;

    #[async_trait]
    impl NetworkClient for Offline {
        async fn get(&self, url: &str) -> Result<HttpResponse, SourceError> {
            Err(SourceError::Network(format!("offline: {}", url)))
        }
    }

    #[test]
    fn defaults_register_flask_novel_reader() {
        let registry = SourceRegistry::with_client(&AppConfig::default(), Arc::new(Offline));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["flask_novel_reader"]);
        let source = registry.require("flask_novel_reader").unwrap();
        assert_eq!(source.language(), Some(LanguageCode::Portuguese));
        assert_eq!(source.catalog_url(), "https://novel-reader-flask.vercel.app/api/lancamentos");
    }

    #[test]
    fn unknown_id_is_error() {
        let registry = SourceRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(registry.require("nope"), Err(SourceError::UnknownSource(_))));
    }

    #[test]
    fn register_replaces_same_id() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(FlaskNovelReader::with_base_url(Arc::new(Offline), "http://a")));
        registry.register(Arc::new(FlaskNovelReader::with_base_url(Arc::new(Offline), "http://b")));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("flask_novel_reader").unwrap().base_url(), "http://b");
    }

    #[test]
    fn source_info_snapshot() {
        let source = FlaskNovelReader::with_base_url(Arc::new(Offline), "http://a");
        let info = SourceInfo::of(&source);
        assert_eq!(info.id, "flask_novel_reader");
        assert_eq!(info.name, "Flask Novel Reader");
        assert_eq!(info.icon_url, None);
        assert_eq!(info.catalog_url, "http://a/api/lancamentos");
    }
}
