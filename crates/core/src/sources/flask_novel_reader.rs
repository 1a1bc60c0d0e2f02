//! Flask Novel Reader (`novel-reader-flask.vercel.app`), a Portuguese JSON API.
//!
//! The API has no pagination: everything lives on page 0 and every later
//! page is reported empty and terminal without touching the network.

pub mod codec;
pub mod mapper;

use std::sync::Arc;

use async_trait::async_trait;
use scraper::Html;
use serde_json::Value;

use self::codec::Endpoints;
use self::mapper::CATALOG_ENTRIES_FIELD;
use crate::error::SourceError;
use crate::model::{BookResult, ChapterResult, LanguageCode, PagedList};
use crate::network::NetworkClient;
use crate::response::Response;
use crate::sources::{CatalogSource, SourceInterface};

pub const DEFAULT_BASE_URL: &str = "https://novel-reader-flask.vercel.app";

const SOURCE_ID: &str = "flask_novel_reader";

pub struct FlaskNovelReader {
    client: Arc<dyn NetworkClient>,
    endpoints: Endpoints,
    catalog_url: String,
}

impl FlaskNovelReader {
    pub fn new(client: Arc<dyn NetworkClient>) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: Arc<dyn NetworkClient>, base_url: &str) -> Self {
        let endpoints = Endpoints::new(base_url);
        let catalog_url = endpoints.catalog_url();
        Self {
            client,
            endpoints,
            catalog_url,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, SourceError> {
        tracing::debug!(source = SOURCE_ID, "fetching {}", url);
        let response = self.client.get(url).await?;
        let body = response
            .body
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| SourceError::EmptyBody { url: url.to_string() })?;
        mapper::parse_payload(&body)
    }

    async fn fetch_novel(&self, book_url: &str) -> Result<(String, Value), SourceError> {
        let novel_id = self.endpoints.to_internal_id(book_url);
        let obj = self.fetch_json(&self.endpoints.novel_detail_url(novel_id)).await?;
        Ok((novel_id.to_string(), obj))
    }

    async fn fetch_catalog_page(&self, url: &str, index: usize) -> Result<PagedList<BookResult>, SourceError> {
        let obj = self.fetch_json(url).await?;
        let books = mapper::map_catalog_entries(&self.endpoints, &obj, CATALOG_ENTRIES_FIELD)?;
        Ok(PagedList::new(books, index, true))
    }
}

fn finish<T>(operation: &str, result: Result<T, SourceError>) -> Response<T> {
    if let Err(e) = &result {
        tracing::warn!(source = SOURCE_ID, operation, "{}", e);
    }
    result.into()
}

impl SourceInterface for FlaskNovelReader {
    fn id(&self) -> &str {
        SOURCE_ID
    }

    fn name(&self) -> &str {
        "Flask Novel Reader"
    }

    fn base_url(&self) -> &str {
        self.endpoints.base_url()
    }

    fn icon_url(&self) -> Option<&str> {
        None
    }

    fn language(&self) -> Option<LanguageCode> {
        Some(LanguageCode::Portuguese)
    }
}

#[async_trait]
impl CatalogSource for FlaskNovelReader {
    fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    /// Chapter text is fetched directly from the API elsewhere; pages are never parsed here.
    fn get_chapter_text(&self, _doc: &Html) -> String {
        String::new()
    }

    async fn get_book_cover_image_url(&self, book_url: &str) -> Response<Option<String>> {
        let result = async {
            let (_, obj) = self.fetch_novel(book_url).await?;
            mapper::map_cover(&self.endpoints, &obj).map(Some)
        }
        .await;
        finish("get_book_cover_image_url", result)
    }

    async fn get_book_description(&self, book_url: &str) -> Response<Option<String>> {
        let result = async {
            let (_, obj) = self.fetch_novel(book_url).await?;
            mapper::map_description(&obj).map(Some)
        }
        .await;
        finish("get_book_description", result)
    }

    async fn get_chapter_list(&self, book_url: &str) -> Response<Vec<ChapterResult>> {
        let result = async {
            let (novel_id, obj) = self.fetch_novel(book_url).await?;
            mapper::map_chapter_list(&self.endpoints, &novel_id, &obj)
        }
        .await;
        finish("get_chapter_list", result)
    }

    async fn get_catalog_list(&self, index: usize) -> Response<PagedList<BookResult>> {
        if index > 0 {
            return Response::Success(PagedList::create_empty(index));
        }
        let result = self.fetch_catalog_page(&self.catalog_url, index).await;
        finish("get_catalog_list", result)
    }

    async fn get_catalog_search(&self, index: usize, input: &str) -> Response<PagedList<BookResult>> {
        if index > 0 {
            return Response::Success(PagedList::create_empty(index));
        }
        let url = self.endpoints.search_url(input);
        let result = self.fetch_catalog_page(&url, index).await;
        finish("get_catalog_search", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HttpResponse;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves canned bodies by url and counts requests.
    #[derive(Default)]
    struct FakeClient {
        bodies: HashMap<String, Option<String>>,
        calls: AtomicUsize,
    }

    impl FakeClient {
        fn with(mut self, url: &str, body: Option<&str>) -> Self {
            self.bodies.insert(url.to_string(), body.map(String::from));
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NetworkClient for FakeClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.bodies.get(url) {
                Some(body) => Ok(HttpResponse { body: body.clone() }),
                None => Err(SourceError::Network(format!("connection refused: {}", url))),
            }
        }
    }

    const BASE: &str = DEFAULT_BASE_URL;

    fn source(client: &Arc<FakeClient>) -> FlaskNovelReader {
        FlaskNovelReader::new(client.clone())
    }

    #[tokio::test]
    async fn later_pages_skip_the_network() {
        let client = Arc::new(FakeClient::default());
        let s = source(&client);
        for index in [1, 2, 17] {
            assert_eq!(s.get_catalog_list(index).await, Response::Success(PagedList::create_empty(index)));
            assert_eq!(
                s.get_catalog_search(index, "anything").await,
                Response::Success(PagedList::create_empty(index))
            );
        }
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn catalog_scenario() {
        let client = Arc::new(FakeClient::default().with(
            &format!("{BASE}/api/lancamentos"),
            Some(r#"{"resultado":[{"nome":"A","url":"1","cover":"a.png"}]}"#),
        ));
        let page = source(&client).get_catalog_list(0).await;
        assert_eq!(
            page,
            Response::Success(PagedList::new(
                vec![BookResult {
                    title: "A".to_string(),
                    url: format!("{BASE}/api/novel/1"),
                    cover_image_url: Some(format!("{BASE}/static/a.png")),
                }],
                0,
                true,
            ))
        );
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn chapter_list_scenario() {
        let client = Arc::new(FakeClient::default().with(
            &format!("{BASE}/api/novel/42"),
            Some(r#"{"cover":"c.png","desc":"d","chapters":[["Ch1","c1"],["Ch2","c2"]]}"#),
        ));
        let chapters = source(&client)
            .get_chapter_list(&format!("{BASE}/api/novel/42"))
            .await
            .success()
            .unwrap();
        assert_eq!(
            chapters,
            vec![
                ChapterResult {
                    title: "Ch1".to_string(),
                    url: format!("{BASE}/api/novel/42/chapter/c1"),
                },
                ChapterResult {
                    title: "Ch2".to_string(),
                    url: format!("{BASE}/api/novel/42/chapter/c2"),
                },
            ]
        );
    }

    #[tokio::test]
    async fn empty_body_fails_every_fetching_operation() {
        let book = format!("{BASE}/api/novel/7");
        let client = Arc::new(
            FakeClient::default()
                .with(&book, None)
                .with(&format!("{BASE}/api/lancamentos"), Some("  "))
                .with(&format!("{BASE}/api/search/x"), None),
        );
        let s = source(&client);

        let failures = [
            s.get_book_cover_image_url(&book).await.failure().map(String::from),
            s.get_book_description(&book).await.failure().map(String::from),
            s.get_chapter_list(&book).await.failure().map(String::from),
            s.get_catalog_list(0).await.failure().map(String::from),
            s.get_catalog_search(0, "x").await.failure().map(String::from),
        ];
        for message in failures {
            let message = message.expect("operation should fail");
            assert!(message.starts_with("Empty response"), "{}", message);
        }
    }

    #[tokio::test]
    async fn missing_field_is_failure() {
        let book = format!("{BASE}/api/novel/9");
        let client = Arc::new(FakeClient::default().with(&book, Some(r#"{"title":"no cover"}"#)));
        let s = source(&client);
        assert_eq!(
            s.get_book_cover_image_url(&book).await,
            Response::Failure("Missing field 'cover' in payload".to_string())
        );
        assert!(s.get_book_description(&book).await.is_failure());
        assert!(s.get_chapter_list(&book).await.is_failure());
    }

    #[tokio::test]
    async fn transport_error_is_failure() {
        let client = Arc::new(FakeClient::default());
        let r = source(&client).get_book_description("9").await;
        assert!(r.failure().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn bare_id_is_accepted_as_book_url() {
        let client = Arc::new(FakeClient::default().with(&format!("{BASE}/api/novel/5"), Some(r#"{"desc":"ok"}"#)));
        let r = source(&client).get_book_description("5").await;
        assert_eq!(r, Response::Success(Some("ok".to_string())));
    }

    #[test]
    fn endpoints_follow_configured_base() {
        let client = Arc::new(FakeClient::default());
        let s = FlaskNovelReader::with_base_url(client, "http://mirror.local/");
        assert_eq!(s.base_url(), "http://mirror.local");
        assert_eq!(s.catalog_url(), s.endpoints().catalog_url());
        assert_eq!(s.endpoints().to_internal_id("http://mirror.local/api/novel/8"), "8");
    }

    #[test]
    fn chapter_text_is_empty() {
        let client = Arc::new(FakeClient::default());
        let doc = Html::parse_document("<html><body><p>texto</p></body></html>");
        assert_eq!(source(&client).get_chapter_text(&doc), "");
    }
}
