//! Conversions between resource urls, API ids and endpoint paths.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when a value is placed in a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Endpoint layout of the Flask Novel Reader API under one base url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    novel_prefix: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let novel_prefix = format!("{}/api/novel/", base_url);
        Self {
            base_url,
            novel_prefix,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Recover the API id from a resource url issued by [`Self::to_resource_url`].
    ///
    /// Urls without the novel prefix come back unchanged.
    pub fn to_internal_id<'a>(&self, resource_url: &'a str) -> &'a str {
        resource_url
            .strip_prefix(self.novel_prefix.as_str())
            .unwrap_or(resource_url)
    }

    pub fn to_resource_url(&self, id: &str) -> String {
        format!("{}{}", self.novel_prefix, id)
    }

    pub fn to_chapter_url(&self, id: &str, chapter_id: &str) -> String {
        format!("{}{}/chapter/{}", self.novel_prefix, id, chapter_id)
    }

    /// Detail endpoint; same address as the resource url.
    pub fn novel_detail_url(&self, id: &str) -> String {
        self.to_resource_url(id)
    }

    pub fn catalog_url(&self) -> String {
        format!("{}/api/lancamentos", self.base_url)
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/api/search/{}",
            self.base_url,
            utf8_percent_encode(query, PATH_SEGMENT)
        )
    }

    pub fn static_asset_url(&self, asset: &str) -> String {
        format!("{}/static/{}", self.base_url, asset)
    }
}
