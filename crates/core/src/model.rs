//! Domain values shared by all sources: books, chapters and result pages.

use serde::{Deserialize, Serialize};

/// A book as listed in a catalog or search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResult {
    pub title: String,
    /// Canonical resource url; the host keys books by it.
    pub url: String,
    pub cover_image_url: Option<String>,
}

/// One chapter of a book, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterResult {
    pub title: String,
    pub url: String,
}

/// One bounded slice of a result list.
///
/// Once `is_last_page` is set for `index`, later indices hold no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedList<T> {
    pub list: Vec<T>,
    pub index: usize,
    pub is_last_page: bool,
}

impl<T> PagedList<T> {
    pub fn new(list: Vec<T>, index: usize, is_last_page: bool) -> Self {
        Self {
            list,
            index,
            is_last_page,
        }
    }

    /// Empty terminal page, used for indices past the end of the data.
    pub fn create_empty(index: usize) -> Self {
        Self::new(Vec::new(), index, true)
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// Declared content language of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageCode {
    English,
    Portuguese,
    Spanish,
    French,
    Chinese,
    Japanese,
    Korean,
}

impl LanguageCode {
    /// ISO 639-1 code.
    pub fn iso639_1(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Portuguese => "pt",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::Chinese => "zh",
            Self::Japanese => "ja",
            Self::Korean => "ko",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Portuguese => "Portuguese",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
            Self::Korean => "Korean",
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_is_terminal() {
        let page: PagedList<BookResult> = PagedList::create_empty(3);
        assert!(page.is_empty());
        assert_eq!(page.index, 3);
        assert!(page.is_last_page);
    }

    #[test]
    fn language_codes() {
        assert_eq!(LanguageCode::Portuguese.iso639_1(), "pt");
        assert_eq!(LanguageCode::Portuguese.to_string(), "Portuguese");
    }
}
