//! Payload mapping from Flask Novel Reader JSON into domain values.
//!
//! Field layout per endpoint:
//! - `/api/lancamentos`, `/api/search/{q}`: `{ "resultado": [{ "nome", "url", "cover" }] }`
//! - `/api/novel/{id}`: `{ "cover", "desc", "chapters": [[title, chapterId], ...] }`

use serde_json::{Map, Value};

use super::codec::Endpoints;
use crate::error::SourceError;
use crate::model::{BookResult, ChapterResult};

/// Array field holding catalog and search entries.
pub const CATALOG_ENTRIES_FIELD: &str = "resultado";

pub fn parse_payload(body: &str) -> Result<Value, SourceError> {
    Ok(serde_json::from_str(body)?)
}

pub fn map_cover(endpoints: &Endpoints, obj: &Value) -> Result<String, SourceError> {
    let cover = require_str(as_object(obj, "$")?, "cover")?;
    Ok(endpoints.static_asset_url(cover))
}

pub fn map_description(obj: &Value) -> Result<String, SourceError> {
    Ok(require_str(as_object(obj, "$")?, "desc")?.to_string())
}

pub fn map_chapter_list(
    endpoints: &Endpoints,
    novel_id: &str,
    obj: &Value,
) -> Result<Vec<ChapterResult>, SourceError> {
    let chapters = require_array(as_object(obj, "$")?, "chapters")?;
    chapters
        .iter()
        .enumerate()
        .map(|(i, entry)| -> Result<ChapterResult, SourceError> {
            let field = format!("chapters[{}]", i);
            let pair = entry
                .as_array()
                .ok_or_else(|| SourceError::unexpected(field.as_str(), "an array"))?;
            let title = pair_str(pair, 0, &field)?;
            let chapter_id = pair_str(pair, 1, &field)?;
            Ok(ChapterResult {
                title: title.to_string(),
                url: endpoints.to_chapter_url(novel_id, chapter_id),
            })
        })
        .collect()
}

pub fn map_catalog_entries(
    endpoints: &Endpoints,
    obj: &Value,
    array_field: &str,
) -> Result<Vec<BookResult>, SourceError> {
    let entries = require_array(as_object(obj, "$")?, array_field)?;
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| -> Result<BookResult, SourceError> {
            let item = as_object(entry, &format!("{}[{}]", array_field, i))?;
            Ok(BookResult {
                title: require_str(item, "nome")?.to_string(),
                url: endpoints.to_resource_url(require_str(item, "url")?),
                cover_image_url: Some(endpoints.static_asset_url(require_str(item, "cover")?)),
            })
        })
        .collect()
}

fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>, SourceError> {
    value
        .as_object()
        .ok_or_else(|| SourceError::unexpected(field, "an object"))
}

fn require_str<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a str, SourceError> {
    obj.get(field)
        .ok_or_else(|| SourceError::missing(field))?
        .as_str()
        .ok_or_else(|| SourceError::unexpected(field, "a string"))
}

fn require_array<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Vec<Value>, SourceError> {
    obj.get(field)
        .ok_or_else(|| SourceError::missing(field))?
        .as_array()
        .ok_or_else(|| SourceError::unexpected(field, "an array"))
}

fn pair_str<'a>(pair: &'a [Value], pos: usize, field: &str) -> Result<&'a str, SourceError> {
    let field = format!("{}[{}]", field, pos);
    pair.get(pos)
        .ok_or_else(|| SourceError::missing(field.as_str()))?
        .as_str()
        .ok_or_else(|| SourceError::unexpected(field, "a string"))
}
