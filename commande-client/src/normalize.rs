//! Response shape normalization
//!
//! The API is not consistent about envelopes. A list may come back as a bare
//! array, as `{data: [...]}` or as `{items: [...], count, total, page, pages}`,
//! and a single entity either bare or as `{data: {...}}`. Each arity has one
//! decoder here that classifies the payload and produces the typed result.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::{Page, PageMeta};

use crate::{ClientError, ClientResult};

/// Keys that may hold the list, in lookup order
const LIST_KEYS: [&str; 2] = ["items", "data"];
/// Nested objects that may hold pagination numbers
const META_KEYS: [&str; 2] = ["meta", "pagination"];

/// Recognized list envelope
#[derive(Debug)]
enum ListShape<'a> {
    /// `[...]`
    Bare(&'a [Value]),
    /// `{items|data: [...], ...pagination}`
    Enveloped { items: &'a [Value], meta: PageMeta },
    /// Anything else: treated as an empty result
    Unrecognized,
}

impl ListShape<'_> {
    fn name(&self) -> &'static str {
        match self {
            ListShape::Bare(_) => "bare",
            ListShape::Enveloped { .. } => "enveloped",
            ListShape::Unrecognized => "unrecognized",
        }
    }
}

fn classify_list(payload: &Value) -> ListShape<'_> {
    classify_list_at(payload, 0)
}

/// A paginator may itself sit under `data`, so objects are looked into once.
fn classify_list_at(payload: &Value, depth: u8) -> ListShape<'_> {
    let map = match payload {
        Value::Array(items) => return ListShape::Bare(items),
        Value::Object(map) => map,
        _ => return ListShape::Unrecognized,
    };

    for key in LIST_KEYS {
        match map.get(key) {
            Some(Value::Array(items)) => {
                return ListShape::Enveloped {
                    items,
                    meta: read_page_meta(map),
                };
            }
            Some(inner @ Value::Object(_)) if depth == 0 => {
                if let ListShape::Enveloped { items, meta } = classify_list_at(inner, depth + 1) {
                    return ListShape::Enveloped {
                        items,
                        meta: merge_meta(meta, read_page_meta(map)),
                    };
                }
            }
            _ => {}
        }
    }
    ListShape::Unrecognized
}

/// Inner numbers win over the outer envelope's
fn merge_meta(inner: PageMeta, outer: PageMeta) -> PageMeta {
    PageMeta {
        count: inner.count.or(outer.count),
        total: inner.total.or(outer.total),
        page: inner.page.or(outer.page),
        pages: inner.pages.or(outer.pages),
    }
}

fn read_page_meta(map: &Map<String, Value>) -> PageMeta {
    let top = page_meta_of(map);
    let nested = META_KEYS
        .iter()
        .filter_map(|key| map.get(*key).and_then(Value::as_object))
        .map(page_meta_of)
        .fold(PageMeta::default(), merge_meta);
    merge_meta(top, nested)
}

fn page_meta_of(map: &Map<String, Value>) -> PageMeta {
    let first = |keys: &[&str]| keys.iter().find_map(|k| map.get(*k).and_then(read_u64));
    PageMeta {
        count: first(&["count"]),
        total: first(&["total"]),
        page: first(&["page", "current_page"]).and_then(|v| u32::try_from(v).ok()),
        pages: first(&["pages", "last_page", "total_pages"]).and_then(|v| u32::try_from(v).ok()),
    }
}

/// Non-negative integer, from a number or a numeric string
fn read_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn has_uuid(value: &Value) -> bool {
    value
        .get("uuid")
        .and_then(Value::as_str)
        .is_some_and(|u| !u.trim().is_empty())
}

/// The entity object: the payload itself, or its `data`
fn locate_entity(payload: &Value) -> Option<&Value> {
    if has_uuid(payload) {
        return Some(payload);
    }
    payload.get("data").filter(|data| has_uuid(data))
}

/// Decode a list payload into a page.
///
/// Never fails on an empty or unrecognized payload; fails with
/// `InvalidResponse` when a present item cannot be decoded.
pub fn normalize_list<T: DeserializeOwned>(payload: &Value) -> ClientResult<Page<T>> {
    let shape = classify_list(payload);
    tracing::debug!(shape = shape.name(), "normalizing list response");

    let (raw, meta) = match shape {
        ListShape::Bare(items) => (items, PageMeta::default()),
        ListShape::Enveloped { items, meta } => (items, meta),
        ListShape::Unrecognized => return Ok(Page::empty()),
    };

    let items = raw
        .iter()
        .enumerate()
        .map(|(i, value)| {
            T::deserialize(value)
                .map_err(|e| ClientError::InvalidResponse(format!("list item {}: {}", i, e)))
        })
        .collect::<ClientResult<Vec<T>>>()?;

    Ok(meta.into_page(items))
}

/// Decode a single-entity payload.
///
/// `what` names the resource in the `NotFound` message.
pub fn normalize_single<T: DeserializeOwned>(payload: &Value, what: &str) -> ClientResult<T> {
    let entity = locate_entity(payload).ok_or_else(|| {
        tracing::debug!(what, "no uuid-bearing entity in response");
        ClientError::NotFound(format!("{} not found in response", what))
    })?;
    T::deserialize(entity).map_err(|e| ClientError::InvalidResponse(format!("{}: {}", what, e)))
}

/// Decode an aggregate without identity (stats, bulk results).
///
/// Unwraps `{data: {...}}`; anything that is not an object decodes as `{}`,
/// so `T`'s serde defaults fill every field.
pub fn normalize_object<T: DeserializeOwned + Default>(payload: &Value) -> ClientResult<T> {
    let target = match payload {
        Value::Object(map) => match map.get("data") {
            Some(inner @ Value::Object(_)) => inner,
            _ => payload,
        },
        _ => {
            tracing::debug!("aggregate response is not an object, using defaults");
            return Ok(T::default());
        }
    };
    T::deserialize(target).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}
