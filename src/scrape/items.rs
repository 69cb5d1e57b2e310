//! Item discovery and normalization over the parsed page state
//!
//! Two strategies, applied in order: the `ItemModule` mapping older pages
//! expose at the top level, then a heuristic walk of the object graph.
//! Field reads go through ordered accessor tables so the alternatives stay
//! auditable — the upstream page format is undocumented and the field names
//! vary between page generations.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::core::config::limits;
use crate::core::error::{ScrapeError, ScrapeResult};

/// One normalized video record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: Option<String>,
    pub desc: String,
    pub cover: Option<String>,
    pub play_addr: Option<String>,
    pub download_addr: Option<String>,
}

/// The container of per-item records, keyed by id, that older pages expose
/// at the top level.
const ITEM_MODULE_KEY: &str = "ItemModule";

/// The nested scope newer rehydration payloads wrap everything in.
const DEFAULT_SCOPE_KEY: &str = "__DEFAULT_SCOPE__";

/// Key paths tried, in order, when reading the item identifier.
const ID_PATHS: &[&[&str]] = &[
    &["id"],
    &["itemId"],
    &["item_id"],
    &["awemeId"],
    &["aweme_id"],
];

/// Key paths tried, in order, for the display description.
const DESC_PATHS: &[&[&str]] = &[&["desc"], &["description"], &["title"]];

/// Key paths tried, in order, for the cover image URL.
const COVER_PATHS: &[&[&str]] = &[
    &["video", "cover"],
    &["video", "originCover"],
    &["video", "dynamicCover"],
    &["itemInfos", "covers"],
];

/// Key paths tried, in order, for the playable address. The leaf may be a
/// list; the first element is taken.
const PLAY_ADDR_PATHS: &[&[&str]] = &[
    &["video", "playAddr"],
    &["video", "play_addr", "url_list"],
    &["itemInfos", "video", "urls"],
];

/// Key paths tried, in order, for the download address.
const DOWNLOAD_ADDR_PATHS: &[&[&str]] = &[
    &["video", "downloadAddr"],
    &["video", "download_addr", "url_list"],
];

/// Walk one key path into `item`.
fn lookup<'a>(item: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = item;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}

/// Resolve a leaf to a string: strings pass through, numbers are formatted,
/// lists contribute their first element. Anything else is a miss.
fn leaf_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(arr) => arr.first().and_then(leaf_string),
        _ => None,
    }
}

/// First path in `paths` that resolves to a usable string.
fn first_string(item: &Value, paths: &[&[&str]]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| lookup(item, path).and_then(leaf_string))
}

/// Reshape one raw candidate record. Missing fields become null/empty —
/// never an error; the upstream shape is not ours to rely on.
pub fn normalize_item(raw: &Value) -> VideoItem {
    VideoItem {
        id: first_string(raw, ID_PATHS),
        desc: first_string(raw, DESC_PATHS).unwrap_or_default(),
        cover: first_string(raw, COVER_PATHS),
        play_addr: first_string(raw, PLAY_ADDR_PATHS),
        download_addr: first_string(raw, DOWNLOAD_ADDR_PATHS),
    }
}

/// Heuristic: does this object look like a single item record?
/// True when it carries a recognizable identifier field or a nested video
/// object.
fn looks_like_item(obj: &serde_json::Map<String, Value>) -> bool {
    ID_PATHS.iter().any(|path| obj.contains_key(path[0]))
        || obj.get("video").map(Value::is_object).unwrap_or(false)
}

/// Recursive search for item records.
///
/// Pure function over the parsed tree. Arrays recurse per element; objects
/// that classify as items are collected, other objects recurse into their
/// values; scalar leaves are no-ops. Depth-limited so pathological nesting
/// in the untrusted payload cannot run away.
fn search_value<'a>(value: &'a Value, depth: usize, out: &mut Vec<&'a Value>) {
    if depth >= limits::MAX_SEARCH_DEPTH {
        return;
    }
    match value {
        Value::Array(arr) => {
            for entry in arr {
                search_value(entry, depth + 1, out);
            }
        }
        Value::Object(obj) => {
            if looks_like_item(obj) {
                out.push(value);
            } else {
                for child in obj.values() {
                    search_value(child, depth + 1, out);
                }
            }
        }
        _ => {}
    }
}

/// Gather raw candidate records from the parsed page.
fn find_candidates(data: &Value) -> Vec<&Value> {
    // Strategy 1: the ItemModule mapping, values in insertion order.
    if let Some(module) = data.get(ITEM_MODULE_KEY).and_then(Value::as_object) {
        if !module.is_empty() {
            return module.values().collect();
        }
    }

    // Strategy 2: heuristic walk, rooted at the rehydration scope when
    // present, else the whole structure.
    let root = data.get(DEFAULT_SCOPE_KEY).unwrap_or(data);
    let mut found = Vec::new();
    search_value(root, 0, &mut found);
    found
}

/// First top-level keys of the parsed structure, for the empty-result
/// diagnostic.
fn top_level_keys(data: &Value) -> Vec<String> {
    match data.as_object() {
        Some(obj) => obj.keys().take(limits::TOP_KEYS_SHOWN).cloned().collect(),
        None => Vec::new(),
    }
}

/// Extract, normalize, deduplicate and cap the item list.
///
/// Candidates without an identifier are dropped; duplicates keep the
/// first-seen record; the result is capped at [`limits::MAX_ITEMS`].
pub fn collect_items(data: &Value) -> ScrapeResult<Vec<VideoItem>> {
    let candidates = find_candidates(data);

    let mut seen = HashSet::new();
    let mut items = Vec::new();
    for raw in candidates {
        let item = normalize_item(raw);
        let Some(id) = item.id.clone() else { continue };
        if !seen.insert(id) {
            continue;
        }
        items.push(item);
        if items.len() >= limits::MAX_ITEMS {
            break;
        }
    }

    if items.is_empty() {
        return Err(ScrapeError::NoItems {
            keys: top_level_keys(data),
        });
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_normalize_item_field_alternatives() {
        let raw = json!({
            "awemeId": "42",
            "description": "second choice",
            "video": { "originCover": "https://img/oc.jpg" }
        });
        let item = normalize_item(&raw);

        assert_eq!(item.id.as_deref(), Some("42"));
        assert_eq!(item.desc, "second choice");
        assert_eq!(item.cover.as_deref(), Some("https://img/oc.jpg"));
        assert_eq!(item.play_addr, None);
        assert_eq!(item.download_addr, None);
    }

    #[test]
    fn test_normalize_item_prefers_earlier_paths() {
        let raw = json!({
            "id": "first",
            "itemId": "later",
            "desc": "primary",
            "title": "fallback"
        });
        let item = normalize_item(&raw);

        assert_eq!(item.id.as_deref(), Some("first"));
        assert_eq!(item.desc, "primary");
    }

    #[test]
    fn test_normalize_item_numeric_id() {
        let raw = json!({ "id": 7350000000000000001u64 });
        let item = normalize_item(&raw);
        assert_eq!(item.id.as_deref(), Some("7350000000000000001"));
    }

    #[test]
    fn test_normalize_item_play_addr_list_takes_first() {
        let raw = json!({
            "id": "1",
            "video": { "play_addr": { "url_list": ["https://a/play", "https://b/play"] } }
        });
        let item = normalize_item(&raw);
        assert_eq!(item.play_addr.as_deref(), Some("https://a/play"));
    }

    #[test]
    fn test_normalize_item_missing_everything() {
        let item = normalize_item(&json!({}));
        assert_eq!(
            item,
            VideoItem {
                id: None,
                desc: String::new(),
                cover: None,
                play_addr: None,
                download_addr: None,
            }
        );
    }

    #[test]
    fn test_item_module_strategy_preserves_order() {
        let data = json!({
            "ItemModule": {
                "111": { "id": "111", "desc": "first" },
                "222": { "id": "222", "desc": "second" }
            }
        });
        let items = collect_items(&data).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_deref(), Some("111"));
        assert_eq!(items[0].desc, "first");
        assert_eq!(items[1].id.as_deref(), Some("222"));
        assert_eq!(items[1].desc, "second");
    }

    #[test]
    fn test_recursive_strategy_finds_nested_items() {
        let data = json!({
            "__DEFAULT_SCOPE__": {
                "webapp.user-detail": {
                    "itemList": [
                        { "id": "a", "desc": "one" },
                        { "id": "b", "desc": "two" }
                    ]
                }
            }
        });
        let items = collect_items(&data).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_deref(), Some("a"));
        assert_eq!(items[1].id.as_deref(), Some("b"));
    }

    #[test]
    fn test_recursive_strategy_classifies_by_video_field() {
        // No id-ish key on the wrapper, but a nested video object marks it
        // as an item record; the id then resolves to nothing and it is
        // dropped during dedup.
        let data = json!({
            "feed": [
                { "video": { "playAddr": "https://a/play" } },
                { "aweme_id": "z", "video": { "playAddr": "https://z/play" } }
            ]
        });
        let items = collect_items(&data).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id.as_deref(), Some("z"));
    }

    #[test]
    fn test_recursive_strategy_ignores_scalar_leaves() {
        let data = json!({
            "numbers": [1, 2, 3],
            "strings": ["x", "y"],
            "null": null,
            "nested": { "inner": { "id": "found", "desc": "" } }
        });
        let items = collect_items(&data).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id.as_deref(), Some("found"));
    }

    #[test]
    fn test_depth_guard_bounds_search() {
        // Wrap an item record deeper than the guard allows
        let mut value = json!({ "id": "deep" });
        for _ in 0..(limits::MAX_SEARCH_DEPTH + 8) {
            value = json!({ "wrap": value });
        }

        match collect_items(&value) {
            Err(ScrapeError::NoItems { .. }) => {}
            other => panic!("Expected NoItems, got {:?}", other),
        }
    }

    #[test]
    fn test_dedup_keeps_first_seen() {
        let data = json!({
            "feed": [
                { "id": "dup", "desc": "keep me" },
                { "id": "dup", "desc": "drop me" },
                { "id": "other", "desc": "also kept" }
            ]
        });
        let items = collect_items(&data).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].desc, "keep me");
        assert_eq!(items[1].id.as_deref(), Some("other"));
    }

    #[test]
    fn test_candidates_without_id_are_dropped() {
        let data = json!({
            "feed": [
                { "video": { "playAddr": "https://x" } },
                { "desc": "no identifier", "video": {} }
            ]
        });

        match collect_items(&data) {
            Err(ScrapeError::NoItems { keys }) => assert_eq!(keys, vec!["feed"]),
            other => panic!("Expected NoItems, got {:?}", other),
        }
    }

    #[test]
    fn test_cap_at_thirty_items() {
        let candidates: Vec<Value> = (0..40)
            .map(|i| json!({ "id": format!("id-{}", i), "desc": format!("video {}", i) }))
            .collect();
        let data = json!({ "feed": candidates });

        let items = collect_items(&data).unwrap();

        assert_eq!(items.len(), limits::MAX_ITEMS);
        assert_eq!(items[0].id.as_deref(), Some("id-0"));
        assert_eq!(items[29].id.as_deref(), Some("id-29"));
    }

    #[test]
    fn test_empty_item_module_falls_through_to_search() {
        let data = json!({
            "ItemModule": {},
            "feed": [ { "id": "via-search", "desc": "" } ]
        });
        let items = collect_items(&data).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id.as_deref(), Some("via-search"));
    }

    #[test]
    fn test_no_items_reports_top_level_keys() {
        let obj: serde_json::Map<String, Value> = (0..25)
            .map(|i| (format!("key{:02}", i), json!("scalar")))
            .collect();
        let data = Value::Object(obj);

        match collect_items(&data) {
            Err(ScrapeError::NoItems { keys }) => {
                assert_eq!(keys.len(), limits::TOP_KEYS_SHOWN);
                assert_eq!(keys[0], "key00");
            }
            other => panic!("Expected NoItems, got {:?}", other),
        }
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = VideoItem {
            id: Some("1".to_string()),
            desc: "d".to_string(),
            cover: None,
            play_addr: Some("https://p".to_string()),
            download_addr: None,
        };
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["playAddr"], "https://p");
        assert_eq!(value["downloadAddr"], Value::Null);
        assert_eq!(value["cover"], Value::Null);
    }
}
