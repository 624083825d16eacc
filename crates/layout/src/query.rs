//! Query parameters and results exchanged with the host query service.
//!
//! The adapter only derives parameters and re-exposes results; pagination
//! math, filtering and manual-sort reordering happen on the host side.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Parameters handed to the host query service for one fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Sort tokens: field names, `-` prefix for descending.
    pub sort: Vec<String>,

    /// Items per page.
    pub limit: u32,

    /// 1-indexed page. Out-of-range pages are the query service's concern.
    pub page: u32,

    /// Fields to fetch. The gallery always fetches `*`; the persisted
    /// visible-field list only drives the renderer.
    pub fields: Vec<String>,

    /// Combined filter expression, passed through opaquely.
    pub filter: Option<Value>,

    /// Free-text search, passed through opaquely.
    pub search: Option<String>,
}

/// Result of the most recent fetch, re-exposed to the renderer unchanged.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    /// Loaded items for the current page.
    pub items: Vec<Value>,

    pub loading: bool,

    /// Host query error, unexamined; the renderer decides how to show it.
    pub error: Option<Arc<anyhow::Error>>,

    pub total_pages: u32,

    /// Count of items matching the active filter.
    pub item_count: u64,

    /// Count of all items in the collection, ignoring the filter.
    pub total_count: u64,
}

/// A sort choice coming from the renderer's column/option controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortChange {
    /// Field to sort by.
    pub by: String,

    /// Descending order.
    #[serde(default)]
    pub desc: bool,
}

/// Convert a sort choice into persisted sort tokens.
///
/// No choice (or an empty field name) clears the sort, letting the query
/// service fall back to its own default. Only single-token sorts are
/// produced; the gallery does not offer multi-column sorting.
pub fn sort_tokens(change: Option<&SortChange>) -> Vec<String> {
    match change {
        Some(change) if !change.by.is_empty() => {
            let token = if change.desc {
                format!("-{}", change.by)
            } else {
                change.by.clone()
            };
            vec![token]
        }
        _ => Vec::new(),
    }
}

/// Payload for the manual-sort passthrough: move `item` next to `to`,
/// both identified by primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualSortMove {
    pub item: Value,
    pub to: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_sort_token() {
        let change = SortChange {
            by: "name".to_string(),
            desc: false,
        };
        assert_eq!(sort_tokens(Some(&change)), vec!["name"]);
    }

    #[test]
    fn descending_sort_token() {
        let change = SortChange {
            by: "name".to_string(),
            desc: true,
        };
        assert_eq!(sort_tokens(Some(&change)), vec!["-name"]);
    }

    #[test]
    fn cleared_sort_produces_no_tokens() {
        assert!(sort_tokens(None).is_empty());

        let empty = SortChange {
            by: String::new(),
            desc: true,
        };
        assert!(sort_tokens(Some(&empty)).is_empty());
    }

    #[test]
    fn default_state_is_empty_and_idle() {
        let state = QueryState::default();
        assert!(state.items.is_empty());
        assert!(!state.loading);
        assert!(state.error.is_none());
    }
}
