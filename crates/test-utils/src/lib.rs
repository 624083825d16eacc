//! Mosaic test utilities.
//!
//! In-memory doubles for the host services a gallery layout depends on,
//! plus fixture builders for collections and items.

use async_trait::async_trait;
use dashmap::DashMap;
use mosaic_layout::host::{
    CollectionSource, HostServices, ItemQuery, Localizer, RelationSource, ResolvedRoute, Router,
};
use mosaic_layout::query::{ManualSortMove, QueryParams, QueryState};
use mosaic_layout::schema::{CollectionInfo, FieldInfo, Relation};
use parking_lot::RwLock;
use serde_json::{Value as JsonValue, json};
use std::sync::Arc;
use uuid::Uuid;

/// Start building a collection descriptor with the given primary key.
pub fn test_collection(name: &str, primary_key: &str) -> CollectionBuilder {
    CollectionBuilder {
        info: CollectionInfo {
            collection: name.to_string(),
            primary_key_field: Some(FieldInfo::new(primary_key)),
            fields: vec![FieldInfo::new(primary_key)],
            sort_field: None,
        },
    }
}

/// Builder for [`CollectionInfo`] fixtures.
#[derive(Debug, Clone)]
pub struct CollectionBuilder {
    info: CollectionInfo,
}

impl CollectionBuilder {
    /// Add a visible field.
    #[must_use]
    pub fn with_field(mut self, name: &str) -> Self {
        self.info.fields.push(FieldInfo::new(name));
        self
    }

    /// Add a hidden field.
    #[must_use]
    pub fn with_hidden_field(mut self, name: &str) -> Self {
        self.info.fields.push(FieldInfo::new(name).hidden());
        self
    }

    /// Set the manual-sort field.
    #[must_use]
    pub fn with_sort_field(mut self, name: &str) -> Self {
        self.info.sort_field = Some(name.to_string());
        self
    }

    /// Remove the primary key. Collections without one degrade the
    /// layout's selection and row-click handling to no-ops.
    #[must_use]
    pub fn without_primary_key(mut self) -> Self {
        self.info.primary_key_field = None;
        self
    }

    /// Finish building.
    pub fn build(self) -> CollectionInfo {
        self.info
    }
}

/// Create a gallery item with an integer primary key.
pub fn test_item(id: i64, title: &str) -> JsonValue {
    json!({ "id": id, "title": title })
}

/// Create a gallery item keyed by a fresh UUID string.
pub fn uuid_item(title: &str) -> JsonValue {
    json!({ "id": Uuid::now_v7().to_string(), "title": title })
}

/// Schema source backed by an in-memory registry.
#[derive(Default)]
pub struct StaticSchema {
    collections: DashMap<String, CollectionInfo>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection descriptor.
    pub fn insert(&self, info: CollectionInfo) {
        self.collections.insert(info.collection.clone(), info);
    }
}

impl CollectionSource for StaticSchema {
    fn collection(&self, collection: &str) -> Option<CollectionInfo> {
        self.collections.get(collection).map(|c| c.clone())
    }
}

/// Mutable relation graph, for exercising schema-change behavior.
#[derive(Default)]
pub struct MemoryRelations {
    relations: RwLock<Vec<Relation>>,
}

impl MemoryRelations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relation to the graph.
    pub fn add(&self, collection: &str, field: &str, related_collection: &str) {
        self.relations.write().push(Relation {
            collection: collection.to_string(),
            field: field.to_string(),
            related_collection: related_collection.to_string(),
        });
    }
}

impl RelationSource for MemoryRelations {
    fn relations(&self) -> Vec<Relation> {
        self.relations.read().clone()
    }
}

/// Query service double: returns a canned result and records every call.
#[derive(Default)]
pub struct StubQuery {
    result: RwLock<QueryState>,
    runs: RwLock<Vec<(String, QueryParams)>>,
    manual_sorts: RwLock<Vec<(String, ManualSortMove)>>,
}

impl StubQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the canned result entirely.
    pub fn set_result(&self, result: QueryState) {
        *self.result.write() = result;
    }

    /// Set the items the next fetch returns, with matching counts.
    pub fn set_items(&self, items: Vec<JsonValue>) {
        let count = items.len() as u64;
        self.set_result(QueryState {
            items,
            item_count: count,
            total_count: count,
            total_pages: 1,
            ..QueryState::default()
        });
    }

    /// Make the next fetch report a host-side error.
    pub fn fail_with(&self, message: &str) {
        self.set_result(QueryState {
            error: Some(Arc::new(anyhow::anyhow!(message.to_string()))),
            ..QueryState::default()
        });
    }

    /// Parameters of every recorded fetch, oldest first.
    pub fn runs(&self) -> Vec<(String, QueryParams)> {
        self.runs.read().clone()
    }

    /// Parameters of the most recent fetch.
    pub fn last_params(&self) -> Option<QueryParams> {
        self.runs.read().last().map(|(_, params)| params.clone())
    }

    /// Recorded manual-sort calls.
    pub fn manual_sorts(&self) -> Vec<(String, ManualSortMove)> {
        self.manual_sorts.read().clone()
    }
}

#[async_trait]
impl ItemQuery for StubQuery {
    async fn run(&self, collection: &str, params: &QueryParams) -> QueryState {
        self.runs
            .write()
            .push((collection.to_string(), params.clone()));
        self.result.read().clone()
    }

    async fn change_manual_sort(&self, collection: &str, to: ManualSortMove) -> anyhow::Result<()> {
        self.manual_sorts.write().push((collection.to_string(), to));
        Ok(())
    }
}

/// Router double that records navigations instead of performing them.
#[derive(Default)]
pub struct RecordingRouter {
    pushed: RwLock<Vec<ResolvedRoute>>,
    opened: RwLock<Vec<ResolvedRoute>>,
}

impl RecordingRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes navigated in-place, oldest first.
    pub fn pushed(&self) -> Vec<ResolvedRoute> {
        self.pushed.read().clone()
    }

    /// Routes opened in a new context, oldest first.
    pub fn opened(&self) -> Vec<ResolvedRoute> {
        self.opened.read().clone()
    }
}

impl Router for RecordingRouter {
    fn resolve(&self, path: &str) -> ResolvedRoute {
        ResolvedRoute {
            path: path.to_string(),
            href: format!("https://admin.example.test{path}"),
        }
    }

    fn push(&self, route: &ResolvedRoute) {
        self.pushed.write().push(route.clone());
    }

    fn open_new(&self, route: &ResolvedRoute) {
        self.opened.write().push(route.clone());
    }
}

/// Localizer double: echoes the message key plus its interpolation args,
/// so tests can assert on template selection and computed bounds.
#[derive(Default)]
pub struct KeyLocalizer;

impl Localizer for KeyLocalizer {
    fn translate(&self, key: &str, args: &[(&str, String)]) -> String {
        let mut out = key.to_string();
        for (name, value) in args {
            out.push_str(&format!(" {name}={value}"));
        }
        out
    }

    fn format_number(&self, value: u64) -> String {
        value.to_string()
    }
}

/// A complete in-memory host: every service double in one place, with the
/// concrete types still reachable for assertions.
pub struct TestHost {
    pub schema: Arc<StaticSchema>,
    pub relations: Arc<MemoryRelations>,
    pub query: Arc<StubQuery>,
    pub router: Arc<RecordingRouter>,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            schema: Arc::new(StaticSchema::new()),
            relations: Arc::new(MemoryRelations::new()),
            query: Arc::new(StubQuery::new()),
            router: Arc::new(RecordingRouter::new()),
        }
    }

    /// Bundle the doubles as the trait objects a layout expects.
    pub fn services(&self) -> HostServices {
        HostServices {
            schema: Arc::clone(&self.schema) as Arc<dyn CollectionSource>,
            relations: Arc::clone(&self.relations) as Arc<dyn RelationSource>,
            query: Arc::clone(&self.query) as Arc<dyn ItemQuery>,
            router: Arc::clone(&self.router) as Arc<dyn Router>,
            localizer: Arc::new(KeyLocalizer),
        }
    }
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_builder() {
        let info = test_collection("articles", "id")
            .with_field("title")
            .with_hidden_field("secret")
            .with_sort_field("weight")
            .build();

        assert_eq!(info.collection, "articles");
        assert_eq!(info.fields.len(), 3);
        assert_eq!(info.sort_field.as_deref(), Some("weight"));
        assert!(info.fields[2].hidden);
    }

    #[test]
    fn stub_query_records_runs() {
        let query = StubQuery::new();
        query.set_items(vec![test_item(1, "First")]);
        assert!(query.runs().is_empty());
        assert!(query.last_params().is_none());
    }

    #[test]
    fn router_resolves_href_from_path() {
        let router = RecordingRouter::new();
        let route = router.resolve("/content/articles/1");
        assert_eq!(route.href, "https://admin.example.test/content/articles/1");
        assert!(router.pushed().is_empty());
    }
}
