//! The gallery layout adapter.
//!
//! Bridges the generic collection-browsing contract (collection, filter,
//! search, persisted layout state, selection) to the host query service
//! and router, and derives everything the card renderer reads: items,
//! counts, pagination and sort bindings, display options.

use crate::count::format_items_count;
use crate::host::HostServices;
use crate::query::{ManualSortMove, QueryParams, QueryState, SortChange, sort_tokens};
use crate::schema::{CollectionInfo, FieldInfo, default_visible_fields, eligible_file_fields};
use crate::sync::{Selection, SyncedObject, SyncedProperty};
use anyhow::Result;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Externally-owned inputs for one gallery view.
#[derive(Clone, Default)]
pub struct LayoutConfig {
    /// Collection being browsed.
    pub collection: String,

    /// Combined filter passed through to the query service.
    pub filter: Option<Value>,

    /// The user-authored portion of the filter. Distinguishes "narrowed by
    /// the user" from a fixed preset filter when picking the count message;
    /// the adapter never inspects the value itself.
    pub filter_user: Option<Value>,

    /// Free-text search passed through to the query service.
    pub search: Option<String>,

    /// Read-only views ignore row clicks entirely.
    pub readonly: bool,

    /// Force toggle-select on row click even with an empty selection.
    pub select_mode: bool,

    /// Selected primary keys, owned by the host.
    pub selection: Selection,

    /// Persisted pagination/sort/visible-fields state.
    pub layout_query: SyncedObject,

    /// Persisted display preferences.
    pub layout_options: SyncedObject,
}

/// Gallery-style collection view adapter.
pub struct GalleryLayout {
    services: HostServices,
    config: LayoutConfig,
    info: CollectionInfo,

    page: SyncedProperty<u32>,
    limit: SyncedProperty<u32>,
    sort: SyncedProperty<Vec<String>>,
    fields: SyncedProperty<Vec<String>>,

    image_source: SyncedProperty<Option<String>>,
    title_field: SyncedProperty<String>,

    state: RwLock<QueryState>,
}

impl GalleryLayout {
    /// Wire up a gallery view over externally-owned state.
    ///
    /// An unknown collection degrades to an empty descriptor: defaults
    /// come out empty and selection/row-click become no-ops.
    pub fn new(config: LayoutConfig, services: HostServices) -> Self {
        let info = services
            .schema
            .collection(&config.collection)
            .unwrap_or_else(|| CollectionInfo::unknown(&config.collection));

        let page = SyncedProperty::new(config.layout_query.clone(), "page", || 1);
        let limit = SyncedProperty::new(config.layout_query.clone(), "limit", || 25);

        let primary_key = info.primary_key_field.as_ref().map(|f| f.field.clone());
        let sort = SyncedProperty::new(config.layout_query.clone(), "sort", move || {
            primary_key.iter().cloned().collect()
        });

        let schema_fields = info.fields.clone();
        let fields = SyncedProperty::new(config.layout_query.clone(), "fields", move || {
            default_visible_fields(&schema_fields)
        });

        // The image-source fallback is fixed at setup from the relations
        // known right now; `file_fields()` stays live but this default does
        // not follow it.
        let initial_file_fields = eligible_file_fields(
            &info.collection,
            &info.fields,
            &services.relations.relations(),
        );
        let image_fallback = initial_file_fields.first().map(|f| f.field.clone());
        let image_source = SyncedProperty::new(config.layout_options.clone(), "imageSource", move || {
            image_fallback.clone()
        });

        let title_field = SyncedProperty::new(config.layout_options.clone(), "titleField", || {
            "title".to_string()
        });

        Self {
            services,
            config,
            info,
            page,
            limit,
            sort,
            fields,
            image_source,
            title_field,
            state: RwLock::new(QueryState::default()),
        }
    }

    /// Collection descriptor for the view.
    pub fn info(&self) -> &CollectionInfo {
        &self.info
    }

    pub fn primary_key_field(&self) -> Option<&FieldInfo> {
        self.info.primary_key_field.as_ref()
    }

    /// Manual-sort field, if the collection has one.
    pub fn sort_field(&self) -> Option<&str> {
        self.info.sort_field.as_deref()
    }

    pub fn filter(&self) -> Option<&Value> {
        self.config.filter.as_ref()
    }

    pub fn search(&self) -> Option<&str> {
        self.config.search.as_deref()
    }

    // --- Pagination and sorting ---

    pub fn page(&self) -> u32 {
        self.page.get()
    }

    /// Jump to a page. No bounds validation here; out-of-range pages are
    /// the query service's concern.
    pub fn to_page(&self, page: u32) {
        self.page.set(page);
    }

    pub fn limit(&self) -> u32 {
        self.limit.get()
    }

    pub fn set_limit(&self, limit: u32) {
        self.limit.set(limit);
    }

    /// Persisted sort tokens; defaults to the primary key once one is
    /// known, empty otherwise.
    pub fn sort(&self) -> Vec<String> {
        self.sort.get()
    }

    /// Apply a sort choice from the renderer's controls.
    pub fn on_sort_change(&self, change: Option<SortChange>) {
        self.sort.set(sort_tokens(change.as_ref()));
    }

    /// Visible fields for the renderer; defaults to the first four
    /// non-hidden schema fields.
    pub fn fields(&self) -> Vec<String> {
        self.fields.get()
    }

    pub fn set_fields(&self, fields: Vec<String>) {
        self.fields.set(fields);
    }

    // --- Data ---

    /// Parameters for the next fetch. The gallery always fetches all
    /// fields; the visible-field list is a renderer concern.
    pub fn query_params(&self) -> QueryParams {
        QueryParams {
            sort: self.sort(),
            limit: self.limit(),
            page: self.page(),
            fields: vec!["*".to_string()],
            filter: self.config.filter.clone(),
            search: self.config.search.clone(),
        }
    }

    /// Re-run the query with current parameters and store the result.
    /// Previous items stay visible while the fetch is in flight.
    pub async fn refresh(&self) {
        self.state.write().loading = true;

        let params = self.query_params();
        let result = self.services.query.run(&self.info.collection, &params).await;
        *self.state.write() = result;
    }

    pub fn items(&self) -> Vec<Value> {
        self.state.read().items.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    /// Host query error, passed through unexamined.
    pub fn error(&self) -> Option<Arc<anyhow::Error>> {
        self.state.read().error.clone()
    }

    pub fn total_pages(&self) -> u32 {
        self.state.read().total_pages
    }

    pub fn item_count(&self) -> u64 {
        self.state.read().item_count
    }

    pub fn total_count(&self) -> u64 {
        self.state.read().total_count
    }

    /// Reorder an item via the collection's manual-sort field.
    pub async fn change_manual_sort(&self, to: ManualSortMove) -> Result<()> {
        self.services
            .query
            .change_manual_sort(&self.info.collection, to)
            .await
    }

    /// Localized "showing X of Y" string for the current page and counts.
    pub fn showing_count(&self) -> String {
        let state = self.state.read();
        let filtered =
            state.item_count < state.total_count && self.config.filter_user.is_some();

        format_items_count(
            self.services.localizer.as_ref(),
            state.item_count,
            self.page(),
            self.limit(),
            filtered,
        )
    }

    // --- Selection and row interaction ---

    /// Select every currently loaded item. Only the loaded page is
    /// selected, not all matching rows. No-op without a primary key.
    pub fn select_all(&self) {
        let Some(pk_field) = self.info.primary_key_field.as_ref() else {
            return;
        };

        let state = self.state.read();
        let keys: Vec<Value> = state
            .items
            .iter()
            .filter_map(|item| item.get(&pk_field.field).cloned())
            .collect();

        debug!(collection = %self.info.collection, count = keys.len(), "select all loaded items");
        self.config.selection.set(keys);
    }

    /// Handle a row click: toggle selection when select mode is on or a
    /// selection already exists, otherwise navigate to the item.
    pub fn on_row_click(&self, item: &Value, modifier_held: bool) {
        if self.config.readonly {
            return;
        }

        let Some(pk_field) = self.info.primary_key_field.as_ref() else {
            return;
        };

        let Some(primary_key) = item.get(&pk_field.field) else {
            return;
        };

        if self.config.select_mode || !self.config.selection.is_empty() {
            self.toggle_selected(primary_key);
        } else {
            let route = self.services.router.resolve(&self.item_route(primary_key));

            if modifier_held {
                debug!(href = %route.href, "opening item in new context");
                self.services.router.open_new(&route);
            } else {
                debug!(path = %route.path, "navigating to item");
                self.services.router.push(&route);
            }
        }
    }

    fn toggle_selected(&self, primary_key: &Value) {
        let current = self.config.selection.get();

        let next: Vec<Value> = if current.contains(primary_key) {
            current
                .iter()
                .filter(|key| *key != primary_key)
                .cloned()
                .collect()
        } else {
            let mut next = Vec::clone(&current);
            next.push(primary_key.clone());
            next
        };

        self.config.selection.set(next);
    }

    fn item_route(&self, primary_key: &Value) -> String {
        let segment = match primary_key {
            Value::String(key) => key.clone(),
            other => other.to_string(),
        };

        format!(
            "/content/{}/{}",
            self.info.collection,
            urlencoding::encode(&segment)
        )
    }

    // --- Display options ---

    /// Fields eligible as a card image source, recomputed from the live
    /// relation graph on every read.
    pub fn file_fields(&self) -> Vec<FieldInfo> {
        eligible_file_fields(
            &self.info.collection,
            &self.info.fields,
            &self.services.relations.relations(),
        )
    }

    /// Field supplying the card image; defaults to the first file field
    /// known at setup time.
    pub fn image_source(&self) -> Option<String> {
        self.image_source.get()
    }

    pub fn set_image_source(&self, field: Option<String>) {
        self.image_source.set(field);
    }

    /// Field supplying the card title; defaults to `title`.
    pub fn title_field(&self) -> String {
        self.title_field.get()
    }

    pub fn set_title_field(&self, field: String) {
        self.title_field.set(field);
    }
}
