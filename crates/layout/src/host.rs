//! Host collaborator interfaces.
//!
//! The layout never reaches for ambient globals. Every host service it
//! needs (schema introspection, the relation graph, query execution,
//! routing, localization) is injected through these traits and bundled
//! in [`HostServices`].

use crate::query::{ManualSortMove, QueryParams, QueryState};
use crate::schema::{CollectionInfo, Relation};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Schema introspection: collection descriptors by name.
pub trait CollectionSource: Send + Sync {
    fn collection(&self, collection: &str) -> Option<CollectionInfo>;
}

/// The host's relation graph.
///
/// Pulled on every read so eligibility derivations stay current with
/// schema changes.
pub trait RelationSource: Send + Sync {
    fn relations(&self) -> Vec<Relation>;
}

/// Query execution service. Owns all I/O, debouncing and cancellation;
/// the layout only supplies parameters and stores what comes back.
#[async_trait]
pub trait ItemQuery: Send + Sync {
    /// Run one fetch. Failures are reported inside [`QueryState::error`]
    /// rather than as a hard error, so a failed fetch still yields counts
    /// and flags the renderer can display.
    async fn run(&self, collection: &str, params: &QueryParams) -> QueryState;

    /// Reorder an item via the collection's manual-sort field.
    async fn change_manual_sort(&self, collection: &str, to: ManualSortMove) -> Result<()>;
}

/// A path resolved by the host router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Application-internal path.
    pub path: String,

    /// Full href, used when opening a new browsing context.
    pub href: String,
}

/// Host navigation stack.
pub trait Router: Send + Sync {
    fn resolve(&self, path: &str) -> ResolvedRoute;

    /// Navigate the current context.
    fn push(&self, route: &ResolvedRoute);

    /// Open the route in a new browsing context.
    fn open_new(&self, route: &ResolvedRoute);
}

/// Locale-aware message and number formatting.
pub trait Localizer: Send + Sync {
    /// Format the message for `key`, interpolating `args`.
    fn translate(&self, key: &str, args: &[(&str, String)]) -> String;

    /// Locale-aware number formatting (digit grouping etc.).
    fn format_number(&self, value: u64) -> String;
}

/// Bundle of host services injected into the layout.
#[derive(Clone)]
pub struct HostServices {
    pub schema: Arc<dyn CollectionSource>,
    pub relations: Arc<dyn RelationSource>,
    pub query: Arc<dyn ItemQuery>,
    pub router: Arc<dyn Router>,
    pub localizer: Arc<dyn Localizer>,
}
