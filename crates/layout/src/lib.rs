//! Mosaic gallery layout.
//!
//! A gallery-style collection view adapter for CMS admin interfaces: it
//! derives query parameters from persisted layout state, relays results
//! from the host query service, formats the "showing X of Y" count, tracks
//! per-view display options (image source, title field), and turns row
//! clicks into selection toggles or router navigation.
//!
//! The heavy lifting (query execution, schema introspection, routing,
//! localization) belongs to the host and is reached through the traits in
//! [`host`].

pub mod count;
pub mod host;
pub mod layout;
pub mod query;
pub mod schema;
pub mod sync;

pub use host::{
    CollectionSource, HostServices, ItemQuery, Localizer, RelationSource, ResolvedRoute, Router,
};
pub use layout::{GalleryLayout, LayoutConfig};
pub use query::{ManualSortMove, QueryParams, QueryState, SortChange};
pub use schema::{CollectionInfo, FieldInfo, Relation};
pub use sync::{Selection, SyncedObject, SyncedProperty};
