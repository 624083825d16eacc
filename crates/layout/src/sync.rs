//! Synced state shared with the host persistence layer.
//!
//! Layout state (pagination, sort, display options) is owned by the host
//! and survives navigation; this module provides the handles the adapter
//! uses to read and update it. All writes are copy-on-write: a new
//! snapshot replaces the old one, so a reader holding the previous
//! snapshot never observes a torn update.

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Shared handle to a persisted JSON object (layout query, layout options).
///
/// Cloning the handle shares the underlying object.
#[derive(Clone, Default)]
pub struct SyncedObject {
    inner: Arc<RwLock<Arc<Map<String, Value>>>>,
}

impl SyncedObject {
    /// Wrap an existing persisted object.
    pub fn new(initial: Map<String, Value>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// Current snapshot of the whole object.
    pub fn snapshot(&self) -> Arc<Map<String, Value>> {
        Arc::clone(&self.inner.read())
    }

    /// Read one key from the current snapshot.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().get(key).cloned()
    }

    /// Merge `{key: value}` into a shallow copy of the object and swap the
    /// snapshot. All other keys are left untouched.
    pub fn merge(&self, key: &str, value: Value) {
        let mut guard = self.inner.write();
        let mut next = Map::clone(&guard);
        next.insert(key.to_string(), value);
        *guard = Arc::new(next);
    }
}

/// A read/write accessor over one key of a [`SyncedObject`].
///
/// Reads return the stored value when present, else a computed default;
/// the default is never persisted until the first write.
pub struct SyncedProperty<T> {
    object: SyncedObject,
    key: &'static str,
    default: Box<dyn Fn() -> T + Send + Sync>,
}

impl<T: Serialize + DeserializeOwned> SyncedProperty<T> {
    /// Bind `key` on `object` with a default provider.
    pub fn new(
        object: SyncedObject,
        key: &'static str,
        default: impl Fn() -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            object,
            key,
            default: Box::new(default),
        }
    }

    /// Stored value if present and well-typed, else the default.
    pub fn get(&self) -> T {
        self.object
            .get(self.key)
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_else(|| (self.default)())
    }

    /// Merge the new value into the backing object.
    pub fn set(&self, value: T) {
        match serde_json::to_value(value) {
            Ok(json) => self.object.merge(self.key, json),
            Err(error) => {
                tracing::warn!(key = self.key, error = %error, "failed to serialize layout value");
            }
        }
    }
}

/// Externally-owned list of selected primary-key values.
///
/// Updated by full-list replacement, same copy-on-write contract as
/// [`SyncedObject`].
#[derive(Clone, Default)]
pub struct Selection {
    inner: Arc<RwLock<Arc<Vec<Value>>>>,
}

impl Selection {
    /// Wrap an existing selection list.
    pub fn new(initial: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// Current snapshot of the selected keys.
    pub fn get(&self) -> Arc<Vec<Value>> {
        Arc::clone(&self.inner.read())
    }

    /// Replace the whole selection.
    pub fn set(&self, keys: Vec<Value>) {
        *self.inner.write() = Arc::new(keys);
    }

    /// Whether a primary key is currently selected.
    pub fn contains(&self, key: &Value) -> bool {
        self.inner.read().contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object_with(key: &str, value: Value) -> SyncedObject {
        let mut map = Map::new();
        map.insert(key.to_string(), value);
        SyncedObject::new(map)
    }

    #[test]
    fn merge_preserves_other_keys() {
        let object = object_with("limit", json!(50));
        object.merge("page", json!(3));

        let snapshot = object.snapshot();
        assert_eq!(snapshot.get("limit"), Some(&json!(50)));
        assert_eq!(snapshot.get("page"), Some(&json!(3)));
    }

    #[test]
    fn old_snapshot_survives_merge() {
        let object = object_with("page", json!(1));
        let before = object.snapshot();
        object.merge("page", json!(2));

        assert_eq!(before.get("page"), Some(&json!(1)));
        assert_eq!(object.get("page"), Some(json!(2)));
    }

    #[test]
    fn property_falls_back_to_default() {
        let property: SyncedProperty<u32> = SyncedProperty::new(SyncedObject::default(), "page", || 1);
        assert_eq!(property.get(), 1);
    }

    #[test]
    fn property_prefers_stored_value() {
        let object = object_with("limit", json!(100));
        let property: SyncedProperty<u32> = SyncedProperty::new(object, "limit", || 25);
        assert_eq!(property.get(), 100);
    }

    #[test]
    fn property_write_is_visible_through_object() {
        let object = SyncedObject::default();
        let property: SyncedProperty<Vec<String>> =
            SyncedProperty::new(object.clone(), "sort", Vec::new);

        property.set(vec!["-name".to_string()]);
        assert_eq!(object.get("sort"), Some(json!(["-name"])));
        assert_eq!(property.get(), vec!["-name".to_string()]);
    }

    #[test]
    fn stored_null_is_respected_for_optional_values() {
        // An explicit null means "unset by the user", not "use the default".
        let object = object_with("imageSource", Value::Null);
        let property: SyncedProperty<Option<String>> =
            SyncedProperty::new(object, "imageSource", || Some("cover".to_string()));
        assert_eq!(property.get(), None);
    }

    #[test]
    fn malformed_stored_value_falls_back_to_default() {
        let object = object_with("limit", json!("not-a-number"));
        let property: SyncedProperty<u32> = SyncedProperty::new(object, "limit", || 25);
        assert_eq!(property.get(), 25);
    }

    #[test]
    fn selection_replacement_keeps_old_snapshot() {
        let selection = Selection::new(vec![json!(1)]);
        let before = selection.get();

        selection.set(vec![json!(1), json!(2)]);
        assert_eq!(before.len(), 1);
        assert_eq!(selection.get().len(), 2);
        assert!(selection.contains(&json!(2)));
    }
}
