//! Collection schema descriptors.
//!
//! Read-only views of the host schema service's data:
//! - FieldInfo / CollectionInfo: what the collection looks like
//! - Relation: schema-level links between collections
//! - File-field eligibility and default visible-field selection

use serde::{Deserialize, Serialize};

/// Synthetic field name the renderer injects for item thumbnails.
pub const THUMBNAIL_FIELD: &str = "$thumbnail";

/// The host's built-in file-storage collection.
pub const FILES_COLLECTION: &str = "system_files";

/// A single field in a collection's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Field name.
    pub field: String,

    /// Hidden fields are excluded from default visible-field selection.
    #[serde(default)]
    pub hidden: bool,
}

impl FieldInfo {
    /// Create a visible field descriptor.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            hidden: false,
        }
    }

    /// Mark the field hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Schema information for one collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection name.
    pub collection: String,

    /// Primary key field, if the collection has one.
    pub primary_key_field: Option<FieldInfo>,

    /// All fields in schema order.
    #[serde(default)]
    pub fields: Vec<FieldInfo>,

    /// Field that persists manual sort order, if configured.
    pub sort_field: Option<String>,
}

impl CollectionInfo {
    /// Empty descriptor for an unknown collection; every derived default
    /// degrades to empty rather than failing.
    pub fn unknown(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Self::default()
        }
    }
}

/// A schema-level link: `collection.field` references records in
/// `related_collection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub collection: String,
    pub field: String,
    pub related_collection: String,
}

/// Fields eligible to serve as a card image source.
///
/// A field qualifies if it is the synthetic thumbnail marker, or if a
/// relation points from it to the file-storage collection.
pub fn eligible_file_fields(
    collection: &str,
    fields: &[FieldInfo],
    relations: &[Relation],
) -> Vec<FieldInfo> {
    fields
        .iter()
        .filter(|field| {
            if field.field == THUMBNAIL_FIELD {
                return true;
            }

            relations.iter().any(|relation| {
                relation.collection == collection
                    && relation.field == field.field
                    && relation.related_collection == FILES_COLLECTION
            })
        })
        .cloned()
        .collect()
}

/// Default visible fields for a collection: the first four non-hidden
/// fields in schema order, names sorted afterwards.
pub fn default_visible_fields(fields: &[FieldInfo]) -> Vec<String> {
    let mut names: Vec<String> = fields
        .iter()
        .filter(|field| !field.hidden)
        .take(4)
        .map(|field| field.field.clone())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(collection: &str, field: &str, related: &str) -> Relation {
        Relation {
            collection: collection.to_string(),
            field: field.to_string(),
            related_collection: related.to_string(),
        }
    }

    #[test]
    fn thumbnail_marker_is_always_eligible() {
        let fields = vec![FieldInfo::new(THUMBNAIL_FIELD), FieldInfo::new("title")];
        let eligible = eligible_file_fields("articles", &fields, &[]);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].field, THUMBNAIL_FIELD);
    }

    #[test]
    fn file_relation_makes_field_eligible() {
        let fields = vec![FieldInfo::new("cover"), FieldInfo::new("author")];
        let relations = vec![
            relation("articles", "cover", FILES_COLLECTION),
            relation("articles", "author", "users"),
            relation("other", "cover", FILES_COLLECTION),
        ];

        let eligible = eligible_file_fields("articles", &fields, &relations);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].field, "cover");
    }

    #[test]
    fn default_fields_slice_before_sorting() {
        // Slice happens in schema order; only then are names sorted.
        let fields = vec![
            FieldInfo::new("zeta"),
            FieldInfo::new("published").hidden(),
            FieldInfo::new("beta"),
            FieldInfo::new("delta"),
            FieldInfo::new("gamma"),
            FieldInfo::new("alpha"),
        ];

        assert_eq!(
            default_visible_fields(&fields),
            vec!["beta", "delta", "gamma", "zeta"]
        );
    }

    #[test]
    fn default_fields_empty_schema() {
        assert!(default_visible_fields(&[]).is_empty());
    }

    #[test]
    fn unknown_collection_has_no_primary_key() {
        let info = CollectionInfo::unknown("missing");
        assert_eq!(info.collection, "missing");
        assert!(info.primary_key_field.is_none());
        assert!(info.fields.is_empty());
    }
}
