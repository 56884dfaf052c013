//! Entity type identity and the shared override-record view

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::annotation::{Annotation, AnnotationSet};
use crate::store_object::StoreObjectIdentifier;

/// Handle to an entity type, issued by the model builder
///
/// Ids are assigned in insertion order and carried unchanged into the
/// runtime model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityTypeId(pub u32);

impl fmt::Display for EntityTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read access shared by mutable and runtime override records
pub trait OverridesView {
    /// Entity type the overrides apply to
    fn entity_type(&self) -> EntityTypeId;

    /// Store object the overrides apply to
    fn store_object(&self) -> &StoreObjectIdentifier;

    /// Override facets
    fn annotations(&self) -> &AnnotationSet;

    /// Whether the record can still be modified
    fn is_read_only(&self) -> bool {
        self.annotations().is_read_only()
    }

    fn find_annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations().get(name)
    }
}
