//! Runtime entity types

use relmodel_core::{Annotation, AnnotationSet, EntityTypeId};

/// An entity type in a finalized model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEntityType {
    id: EntityTypeId,
    name: String,
    annotations: AnnotationSet,
}

impl RuntimeEntityType {
    /// Create a runtime entity type. The annotations are frozen.
    pub fn new(id: EntityTypeId, name: impl Into<String>, annotations: AnnotationSet) -> Self {
        Self {
            id,
            name: name.into(),
            annotations: annotations.into_frozen(),
        }
    }

    pub fn id(&self) -> EntityTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn find_annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.get(name)
    }
}
