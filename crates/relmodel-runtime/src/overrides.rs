//! Runtime override records

use relmodel_core::{AnnotationSet, EntityTypeId, OverridesView, StoreObjectIdentifier};

use crate::entity_type::RuntimeEntityType;

/// Facet overrides of a runtime entity type for one store object
///
/// Built once by the model compiler; the annotation set is frozen on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEntityTypeOverrides {
    entity_type: EntityTypeId,
    store_object: StoreObjectIdentifier,
    annotations: AnnotationSet,
}

impl RuntimeEntityTypeOverrides {
    /// Create the overrides of `entity_type` for `store_object`
    pub fn new(
        entity_type: &RuntimeEntityType,
        store_object: StoreObjectIdentifier,
        annotations: AnnotationSet,
    ) -> Self {
        Self {
            entity_type: entity_type.id(),
            store_object,
            annotations: annotations.into_frozen(),
        }
    }
}

impl OverridesView for RuntimeEntityTypeOverrides {
    fn entity_type(&self) -> EntityTypeId {
        self.entity_type
    }

    fn store_object(&self) -> &StoreObjectIdentifier {
        &self.store_object
    }

    fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relmodel_core::{ConfigurationSource, ModelError};

    fn customer() -> RuntimeEntityType {
        RuntimeEntityType::new(EntityTypeId(0), "Customer", AnnotationSet::new())
    }

    #[test]
    fn reports_entity_type_and_store_object() {
        let entity_type = customer();
        let view = StoreObjectIdentifier::view("CustomerView", Some("sales".to_string()));
        let overrides = RuntimeEntityTypeOverrides::new(&entity_type, view.clone(), AnnotationSet::new());

        assert_eq!(overrides.entity_type(), entity_type.id());
        assert_eq!(overrides.store_object(), &view);
        assert!(overrides.is_read_only());
    }

    #[test]
    fn annotations_reject_mutation() {
        let mut annotations = AnnotationSet::new();
        annotations.set("ColumnName", "customer_id", ConfigurationSource::Explicit).unwrap();

        let overrides = RuntimeEntityTypeOverrides::new(
            &customer(),
            StoreObjectIdentifier::table("Customers", None),
            annotations,
        );

        let mut copy = overrides.annotations().clone();
        let err = copy.set("ColumnName", "id", ConfigurationSource::Explicit).unwrap_err();
        assert!(matches!(err, ModelError::ReadOnly { .. }));
        assert!(copy.remove("ColumnName", ConfigurationSource::Explicit).is_err());

        assert_eq!(
            overrides.find_annotation("ColumnName").and_then(|a| a.value.as_str()),
            Some("customer_id")
        );
    }
}
