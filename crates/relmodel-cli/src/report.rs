//! JSON report of a finalized model

use serde::Serialize;
use std::collections::BTreeMap;

use relmodel_builder::OverridesView;
use relmodel_core::{AnnotationSet, AnnotationValue, StoreObjectIdentifier};
use relmodel_runtime::{RuntimeEntityType, RuntimeModel};

/// Entity types and their overrides, in registry order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    pub entity_types: Vec<EntityTypeReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityTypeReport {
    pub name: String,
    pub annotations: BTreeMap<String, AnnotationValue>,
    pub overrides: Vec<OverridesReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverridesReport {
    pub store_object: StoreObjectIdentifier,
    pub annotations: BTreeMap<String, AnnotationValue>,
}

impl ModelReport {
    /// Build a report, optionally restricted to one entity type
    pub fn from_model(model: &RuntimeModel, entity: Option<&str>) -> Self {
        let entity_types = model
            .entity_types()
            .filter(|e| entity.map_or(true, |name| e.name() == name))
            .map(|e| EntityTypeReport::from_entity_type(model, e))
            .collect();

        Self { entity_types }
    }
}

impl EntityTypeReport {
    fn from_entity_type(model: &RuntimeModel, entity_type: &RuntimeEntityType) -> Self {
        let overrides = model
            .overrides(entity_type.id())
            .map(|records| {
                records
                    .map(|r| OverridesReport {
                        store_object: r.store_object().clone(),
                        annotations: annotation_values(r.annotations()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: entity_type.name().to_string(),
            annotations: annotation_values(entity_type.annotations()),
            overrides,
        }
    }
}

fn annotation_values(annotations: &AnnotationSet) -> BTreeMap<String, AnnotationValue> {
    annotations
        .iter()
        .map(|a| (a.name.clone(), a.value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use relmodel_builder::ModelBuilder;
    use relmodel_core::ConfigurationSource;

    #[test]
    fn report_follows_registry_order() {
        let mut builder = ModelBuilder::new();
        let customer = builder.add_entity_type("Customer").unwrap();
        builder.add_entity_type("Order").unwrap();
        for name in ["b", "a"] {
            builder
                .get_or_create_overrides(customer, StoreObjectIdentifier::table(name, None))
                .unwrap()
                .set_annotation("ColumnName", name, ConfigurationSource::Explicit)
                .unwrap();
        }
        let model = builder.finalize().unwrap();

        let report = ModelReport::from_model(&model, None);
        assert_eq!(report.entity_types.len(), 2);
        let names: Vec<&str> = report.entity_types[0]
            .overrides
            .iter()
            .map(|o| o.store_object.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(report.entity_types[1].overrides.is_empty());

        let filtered = ModelReport::from_model(&model, Some("Order"));
        assert_eq!(filtered.entity_types.len(), 1);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"kind\":\"table\""));
    }
}
