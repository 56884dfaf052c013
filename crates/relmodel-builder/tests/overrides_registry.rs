//! Integration tests for the entity type overrides registry

use pretty_assertions::assert_eq;
use relmodel_builder::{EntityTypeOverrides, ModelBuilder, OverridesView};
use relmodel_core::{
    AnnotationSet, ConfigurationSource, EntityTypeId, ModelError, StoreObjectIdentifier,
};
use relmodel_runtime::{RuntimeEntityType, RuntimeEntityTypeOverrides};

fn table(name: &str) -> StoreObjectIdentifier {
    StoreObjectIdentifier::table(name, None)
}

fn store_object_names<'a, T: OverridesView + 'a>(records: impl Iterator<Item = &'a T>) -> Vec<String> {
    records.map(|r| r.store_object().name.clone()).collect()
}

#[test]
fn find_is_absent_without_overrides() {
    let mut builder = ModelBuilder::new();
    let customer = builder.add_entity_type("Customer").unwrap();

    for store_object in [
        table("Customers"),
        StoreObjectIdentifier::view("CustomerView", Some("sales".to_string())),
        StoreObjectIdentifier::function("GetCustomers"),
        StoreObjectIdentifier::sql_query("CustomerQuery"),
    ] {
        assert!(builder.find_overrides(customer, &store_object).is_none());
    }
    assert!(builder.overrides(customer).is_none());
}

#[test]
fn find_is_absent_for_missing_key_in_existing_map() {
    let mut builder = ModelBuilder::new();
    let customer = builder.add_entity_type("Customer").unwrap();
    builder.get_or_create_overrides(customer, table("Customers")).unwrap();

    assert!(builder.find_overrides(customer, &table("Other")).is_none());
    assert!(builder
        .find_overrides(customer, &StoreObjectIdentifier::view("Customers", None))
        .is_none());
}

#[test]
fn get_or_create_is_stable() {
    let mut builder = ModelBuilder::new();
    let customer = builder.add_entity_type("Customer").unwrap();

    let first = builder.get_or_create_overrides(customer, table("Customers")).unwrap()
        as *const EntityTypeOverrides;
    builder
        .get_or_create_overrides(customer, table("Customers"))
        .unwrap()
        .set_annotation("ColumnName", "customer_id", ConfigurationSource::Explicit)
        .unwrap();
    let second = builder.get_or_create_overrides(customer, table("Customers")).unwrap()
        as *const EntityTypeOverrides;

    assert_eq!(first, second);
    assert_eq!(builder.overrides(customer).unwrap().count(), 1);

    let record = builder.find_overrides(customer, &table("Customers")).unwrap();
    assert_eq!(
        record.find_annotation("ColumnName").and_then(|a| a.value.as_str()),
        Some("customer_id")
    );
}

#[test]
fn distinct_store_objects_get_distinct_records() {
    let mut builder = ModelBuilder::new();
    let customer = builder.add_entity_type("Customer").unwrap();

    builder.get_or_create_overrides(customer, table("Customers")).unwrap();
    builder
        .get_or_create_overrides(customer, StoreObjectIdentifier::view("Customers", None))
        .unwrap();

    let records: Vec<_> = builder.overrides(customer).unwrap().collect();
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].store_object(), records[1].store_object());
    assert!(records.iter().all(|r| r.entity_type() == customer));
}

#[test]
fn overrides_are_ordered_by_name_not_insertion() {
    let mut builder = ModelBuilder::new();
    let customer = builder.add_entity_type("Customer").unwrap();

    builder.get_or_create_overrides(customer, table("B")).unwrap();
    builder.get_or_create_overrides(customer, table("A")).unwrap();

    assert_eq!(store_object_names(builder.overrides(customer).unwrap()), vec!["A", "B"]);

    builder.get_or_create_overrides(customer, table("a")).unwrap();
    builder.get_or_create_overrides(customer, table("C")).unwrap();

    // ordinal: uppercase sorts before lowercase
    assert_eq!(
        store_object_names(builder.overrides(customer).unwrap()),
        vec!["A", "B", "C", "a"]
    );
}

#[test]
fn overrides_are_scoped_per_entity_type() {
    let mut builder = ModelBuilder::new();
    let customer = builder.add_entity_type("Customer").unwrap();
    let order = builder.add_entity_type("Order").unwrap();

    builder.get_or_create_overrides(customer, table("Shared")).unwrap();

    assert!(builder.find_overrides(customer, &table("Shared")).is_some());
    assert!(builder.find_overrides(order, &table("Shared")).is_none());
    assert!(builder.overrides(order).is_none());
}

#[test]
fn finalized_entity_type_rejects_mutation() {
    let mut builder = ModelBuilder::new();
    let customer = builder.add_entity_type("Customer").unwrap();
    builder
        .get_or_create_overrides(customer, table("Customers"))
        .unwrap()
        .set_annotation("ColumnName", "id", ConfigurationSource::Explicit)
        .unwrap();

    builder.finalize_entity_type(customer).unwrap();

    let found = builder.find_overrides(customer, &table("Customers")).unwrap();
    assert!(found.is_read_only());
    assert!(builder.overrides(customer).unwrap().all(|r| r.is_read_only()));

    // a detached copy keeps the frozen annotations
    let mut copy = found.clone();
    assert!(matches!(
        copy.set_annotation("ColumnName", "other", ConfigurationSource::Explicit),
        Err(ModelError::ReadOnly { .. })
    ));
    assert!(copy.remove_annotation("ColumnName", ConfigurationSource::Explicit).is_err());

    assert!(matches!(
        builder.get_or_create_overrides(customer, table("Customers")),
        Err(ModelError::ReadOnly { .. })
    ));
    assert!(matches!(
        builder.get_or_create_overrides(customer, table("New")),
        Err(ModelError::ReadOnly { .. })
    ));
    assert!(matches!(
        builder.overrides_mut(customer, &table("Customers")),
        Err(ModelError::ReadOnly { .. })
    ));
    assert_eq!(builder.overrides(customer).unwrap().count(), 1);
}

#[test]
fn conventions_do_not_replace_explicit_overrides() {
    let mut builder = ModelBuilder::new();
    let customer = builder.add_entity_type("Customer").unwrap();

    let record = builder.get_or_create_overrides(customer, table("Customers")).unwrap();
    assert!(record
        .set_annotation("ColumnName", "customer_id", ConfigurationSource::Explicit)
        .unwrap());
    assert!(!record
        .set_annotation("ColumnName", "CustomerId", ConfigurationSource::Convention)
        .unwrap());

    let annotation = record.find_annotation("ColumnName").unwrap();
    assert_eq!(annotation.value.as_str(), Some("customer_id"));
    assert_eq!(annotation.source, ConfigurationSource::Explicit);
}

#[test]
fn runtime_record_reports_its_association() {
    let entity_type = RuntimeEntityType::new(EntityTypeId(4), "Customer", AnnotationSet::new());
    let view = StoreObjectIdentifier::view("CustomerView", Some("sales".to_string()));

    let record = RuntimeEntityTypeOverrides::new(&entity_type, view.clone(), AnnotationSet::new());

    assert_eq!(record.entity_type(), entity_type.id());
    assert_eq!(record.store_object(), &view);
    assert!(record.is_read_only());

    let mut annotations = record.annotations().clone();
    assert!(annotations
        .set("ColumnName", "id", ConfigurationSource::Explicit)
        .is_err());
}

#[test]
fn finalize_preserves_records_and_order() {
    let mut builder = ModelBuilder::new();
    let customer = builder.add_entity_type("Customer").unwrap();
    let order = builder.add_entity_type("Order").unwrap();

    for name in ["Zeta", "Alpha", "Mid"] {
        builder
            .get_or_create_overrides(customer, table(name))
            .unwrap()
            .set_annotation("Origin", name, ConfigurationSource::Explicit)
            .unwrap();
    }

    let builder_order = store_object_names(builder.overrides(customer).unwrap());
    let model = builder.finalize().unwrap();

    assert_eq!(store_object_names(model.overrides(customer).unwrap()), builder_order);
    assert!(model.overrides(order).is_none());

    let alpha = model.find_overrides(customer, &table("Alpha")).unwrap();
    assert_eq!(alpha.entity_type(), customer);
    assert_eq!(
        alpha.find_annotation("Origin").and_then(|a| a.value.as_str()),
        Some("Alpha")
    );
    assert!(model
        .overrides(customer)
        .unwrap()
        .all(|r| r.is_read_only()));
}
