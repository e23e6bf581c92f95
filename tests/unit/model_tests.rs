//! Unit tests for the schema model and the key back-fill pass

use pretty_assertions::assert_eq;

use pg2dbml::model::{
    backfill_keys, Column, ColumnReference, ForeignKey, Relationship, SchemaModel, SkipReason,
    Table,
};

fn fk(column: &str, table: &str, references: &str, name: &str) -> ForeignKey {
    ForeignKey {
        column: column.to_string(),
        references_table: table.to_string(),
        references_column: references.to_string(),
        constraint_name: name.to_string(),
    }
}

fn orders_model() -> SchemaModel {
    let mut customers = Table::new("customers");
    customers.columns.push(Column::new("customer_id", "SERIAL"));
    customers.primary_keys.push("customer_id".to_string());

    let mut orders = Table::new("orders");
    orders.columns.push(Column::new("order_id", "SERIAL"));
    orders.columns.push(Column::new("customer_id", "INTEGER"));
    orders
        .foreign_keys
        .push(fk("customer_id", "customers", "customer_id", "fk_customer"));

    let mut model = SchemaModel::new();
    model.insert_table(customers);
    model.insert_table(orders);
    model
}

// ============================================================================
// SchemaModel Tests
// ============================================================================

#[test]
fn test_insert_keeps_declaration_order() {
    let model = orders_model();
    let names: Vec<_> = model.table_names().collect();
    assert_eq!(names, vec!["customers", "orders"]);
    assert!(model.contains_table("orders"));
    assert!(!model.contains_table("Orders"));
}

#[test]
fn test_insert_same_name_replaces_in_place() {
    let mut model = orders_model();
    let mut replacement = Table::new("customers");
    replacement.columns.push(Column::new("id", "INT"));
    replacement.columns.push(Column::new("name", "TEXT"));
    model.insert_table(replacement);

    assert_eq!(model.len(), 2);
    assert_eq!(model.tables()[0].name, "customers");
    assert_eq!(model.tables()[0].columns.len(), 2);
}

#[test]
fn test_relationships_flatten_foreign_keys() {
    let model = orders_model();
    assert_eq!(model.foreign_key_count(), 1);
    assert_eq!(
        model.relationships(),
        vec![Relationship {
            from_table: "orders".to_string(),
            from_column: "customer_id".to_string(),
            to_table: "customers".to_string(),
            to_column: "customer_id".to_string(),
            constraint_name: "fk_customer".to_string(),
        }]
    );
}

// ============================================================================
// Back-fill Tests
// ============================================================================

#[test]
fn test_backfill_sets_references_and_primary_keys() {
    let mut model = orders_model();
    backfill_keys(&mut model);

    let orders = model.table("orders").unwrap();
    assert_eq!(
        orders.column("customer_id").unwrap().references,
        Some(ColumnReference {
            table: "customers".to_string(),
            column: "customer_id".to_string(),
        })
    );
    assert!(!orders.column("order_id").unwrap().is_foreign_key());

    let customers = model.table("customers").unwrap();
    assert!(customers.column("customer_id").unwrap().is_primary_key);
}

#[test]
fn test_backfill_is_idempotent() {
    let mut once = orders_model();
    backfill_keys(&mut once);
    let mut twice = once.clone();
    backfill_keys(&mut twice);
    assert_eq!(once, twice);
}

// ============================================================================
// Column Helper Tests
// ============================================================================

#[test]
fn test_column_helpers() {
    let mut column = Column::new("qty", "INTEGER");
    assert!(!column.is_unique());
    assert!(!column.has_check());

    column.constraints.push("UNIQUE".to_string());
    column.constraints.push("CHECK (qty > 0)".to_string());
    assert!(column.is_unique());
    assert!(column.has_check());
}

#[test]
fn test_skip_reason_classification() {
    assert!(SkipReason::UnrecognizedColumn.is_structural());
    assert!(SkipReason::UnterminatedTable.is_structural());
    assert!(!SkipReason::UnknownIndexTable.is_structural());
}
