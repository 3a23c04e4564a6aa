// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Parsing what an adapter built preserves the generic table.

use metabridge_catalog::{HiveAdapter, IcebergAdapter, LayoutPolicy, MemoryAdapter, MetadataAdapter};
use metabridge_connector::PropertyValue;
use metabridge_core::{ColumnDef, Distribution, NullOrdering, SchemaDef, SortOrder, TableDef, Transform};
use metabridge_testing::fixture::orders_table;
use metabridge_type::{ErrorKind, Type};

fn assert_columns_preserved(adapter: &dyn MetadataAdapter, table: &TableDef) -> TableDef {
	let engine = adapter.build_engine_table_metadata(table, LayoutPolicy::Required).unwrap();
	let parsed = adapter.parse_engine_table_metadata(&engine).unwrap();

	assert_eq!(parsed.name, table.name);
	assert_eq!(parsed.column_names(), table.column_names());
	for (parsed, original) in parsed.columns.iter().zip(&table.columns) {
		assert_eq!(parsed.ty, original.ty, "column `{}` on {}", original.name, adapter.provider());
		assert_eq!(parsed.nullable, original.nullable);
		assert_eq!(parsed.comment, original.comment);
	}
	assert_eq!(parsed.comment, table.comment);
	parsed
}

#[test]
fn test_memory_preserves_everything_but_layout() {
	let table = orders_table().with_property("owner", "etl");
	let parsed = assert_columns_preserved(&MemoryAdapter::new(), &table);
	assert_eq!(parsed.properties, table.properties);
}

#[test]
fn test_hive_round_trip_with_layout() {
	let adapter = HiveAdapter::new();
	let table = orders_table()
		.with_column(ColumnDef::new("day", Type::Date))
		.with_property("location", "/warehouse/orders")
		.with_property("transactional", "true")
		.with_partitioning(Transform::Identity("day".to_string()))
		.with_distribution(Distribution::hash(8, ["id"]))
		.with_sort_order(SortOrder::desc("amount"));

	let engine = adapter.build_engine_table_metadata(&table, LayoutPolicy::Required).unwrap();
	assert_eq!(engine.properties.get("external_location"), Some(&PropertyValue::from("/warehouse/orders")));
	assert_eq!(engine.properties.get("transactional"), Some(&PropertyValue::Boolean(true)));
	assert_eq!(engine.properties.get("format"), Some(&PropertyValue::from("ORC")));

	let parsed = assert_columns_preserved(&adapter, &table);
	assert_eq!(parsed.partitioning, table.partitioning);
	assert_eq!(parsed.distribution, table.distribution);
	assert_eq!(parsed.sort_orders, table.sort_orders);
	assert_eq!(parsed.properties.get("location").map(String::as_str), Some("/warehouse/orders"));
	assert_eq!(parsed.properties.get("transactional").map(String::as_str), Some("true"));
	assert!(!parsed.properties.contains_key("format"));
}

#[test]
fn test_hive_rejects_types_it_cannot_store() {
	let adapter = HiveAdapter::new();
	let table = TableDef::new("events").with_column(ColumnDef::new("id", Type::Uuid));
	let err = adapter.build_engine_table_metadata(&table, LayoutPolicy::BestEffort).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::UnsupportedType);

	let nested = TableDef::new("events").with_column(ColumnDef::new("ids", Type::list(Type::Uuid)));
	assert!(adapter.build_engine_table_metadata(&nested, LayoutPolicy::BestEffort).is_err());
}

#[test]
fn test_iceberg_round_trip_with_layout() {
	let adapter = IcebergAdapter::new();
	let mut late = SortOrder::asc("placed_at");
	late.null_ordering = NullOrdering::NullsLast;
	let table = orders_table()
		.with_column(ColumnDef::new("id_uuid", Type::Uuid))
		.with_property("format-version", "1")
		.with_partitioning(Transform::Day("placed_at".to_string()))
		.with_partitioning(Transform::Bucket {
			num_buckets: 16,
			columns: vec!["id".to_string()],
		})
		.with_partitioning(Transform::Truncate {
			width: 4,
			column: "customer".to_string(),
		})
		.with_sort_order(late)
		.with_sort_order(SortOrder::desc("id"));

	let engine = adapter.build_engine_table_metadata(&table, LayoutPolicy::Required).unwrap();
	assert_eq!(engine.properties.get("format_version"), Some(&PropertyValue::Integer(1)));

	let parsed = assert_columns_preserved(&adapter, &table);
	assert_eq!(parsed.partitioning, table.partitioning);
	assert_eq!(parsed.sort_orders, table.sort_orders);
	assert_eq!(parsed.properties.get("format-version").map(String::as_str), Some("1"));
}

#[test]
fn test_iceberg_distribution_depends_on_policy() {
	let adapter = IcebergAdapter::new();
	let table = orders_table().with_distribution(Distribution::hash(4, ["id"]));

	let err = adapter.build_engine_table_metadata(&table, LayoutPolicy::Required).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Unsupported);

	let engine = adapter.build_engine_table_metadata(&table, LayoutPolicy::BestEffort).unwrap();
	assert!(adapter.parse_engine_table_metadata(&engine).unwrap().distribution.is_none());
}

#[test]
fn test_schema_round_trip_per_adapter() {
	let schema = SchemaDef::new("sales").with_comment("quarterly numbers").with_property("location", "/warehouse/sales");
	let adapters: [&dyn MetadataAdapter; 3] = [&MemoryAdapter::new(), &HiveAdapter::new(), &IcebergAdapter::new()];
	for adapter in adapters {
		let engine = adapter.build_engine_schema(&schema).unwrap();
		assert_eq!(adapter.parse_engine_schema("sales", &engine), schema, "{}", adapter.provider());
	}
}
