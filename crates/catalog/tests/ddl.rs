// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! DDL routed through published catalog connectors.

use std::sync::Arc;

use metabridge_catalog::{
	CatalogConnector, LayoutPolicy, LifecycleConfig, LifecycleManager, ProviderRegistry, SupportsSchemas,
	TableCatalog,
};
use metabridge_catalog::provider::METASTORE_PATH;
use metabridge_core::{ColumnDef, Distribution, Properties, QualifiedName, SortOrder, TableChange, Transform};
use metabridge_testing::{
	fixture::{hive_catalog, iceberg_catalog, memory_catalog, orders_table, schema_name, table_name},
	temp_dir,
};
use metabridge_type::{ErrorKind, Type};

async fn bridged() -> LifecycleManager {
	metabridge_testing::init_test_tracing();
	let manager = LifecycleManager::new(LifecycleConfig::default(), ProviderRegistry::with_defaults());
	let report = manager
		.reconcile_with(vec![memory_catalog("mem"), hive_catalog("hive"), iceberg_catalog("ice")])
		.await
		.into_result()
		.unwrap();
	assert_eq!(report.created, vec!["lake.hive", "lake.ice", "lake.mem"]);
	manager
}

fn context(manager: &LifecycleManager, catalog: &str) -> Arc<CatalogConnector> {
	manager.resolve(&QualifiedName::of_catalog("lake", catalog)).unwrap()
}

fn create_orders(context: &CatalogConnector, catalog: &str) {
	context.create_schema(&schema_name(catalog, "sales"), Some("sales data"), &Properties::new()).unwrap();
	context.create_table(&table_name(catalog, "sales", "orders"), &orders_table(), LayoutPolicy::Required).unwrap();
}

#[tokio::test]
async fn test_schema_and_table_lifecycle_per_provider() {
	let manager = bridged().await;
	for catalog in ["mem", "hive", "ice"] {
		let context = context(&manager, catalog);
		create_orders(&context, catalog);

		let schemas = context.list_schemas(&QualifiedName::of_catalog("lake", catalog)).unwrap();
		assert_eq!(schemas, vec![schema_name(catalog, "sales")], "{}", catalog);
		assert_eq!(context.load_schema(&schema_name(catalog, "sales")).unwrap().comment.as_deref(), Some("sales data"));

		let orders = table_name(catalog, "sales", "orders");
		assert!(context.table_exists(&orders).unwrap());
		assert_eq!(context.list_tables(&schema_name(catalog, "sales")).unwrap(), vec![orders.clone()]);

		let table = context.load_table(&orders).unwrap();
		assert_eq!(table.column_names(), orders_table().column_names());
		assert_eq!(table.comment.as_deref(), Some("customer orders"));

		let err = context.create_table(&orders, &orders_table(), LayoutPolicy::Required).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::AlreadyExists);

		assert!(context.drop_table(&orders).unwrap());
		assert!(!context.drop_table(&orders).unwrap());
		assert!(context.drop_schema(&schema_name(catalog, "sales"), false).unwrap());
		assert!(!context.schema_exists(&schema_name(catalog, "sales")).unwrap());
	}
}

#[tokio::test]
async fn test_alter_on_sqlite_metastore() {
	let manager = bridged().await;
	let context = context(&manager, "hive");
	create_orders(&context, "hive");

	let table = context
		.alter_table(
			&table_name("hive", "sales", "orders"),
			&[
				TableChange::add_column("c1", Type::String),
				TableChange::rename_column("c1", "c2"),
				TableChange::update_column_comment("amount", "gross amount"),
				TableChange::set_property("transactional", "true"),
				TableChange::rename("purchases"),
			],
		)
		.unwrap();
	assert_eq!(table.name, "purchases");
	assert!(table.column("c2").is_some());
	assert!(table.column("c1").is_none());
	assert_eq!(table.column("amount").unwrap().comment.as_deref(), Some("gross amount"));
	assert_eq!(table.properties.get("transactional").map(String::as_str), Some("true"));

	assert!(!context.table_exists(&table_name("hive", "sales", "orders")).unwrap());
	assert_eq!(context.load_table(&table_name("hive", "sales", "purchases")).unwrap(), table);
}

#[tokio::test]
async fn test_failed_alter_rolls_back_on_sqlite_metastore() {
	let manager = bridged().await;
	let context = context(&manager, "ice");
	create_orders(&context, "ice");
	let orders = table_name("ice", "sales", "orders");
	let before = context.load_table(&orders).unwrap();

	let err = context
		.alter_table(
			&orders,
			&[
				TableChange::add_column("note", Type::String),
				TableChange::update_comment("changed"),
				TableChange::update_column_type("id", Type::Short),
			],
		)
		.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::UnsupportedType);
	assert_eq!(context.load_table(&orders).unwrap(), before);
}

#[tokio::test]
async fn test_invalid_changes_are_rejected_up_front() {
	let manager = bridged().await;
	let context = context(&manager, "mem");
	create_orders(&context, "mem");
	let orders = table_name("mem", "sales", "orders");

	let err = context.alter_table(&orders, &[TableChange::rename("")]).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidChange);

	let err = context.alter_table(&orders, &[TableChange::set_property("", "x")]).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidChange);

	let nested = TableChange::AddColumn {
		field_name: vec!["tags".to_string(), "inner".to_string()],
		ty: Type::String,
		comment: None,
		position: Default::default(),
		nullable: true,
	};
	let err = context.alter_table(&orders, &[nested]).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Unsupported);
}

#[tokio::test]
async fn test_layout_policy_on_routed_create() {
	let manager = bridged().await;
	let context = context(&manager, "hive");
	context.create_schema(&schema_name("hive", "sales"), None, &Properties::new()).unwrap();

	let sorted = orders_table().with_sort_order(SortOrder::asc("id"));
	let err = context
		.create_table(&table_name("hive", "sales", "sorted"), &sorted, LayoutPolicy::Required)
		.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Unsupported);
	assert!(!context.table_exists(&table_name("hive", "sales", "sorted")).unwrap());

	let created = context
		.create_table(&table_name("hive", "sales", "sorted"), &sorted, LayoutPolicy::BestEffort)
		.unwrap();
	assert!(created.sort_orders.is_empty());

	let partitioned = orders_table()
		.with_column(ColumnDef::new("day", Type::Date))
		.with_partitioning(Transform::Identity("day".to_string()));
	let created = context
		.create_table(&table_name("hive", "sales", "partitioned"), &partitioned, LayoutPolicy::Required)
		.unwrap();
	assert_eq!(created.partitioning, partitioned.partitioning);
}

#[tokio::test]
async fn test_configured_layout_policy_on_routed_create() {
	metabridge_testing::init_test_tracing();
	let sorted = orders_table().with_sort_order(SortOrder::asc("id"));

	let strict = LifecycleManager::new(
		LifecycleConfig::default().with_layout_policy(LayoutPolicy::Required),
		ProviderRegistry::with_defaults(),
	);
	strict.reconcile_with(vec![hive_catalog("hive")]).await.into_result().unwrap();
	let required = context(&strict, "hive");
	assert_eq!(required.layout_policy(), LayoutPolicy::Required);
	required.create_schema(&schema_name("hive", "sales"), None, &Properties::new()).unwrap();
	let err = required.create_table_with_catalog_policy(&table_name("hive", "sales", "sorted"), &sorted).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Unsupported);

	let lenient = bridged().await;
	let best_effort = context(&lenient, "hive");
	best_effort.create_schema(&schema_name("hive", "sales"), None, &Properties::new()).unwrap();
	let created = best_effort.create_table_with_catalog_policy(&table_name("hive", "sales", "sorted"), &sorted).unwrap();
	assert!(created.sort_orders.is_empty());
}

#[tokio::test]
async fn test_layout_on_columns_that_need_quoting() {
	let manager = bridged().await;
	for catalog in ["hive", "ice"] {
		let context = context(&manager, catalog);
		context.create_schema(&schema_name(catalog, "sales"), None, &Properties::new()).unwrap();

		let mut table = orders_table().with_column(ColumnDef::new("order date", Type::Date));
		table = if catalog == "hive" {
			table.with_distribution(Distribution::hash(4, ["order date"])).with_sort_order(SortOrder::desc("order date"))
		} else {
			table.with_partitioning(Transform::Day("order date".to_string())).with_sort_order(SortOrder::desc("order date"))
		};

		let name = table_name(catalog, "sales", "dated");
		let created = context.create_table(&name, &table, LayoutPolicy::Required).unwrap();
		assert_eq!(created.sort_orders, table.sort_orders, "{}", catalog);
		assert_eq!(created.partitioning, table.partitioning);
		assert_eq!(created.distribution, table.distribution);
		assert_eq!(context.load_table(&name).unwrap(), created);
	}
}

#[tokio::test]
async fn test_names_must_match_the_catalog() {
	let manager = bridged().await;
	let context = context(&manager, "mem");

	let err = context.create_schema(&schema_name("hive", "sales"), None, &Properties::new()).unwrap_err();
	assert_eq!(err.code, "CA_010");

	let err = context.load_table(&schema_name("mem", "sales")).unwrap_err();
	assert_eq!(err.code, "CA_004");

	let err = context.purge_table(&table_name("mem", "sales", "orders")).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Unsupported);
}

#[tokio::test]
async fn test_schema_drop_cascade() {
	let manager = bridged().await;
	let context = context(&manager, "mem");
	create_orders(&context, "mem");

	let err = context.drop_schema(&schema_name("mem", "sales"), false).unwrap_err();
	assert_eq!(context.load_table(&table_name("mem", "sales", "orders")).unwrap().name, "orders");
	assert_ne!(err.kind(), ErrorKind::NotFound);

	assert!(context.drop_schema(&schema_name("mem", "sales"), true).unwrap());
	assert!(!context.table_exists(&table_name("mem", "sales", "orders")).unwrap_or(false));
}

#[test]
fn test_file_metastore_survives_reconstruction() {
	temp_dir(|path| {
		let providers = ProviderRegistry::with_defaults();
		let metastore = path.join("metastore.db");
		let catalog = hive_catalog("hive").with_property(METASTORE_PATH, metastore.to_string_lossy());

		let first = providers.create(&catalog, 1).unwrap();
		create_orders(&first, "hive");
		drop(first);

		let second = providers.create(&catalog, 2).unwrap();
		let table = second.load_table(&table_name("hive", "sales", "orders")).unwrap();
		assert_eq!(table.column_names(), orders_table().column_names());
		Ok(())
	})
	.unwrap();
}
