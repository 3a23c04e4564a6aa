// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Behaviour every connector implementation must share.

use std::collections::BTreeMap;

use metabridge_connector::{
	Connector, EngineColumnMetadata, EngineProperties, EngineTableMetadata, MemoryConnector, PropertyValue,
	SchemaTableName, SqliteConnector,
};
use metabridge_type::EngineType;

fn orders() -> EngineTableMetadata {
	let mut metadata = EngineTableMetadata::new("orders")
		.with_column(EngineColumnMetadata::new("id", EngineType::BigInt))
		.with_column(EngineColumnMetadata::new("amount", EngineType::Double))
		.with_property("format", "ORC");
	metadata.comment = Some("all orders".to_string());
	metadata
}

fn setup(connector: &dyn Connector) {
	let mut txn = connector.begin().unwrap();
	let mut properties = EngineProperties::new();
	properties.insert("location".to_string(), PropertyValue::from("/warehouse/db"));
	txn.create_schema("db", &properties).unwrap();
	txn.create_table("db", &orders()).unwrap();
	txn.commit().unwrap();
}

fn column_names(connector: &dyn Connector, table: &str) -> Vec<String> {
	let txn = connector.begin().unwrap();
	let handle = txn.get_table_handle(&SchemaTableName::new("db", table)).unwrap().unwrap();
	txn.get_column_handles(&handle).unwrap().keys().cloned().collect()
}

fn schema_lifecycle(connector: &dyn Connector) {
	setup(connector);
	let mut txn = connector.begin().unwrap();

	assert!(txn.schema_exists("db").unwrap());
	assert_eq!(
		txn.get_schema_properties("db").unwrap().get("location"),
		Some(&PropertyValue::from("/warehouse/db"))
	);

	let err = txn.create_schema("db", &EngineProperties::new()).unwrap_err();
	assert_eq!(err.code, "CO_004");

	let err = txn.drop_schema("db", false).unwrap_err();
	assert_eq!(err.code, "CO_007");

	txn.drop_schema("db", true).unwrap();
	assert!(!txn.schema_exists("db").unwrap());
	assert!(txn.list_tables(None).unwrap().is_empty());

	let err = txn.drop_schema("db", true).unwrap_err();
	assert_eq!(err.code, "CO_001");
}

fn table_metadata(connector: &dyn Connector) {
	setup(connector);
	let txn = connector.begin().unwrap();

	let handle = txn.get_table_handle(&SchemaTableName::new("db", "orders")).unwrap().unwrap();
	let metadata = txn.get_table_metadata(&handle).unwrap();
	assert_eq!(metadata, orders());

	let columns = txn.get_column_handles(&handle).unwrap();
	assert_eq!(columns.keys().collect::<Vec<_>>(), vec!["id", "amount"]);
	assert_eq!(columns["amount"].ordinal, 1);

	assert!(txn.get_table_handle(&SchemaTableName::new("db", "missing")).unwrap().is_none());
	assert_eq!(txn.list_tables(Some("db")).unwrap(), vec![SchemaTableName::new("db", "orders")]);
	assert_eq!(txn.list_tables(Some("nope")).unwrap_err().code, "CO_001");
}

fn duplicate_table(connector: &dyn Connector) {
	setup(connector);
	let mut txn = connector.begin().unwrap();
	let err = txn.create_table("db", &orders()).unwrap_err();
	assert_eq!(err.code, "CO_005");

	let err = txn.create_table("other", &orders()).unwrap_err();
	assert_eq!(err.code, "CO_001");
}

fn column_changes(connector: &dyn Connector) {
	setup(connector);
	let mut txn = connector.begin().unwrap();
	let handle = txn.get_table_handle(&SchemaTableName::new("db", "orders")).unwrap().unwrap();

	txn.add_column(&handle, &EngineColumnMetadata::new("first", EngineType::Boolean), Some(0)).unwrap();
	txn.add_column(&handle, &EngineColumnMetadata::new("last", EngineType::Date), None).unwrap();

	let err = txn.add_column(&handle, &EngineColumnMetadata::new("far", EngineType::Date), Some(9)).unwrap_err();
	assert_eq!(err.code, "CO_009");
	let err = txn.add_column(&handle, &EngineColumnMetadata::new("id", EngineType::Date), None).unwrap_err();
	assert_eq!(err.code, "CO_006");

	let columns = txn.get_column_handles(&handle).unwrap();
	txn.drop_column(&handle, &columns["id"]).unwrap();
	txn.rename_column(&handle, &columns["amount"], "total").unwrap();
	let err = txn.rename_column(&handle, &columns["first"], "total").unwrap_err();
	assert_eq!(err.code, "CO_006");

	let columns = txn.get_column_handles(&handle).unwrap();
	txn.set_column_type(&handle, &columns["total"], &EngineType::Decimal {
		precision: 12,
		scale: 2,
	})
	.unwrap();
	txn.set_column_comment(&handle, &columns["total"], Some("gross")).unwrap();
	txn.commit().unwrap();

	assert_eq!(column_names(connector, "orders"), vec!["first", "total", "last"]);

	let txn = connector.begin().unwrap();
	let metadata = txn.get_table_metadata(&handle).unwrap();
	let total = metadata.column("total").unwrap();
	assert_eq!(
		total.ty,
		EngineType::Decimal {
			precision: 12,
			scale: 2
		}
	);
	assert_eq!(total.comment.as_deref(), Some("gross"));
}

fn stale_handle_after_rename(connector: &dyn Connector) {
	setup(connector);
	let mut txn = connector.begin().unwrap();
	let handle = txn.get_table_handle(&SchemaTableName::new("db", "orders")).unwrap().unwrap();

	txn.rename_table(&handle, &SchemaTableName::new("db", "sales")).unwrap();
	let err = txn.set_table_comment(&handle, Some("x")).unwrap_err();
	assert_eq!(err.code, "CO_008");

	let renamed = txn.get_table_handle(&SchemaTableName::new("db", "sales")).unwrap().unwrap();
	assert_eq!(renamed.id, handle.id);
	txn.set_table_comment(&renamed, Some("renamed")).unwrap();
	txn.commit().unwrap();

	let txn = connector.begin().unwrap();
	assert!(txn.get_table_handle(&SchemaTableName::new("db", "orders")).unwrap().is_none());
	assert_eq!(txn.get_table_metadata(&renamed).unwrap().comment.as_deref(), Some("renamed"));
}

fn table_properties(connector: &dyn Connector) {
	setup(connector);
	let mut txn = connector.begin().unwrap();
	let handle = txn.get_table_handle(&SchemaTableName::new("db", "orders")).unwrap().unwrap();

	let mut changes = BTreeMap::new();
	changes.insert("format".to_string(), None);
	changes.insert("transactional".to_string(), Some(PropertyValue::Boolean(true)));
	changes.insert("bucketed_by".to_string(), Some(PropertyValue::Array(vec!["id".to_string()])));
	txn.set_table_properties(&handle, &changes).unwrap();

	let properties = txn.get_table_metadata(&handle).unwrap().properties;
	assert!(!properties.contains_key("format"));
	assert_eq!(properties.get("transactional"), Some(&PropertyValue::Boolean(true)));
	assert_eq!(properties["bucketed_by"].as_array(), Some(&["id".to_string()][..]));
}

fn rollback_on_drop(connector: &dyn Connector) {
	setup(connector);
	{
		let mut txn = connector.begin().unwrap();
		let handle = txn.get_table_handle(&SchemaTableName::new("db", "orders")).unwrap().unwrap();
		txn.drop_table(&handle).unwrap();
		txn.create_schema("scratch", &EngineProperties::new()).unwrap();
	}

	let txn = connector.begin().unwrap();
	assert!(txn.get_table_handle(&SchemaTableName::new("db", "orders")).unwrap().is_some());
	assert!(!txn.schema_exists("scratch").unwrap());
}

macro_rules! connector_tests {
	($($name:ident),* $(,)?) => {
		mod memory {
			$(
				#[test]
				fn $name() {
					super::$name(&metabridge_connector::MemoryConnector::new("memory"));
				}
			)*
		}

		mod sqlite {
			$(
				#[test]
				fn $name() {
					super::$name(&metabridge_connector::SqliteConnector::in_memory("hive").unwrap());
				}
			)*
		}
	};
}

connector_tests!(
	schema_lifecycle,
	table_metadata,
	duplicate_table,
	column_changes,
	stale_handle_after_rename,
	table_properties,
	rollback_on_drop,
);

#[test]
fn test_connectors_report_their_name() {
	assert_eq!(MemoryConnector::new("memory").name(), "memory");
	assert_eq!(SqliteConnector::in_memory("hive").unwrap().name(), "hive");
}
