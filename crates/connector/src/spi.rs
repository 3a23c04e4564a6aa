// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The metadata SPI a query engine exposes for one catalog.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use metabridge_type::{EngineType, Result};

use crate::{
	handle::{ColumnHandle, SchemaTableName, TableHandle},
	metadata::{EngineColumnMetadata, EngineProperties, EngineTableMetadata, PropertyValue},
};

/// An engine connector bound to one catalog.
pub trait Connector: Send + Sync {
	fn name(&self) -> &str;

	/// Opens a metadata transaction. Changes become visible on
	/// [`ConnectorMetadata::commit`]; dropping the transaction discards them.
	fn begin(&self) -> Result<Box<dyn ConnectorMetadata + '_>>;

	/// Releases the resources held by the connector. Called once, when the
	/// last reference to the owning catalog goes away.
	fn shutdown(&self) {}
}

pub trait ConnectorMetadata {
	fn list_schema_names(&self) -> Result<Vec<String>>;

	fn schema_exists(&self, schema: &str) -> Result<bool>;

	fn create_schema(&mut self, schema: &str, properties: &EngineProperties) -> Result<()>;

	fn drop_schema(&mut self, schema: &str, cascade: bool) -> Result<()>;

	fn get_schema_properties(&self, schema: &str) -> Result<EngineProperties>;

	/// Tables of one schema, or of all schemas when `schema` is `None`
	fn list_tables(&self, schema: Option<&str>) -> Result<Vec<SchemaTableName>>;

	fn get_table_handle(&self, name: &SchemaTableName) -> Result<Option<TableHandle>>;

	fn get_table_metadata(&self, table: &TableHandle) -> Result<EngineTableMetadata>;

	/// Column handles keyed by column name, in column order
	fn get_column_handles(&self, table: &TableHandle) -> Result<IndexMap<String, ColumnHandle>>;

	fn create_table(&mut self, schema: &str, metadata: &EngineTableMetadata) -> Result<TableHandle>;

	fn drop_table(&mut self, table: &TableHandle) -> Result<()>;

	fn rename_table(&mut self, table: &TableHandle, new_name: &SchemaTableName) -> Result<()>;

	/// Adds a column at `ordinal`, or after the last column when `None`
	fn add_column(&mut self, table: &TableHandle, column: &EngineColumnMetadata, ordinal: Option<usize>)
	-> Result<()>;

	fn drop_column(&mut self, table: &TableHandle, column: &ColumnHandle) -> Result<()>;

	fn rename_column(&mut self, table: &TableHandle, column: &ColumnHandle, new_name: &str) -> Result<()>;

	fn set_column_type(&mut self, table: &TableHandle, column: &ColumnHandle, ty: &EngineType) -> Result<()>;

	fn set_column_comment(&mut self, table: &TableHandle, column: &ColumnHandle, comment: Option<&str>)
	-> Result<()>;

	fn set_table_comment(&mut self, table: &TableHandle, comment: Option<&str>) -> Result<()>;

	/// Sets each key to its value; a `None` value removes the key
	fn set_table_properties(
		&mut self,
		table: &TableHandle,
		properties: &BTreeMap<String, Option<PropertyValue>>,
	) -> Result<()>;

	fn commit(self: Box<Self>) -> Result<()>;
}
