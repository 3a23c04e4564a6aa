// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeMap;

use indexmap::IndexMap;
use metabridge_type::{EngineType, Result};
use parking_lot::MutexGuard;

use super::state::{MemoryState, MemoryTable};
use crate::{
	error::ConnectorError,
	handle::{ColumnHandle, SchemaTableName, TableHandle, TableId},
	metadata::{EngineColumnMetadata, EngineProperties, EngineTableMetadata, PropertyValue},
	spi::ConnectorMetadata,
};

/// Holds the connector lock for its whole lifetime and works on a private
/// copy of the state, which `commit` publishes.
pub(crate) struct MemoryMetadata<'a> {
	connector: &'a str,
	max_tables: Option<usize>,
	guard: MutexGuard<'a, MemoryState>,
	working: MemoryState,
}

impl<'a> MemoryMetadata<'a> {
	pub(crate) fn new(connector: &'a str, max_tables: Option<usize>, guard: MutexGuard<'a, MemoryState>) -> Self {
		let working = guard.clone();
		Self {
			connector,
			max_tables,
			guard,
			working,
		}
	}
}

impl ConnectorMetadata for MemoryMetadata<'_> {
	fn list_schema_names(&self) -> Result<Vec<String>> {
		Ok(self.working.schemas.keys().cloned().collect())
	}

	fn schema_exists(&self, schema: &str) -> Result<bool> {
		Ok(self.working.schemas.contains_key(schema))
	}

	fn create_schema(&mut self, schema: &str, properties: &EngineProperties) -> Result<()> {
		if self.working.schemas.contains_key(schema) {
			return Err(ConnectorError::SchemaAlreadyExists {
				schema: schema.to_string(),
			}
			.into());
		}
		self.working.schemas.insert(schema.to_string(), properties.clone());
		Ok(())
	}

	fn drop_schema(&mut self, schema: &str, cascade: bool) -> Result<()> {
		self.working.require_schema(schema)?;

		let tables: Vec<TableId> = self
			.working
			.tables
			.iter()
			.filter(|(_, table)| table.name.schema == schema)
			.map(|(id, _)| *id)
			.collect();
		if !tables.is_empty() && !cascade {
			return Err(ConnectorError::SchemaNotEmpty {
				schema: schema.to_string(),
			}
			.into());
		}
		for id in tables {
			self.working.tables.remove(&id);
		}
		self.working.schemas.remove(schema);
		Ok(())
	}

	fn get_schema_properties(&self, schema: &str) -> Result<EngineProperties> {
		self.working.require_schema(schema)?;
		Ok(self.working.schemas.get(schema).cloned().unwrap_or_default())
	}

	fn list_tables(&self, schema: Option<&str>) -> Result<Vec<SchemaTableName>> {
		if let Some(schema) = schema {
			self.working.require_schema(schema)?;
		}
		let mut names: Vec<SchemaTableName> = self
			.working
			.tables
			.values()
			.filter(|table| schema.is_none_or(|s| table.name.schema == s))
			.map(|table| table.name.clone())
			.collect();
		names.sort();
		Ok(names)
	}

	fn get_table_handle(&self, name: &SchemaTableName) -> Result<Option<TableHandle>> {
		Ok(self.working.find_table(name).map(|id| TableHandle {
			id,
			name: name.clone(),
		}))
	}

	fn get_table_metadata(&self, table: &TableHandle) -> Result<EngineTableMetadata> {
		let table = self.working.table(table)?;
		Ok(EngineTableMetadata {
			table: table.name.table.clone(),
			columns: table.columns.clone(),
			comment: table.comment.clone(),
			properties: table.properties.clone(),
		})
	}

	fn get_column_handles(&self, table: &TableHandle) -> Result<IndexMap<String, ColumnHandle>> {
		let table = self.working.table(table)?;
		Ok(table
			.columns
			.iter()
			.enumerate()
			.map(|(ordinal, column)| {
				(
					column.name.clone(),
					ColumnHandle {
						name: column.name.clone(),
						ordinal,
					},
				)
			})
			.collect())
	}

	fn create_table(&mut self, schema: &str, metadata: &EngineTableMetadata) -> Result<TableHandle> {
		self.working.require_schema(schema)?;

		let name = SchemaTableName::new(schema, &metadata.table);
		if self.working.find_table(&name).is_some() {
			return Err(ConnectorError::TableAlreadyExists {
				table: name.to_string(),
			}
			.into());
		}
		if let Some(limit) = self.max_tables {
			if self.working.tables.len() >= limit {
				return Err(ConnectorError::TableLimitExceeded {
					connector: self.connector.to_string(),
					limit,
				}
				.into());
			}
		}

		let mut table = MemoryTable {
			name: name.clone(),
			columns: Vec::with_capacity(metadata.columns.len()),
			comment: metadata.comment.clone(),
			properties: metadata.properties.clone(),
		};
		for column in &metadata.columns {
			table.require_unused(&column.name)?;
			table.columns.push(column.clone());
		}

		self.working.next_table_id += 1;
		let id = TableId(self.working.next_table_id);
		self.working.tables.insert(id, table);
		Ok(TableHandle {
			id,
			name,
		})
	}

	fn drop_table(&mut self, table: &TableHandle) -> Result<()> {
		self.working.table(table)?;
		self.working.tables.remove(&table.id);
		Ok(())
	}

	fn rename_table(&mut self, table: &TableHandle, new_name: &SchemaTableName) -> Result<()> {
		self.working.table(table)?;
		self.working.require_schema(&new_name.schema)?;
		if let Some(existing) = self.working.find_table(new_name) {
			if existing != table.id {
				return Err(ConnectorError::TableAlreadyExists {
					table: new_name.to_string(),
				}
				.into());
			}
		}
		self.working.table_mut(table)?.name = new_name.clone();
		Ok(())
	}

	fn add_column(
		&mut self,
		table: &TableHandle,
		column: &EngineColumnMetadata,
		ordinal: Option<usize>,
	) -> Result<()> {
		let table = self.working.table_mut(table)?;
		table.require_unused(&column.name)?;

		let ordinal = ordinal.unwrap_or(table.columns.len());
		if ordinal > table.columns.len() {
			return Err(ConnectorError::OrdinalOutOfRange {
				table: table.name.to_string(),
				ordinal,
				columns: table.columns.len(),
			}
			.into());
		}
		table.columns.insert(ordinal, column.clone());
		Ok(())
	}

	fn drop_column(&mut self, table: &TableHandle, column: &ColumnHandle) -> Result<()> {
		let table = self.working.table_mut(table)?;
		let idx = table.column_index(column)?;
		table.columns.remove(idx);
		Ok(())
	}

	fn rename_column(&mut self, table: &TableHandle, column: &ColumnHandle, new_name: &str) -> Result<()> {
		let table = self.working.table_mut(table)?;
		let idx = table.column_index(column)?;
		if column.name != new_name {
			table.require_unused(new_name)?;
		}
		table.columns[idx].name = new_name.to_string();
		Ok(())
	}

	fn set_column_type(&mut self, table: &TableHandle, column: &ColumnHandle, ty: &EngineType) -> Result<()> {
		let table = self.working.table_mut(table)?;
		let idx = table.column_index(column)?;
		table.columns[idx].ty = ty.clone();
		Ok(())
	}

	fn set_column_comment(
		&mut self,
		table: &TableHandle,
		column: &ColumnHandle,
		comment: Option<&str>,
	) -> Result<()> {
		let table = self.working.table_mut(table)?;
		let idx = table.column_index(column)?;
		table.columns[idx].comment = comment.map(str::to_string);
		Ok(())
	}

	fn set_table_comment(&mut self, table: &TableHandle, comment: Option<&str>) -> Result<()> {
		self.working.table_mut(table)?.comment = comment.map(str::to_string);
		Ok(())
	}

	fn set_table_properties(
		&mut self,
		table: &TableHandle,
		properties: &BTreeMap<String, Option<PropertyValue>>,
	) -> Result<()> {
		let table = self.working.table_mut(table)?;
		for (key, value) in properties {
			match value {
				Some(value) => {
					table.properties.insert(key.clone(), value.clone());
				}
				None => {
					table.properties.remove(key);
				}
			}
		}
		Ok(())
	}

	fn commit(mut self: Box<Self>) -> Result<()> {
		let working = std::mem::take(&mut self.working);
		*self.guard = working;
		Ok(())
	}
}
