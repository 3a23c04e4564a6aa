// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeMap;

use crate::{
	error::ConnectorError,
	handle::{ColumnHandle, SchemaTableName, TableHandle, TableId},
	metadata::{EngineColumnMetadata, EngineProperties},
};

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryState {
	pub(crate) next_table_id: u64,
	pub(crate) schemas: BTreeMap<String, EngineProperties>,
	pub(crate) tables: BTreeMap<TableId, MemoryTable>,
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryTable {
	pub(crate) name: SchemaTableName,
	pub(crate) columns: Vec<EngineColumnMetadata>,
	pub(crate) comment: Option<String>,
	pub(crate) properties: EngineProperties,
}

impl MemoryState {
	pub(crate) fn find_table(&self, name: &SchemaTableName) -> Option<TableId> {
		self.tables.iter().find(|(_, table)| &table.name == name).map(|(id, _)| *id)
	}

	pub(crate) fn table(&self, handle: &TableHandle) -> Result<&MemoryTable, ConnectorError> {
		let table = self.tables.get(&handle.id).ok_or_else(|| ConnectorError::TableNotFound {
			table: handle.name.to_string(),
		})?;
		if table.name != handle.name {
			return Err(ConnectorError::StaleHandle {
				table: handle.name.to_string(),
				current: table.name.to_string(),
			});
		}
		Ok(table)
	}

	pub(crate) fn table_mut(&mut self, handle: &TableHandle) -> Result<&mut MemoryTable, ConnectorError> {
		self.table(handle)?;
		self.tables.get_mut(&handle.id).ok_or_else(|| ConnectorError::TableNotFound {
			table: handle.name.to_string(),
		})
	}

	pub(crate) fn require_schema(&self, schema: &str) -> Result<(), ConnectorError> {
		if !self.schemas.contains_key(schema) {
			return Err(ConnectorError::SchemaNotFound {
				schema: schema.to_string(),
			});
		}
		Ok(())
	}
}

impl MemoryTable {
	pub(crate) fn column_index(&self, column: &ColumnHandle) -> Result<usize, ConnectorError> {
		self.columns.iter().position(|c| c.name == column.name).ok_or_else(|| ConnectorError::ColumnNotFound {
			table: self.name.to_string(),
			column: column.name.clone(),
		})
	}

	pub(crate) fn require_unused(&self, column: &str) -> Result<(), ConnectorError> {
		if self.columns.iter().any(|c| c.name == column) {
			return Err(ConnectorError::ColumnAlreadyExists {
				table: self.name.to_string(),
				column: column.to_string(),
			});
		}
		Ok(())
	}
}
