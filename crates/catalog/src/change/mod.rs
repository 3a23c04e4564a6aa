// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Applies an ordered sequence of table changes to an engine table.
//!
//! Every change is validated and translated before the engine is touched.
//! Execution then runs step by step against the caller's metadata
//! transaction, resolving the table and column handles freshly for each step.
//! The caller commits; dropping the transaction after an error discards every
//! step already executed.

use std::collections::BTreeMap;

use metabridge_connector::{ColumnHandle, ConnectorMetadata, SchemaTableName, TableHandle};
use metabridge_core::{CatalogError, CatalogObjectKind, ChangeKind, TableChange, TableName};
use metabridge_type::{Error, Result};
use tracing::{instrument, trace};

use crate::adapter::MetadataAdapter;

mod plan;

use plan::{Step, plan};

pub struct ChangeApplier<'a> {
	adapter: &'a dyn MetadataAdapter,
}

impl<'a> ChangeApplier<'a> {
	pub fn new(adapter: &'a dyn MetadataAdapter) -> Self {
		Self {
			adapter,
		}
	}

	/// Applies `changes` in order and returns the name the table ends up with
	#[instrument(name = "catalog::alter::apply", level = "debug", skip_all, fields(table = %table, changes = changes.len()))]
	pub fn apply(
		&self,
		metadata: &mut dyn ConnectorMetadata,
		table: &TableName,
		changes: &[TableChange],
	) -> Result<SchemaTableName> {
		let steps = plan(self.adapter, table, changes)?;

		let mut current = SchemaTableName::new(&table.schema, &table.table);
		for step in steps {
			let handle = resolve_table(metadata, table, &current)?;
			if let Some((change, column)) = step.displaced_column() {
				self.ensure_outside_layout(metadata, table, &handle, change, column)?;
			}
			trace!(table = %current, step = ?step, "applying table change");
			if let Some(renamed) = execute(metadata, table, &handle, step)? {
				current = renamed;
			}
		}
		Ok(current)
	}

	/// Layout properties name columns by value, so a layout column may be
	/// neither dropped nor renamed
	fn ensure_outside_layout(
		&self,
		metadata: &dyn ConnectorMetadata,
		table: &TableName,
		handle: &TableHandle,
		change: ChangeKind,
		column: &str,
	) -> Result<()> {
		let current = self.adapter.parse_engine_table_metadata(&metadata.get_table_metadata(handle)?)?;
		if !current.layout_columns().contains(column) {
			return Ok(());
		}
		Err(CatalogError::UnsupportedOperation {
			operation: change.to_string(),
			name: format!("{}.{}.{}.{}", table.metalake, table.catalog, handle.name, column),
			reason: "the column is part of the table layout".to_string(),
		}
		.into())
	}
}

fn resolve_table(
	metadata: &dyn ConnectorMetadata,
	table: &TableName,
	current: &SchemaTableName,
) -> Result<TableHandle> {
	metadata.get_table_handle(current)?.ok_or_else(|| {
		CatalogError::NotFound {
			kind: CatalogObjectKind::Table,
			name: format!("{}.{}.{}", table.metalake, table.catalog, current),
		}
		.into()
	})
}

/// `None` when the column is missing
fn find_column(metadata: &dyn ConnectorMetadata, handle: &TableHandle, column: &str) -> Result<Option<ColumnHandle>> {
	Ok(metadata.get_column_handles(handle)?.swap_remove(column))
}

fn column_not_found(table: &TableName, handle: &TableHandle, column: &str) -> Error {
	CatalogError::NotFound {
		kind: CatalogObjectKind::Column,
		name: format!("{}.{}.{}.{}", table.metalake, table.catalog, handle.name, column),
	}
	.into()
}

fn resolve_column(
	metadata: &dyn ConnectorMetadata,
	table: &TableName,
	handle: &TableHandle,
	column: &str,
) -> Result<ColumnHandle> {
	find_column(metadata, handle, column)?.ok_or_else(|| column_not_found(table, handle, column))
}

/// Runs a single step, returning the new table name after a rename
fn execute(
	metadata: &mut dyn ConnectorMetadata,
	table: &TableName,
	handle: &TableHandle,
	step: Step,
) -> Result<Option<SchemaTableName>> {
	match step {
		Step::RenameTable {
			new_name,
		} => {
			let target = SchemaTableName::new(&handle.name.schema, new_name);
			metadata.rename_table(handle, &target)?;
			return Ok(Some(target));
		}
		Step::AddColumn {
			column,
			ordinal,
		} => metadata.add_column(handle, &column, ordinal)?,
		Step::DeleteColumn {
			column,
			if_exists,
		} => match find_column(metadata, handle, &column)? {
			Some(column) => metadata.drop_column(handle, &column)?,
			None if if_exists => {}
			None => return Err(column_not_found(table, handle, &column)),
		},
		Step::RenameColumn {
			column,
			new_name,
		} => {
			let column = resolve_column(metadata, table, handle, &column)?;
			metadata.rename_column(handle, &column, &new_name)?;
		}
		Step::UpdateColumnType {
			column,
			ty,
		} => {
			let column = resolve_column(metadata, table, handle, &column)?;
			metadata.set_column_type(handle, &column, &ty)?;
		}
		Step::UpdateComment {
			comment,
		} => metadata.set_table_comment(handle, comment.as_deref())?,
		Step::UpdateColumnComment {
			column,
			comment,
		} => {
			let column = resolve_column(metadata, table, handle, &column)?;
			metadata.set_column_comment(handle, &column, comment.as_deref())?;
		}
		Step::SetProperty {
			key,
			value,
		} => metadata.set_table_properties(handle, &BTreeMap::from([(key, Some(value))]))?,
		Step::RemoveProperty {
			key,
		} => metadata.set_table_properties(handle, &BTreeMap::from([(key, None)]))?,
	}
	Ok(None)
}
