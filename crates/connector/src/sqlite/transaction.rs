// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeMap;

use indexmap::IndexMap;
use metabridge_type::{EngineType, Result};
use parking_lot::MutexGuard;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::warn;

use crate::{
	error::ConnectorError,
	handle::{ColumnHandle, SchemaTableName, TableHandle, TableId},
	metadata::{EngineColumnMetadata, EngineProperties, EngineTableMetadata, PropertyValue},
	spi::ConnectorMetadata,
};

type StoreResult<T> = std::result::Result<T, ConnectorError>;

struct TableRow {
	name: SchemaTableName,
	comment: Option<String>,
	properties: EngineProperties,
}

/// A sqlite transaction holding the connection for its whole lifetime.
/// Dropped without `commit` it rolls back.
pub(super) struct SqliteMetadata<'a> {
	conn: MutexGuard<'a, Connection>,
	finished: bool,
}

impl<'a> SqliteMetadata<'a> {
	pub(super) fn begin(conn: MutexGuard<'a, Connection>) -> StoreResult<Self> {
		conn.execute_batch("BEGIN IMMEDIATE")?;
		Ok(Self {
			conn,
			finished: false,
		})
	}

	fn table_row(&self, id: TableId) -> StoreResult<Option<TableRow>> {
		let row = self
			.conn
			.query_row(
				"SELECT schema_name, name, comment, properties FROM tables WHERE id = ?1",
				params![*id as i64],
				|row| {
					Ok((
						row.get::<_, String>(0)?,
						row.get::<_, String>(1)?,
						row.get::<_, Option<String>>(2)?,
						row.get::<_, String>(3)?,
					))
				},
			)
			.optional()?;

		match row {
			None => Ok(None),
			Some((schema, name, comment, properties)) => Ok(Some(TableRow {
				name: SchemaTableName::new(schema, name),
				comment,
				properties: serde_json::from_str(&properties)?,
			})),
		}
	}

	fn resolve(&self, handle: &TableHandle) -> StoreResult<TableRow> {
		let row = self.table_row(handle.id)?.ok_or_else(|| ConnectorError::TableNotFound {
			table: handle.name.to_string(),
		})?;
		if row.name != handle.name {
			return Err(ConnectorError::StaleHandle {
				table: handle.name.to_string(),
				current: row.name.to_string(),
			});
		}
		Ok(row)
	}

	fn find_table(&self, name: &SchemaTableName) -> StoreResult<Option<TableId>> {
		let id = self
			.conn
			.query_row(
				"SELECT id FROM tables WHERE schema_name = ?1 AND name = ?2",
				params![name.schema, name.table],
				|row| row.get::<_, i64>(0),
			)
			.optional()?;
		Ok(id.map(|id| TableId(id as u64)))
	}

	fn has_schema(&self, schema: &str) -> StoreResult<bool> {
		let found = self
			.conn
			.query_row("SELECT 1 FROM schemas WHERE name = ?1", params![schema], |_| Ok(()))
			.optional()?;
		Ok(found.is_some())
	}

	fn require_schema(&self, schema: &str) -> StoreResult<()> {
		if !self.has_schema(schema)? {
			return Err(ConnectorError::SchemaNotFound {
				schema: schema.to_string(),
			});
		}
		Ok(())
	}

	fn columns(&self, id: TableId) -> StoreResult<Vec<EngineColumnMetadata>> {
		let mut stmt = self
			.conn
			.prepare("SELECT name, type, nullable, comment FROM columns WHERE table_id = ?1 ORDER BY ordinal")?;
		let rows = stmt
			.query_map(params![*id as i64], |row| {
				Ok((
					row.get::<_, String>(0)?,
					row.get::<_, String>(1)?,
					row.get::<_, bool>(2)?,
					row.get::<_, Option<String>>(3)?,
				))
			})?
			.collect::<std::result::Result<Vec<_>, _>>()?;

		rows.into_iter()
			.map(|(name, ty, nullable, comment)| -> StoreResult<EngineColumnMetadata> {
				Ok(EngineColumnMetadata {
					name,
					ty: serde_json::from_str(&ty)?,
					nullable,
					comment,
				})
			})
			.collect()
	}

	fn column_ordinal(&self, handle: &TableHandle, column: &str) -> StoreResult<Option<usize>> {
		let ordinal = self
			.conn
			.query_row(
				"SELECT ordinal FROM columns WHERE table_id = ?1 AND name = ?2",
				params![*handle.id as i64, column],
				|row| row.get::<_, i64>(0),
			)
			.optional()?;
		Ok(ordinal.map(|o| o as usize))
	}

	fn require_column(&self, handle: &TableHandle, column: &ColumnHandle) -> StoreResult<usize> {
		self.column_ordinal(handle, &column.name)?.ok_or_else(|| ConnectorError::ColumnNotFound {
			table: handle.name.to_string(),
			column: column.name.clone(),
		})
	}

	fn require_unused(&self, handle: &TableHandle, column: &str) -> StoreResult<()> {
		if self.column_ordinal(handle, column)?.is_some() {
			return Err(ConnectorError::ColumnAlreadyExists {
				table: handle.name.to_string(),
				column: column.to_string(),
			});
		}
		Ok(())
	}

	fn insert_column(&self, id: TableId, ordinal: usize, column: &EngineColumnMetadata) -> StoreResult<()> {
		self.conn.execute(
			"INSERT INTO columns (table_id, ordinal, name, type, nullable, comment) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
			params![
				*id as i64,
				ordinal as i64,
				column.name,
				serde_json::to_string(&column.ty)?,
				column.nullable,
				column.comment
			],
		)?;
		Ok(())
	}

	fn do_list_tables(&self, schema: Option<&str>) -> StoreResult<Vec<SchemaTableName>> {
		if let Some(schema) = schema {
			self.require_schema(schema)?;
		}
		let mut stmt = self.conn.prepare(
			"SELECT schema_name, name FROM tables WHERE ?1 IS NULL OR schema_name = ?1 ORDER BY schema_name, name",
		)?;
		let names = stmt
			.query_map(params![schema], |row| {
				Ok(SchemaTableName::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?))
			})?
			.collect::<std::result::Result<Vec<_>, _>>()?;
		Ok(names)
	}

	fn do_create_schema(&self, schema: &str, properties: &EngineProperties) -> StoreResult<()> {
		if self.has_schema(schema)? {
			return Err(ConnectorError::SchemaAlreadyExists {
				schema: schema.to_string(),
			});
		}
		self.conn.execute(
			"INSERT INTO schemas (name, properties) VALUES (?1, ?2)",
			params![schema, serde_json::to_string(properties)?],
		)?;
		Ok(())
	}

	fn do_drop_schema(&self, schema: &str, cascade: bool) -> StoreResult<()> {
		self.require_schema(schema)?;
		let tables: i64 =
			self.conn.query_row("SELECT COUNT(*) FROM tables WHERE schema_name = ?1", params![schema], |row| {
				row.get(0)
			})?;
		if tables > 0 && !cascade {
			return Err(ConnectorError::SchemaNotEmpty {
				schema: schema.to_string(),
			});
		}
		self.conn.execute("DELETE FROM tables WHERE schema_name = ?1", params![schema])?;
		self.conn.execute("DELETE FROM schemas WHERE name = ?1", params![schema])?;
		Ok(())
	}

	fn do_schema_properties(&self, schema: &str) -> StoreResult<EngineProperties> {
		let properties = self
			.conn
			.query_row("SELECT properties FROM schemas WHERE name = ?1", params![schema], |row| {
				row.get::<_, String>(0)
			})
			.optional()?
			.ok_or_else(|| ConnectorError::SchemaNotFound {
				schema: schema.to_string(),
			})?;
		Ok(serde_json::from_str(&properties)?)
	}

	fn do_table_metadata(&self, handle: &TableHandle) -> StoreResult<EngineTableMetadata> {
		let row = self.resolve(handle)?;
		Ok(EngineTableMetadata {
			table: row.name.table,
			columns: self.columns(handle.id)?,
			comment: row.comment,
			properties: row.properties,
		})
	}

	fn do_column_handles(&self, handle: &TableHandle) -> StoreResult<IndexMap<String, ColumnHandle>> {
		self.resolve(handle)?;
		Ok(self
			.columns(handle.id)?
			.into_iter()
			.enumerate()
			.map(|(ordinal, column)| {
				let handle = ColumnHandle {
					name: column.name.clone(),
					ordinal,
				};
				(column.name, handle)
			})
			.collect())
	}

	fn do_create_table(&self, schema: &str, metadata: &EngineTableMetadata) -> StoreResult<TableHandle> {
		self.require_schema(schema)?;
		let name = SchemaTableName::new(schema, &metadata.table);
		if self.find_table(&name)?.is_some() {
			return Err(ConnectorError::TableAlreadyExists {
				table: name.to_string(),
			});
		}

		self.conn.execute(
			"INSERT INTO tables (schema_name, name, comment, properties) VALUES (?1, ?2, ?3, ?4)",
			params![schema, metadata.table, metadata.comment, serde_json::to_string(&metadata.properties)?],
		)?;
		let handle = TableHandle {
			id: TableId(self.conn.last_insert_rowid() as u64),
			name,
		};

		for (ordinal, column) in metadata.columns.iter().enumerate() {
			self.require_unused(&handle, &column.name)?;
			self.insert_column(handle.id, ordinal, column)?;
		}
		Ok(handle)
	}

	fn do_drop_table(&self, handle: &TableHandle) -> StoreResult<()> {
		self.resolve(handle)?;
		self.conn.execute("DELETE FROM tables WHERE id = ?1", params![*handle.id as i64])?;
		Ok(())
	}

	fn do_rename_table(&self, handle: &TableHandle, new_name: &SchemaTableName) -> StoreResult<()> {
		self.resolve(handle)?;
		self.require_schema(&new_name.schema)?;
		if let Some(existing) = self.find_table(new_name)? {
			if existing != handle.id {
				return Err(ConnectorError::TableAlreadyExists {
					table: new_name.to_string(),
				});
			}
		}
		self.conn.execute(
			"UPDATE tables SET schema_name = ?1, name = ?2 WHERE id = ?3",
			params![new_name.schema, new_name.table, *handle.id as i64],
		)?;
		Ok(())
	}

	fn do_add_column(
		&self,
		handle: &TableHandle,
		column: &EngineColumnMetadata,
		ordinal: Option<usize>,
	) -> StoreResult<()> {
		self.resolve(handle)?;
		self.require_unused(handle, &column.name)?;

		let count: i64 = self.conn.query_row(
			"SELECT COUNT(*) FROM columns WHERE table_id = ?1",
			params![*handle.id as i64],
			|row| row.get(0),
		)?;
		let count = count as usize;
		let ordinal = ordinal.unwrap_or(count);
		if ordinal > count {
			return Err(ConnectorError::OrdinalOutOfRange {
				table: handle.name.to_string(),
				ordinal,
				columns: count,
			});
		}

		self.conn.execute(
			"UPDATE columns SET ordinal = ordinal + 1 WHERE table_id = ?1 AND ordinal >= ?2",
			params![*handle.id as i64, ordinal as i64],
		)?;
		self.insert_column(handle.id, ordinal, column)
	}

	fn do_drop_column(&self, handle: &TableHandle, column: &ColumnHandle) -> StoreResult<()> {
		self.resolve(handle)?;
		let ordinal = self.require_column(handle, column)?;
		self.conn.execute(
			"DELETE FROM columns WHERE table_id = ?1 AND name = ?2",
			params![*handle.id as i64, column.name],
		)?;
		self.conn.execute(
			"UPDATE columns SET ordinal = ordinal - 1 WHERE table_id = ?1 AND ordinal > ?2",
			params![*handle.id as i64, ordinal as i64],
		)?;
		Ok(())
	}

	fn do_rename_column(&self, handle: &TableHandle, column: &ColumnHandle, new_name: &str) -> StoreResult<()> {
		self.resolve(handle)?;
		self.require_column(handle, column)?;
		if column.name != new_name {
			self.require_unused(handle, new_name)?;
		}
		self.conn.execute(
			"UPDATE columns SET name = ?1 WHERE table_id = ?2 AND name = ?3",
			params![new_name, *handle.id as i64, column.name],
		)?;
		Ok(())
	}

	fn do_update_column(
		&self,
		handle: &TableHandle,
		column: &ColumnHandle,
		sql: &str,
		value: &dyn rusqlite::ToSql,
	) -> StoreResult<()> {
		self.resolve(handle)?;
		self.require_column(handle, column)?;
		self.conn.execute(sql, params![value, *handle.id as i64, column.name])?;
		Ok(())
	}

	fn do_set_table_comment(&self, handle: &TableHandle, comment: Option<&str>) -> StoreResult<()> {
		self.resolve(handle)?;
		self.conn.execute("UPDATE tables SET comment = ?1 WHERE id = ?2", params![comment, *handle.id as i64])?;
		Ok(())
	}

	fn do_set_table_properties(
		&self,
		handle: &TableHandle,
		changes: &BTreeMap<String, Option<PropertyValue>>,
	) -> StoreResult<()> {
		let mut properties = self.resolve(handle)?.properties;
		for (key, value) in changes {
			match value {
				Some(value) => {
					properties.insert(key.clone(), value.clone());
				}
				None => {
					properties.remove(key);
				}
			}
		}
		self.conn.execute(
			"UPDATE tables SET properties = ?1 WHERE id = ?2",
			params![serde_json::to_string(&properties)?, *handle.id as i64],
		)?;
		Ok(())
	}
}

impl ConnectorMetadata for SqliteMetadata<'_> {
	fn list_schema_names(&self) -> Result<Vec<String>> {
		let names = || -> StoreResult<Vec<String>> {
			let mut stmt = self.conn.prepare("SELECT name FROM schemas ORDER BY name")?;
			let names = stmt.query_map([], |row| row.get::<_, String>(0))?.collect::<std::result::Result<_, _>>()?;
			Ok(names)
		};
		Ok(names()?)
	}

	fn schema_exists(&self, schema: &str) -> Result<bool> {
		Ok(self.has_schema(schema)?)
	}

	fn create_schema(&mut self, schema: &str, properties: &EngineProperties) -> Result<()> {
		Ok(self.do_create_schema(schema, properties)?)
	}

	fn drop_schema(&mut self, schema: &str, cascade: bool) -> Result<()> {
		Ok(self.do_drop_schema(schema, cascade)?)
	}

	fn get_schema_properties(&self, schema: &str) -> Result<EngineProperties> {
		Ok(self.do_schema_properties(schema)?)
	}

	fn list_tables(&self, schema: Option<&str>) -> Result<Vec<SchemaTableName>> {
		Ok(self.do_list_tables(schema)?)
	}

	fn get_table_handle(&self, name: &SchemaTableName) -> Result<Option<TableHandle>> {
		Ok(self.find_table(name)?.map(|id| TableHandle {
			id,
			name: name.clone(),
		}))
	}

	fn get_table_metadata(&self, table: &TableHandle) -> Result<EngineTableMetadata> {
		Ok(self.do_table_metadata(table)?)
	}

	fn get_column_handles(&self, table: &TableHandle) -> Result<IndexMap<String, ColumnHandle>> {
		Ok(self.do_column_handles(table)?)
	}

	fn create_table(&mut self, schema: &str, metadata: &EngineTableMetadata) -> Result<TableHandle> {
		Ok(self.do_create_table(schema, metadata)?)
	}

	fn drop_table(&mut self, table: &TableHandle) -> Result<()> {
		Ok(self.do_drop_table(table)?)
	}

	fn rename_table(&mut self, table: &TableHandle, new_name: &SchemaTableName) -> Result<()> {
		Ok(self.do_rename_table(table, new_name)?)
	}

	fn add_column(
		&mut self,
		table: &TableHandle,
		column: &EngineColumnMetadata,
		ordinal: Option<usize>,
	) -> Result<()> {
		Ok(self.do_add_column(table, column, ordinal)?)
	}

	fn drop_column(&mut self, table: &TableHandle, column: &ColumnHandle) -> Result<()> {
		Ok(self.do_drop_column(table, column)?)
	}

	fn rename_column(&mut self, table: &TableHandle, column: &ColumnHandle, new_name: &str) -> Result<()> {
		Ok(self.do_rename_column(table, column, new_name)?)
	}

	fn set_column_type(&mut self, table: &TableHandle, column: &ColumnHandle, ty: &EngineType) -> Result<()> {
		let ty = serde_json::to_string(ty).map_err(ConnectorError::from)?;
		Ok(self.do_update_column(
			table,
			column,
			"UPDATE columns SET type = ?1 WHERE table_id = ?2 AND name = ?3",
			&ty,
		)?)
	}

	fn set_column_comment(
		&mut self,
		table: &TableHandle,
		column: &ColumnHandle,
		comment: Option<&str>,
	) -> Result<()> {
		Ok(self.do_update_column(
			table,
			column,
			"UPDATE columns SET comment = ?1 WHERE table_id = ?2 AND name = ?3",
			&comment,
		)?)
	}

	fn set_table_comment(&mut self, table: &TableHandle, comment: Option<&str>) -> Result<()> {
		Ok(self.do_set_table_comment(table, comment)?)
	}

	fn set_table_properties(
		&mut self,
		table: &TableHandle,
		properties: &BTreeMap<String, Option<PropertyValue>>,
	) -> Result<()> {
		Ok(self.do_set_table_properties(table, properties)?)
	}

	fn commit(mut self: Box<Self>) -> Result<()> {
		self.conn.execute_batch("COMMIT").map_err(ConnectorError::from)?;
		self.finished = true;
		Ok(())
	}
}

impl Drop for SqliteMetadata<'_> {
	fn drop(&mut self) {
		if !self.finished {
			if let Err(err) = self.conn.execute_batch("ROLLBACK") {
				warn!(error = %err, "failed to roll back sqlite metadata transaction");
			}
		}
	}
}
