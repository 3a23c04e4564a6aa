// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_connector::{ConnectorMetadata, SchemaTableName};
use metabridge_core::{CatalogError, CatalogObjectKind, EntityKind, QualifiedName, TableChange, TableDef, TableName};
use metabridge_type::Result;
use tracing::{debug, instrument};

use super::CatalogConnector;
use crate::{adapter::LayoutPolicy, change::ChangeApplier};

/// Table operations of a bridged catalog, keyed by table names.
///
/// Mutations of the same table are serialized; each runs in a single engine
/// metadata transaction.
pub trait TableCatalog {
	fn list_tables(&self, schema: &QualifiedName) -> Result<Vec<QualifiedName>>;

	fn load_table(&self, name: &QualifiedName) -> Result<TableDef>;

	fn table_exists(&self, name: &QualifiedName) -> Result<bool>;

	/// Creates the table under the last segment of `name`; `table.name` is
	/// ignored
	fn create_table(&self, name: &QualifiedName, table: &TableDef, policy: LayoutPolicy) -> Result<TableDef>;

	/// [`Self::create_table`] under the layout policy the catalog was
	/// bridged with
	fn create_table_with_catalog_policy(&self, name: &QualifiedName, table: &TableDef) -> Result<TableDef>;

	fn alter_table(&self, name: &QualifiedName, changes: &[TableChange]) -> Result<TableDef>;

	/// `false` when the table did not exist
	fn drop_table(&self, name: &QualifiedName) -> Result<bool>;

	fn purge_table(&self, name: &QualifiedName) -> Result<bool>;
}

impl CatalogConnector {
	fn table_name(&self, name: &QualifiedName) -> Result<TableName> {
		self.check_name(name, EntityKind::Table)?;
		Ok(TableName::try_from(name)?)
	}

	fn read_table(&self, metadata: &dyn ConnectorMetadata, name: &QualifiedName, table: &SchemaTableName) -> Result<TableDef> {
		let handle = metadata.get_table_handle(table)?.ok_or_else(|| CatalogError::NotFound {
			kind: CatalogObjectKind::Table,
			name: name.to_string(),
		})?;
		self.adapter().parse_engine_table_metadata(&metadata.get_table_metadata(&handle)?)
	}
}

fn engine_name(table: &TableName) -> SchemaTableName {
	SchemaTableName::new(&table.schema, &table.table)
}

impl TableCatalog for CatalogConnector {
	#[instrument(name = "catalog::table::list", level = "trace", skip_all, fields(schema = %schema))]
	fn list_tables(&self, schema: &QualifiedName) -> Result<Vec<QualifiedName>> {
		self.check_name(schema, EntityKind::Schema)?;
		let metadata = self.connector().begin()?;
		if !metadata.schema_exists(schema.name())? {
			return Err(CatalogError::NotFound {
				kind: CatalogObjectKind::Schema,
				name: schema.to_string(),
			}
			.into());
		}
		metadata
			.list_tables(Some(schema.name()))?
			.into_iter()
			.map(|table| -> Result<QualifiedName> { Ok(schema.child(table.table)?) })
			.collect()
	}

	#[instrument(name = "catalog::table::load", level = "trace", skip_all, fields(table = %name))]
	fn load_table(&self, name: &QualifiedName) -> Result<TableDef> {
		let table = self.table_name(name)?;
		let metadata = self.connector().begin()?;
		self.read_table(metadata.as_ref(), name, &engine_name(&table))
	}

	#[instrument(name = "catalog::table::exists", level = "trace", skip_all, fields(table = %name))]
	fn table_exists(&self, name: &QualifiedName) -> Result<bool> {
		let table = self.table_name(name)?;
		let metadata = self.connector().begin()?;
		Ok(metadata.get_table_handle(&engine_name(&table))?.is_some())
	}

	#[instrument(name = "catalog::table::create", level = "debug", skip_all, fields(table = %name, policy = ?policy))]
	fn create_table(&self, name: &QualifiedName, table: &TableDef, policy: LayoutPolicy) -> Result<TableDef> {
		let target = engine_name(&self.table_name(name)?);
		let mut definition = table.clone();
		definition.name = target.table.clone();
		let engine = self.adapter().build_engine_table_metadata(&definition, policy)?;

		let created = self.with_table_lock(&target, || -> Result<TableDef> {
			let mut metadata = self.connector().begin()?;
			if !metadata.schema_exists(&target.schema)? {
				return Err(CatalogError::NotFound {
					kind: CatalogObjectKind::Schema,
					name: name.parent().map(|schema| schema.to_string()).unwrap_or_default(),
				}
				.into());
			}
			if metadata.get_table_handle(&target)?.is_some() {
				return Err(CatalogError::AlreadyExists {
					kind: CatalogObjectKind::Table,
					name: name.to_string(),
				}
				.into());
			}
			metadata.create_table(&target.schema, &engine)?;
			let created = self.read_table(metadata.as_ref(), name, &target)?;
			metadata.commit()?;
			Ok(created)
		})?;

		debug!(table = %name, columns = created.columns.len(), "created table");
		Ok(created)
	}

	fn create_table_with_catalog_policy(&self, name: &QualifiedName, table: &TableDef) -> Result<TableDef> {
		self.create_table(name, table, self.layout_policy())
	}

	#[instrument(name = "catalog::table::alter", level = "debug", skip_all, fields(table = %name, changes = changes.len()))]
	fn alter_table(&self, name: &QualifiedName, changes: &[TableChange]) -> Result<TableDef> {
		let table = self.table_name(name)?;
		let (renamed_name, altered) = self.with_table_lock(&engine_name(&table), || -> Result<_> {
			let mut metadata = self.connector().begin()?;
			let renamed = ChangeApplier::new(self.adapter()).apply(metadata.as_mut(), &table, changes)?;
			let renamed_name =
				QualifiedName::of_table(&table.metalake, &table.catalog, &renamed.schema, &renamed.table);
			let altered = self.read_table(metadata.as_ref(), &renamed_name, &renamed)?;
			metadata.commit()?;
			Ok((renamed_name, altered))
		})?;

		debug!(table = %renamed_name, "altered table");
		Ok(altered)
	}

	#[instrument(name = "catalog::table::drop", level = "debug", skip_all, fields(table = %name))]
	fn drop_table(&self, name: &QualifiedName) -> Result<bool> {
		let target = engine_name(&self.table_name(name)?);
		let dropped = self.with_table_lock(&target, || -> Result<bool> {
			let mut metadata = self.connector().begin()?;
			let Some(handle) = metadata.get_table_handle(&target)? else {
				return Ok(false);
			};
			metadata.drop_table(&handle)?;
			metadata.commit()?;
			Ok(true)
		})?;

		if dropped {
			debug!(table = %name, "dropped table");
		}
		Ok(dropped)
	}

	fn purge_table(&self, name: &QualifiedName) -> Result<bool> {
		self.check_name(name, EntityKind::Table)?;
		Err(CatalogError::UnsupportedOperation {
			operation: "purge table".to_string(),
			name: name.to_string(),
			reason: format!("provider `{}` keeps no table data to purge", self.provider()),
		}
		.into())
	}
}
