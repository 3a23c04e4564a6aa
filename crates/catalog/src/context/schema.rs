// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_core::{CatalogError, CatalogObjectKind, EntityKind, Properties, QualifiedName, SchemaDef, SchemaName};
use metabridge_type::Result;
use tracing::{debug, instrument};

use super::CatalogConnector;

/// Schema operations of a bridged catalog, keyed by schema names
pub trait SupportsSchemas {
	fn list_schemas(&self, catalog: &QualifiedName) -> Result<Vec<QualifiedName>>;

	fn create_schema(
		&self,
		name: &QualifiedName,
		comment: Option<&str>,
		properties: &Properties,
	) -> Result<SchemaDef>;

	fn load_schema(&self, name: &QualifiedName) -> Result<SchemaDef>;

	fn schema_exists(&self, name: &QualifiedName) -> Result<bool>;

	/// `false` when the schema did not exist
	fn drop_schema(&self, name: &QualifiedName, cascade: bool) -> Result<bool>;
}

impl CatalogConnector {
	fn schema_name(&self, name: &QualifiedName) -> Result<SchemaName> {
		self.check_name(name, EntityKind::Schema)?;
		Ok(SchemaName::try_from(name)?)
	}
}

fn schema_not_found(name: &QualifiedName) -> CatalogError {
	CatalogError::NotFound {
		kind: CatalogObjectKind::Schema,
		name: name.to_string(),
	}
}

impl SupportsSchemas for CatalogConnector {
	#[instrument(name = "catalog::schema::list", level = "trace", skip_all, fields(catalog = %catalog))]
	fn list_schemas(&self, catalog: &QualifiedName) -> Result<Vec<QualifiedName>> {
		self.check_name(catalog, EntityKind::Catalog)?;
		let metadata = self.connector().begin()?;
		metadata
			.list_schema_names()?
			.into_iter()
			.map(|schema| -> Result<QualifiedName> { Ok(catalog.child(schema)?) })
			.collect()
	}

	#[instrument(name = "catalog::schema::create", level = "debug", skip_all, fields(schema = %name))]
	fn create_schema(
		&self,
		name: &QualifiedName,
		comment: Option<&str>,
		properties: &Properties,
	) -> Result<SchemaDef> {
		let schema = self.schema_name(name)?;
		let definition = SchemaDef {
			name: schema.schema.clone(),
			comment: comment.map(str::to_string),
			properties: properties.clone(),
		};
		let engine = self.adapter().build_engine_schema(&definition)?;

		let mut metadata = self.connector().begin()?;
		if metadata.schema_exists(&schema.schema)? {
			return Err(CatalogError::AlreadyExists {
				kind: CatalogObjectKind::Schema,
				name: name.to_string(),
			}
			.into());
		}
		metadata.create_schema(&schema.schema, &engine)?;
		metadata.commit()?;

		debug!(schema = %name, "created schema");
		Ok(self.adapter().parse_engine_schema(&schema.schema, &engine))
	}

	#[instrument(name = "catalog::schema::load", level = "trace", skip_all, fields(schema = %name))]
	fn load_schema(&self, name: &QualifiedName) -> Result<SchemaDef> {
		let schema = self.schema_name(name)?;
		let metadata = self.connector().begin()?;
		if !metadata.schema_exists(&schema.schema)? {
			return Err(schema_not_found(name).into());
		}
		let properties = metadata.get_schema_properties(&schema.schema)?;
		Ok(self.adapter().parse_engine_schema(&schema.schema, &properties))
	}

	#[instrument(name = "catalog::schema::exists", level = "trace", skip_all, fields(schema = %name))]
	fn schema_exists(&self, name: &QualifiedName) -> Result<bool> {
		let schema = self.schema_name(name)?;
		let metadata = self.connector().begin()?;
		metadata.schema_exists(&schema.schema)
	}

	#[instrument(name = "catalog::schema::drop", level = "debug", skip_all, fields(schema = %name, cascade = cascade))]
	fn drop_schema(&self, name: &QualifiedName, cascade: bool) -> Result<bool> {
		let schema = self.schema_name(name)?;
		let mut metadata = self.connector().begin()?;
		if !metadata.schema_exists(&schema.schema)? {
			return Ok(false);
		}
		metadata.drop_schema(&schema.schema, cascade)?;
		metadata.commit()?;

		debug!(schema = %name, cascade, "dropped schema");
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use metabridge_type::ErrorKind;

	use super::*;
	use crate::context::tests::memory_context;

	fn sales() -> QualifiedName {
		QualifiedName::of_schema("lake", "mem", "sales")
	}

	#[test]
	fn test_schema_lifecycle() {
		let context = memory_context();
		let properties = Properties::from([("team".to_string(), "finance".to_string())]);

		let created = context.create_schema(&sales(), Some("quarterly"), &properties).unwrap();
		assert_eq!(created.name, "sales");
		assert!(context.schema_exists(&sales()).unwrap());

		let loaded = context.load_schema(&sales()).unwrap();
		assert_eq!(loaded, created);
		assert_eq!(loaded.comment.as_deref(), Some("quarterly"));
		assert_eq!(loaded.properties, properties);

		assert_eq!(context.list_schemas(&QualifiedName::of_catalog("lake", "mem")).unwrap(), vec![sales()]);

		assert!(context.drop_schema(&sales(), false).unwrap());
		assert!(!context.drop_schema(&sales(), false).unwrap());
		assert!(!context.schema_exists(&sales()).unwrap());
	}

	#[test]
	fn test_duplicate_and_missing_schema() {
		let context = memory_context();
		context.create_schema(&sales(), None, &Properties::new()).unwrap();

		let err = context.create_schema(&sales(), None, &Properties::new()).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::AlreadyExists);

		let err = context.load_schema(&QualifiedName::of_schema("lake", "mem", "missing")).unwrap_err();
		assert_eq!(err.code, "CA_001");
	}

	#[test]
	fn test_comment_is_not_a_property() {
		let context = memory_context();
		let properties = Properties::from([("comment".to_string(), "sneaky".to_string())]);
		assert!(context.create_schema(&sales(), None, &properties).is_err());
	}

	#[test]
	fn test_depth_mismatch_fails_fast() {
		let context = memory_context();
		let err = context.schema_exists(&QualifiedName::of_table("lake", "mem", "sales", "orders")).unwrap_err();
		assert_eq!(err.code, "CA_004");
		let err = context.list_schemas(&sales()).unwrap_err();
		assert_eq!(err.code, "CA_004");
	}
}
