// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_catalog::provider::{HIVE_PROVIDER, ICEBERG_PROVIDER, MEMORY_PROVIDER, METASTORE_PATH};
use metabridge_core::{CatalogDef, ColumnDef, QualifiedName, TableDef};
use metabridge_type::Type;

pub const METALAKE: &str = "lake";

pub fn memory_catalog(name: &str) -> CatalogDef {
	CatalogDef::new(METALAKE, name, MEMORY_PROVIDER)
}

/// A hive catalog backed by an in-memory sqlite metastore
pub fn hive_catalog(name: &str) -> CatalogDef {
	CatalogDef::new(METALAKE, name, HIVE_PROVIDER).with_property(METASTORE_PATH, ":memory:")
}

pub fn iceberg_catalog(name: &str) -> CatalogDef {
	CatalogDef::new(METALAKE, name, ICEBERG_PROVIDER).with_property(METASTORE_PATH, ":memory:")
}

pub fn schema_name(catalog: &str, schema: &str) -> QualifiedName {
	QualifiedName::of_schema(METALAKE, catalog, schema)
}

pub fn table_name(catalog: &str, schema: &str, table: &str) -> QualifiedName {
	QualifiedName::of_table(METALAKE, catalog, schema, table)
}

/// An `orders` table using types every provider family supports
pub fn orders_table() -> TableDef {
	TableDef::new("orders")
		.with_column(ColumnDef::new("id", Type::Long).not_null())
		.with_column(ColumnDef::new("customer", Type::String).with_comment("customer name"))
		.with_column(ColumnDef::new("amount", Type::Double))
		.with_column(ColumnDef::new("placed_at", Type::timestamp()))
		.with_column(ColumnDef::new("tags", Type::list(Type::String)))
		.with_comment("customer orders")
}
