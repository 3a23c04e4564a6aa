// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod change;
pub mod error;
pub mod interface;
pub mod name;

pub use change::{ChangeKind, TableChange};
pub use error::{CatalogError, CatalogObjectKind};
pub use interface::catalog::{
	AuditInfo, CatalogDef, CatalogType, ColumnDef, ColumnPosition, Distribution, MetalakeDef, NullOrdering,
	Properties, SchemaDef, SortDirection, SortOrder, Strategy, TableDef, Transform,
};
pub use metabridge_type::{Error, Result};
pub use name::{CatalogName, EntityKind, QualifiedName, SchemaName, TableName};
