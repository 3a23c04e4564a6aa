// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeMap;

pub mod audit;
pub mod catalog;
pub mod column;
pub mod layout;
pub mod metalake;
pub mod schema;
pub mod table;

pub use audit::AuditInfo;
pub use catalog::{CatalogDef, CatalogType};
pub use column::{ColumnDef, ColumnPosition};
pub use layout::{Distribution, NullOrdering, SortDirection, SortOrder, Strategy, Transform};
pub use metalake::MetalakeDef;
pub use schema::SchemaDef;
pub use table::TableDef;

/// String to string property map of a generic entity
pub type Properties = BTreeMap<String, String>;
