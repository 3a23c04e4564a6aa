// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	ops::Deref,
};

use serde::{Deserialize, Serialize};

/// A table name within one connector
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaTableName {
	pub schema: String,
	pub table: String,
}

impl SchemaTableName {
	pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
		Self {
			schema: schema.into(),
			table: table.into(),
		}
	}
}

impl Display for SchemaTableName {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.schema, self.table)
	}
}

#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub u64);

impl Deref for TableId {
	type Target = u64;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// A resolved table.
///
/// The handle remembers the name it was resolved under; once the table is
/// renamed the handle is stale and connectors reject it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableHandle {
	pub id: TableId,
	pub name: SchemaTableName,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnHandle {
	pub name: String,
	pub ordinal: usize,
}
