// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::interface::catalog::{ColumnDef, Distribution, Properties, SortOrder, Transform};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
	pub name: String,
	pub columns: Vec<ColumnDef>,
	pub comment: Option<String>,
	pub properties: Properties,
	pub partitioning: Vec<Transform>,
	pub sort_orders: Vec<SortOrder>,
	pub distribution: Option<Distribution>,
}

impl TableDef {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			columns: vec![],
			comment: None,
			properties: Properties::new(),
			partitioning: vec![],
			sort_orders: vec![],
			distribution: None,
		}
	}

	pub fn with_column(mut self, column: ColumnDef) -> Self {
		self.columns.push(column);
		self
	}

	pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
		self.comment = Some(comment.into());
		self
	}

	pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.properties.insert(key.into(), value.into());
		self
	}

	pub fn with_partitioning(mut self, transform: Transform) -> Self {
		self.partitioning.push(transform);
		self
	}

	pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
		self.sort_orders.push(sort_order);
		self
	}

	pub fn with_distribution(mut self, distribution: Distribution) -> Self {
		self.distribution = Some(distribution);
		self
	}

	pub fn column(&self, name: &str) -> Option<&ColumnDef> {
		self.columns.iter().find(|c| c.name == name)
	}

	pub fn column_names(&self) -> Vec<&str> {
		self.columns.iter().map(|c| c.name.as_str()).collect()
	}

	pub fn has_layout(&self) -> bool {
		!self.partitioning.is_empty() || !self.sort_orders.is_empty() || self.distribution.is_some()
	}

	/// Columns referenced by partitioning, sort order or distribution
	pub fn layout_columns(&self) -> BTreeSet<&str> {
		let mut result: BTreeSet<&str> = self.partitioning.iter().flat_map(Transform::columns).collect();
		result.extend(self.sort_orders.iter().map(|order| order.column.as_str()));
		if let Some(distribution) = &self.distribution {
			result.extend(distribution.columns.iter().map(String::as_str));
		}
		result
	}
}

#[cfg(test)]
mod tests {
	use metabridge_type::Type;

	use super::*;

	#[test]
	fn test_layout_columns() {
		let table = TableDef::new("orders")
			.with_column(ColumnDef::new("id", Type::Long))
			.with_column(ColumnDef::new("dt", Type::Date))
			.with_column(ColumnDef::new("amount", Type::Double))
			.with_partitioning(Transform::Identity("dt".to_string()))
			.with_distribution(Distribution::hash(4, ["id"]))
			.with_sort_order(SortOrder::asc("id"));
		assert_eq!(table.layout_columns().into_iter().collect::<Vec<_>>(), vec!["dt", "id"]);
		assert!(TableDef::new("empty").layout_columns().is_empty());
	}
}
