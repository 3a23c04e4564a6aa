// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_connector::{EngineProperties, PropertyValue};
use metabridge_core::{CatalogError, Distribution, SortDirection, SortOrder, Strategy, TableDef, Transform};
use metabridge_type::Result;

use super::{
	LayoutPolicy, MetadataAdapter, PropertyConverter, PropertyEntry, SCHEMA_COMMENT, layout_array,
	quote_identifier, split_identifier, unsupported_layout,
};
use crate::transform::{HiveTransformer, TypeTransformer};

pub const PARTITIONED_BY: &str = "partitioned_by";
pub const BUCKETED_BY: &str = "bucketed_by";
pub const BUCKET_COUNT: &str = "bucket_count";
pub const SORTED_BY: &str = "sorted_by";

const DESC: &str = "DESC";

/// Adapter for Hive metastore catalogs.
///
/// Hive partitions by column value only and sorts within buckets, so sort
/// order requires a hash distribution.
#[derive(Debug, Clone)]
pub struct HiveAdapter {
	transformer: HiveTransformer,
	schema_properties: PropertyConverter,
	table_properties: PropertyConverter,
}

impl HiveAdapter {
	pub fn new() -> Self {
		Self {
			transformer: HiveTransformer,
			schema_properties: PropertyConverter::new(vec![PropertyEntry::string("location", "location")])
				.with_reserved(&[SCHEMA_COMMENT]),
			table_properties: PropertyConverter::new(vec![
				PropertyEntry::string("format", "format").with_hidden_default("ORC"),
				PropertyEntry::string("location", "external_location"),
				PropertyEntry::boolean("transactional", "transactional"),
			])
			.with_reserved(&[PARTITIONED_BY, BUCKETED_BY, BUCKET_COUNT, SORTED_BY]),
		}
	}
}

impl Default for HiveAdapter {
	fn default() -> Self {
		Self::new()
	}
}

fn encode_sort_key(order: &SortOrder) -> String {
	let column = quote_identifier(&order.column);
	match order.direction {
		SortDirection::Ascending => column,
		SortDirection::Descending => format!("{} {}", column, DESC),
	}
}

fn decode_sort_key(key: &str) -> Result<SortOrder> {
	let invalid = || -> metabridge_type::Error {
		CatalogError::InvalidArgument {
			name: SORTED_BY.to_string(),
			reason: format!("malformed sort key `{}`", key),
		}
		.into()
	};

	let (column, _, rest) = split_identifier(key).ok_or_else(invalid)?;
	if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
		return Err(invalid());
	}
	let mut parts = rest.split_whitespace();
	let direction = match parts.next() {
		None => SortDirection::Ascending,
		Some(direction) if direction.eq_ignore_ascii_case("ASC") => SortDirection::Ascending,
		Some(direction) if direction.eq_ignore_ascii_case(DESC) => SortDirection::Descending,
		Some(_) => return Err(invalid()),
	};
	if parts.next().is_some() {
		return Err(invalid());
	}
	Ok(SortOrder::new(column, direction))
}

impl MetadataAdapter for HiveAdapter {
	fn provider(&self) -> &str {
		"hive"
	}

	fn transformer(&self) -> &dyn TypeTransformer {
		&self.transformer
	}

	fn schema_properties(&self) -> &PropertyConverter {
		&self.schema_properties
	}

	fn table_properties(&self) -> &PropertyConverter {
		&self.table_properties
	}

	fn layout_to_engine(&self, table: &TableDef, policy: LayoutPolicy) -> Result<EngineProperties> {
		let mut result = EngineProperties::new();

		let mut partitioned_by = Vec::with_capacity(table.partitioning.len());
		for transform in &table.partitioning {
			match transform {
				Transform::Identity(column) => partitioned_by.push(column.clone()),
				other => unsupported_layout(
					self.provider(),
					&table.name,
					"partitioning",
					format!("only identity partitions are supported, got `{}`", other),
					policy,
				)?,
			}
		}
		if !partitioned_by.is_empty() {
			result.insert(PARTITIONED_BY.to_string(), PropertyValue::Array(partitioned_by));
		}

		let mut bucketed = false;
		if let Some(distribution) = &table.distribution {
			if distribution.strategy != Strategy::Hash {
				unsupported_layout(
					self.provider(),
					&table.name,
					"distribution",
					format!("only hash bucketing is supported, got {}", distribution.strategy),
					policy,
				)?;
			} else if distribution.number == 0 || distribution.columns.is_empty() {
				return Err(CatalogError::InvalidArgument {
					name: table.name.clone(),
					reason: "hash bucketing needs a positive bucket count and at least one column"
						.to_string(),
				}
				.into());
			} else {
				result.insert(BUCKETED_BY.to_string(), PropertyValue::Array(distribution.columns.clone()));
				result.insert(BUCKET_COUNT.to_string(), PropertyValue::Integer(distribution.number as i64));
				bucketed = true;
			}
		}

		if !table.sort_orders.is_empty() {
			if !bucketed {
				unsupported_layout(
					self.provider(),
					&table.name,
					"sort order",
					"sorting requires hash bucketing",
					policy,
				)?;
			} else {
				let mut sorted_by = Vec::with_capacity(table.sort_orders.len());
				for order in &table.sort_orders {
					if order.null_ordering != order.direction.default_null_ordering() {
						unsupported_layout(
							self.provider(),
							&table.name,
							"null ordering",
							format!("`{}` can only use {}", order.column, order.direction.default_null_ordering()),
							policy,
						)?;
					}
					sorted_by.push(encode_sort_key(order));
				}
				result.insert(SORTED_BY.to_string(), PropertyValue::Array(sorted_by));
			}
		}

		Ok(result)
	}

	fn layout_from_engine(&self, properties: &EngineProperties, table: &mut TableDef) -> Result<()> {
		table.partitioning =
			layout_array(properties, PARTITIONED_BY)?.iter().cloned().map(Transform::Identity).collect();

		let bucketed_by = layout_array(properties, BUCKETED_BY)?;
		if !bucketed_by.is_empty() {
			let number = properties
				.get(BUCKET_COUNT)
				.and_then(PropertyValue::as_integer)
				.and_then(|n| u32::try_from(n).ok())
				.ok_or_else(|| CatalogError::InvalidArgument {
					name: BUCKET_COUNT.to_string(),
					reason: "bucketed tables need a bucket count".to_string(),
				})?;
			table.distribution = Some(Distribution::hash(number, bucketed_by.iter().cloned()));
		}

		table.sort_orders = layout_array(properties, SORTED_BY)?
			.iter()
			.map(|key| decode_sort_key(key))
			.collect::<Result<Vec<_>>>()?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use metabridge_core::{ColumnDef, NullOrdering};
	use metabridge_type::{ErrorKind, Type};

	use super::*;

	fn orders() -> TableDef {
		TableDef::new("orders")
			.with_column(ColumnDef::new("id", Type::Long))
			.with_column(ColumnDef::new("amount", Type::decimal(12, 2).unwrap()))
			.with_column(ColumnDef::new("dt", Type::Date))
	}

	#[test]
	fn test_layout_round_trip() {
		let adapter = HiveAdapter::new();
		let table = orders()
			.with_partitioning(Transform::Identity("dt".to_string()))
			.with_distribution(Distribution::hash(16, ["id"]))
			.with_sort_order(SortOrder::asc("id"))
			.with_sort_order(SortOrder::desc("amount"))
			.with_property("transactional", "true");

		let engine = adapter.build_engine_table_metadata(&table, LayoutPolicy::Required).unwrap();
		assert_eq!(engine.properties.get(PARTITIONED_BY), Some(&PropertyValue::Array(vec!["dt".to_string()])));
		assert_eq!(engine.properties.get(BUCKET_COUNT), Some(&PropertyValue::Integer(16)));
		assert_eq!(
			engine.properties.get(SORTED_BY),
			Some(&PropertyValue::Array(vec!["id".to_string(), "amount DESC".to_string()]))
		);
		assert_eq!(engine.properties.get("format"), Some(&PropertyValue::from("ORC")));

		let parsed = adapter.parse_engine_table_metadata(&engine).unwrap();
		assert_eq!(parsed.partitioning, table.partitioning);
		assert_eq!(parsed.distribution, table.distribution);
		assert_eq!(parsed.sort_orders, table.sort_orders);
		assert_eq!(parsed.properties, table.properties);
	}

	#[test]
	fn test_layout_round_trip_with_quoted_columns() {
		let adapter = HiveAdapter::new();
		let table = TableDef::new("orders")
			.with_column(ColumnDef::new("order date", Type::Date))
			.with_column(ColumnDef::new("say \"hi\"", Type::String))
			.with_column(ColumnDef::new("id", Type::Long))
			.with_distribution(Distribution::hash(4, ["order date"]))
			.with_sort_order(SortOrder::asc("order date"))
			.with_sort_order(SortOrder::desc("say \"hi\""))
			.with_sort_order(SortOrder::desc("id"));

		let engine = adapter.build_engine_table_metadata(&table, LayoutPolicy::Required).unwrap();
		assert_eq!(
			engine.properties.get(SORTED_BY),
			Some(&PropertyValue::Array(vec![
				"\"order date\"".to_string(),
				"\"say \"\"hi\"\"\" DESC".to_string(),
				"id DESC".to_string(),
			]))
		);

		let parsed = adapter.parse_engine_table_metadata(&engine).unwrap();
		assert_eq!(parsed.distribution, table.distribution);
		assert_eq!(parsed.sort_orders, table.sort_orders);
	}

	#[test]
	fn test_malformed_sort_keys() {
		for key in ["", "\"open DESC", "id DESC extra", "id SIDEWAYS", "id-x"] {
			assert_eq!(decode_sort_key(key).unwrap_err().code, "CA_006", "{}", key);
		}
		assert_eq!(decode_sort_key("id asc").unwrap(), SortOrder::asc("id"));
	}

	#[test]
	fn test_location_is_renamed() {
		let adapter = HiveAdapter::new();
		let table = orders().with_property("location", "/warehouse/orders");
		let engine = adapter.build_engine_table_metadata(&table, LayoutPolicy::Required).unwrap();
		assert_eq!(engine.properties.get("external_location"), Some(&PropertyValue::from("/warehouse/orders")));
		assert_eq!(
			adapter.parse_engine_table_metadata(&engine).unwrap().properties.get("location").map(String::as_str),
			Some("/warehouse/orders")
		);
	}

	#[test]
	fn test_unsupported_layout_under_best_effort() {
		let adapter = HiveAdapter::new();
		let table = orders()
			.with_partitioning(Transform::Day("dt".to_string()))
			.with_partitioning(Transform::Identity("dt".to_string()))
			.with_sort_order(SortOrder::asc("id"));

		let engine = adapter.build_engine_table_metadata(&table, LayoutPolicy::BestEffort).unwrap();
		let parsed = adapter.parse_engine_table_metadata(&engine).unwrap();
		assert_eq!(parsed.partitioning, vec![Transform::Identity("dt".to_string())]);
		assert!(parsed.sort_orders.is_empty());
	}

	#[test]
	fn test_unsupported_layout_when_required() {
		let adapter = HiveAdapter::new();
		for table in [
			orders().with_partitioning(Transform::Bucket {
				num_buckets: 4,
				columns: vec!["id".to_string()],
			}),
			orders().with_sort_order(SortOrder::asc("id")),
			orders().with_distribution(Distribution::hash(4, ["id"])).with_sort_order(SortOrder {
				column: "id".to_string(),
				direction: SortDirection::Ascending,
				null_ordering: NullOrdering::NullsLast,
			}),
		] {
			let err = adapter.build_engine_table_metadata(&table, LayoutPolicy::Required).unwrap_err();
			assert_eq!(err.kind(), ErrorKind::Unsupported);
		}
	}

	#[test]
	fn test_layout_keys_cannot_be_set_as_properties() {
		let adapter = HiveAdapter::new();
		let err = adapter
			.build_engine_table_metadata(&orders().with_property(BUCKET_COUNT, "8"), LayoutPolicy::BestEffort)
			.unwrap_err();
		assert_eq!(err.code, "CA_006");
	}

	#[test]
	fn test_rejects_unsupported_column_types() {
		let adapter = HiveAdapter::new();
		let table = orders().with_column(ColumnDef::new("trace", Type::Uuid));
		let err = adapter.build_engine_table_metadata(&table, LayoutPolicy::BestEffort).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::UnsupportedType);
	}
}
