// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_connector::{EngineProperties, PropertyValue};
use metabridge_core::{CatalogError, NullOrdering, SortDirection, SortOrder, TableDef, Transform};
use metabridge_type::{Error, Result};

use super::{
	LayoutPolicy, MetadataAdapter, PropertyConverter, PropertyEntry, SCHEMA_COMMENT, layout_array,
	quote_identifier, split_identifier, unsupported_layout,
};
use crate::transform::{IcebergTransformer, TypeTransformer};

pub const PARTITIONING: &str = "partitioning";
pub const SORTED_BY: &str = "sorted_by";

/// Adapter for Iceberg lakehouse catalogs.
///
/// Partition transforms are stored as strings such as `day(ts)` or
/// `bucket(id, 16)`; sort keys as `col [DESC] [NULLS FIRST|NULLS LAST]`.
/// Columns that are not plain words are double quoted.
#[derive(Debug, Clone)]
pub struct IcebergAdapter {
	transformer: IcebergTransformer,
	schema_properties: PropertyConverter,
	table_properties: PropertyConverter,
}

impl IcebergAdapter {
	pub fn new() -> Self {
		Self {
			transformer: IcebergTransformer,
			schema_properties: PropertyConverter::new(vec![PropertyEntry::string("location", "location")])
				.with_reserved(&[SCHEMA_COMMENT]),
			table_properties: PropertyConverter::new(vec![
				PropertyEntry::string("format", "format").with_hidden_default("PARQUET"),
				PropertyEntry::string("location", "location"),
				PropertyEntry::integer("format-version", "format_version").with_hidden_default("2"),
			])
			.with_reserved(&[PARTITIONING, SORTED_BY]),
		}
	}
}

impl Default for IcebergAdapter {
	fn default() -> Self {
		Self::new()
	}
}

fn malformed(key: &str, value: &str) -> Error {
	CatalogError::InvalidArgument {
		name: key.to_string(),
		reason: format!("malformed entry `{}`", value),
	}
	.into()
}

/// `None` for transforms Iceberg cannot express
fn encode_transform(transform: &Transform) -> Option<String> {
	let encoded = match transform {
		Transform::Identity(column) => quote_identifier(column),
		Transform::Bucket {
			num_buckets,
			columns,
		} => match columns.as_slice() {
			[column] => format!("bucket({}, {})", quote_identifier(column), num_buckets),
			_ => return None,
		},
		Transform::Truncate {
			width,
			column,
		} => format!("truncate({}, {})", quote_identifier(column), width),
		Transform::Year(column) | Transform::Month(column) | Transform::Day(column) | Transform::Hour(column) => {
			format!("{}({})", transform.name(), quote_identifier(column))
		}
	};
	Some(encoded)
}

fn decode_transform(value: &str) -> Result<Transform> {
	let invalid = || malformed(PARTITIONING, value);
	let (name, quoted, rest) = split_identifier(value).ok_or_else(invalid)?;
	let rest = rest.trim();
	if rest.is_empty() {
		return Ok(Transform::Identity(name));
	}
	if quoted {
		return Err(invalid());
	}

	let args = rest.strip_prefix('(').and_then(|args| args.strip_suffix(')')).ok_or_else(invalid)?;
	let (column, _, args) = split_identifier(args).ok_or_else(invalid)?;
	let args = args.trim();
	let number = match args.strip_prefix(',') {
		None if args.is_empty() => None,
		None => return Err(invalid()),
		Some(number) => Some(number.trim().parse::<u32>().map_err(|_| invalid())?),
	};

	let transform = match (name.to_ascii_lowercase().as_str(), number) {
		("year", None) => Transform::Year(column),
		("month", None) => Transform::Month(column),
		("day", None) => Transform::Day(column),
		("hour", None) => Transform::Hour(column),
		("bucket", Some(num_buckets)) => Transform::Bucket {
			num_buckets,
			columns: vec![column],
		},
		("truncate", Some(width)) => Transform::Truncate {
			width,
			column,
		},
		_ => return Err(invalid()),
	};
	Ok(transform)
}

fn encode_sort_key(order: &SortOrder) -> String {
	let mut result = quote_identifier(&order.column);
	if order.direction == SortDirection::Descending {
		result.push_str(" DESC");
	}
	if order.null_ordering != order.direction.default_null_ordering() {
		result.push(' ');
		result.push_str(&order.null_ordering.to_string());
	}
	result
}

fn decode_sort_key(value: &str) -> Result<SortOrder> {
	let (column, _, rest) = split_identifier(value).ok_or_else(|| malformed(SORTED_BY, value))?;
	if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
		return Err(malformed(SORTED_BY, value));
	}
	let tokens: Vec<String> = rest.split_whitespace().map(str::to_ascii_uppercase).collect();

	let mut rest = tokens.as_slice();
	let direction = match rest.first().map(String::as_str) {
		Some("DESC") => {
			rest = &rest[1..];
			SortDirection::Descending
		}
		Some("ASC") => {
			rest = &rest[1..];
			SortDirection::Ascending
		}
		_ => SortDirection::Ascending,
	};
	let mut order = SortOrder::new(column, direction);
	match rest {
		[] => {}
		[nulls, first] if nulls == "NULLS" && first == "FIRST" => order.null_ordering = NullOrdering::NullsFirst,
		[nulls, last] if nulls == "NULLS" && last == "LAST" => order.null_ordering = NullOrdering::NullsLast,
		_ => return Err(malformed(SORTED_BY, value)),
	}
	Ok(order)
}

impl MetadataAdapter for IcebergAdapter {
	fn provider(&self) -> &str {
		"lakehouse-iceberg"
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

		let mut partitioning = Vec::with_capacity(table.partitioning.len());
		for transform in &table.partitioning {
			match encode_transform(transform) {
				Some(encoded) => partitioning.push(encoded),
				None => unsupported_layout(
					self.provider(),
					&table.name,
					"partitioning",
					format!("`{}` must bucket a single column", transform),
					policy,
				)?,
			}
		}
		if !partitioning.is_empty() {
			result.insert(PARTITIONING.to_string(), PropertyValue::Array(partitioning));
		}

		if !table.sort_orders.is_empty() {
			result.insert(
				SORTED_BY.to_string(),
				PropertyValue::Array(table.sort_orders.iter().map(encode_sort_key).collect()),
			);
		}

		if let Some(distribution) = &table.distribution {
			unsupported_layout(
				self.provider(),
				&table.name,
				"distribution",
				format!("{} distribution is managed by the table format", distribution.strategy),
				policy,
			)?;
		}

		Ok(result)
	}

	fn layout_from_engine(&self, properties: &EngineProperties, table: &mut TableDef) -> Result<()> {
		table.partitioning = layout_array(properties, PARTITIONING)?
			.iter()
			.map(|value| decode_transform(value))
			.collect::<Result<Vec<_>>>()?;
		table.sort_orders = layout_array(properties, SORTED_BY)?
			.iter()
			.map(|value| decode_sort_key(value))
			.collect::<Result<Vec<_>>>()?;
		Ok(())
	}
}
