// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Per-provider projection of generic catalog entities onto engine metadata.
//!
//! An adapter never talks to a connector. It owns the type transformer of its
//! provider family, one property converter per entity kind and the encoding
//! of table layout into reserved engine properties.

use metabridge_connector::{EngineColumnMetadata, EngineProperties, EngineTableMetadata, PropertyValue};
use metabridge_core::{CatalogError, ColumnDef, ColumnPosition, Properties, SchemaDef, TableDef};
use metabridge_type::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::transform::TypeTransformer;

mod hive;
mod iceberg;
mod memory;
mod property;

pub use hive::HiveAdapter;
pub use iceberg::IcebergAdapter;
pub use memory::MemoryAdapter;
pub use property::{PropertyConverter, PropertyEntry, PropertyKind};

/// Engine schema property carrying the schema comment
pub const SCHEMA_COMMENT: &str = "comment";

/// How layout features the provider cannot store are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPolicy {
	/// Drop the feature and log a warning
	#[default]
	BestEffort,
	/// Reject the table with `UnsupportedOperation`
	Required,
}

/// Resolves an unsupported layout feature according to `policy`
pub(crate) fn unsupported_layout(
	provider: &str,
	table: &str,
	feature: &str,
	reason: impl Into<String>,
	policy: LayoutPolicy,
) -> Result<()> {
	let reason = reason.into();
	match policy {
		LayoutPolicy::BestEffort => {
			warn!(provider, table, feature, reason = %reason, "dropping unsupported table layout");
			Ok(())
		}
		LayoutPolicy::Required => Err(CatalogError::UnsupportedOperation {
			operation: format!("create table with {}", feature),
			name: table.to_string(),
			reason: format!("{} provider: {}", provider, reason),
		}
		.into()),
	}
}

/// Reads an array valued layout property written by an adapter
pub(crate) fn layout_array<'a>(properties: &'a EngineProperties, key: &str) -> Result<&'a [String]> {
	match properties.get(key) {
		None => Ok(&[][..]),
		Some(value) => value.as_array().ok_or_else(|| {
			CatalogError::InvalidArgument {
				name: key.to_string(),
				reason: format!("expected an array but got `{}`", value),
			}
			.into()
		}),
	}
}

fn is_plain_identifier(column: &str) -> bool {
	!column.is_empty() && column.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Writes a column into a delimited layout entry, double quoted unless it is
/// a plain word
pub(crate) fn quote_identifier(column: &str) -> String {
	if is_plain_identifier(column) {
		return column.to_string();
	}
	format!("\"{}\"", column.replace('"', "\"\""))
}

/// Splits the leading column off a layout entry written with
/// [`quote_identifier`]. Returns the column, whether it was quoted, and the
/// remainder; `None` for an empty column or an unterminated quote.
pub(crate) fn split_identifier(input: &str) -> Option<(String, bool, &str)> {
	let input = input.trim_start();
	let Some(quoted) = input.strip_prefix('"') else {
		let end = input.find(|c: char| !(c.is_alphanumeric() || c == '_')).unwrap_or(input.len());
		if end == 0 {
			return None;
		}
		return Some((input[..end].to_string(), false, &input[end..]));
	};

	let mut column = String::new();
	let mut chars = quoted.char_indices().peekable();
	while let Some((i, c)) = chars.next() {
		if c != '"' {
			column.push(c);
			continue;
		}
		if matches!(chars.peek(), Some((_, '"'))) {
			column.push('"');
			chars.next();
			continue;
		}
		if column.is_empty() {
			return None;
		}
		return Some((column, true, &quoted[i + 1..]));
	}
	None
}

pub trait MetadataAdapter: Send + Sync {
	fn provider(&self) -> &str;

	fn transformer(&self) -> &dyn TypeTransformer;

	fn schema_properties(&self) -> &PropertyConverter;

	fn table_properties(&self) -> &PropertyConverter;

	/// Encodes partitioning, sort order and distribution as reserved engine
	/// properties
	fn layout_to_engine(&self, table: &TableDef, policy: LayoutPolicy) -> Result<EngineProperties>;

	/// Decodes the reserved layout properties back onto `table`
	fn layout_from_engine(&self, properties: &EngineProperties, table: &mut TableDef) -> Result<()>;

	fn to_engine_schema_properties(&self, properties: &Properties) -> Result<EngineProperties> {
		self.schema_properties().to_engine(properties)
	}

	fn to_generic_schema_properties(&self, properties: &EngineProperties) -> Properties {
		self.schema_properties().to_generic(properties)
	}

	fn to_engine_table_properties(&self, properties: &Properties) -> Result<EngineProperties> {
		self.table_properties().to_engine(properties)
	}

	fn to_generic_table_properties(&self, properties: &EngineProperties) -> Properties {
		self.table_properties().to_generic(properties)
	}

	fn build_engine_schema(&self, schema: &SchemaDef) -> Result<EngineProperties> {
		let mut properties = self.to_engine_schema_properties(&schema.properties)?;
		if let Some(comment) = &schema.comment {
			properties.insert(SCHEMA_COMMENT.to_string(), PropertyValue::String(comment.clone()));
		}
		Ok(properties)
	}

	fn parse_engine_schema(&self, name: &str, properties: &EngineProperties) -> SchemaDef {
		let mut properties = properties.clone();
		let comment = properties.remove(SCHEMA_COMMENT).map(|value| value.to_string());
		SchemaDef {
			name: name.to_string(),
			comment,
			properties: self.to_generic_schema_properties(&properties),
		}
	}

	fn build_engine_column_metadata(&self, column: &ColumnDef) -> Result<EngineColumnMetadata> {
		Ok(EngineColumnMetadata {
			name: column.name.clone(),
			ty: self.transformer().to_engine_type(&column.ty)?,
			nullable: column.nullable,
			comment: column.comment.clone(),
		})
	}

	fn parse_engine_column_metadata(&self, column: &EngineColumnMetadata) -> Result<ColumnDef> {
		Ok(ColumnDef {
			name: column.name.clone(),
			ty: self.transformer().to_generic_type(&column.ty)?,
			comment: column.comment.clone(),
			nullable: column.nullable,
			position: ColumnPosition::Append,
		})
	}

	fn build_engine_table_metadata(&self, table: &TableDef, policy: LayoutPolicy) -> Result<EngineTableMetadata> {
		let columns = table
			.columns
			.iter()
			.map(|column| self.build_engine_column_metadata(column))
			.collect::<Result<Vec<_>>>()?;

		let mut properties = self.to_engine_table_properties(&table.properties)?;
		properties.extend(self.layout_to_engine(table, policy)?);

		Ok(EngineTableMetadata {
			table: table.name.clone(),
			columns,
			comment: table.comment.clone(),
			properties,
		})
	}

	fn parse_engine_table_metadata(&self, metadata: &EngineTableMetadata) -> Result<TableDef> {
		let mut columns = Vec::with_capacity(metadata.columns.len());
		for (ordinal, column) in metadata.columns.iter().enumerate() {
			let mut column = self.parse_engine_column_metadata(column)?;
			column.position = ColumnPosition::At(ordinal);
			columns.push(column);
		}

		let mut table = TableDef {
			name: metadata.table.clone(),
			columns,
			comment: metadata.comment.clone(),
			properties: self.to_generic_table_properties(&metadata.properties),
			partitioning: vec![],
			sort_orders: vec![],
			distribution: None,
		};
		self.layout_from_engine(&metadata.properties, &mut table)?;
		Ok(table)
	}
}

#[cfg(test)]
mod tests {
	use metabridge_core::{SortOrder, Transform};
	use metabridge_type::{ErrorKind, Type};

	use super::*;

	fn sample() -> TableDef {
		TableDef::new("events")
			.with_column(ColumnDef::new("id", Type::Long).not_null())
			.with_column(ColumnDef::new("payload", Type::String).with_comment("raw body"))
			.with_comment("click stream")
			.with_property("owner", "etl")
	}

	#[test]
	fn test_memory_table_round_trip() {
		let adapter = MemoryAdapter::new();
		let engine = adapter.build_engine_table_metadata(&sample(), LayoutPolicy::Required).unwrap();
		assert_eq!(engine.columns.len(), 2);
		assert!(!engine.columns[0].nullable);

		let parsed = adapter.parse_engine_table_metadata(&engine).unwrap();
		assert_eq!(parsed.name, "events");
		assert_eq!(parsed.column_names(), vec!["id", "payload"]);
		assert_eq!(parsed.column("payload").unwrap().comment.as_deref(), Some("raw body"));
		assert_eq!(parsed.column("payload").unwrap().position, ColumnPosition::At(1));
		assert_eq!(parsed.comment.as_deref(), Some("click stream"));
		assert_eq!(parsed.properties.get("owner").map(String::as_str), Some("etl"));
	}

	#[test]
	fn test_schema_comment_travels_as_property() {
		let adapter = MemoryAdapter::new();
		let schema = SchemaDef::new("sales").with_comment("quarterly").with_property("team", "finance");

		let engine = adapter.build_engine_schema(&schema).unwrap();
		assert_eq!(engine.get(SCHEMA_COMMENT), Some(&PropertyValue::from("quarterly")));

		assert_eq!(adapter.parse_engine_schema("sales", &engine), schema);
	}

	#[test]
	fn test_memory_layout_policy() {
		let adapter = MemoryAdapter::new();
		let table = sample().with_partitioning(Transform::Identity("id".to_string())).with_sort_order(SortOrder::asc("id"));

		let engine = adapter.build_engine_table_metadata(&table, LayoutPolicy::BestEffort).unwrap();
		assert!(!adapter.parse_engine_table_metadata(&engine).unwrap().has_layout());

		let err = adapter.build_engine_table_metadata(&table, LayoutPolicy::Required).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Unsupported);
	}

	#[test]
	fn test_identifier_quoting() {
		assert_eq!(quote_identifier("order_id"), "order_id");
		assert_eq!(quote_identifier("order date"), "\"order date\"");
		assert_eq!(quote_identifier("say \"hi\""), "\"say \"\"hi\"\"\"");

		for column in ["order_id", "order date", "a,b", "f(x)", "say \"hi\"", "DESC"] {
			let encoded = format!("{} DESC", quote_identifier(column));
			let (parsed, _, rest) = split_identifier(&encoded).unwrap();
			assert_eq!(parsed, column);
			assert_eq!(rest, " DESC");
		}

		assert_eq!(split_identifier("\"open"), None);
		assert_eq!(split_identifier("\"\""), None);
		assert_eq!(split_identifier(" ,x"), None);
	}

	#[test]
	fn test_layout_policy_deserializes_snake_case() {
		let policy: LayoutPolicy = serde_json::from_str("\"required\"").unwrap();
		assert_eq!(policy, LayoutPolicy::Required);
	}
}
