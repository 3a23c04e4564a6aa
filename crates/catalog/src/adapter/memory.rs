// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_connector::EngineProperties;
use metabridge_core::TableDef;
use metabridge_type::Result;

use super::{LayoutPolicy, MetadataAdapter, PropertyConverter, SCHEMA_COMMENT, unsupported_layout};
use crate::transform::{GeneralTransformer, TypeTransformer};

/// Pass-through adapter for the in-memory provider, which stores no layout
#[derive(Debug, Clone)]
pub struct MemoryAdapter {
	transformer: GeneralTransformer,
	schema_properties: PropertyConverter,
	table_properties: PropertyConverter,
}

impl MemoryAdapter {
	pub fn new() -> Self {
		Self {
			transformer: GeneralTransformer,
			schema_properties: PropertyConverter::default().with_reserved(&[SCHEMA_COMMENT]),
			table_properties: PropertyConverter::default(),
		}
	}
}

impl Default for MemoryAdapter {
	fn default() -> Self {
		Self::new()
	}
}

impl MetadataAdapter for MemoryAdapter {
	fn provider(&self) -> &str {
		"memory"
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
		if table.has_layout() {
			unsupported_layout(
				self.provider(),
				&table.name,
				"layout",
				"partitioning, sort order and distribution are not stored",
				policy,
			)?;
		}
		Ok(EngineProperties::new())
	}

	fn layout_from_engine(&self, _properties: &EngineProperties, _table: &mut TableDef) -> Result<()> {
		Ok(())
	}
}
