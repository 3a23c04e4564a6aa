// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Provider factories bind a catalog definition to a connector and adapter.

use std::{collections::HashMap, sync::Arc};

use metabridge_connector::{Connector, MemoryConnector, SqliteConnector};
use metabridge_core::{CatalogDef, CatalogError};
use metabridge_type::{Error, Result};
use tracing::{debug, instrument};

use crate::{
	adapter::{HiveAdapter, IcebergAdapter, MemoryAdapter, MetadataAdapter},
	context::CatalogConnector,
};

pub const MEMORY_PROVIDER: &str = "memory";
pub const HIVE_PROVIDER: &str = "hive";
pub const ICEBERG_PROVIDER: &str = "lakehouse-iceberg";

/// Optional positive limit on the tables of a memory catalog
pub const MEMORY_MAX_TABLES: &str = "memory.max-tables";
/// File path of the sqlite metastore, or `:memory:`
pub const METASTORE_PATH: &str = "metastore.path";

pub trait ConnectorFactory: Send + Sync {
	fn provider(&self) -> &str;

	fn create_connector(&self, catalog: &CatalogDef) -> Result<Box<dyn Connector>>;

	fn create_adapter(&self, catalog: &CatalogDef) -> Result<Arc<dyn MetadataAdapter>>;
}

fn invalid_property(key: &str, reason: impl Into<String>) -> Error {
	CatalogError::InvalidArgument {
		name: key.to_string(),
		reason: reason.into(),
	}
	.into()
}

fn required_property<'a>(catalog: &'a CatalogDef, key: &str) -> Result<&'a str> {
	match catalog.properties.get(key).map(|value| value.trim()) {
		Some(value) if !value.is_empty() => Ok(value),
		_ => Err(invalid_property(key, "the property is required")),
	}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryFactory;

impl ConnectorFactory for MemoryFactory {
	fn provider(&self) -> &str {
		MEMORY_PROVIDER
	}

	fn create_connector(&self, catalog: &CatalogDef) -> Result<Box<dyn Connector>> {
		let connector = MemoryConnector::new(catalog.full_name());
		let Some(limit) = catalog.properties.get(MEMORY_MAX_TABLES) else {
			return Ok(Box::new(connector));
		};
		match limit.trim().parse::<usize>() {
			Ok(limit) if limit > 0 => Ok(Box::new(connector.with_max_tables(limit))),
			_ => Err(invalid_property(MEMORY_MAX_TABLES, format!("expected a positive integer but got `{}`", limit))),
		}
	}

	fn create_adapter(&self, _catalog: &CatalogDef) -> Result<Arc<dyn MetadataAdapter>> {
		Ok(Arc::new(MemoryAdapter::new()))
	}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HiveFactory;

impl ConnectorFactory for HiveFactory {
	fn provider(&self) -> &str {
		HIVE_PROVIDER
	}

	fn create_connector(&self, catalog: &CatalogDef) -> Result<Box<dyn Connector>> {
		Ok(Box::new(SqliteConnector::open(catalog.full_name(), required_property(catalog, METASTORE_PATH)?)?))
	}

	fn create_adapter(&self, _catalog: &CatalogDef) -> Result<Arc<dyn MetadataAdapter>> {
		Ok(Arc::new(HiveAdapter::new()))
	}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IcebergFactory;

impl ConnectorFactory for IcebergFactory {
	fn provider(&self) -> &str {
		ICEBERG_PROVIDER
	}

	fn create_connector(&self, catalog: &CatalogDef) -> Result<Box<dyn Connector>> {
		Ok(Box::new(SqliteConnector::open(catalog.full_name(), required_property(catalog, METASTORE_PATH)?)?))
	}

	fn create_adapter(&self, _catalog: &CatalogDef) -> Result<Arc<dyn MetadataAdapter>> {
		Ok(Arc::new(IcebergAdapter::new()))
	}
}

/// Factories by provider name
#[derive(Clone, Default)]
pub struct ProviderRegistry {
	factories: HashMap<String, Arc<dyn ConnectorFactory>>,
}

impl ProviderRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry with the memory, hive and lakehouse-iceberg providers
	pub fn with_defaults() -> Self {
		Self::new().with(MemoryFactory).with(HiveFactory).with(IcebergFactory)
	}

	pub fn with(mut self, factory: impl ConnectorFactory + 'static) -> Self {
		self.register(Arc::new(factory));
		self
	}

	/// Replaces any factory registered for the same provider
	pub fn register(&mut self, factory: Arc<dyn ConnectorFactory>) {
		self.factories.insert(factory.provider().to_string(), factory);
	}

	pub fn get(&self, provider: &str) -> Option<Arc<dyn ConnectorFactory>> {
		self.factories.get(provider).cloned()
	}

	pub fn providers(&self) -> Vec<&str> {
		let mut result: Vec<&str> = self.factories.keys().map(String::as_str).collect();
		result.sort_unstable();
		result
	}

	/// Builds a complete context for `catalog`. Nothing is published here.
	#[instrument(name = "catalog::provider::create", level = "debug", skip_all, fields(catalog = %catalog.full_name(), provider = %catalog.provider, generation = generation))]
	pub fn create(&self, catalog: &CatalogDef, generation: u64) -> Result<CatalogConnector> {
		let Some(factory) = self.get(&catalog.provider) else {
			return Err(CatalogError::UnknownProvider {
				catalog: catalog.full_name(),
				provider: catalog.provider.clone(),
			}
			.into());
		};

		let failed = |err: Error| -> Error {
			CatalogError::ConstructionFailed {
				catalog: catalog.full_name(),
				provider: catalog.provider.clone(),
				reason: err.message.clone(),
				cause: Some(err.0),
			}
			.into()
		};

		let adapter = factory.create_adapter(catalog).map_err(failed)?;
		let connector = factory.create_connector(catalog).map_err(failed)?;
		debug!(connector = connector.name(), "constructed catalog connector");

		Ok(CatalogConnector::new(catalog.clone(), generation, connector, adapter))
	}
}

#[cfg(test)]
mod tests {
	use metabridge_type::ErrorKind;

	use super::*;

	#[test]
	fn test_defaults() {
		assert_eq!(ProviderRegistry::with_defaults().providers(), vec!["hive", "lakehouse-iceberg", "memory"]);
	}

	#[test]
	fn test_create_memory_catalog() {
		let catalog = CatalogDef::new("lake", "mem", MEMORY_PROVIDER).with_property(MEMORY_MAX_TABLES, "4");
		let context = ProviderRegistry::with_defaults().create(&catalog, 7).unwrap();
		assert_eq!(context.generation(), 7);
		assert_eq!(context.connector().name(), "lake.mem");
		assert_eq!(context.adapter().provider(), "memory");
	}

	#[test]
	fn test_create_sqlite_backed_catalogs() {
		let registry = ProviderRegistry::with_defaults();
		for provider in [HIVE_PROVIDER, ICEBERG_PROVIDER] {
			let catalog = CatalogDef::new("lake", "warehouse", provider).with_property(METASTORE_PATH, ":memory:");
			let context = registry.create(&catalog, 1).unwrap();
			assert_eq!(context.adapter().provider(), provider);
		}
	}

	#[test]
	fn test_unknown_provider() {
		let err = ProviderRegistry::with_defaults().create(&CatalogDef::new("lake", "x", "kafka"), 1).unwrap_err();
		assert_eq!(err.code, "CA_009");
		assert_eq!(err.kind(), ErrorKind::ConstructionFailure);
	}

	#[test]
	fn test_construction_failures_name_catalog_and_provider() {
		let registry = ProviderRegistry::with_defaults();
		for catalog in [
			CatalogDef::new("lake", "warehouse", HIVE_PROVIDER),
			CatalogDef::new("lake", "mem", MEMORY_PROVIDER).with_property(MEMORY_MAX_TABLES, "0"),
			CatalogDef::new("lake", "mem", MEMORY_PROVIDER).with_property(MEMORY_MAX_TABLES, "many"),
		] {
			let err = registry.create(&catalog, 1).unwrap_err();
			assert_eq!(err.code, "CA_007");
			assert!(err.message.contains(&catalog.full_name()), "{}", err.message);
			assert!(err.message.contains(&catalog.provider), "{}", err.message);
			assert!(err.cause.is_some());
		}
	}
}
