// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Debug, Formatter},
	sync::Arc,
};

use dashmap::DashMap;
use metabridge_connector::{Connector, SchemaTableName};
use metabridge_core::{CatalogDef, CatalogError, EntityKind, QualifiedName};
use metabridge_type::Result;
use parking_lot::Mutex;
use tracing::info;

use crate::adapter::{LayoutPolicy, MetadataAdapter};

mod schema;
mod table;

pub use schema::SupportsSchemas;
pub use table::TableCatalog;

/// The live binding of one catalog to its engine connector and adapter.
///
/// Built once per catalog definition by the lifecycle manager and shared
/// through the registry as `Arc<CatalogConnector>`. The connector is shut
/// down when the last reference drops.
pub struct CatalogConnector {
	catalog: CatalogDef,
	generation: u64,
	connector: Box<dyn Connector>,
	adapter: Arc<dyn MetadataAdapter>,
	layout_policy: LayoutPolicy,
	table_locks: DashMap<SchemaTableName, Arc<Mutex<()>>>,
}

impl CatalogConnector {
	pub fn new(
		catalog: CatalogDef,
		generation: u64,
		connector: Box<dyn Connector>,
		adapter: Arc<dyn MetadataAdapter>,
	) -> Self {
		Self {
			catalog,
			generation,
			connector,
			adapter,
			layout_policy: LayoutPolicy::default(),
			table_locks: DashMap::new(),
		}
	}

	/// Policy for tables created through [`TableCatalog::create_table_with_catalog_policy`]
	pub fn with_layout_policy(mut self, policy: LayoutPolicy) -> Self {
		self.layout_policy = policy;
		self
	}

	pub fn layout_policy(&self) -> LayoutPolicy {
		self.layout_policy
	}

	pub fn catalog(&self) -> &CatalogDef {
		&self.catalog
	}

	/// Increases every time the lifecycle manager builds a context, so a
	/// replaced context can be told apart from its successor
	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn provider(&self) -> &str {
		&self.catalog.provider
	}

	pub fn connector(&self) -> &dyn Connector {
		self.connector.as_ref()
	}

	pub fn adapter(&self) -> &dyn MetadataAdapter {
		self.adapter.as_ref()
	}

	/// Fails unless `name` has the depth of `expected` and lives in this
	/// catalog
	pub(crate) fn check_name(&self, name: &QualifiedName, expected: EntityKind) -> Result<()> {
		name.require(expected)?;
		if name.metalake() != self.catalog.metalake || name.catalog() != Some(self.catalog.name.as_str()) {
			return Err(CatalogError::CatalogMismatch {
				name: name.to_string(),
				catalog: self.catalog.full_name(),
			}
			.into());
		}
		Ok(())
	}

	/// Runs `f` while holding the lock of `table`. The lock entry is removed
	/// again once no other caller holds or waits for it.
	pub(crate) fn with_table_lock<T>(&self, table: &SchemaTableName, f: impl FnOnce() -> T) -> T {
		let lock = self.table_locks.entry(table.clone()).or_default().clone();
		let result = {
			let _guard = lock.lock();
			f()
		};
		drop(lock);
		self.table_locks.remove_if(table, |_, lock| Arc::strong_count(lock) == 1);
		result
	}
}

impl Debug for CatalogConnector {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("CatalogConnector")
			.field("catalog", &self.catalog.full_name())
			.field("provider", &self.catalog.provider)
			.field("generation", &self.generation)
			.field("layout_policy", &self.layout_policy)
			.finish()
	}
}

impl Drop for CatalogConnector {
	fn drop(&mut self) {
		self.connector.shutdown();
		info!(catalog = %self.catalog.full_name(), generation = self.generation, "released catalog connector");
	}
}

#[cfg(test)]
mod tests {
	use std::{
		sync::atomic::{AtomicUsize, Ordering},
		thread,
		time::Duration,
	};

	use metabridge_connector::MemoryConnector;
	use metabridge_type::ErrorKind;

	use super::*;
	use crate::adapter::MemoryAdapter;

	pub(crate) fn memory_context() -> CatalogConnector {
		CatalogConnector::new(
			CatalogDef::new("lake", "mem", "memory"),
			1,
			Box::new(MemoryConnector::new("mem")),
			Arc::new(MemoryAdapter::new()),
		)
	}

	#[test]
	fn test_check_name() {
		let context = memory_context();
		context.check_name(&QualifiedName::of_schema("lake", "mem", "sales"), EntityKind::Schema).unwrap();

		let err = context.check_name(&QualifiedName::of_catalog("lake", "mem"), EntityKind::Schema).unwrap_err();
		assert_eq!(err.code, "CA_004");

		let err = context
			.check_name(&QualifiedName::of_schema("lake", "other", "sales"), EntityKind::Schema)
			.unwrap_err();
		assert_eq!(err.code, "CA_010");
		assert_eq!(err.kind(), ErrorKind::InvalidArgument);

		let err = context
			.check_name(&QualifiedName::of_schema("other", "mem", "sales"), EntityKind::Schema)
			.unwrap_err();
		assert_eq!(err.code, "CA_010");
	}

	#[test]
	fn test_table_lock_serializes_callers() {
		let context = memory_context();
		let orders = SchemaTableName::new("sales", "orders");
		let active = AtomicUsize::new(0);
		let max_active = AtomicUsize::new(0);

		thread::scope(|scope| {
			for _ in 0..4 {
				scope.spawn(|| {
					context.with_table_lock(&orders, || {
						let now = active.fetch_add(1, Ordering::SeqCst) + 1;
						max_active.fetch_max(now, Ordering::SeqCst);
						thread::sleep(Duration::from_millis(10));
						active.fetch_sub(1, Ordering::SeqCst);
					})
				});
			}
		});

		assert_eq!(max_active.load(Ordering::SeqCst), 1);
		assert!(context.table_locks.is_empty());
	}

	#[test]
	fn test_table_lock_entries_are_removed() {
		let context = memory_context();
		let orders = SchemaTableName::new("sales", "orders");
		let items = SchemaTableName::new("sales", "items");

		context.with_table_lock(&orders, || {
			context.with_table_lock(&items, || assert_eq!(context.table_locks.len(), 2));
			assert_eq!(context.table_locks.len(), 1);
		});
		assert!(context.table_locks.is_empty());
	}

	#[test]
	fn test_drop_shuts_down_connector() {
		let connector = Arc::new(MemoryConnector::new("mem"));
		let context = CatalogConnector::new(
			CatalogDef::new("lake", "mem", "memory"),
			1,
			Box::new(SharedConnector(connector.clone())),
			Arc::new(MemoryAdapter::new()),
		);
		assert!(!connector.is_shut_down());
		drop(context);
		assert!(connector.is_shut_down());
	}

	struct SharedConnector(Arc<MemoryConnector>);

	impl Connector for SharedConnector {
		fn name(&self) -> &str {
			self.0.name()
		}

		fn begin(&self) -> Result<Box<dyn metabridge_connector::ConnectorMetadata + '_>> {
			self.0.begin()
		}

		fn shutdown(&self) {
			self.0.shutdown()
		}
	}
}
