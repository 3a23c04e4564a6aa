// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Connector factories observing or disturbing catalog construction.
//!
//! All of them build memory connectors with the memory adapter.

use std::{
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	thread,
	time::Duration,
};

use metabridge_catalog::{ConnectorFactory, MemoryAdapter, MetadataAdapter};
use metabridge_connector::{Connector, ConnectorMetadata, MemoryConnector};
use metabridge_core::{CatalogDef, CatalogError};
use metabridge_type::Result;
use parking_lot::{Condvar, Mutex};

/// Counts the connectors it built and how many of them are still alive
#[derive(Clone)]
pub struct TrackedFactory {
	provider: String,
	created: Arc<AtomicUsize>,
	live: Arc<AtomicUsize>,
	shut_down: Arc<AtomicUsize>,
}

impl TrackedFactory {
	pub fn new(provider: impl Into<String>) -> Self {
		Self {
			provider: provider.into(),
			created: Arc::new(AtomicUsize::new(0)),
			live: Arc::new(AtomicUsize::new(0)),
			shut_down: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn created(&self) -> usize {
		self.created.load(Ordering::SeqCst)
	}

	pub fn live(&self) -> usize {
		self.live.load(Ordering::SeqCst)
	}

	pub fn shut_down(&self) -> usize {
		self.shut_down.load(Ordering::SeqCst)
	}
}

struct TrackedConnector {
	inner: MemoryConnector,
	live: Arc<AtomicUsize>,
	shut_down: Arc<AtomicUsize>,
}

impl Connector for TrackedConnector {
	fn name(&self) -> &str {
		self.inner.name()
	}

	fn begin(&self) -> Result<Box<dyn ConnectorMetadata + '_>> {
		self.inner.begin()
	}

	fn shutdown(&self) {
		self.shut_down.fetch_add(1, Ordering::SeqCst);
		self.inner.shutdown();
	}
}

impl Drop for TrackedConnector {
	fn drop(&mut self) {
		self.live.fetch_sub(1, Ordering::SeqCst);
	}
}

impl ConnectorFactory for TrackedFactory {
	fn provider(&self) -> &str {
		&self.provider
	}

	fn create_connector(&self, catalog: &CatalogDef) -> Result<Box<dyn Connector>> {
		self.created.fetch_add(1, Ordering::SeqCst);
		self.live.fetch_add(1, Ordering::SeqCst);
		Ok(Box::new(TrackedConnector {
			inner: MemoryConnector::new(catalog.full_name()),
			live: self.live.clone(),
			shut_down: self.shut_down.clone(),
		}))
	}

	fn create_adapter(&self, _catalog: &CatalogDef) -> Result<Arc<dyn MetadataAdapter>> {
		Ok(Arc::new(MemoryAdapter::new()))
	}
}

/// Fails every construction
#[derive(Clone)]
pub struct FailingFactory {
	provider: String,
}

impl FailingFactory {
	pub fn new(provider: impl Into<String>) -> Self {
		Self {
			provider: provider.into(),
		}
	}
}

impl ConnectorFactory for FailingFactory {
	fn provider(&self) -> &str {
		&self.provider
	}

	fn create_connector(&self, catalog: &CatalogDef) -> Result<Box<dyn Connector>> {
		Err(CatalogError::InvalidArgument {
			name: catalog.full_name(),
			reason: "the engine rejected the catalog".to_string(),
		}
		.into())
	}

	fn create_adapter(&self, _catalog: &CatalogDef) -> Result<Arc<dyn MetadataAdapter>> {
		Ok(Arc::new(MemoryAdapter::new()))
	}
}

/// Blocks construction until released or until `hang` elapsed
#[derive(Clone)]
pub struct HangingFactory {
	provider: String,
	hang: Duration,
	gate: Arc<(Mutex<bool>, Condvar)>,
}

impl HangingFactory {
	pub fn new(provider: impl Into<String>, hang: Duration) -> Self {
		Self {
			provider: provider.into(),
			hang,
			gate: Arc::new((Mutex::new(false), Condvar::new())),
		}
	}

	/// Unblocks every pending and future construction
	pub fn release(&self) {
		let (released, signal) = &*self.gate;
		*released.lock() = true;
		signal.notify_all();
	}
}

impl ConnectorFactory for HangingFactory {
	fn provider(&self) -> &str {
		&self.provider
	}

	fn create_connector(&self, catalog: &CatalogDef) -> Result<Box<dyn Connector>> {
		let (released, signal) = &*self.gate;
		let mut released = released.lock();
		if !*released {
			signal.wait_while_for(&mut released, |released| !*released, self.hang);
		}
		Ok(Box::new(MemoryConnector::new(catalog.full_name())))
	}

	fn create_adapter(&self, _catalog: &CatalogDef) -> Result<Arc<dyn MetadataAdapter>> {
		Ok(Arc::new(MemoryAdapter::new()))
	}
}

/// Takes `delay` per construction and records how many overlapped
#[derive(Clone)]
pub struct SlowFactory {
	provider: String,
	delay: Duration,
	created: Arc<AtomicUsize>,
	in_flight: Arc<AtomicUsize>,
	max_in_flight: Arc<AtomicUsize>,
}

impl SlowFactory {
	pub fn new(provider: impl Into<String>, delay: Duration) -> Self {
		Self {
			provider: provider.into(),
			delay,
			created: Arc::new(AtomicUsize::new(0)),
			in_flight: Arc::new(AtomicUsize::new(0)),
			max_in_flight: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn created(&self) -> usize {
		self.created.load(Ordering::SeqCst)
	}

	pub fn max_in_flight(&self) -> usize {
		self.max_in_flight.load(Ordering::SeqCst)
	}
}

impl ConnectorFactory for SlowFactory {
	fn provider(&self) -> &str {
		&self.provider
	}

	fn create_connector(&self, catalog: &CatalogDef) -> Result<Box<dyn Connector>> {
		let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
		self.max_in_flight.fetch_max(current, Ordering::SeqCst);
		thread::sleep(self.delay);
		self.in_flight.fetch_sub(1, Ordering::SeqCst);
		self.created.fetch_add(1, Ordering::SeqCst);
		Ok(Box::new(MemoryConnector::new(catalog.full_name())))
	}

	fn create_adapter(&self, _catalog: &CatalogDef) -> Result<Arc<dyn MetadataAdapter>> {
		Ok(Arc::new(MemoryAdapter::new()))
	}
}
