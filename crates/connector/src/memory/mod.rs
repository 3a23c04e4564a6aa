// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Reference connector keeping all metadata in memory.

use std::sync::atomic::{AtomicBool, Ordering};

use metabridge_type::Result;
use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::{
	error::ConnectorError,
	spi::{Connector, ConnectorMetadata},
};

mod state;
mod transaction;

use state::MemoryState;
use transaction::MemoryMetadata;

pub struct MemoryConnector {
	name: String,
	max_tables: Option<usize>,
	state: Mutex<MemoryState>,
	shut_down: AtomicBool,
}

impl MemoryConnector {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			max_tables: None,
			state: Mutex::new(MemoryState::default()),
			shut_down: AtomicBool::new(false),
		}
	}

	pub fn with_max_tables(mut self, max_tables: usize) -> Self {
		self.max_tables = Some(max_tables);
		self
	}

	pub fn max_tables(&self) -> Option<usize> {
		self.max_tables
	}

	pub fn is_shut_down(&self) -> bool {
		self.shut_down.load(Ordering::Acquire)
	}
}

impl Connector for MemoryConnector {
	fn name(&self) -> &str {
		&self.name
	}

	#[instrument(name = "connector::memory::begin", level = "trace", skip(self), fields(connector = %self.name))]
	fn begin(&self) -> Result<Box<dyn ConnectorMetadata + '_>> {
		if self.is_shut_down() {
			return Err(ConnectorError::ShutDown {
				connector: self.name.clone(),
			}
			.into());
		}
		let guard = self.state.lock();
		Ok(Box::new(MemoryMetadata::new(&self.name, self.max_tables, guard)))
	}

	fn shutdown(&self) {
		if !self.shut_down.swap(true, Ordering::AcqRel) {
			*self.state.lock() = MemoryState::default();
			debug!(connector = %self.name, "memory connector shut down");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{EngineProperties, EngineTableMetadata, SchemaTableName};

	#[test]
	fn test_uncommitted_changes_are_discarded() {
		let connector = MemoryConnector::new("memory");
		{
			let mut txn = connector.begin().unwrap();
			txn.create_schema("db", &EngineProperties::new()).unwrap();
		}
		let txn = connector.begin().unwrap();
		assert!(!txn.schema_exists("db").unwrap());
	}

	#[test]
	fn test_table_limit() {
		let connector = MemoryConnector::new("memory").with_max_tables(1);
		let mut txn = connector.begin().unwrap();
		txn.create_schema("db", &EngineProperties::new()).unwrap();
		txn.create_table("db", &EngineTableMetadata::new("a")).unwrap();
		let err = txn.create_table("db", &EngineTableMetadata::new("b")).unwrap_err();
		assert_eq!(err.code, "CO_010");
		assert!(txn.get_table_handle(&SchemaTableName::new("db", "b")).unwrap().is_none());
	}

	#[test]
	fn test_shutdown_rejects_new_transactions() {
		let connector = MemoryConnector::new("memory");
		connector.shutdown();
		assert!(connector.is_shut_down());
		let err = connector.begin().err().unwrap();
		assert_eq!(err.code, "CO_011");
	}
}
