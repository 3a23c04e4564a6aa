// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Connector backed by a sqlite metastore.
//!
//! Schemas, tables and columns live in three sqlite tables. Properties and
//! column types are stored as JSON. One metadata transaction maps to one
//! sqlite transaction.

use std::sync::atomic::{AtomicBool, Ordering};

use metabridge_type::Result;
use parking_lot::Mutex;
use rusqlite::Connection;
use tracing::{debug, instrument};

use crate::{
	error::ConnectorError,
	spi::{Connector, ConnectorMetadata},
};

mod tables;
mod transaction;

use transaction::SqliteMetadata;

/// Path that selects a private in-memory metastore
pub const IN_MEMORY: &str = ":memory:";

pub struct SqliteConnector {
	name: String,
	path: String,
	conn: Mutex<Connection>,
	shut_down: AtomicBool,
}

impl SqliteConnector {
	#[instrument(name = "connector::sqlite::open", level = "debug", skip(name))]
	pub fn open(name: impl AsRef<str>, path: &str) -> Result<Self> {
		Ok(Self::try_open(name.as_ref(), path)?)
	}

	pub fn in_memory(name: impl AsRef<str>) -> Result<Self> {
		Self::open(name, IN_MEMORY)
	}

	fn try_open(name: &str, path: &str) -> std::result::Result<Self, ConnectorError> {
		let conn = if path == IN_MEMORY {
			Connection::open_in_memory()?
		} else {
			Connection::open(path)?
		};
		conn.pragma_update(None, "foreign_keys", "ON")?;
		conn.execute_batch(tables::CREATE_METASTORE)?;

		Ok(Self {
			name: name.to_string(),
			path: path.to_string(),
			conn: Mutex::new(conn),
			shut_down: AtomicBool::new(false),
		})
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn is_shut_down(&self) -> bool {
		self.shut_down.load(Ordering::Acquire)
	}
}

impl Connector for SqliteConnector {
	fn name(&self) -> &str {
		&self.name
	}

	#[instrument(name = "connector::sqlite::begin", level = "trace", skip(self), fields(connector = %self.name))]
	fn begin(&self) -> Result<Box<dyn ConnectorMetadata + '_>> {
		if self.is_shut_down() {
			return Err(ConnectorError::ShutDown {
				connector: self.name.clone(),
			}
			.into());
		}
		let txn = SqliteMetadata::begin(self.conn.lock())?;
		Ok(Box::new(txn))
	}

	fn shutdown(&self) {
		if !self.shut_down.swap(true, Ordering::AcqRel) {
			debug!(connector = %self.name, path = %self.path, "sqlite connector shut down");
		}
	}
}
