// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod handle;
pub mod memory;
pub mod metadata;
pub mod spi;
pub mod sqlite;

pub use error::ConnectorError;
pub use handle::{ColumnHandle, SchemaTableName, TableHandle, TableId};
pub use memory::MemoryConnector;
pub use metadata::{EngineColumnMetadata, EngineProperties, EngineTableMetadata, PropertyValue};
pub use metabridge_type::{Error, Result};
pub use spi::{Connector, ConnectorMetadata};
pub use sqlite::SqliteConnector;
