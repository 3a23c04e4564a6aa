// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Bridges catalogs of an external metadata service into query engine
//! connectors.
//!
//! The [`LifecycleManager`] keeps one [`CatalogConnector`] per bridged catalog
//! published in the [`CatalogRegistry`]. Each connector pairs an engine
//! connector with the [`MetadataAdapter`] of its provider family, which
//! translates types, properties and table layouts in both directions.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod adapter;
pub mod change;
pub mod config;
pub mod context;
pub mod lifecycle;
pub mod provider;
pub mod registry;
pub mod service;
pub mod transform;

pub use adapter::{HiveAdapter, IcebergAdapter, LayoutPolicy, MemoryAdapter, MetadataAdapter};
pub use change::ChangeApplier;
pub use config::{CatalogNaming, LifecycleConfig};
pub use context::{CatalogConnector, SupportsSchemas, TableCatalog};
pub use lifecycle::{CatalogState, LifecycleManager, ReconcileReport};
pub use provider::{ConnectorFactory, HiveFactory, IcebergFactory, MemoryFactory, ProviderRegistry};
pub use registry::CatalogRegistry;
pub use service::MetadataService;
pub use transform::{GeneralTransformer, HiveTransformer, IcebergTransformer, TypeTransformer};
