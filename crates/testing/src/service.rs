// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use metabridge_catalog::MetadataService;
use metabridge_core::{CatalogDef, CatalogError, CatalogObjectKind, MetalakeDef, QualifiedName};
use metabridge_connector::ConnectorError;
use metabridge_type::Result;
use parking_lot::RwLock;

/// A metadata service kept in memory, with injectable failures
#[derive(Default)]
pub struct MemoryMetadataService {
	state: RwLock<ServiceState>,
}

#[derive(Default)]
struct ServiceState {
	metalakes: BTreeMap<String, MetalakeDef>,
	/// keyed by `metalake.catalog`
	catalogs: BTreeMap<String, CatalogDef>,
	failing_metalakes: HashSet<String>,
	failing_catalogs: HashSet<String>,
}

fn unavailable(reason: String) -> ConnectorError {
	ConnectorError::Storage {
		reason,
	}
}

fn metalake_not_found(metalake: &str) -> CatalogError {
	CatalogError::NotFound {
		kind: CatalogObjectKind::Metalake,
		name: metalake.to_string(),
	}
}

impl MemoryMetadataService {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_metalake(self, metalake: impl Into<String>) -> Self {
		self.add_metalake(metalake);
		self
	}

	pub fn with_catalog(self, catalog: CatalogDef) -> Self {
		self.put_catalog(catalog);
		self
	}

	pub fn add_metalake(&self, metalake: impl Into<String>) {
		let metalake = metalake.into();
		self.state.write().metalakes.entry(metalake.clone()).or_insert_with(|| MetalakeDef::new(metalake, "test"));
	}

	/// Inserts or replaces a catalog, creating its metalake on demand
	pub fn put_catalog(&self, catalog: CatalogDef) {
		self.add_metalake(catalog.metalake.clone());
		self.state.write().catalogs.insert(catalog.full_name(), catalog);
	}

	pub fn remove_catalog(&self, metalake: &str, catalog: &str) -> Option<CatalogDef> {
		self.state.write().catalogs.remove(&format!("{}.{}", metalake, catalog))
	}

	pub fn remove_metalake(&self, metalake: &str) {
		let mut state = self.state.write();
		state.metalakes.remove(metalake);
		state.catalogs.retain(|_, catalog| catalog.metalake != metalake);
	}

	/// Makes `list_catalogs` of `metalake` fail until [`Self::recover`]
	pub fn fail_listing(&self, metalake: impl Into<String>) {
		self.state.write().failing_metalakes.insert(metalake.into());
	}

	/// Makes `load_catalog` of `metalake.catalog` fail until
	/// [`Self::recover`]
	pub fn fail_loading(&self, metalake: &str, catalog: &str) {
		self.state.write().failing_catalogs.insert(format!("{}.{}", metalake, catalog));
	}

	pub fn recover(&self) {
		let mut state = self.state.write();
		state.failing_metalakes.clear();
		state.failing_catalogs.clear();
	}

	pub fn catalog_count(&self) -> usize {
		self.state.read().catalogs.len()
	}
}

#[async_trait]
impl MetadataService for MemoryMetadataService {
	async fn list_metalakes(&self) -> Result<Vec<MetalakeDef>> {
		Ok(self.state.read().metalakes.values().cloned().collect())
	}

	async fn list_catalogs(&self, metalake: &str) -> Result<Vec<QualifiedName>> {
		let state = self.state.read();
		if state.failing_metalakes.contains(metalake) {
			return Err(unavailable(format!("listing catalogs of metalake `{}` failed", metalake)).into());
		}
		if !state.metalakes.contains_key(metalake) {
			return Err(metalake_not_found(metalake).into());
		}
		Ok(state
			.catalogs
			.values()
			.filter(|catalog| catalog.metalake == metalake)
			.map(CatalogDef::qualified_name)
			.collect())
	}

	async fn load_catalog(&self, name: &QualifiedName) -> Result<CatalogDef> {
		let key = name.to_string();
		let state = self.state.read();
		if state.failing_catalogs.contains(&key) {
			return Err(unavailable(format!("loading catalog `{}` failed", key)).into());
		}
		state.catalogs.get(&key).cloned().ok_or_else(|| {
			CatalogError::NotFound {
				kind: CatalogObjectKind::Catalog,
				name: key,
			}
			.into()
		})
	}

	async fn create_catalog(&self, catalog: CatalogDef) -> Result<CatalogDef> {
		let mut state = self.state.write();
		if !state.metalakes.contains_key(&catalog.metalake) {
			return Err(metalake_not_found(&catalog.metalake).into());
		}
		let key = catalog.full_name();
		if state.catalogs.contains_key(&key) {
			return Err(CatalogError::AlreadyExists {
				kind: CatalogObjectKind::Catalog,
				name: key,
			}
			.into());
		}
		state.catalogs.insert(key, catalog.clone());
		Ok(catalog)
	}

	async fn drop_catalog(&self, name: &QualifiedName) -> Result<bool> {
		Ok(self.state.write().catalogs.remove(&name.to_string()).is_some())
	}
}
