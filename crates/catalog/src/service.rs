// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use async_trait::async_trait;
use metabridge_core::{CatalogDef, MetalakeDef, QualifiedName};
use metabridge_type::Result;

/// The external metadata service owning metalakes and catalog definitions
#[async_trait]
pub trait MetadataService: Send + Sync {
	async fn list_metalakes(&self) -> Result<Vec<MetalakeDef>>;

	/// Catalog names of `metalake`; fails with NotFound for an unknown
	/// metalake
	async fn list_catalogs(&self, metalake: &str) -> Result<Vec<QualifiedName>>;

	async fn load_catalog(&self, name: &QualifiedName) -> Result<CatalogDef>;

	async fn create_catalog(&self, catalog: CatalogDef) -> Result<CatalogDef>;

	/// `false` when the catalog did not exist
	async fn drop_catalog(&self, name: &QualifiedName) -> Result<bool>;
}
