// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Deref, sync::Arc};

use dashmap::DashMap;
use metabridge_core::{CatalogError, CatalogObjectKind};
use metabridge_type::Result;
use tracing::instrument;

use crate::context::CatalogConnector;

/// Published catalog contexts by registry key.
///
/// Readers clone the `Arc` of a context and keep using it after a reload or
/// drop replaced it. Only the lifecycle manager writes.
#[derive(Debug, Clone, Default)]
pub struct CatalogRegistry(Arc<RegistryInner>);

#[derive(Debug, Default)]
pub struct RegistryInner {
	contexts: DashMap<String, Arc<CatalogConnector>>,
}

impl Deref for CatalogRegistry {
	type Target = RegistryInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl CatalogRegistry {
	pub fn new() -> Self {
		Self::default()
	}
}

impl RegistryInner {
	pub fn get(&self, key: &str) -> Option<Arc<CatalogConnector>> {
		self.contexts.get(key).map(|entry| entry.value().clone())
	}

	#[instrument(name = "catalog::registry::resolve", level = "trace", skip(self))]
	pub fn resolve(&self, key: &str) -> Result<Arc<CatalogConnector>> {
		self.get(key).ok_or_else(|| {
			CatalogError::NotFound {
				kind: CatalogObjectKind::Catalog,
				name: key.to_string(),
			}
			.into()
		})
	}

	/// Sorted registry keys
	pub fn names(&self) -> Vec<String> {
		let mut result: Vec<String> = self.contexts.iter().map(|entry| entry.key().clone()).collect();
		result.sort();
		result
	}

	/// Contexts ordered by registry key
	pub fn list(&self) -> Vec<Arc<CatalogConnector>> {
		let mut result: Vec<(String, Arc<CatalogConnector>)> =
			self.contexts.iter().map(|entry| (entry.key().clone(), entry.value().clone())).collect();
		result.sort_by(|(l, _), (r, _)| l.cmp(r));
		result.into_iter().map(|(_, context)| context).collect()
	}

	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	pub fn contains(&self, key: &str) -> bool {
		self.contexts.contains_key(key)
	}

	/// Publishes `context`, returning the context it replaced
	pub(crate) fn insert(&self, key: String, context: Arc<CatalogConnector>) -> Option<Arc<CatalogConnector>> {
		self.contexts.insert(key, context)
	}

	pub(crate) fn remove(&self, key: &str) -> Option<Arc<CatalogConnector>> {
		self.contexts.remove(key).map(|(_, context)| context)
	}
}
