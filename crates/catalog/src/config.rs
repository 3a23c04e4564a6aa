// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use metabridge_core::CatalogDef;
use serde::{Deserialize, Serialize};

use crate::adapter::LayoutPolicy;

/// How registry keys are derived from catalog definitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogNaming {
	/// `metalake.catalog`
	#[default]
	Qualified,
	/// `catalog`, for deployments bridging a single metalake
	Simple,
}

impl CatalogNaming {
	pub fn key(&self, metalake: &str, catalog: &str) -> String {
		match self {
			CatalogNaming::Qualified => format!("{}.{}", metalake, catalog),
			CatalogNaming::Simple => catalog.to_string(),
		}
	}

	pub fn key_of(&self, catalog: &CatalogDef) -> String {
		self.key(&catalog.metalake, &catalog.name)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
	/// Metalakes to bridge, all of them when empty
	pub metalakes: Vec<String>,
	pub reload_interval: Duration,
	/// Upper bound for building a single catalog connector
	pub construction_timeout: Duration,
	pub naming: CatalogNaming,
	/// Applied to tables created through routed DDL
	pub layout_policy: LayoutPolicy,
}

impl Default for LifecycleConfig {
	fn default() -> Self {
		Self {
			metalakes: vec![],
			reload_interval: Duration::from_secs(10),
			construction_timeout: Duration::from_secs(30),
			naming: CatalogNaming::default(),
			layout_policy: LayoutPolicy::default(),
		}
	}
}

impl LifecycleConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_metalake(mut self, metalake: impl Into<String>) -> Self {
		self.metalakes.push(metalake.into());
		self
	}

	pub fn with_reload_interval(mut self, interval: Duration) -> Self {
		self.reload_interval = interval;
		self
	}

	pub fn with_construction_timeout(mut self, timeout: Duration) -> Self {
		self.construction_timeout = timeout;
		self
	}

	pub fn with_naming(mut self, naming: CatalogNaming) -> Self {
		self.naming = naming;
		self
	}

	pub fn with_layout_policy(mut self, policy: LayoutPolicy) -> Self {
		self.layout_policy = policy;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = LifecycleConfig::default();
		assert!(config.metalakes.is_empty());
		assert_eq!(config.reload_interval, Duration::from_secs(10));
		assert_eq!(config.construction_timeout, Duration::from_secs(30));
		assert_eq!(config.naming, CatalogNaming::Qualified);
		assert_eq!(config.layout_policy, LayoutPolicy::BestEffort);
	}

	#[test]
	fn test_partial_deserialization_keeps_defaults() {
		let config: LifecycleConfig =
			serde_json::from_str(r#"{"metalakes": ["lake"], "naming": "simple", "layout_policy": "required"}"#)
				.unwrap();
		assert_eq!(config.metalakes, vec!["lake"]);
		assert_eq!(config.naming, CatalogNaming::Simple);
		assert_eq!(config.layout_policy, LayoutPolicy::Required);
		assert_eq!(config.reload_interval, Duration::from_secs(10));
	}

	#[test]
	fn test_naming() {
		let catalog = CatalogDef::new("lake", "warehouse", "hive");
		assert_eq!(CatalogNaming::Qualified.key_of(&catalog), "lake.warehouse");
		assert_eq!(CatalogNaming::Simple.key_of(&catalog), "warehouse");
	}
}
