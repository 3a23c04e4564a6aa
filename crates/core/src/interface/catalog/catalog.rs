// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
	error::CatalogError,
	interface::catalog::{AuditInfo, Properties},
	name::{CatalogName, QualifiedName},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogType {
	Relational,
	Fileset,
	Messaging,
}

impl Display for CatalogType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			CatalogType::Relational => f.write_str("relational"),
			CatalogType::Fileset => f.write_str("fileset"),
			CatalogType::Messaging => f.write_str("messaging"),
		}
	}
}

impl FromStr for CatalogType {
	type Err = CatalogError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"relational" => Ok(CatalogType::Relational),
			"fileset" => Ok(CatalogType::Fileset),
			"messaging" => Ok(CatalogType::Messaging),
			_ => Err(CatalogError::InvalidArgument {
				name: "catalog type".to_string(),
				reason: format!("unknown catalog type `{}`", s),
			}),
		}
	}
}

/// A catalog as reported by the metadata service.
///
/// The provider selects the connector and adapter implementation and never
/// changes for the lifetime of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDef {
	pub metalake: String,
	pub name: String,
	pub catalog_type: CatalogType,
	pub provider: String,
	pub comment: Option<String>,
	pub properties: Properties,
	pub audit: AuditInfo,
}

impl CatalogDef {
	pub fn new(metalake: impl Into<String>, name: impl Into<String>, provider: impl Into<String>) -> Self {
		Self {
			metalake: metalake.into(),
			name: name.into(),
			catalog_type: CatalogType::Relational,
			provider: provider.into(),
			comment: None,
			properties: Properties::new(),
			audit: AuditInfo::created_by("metabridge"),
		}
	}

	pub fn with_type(mut self, catalog_type: CatalogType) -> Self {
		self.catalog_type = catalog_type;
		self
	}

	pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
		self.comment = Some(comment.into());
		self
	}

	pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.properties.insert(key.into(), value.into());
		self
	}

	pub fn with_properties(mut self, properties: Properties) -> Self {
		self.properties = properties;
		self
	}

	pub fn qualified_name(&self) -> QualifiedName {
		QualifiedName::of_catalog(&self.metalake, &self.name)
	}

	pub fn catalog_name(&self) -> CatalogName {
		CatalogName {
			metalake: self.metalake.clone(),
			catalog: self.name.clone(),
		}
	}

	/// `metalake.catalog`
	pub fn full_name(&self) -> String {
		format!("{}.{}", self.metalake, self.name)
	}

	/// True when a connector built for `self` can keep serving `other`.
	///
	/// Only the provider, the catalog type and the properties feed into
	/// connector construction; comment and audit changes do not.
	pub fn same_definition(&self, other: &CatalogDef) -> bool {
		self.provider == other.provider
			&& self.catalog_type == other.catalog_type
			&& self.properties == other.properties
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_same_definition_ignores_comment() {
		let a = CatalogDef::new("lake", "hive", "hive").with_property("metastore.path", ":memory:");
		let b = a.clone().with_comment("new comment");
		assert!(a.same_definition(&b));

		let c = a.clone().with_property("metastore.path", "/tmp/other.db");
		assert!(!a.same_definition(&c));
	}

	#[test]
	fn test_catalog_type_parse() {
		assert_eq!("RELATIONAL".parse::<CatalogType>().unwrap(), CatalogType::Relational);
		assert!("stream".parse::<CatalogType>().is_err());
	}

	#[test]
	fn test_full_name() {
		let catalog = CatalogDef::new("lake", "memory", "memory");
		assert_eq!(catalog.full_name(), "lake.memory");
		assert_eq!(catalog.qualified_name().to_string(), "lake.memory");
	}
}
