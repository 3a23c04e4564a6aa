// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Hierarchical names.
//!
//! Every entity is addressed by its owning metalake plus an ordered list of
//! segments. The number of segments decides what the name refers to:
//! none for the metalake itself, then catalog, schema and table.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
	Metalake,
	Catalog,
	Schema,
	Table,
}

impl EntityKind {
	pub fn depth(&self) -> usize {
		match self {
			EntityKind::Metalake => 0,
			EntityKind::Catalog => 1,
			EntityKind::Schema => 2,
			EntityKind::Table => 3,
		}
	}
}

impl Display for EntityKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			EntityKind::Metalake => f.write_str("metalake"),
			EntityKind::Catalog => f.write_str("catalog"),
			EntityKind::Schema => f.write_str("schema"),
			EntityKind::Table => f.write_str("table"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawQualifiedName")]
pub struct QualifiedName {
	metalake: String,
	segments: Vec<String>,
}

/// Deserialized form, validated through [`QualifiedName::new`]
#[derive(Deserialize)]
struct RawQualifiedName {
	metalake: String,
	segments: Vec<String>,
}

impl TryFrom<RawQualifiedName> for QualifiedName {
	type Error = CatalogError;

	fn try_from(raw: RawQualifiedName) -> Result<Self, Self::Error> {
		QualifiedName::new(raw.metalake, raw.segments)
	}
}

impl QualifiedName {
	pub const MAX_DEPTH: usize = 3;

	pub fn new(metalake: impl Into<String>, segments: Vec<String>) -> Result<Self, CatalogError> {
		let metalake = metalake.into();
		let display = std::iter::once(metalake.as_str())
			.chain(segments.iter().map(String::as_str))
			.collect::<Vec<_>>()
			.join(".");

		if segments.len() > Self::MAX_DEPTH {
			return Err(CatalogError::InvalidArgument {
				name: display,
				reason: format!("a name has at most {} segments below the metalake", Self::MAX_DEPTH),
			});
		}
		if metalake.is_empty() || segments.iter().any(String::is_empty) {
			return Err(CatalogError::InvalidArgument {
				name: display,
				reason: "name segments must not be empty".to_string(),
			});
		}

		Ok(Self {
			metalake,
			segments,
		})
	}

	/// Parses the dot-joined display form `metalake[.catalog[.schema[.table]]]`
	pub fn parse(name: &str) -> Result<Self, CatalogError> {
		let mut parts = name.split('.').map(str::to_string);
		let metalake = parts.next().unwrap_or_default();
		Self::new(metalake, parts.collect())
	}

	// The `of_*` constructors fix the depth but leave segments unchecked; use
	// `new` or `parse` for names from outside the process.

	pub fn of_metalake(metalake: impl Into<String>) -> Self {
		Self {
			metalake: metalake.into(),
			segments: vec![],
		}
	}

	pub fn of_catalog(metalake: impl Into<String>, catalog: impl Into<String>) -> Self {
		Self {
			metalake: metalake.into(),
			segments: vec![catalog.into()],
		}
	}

	pub fn of_schema(metalake: impl Into<String>, catalog: impl Into<String>, schema: impl Into<String>) -> Self {
		Self {
			metalake: metalake.into(),
			segments: vec![catalog.into(), schema.into()],
		}
	}

	pub fn of_table(
		metalake: impl Into<String>,
		catalog: impl Into<String>,
		schema: impl Into<String>,
		table: impl Into<String>,
	) -> Self {
		Self {
			metalake: metalake.into(),
			segments: vec![catalog.into(), schema.into(), table.into()],
		}
	}

	pub fn metalake(&self) -> &str {
		&self.metalake
	}

	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	pub fn depth(&self) -> usize {
		self.segments.len()
	}

	pub fn kind(&self) -> EntityKind {
		match self.segments.len() {
			0 => EntityKind::Metalake,
			1 => EntityKind::Catalog,
			2 => EntityKind::Schema,
			_ => EntityKind::Table,
		}
	}

	/// The last segment, or the metalake name for a metalake
	pub fn name(&self) -> &str {
		self.segments.last().map(String::as_str).unwrap_or(&self.metalake)
	}

	pub fn catalog(&self) -> Option<&str> {
		self.segments.first().map(String::as_str)
	}

	pub fn parent(&self) -> Option<QualifiedName> {
		if self.segments.is_empty() {
			return None;
		}
		Some(Self {
			metalake: self.metalake.clone(),
			segments: self.segments[..self.segments.len() - 1].to_vec(),
		})
	}

	pub fn child(&self, name: impl Into<String>) -> Result<QualifiedName, CatalogError> {
		let mut segments = self.segments.clone();
		segments.push(name.into());
		Self::new(self.metalake.clone(), segments)
	}

	/// Fails with an invalid name error unless this name addresses `expected`
	pub fn require(&self, expected: EntityKind) -> Result<(), CatalogError> {
		let actual = self.kind();
		if actual != expected {
			return Err(CatalogError::InvalidName {
				name: self.to_string(),
				expected,
				actual,
			});
		}
		Ok(())
	}
}

impl Display for QualifiedName {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.metalake)?;
		for segment in &self.segments {
			write!(f, ".{}", segment)?;
		}
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogName {
	pub metalake: String,
	pub catalog: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaName {
	pub metalake: String,
	pub catalog: String,
	pub schema: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableName {
	pub metalake: String,
	pub catalog: String,
	pub schema: String,
	pub table: String,
}

impl TryFrom<&QualifiedName> for CatalogName {
	type Error = CatalogError;

	fn try_from(name: &QualifiedName) -> Result<Self, Self::Error> {
		name.require(EntityKind::Catalog)?;
		Ok(Self {
			metalake: name.metalake.clone(),
			catalog: name.segments[0].clone(),
		})
	}
}

impl TryFrom<&QualifiedName> for SchemaName {
	type Error = CatalogError;

	fn try_from(name: &QualifiedName) -> Result<Self, Self::Error> {
		name.require(EntityKind::Schema)?;
		Ok(Self {
			metalake: name.metalake.clone(),
			catalog: name.segments[0].clone(),
			schema: name.segments[1].clone(),
		})
	}
}

impl TryFrom<&QualifiedName> for TableName {
	type Error = CatalogError;

	fn try_from(name: &QualifiedName) -> Result<Self, Self::Error> {
		name.require(EntityKind::Table)?;
		Ok(Self {
			metalake: name.metalake.clone(),
			catalog: name.segments[0].clone(),
			schema: name.segments[1].clone(),
			table: name.segments[2].clone(),
		})
	}
}

impl From<&CatalogName> for QualifiedName {
	fn from(name: &CatalogName) -> Self {
		QualifiedName::of_catalog(&name.metalake, &name.catalog)
	}
}

impl From<&SchemaName> for QualifiedName {
	fn from(name: &SchemaName) -> Self {
		QualifiedName::of_schema(&name.metalake, &name.catalog, &name.schema)
	}
}

impl From<&TableName> for QualifiedName {
	fn from(name: &TableName) -> Self {
		QualifiedName::of_table(&name.metalake, &name.catalog, &name.schema, &name.table)
	}
}

impl Display for CatalogName {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.metalake, self.catalog)
	}
}

impl Display for SchemaName {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}.{}", self.metalake, self.catalog, self.schema)
	}
}

impl Display for TableName {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}.{}.{}", self.metalake, self.catalog, self.schema, self.table)
	}
}

impl TableName {
	pub fn schema_name(&self) -> SchemaName {
		SchemaName {
			metalake: self.metalake.clone(),
			catalog: self.catalog.clone(),
			schema: self.schema.clone(),
		}
	}
}
