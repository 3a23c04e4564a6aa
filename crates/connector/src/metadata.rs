// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::BTreeMap,
	fmt::{self, Display, Formatter},
};

use metabridge_type::EngineType;
use serde::{Deserialize, Serialize};

/// A typed engine property value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyValue {
	String(String),
	Integer(i64),
	Boolean(bool),
	Array(Vec<String>),
}

impl PropertyValue {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			PropertyValue::String(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_array(&self) -> Option<&[String]> {
		match self {
			PropertyValue::Array(values) => Some(values),
			_ => None,
		}
	}

	pub fn as_integer(&self) -> Option<i64> {
		match self {
			PropertyValue::Integer(value) => Some(*value),
			_ => None,
		}
	}
}

impl Display for PropertyValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			PropertyValue::String(value) => f.write_str(value),
			PropertyValue::Integer(value) => write!(f, "{}", value),
			PropertyValue::Boolean(value) => write!(f, "{}", value),
			PropertyValue::Array(values) => write!(f, "[{}]", values.join(", ")),
		}
	}
}

impl From<&str> for PropertyValue {
	fn from(value: &str) -> Self {
		PropertyValue::String(value.to_string())
	}
}

impl From<i64> for PropertyValue {
	fn from(value: i64) -> Self {
		PropertyValue::Integer(value)
	}
}

impl From<bool> for PropertyValue {
	fn from(value: bool) -> Self {
		PropertyValue::Boolean(value)
	}
}

pub type EngineProperties = BTreeMap<String, PropertyValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineColumnMetadata {
	pub name: String,
	pub ty: EngineType,
	pub nullable: bool,
	pub comment: Option<String>,
}

impl EngineColumnMetadata {
	pub fn new(name: impl Into<String>, ty: EngineType) -> Self {
		Self {
			name: name.into(),
			ty,
			nullable: true,
			comment: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineTableMetadata {
	pub table: String,
	pub columns: Vec<EngineColumnMetadata>,
	pub comment: Option<String>,
	pub properties: EngineProperties,
}

impl EngineTableMetadata {
	pub fn new(table: impl Into<String>) -> Self {
		Self {
			table: table.into(),
			columns: vec![],
			comment: None,
			properties: EngineProperties::new(),
		}
	}

	pub fn with_column(mut self, column: EngineColumnMetadata) -> Self {
		self.columns.push(column);
		self
	}

	pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
		self.properties.insert(key.into(), value.into());
		self
	}

	pub fn column(&self, name: &str) -> Option<&EngineColumnMetadata> {
		self.columns.iter().find(|c| c.name == name)
	}
}
