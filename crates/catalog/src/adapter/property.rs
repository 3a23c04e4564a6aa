// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Translation of string property maps into typed engine properties.

use metabridge_connector::{EngineProperties, PropertyValue};
use metabridge_core::{CatalogError, Properties};
use metabridge_type::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
	String,
	Integer,
	Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
	pub generic_key: &'static str,
	pub engine_key: &'static str,
	pub kind: PropertyKind,
	/// Injected into the engine properties when the generic map lacks the key
	pub default: Option<&'static str>,
	/// Omitted from generic properties while it still holds its default
	pub hidden: bool,
}

impl PropertyEntry {
	pub const fn string(generic_key: &'static str, engine_key: &'static str) -> Self {
		Self {
			generic_key,
			engine_key,
			kind: PropertyKind::String,
			default: None,
			hidden: false,
		}
	}

	pub const fn integer(generic_key: &'static str, engine_key: &'static str) -> Self {
		Self {
			kind: PropertyKind::Integer,
			..Self::string(generic_key, engine_key)
		}
	}

	pub const fn boolean(generic_key: &'static str, engine_key: &'static str) -> Self {
		Self {
			kind: PropertyKind::Boolean,
			..Self::string(generic_key, engine_key)
		}
	}

	pub const fn with_hidden_default(mut self, default: &'static str) -> Self {
		self.default = Some(default);
		self.hidden = true;
		self
	}

	fn parse(&self, value: &str) -> Result<PropertyValue> {
		let invalid = |expected: &str| CatalogError::InvalidArgument {
			name: self.generic_key.to_string(),
			reason: format!("expected {} but got `{}`", expected, value),
		};
		match self.kind {
			PropertyKind::String => Ok(PropertyValue::String(value.to_string())),
			PropertyKind::Integer => {
				value.trim().parse::<i64>().map(PropertyValue::Integer).map_err(|_| invalid("an integer").into())
			}
			PropertyKind::Boolean => match value.trim().to_ascii_lowercase().as_str() {
				"true" => Ok(PropertyValue::Boolean(true)),
				"false" => Ok(PropertyValue::Boolean(false)),
				_ => Err(invalid("true or false").into()),
			},
		}
	}
}

/// Renames, types and defaults the properties of one entity kind
#[derive(Debug, Clone, Default)]
pub struct PropertyConverter {
	entries: Vec<PropertyEntry>,
	reserved: Vec<&'static str>,
}

impl PropertyConverter {
	pub fn new(entries: Vec<PropertyEntry>) -> Self {
		Self {
			entries,
			reserved: vec![],
		}
	}

	/// Engine keys owned by the adapter itself, never accepted from or
	/// surfaced as generic properties
	pub fn with_reserved(mut self, keys: &[&'static str]) -> Self {
		self.reserved.extend_from_slice(keys);
		self
	}

	pub fn entries(&self) -> &[PropertyEntry] {
		&self.entries
	}

	pub fn is_reserved(&self, engine_key: &str) -> bool {
		self.reserved.contains(&engine_key)
	}

	fn by_generic(&self, key: &str) -> Option<&PropertyEntry> {
		self.entries.iter().find(|e| e.generic_key == key)
	}

	fn by_engine(&self, key: &str) -> Option<&PropertyEntry> {
		self.entries.iter().find(|e| e.engine_key == key)
	}

	pub fn engine_key(&self, generic_key: &str) -> Result<String> {
		let engine_key = self.by_generic(generic_key).map(|e| e.engine_key).unwrap_or(generic_key);
		if self.is_reserved(engine_key) {
			return Err(CatalogError::InvalidArgument {
				name: generic_key.to_string(),
				reason: "the property is derived from the table layout and cannot be set directly".to_string(),
			}
			.into());
		}
		Ok(engine_key.to_string())
	}

	/// Translates a single property without default injection
	pub fn to_engine_entry(&self, key: &str, value: &str) -> Result<(String, PropertyValue)> {
		let engine_key = self.engine_key(key)?;
		let value = match self.by_generic(key) {
			Some(entry) => entry.parse(value)?,
			None => PropertyValue::String(value.to_string()),
		};
		Ok((engine_key, value))
	}

	pub fn to_engine(&self, properties: &Properties) -> Result<EngineProperties> {
		let mut result = EngineProperties::new();
		for (key, value) in properties {
			let (engine_key, value) = self.to_engine_entry(key, value)?;
			result.insert(engine_key, value);
		}
		for entry in &self.entries {
			if let Some(default) = entry.default {
				if !result.contains_key(entry.engine_key) {
					result.insert(entry.engine_key.to_string(), entry.parse(default)?);
				}
			}
		}
		Ok(result)
	}

	pub fn to_generic(&self, properties: &EngineProperties) -> Properties {
		let mut result = Properties::new();
		for (key, value) in properties {
			if self.is_reserved(key) {
				continue;
			}
			let value = value.to_string();
			match self.by_engine(key) {
				Some(entry) => {
					if entry.hidden && entry.default == Some(value.as_str()) {
						continue;
					}
					result.insert(entry.generic_key.to_string(), value);
				}
				None => {
					result.insert(key.clone(), value);
				}
			}
		}
		result
	}
}
