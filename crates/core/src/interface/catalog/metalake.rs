// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::interface::catalog::{AuditInfo, Properties};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetalakeDef {
	pub name: String,
	pub comment: Option<String>,
	pub properties: Properties,
	pub audit: AuditInfo,
}

impl MetalakeDef {
	pub fn new(name: impl Into<String>, creator: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			comment: None,
			properties: Properties::new(),
			audit: AuditInfo::created_by(creator),
		}
	}
}
