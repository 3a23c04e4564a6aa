// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditInfo {
	pub creator: String,
	pub create_time: DateTime<Utc>,
	pub last_modifier: Option<String>,
	pub last_modified_time: Option<DateTime<Utc>>,
}

impl AuditInfo {
	pub fn created_by(creator: impl Into<String>) -> Self {
		Self {
			creator: creator.into(),
			create_time: Utc::now(),
			last_modifier: None,
			last_modified_time: None,
		}
	}

	pub fn modified_by(mut self, modifier: impl Into<String>) -> Self {
		self.last_modifier = Some(modifier.into());
		self.last_modified_time = Some(Utc::now());
		self
	}
}
