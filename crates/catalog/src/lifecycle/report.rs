// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_type::{Error, Result};

/// Outcome of one reconciliation pass, by registry key
#[derive(Debug, Default)]
pub struct ReconcileReport {
	pub created: Vec<String>,
	pub reloaded: Vec<String>,
	pub dropped: Vec<String>,
	pub unchanged: Vec<String>,
	/// Catalogs whose construction or definition lookup failed; their
	/// previous context, if any, is still published
	pub failed: Vec<(String, Error)>,
}

impl ReconcileReport {
	pub fn is_success(&self) -> bool {
		self.failed.is_empty()
	}

	pub fn is_noop(&self) -> bool {
		self.created.is_empty() && self.reloaded.is_empty() && self.dropped.is_empty() && self.failed.is_empty()
	}

	/// The first failure, if any
	pub fn into_result(self) -> Result<ReconcileReport> {
		match self.failed.first() {
			Some((_, err)) => Err(err.clone()),
			None => Ok(self),
		}
	}

	pub(crate) fn sort(&mut self) {
		self.created.sort();
		self.reloaded.sort();
		self.dropped.sort();
		self.unchanged.sort();
		self.failed.sort_by(|(l, _), (r, _)| l.cmp(r));
	}
}
