// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

/// Lifecycle state of one catalog as seen by the lifecycle manager
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CatalogState {
	#[default]
	Absent,
	/// First context under construction, nothing published yet
	Loading,
	Active,
	/// Replacement under construction, the previous context stays published
	Reloading,
	Dropped,
}

impl Display for CatalogState {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			CatalogState::Absent => f.write_str("absent"),
			CatalogState::Loading => f.write_str("loading"),
			CatalogState::Active => f.write_str("active"),
			CatalogState::Reloading => f.write_str("reloading"),
			CatalogState::Dropped => f.write_str("dropped"),
		}
	}
}
