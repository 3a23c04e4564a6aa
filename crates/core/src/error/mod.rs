// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	time::Duration,
};

use metabridge_type::{Diagnostic, Error, IntoDiagnostic};
use serde::{Deserialize, Serialize};

use crate::{change::ChangeKind, name::EntityKind};

mod diagnostic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogObjectKind {
	Metalake,
	Catalog,
	Schema,
	Table,
	Column,
	Provider,
}

impl Display for CatalogObjectKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			CatalogObjectKind::Metalake => f.write_str("metalake"),
			CatalogObjectKind::Catalog => f.write_str("catalog"),
			CatalogObjectKind::Schema => f.write_str("schema"),
			CatalogObjectKind::Table => f.write_str("table"),
			CatalogObjectKind::Column => f.write_str("column"),
			CatalogObjectKind::Provider => f.write_str("provider"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
	#[error("{kind} `{name}` not found")]
	NotFound {
		kind: CatalogObjectKind,
		name: String,
	},

	#[error("{kind} `{name}` already exists")]
	AlreadyExists {
		kind: CatalogObjectKind,
		name: String,
	},

	#[error("operation `{operation}` is not supported on `{name}`: {reason}")]
	UnsupportedOperation {
		operation: String,
		name: String,
		reason: String,
	},

	#[error("`{name}` names a {actual}, expected a {expected}")]
	InvalidName {
		name: String,
		expected: EntityKind,
		actual: EntityKind,
	},

	#[error("invalid {change} change on table `{table}`: {reason}")]
	InvalidChange {
		table: String,
		change: ChangeKind,
		reason: String,
	},

	#[error("invalid argument `{name}`: {reason}")]
	InvalidArgument {
		name: String,
		reason: String,
	},

	#[error("failed to construct catalog `{catalog}` with provider `{provider}`: {reason}")]
	ConstructionFailed {
		catalog: String,
		provider: String,
		reason: String,
		cause: Option<Diagnostic>,
	},

	#[error("construction of catalog `{catalog}` with provider `{provider}` timed out after {timeout:?}")]
	ConstructionTimeout {
		catalog: String,
		provider: String,
		timeout: Duration,
	},

	#[error("catalog `{catalog}` uses unknown provider `{provider}`")]
	UnknownProvider {
		catalog: String,
		provider: String,
	},

	#[error("`{name}` does not belong to catalog `{catalog}`")]
	CatalogMismatch {
		name: String,
		catalog: String,
	},
}

impl From<CatalogError> for Error {
	fn from(err: CatalogError) -> Self {
		Error(err.into_diagnostic())
	}
}
