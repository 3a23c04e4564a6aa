// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Physical layout of a table: partitioning, sort order and distribution.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// A partition transform over one or more columns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transform {
	Identity(String),
	Year(String),
	Month(String),
	Day(String),
	Hour(String),
	Bucket {
		num_buckets: u32,
		columns: Vec<String>,
	},
	Truncate {
		width: u32,
		column: String,
	},
}

impl Transform {
	pub fn name(&self) -> &'static str {
		match self {
			Transform::Identity(_) => "identity",
			Transform::Year(_) => "year",
			Transform::Month(_) => "month",
			Transform::Day(_) => "day",
			Transform::Hour(_) => "hour",
			Transform::Bucket {
				..
			} => "bucket",
			Transform::Truncate {
				..
			} => "truncate",
		}
	}

	pub fn columns(&self) -> Vec<&str> {
		match self {
			Transform::Identity(c)
			| Transform::Year(c)
			| Transform::Month(c)
			| Transform::Day(c)
			| Transform::Hour(c)
			| Transform::Truncate {
				column: c,
				..
			} => vec![c.as_str()],
			Transform::Bucket {
				columns,
				..
			} => columns.iter().map(String::as_str).collect(),
		}
	}
}

impl Display for Transform {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Transform::Bucket {
				num_buckets,
				columns,
			} => write!(f, "bucket({}, {})", num_buckets, columns.join(", ")),
			Transform::Truncate {
				width,
				column,
			} => write!(f, "truncate({}, {})", width, column),
			other => write!(f, "{}({})", other.name(), other.columns()[0]),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
	#[default]
	Ascending,
	Descending,
}

impl SortDirection {
	/// Nulls sort as the smallest value unless stated otherwise
	pub fn default_null_ordering(&self) -> NullOrdering {
		match self {
			SortDirection::Ascending => NullOrdering::NullsFirst,
			SortDirection::Descending => NullOrdering::NullsLast,
		}
	}
}

impl Display for SortDirection {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			SortDirection::Ascending => f.write_str("ASC"),
			SortDirection::Descending => f.write_str("DESC"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullOrdering {
	NullsFirst,
	NullsLast,
}

impl Display for NullOrdering {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			NullOrdering::NullsFirst => f.write_str("NULLS FIRST"),
			NullOrdering::NullsLast => f.write_str("NULLS LAST"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOrder {
	pub column: String,
	pub direction: SortDirection,
	pub null_ordering: NullOrdering,
}

impl SortOrder {
	pub fn asc(column: impl Into<String>) -> Self {
		Self::new(column, SortDirection::Ascending)
	}

	pub fn desc(column: impl Into<String>) -> Self {
		Self::new(column, SortDirection::Descending)
	}

	pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
		Self {
			column: column.into(),
			direction,
			null_ordering: direction.default_null_ordering(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
	Hash,
	Range,
	Even,
}

impl Display for Strategy {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Strategy::Hash => f.write_str("hash"),
			Strategy::Range => f.write_str("range"),
			Strategy::Even => f.write_str("even"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Distribution {
	pub strategy: Strategy,
	pub number: u32,
	pub columns: Vec<String>,
}

impl Distribution {
	pub fn hash(number: u32, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			strategy: Strategy::Hash,
			number,
			columns: columns.into_iter().map(Into::into).collect(),
		}
	}
}
