// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_type::Type;
use serde::{Deserialize, Serialize};

/// Where a column sits in its table.
///
/// `Append` stands for "after the last column" and is what newly added
/// columns default to; a negative ordinal received from a client maps to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColumnPosition {
	#[default]
	Append,
	At(usize),
}

impl ColumnPosition {
	pub fn from_ordinal(ordinal: i64) -> Self {
		if ordinal < 0 {
			ColumnPosition::Append
		} else {
			ColumnPosition::At(ordinal as usize)
		}
	}

	pub fn ordinal(&self) -> Option<usize> {
		match self {
			ColumnPosition::Append => None,
			ColumnPosition::At(ordinal) => Some(*ordinal),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
	pub name: String,
	pub ty: Type,
	pub comment: Option<String>,
	pub nullable: bool,
	pub position: ColumnPosition,
}

impl ColumnDef {
	pub fn new(name: impl Into<String>, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
			comment: None,
			nullable: true,
			position: ColumnPosition::Append,
		}
	}

	pub fn not_null(mut self) -> Self {
		self.nullable = false;
		self
	}

	pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
		self.comment = Some(comment.into());
		self
	}

	pub fn at(mut self, position: ColumnPosition) -> Self {
		self.position = position;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_position_from_ordinal() {
		assert_eq!(ColumnPosition::from_ordinal(-1), ColumnPosition::Append);
		assert_eq!(ColumnPosition::from_ordinal(0), ColumnPosition::At(0));
		assert_eq!(ColumnPosition::At(3).ordinal(), Some(3));
		assert_eq!(ColumnPosition::Append.ordinal(), None);
	}
}
