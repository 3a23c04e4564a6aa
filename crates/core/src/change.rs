// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Alter table mutations.
//!
//! An alter request is an ordered `Vec<TableChange>`; changes are applied in
//! that order and never merged or reordered.

use std::fmt::{self, Display, Formatter};

use metabridge_type::Type;
use serde::{Deserialize, Serialize};

use crate::interface::catalog::ColumnPosition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableChange {
	RenameTable {
		new_name: String,
	},
	AddColumn {
		field_name: Vec<String>,
		ty: Type,
		comment: Option<String>,
		position: ColumnPosition,
		nullable: bool,
	},
	DeleteColumn {
		field_name: Vec<String>,
		if_exists: bool,
	},
	RenameColumn {
		field_name: Vec<String>,
		new_name: String,
	},
	UpdateColumnType {
		field_name: Vec<String>,
		new_type: Type,
	},
	UpdateComment {
		new_comment: Option<String>,
	},
	UpdateColumnComment {
		field_name: Vec<String>,
		new_comment: Option<String>,
	},
	SetProperty {
		property: String,
		value: String,
	},
	RemoveProperty {
		property: String,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
	RenameTable,
	AddColumn,
	DeleteColumn,
	RenameColumn,
	UpdateColumnType,
	UpdateComment,
	UpdateColumnComment,
	SetProperty,
	RemoveProperty,
}

impl Display for ChangeKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let name = match self {
			ChangeKind::RenameTable => "RenameTable",
			ChangeKind::AddColumn => "AddColumn",
			ChangeKind::DeleteColumn => "DeleteColumn",
			ChangeKind::RenameColumn => "RenameColumn",
			ChangeKind::UpdateColumnType => "UpdateColumnType",
			ChangeKind::UpdateComment => "UpdateComment",
			ChangeKind::UpdateColumnComment => "UpdateColumnComment",
			ChangeKind::SetProperty => "SetProperty",
			ChangeKind::RemoveProperty => "RemoveProperty",
		};
		f.write_str(name)
	}
}

fn path(name: &str) -> Vec<String> {
	vec![name.to_string()]
}

impl TableChange {
	pub fn rename(new_name: impl Into<String>) -> Self {
		TableChange::RenameTable {
			new_name: new_name.into(),
		}
	}

	pub fn add_column(name: &str, ty: Type) -> Self {
		TableChange::AddColumn {
			field_name: path(name),
			ty,
			comment: None,
			position: ColumnPosition::Append,
			nullable: true,
		}
	}

	pub fn add_column_at(name: &str, ty: Type, position: ColumnPosition) -> Self {
		TableChange::AddColumn {
			field_name: path(name),
			ty,
			comment: None,
			position,
			nullable: true,
		}
	}

	pub fn delete_column(name: &str) -> Self {
		TableChange::DeleteColumn {
			field_name: path(name),
			if_exists: false,
		}
	}

	pub fn rename_column(name: &str, new_name: impl Into<String>) -> Self {
		TableChange::RenameColumn {
			field_name: path(name),
			new_name: new_name.into(),
		}
	}

	pub fn update_column_type(name: &str, new_type: Type) -> Self {
		TableChange::UpdateColumnType {
			field_name: path(name),
			new_type,
		}
	}

	pub fn update_comment(new_comment: impl Into<String>) -> Self {
		TableChange::UpdateComment {
			new_comment: Some(new_comment.into()),
		}
	}

	pub fn update_column_comment(name: &str, new_comment: impl Into<String>) -> Self {
		TableChange::UpdateColumnComment {
			field_name: path(name),
			new_comment: Some(new_comment.into()),
		}
	}

	pub fn set_property(property: impl Into<String>, value: impl Into<String>) -> Self {
		TableChange::SetProperty {
			property: property.into(),
			value: value.into(),
		}
	}

	pub fn remove_property(property: impl Into<String>) -> Self {
		TableChange::RemoveProperty {
			property: property.into(),
		}
	}

	pub fn kind(&self) -> ChangeKind {
		match self {
			TableChange::RenameTable {
				..
			} => ChangeKind::RenameTable,
			TableChange::AddColumn {
				..
			} => ChangeKind::AddColumn,
			TableChange::DeleteColumn {
				..
			} => ChangeKind::DeleteColumn,
			TableChange::RenameColumn {
				..
			} => ChangeKind::RenameColumn,
			TableChange::UpdateColumnType {
				..
			} => ChangeKind::UpdateColumnType,
			TableChange::UpdateComment {
				..
			} => ChangeKind::UpdateComment,
			TableChange::UpdateColumnComment {
				..
			} => ChangeKind::UpdateColumnComment,
			TableChange::SetProperty {
				..
			} => ChangeKind::SetProperty,
			TableChange::RemoveProperty {
				..
			} => ChangeKind::RemoveProperty,
		}
	}

	/// The column path a change targets, if it targets a column
	pub fn field_name(&self) -> Option<&[String]> {
		match self {
			TableChange::AddColumn {
				field_name,
				..
			}
			| TableChange::DeleteColumn {
				field_name,
				..
			}
			| TableChange::RenameColumn {
				field_name,
				..
			}
			| TableChange::UpdateColumnType {
				field_name,
				..
			}
			| TableChange::UpdateColumnComment {
				field_name,
				..
			} => Some(field_name),
			TableChange::RenameTable {
				..
			}
			| TableChange::UpdateComment {
				..
			}
			| TableChange::SetProperty {
				..
			}
			| TableChange::RemoveProperty {
				..
			} => None,
		}
	}
}
