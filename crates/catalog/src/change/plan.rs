// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_connector::{EngineColumnMetadata, PropertyValue};
use metabridge_core::{CatalogError, ChangeKind, ColumnDef, TableChange, TableName};
use metabridge_type::{EngineType, Result};

use crate::adapter::MetadataAdapter;

/// A validated change with every generic value already translated for the
/// engine
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
	RenameTable {
		new_name: String,
	},
	AddColumn {
		column: EngineColumnMetadata,
		ordinal: Option<usize>,
	},
	DeleteColumn {
		column: String,
		if_exists: bool,
	},
	RenameColumn {
		column: String,
		new_name: String,
	},
	UpdateColumnType {
		column: String,
		ty: EngineType,
	},
	UpdateComment {
		comment: Option<String>,
	},
	UpdateColumnComment {
		column: String,
		comment: Option<String>,
	},
	SetProperty {
		key: String,
		value: PropertyValue,
	},
	RemoveProperty {
		key: String,
	},
}

impl Step {
	/// The existing column a step drops or renames
	pub(crate) fn displaced_column(&self) -> Option<(ChangeKind, &str)> {
		match self {
			Step::DeleteColumn {
				column,
				..
			} => Some((ChangeKind::DeleteColumn, column)),
			Step::RenameColumn {
				column,
				..
			} => Some((ChangeKind::RenameColumn, column)),
			_ => None,
		}
	}
}

fn invalid(table: &TableName, change: ChangeKind, reason: impl Into<String>) -> CatalogError {
	CatalogError::InvalidChange {
		table: table.to_string(),
		change,
		reason: reason.into(),
	}
}

/// Resolves a field path to the top-level column it names
fn column(table: &TableName, change: ChangeKind, field_name: &[String]) -> Result<String> {
	match field_name {
		[] => Err(invalid(table, change, "field name is empty").into()),
		[name] => {
			validate_name(table, change, name)?;
			Ok(name.clone())
		}
		_ => {
			if field_name.iter().any(String::is_empty) {
				return Err(invalid(table, change, "field name contains an empty segment").into());
			}
			Err(CatalogError::UnsupportedOperation {
				operation: change.to_string(),
				name: format!("{}.{}", table, field_name.join(".")),
				reason: "nested field paths are not supported".to_string(),
			}
			.into())
		}
	}
}

fn validate_name(table: &TableName, change: ChangeKind, name: &str) -> Result<()> {
	if name.is_empty() {
		return Err(invalid(table, change, "name is empty").into());
	}
	if name.contains('.') {
		return Err(invalid(table, change, format!("name `{}` must not contain '.'", name)).into());
	}
	Ok(())
}

fn property_key(table: &TableName, change: ChangeKind, key: &str) -> Result<()> {
	if key.is_empty() {
		return Err(invalid(table, change, "property key is empty").into());
	}
	Ok(())
}

pub(crate) fn plan(adapter: &dyn MetadataAdapter, table: &TableName, changes: &[TableChange]) -> Result<Vec<Step>> {
	let mut result = Vec::with_capacity(changes.len());

	for change in changes {
		let kind = change.kind();
		let step = match change {
			TableChange::RenameTable {
				new_name,
			} => {
				validate_name(table, kind, new_name)?;
				Step::RenameTable {
					new_name: new_name.clone(),
				}
			}
			TableChange::AddColumn {
				field_name,
				ty,
				comment,
				position,
				nullable,
			} => {
				let column = ColumnDef {
					name: column(table, kind, field_name)?,
					ty: ty.clone(),
					comment: comment.clone(),
					nullable: *nullable,
					position: *position,
				};
				Step::AddColumn {
					column: adapter.build_engine_column_metadata(&column)?,
					ordinal: position.ordinal(),
				}
			}
			TableChange::DeleteColumn {
				field_name,
				if_exists,
			} => Step::DeleteColumn {
				column: column(table, kind, field_name)?,
				if_exists: *if_exists,
			},
			TableChange::RenameColumn {
				field_name,
				new_name,
			} => {
				let column = column(table, kind, field_name)?;
				validate_name(table, kind, new_name)?;
				Step::RenameColumn {
					column,
					new_name: new_name.clone(),
				}
			}
			TableChange::UpdateColumnType {
				field_name,
				new_type,
			} => Step::UpdateColumnType {
				column: column(table, kind, field_name)?,
				ty: adapter.transformer().to_engine_type(new_type)?,
			},
			TableChange::UpdateComment {
				new_comment,
			} => Step::UpdateComment {
				comment: new_comment.clone(),
			},
			TableChange::UpdateColumnComment {
				field_name,
				new_comment,
			} => Step::UpdateColumnComment {
				column: column(table, kind, field_name)?,
				comment: new_comment.clone(),
			},
			TableChange::SetProperty {
				property,
				value,
			} => {
				property_key(table, kind, property)?;
				let (key, value) = adapter.table_properties().to_engine_entry(property, value)?;
				Step::SetProperty {
					key,
					value,
				}
			}
			TableChange::RemoveProperty {
				property,
			} => {
				property_key(table, kind, property)?;
				Step::RemoveProperty {
					key: adapter.table_properties().engine_key(property)?,
				}
			}
		};
		result.push(step);
	}

	Ok(result)
}
