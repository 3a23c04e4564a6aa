// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_type::{Diagnostic, Error, ErrorKind, IntoDiagnostic};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConnectorError {
	#[error("schema `{schema}` does not exist")]
	SchemaNotFound {
		schema: String,
	},

	#[error("table `{table}` does not exist")]
	TableNotFound {
		table: String,
	},

	#[error("column `{column}` does not exist in table `{table}`")]
	ColumnNotFound {
		table: String,
		column: String,
	},

	#[error("schema `{schema}` already exists")]
	SchemaAlreadyExists {
		schema: String,
	},

	#[error("table `{table}` already exists")]
	TableAlreadyExists {
		table: String,
	},

	#[error("column `{column}` already exists in table `{table}`")]
	ColumnAlreadyExists {
		table: String,
		column: String,
	},

	#[error("schema `{schema}` is not empty")]
	SchemaNotEmpty {
		schema: String,
	},

	#[error("handle for table `{table}` is stale, the table is now `{current}`")]
	StaleHandle {
		table: String,
		current: String,
	},

	#[error("column ordinal {ordinal} is out of range for table `{table}` with {columns} columns")]
	OrdinalOutOfRange {
		table: String,
		ordinal: usize,
		columns: usize,
	},

	#[error("connector `{connector}` allows at most {limit} tables")]
	TableLimitExceeded {
		connector: String,
		limit: usize,
	},

	#[error("connector `{connector}` has been shut down")]
	ShutDown {
		connector: String,
	},

	#[error("metastore error: {reason}")]
	Storage {
		reason: String,
	},
}

impl IntoDiagnostic for ConnectorError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		let (code, kind, help) = match &self {
			ConnectorError::SchemaNotFound {
				..
			} => ("CO_001", ErrorKind::NotFound, None),
			ConnectorError::TableNotFound {
				..
			} => ("CO_002", ErrorKind::NotFound, None),
			ConnectorError::ColumnNotFound {
				..
			} => ("CO_003", ErrorKind::NotFound, None),
			ConnectorError::SchemaAlreadyExists {
				..
			} => ("CO_004", ErrorKind::AlreadyExists, None),
			ConnectorError::TableAlreadyExists {
				..
			} => ("CO_005", ErrorKind::AlreadyExists, None),
			ConnectorError::ColumnAlreadyExists {
				..
			} => ("CO_006", ErrorKind::AlreadyExists, None),
			ConnectorError::SchemaNotEmpty {
				..
			} => ("CO_007", ErrorKind::InvalidArgument, Some("drop the schema with cascade to remove its tables")),
			ConnectorError::StaleHandle {
				..
			} => ("CO_008", ErrorKind::InvalidArgument, Some("resolve the table handle again")),
			ConnectorError::OrdinalOutOfRange {
				..
			} => ("CO_009", ErrorKind::InvalidArgument, None),
			ConnectorError::TableLimitExceeded {
				..
			} => ("CO_010", ErrorKind::InvalidArgument, None),
			ConnectorError::ShutDown {
				..
			} => ("CO_011", ErrorKind::Internal, None),
			ConnectorError::Storage {
				..
			} => ("CO_012", ErrorKind::Storage, None),
		};

		Diagnostic {
			code: code.to_string(),
			kind,
			message,
			label: None,
			help: help.map(str::to_string),
			notes: vec![],
			cause: None,
		}
	}
}

impl From<ConnectorError> for Error {
	fn from(err: ConnectorError) -> Self {
		Error(err.into_diagnostic())
	}
}

impl From<rusqlite::Error> for ConnectorError {
	fn from(err: rusqlite::Error) -> Self {
		ConnectorError::Storage {
			reason: err.to_string(),
		}
	}
}

impl From<serde_json::Error> for ConnectorError {
	fn from(err: serde_json::Error) -> Self {
		ConnectorError::Storage {
			reason: err.to_string(),
		}
	}
}
