// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_type::{Diagnostic, ErrorKind, IntoDiagnostic};

use super::CatalogError;

fn diagnostic(code: &str, kind: ErrorKind, message: String) -> Diagnostic {
	Diagnostic {
		code: code.to_string(),
		kind,
		message,
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

impl IntoDiagnostic for CatalogError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			CatalogError::NotFound {
				kind,
				name,
			} => Diagnostic {
				label: Some(format!("unknown {}", kind)),
				notes: vec![format!("looked up `{}`", name)],
				..diagnostic("CA_001", ErrorKind::NotFound, message)
			},

			CatalogError::AlreadyExists {
				kind,
				name,
			} => Diagnostic {
				label: Some(format!("duplicate {} definition", kind)),
				help: Some(format!("choose a different name for `{}`", name)),
				..diagnostic("CA_002", ErrorKind::AlreadyExists, message)
			},

			CatalogError::UnsupportedOperation {
				operation,
				..
			} => Diagnostic {
				label: Some(format!("`{}` is not available here", operation)),
				..diagnostic("CA_003", ErrorKind::Unsupported, message)
			},

			CatalogError::InvalidName {
				expected,
				actual,
				..
			} => Diagnostic {
				label: Some(format!(
					"a {} name has {} segments below the metalake",
					expected,
					expected.depth()
				)),
				notes: vec![format!("got a {} name", actual)],
				..diagnostic("CA_004", ErrorKind::InvalidArgument, message)
			},

			CatalogError::InvalidChange {
				change,
				..
			} => Diagnostic {
				label: Some(format!("rejected {} change", change)),
				help: Some("no change of the request was applied".to_string()),
				..diagnostic("CA_005", ErrorKind::InvalidChange, message)
			},

			CatalogError::InvalidArgument {
				..
			} => diagnostic("CA_006", ErrorKind::InvalidArgument, message),

			CatalogError::ConstructionFailed {
				cause,
				..
			} => Diagnostic {
				help: Some("the previously registered connector, if any, stays active".to_string()),
				cause: cause.map(Box::new),
				..diagnostic("CA_007", ErrorKind::ConstructionFailure, message)
			},

			CatalogError::ConstructionTimeout {
				..
			} => Diagnostic {
				help: Some("raise the construction timeout or check the catalog backend".to_string()),
				..diagnostic("CA_008", ErrorKind::Timeout, message)
			},

			CatalogError::UnknownProvider {
				provider,
				..
			} => Diagnostic {
				label: Some(format!("no connector factory registered for `{}`", provider)),
				..diagnostic("CA_009", ErrorKind::ConstructionFailure, message)
			},

			CatalogError::CatalogMismatch {
				..
			} => diagnostic("CA_010", ErrorKind::InvalidArgument, message),
		}
	}
}
