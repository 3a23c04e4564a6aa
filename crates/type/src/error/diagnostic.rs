// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, ErrorKind, IntoDiagnostic, TypeError};

impl IntoDiagnostic for TypeError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			TypeError::UnsupportedType {
				ty,
				mapping,
				reason,
			} => {
				let mut notes = vec![format!("offending type: {}", ty)];
				if let Some(reason) = reason {
					notes.push(reason);
				}
				Diagnostic {
					code: "TYPE_001".to_string(),
					kind: ErrorKind::UnsupportedType,
					message,
					label: Some(format!("{} has no {} engine equivalent", ty, mapping)),
					help: Some("choose a type the catalog provider can represent".to_string()),
					notes,
					cause: None,
				}
			}

			TypeError::UnsupportedEngineType {
				ty,
				mapping,
				reason,
			} => {
				let mut notes = vec![format!("offending engine type: {}", ty)];
				if let Some(reason) = reason {
					notes.push(reason);
				}
				Diagnostic {
					code: "TYPE_002".to_string(),
					kind: ErrorKind::UnsupportedType,
					message,
					label: Some(format!("{} cannot be expressed as a generic type by {}", ty, mapping)),
					help: None,
					notes,
					cause: None,
				}
			}

			TypeError::InvalidParameter {
				ty,
				reason,
			} => Diagnostic {
				code: "TYPE_003".to_string(),
				kind: ErrorKind::InvalidArgument,
				message,
				label: Some(format!("invalid {}", ty)),
				help: None,
				notes: vec![reason],
				cause: None,
			},
		}
	}
}

/// Creates an internal error diagnostic with source location
pub fn internal(reason: impl Into<String>, file: &str, line: u32) -> Diagnostic {
	let reason = reason.into();
	Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		kind: ErrorKind::Internal,
		message: format!("Internal error: {}", reason),
		label: Some(format!("internal invariant violated at {}:{}", file, line)),
		help: Some("This is an internal error that should never occur in normal operation.".to_string()),
		notes: vec![],
		cause: None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Error;

	#[test]
	fn test_unsupported_type_diagnostic() {
		let err: Error = TypeError::UnsupportedType {
			ty: "interval_year".to_string(),
			mapping: "general",
			reason: None,
		}
		.into();

		assert_eq!(err.code, "TYPE_001");
		assert_eq!(err.kind(), ErrorKind::UnsupportedType);
		assert!(err.message.contains("interval_year"));
		assert!(err.notes.iter().any(|n| n.contains("interval_year")));
	}

	#[test]
	fn test_internal_diagnostic_location() {
		let diagnostic = internal("broken", "registry.rs", 42);
		assert_eq!(diagnostic.code, "INTERNAL_ERROR");
		assert_eq!(diagnostic.label.as_deref(), Some("internal invariant violated at registry.rs:42"));
	}
}
