// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

pub mod diagnostic;
mod r#macro;
mod render;

pub use diagnostic::internal;
pub use render::DefaultRenderer;

/// Broad classification of every error raised by metabridge.
///
/// Callers branch on the kind; the diagnostic code identifies the exact cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
	NotFound,
	AlreadyExists,
	Unsupported,
	UnsupportedType,
	InvalidArgument,
	InvalidChange,
	ConstructionFailure,
	Timeout,
	Storage,
	Internal,
}

impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ErrorKind::NotFound => f.write_str("not found"),
			ErrorKind::AlreadyExists => f.write_str("already exists"),
			ErrorKind::Unsupported => f.write_str("unsupported operation"),
			ErrorKind::UnsupportedType => f.write_str("unsupported type"),
			ErrorKind::InvalidArgument => f.write_str("invalid argument"),
			ErrorKind::InvalidChange => f.write_str("invalid change"),
			ErrorKind::ConstructionFailure => f.write_str("construction failure"),
			ErrorKind::Timeout => f.write_str("timeout"),
			ErrorKind::Storage => f.write_str("storage"),
			ErrorKind::Internal => f.write_str("internal"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub kind: ErrorKind,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
	pub fn with_cause(mut self, cause: Diagnostic) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}

	pub fn with_note(mut self, note: impl Into<String>) -> Self {
		self.notes.push(note.into());
		self
	}
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Diagnostic);

impl Deref for Error {
	type Target = Diagnostic;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Error {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let out = DefaultRenderer::render_string(&self.0);
		f.write_str(out.as_str())
	}
}

impl Error {
	pub fn diagnostic(self) -> Diagnostic {
		self.0
	}

	pub fn kind(&self) -> ErrorKind {
		self.0.kind
	}

	pub fn code(&self) -> &str {
		&self.0.code
	}
}

impl std::error::Error for Error {}

impl From<Diagnostic> for Error {
	fn from(diagnostic: Diagnostic) -> Self {
		Error(diagnostic)
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
	#[error("type {ty} is not supported by the {mapping} type mapping")]
	UnsupportedType {
		ty: String,
		mapping: &'static str,
		reason: Option<String>,
	},

	#[error("engine type {ty} is not supported by the {mapping} type mapping")]
	UnsupportedEngineType {
		ty: String,
		mapping: &'static str,
		reason: Option<String>,
	},

	#[error("invalid parameters for type {ty}: {reason}")]
	InvalidParameter {
		ty: String,
		reason: String,
	},
}

impl From<TypeError> for Error {
	fn from(err: TypeError) -> Self {
		Error(err.into_diagnostic())
	}
}
