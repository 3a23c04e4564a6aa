// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use super::Diagnostic;

pub struct DefaultRenderer;

impl DefaultRenderer {
	pub fn render_string(diagnostic: &Diagnostic) -> String {
		let mut out = String::new();
		Self::render(&mut out, diagnostic, 0);
		out
	}

	fn render(out: &mut String, diagnostic: &Diagnostic, depth: usize) {
		let indent = "  ".repeat(depth);
		let _ = write!(out, "{}[{}] {}", indent, diagnostic.code, diagnostic.message);

		if let Some(label) = &diagnostic.label {
			let _ = write!(out, "\n{}  --> {}", indent, label);
		}
		for note in &diagnostic.notes {
			let _ = write!(out, "\n{}  note: {}", indent, note);
		}
		if let Some(help) = &diagnostic.help {
			let _ = write!(out, "\n{}  help: {}", indent, help);
		}
		if let Some(cause) = &diagnostic.cause {
			let _ = write!(out, "\n{}  caused by:\n", indent);
			Self::render(out, cause, depth + 1);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorKind;

	fn diagnostic(code: &str, message: &str) -> Diagnostic {
		Diagnostic {
			code: code.to_string(),
			kind: ErrorKind::Internal,
			message: message.to_string(),
			label: None,
			help: None,
			notes: vec![],
			cause: None,
		}
	}

	#[test]
	fn test_render_with_cause() {
		let rendered = DefaultRenderer::render_string(
			&diagnostic("CA_009", "outer").with_note("first").with_cause(diagnostic("CO_001", "inner")),
		);

		assert_eq!(rendered, "[CA_009] outer\n  note: first\n  caused by:\n  [CO_001] inner");
	}
}
