// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::Subscriber;
use tracing_subscriber::{
	EnvFilter, Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
	#[default]
	Compact,
	/// One JSON object per event
	Json,
}

/// Builds and installs the global tracing subscriber.
///
/// The filter defaults to `info`. When `RUST_LOG` is set and the builder
/// reads the environment, it replaces the configured base filter; extra
/// directives always apply on top.
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	filter: String,
	directives: Vec<String>,
	format: LogFormat,
	target: bool,
	env: bool,
	test_writer: bool,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			filter: "info".to_string(),
			directives: vec![],
			format: LogFormat::Compact,
			target: true,
			env: true,
			test_writer: false,
		}
	}

	pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
		self.filter = filter.into();
		self
	}

	/// Adds a directive such as `metabridge_catalog=debug`
	pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
		self.directives.push(directive.into());
		self
	}

	pub fn with_format(mut self, format: LogFormat) -> Self {
		self.format = format;
		self
	}

	pub fn with_target(mut self, target: bool) -> Self {
		self.target = target;
		self
	}

	/// Ignore `RUST_LOG`
	pub fn without_env(mut self) -> Self {
		self.env = false;
		self
	}

	/// Route output through the test harness capture
	pub fn with_test_writer(mut self) -> Self {
		self.test_writer = true;
		self
	}

	/// The effective filter directives, comma separated
	pub fn filter_directives(&self) -> String {
		let base = match std::env::var(EnvFilter::DEFAULT_ENV) {
			Ok(env) if self.env && !env.trim().is_empty() => env,
			_ => self.filter.clone(),
		};
		let mut directives = vec![base];
		directives.extend(self.directives.iter().cloned());
		directives.join(",")
	}

	pub fn filter(&self) -> EnvFilter {
		EnvFilter::new(self.filter_directives())
	}

	pub fn layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
	where
		S: Subscriber + for<'a> LookupSpan<'a>,
	{
		let layer = fmt::layer().with_target(self.target);
		match (self.format, self.test_writer) {
			(LogFormat::Compact, false) => layer.compact().boxed(),
			(LogFormat::Compact, true) => layer.compact().with_test_writer().boxed(),
			(LogFormat::Json, false) => layer.json().boxed(),
			(LogFormat::Json, true) => layer.json().with_test_writer().boxed(),
		}
	}

	/// Installs the subscriber globally.
	///
	/// Returns `false` when a global subscriber was already installed.
	pub fn init(self) -> bool {
		let filter = self.filter();
		tracing_subscriber::registry().with(filter).with(self.layer()).try_init().is_ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_filter() {
		let builder = TracingBuilder::new().without_env();
		assert_eq!(builder.filter_directives(), "info");
		assert_eq!(builder.format, LogFormat::Compact);
	}

	#[test]
	fn test_directives_apply_on_top() {
		let builder = TracingBuilder::new()
			.without_env()
			.with_filter("warn")
			.with_directive("metabridge_catalog=debug")
			.with_directive("metabridge_connector=trace");
		assert_eq!(builder.filter_directives(), "warn,metabridge_catalog=debug,metabridge_connector=trace");
	}

	#[test]
	fn test_init_once() {
		TracingBuilder::new().without_env().with_test_writer().init();
		assert!(!TracingBuilder::new().with_format(LogFormat::Json).init());
	}
}
