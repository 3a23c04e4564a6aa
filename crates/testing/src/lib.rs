// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod factory;
pub mod fixture;
pub mod service;
pub mod tempdir;
pub mod util;

pub use factory::{FailingFactory, HangingFactory, SlowFactory, TrackedFactory};
pub use service::MemoryMetadataService;
pub use tempdir::temp_dir;

use metabridge_sub_tracing::TracingBuilder;

/// Installs a test subscriber honoring `RUST_LOG`, once per test binary
pub fn init_test_tracing() {
	TracingBuilder::new().with_filter("warn").with_test_writer().init();
}
