// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Builds an internal error diagnostic that records the call site
#[macro_export]
macro_rules! internal_error {
	($($arg:tt)*) => {
		$crate::error::Error($crate::error::internal(format!($($arg)*), file!(), line!()))
	};
}

#[macro_export]
macro_rules! return_internal_error {
	($($arg:tt)*) => {
		return Err($crate::internal_error!($($arg)*))
	};
}
