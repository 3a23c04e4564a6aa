// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod value;

pub use error::{Diagnostic, Error, ErrorKind, IntoDiagnostic, TypeError};
pub use value::{
	engine::{EngineType, RowField},
	r#type::{StructField, Type, TypeClass},
};

pub type Result<T> = std::result::Result<T, Error>;
