// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_type::{EngineType, Result, Type};

use super::{TypeTransformer, nested_to_engine, nested_to_generic, scalar_to_engine, scalar_to_generic, unsupported};

/// Millisecond precision for time and timestamp columns
pub const GENERAL_TEMPORAL_PRECISION: u8 = 3;

/// One-to-one mapping used by catalogs without storage restrictions.
///
/// Lossy: `fixed(n)` comes back as `binary`, and engine time and timestamp
/// precision is not carried by the generic types.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeneralTransformer;

impl TypeTransformer for GeneralTransformer {
	fn name(&self) -> &'static str {
		"general"
	}

	fn to_engine_type(&self, ty: &Type) -> Result<EngineType> {
		if let Some(engine) = scalar_to_engine(ty, GENERAL_TEMPORAL_PRECISION) {
			return Ok(engine);
		}
		nested_to_engine(self, ty)?.ok_or_else(|| unsupported(self, ty, None))
	}

	fn to_generic_type(&self, ty: &EngineType) -> Result<Type> {
		if let Some(generic) = scalar_to_generic(ty) {
			return Ok(generic);
		}
		nested_to_generic(self, ty)?.ok_or_else(|| super::unsupported_engine(self, ty, None))
	}
}
