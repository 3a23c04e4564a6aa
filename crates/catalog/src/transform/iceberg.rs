// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metabridge_type::{EngineType, Result, Type};

use super::{
	TypeTransformer, nested_to_engine, nested_to_generic, scalar_to_engine, scalar_to_generic, unsupported,
	unsupported_engine,
};

/// Iceberg stores time and timestamps with microsecond precision
pub const ICEBERG_TEMPORAL_PRECISION: u8 = 6;

/// Mapping for Iceberg lakehouse catalogs.
///
/// Iceberg has no narrow integers and no length bounded strings. `fixed(n)`
/// maps to `varbinary` and comes back as `binary`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcebergTransformer;

impl TypeTransformer for IcebergTransformer {
	fn name(&self) -> &'static str {
		"iceberg"
	}

	fn to_engine_type(&self, ty: &Type) -> Result<EngineType> {
		if matches!(ty, Type::Byte | Type::Short | Type::Varchar(_) | Type::FixedChar(_)) {
			return Err(unsupported(self, ty, None));
		}
		if let Some(engine) = scalar_to_engine(ty, ICEBERG_TEMPORAL_PRECISION) {
			return Ok(engine);
		}
		nested_to_engine(self, ty)?.ok_or_else(|| unsupported(self, ty, None))
	}

	fn to_generic_type(&self, ty: &EngineType) -> Result<Type> {
		if matches!(ty, EngineType::TinyInt | EngineType::SmallInt | EngineType::Varchar(Some(_)) | EngineType::Char(_))
		{
			return Err(unsupported_engine(self, ty, None));
		}
		if let Some(generic) = scalar_to_generic(ty) {
			return Ok(generic);
		}
		nested_to_generic(self, ty)?.ok_or_else(|| unsupported_engine(self, ty, None))
	}
}
