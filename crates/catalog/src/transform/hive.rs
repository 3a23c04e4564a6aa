// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::RangeInclusive;

use metabridge_type::{EngineType, Result, Type};

use super::{
	TypeTransformer, nested_to_engine, nested_to_generic, scalar_to_engine, scalar_to_generic, unsupported,
	unsupported_engine,
};

pub const HIVE_VARCHAR_LENGTH: RangeInclusive<u32> = 1..=65535;
pub const HIVE_CHAR_LENGTH: RangeInclusive<u32> = 1..=255;

const HIVE_TIMESTAMP_PRECISION: u8 = 3;

/// Mapping for Hive metastore backed catalogs
#[derive(Debug, Default, Clone, Copy)]
pub struct HiveTransformer;

fn length_reason(kind: &str, range: &RangeInclusive<u32>) -> Option<String> {
	Some(format!("{} length must be between {} and {}", kind, range.start(), range.end()))
}

impl TypeTransformer for HiveTransformer {
	fn name(&self) -> &'static str {
		"hive"
	}

	fn to_engine_type(&self, ty: &Type) -> Result<EngineType> {
		match ty {
			Type::Time
			| Type::Timestamp {
				with_time_zone: true,
			}
			| Type::Uuid
			| Type::Fixed(_) => return Err(unsupported(self, ty, None)),
			Type::Varchar(length) if !HIVE_VARCHAR_LENGTH.contains(length) => {
				return Err(unsupported(self, ty, length_reason("varchar", &HIVE_VARCHAR_LENGTH)));
			}
			Type::FixedChar(length) if !HIVE_CHAR_LENGTH.contains(length) => {
				return Err(unsupported(self, ty, length_reason("char", &HIVE_CHAR_LENGTH)));
			}
			_ => {}
		}

		if let Some(engine) = scalar_to_engine(ty, HIVE_TIMESTAMP_PRECISION) {
			return Ok(engine);
		}
		nested_to_engine(self, ty)?.ok_or_else(|| unsupported(self, ty, None))
	}

	fn to_generic_type(&self, ty: &EngineType) -> Result<Type> {
		match ty {
			EngineType::Time {
				..
			}
			| EngineType::TimestampWithTimeZone {
				..
			}
			| EngineType::Uuid => return Err(unsupported_engine(self, ty, None)),
			EngineType::Varchar(Some(length)) if !HIVE_VARCHAR_LENGTH.contains(length) => {
				return Err(unsupported_engine(self, ty, length_reason("varchar", &HIVE_VARCHAR_LENGTH)));
			}
			EngineType::Char(length) if !HIVE_CHAR_LENGTH.contains(length) => {
				return Err(unsupported_engine(self, ty, length_reason("char", &HIVE_CHAR_LENGTH)));
			}
			_ => {}
		}

		if let Some(generic) = scalar_to_generic(ty) {
			return Ok(generic);
		}
		nested_to_generic(self, ty)?.ok_or_else(|| unsupported_engine(self, ty, None))
	}
}
