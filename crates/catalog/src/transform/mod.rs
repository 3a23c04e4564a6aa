// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Bidirectional mapping between the generic and the engine type system.
//!
//! Each provider family restricts the generic types it can store. The shared
//! scalar and nested mappings live here; a transformer filters out what its
//! provider cannot represent and delegates the rest. Nested element, key,
//! value and field types always recurse through the calling transformer so
//! its restrictions apply at every depth.

use metabridge_type::{EngineType, Error, Result, RowField, StructField, Type, TypeError};

mod general;
mod hive;
mod iceberg;

pub use general::GeneralTransformer;
pub use hive::HiveTransformer;
pub use iceberg::IcebergTransformer;

pub trait TypeTransformer: Send + Sync {
	/// Name of the mapping, used in error messages
	fn name(&self) -> &'static str;

	fn to_engine_type(&self, ty: &Type) -> Result<EngineType>;

	fn to_generic_type(&self, ty: &EngineType) -> Result<Type>;
}

pub(crate) fn unsupported(transformer: &dyn TypeTransformer, ty: &Type, reason: Option<String>) -> Error {
	TypeError::UnsupportedType {
		ty: ty.to_string(),
		mapping: transformer.name(),
		reason,
	}
	.into()
}

pub(crate) fn unsupported_engine(
	transformer: &dyn TypeTransformer,
	ty: &EngineType,
	reason: Option<String>,
) -> Error {
	TypeError::UnsupportedEngineType {
		ty: ty.to_string(),
		mapping: transformer.name(),
		reason,
	}
	.into()
}

/// Scalar mapping shared by all transformers. `None` for nested types and
/// for generic types no engine can represent.
pub(crate) fn scalar_to_engine(ty: &Type, temporal_precision: u8) -> Option<EngineType> {
	let engine = match ty {
		Type::Boolean => EngineType::Boolean,
		Type::Byte => EngineType::TinyInt,
		Type::Short => EngineType::SmallInt,
		Type::Integer => EngineType::Integer,
		Type::Long => EngineType::BigInt,
		Type::Float => EngineType::Real,
		Type::Double => EngineType::Double,
		Type::Decimal {
			precision,
			scale,
		} => EngineType::Decimal {
			precision: *precision,
			scale: *scale,
		},
		Type::Date => EngineType::Date,
		Type::Time => EngineType::Time {
			precision: temporal_precision,
		},
		Type::Timestamp {
			with_time_zone: false,
		} => EngineType::Timestamp {
			precision: temporal_precision,
		},
		Type::Timestamp {
			with_time_zone: true,
		} => EngineType::TimestampWithTimeZone {
			precision: temporal_precision,
		},
		Type::String => EngineType::Varchar(None),
		Type::Varchar(length) => EngineType::Varchar(Some(*length)),
		Type::FixedChar(length) => EngineType::Char(*length),
		Type::Binary | Type::Fixed(_) => EngineType::Varbinary,
		Type::Uuid => EngineType::Uuid,
		Type::IntervalYear
		| Type::IntervalDay
		| Type::Null
		| Type::List {
			..
		}
		| Type::Map {
			..
		}
		| Type::Struct(_) => return None,
	};
	Some(engine)
}

pub(crate) fn scalar_to_generic(ty: &EngineType) -> Option<Type> {
	let generic = match ty {
		EngineType::Boolean => Type::Boolean,
		EngineType::TinyInt => Type::Byte,
		EngineType::SmallInt => Type::Short,
		EngineType::Integer => Type::Integer,
		EngineType::BigInt => Type::Long,
		EngineType::Real => Type::Float,
		EngineType::Double => Type::Double,
		EngineType::Decimal {
			precision,
			scale,
		} => Type::Decimal {
			precision: *precision,
			scale: *scale,
		},
		EngineType::Date => Type::Date,
		EngineType::Time {
			..
		} => Type::Time,
		EngineType::Timestamp {
			..
		} => Type::timestamp(),
		EngineType::TimestampWithTimeZone {
			..
		} => Type::timestamp_tz(),
		EngineType::Varchar(None) => Type::String,
		EngineType::Varchar(Some(length)) => Type::Varchar(*length),
		EngineType::Char(length) => Type::FixedChar(*length),
		EngineType::Varbinary => Type::Binary,
		EngineType::Uuid => Type::Uuid,
		EngineType::Array(_) | EngineType::Map(..) | EngineType::Row(_) => return None,
	};
	Some(generic)
}

/// Maps list, map and struct types through `transformer`, `None` for scalars
pub(crate) fn nested_to_engine(transformer: &dyn TypeTransformer, ty: &Type) -> Result<Option<EngineType>> {
	let engine = match ty {
		Type::List {
			element,
			..
		} => EngineType::array(transformer.to_engine_type(element)?),
		Type::Map {
			key,
			value,
			..
		} => EngineType::map(transformer.to_engine_type(key)?, transformer.to_engine_type(value)?),
		Type::Struct(fields) => EngineType::Row(
			fields.iter()
				.map(|field| -> Result<RowField> {
					Ok(RowField::named(&field.name, transformer.to_engine_type(&field.ty)?))
				})
				.collect::<Result<Vec<_>>>()?,
		),
		_ => return Ok(None),
	};
	Ok(Some(engine))
}

/// Engine types carry no nullability for nested values, so everything comes
/// back as nullable.
pub(crate) fn nested_to_generic(transformer: &dyn TypeTransformer, ty: &EngineType) -> Result<Option<Type>> {
	let generic = match ty {
		EngineType::Array(element) => Type::list(transformer.to_generic_type(element)?),
		EngineType::Map(key, value) => {
			Type::map(transformer.to_generic_type(key)?, transformer.to_generic_type(value)?)
		}
		EngineType::Row(fields) => {
			let mut result = Vec::with_capacity(fields.len());
			for field in fields {
				let Some(name) = &field.name else {
					return Err(unsupported_engine(
						transformer,
						ty,
						Some("row fields must be named to map to struct fields".to_string()),
					));
				};
				result.push(StructField::new(name, transformer.to_generic_type(&field.ty)?));
			}
			Type::Struct(result)
		}
		_ => return Ok(None),
	};
	Ok(Some(generic))
}
