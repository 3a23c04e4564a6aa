// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

mod class;

pub use class::TypeClass;

/// Maximum precision of a decimal type
pub const MAX_DECIMAL_PRECISION: u8 = 38;

/// The generic, engine independent type system of the metadata catalog
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
	/// true or false
	Boolean,
	/// A 1-byte signed integer
	Byte,
	/// A 2-byte signed integer
	Short,
	/// A 4-byte signed integer
	Integer,
	/// An 8-byte signed integer
	Long,
	/// A 4-byte floating point
	Float,
	/// An 8-byte floating point
	Double,
	/// A fixed point number with `precision` digits, `scale` of them after the point
	Decimal {
		precision: u8,
		scale: u8,
	},
	Date,
	/// Time of day, without a time zone
	Time,
	Timestamp {
		with_time_zone: bool,
	},
	IntervalYear,
	IntervalDay,
	/// Unbounded UTF-8 text
	String,
	/// UTF-8 text of at most the given number of characters
	Varchar(u32),
	/// UTF-8 text of exactly the given number of characters
	FixedChar(u32),
	/// Unbounded binary data
	Binary,
	/// Binary data of exactly the given number of bytes
	Fixed(u32),
	Uuid,
	List {
		element: Box<Type>,
		element_nullable: bool,
	},
	Map {
		key: Box<Type>,
		value: Box<Type>,
		value_nullable: bool,
	},
	Struct(Vec<StructField>),
	/// The type of the null literal
	Null,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
	pub name: String,
	pub ty: Type,
	pub nullable: bool,
	pub comment: Option<String>,
}

impl StructField {
	pub fn new(name: impl Into<String>, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
			nullable: true,
			comment: None,
		}
	}
}

impl Type {
	pub fn decimal(precision: u8, scale: u8) -> Result<Self, TypeError> {
		if precision == 0 || precision > MAX_DECIMAL_PRECISION {
			return Err(TypeError::InvalidParameter {
				ty: format!("decimal({},{})", precision, scale),
				reason: format!("precision must be between 1 and {}", MAX_DECIMAL_PRECISION),
			});
		}
		if scale > precision {
			return Err(TypeError::InvalidParameter {
				ty: format!("decimal({},{})", precision, scale),
				reason: "scale must not exceed precision".to_string(),
			});
		}
		Ok(Type::Decimal {
			precision,
			scale,
		})
	}

	pub fn timestamp() -> Self {
		Type::Timestamp {
			with_time_zone: false,
		}
	}

	pub fn timestamp_tz() -> Self {
		Type::Timestamp {
			with_time_zone: true,
		}
	}

	pub fn list(element: Type) -> Self {
		Type::List {
			element: Box::new(element),
			element_nullable: true,
		}
	}

	pub fn map(key: Type, value: Type) -> Self {
		Type::Map {
			key: Box::new(key),
			value: Box::new(value),
			value_nullable: true,
		}
	}

	pub fn is_integral(&self) -> bool {
		matches!(self, Type::Byte | Type::Short | Type::Integer | Type::Long)
	}

	pub fn is_numeric(&self) -> bool {
		self.is_integral() || matches!(self, Type::Float | Type::Double | Type::Decimal { .. })
	}

	pub fn is_temporal(&self) -> bool {
		matches!(
			self,
			Type::Date | Type::Time | Type::Timestamp { .. } | Type::IntervalYear | Type::IntervalDay
		)
	}

	pub fn is_text(&self) -> bool {
		matches!(self, Type::String | Type::Varchar(_) | Type::FixedChar(_))
	}

	pub fn is_complex(&self) -> bool {
		matches!(self, Type::List { .. } | Type::Map { .. } | Type::Struct(_))
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Type::Boolean => f.write_str("boolean"),
			Type::Byte => f.write_str("byte"),
			Type::Short => f.write_str("short"),
			Type::Integer => f.write_str("integer"),
			Type::Long => f.write_str("long"),
			Type::Float => f.write_str("float"),
			Type::Double => f.write_str("double"),
			Type::Decimal {
				precision,
				scale,
			} => write!(f, "decimal({},{})", precision, scale),
			Type::Date => f.write_str("date"),
			Type::Time => f.write_str("time"),
			Type::Timestamp {
				with_time_zone: false,
			} => f.write_str("timestamp"),
			Type::Timestamp {
				with_time_zone: true,
			} => f.write_str("timestamp_tz"),
			Type::IntervalYear => f.write_str("interval_year"),
			Type::IntervalDay => f.write_str("interval_day"),
			Type::String => f.write_str("string"),
			Type::Varchar(length) => write!(f, "varchar({})", length),
			Type::FixedChar(length) => write!(f, "char({})", length),
			Type::Binary => f.write_str("binary"),
			Type::Fixed(length) => write!(f, "fixed({})", length),
			Type::Uuid => f.write_str("uuid"),
			Type::List {
				element,
				..
			} => write!(f, "list<{}>", element),
			Type::Map {
				key,
				value,
				..
			} => write!(f, "map<{},{}>", key, value),
			Type::Struct(fields) => {
				f.write_str("struct<")?;
				for (idx, field) in fields.iter().enumerate() {
					if idx > 0 {
						f.write_str(",")?;
					}
					write!(f, "{}:{}", field.name, field.ty)?;
				}
				f.write_str(">")
			}
			Type::Null => f.write_str("null"),
		}
	}
}
