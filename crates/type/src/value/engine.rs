// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Type system of the query engine the catalogs are bridged into
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineType {
	Boolean,
	TinyInt,
	SmallInt,
	Integer,
	BigInt,
	Real,
	Double,
	Decimal {
		precision: u8,
		scale: u8,
	},
	/// `None` is an unbounded varchar
	Varchar(Option<u32>),
	Char(u32),
	Varbinary,
	Date,
	Time {
		precision: u8,
	},
	Timestamp {
		precision: u8,
	},
	TimestampWithTimeZone {
		precision: u8,
	},
	Uuid,
	Array(Box<EngineType>),
	Map(Box<EngineType>, Box<EngineType>),
	Row(Vec<RowField>),
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowField {
	pub name: Option<String>,
	pub ty: EngineType,
}

impl RowField {
	pub fn named(name: impl Into<String>, ty: EngineType) -> Self {
		Self {
			name: Some(name.into()),
			ty,
		}
	}
}

impl EngineType {
	pub fn varchar() -> Self {
		EngineType::Varchar(None)
	}

	pub fn array(element: EngineType) -> Self {
		EngineType::Array(Box::new(element))
	}

	pub fn map(key: EngineType, value: EngineType) -> Self {
		EngineType::Map(Box::new(key), Box::new(value))
	}
}

impl Display for EngineType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			EngineType::Boolean => f.write_str("boolean"),
			EngineType::TinyInt => f.write_str("tinyint"),
			EngineType::SmallInt => f.write_str("smallint"),
			EngineType::Integer => f.write_str("integer"),
			EngineType::BigInt => f.write_str("bigint"),
			EngineType::Real => f.write_str("real"),
			EngineType::Double => f.write_str("double"),
			EngineType::Decimal {
				precision,
				scale,
			} => write!(f, "decimal({},{})", precision, scale),
			EngineType::Varchar(None) => f.write_str("varchar"),
			EngineType::Varchar(Some(length)) => write!(f, "varchar({})", length),
			EngineType::Char(length) => write!(f, "char({})", length),
			EngineType::Varbinary => f.write_str("varbinary"),
			EngineType::Date => f.write_str("date"),
			EngineType::Time {
				precision,
			} => write!(f, "time({})", precision),
			EngineType::Timestamp {
				precision,
			} => write!(f, "timestamp({})", precision),
			EngineType::TimestampWithTimeZone {
				precision,
			} => write!(f, "timestamp({}) with time zone", precision),
			EngineType::Uuid => f.write_str("uuid"),
			EngineType::Array(element) => write!(f, "array({})", element),
			EngineType::Map(key, value) => write!(f, "map({}, {})", key, value),
			EngineType::Row(fields) => {
				f.write_str("row(")?;
				for (idx, field) in fields.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					match &field.name {
						Some(name) => write!(f, "{} {}", name, field.ty)?,
						None => write!(f, "{}", field.ty)?,
					}
				}
				f.write_str(")")
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display() {
		assert_eq!(EngineType::varchar().to_string(), "varchar");
		assert_eq!(EngineType::Varchar(Some(12)).to_string(), "varchar(12)");
		assert_eq!(
			EngineType::TimestampWithTimeZone {
				precision: 6
			}
			.to_string(),
			"timestamp(6) with time zone"
		);
		assert_eq!(
			EngineType::Row(vec![
				RowField::named("id", EngineType::BigInt),
				RowField::named("tags", EngineType::array(EngineType::varchar())),
			])
			.to_string(),
			"row(id bigint, tags array(varchar))"
		);
		assert_eq!(
			EngineType::map(EngineType::varchar(), EngineType::Double).to_string(),
			"map(varchar, double)"
		);
	}

	#[test]
	fn test_serde_shape_is_stable() {
		let ty = EngineType::array(EngineType::Decimal {
			precision: 10,
			scale: 2,
		});
		let json = serde_json::to_string(&ty).unwrap();
		assert_eq!(json, r#"{"Array":{"Decimal":{"precision":10,"scale":2}}}"#);
		assert_eq!(serde_json::from_str::<EngineType>(&json).unwrap(), ty);
	}
}
