// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use super::Type;

/// Logical class of a type; two types of the same class are interchangeable
/// for query purposes even when their width or precision differs.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeClass {
	Boolean,
	Integral,
	Floating,
	Decimal,
	Date,
	Time,
	Timestamp,
	Interval,
	Text,
	Binary,
	Uuid,
	List,
	Map,
	Struct,
	Null,
}

impl Type {
	pub fn class(&self) -> TypeClass {
		match self {
			Type::Boolean => TypeClass::Boolean,
			Type::Byte | Type::Short | Type::Integer | Type::Long => TypeClass::Integral,
			Type::Float | Type::Double => TypeClass::Floating,
			Type::Decimal {
				..
			} => TypeClass::Decimal,
			Type::Date => TypeClass::Date,
			Type::Time => TypeClass::Time,
			Type::Timestamp {
				..
			} => TypeClass::Timestamp,
			Type::IntervalYear | Type::IntervalDay => TypeClass::Interval,
			Type::String | Type::Varchar(_) | Type::FixedChar(_) => TypeClass::Text,
			Type::Binary | Type::Fixed(_) => TypeClass::Binary,
			Type::Uuid => TypeClass::Uuid,
			Type::List {
				..
			} => TypeClass::List,
			Type::Map {
				..
			} => TypeClass::Map,
			Type::Struct(_) => TypeClass::Struct,
			Type::Null => TypeClass::Null,
		}
	}

	/// Returns true when both types belong to the same class, recursively for
	/// element, key, value and field types.
	pub fn is_equivalent(&self, other: &Type) -> bool {
		match (self, other) {
			(
				Type::List {
					element: l,
					..
				},
				Type::List {
					element: r,
					..
				},
			) => l.is_equivalent(r),
			(
				Type::Map {
					key: lk,
					value: lv,
					..
				},
				Type::Map {
					key: rk,
					value: rv,
					..
				},
			) => lk.is_equivalent(rk) && lv.is_equivalent(rv),
			(Type::Struct(l), Type::Struct(r)) => {
				l.len() == r.len()
					&& l.iter().zip(r.iter()).all(|(l, r)| l.name == r.name && l.ty.is_equivalent(&r.ty))
			}
			(l, r) => l.class() == r.class(),
		}
	}
}
