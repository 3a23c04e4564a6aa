// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub(super) const CREATE_METASTORE: &str = "
CREATE TABLE IF NOT EXISTS schemas (
	name       TEXT NOT NULL PRIMARY KEY,
	properties TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tables (
	id          INTEGER PRIMARY KEY AUTOINCREMENT,
	schema_name TEXT NOT NULL REFERENCES schemas (name),
	name        TEXT NOT NULL,
	comment     TEXT,
	properties  TEXT NOT NULL,
	UNIQUE (schema_name, name)
);

CREATE TABLE IF NOT EXISTS columns (
	table_id INTEGER NOT NULL REFERENCES tables (id) ON DELETE CASCADE,
	ordinal  INTEGER NOT NULL,
	name     TEXT NOT NULL,
	type     TEXT NOT NULL,
	nullable INTEGER NOT NULL,
	comment  TEXT,
	PRIMARY KEY (table_id, name)
);
";
