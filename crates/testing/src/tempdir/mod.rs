// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{env, fs, path::Path};

use uuid::Uuid;

/// Runs `f` with a fresh directory that is removed afterwards
pub fn temp_dir<F, T>(f: F) -> std::io::Result<T>
where
	F: FnOnce(&Path) -> std::io::Result<T>,
{
	let mut path = env::temp_dir();
	path.push(format!("metabridge-{}", Uuid::new_v4()));

	fs::create_dir(&path)?;
	let result = f(&path);

	let _ = fs::remove_dir_all(&path);
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_directory_is_removed() {
		let kept = temp_dir(|path| {
			fs::write(path.join("metastore.db"), b"")?;
			assert!(path.join("metastore.db").exists());
			Ok(path.to_path_buf())
		})
		.unwrap();
		assert!(!kept.exists());
	}
}
