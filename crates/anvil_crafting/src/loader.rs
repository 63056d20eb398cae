//! # Recipe File Loader
//!
//! Reads recipe definitions from a flat text file, one recipe per line:
//!
//! ```text
//! # name, success rate, then material/quantity pairs
//! Sword,0.5,Iron,2,Wood,1
//! Healing Potion,0.9,Herb,3
//! ```
//!
//! Fields are trimmed; blank lines and `#` comments are skipped. This module
//! only tokenizes: numeric fields stay text until
//! [`RecipeCatalog::load`](crate::recipe::RecipeCatalog::load) parses them.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{CraftError, CraftResult};
use crate::recipe::RecipeRecord;

/// Tokenizes a whole recipe document.
///
/// # Errors
///
/// `Malformed` for a line with no success rate, or with a material that has
/// no quantity.
pub fn parse_records(text: &str) -> CraftResult<Vec<RecipeRecord>> {
    let mut records = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        let [name, success_rate, materials @ ..] = fields.as_slice() else {
            return Err(CraftError::Malformed {
                line,
                reason: "expected at least a name and a success rate".to_string(),
            });
        };

        if materials.len() % 2 != 0 {
            return Err(CraftError::Malformed {
                line,
                reason: format!(
                    "material `{}` has no quantity",
                    materials[materials.len() - 1]
                ),
            });
        }

        records.push(RecipeRecord {
            name: (*name).to_string(),
            success_rate: (*success_rate).to_string(),
            materials: materials
                .chunks_exact(2)
                .map(|pair| (pair[0].to_string(), pair[1].to_string()))
                .collect(),
            line: Some(line),
        });
    }

    Ok(records)
}

/// Reads and tokenizes the recipe file at `path`.
///
/// # Errors
///
/// `Io` if the file cannot be read, or any error from [`parse_records`].
pub fn load_recipe_file(path: impl AsRef<Path>) -> CraftResult<Vec<RecipeRecord>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| CraftError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_records(&text)?;
    debug!(path = %path.display(), records = records.len(), "recipe file read");
    Ok(records)
}
