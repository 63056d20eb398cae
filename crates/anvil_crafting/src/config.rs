//! # Session Configuration
//!
//! A crafting session is described by one TOML file, loaded once at
//! startup:
//!
//! ```toml
//! seed = 42
//! recipe_file = "recipes.txt"
//!
//! [[recipes]]
//! name = "Sword"
//! success_rate = 0.5
//! materials = [{ name = "Iron", quantity = 2 }, { name = "Wood", quantity = 1 }]
//!
//! [[inventory]]
//! name = "Iron"
//! id = 1
//! quantity = 3
//! ```
//!
//! `recipe_file` is resolved against the directory of the config file.
//! Recipes from the file come first, inline `[[recipes]]` after them.
//! Without a `seed` the roll source is seeded from OS entropy.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::crafting::Crafter;
use crate::error::{CraftError, CraftResult};
use crate::inventory::Inventory;
use crate::loader::load_recipe_file;
use crate::material::{Material, MaterialId};
use crate::recipe::{Recipe, RecipeCatalog, Requirement};
use crate::roll::SeededRolls;

/// One `{ name, quantity }` requirement of an inline recipe.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MaterialAmount {
    /// Material name.
    pub name: String,
    /// Quantity required.
    pub quantity: u32,
}

/// An inline recipe.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RecipeEntry {
    /// Recipe name.
    pub name: String,
    /// Probability in `[0, 1]`.
    pub success_rate: f64,
    /// Required materials, in order.
    #[serde(default)]
    pub materials: Vec<MaterialAmount>,
}

/// A starting inventory stack.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StockEntry {
    /// Material name.
    pub name: String,
    /// Explicit id; a name-derived id is used when absent.
    #[serde(default)]
    pub id: Option<MaterialId>,
    /// Starting quantity.
    pub quantity: u32,
}

impl StockEntry {
    fn material(&self) -> CraftResult<Material> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CraftError::InvalidConfig(
                "inventory entry has no material name".to_string(),
            ));
        }
        Ok(match self.id {
            Some(id) => Material::new(id, name),
            None => Material::named(name),
        })
    }
}

/// A whole crafting session.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Seed for the roll source.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Flat recipe file to load.
    #[serde(default)]
    pub recipe_file: Option<PathBuf>,
    /// Recipes defined inline.
    #[serde(default)]
    pub recipes: Vec<RecipeEntry>,
    /// Starting inventory.
    #[serde(default)]
    pub inventory: Vec<StockEntry>,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl SessionConfig {
    /// Parses a config from TOML text. Relative paths resolve against the
    /// working directory.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the TOML does not describe a session.
    pub fn from_toml_str(text: &str) -> CraftResult<Self> {
        toml::from_str(text).map_err(|e| CraftError::InvalidConfig(e.to_string()))
    }

    /// Reads a config file. Relative paths resolve against its directory.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `InvalidConfig` if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> CraftResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CraftError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml_str(&text)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// The recipe file path, resolved against `base_dir`.
    #[must_use]
    pub fn resolved_recipe_file(&self) -> Option<PathBuf> {
        let file = self.recipe_file.as_ref()?;
        Some(match &self.base_dir {
            Some(dir) if file.is_relative() => dir.join(file),
            _ => file.clone(),
        })
    }

    /// Builds the recipe catalog: file recipes first, then inline ones.
    ///
    /// # Errors
    ///
    /// Any loader or recipe error. Nothing partial is returned.
    pub fn catalog(&self) -> CraftResult<RecipeCatalog> {
        let mut catalog = RecipeCatalog::new();

        if let Some(path) = self.resolved_recipe_file() {
            catalog.load(load_recipe_file(&path)?)?;
        }

        for entry in &self.recipes {
            let requirements = entry
                .materials
                .iter()
                .map(|m| Requirement::new(Material::named(m.name.as_str()), m.quantity))
                .collect();
            catalog.push(Recipe::new(entry.name.as_str(), entry.success_rate, requirements)?);
        }

        Ok(catalog)
    }

    /// Builds the starting inventory.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for an entry with a blank name, `QuantityOverflow` if
    /// stacks of one material sum past `u32::MAX`.
    pub fn inventory(&self) -> CraftResult<Inventory> {
        let mut inventory = Inventory::new();
        for entry in &self.inventory {
            inventory.add(entry.material()?, entry.quantity)?;
        }
        Ok(inventory)
    }

    /// The configured roll source.
    #[must_use]
    pub fn rolls(&self) -> SeededRolls {
        self.seed
            .map_or_else(SeededRolls::from_entropy, SeededRolls::from_seed)
    }

    /// Builds a ready crafter.
    ///
    /// # Errors
    ///
    /// Any error from [`SessionConfig::catalog`] or [`SessionConfig::inventory`].
    pub fn build(&self) -> CraftResult<Crafter<SeededRolls>> {
        let catalog = self.catalog()?;
        let inventory = self.inventory()?;
        info!(
            recipes = catalog.len(),
            stacks = inventory.len(),
            seeded = self.seed.is_some(),
            "crafting session ready"
        );
        Ok(Crafter::new(catalog, inventory, self.rolls()))
    }
}
