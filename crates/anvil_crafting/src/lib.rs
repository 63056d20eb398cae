//! # Anvil Crafting
//!
//! Resolves crafting actions: find a recipe by name, check the inventory
//! holds what it needs, consume those materials as one unit, then roll
//! against the recipe's success rate.
//!
//! ## Design Principles
//!
//! 1. **Union identity** - materials match by id *or* by case-insensitive name
//! 2. **Fail fast, read only** - validation reports the first shortfall and
//!    never mutates
//! 3. **All-or-nothing consumption** - removals run on a scratch ledger that
//!    is committed whole
//! 4. **Injected randomness** - one roll source per session, reused for
//!    every craft
//!
//! ## Example
//!
//! ```rust,ignore
//! use anvil_crafting::SessionConfig;
//!
//! let mut crafter = SessionConfig::from_file("data/session.toml")?.build()?;
//! println!("{}", crafter.craft("Sword"));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod crafting;
pub mod error;
pub mod inventory;
pub mod loader;
pub mod material;
pub mod recipe;
pub mod roll;

pub use config::SessionConfig;
pub use crafting::{CraftOutcome, Crafter};
pub use error::{CraftError, CraftResult};
pub use inventory::{Inventory, Stack};
pub use loader::{load_recipe_file, parse_records};
pub use material::{Material, MaterialId};
pub use recipe::{Recipe, RecipeCatalog, RecipeRecord, Requirement};
pub use roll::{FixedRoll, RollSource, ScriptedRolls, SeededRolls};
