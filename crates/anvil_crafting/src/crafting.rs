//! # Crafting Resolver
//!
//! **Lookup, validation, reserved consumption, weighted roll.**
//!
//! A craft runs as one linear sequence with no suspension points:
//!
//! 1. **Lookup**: first recipe whose name matches ignoring case
//! 2. **Validation**: read-only, in requirement order, stops at the first
//!    material that is missing or short
//! 3. **Consumption**: every requirement is removed from a scratch copy of
//!    the ledger, which replaces the real one only if all removals succeed
//! 4. **Roll**: one uniform draw; below the success rate succeeds
//!
//! Success and failure both consume. A [`CraftOutcome::ConsumptionFailed`]
//! means validation and consumption disagreed, which only pathological
//! material identities can cause; the ledger is left as it was.
//!
//! ## Example
//!
//! ```rust
//! use anvil_crafting::{Crafter, FixedRoll, Inventory, Material, Recipe, RecipeCatalog, Requirement};
//!
//! let mut catalog = RecipeCatalog::new();
//! catalog.push(Recipe::new(
//!     "Sword",
//!     0.5,
//!     vec![
//!         Requirement::new(Material::named("Iron"), 2),
//!         Requirement::new(Material::named("Wood"), 1),
//!     ],
//! )?);
//!
//! let inventory =
//!     Inventory::from_stacks([(Material::named("Iron"), 3), (Material::named("Wood"), 5)])?;
//!
//! let mut crafter = Crafter::new(catalog, inventory, FixedRoll(0.1));
//! assert_eq!(crafter.craft("sword").to_string(), "Crafting 'Sword' succeeded!");
//! # Ok::<(), anvil_crafting::CraftError>(())
//! ```

use std::fmt;

use tracing::{debug, info, warn};

use crate::inventory::Inventory;
use crate::material::Material;
use crate::recipe::{Recipe, RecipeCatalog};
use crate::roll::RollSource;

/// The classified result of one crafting attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CraftOutcome {
    /// No recipe has that name.
    NotFound,
    /// A required material is not held at all.
    MissingMaterial(Material),
    /// A required material is held, but not enough of it.
    InsufficientMaterial {
        /// The short material.
        material: Material,
        /// Quantity the recipe requires.
        need: u32,
        /// Quantity held.
        have: u32,
    },
    /// Removal failed after validation passed. Nothing was consumed.
    ConsumptionFailed,
    /// Materials consumed and the roll succeeded.
    Success(String),
    /// Materials consumed and the roll failed.
    Failure(String),
}

impl CraftOutcome {
    /// Returns true if materials were taken from the inventory.
    #[must_use]
    pub const fn consumed_materials(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure(_))
    }

    /// Returns true for [`CraftOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl fmt::Display for CraftOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("Recipe not found."),
            Self::MissingMaterial(material) => write!(f, "Missing material: {material}"),
            Self::InsufficientMaterial {
                material,
                need,
                have,
            } => write!(f, "Not enough {material} (need {need}, have {have})"),
            Self::ConsumptionFailed => f.write_str("Not enough materials"),
            Self::Success(name) => write!(f, "Crafting '{name}' succeeded!"),
            Self::Failure(name) => write!(f, "Crafting '{name}' failed. Materials lost."),
        }
    }
}

/// Resolves crafts against a catalog and an inventory.
///
/// Owns the roll source for its whole lifetime; it is never recreated
/// between crafts.
#[derive(Debug)]
pub struct Crafter<R> {
    catalog: RecipeCatalog,
    inventory: Inventory,
    rolls: R,
}

impl<R: RollSource> Crafter<R> {
    /// Creates a crafter.
    #[must_use]
    pub fn new(catalog: RecipeCatalog, inventory: Inventory, rolls: R) -> Self {
        Self {
            catalog,
            inventory,
            rolls,
        }
    }

    /// The recipe catalog.
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    /// The inventory.
    #[inline]
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable inventory, for restocking between crafts.
    #[inline]
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Splits the crafter back into its parts.
    #[must_use]
    pub fn into_parts(self) -> (RecipeCatalog, Inventory, R) {
        (self.catalog, self.inventory, self.rolls)
    }

    /// Runs lookup and validation only.
    ///
    /// Returns `None` if `recipe_name` could be crafted right now, otherwise
    /// the outcome a craft would stop with. Does not roll.
    #[must_use]
    pub fn check(&self, recipe_name: &str) -> Option<CraftOutcome> {
        match self.catalog.find_by_name(recipe_name) {
            None => Some(CraftOutcome::NotFound),
            Some(recipe) => validate(recipe, &self.inventory),
        }
    }

    /// Attempts one craft.
    pub fn craft(&mut self, recipe_name: &str) -> CraftOutcome {
        let Some(recipe) = self.catalog.find_by_name(recipe_name) else {
            debug!(recipe = recipe_name, "recipe not found");
            return CraftOutcome::NotFound;
        };

        if let Some(blocked) = validate(recipe, &self.inventory) {
            debug!(recipe = recipe.name(), outcome = %blocked, "validation failed");
            return blocked;
        }

        let Some(committed) = consume(recipe, &self.inventory) else {
            warn!(
                recipe = recipe.name(),
                "consumption failed after validation passed; inventory left unchanged"
            );
            return CraftOutcome::ConsumptionFailed;
        };
        self.inventory = committed;

        let roll = self.rolls.roll();
        let outcome = if roll < recipe.success_rate() {
            CraftOutcome::Success(recipe.name().to_string())
        } else {
            CraftOutcome::Failure(recipe.name().to_string())
        };

        info!(
            recipe = recipe.name(),
            roll,
            success_rate = recipe.success_rate(),
            success = outcome.is_success(),
            "craft resolved"
        );
        outcome
    }
}

/// Read-only sufficiency check, stopping at the first deficient material.
fn validate(recipe: &Recipe, inventory: &Inventory) -> Option<CraftOutcome> {
    recipe.requirements().iter().find_map(|req| {
        let have = inventory.quantity_of(&req.material);
        if have >= req.quantity {
            None
        } else if have == 0 {
            Some(CraftOutcome::MissingMaterial(req.material.clone()))
        } else {
            Some(CraftOutcome::InsufficientMaterial {
                material: req.material.clone(),
                need: req.quantity,
                have,
            })
        }
    })
}

/// Removes every requirement from a scratch ledger.
///
/// Returns the scratch ledger to commit, or `None` if any removal failed.
fn consume(recipe: &Recipe, inventory: &Inventory) -> Option<Inventory> {
    let mut scratch = inventory.clone();
    recipe
        .requirements()
        .iter()
        .all(|req| scratch.remove(&req.material, req.quantity))
        .then_some(scratch)
}
