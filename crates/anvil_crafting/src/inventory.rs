//! # Inventory Ledger
//!
//! Quantities of owned materials, keyed by [`Material`] identity.
//!
//! The ledger is a list of stacks searched linearly, because material
//! identity is not transitive and cannot be hashed faithfully. A query
//! counts every stack that matches it, and a removal drains matching stacks
//! in ledger order, so [`Inventory::quantity_of`] and [`Inventory::remove`]
//! always agree about what is available.

use tracing::trace;

use crate::error::{CraftError, CraftResult};
use crate::material::Material;

/// A quantity of one material held in the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack {
    /// The material held.
    pub material: Material,
    /// Quantity held. Emptied stacks are dropped from the ledger.
    pub quantity: u32,
}

/// Quantity ledger of owned materials.
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    stacks: Vec<Stack>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total quantity of everything that counts as `material`. 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, material: &Material) -> u32 {
        self.stacks
            .iter()
            .filter(|s| s.material == *material)
            .fold(0u32, |acc, s| acc.saturating_add(s.quantity))
    }

    /// Adds to the first matching stack, or opens a new one.
    ///
    /// # Errors
    ///
    /// Returns `QuantityOverflow` if the stack would exceed `u32::MAX`; the
    /// ledger is left unchanged.
    pub fn add(&mut self, material: Material, amount: u32) -> CraftResult<()> {
        if amount == 0 {
            return Ok(());
        }

        match self.stacks.iter_mut().find(|s| s.material == material) {
            Some(stack) => {
                let have = stack.quantity;
                stack.quantity = have.checked_add(amount).ok_or_else(|| {
                    CraftError::QuantityOverflow {
                        material: material.name().to_string(),
                        have,
                        amount,
                    }
                })?;
            }
            None => self.stacks.push(Stack {
                material,
                quantity: amount,
            }),
        }

        Ok(())
    }

    /// Builds a ledger from `(material, quantity)` pairs, merging matches.
    ///
    /// # Errors
    ///
    /// `QuantityOverflow` if matching pairs sum past `u32::MAX`.
    pub fn from_stacks<I>(stacks: I) -> CraftResult<Self>
    where
        I: IntoIterator<Item = (Material, u32)>,
    {
        let mut inventory = Self::new();
        for (material, amount) in stacks {
            inventory.add(material, amount)?;
        }
        Ok(inventory)
    }

    /// Removes `amount` of `material` if at least that much is held.
    ///
    /// Returns `false` and leaves the ledger untouched when there is not
    /// enough. Removing 0 always succeeds.
    #[must_use = "a refused removal leaves the ledger unchanged"]
    pub fn remove(&mut self, material: &Material, amount: u32) -> bool {
        let available = self.quantity_of(material);
        if available < amount {
            trace!(%material, amount, available, "remove refused");
            return false;
        }

        let mut remaining = amount;
        for stack in &mut self.stacks {
            if remaining == 0 {
                break;
            }
            if stack.material == *material {
                let taken = stack.quantity.min(remaining);
                stack.quantity -= taken;
                remaining -= taken;
            }
        }

        self.stacks.retain(|s| s.quantity > 0);
        true
    }

    /// Stacks in the order they were first added.
    #[inline]
    #[must_use]
    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    /// Number of distinct stacks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Returns true if nothing is held.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iron() -> Material {
        Material::new(1, "Iron")
    }

    fn wood() -> Material {
        Material::new(2, "Wood")
    }

    #[test]
    fn test_add_and_query() {
        let mut inv = Inventory::new();
        inv.add(iron(), 10).unwrap();
        inv.add(Material::named("IRON"), 5).unwrap();
        assert_eq!(inv.quantity_of(&iron()), 15);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.quantity_of(&wood()), 0);
    }

    #[test]
    fn test_name_match_lookup() {
        let mut inv = Inventory::new();
        inv.add(Material::new(5, "Gold"), 3).unwrap();
        assert_eq!(inv.quantity_of(&Material::new(7, "gold")), 3);
    }

    #[test]
    fn test_remove_items() {
        let mut inv = Inventory::new();
        inv.add(iron(), 100).unwrap();
        assert!(inv.remove(&iron(), 30));
        assert_eq!(inv.quantity_of(&iron()), 70);
    }

    #[test]
    fn test_remove_insufficient_leaves_ledger() {
        let mut inv = Inventory::new();
        inv.add(iron(), 10).unwrap();
        assert!(!inv.remove(&iron(), 20));
        assert_eq!(inv.quantity_of(&iron()), 10);
        assert!(!inv.remove(&wood(), 1));
    }

    #[test]
    fn test_remove_zero_is_noop() {
        let mut inv = Inventory::new();
        assert!(inv.remove(&wood(), 0));
        inv.add(iron(), 4).unwrap();
        assert!(inv.remove(&iron(), 0));
        assert_eq!(inv.quantity_of(&iron()), 4);
    }

    #[test]
    fn test_remove_drains_every_matching_stack() {
        let mut inv = Inventory::new();
        inv.add(Material::new(1, "Iron"), 2).unwrap();
        inv.add(Material::new(2, "Steel"), 3).unwrap();

        // Matches the first by id and the second by name.
        let query = Material::new(1, "steel");
        assert_eq!(inv.quantity_of(&query), 5);
        assert!(inv.remove(&query, 4));
        assert_eq!(inv.quantity_of(&query), 1);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_emptied_stack_is_dropped() {
        let mut inv = Inventory::new();
        inv.add(iron(), 2).unwrap();
        inv.add(wood(), 1).unwrap();
        assert!(inv.remove(&iron(), 2));
        assert_eq!(inv.stacks().len(), 1);
        assert_eq!(inv.stacks()[0].material.name(), "Wood");
    }

    #[test]
    fn test_add_overflow_is_rejected() {
        let mut inv = Inventory::new();
        inv.add(iron(), u32::MAX).unwrap();
        let err = inv.add(iron(), 1).unwrap_err();
        assert!(matches!(err, CraftError::QuantityOverflow { have, amount: 1, .. } if have == u32::MAX));
        assert_eq!(inv.quantity_of(&iron()), u32::MAX);
    }

    #[test]
    fn test_from_stacks_merges_pairs() {
        let inv = Inventory::from_stacks([(iron(), 3), (wood(), 5), (iron(), 1)]).unwrap();
        assert_eq!(inv.quantity_of(&iron()), 4);
        assert_eq!(inv.quantity_of(&wood()), 5);
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn test_from_stacks_reports_overflow() {
        let err = Inventory::from_stacks([(iron(), u32::MAX), (Material::named("iron"), 5)])
            .unwrap_err();
        assert!(matches!(err, CraftError::QuantityOverflow { have, amount: 5, .. } if have == u32::MAX));
    }
}
