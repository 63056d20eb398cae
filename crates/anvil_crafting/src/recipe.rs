//! # Recipe Catalog
//!
//! An insertion-ordered list of recipes with case-insensitive name lookup.
//!
//! Recipes arrive either as already-typed values ([`RecipeCatalog::push`],
//! used by the session config) or as [`RecipeRecord`]s whose numeric fields
//! are still text ([`RecipeCatalog::load`], used by the flat-file loader).
//! Both paths go through [`Recipe::new`], which enforces the invariants:
//!
//! 1. **Rate**: the success rate is finite and within `[0, 1]`
//! 2. **Requirements**: every material is named and every quantity is at least 1
//! 3. **Unique keys**: no two requirements are the same material

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::error::{CraftError, CraftResult};
use crate::material::{names_match, Material};

/// One required material and its quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requirement {
    /// The material consumed.
    pub material: Material,
    /// Quantity consumed per craft.
    pub quantity: u32,
}

impl Requirement {
    /// Creates a new requirement.
    #[inline]
    #[must_use]
    pub const fn new(material: Material, quantity: u32) -> Self {
        Self { material, quantity }
    }
}

/// A named transformation with a success probability.
#[derive(Clone, Debug)]
pub struct Recipe {
    name: String,
    success_rate: f64,
    requirements: Vec<Requirement>,
}

impl Recipe {
    /// Creates a recipe, validating its invariants.
    ///
    /// # Errors
    ///
    /// - `InvalidRecipe` if the name is blank, the rate is outside `[0, 1]`,
    ///   a material name is blank, or a quantity is zero
    /// - `DuplicateMaterial` if two requirements are the same material
    pub fn new(
        name: impl Into<String>,
        success_rate: f64,
        requirements: Vec<Requirement>,
    ) -> CraftResult<Self> {
        let name = name.into();
        let invalid = |reason: String| CraftError::InvalidRecipe {
            recipe: name.clone(),
            reason,
        };

        if name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }
        if !(0.0..=1.0).contains(&success_rate) {
            return Err(invalid(format!(
                "success rate {success_rate} is outside [0, 1]"
            )));
        }

        for (i, req) in requirements.iter().enumerate() {
            if req.material.name().trim().is_empty() {
                return Err(invalid(format!(
                    "requirement {} has no material name",
                    i + 1
                )));
            }
            if req.quantity == 0 {
                return Err(invalid(format!(
                    "quantity of {} must be at least 1",
                    req.material
                )));
            }
            if requirements[..i].iter().any(|r| r.material == req.material) {
                return Err(CraftError::DuplicateMaterial {
                    recipe: name,
                    material: req.material.name().to_string(),
                });
            }
        }

        Ok(Self {
            name,
            success_rate,
            requirements,
        })
    }

    /// The recipe name as written in its source.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Probability in `[0, 1]` that a craft succeeds.
    #[inline]
    #[must_use]
    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }

    /// Required materials, in source order.
    #[inline]
    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Ordinal (byte-wise) comparison of names.
    #[must_use]
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name.as_bytes().cmp(other.name.as_bytes())
    }
}

/// A recipe as handed over by a loader, numeric fields still as text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeRecord {
    /// Recipe name.
    pub name: String,
    /// Success rate, unparsed.
    pub success_rate: String,
    /// `(material name, quantity)` pairs, unparsed, in source order.
    pub materials: Vec<(String, String)>,
    /// 1-based source line, when the record came from a file.
    pub line: Option<usize>,
}

impl RecipeRecord {
    /// Parses the numeric fields into a [`Recipe`].
    ///
    /// Each material is built fresh with [`Material::named`].
    ///
    /// # Errors
    ///
    /// `Parse` naming the offending field, or any error from [`Recipe::new`].
    pub fn parse(&self) -> CraftResult<Recipe> {
        let name = self.name.trim();
        let raw_rate = self.success_rate.trim();
        let success_rate = raw_rate.parse::<f64>().map_err(|_| CraftError::Parse {
            field: format!("success rate of {name}"),
            value: raw_rate.to_string(),
            line: None,
        })?;

        let requirements = self
            .materials
            .iter()
            .map(|(material, quantity)| {
                let material = material.trim();
                let raw = quantity.trim();
                let quantity = raw.parse::<u32>().map_err(|_| CraftError::Parse {
                    field: format!("quantity of {material}"),
                    value: raw.to_string(),
                    line: None,
                })?;
                Ok(Requirement::new(Material::named(material), quantity))
            })
            .collect::<CraftResult<Vec<_>>>()?;

        Recipe::new(name, success_rate, requirements)
    }
}

/// Ordered collection of recipes.
#[derive(Clone, Debug, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an already-built recipe.
    pub fn push(&mut self, recipe: Recipe) {
        debug!(recipe = recipe.name(), "recipe added");
        self.recipes.push(recipe);
    }

    /// Parses and appends a batch of records, preserving their order.
    ///
    /// The load is all-or-nothing: if any record fails, nothing from the
    /// batch is appended.
    ///
    /// # Errors
    ///
    /// The first record error, tagged with its source line when known.
    pub fn load<I>(&mut self, records: I) -> CraftResult<usize>
    where
        I: IntoIterator<Item = RecipeRecord>,
    {
        let parsed = records
            .into_iter()
            .map(|record| {
                record
                    .parse()
                    .map_err(|e| match record.line {
                        Some(line) => e.at_line(line),
                        None => e,
                    })
            })
            .collect::<CraftResult<Vec<_>>>()?;

        let count = parsed.len();
        self.recipes.extend(parsed);
        info!(loaded = count, total = self.recipes.len(), "recipes loaded");
        Ok(count)
    }

    /// Finds the first recipe whose name matches ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| names_match(&r.name, name))
    }

    /// All recipes in insertion order.
    #[inline]
    #[must_use]
    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Iterates recipes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Recipes sorted by ordinal name comparison. Ties keep insertion order.
    #[must_use]
    pub fn sorted_by_name(&self) -> Vec<&Recipe> {
        let mut sorted: Vec<&Recipe> = self.recipes.iter().collect();
        sorted.sort_by(|a, b| a.cmp_by_name(b));
        sorted
    }

    /// Number of recipes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Returns true if there are no recipes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, rate: &str, materials: &[(&str, &str)]) -> RecipeRecord {
        RecipeRecord {
            name: name.to_string(),
            success_rate: rate.to_string(),
            materials: materials
                .iter()
                .map(|(m, q)| ((*m).to_string(), (*q).to_string()))
                .collect(),
            line: None,
        }
    }

    #[test]
    fn test_load_preserves_order() {
        let mut catalog = RecipeCatalog::new();
        let count = catalog
            .load(vec![
                record("Sword", "0.5", &[("Iron", "2"), ("Wood", "1")]),
                record("Axe", "0.8", &[("Iron", "1")]),
            ])
            .unwrap();

        assert_eq!(count, 2);
        let names: Vec<_> = catalog.iter().map(Recipe::name).collect();
        assert_eq!(names, ["Sword", "Axe"]);

        let sword = catalog.find_by_name("Sword").unwrap();
        assert_eq!(sword.requirements()[0].material.name(), "Iron");
        assert_eq!(sword.requirements()[0].quantity, 2);
        assert_eq!(sword.requirements()[1].material.name(), "Wood");
    }

    #[test]
    fn test_find_is_case_insensitive_first_match() {
        let mut catalog = RecipeCatalog::new();
        catalog
            .load(vec![
                record("Potion", "0.9", &[("Herb", "1")]),
                record("POTION", "0.1", &[("Herb", "5")]),
            ])
            .unwrap();

        let found = catalog.find_by_name("potion").unwrap();
        assert_eq!(found.name(), "Potion");
        assert!(catalog.find_by_name("Elixir").is_none());
    }

    #[test]
    fn test_bad_rate_names_field_and_aborts_load() {
        let mut catalog = RecipeCatalog::new();
        catalog.load(vec![record("Axe", "0.8", &[("Iron", "1")])]).unwrap();

        let mut bad = record("Sword", "half", &[("Iron", "2")]);
        bad.line = Some(3);
        let err = catalog
            .load(vec![record("Bow", "0.7", &[("Wood", "3")]), bad])
            .unwrap_err();

        match err {
            CraftError::Parse { field, value, line } => {
                assert_eq!(field, "success rate of Sword");
                assert_eq!(value, "half");
                assert_eq!(line, Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(catalog.len(), 1, "failed batch must not be appended");
    }

    #[test]
    fn test_bad_quantity_names_material() {
        let err = record("Sword", "0.5", &[("Iron", "-2")]).parse().unwrap_err();
        assert!(matches!(err, CraftError::Parse { ref field, .. } if field == "quantity of Iron"));
    }

    #[test]
    fn test_recipe_invariants() {
        let iron = || Material::named("Iron");

        assert!(matches!(
            Recipe::new("Sword", 1.5, vec![Requirement::new(iron(), 1)]),
            Err(CraftError::InvalidRecipe { .. })
        ));
        assert!(matches!(
            Recipe::new("Sword", f64::NAN, vec![Requirement::new(iron(), 1)]),
            Err(CraftError::InvalidRecipe { .. })
        ));
        assert!(matches!(
            Recipe::new("Sword", 0.5, vec![Requirement::new(iron(), 0)]),
            Err(CraftError::InvalidRecipe { .. })
        ));
        assert!(matches!(
            Recipe::new("  ", 0.5, vec![Requirement::new(iron(), 1)]),
            Err(CraftError::InvalidRecipe { .. })
        ));
        assert!(matches!(
            Recipe::new(
                "Sword",
                0.5,
                vec![
                    Requirement::new(iron(), 1),
                    Requirement::new(Material::new(9, "IRON"), 2),
                ]
            ),
            Err(CraftError::DuplicateMaterial { .. })
        ));
    }

    #[test]
    fn test_blank_material_name_is_rejected() {
        let err = record("Sword", "0.5", &[("Iron", "1"), ("  ", "2")])
            .parse()
            .unwrap_err();
        match err {
            CraftError::InvalidRecipe { recipe, reason } => {
                assert_eq!(recipe, "Sword");
                assert_eq!(reason, "requirement 2 has no material name");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            Recipe::new("Sword", 0.5, vec![Requirement::new(Material::new(4, ""), 1)]),
            Err(CraftError::InvalidRecipe { .. })
        ));
    }

    #[test]
    fn test_sorted_by_name_is_ordinal() {
        let mut catalog = RecipeCatalog::new();
        for name in ["bow", "Sword", "Axe"] {
            catalog.push(Recipe::new(name, 0.5, vec![]).unwrap());
        }

        let sorted: Vec<_> = catalog.sorted_by_name().into_iter().map(Recipe::name).collect();
        // Uppercase sorts before lowercase ordinally.
        assert_eq!(sorted, ["Axe", "Sword", "bow"]);
        let listed: Vec<_> = catalog.list().iter().map(Recipe::name).collect();
        assert_eq!(listed, ["bow", "Sword", "Axe"]);
    }
}
