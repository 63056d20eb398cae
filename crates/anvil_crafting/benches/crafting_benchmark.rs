//! Benchmark for crafting resolution performance.
//!
//! Run with: cargo bench --package anvil_crafting --bench crafting_benchmark

use anvil_crafting::{
    Crafter, FixedRoll, Inventory, Material, Recipe, RecipeCatalog, Requirement, SeededRolls,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn create_test_catalog() -> RecipeCatalog {
    let mut catalog = RecipeCatalog::new();

    // 100 recipes with varying complexity
    for i in 0..100u32 {
        let id = u64::from(i) * 10;
        let requirements = vec![
            Requirement::new(Material::new(id, format!("Ore_{i}")), i % 5 + 1),
            Requirement::new(Material::new(id + 1, format!("Fuel_{i}")), i % 3 + 1),
        ];
        catalog.push(Recipe::new(format!("Recipe_{i}"), 0.5, requirements).unwrap());
    }

    catalog
}

fn stocked_inventory() -> Inventory {
    let mut inventory = Inventory::new();
    for i in 0..100u32 {
        let id = u64::from(i) * 10;
        inventory.add(Material::new(id, format!("Ore_{i}")), 1_000).unwrap();
        inventory.add(Material::new(id + 1, format!("Fuel_{i}")), 1_000).unwrap();
    }
    inventory
}

fn benchmark_lookup(c: &mut Criterion) {
    let catalog = create_test_catalog();

    c.bench_function("find_by_name_last_of_100", |b| {
        b.iter(|| black_box(catalog.find_by_name(black_box("recipe_99"))));
    });
}

fn benchmark_check(c: &mut Criterion) {
    let crafter = Crafter::new(create_test_catalog(), stocked_inventory(), FixedRoll(0.0));

    c.bench_function("check_craftable", |b| {
        let mut i = 0u32;
        b.iter(|| {
            i = (i + 1) % 100;
            black_box(crafter.check(&format!("Recipe_{i}")))
        });
    });
}

fn benchmark_craft(c: &mut Criterion) {
    let catalog = create_test_catalog();
    let inventory = stocked_inventory();

    c.bench_function("craft_with_scratch_commit", |b| {
        b.iter(|| {
            let mut crafter =
                Crafter::new(catalog.clone(), inventory.clone(), SeededRolls::from_seed(1));
            black_box(crafter.craft("Recipe_50"))
        });
    });
}

criterion_group!(benches, benchmark_lookup, benchmark_check, benchmark_craft);
criterion_main!(benches);
