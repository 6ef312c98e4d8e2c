use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use d3e_dismantle::{
    catalog::DismantlingCatalog,
    checklist::{ChecklistGenerator, ChecklistRequest},
    components::{decompose_all, Component, EquipmentItem},
    matcher::CategoryMatcher,
};

const BUNDLED_CATALOG: &str = include_str!("../data/dismantling_catalog.json");

fn bench_category_match(c: &mut Criterion) {
    let catalog = DismantlingCatalog::from_json(BUNDLED_CATALOG).unwrap();
    let matcher = CategoryMatcher::with_defaults(Arc::new(catalog));

    c.bench_function("matcher.find_best_match", |b| {
        b.iter(|| matcher.find_best_match(black_box("Écrans / Moniteurs (LCD) - lot mixte")));
    });

    c.bench_function("matcher.rank", |b| {
        b.iter(|| matcher.rank(black_box("Ordinateurs portables"), 5));
    });
}

fn bench_checklist_generation(c: &mut Criterion) {
    let generator = ChecklistGenerator::new();
    let laptop = ChecklistRequest::new(
        "equipements-informatiques",
        "ordinateurs-portables",
        vec![
            Component::new("batterie-lithium", 0.3, "lithium-ion"),
            Component::new("ecran-lcd", 0.5, "verre-lcd"),
            Component::new("carte-mere", 0.2, "pcb"),
            Component::new("coque-plastique", 0.8, "plastique-abs"),
        ],
    );

    c.bench_function("checklist.generate.laptop", |b| {
        b.iter(|| generator.generate(black_box(&laptop)));
    });

    let equipment: Vec<EquipmentItem> = (0..50)
        .map(|i| EquipmentItem::new(format!("Unité centrale #{}", i)))
        .collect();
    let lot = ChecklistRequest::new(
        "equipements-informatiques",
        "",
        decompose_all(&equipment, "Ordinateurs"),
    );

    c.bench_function("checklist.generate.fifty_desktops", |b| {
        b.iter(|| generator.generate(black_box(&lot)));
    });
}

criterion_group!(benches, bench_category_match, bench_checklist_generation);
criterion_main!(benches);
