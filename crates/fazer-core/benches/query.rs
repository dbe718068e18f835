use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fazer_core::catalog::Catalog;
use fazer_core::model::{Category, CategoryFilter, Product, ProductId, SortOption};
use fazer_core::query::{QueryCache, QueryKey, run_query};

const TIERS: [(&str, usize); 3] = [("small", 50), ("medium", 1_000), ("large", 20_000)];

fn synthetic_catalog(size: usize) -> Catalog {
    let template = Catalog::seed().products()[0].clone();
    let products = (0..size)
        .map(|i| {
            let mut p: Product = template.clone();
            p.id = ProductId::new(format!("p{i}"));
            p.name = format!("Module {i}");
            p.price = ((i as u64).wrapping_mul(7919) % 5_000) + 1;
            p.rating = f64::from(u32::try_from(i % 50).unwrap_or(0)) / 10.0;
            p.category = Category::ALL[i % Category::ALL.len()];
            p.reviews.clear();
            p
        })
        .collect();
    Catalog::new(products, Vec::new()).expect("synthetic catalog is valid")
}

fn bench_run_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query.run");
    for (name, size) in TIERS {
        let catalog = synthetic_catalog(size);
        let key = QueryKey::new(Category::Audio.into(), "module", SortOption::PriceAsc);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &catalog, |b, catalog| {
            b.iter(|| black_box(run_query(catalog, &key).len()));
        });
    }
    group.finish();
}

fn bench_cached_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query.cached");
    for (name, size) in TIERS {
        let catalog = synthetic_catalog(size);
        let key = QueryKey::new(CategoryFilter::All, "", SortOption::RatingDesc);
        let mut cache = QueryCache::new();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| black_box(cache.get(&catalog, &key).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_run_query, bench_cached_query);
criterion_main!(benches);
