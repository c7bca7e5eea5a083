use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use painted_galaxy_logic::applier::apply_actions;
use painted_galaxy_logic::constants::canvas;
use painted_galaxy_logic::density::PixelGrid;
use painted_galaxy_logic::generator::{generate_hyperlanes, generate_solar_systems};
use painted_galaxy_logic::project::{Canvas, Project};
use painted_galaxy_logic::settings::GeneratorSettings;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn project(number_of_systems: u32) -> Project {
    Project::new("bench", Canvas::default())
        .expect("valid name")
        .with_generator_settings(GeneratorSettings {
            number_of_systems,
            ..GeneratorSettings::default()
        })
}

fn bench_placement(c: &mut Criterion) {
    let pixels = PixelGrid::filled(canvas::WIDTH, canvas::HEIGHT, [255, 255, 255, 255]);
    let mut group = c.benchmark_group("placement");
    group.sample_size(20);

    for systems in [200u32, 600, 1000] {
        group.bench_with_input(BenchmarkId::new("systems", systems), &systems, |b, &systems| {
            let project = project(systems);
            b.iter_batched(
                || StdRng::seed_from_u64(7),
                |mut rng| generate_solar_systems(&project, &pixels, &mut rng),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_hyperlanes(c: &mut Criterion) {
    let pixels = PixelGrid::filled(canvas::WIDTH, canvas::HEIGHT, [255, 255, 255, 255]);
    let mut group = c.benchmark_group("hyperlanes");
    group.sample_size(20);

    for systems in [200u32, 600, 1000] {
        let base = project(systems);
        let placed = apply_actions(
            &base,
            &generate_solar_systems(&base, &pixels, &mut StdRng::seed_from_u64(7)),
        );
        group.bench_with_input(BenchmarkId::new("systems", systems), &placed, |b, placed| {
            b.iter_batched(
                || StdRng::seed_from_u64(11),
                |mut rng| generate_hyperlanes(placed, &mut rng),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(generation_benches, bench_placement, bench_hyperlanes);
criterion_main!(generation_benches);
