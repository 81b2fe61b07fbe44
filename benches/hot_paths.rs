//! Benchmarks for per-frame work: view resolution and map rasterization

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use worldcup_map::data::generate_simple_world;
use worldcup_map::map::{MapRenderer, Viewport};
use worldcup_map::view::{resolve_current, MapType, Selection};

fn selections() -> [(&'static str, Selection); 2] {
    [
        ("aggregate", Selection::default()),
        (
            "by_year",
            Selection {
                map_type: MapType::ByYear,
                selected_year: 1978,
            },
        ),
    ]
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("view/resolve");
    for (name, selection) in selections() {
        group.bench_function(name, |b| {
            b.iter(|| resolve_current(black_box(selection)).unwrap())
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut renderer = MapRenderer::new();
    generate_simple_world(&mut renderer);
    let figure = resolve_current(Selection::default()).unwrap().map;

    let mut group = c.benchmark_group("map/render");
    for (cols, rows) in [(80, 24), (160, 48), (320, 96)] {
        let viewport = Viewport::world(cols * 2, rows * 4);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", cols, rows)),
            &(cols, rows),
            |b, &(cols, rows)| {
                b.iter(|| renderer.render(cols, rows, black_box(&viewport), black_box(&figure)))
            },
        );
    }
    group.finish();

    let mut zoomed = Viewport::world(320, 192);
    for _ in 0..6 {
        zoomed.zoom_in_at(110, 140);
    }
    c.bench_function("map/render_zoomed", |b| {
        b.iter(|| renderer.render(160, 48, black_box(&zoomed), black_box(&figure)))
    });
}

criterion_group!(benches, bench_resolve, bench_render);
criterion_main!(benches);
