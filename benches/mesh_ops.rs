use criterion::{
    criterion_group, criterion_main, black_box, BatchSize, Criterion,
};

use editmesh::{
    prelude::*,
    shape::{Disc, Sphere},
};


fn big_disc() -> Mesh {
    Disc { faces: 512, ..Disc::default() }.build()
}


// ===============================================================================================
// ===== Benchmarks
// ===============================================================================================

/// Switch between all selection modes, rebuilding the cache each time.
fn switch_selection_mode(c: &mut Criterion) {
    c.bench_function("switch_selection_mode", |b| {
        let mut mesh = big_disc();
        mesh.set_selection_mode(SelectionMode::Triangles);
        mesh.select_all(true);

        b.iter(|| {
            mesh.set_selection_mode(SelectionMode::Edges);
            mesh.set_selection_mode(SelectionMode::Vertices);
            mesh.set_selection_mode(SelectionMode::Triangles);
            black_box(mesh.selected_count());
        })
    });
}

/// Extrude every triangle of the disc at once.
fn extrude_disc(c: &mut Criterion) {
    c.bench_function("extrude_disc", |b| {
        let mut mesh = big_disc();
        mesh.set_selection_mode(SelectionMode::Triangles);
        mesh.select_all(true);

        b.iter_batched(
            || mesh.clone(),
            |mut mesh| {
                mesh.extrude_selected();
                mesh
            },
            BatchSize::SmallInput,
        )
    });
}

/// Collapse the whole disc into a single point.
fn merge_disc(c: &mut Criterion) {
    c.bench_function("merge_disc", |b| {
        let mut mesh = big_disc();
        mesh.select_all(true);

        b.iter_batched(
            || mesh.clone(),
            |mut mesh| {
                mesh.merge_selected();
                mesh
            },
            BatchSize::SmallInput,
        )
    });
}

/// Build a dense sphere and select all of its triangles.
fn build_sphere(c: &mut Criterion) {
    c.bench_function("build_sphere", |b| {
        b.iter(|| {
            let mut mesh = Sphere { num_latitudes: 64, num_longitudes: 96, ..Sphere::default() }.build();
            mesh.set_selection_mode(SelectionMode::Triangles);
            mesh.select_all(true);
            mesh
        })
    });
}

/// Turn all inner edges of the disc.
fn turn_disc_edges(c: &mut Criterion) {
    c.bench_function("turn_disc_edges", |b| {
        let mut mesh = big_disc();
        mesh.set_selection_mode(SelectionMode::Edges);
        mesh.select_all(true);

        b.iter_batched(
            || mesh.clone(),
            |mut mesh| {
                mesh.flip_selected();
                mesh
            },
            BatchSize::SmallInput,
        )
    });
}


criterion_group!(benches,
    switch_selection_mode,
    build_sphere,
    extrude_disc,
    merge_disc,
    turn_disc_edges,
);
criterion_main!(benches);
