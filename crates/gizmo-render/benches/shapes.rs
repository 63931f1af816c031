//! Benchmarks for gizmo shape generation

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use gizmo_render::{Color, GizmoBatch, GizmoBox, GizmoCylinder, GizmoSphere};
use glam::{Mat4, Vec3};

fn bench_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_sphere");
    let mut batch = GizmoBatch::new(1 << 16, 1 << 16);

    for resolution in [8u32, 16, 32, 64] {
        group.throughput(Throughput::Elements((resolution * resolution * 2) as u64));

        let sphere = GizmoSphere::new(Vec3::ZERO, 1.0, resolution, resolution * 2)
            .with_transform(Mat4::from_rotation_x(0.3));
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            &sphere,
            |b, sphere| {
                b.iter(|| {
                    batch.clear();
                    batch.add_sphere(black_box(sphere));
                });
            },
        );
    }

    group.finish();
}

fn bench_cylinder(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_cylinder");
    let mut batch = GizmoBatch::new(1 << 16, 1 << 16);

    for segments in [8u32, 32, 128] {
        group.throughput(Throughput::Elements(segments as u64));

        let cylinder = GizmoCylinder::new(Vec3::ZERO, 1.0, 2.0, segments).filled(Color::GREEN);
        group.bench_with_input(
            BenchmarkId::from_parameter(segments),
            &cylinder,
            |b, cylinder| {
                b.iter(|| {
                    batch.clear();
                    batch.add_cylinder(black_box(cylinder));
                });
            },
        );
    }

    group.finish();
}

fn bench_boxes(c: &mut Criterion) {
    let mut batch = GizmoBatch::new(1 << 16, 1 << 16);
    let boxes: Vec<GizmoBox> = (0..1000)
        .map(|i| {
            GizmoBox::new(Vec3::splat(i as f32), Vec3::ONE)
                .with_transform(Mat4::from_rotation_y(i as f32 * 0.01))
        })
        .collect();

    c.bench_function("add_box_1000", |b| {
        b.iter(|| {
            batch.clear();
            for shape in &boxes {
                black_box(batch.add_box(shape));
            }
        });
    });
}

criterion_group!(benches, bench_sphere, bench_cylinder, bench_boxes);
criterion_main!(benches);
