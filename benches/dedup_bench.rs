//! Benchmarks for graph construction

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use frame_viz::prelude::*;

/// Generate the line geometry of a multi-storey frame, in millimetres
fn multi_storey_segments(storeys: usize, bays: usize) -> Vec<LineSegment> {
    let storey_height = 3000.0;
    let bay_width = 5000.0;
    let mut segments = Vec::new();

    // Columns
    for storey in 0..storeys {
        for bay in 0..=bays {
            let x = bay as f64 * bay_width;
            let z = storey as f64 * storey_height;
            segments.push(LineSegment::new([x, 0.0, z], [x, 0.0, z + storey_height]));
        }
    }

    // Beams
    for storey in 1..=storeys {
        for bay in 0..bays {
            let x = bay as f64 * bay_width;
            let z = storey as f64 * storey_height;
            segments.push(LineSegment::new([x, 0.0, z], [x + bay_width, 0.0, z]));
        }
    }

    segments
}

fn bench_graph_construction(c: &mut Criterion) {
    let small = multi_storey_segments(5, 4);
    let large = multi_storey_segments(40, 20);

    c.bench_function("graph_5x4_exact", |b| {
        b.iter(|| {
            FrameGraph::from_segments(black_box(&small), MM_PER_M, MergePolicy::Exact)
        })
    });

    c.bench_function("graph_40x20_exact", |b| {
        b.iter(|| {
            FrameGraph::from_segments(black_box(&large), MM_PER_M, MergePolicy::Exact)
        })
    });

    c.bench_function("graph_40x20_snap", |b| {
        b.iter(|| {
            FrameGraph::from_segments(
                black_box(&large),
                MM_PER_M,
                MergePolicy::Snap { tolerance: 1e-6 },
            )
        })
    });
}

fn bench_model_build(c: &mut Criterion) {
    let segments = multi_storey_segments(40, 20);
    let graph = FrameGraph::from_segments(&segments, MM_PER_M, MergePolicy::Exact);
    let loads = [LoadEntry::force(100.0, LoadDirection::X, "node_0_0_3")];

    c.bench_function("model_40x20", |b| {
        b.iter(|| FrameModel::from_graph(black_box(&graph), black_box(&loads)))
    });
}

criterion_group!(benches, bench_graph_construction, bench_model_build);
criterion_main!(benches);
