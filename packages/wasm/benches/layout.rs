use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use particle_graph::layout::RepulsionMode;
use particle_graph::{Edge, ForceLayout, LayoutConfig, Node};
use std::hint::black_box;

/// Nodes on a phyllotaxis spiral with a ring plus a few chords, roughly what
/// a firehose snapshot looks like after a few seconds of ingestion.
fn build_graph(node_count: usize) -> (Vec<Node>, Vec<Edge>) {
    let golden = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    let nodes = (0..node_count)
        .map(|i| {
            let r = (i as f32).sqrt() * 0.1;
            let t = i as f32 * golden;
            Node::new(r * t.cos(), r * t.sin())
        })
        .collect();

    let n = node_count as u32;
    let mut edges: Vec<Edge> = (0..n).map(|i| Edge::new(i, (i + 1) % n)).collect();
    edges.extend((0..n).step_by(7).map(|i| Edge::new(i, (i * 13 + 5) % n)));

    (nodes, edges)
}

fn bench_layout_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_pass");

    let modes = [
        ("exact", RepulsionMode::Exact),
        ("cutoff", RepulsionMode::Cutoff { radius: 0.5 }),
    ];

    for node_count in [100usize, 500, 2000] {
        let (nodes, edges) = build_graph(node_count);

        for (name, mode) in modes {
            let layout = ForceLayout::new(LayoutConfig {
                attraction: 0.05,
                repulsion_mode: mode,
                ..LayoutConfig::default()
            })
            .unwrap();

            group.bench_with_input(BenchmarkId::new(name, node_count), &nodes, |b, nodes| {
                b.iter_batched(
                    || nodes.clone(),
                    |mut nodes| {
                        let stats = layout.run(&mut nodes, &edges).unwrap();
                        black_box(stats);
                        nodes
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_layout_pass);
criterion_main!(benches);
