
use super::types::{BatchCellConfig, BatchSizing, Connection, GridRect, TaskCellConfig};
use super::{LayoutError, LayoutMap, layout};

/// Helper to build a connection list from (from, to) pairs.
fn conns(pairs: &[(u64, u64)]) -> Vec<Connection> {
    pairs
        .iter()
        .map(|&(from, to)| Connection::new(from, to))
        .collect()
}

/// Lay out with the default fixed task cells.
fn task_layout(nodes: &[u64], pairs: &[(u64, u64)]) -> LayoutMap {
    layout(nodes, &conns(pairs), &TaskCellConfig::default()).expect("layout should succeed")
}

/// Batch sizing with explicit per-node sizes.
fn batch_sizing(sizes: &[(u64, f64, f64)]) -> BatchSizing {
    let mut sizing = BatchSizing::new(BatchCellConfig::default(), (100.0, 100.0));
    for &(id, w, h) in sizes {
        sizing.insert(id, w, h);
    }
    sizing
}

/// Strict rect overlap; touching edges do not count.
fn overlapping(a: &GridRect, b: &GridRect) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// Assert that no two rects in the layout overlap.
fn assert_no_overlap(layouts: &LayoutMap) {
    let rects: Vec<(&u64, &GridRect)> = layouts.iter().collect();
    for (i, (id_a, a)) in rects.iter().enumerate() {
        for (id_b, b) in rects.iter().skip(i + 1) {
            assert!(
                !overlapping(a, b),
                "nodes {id_a} and {id_b} overlap: {a:?} vs {b:?}"
            );
        }
    }
}
