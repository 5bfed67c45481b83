//! Dense reference implementation of a single sweep step.
//!
//! Uses Floyd-Warshall over an adjacency matrix, which is slow but simple
//! enough to trust for the small graphs the strategies generate.

use super::types::SweepFixture;

/// Metrics of one threshold computed by the oracle.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct OracleStep {
    pub giant_component_size: usize,
    pub component_count: usize,
    pub mean_distance: Option<f64>,
    pub included_edges: usize,
}

/// Evaluates `threshold` against `fixture` from first principles.
pub(super) fn oracle_step(fixture: &SweepFixture, threshold: f64) -> OracleStep {
    let n = fixture.node_count;
    let mut dist = vec![vec![f64::INFINITY; n]; n];
    for (node, row) in dist.iter_mut().enumerate() {
        row[node] = 0.0;
    }
    let mut included_edges = 0;
    for edge in fixture.edges.iter().filter(|edge| edge.criterion < threshold) {
        included_edges += 1;
        let (a, b) = (edge.left, edge.right);
        if edge.weight < dist[a][b] {
            dist[a][b] = edge.weight;
            dist[b][a] = edge.weight;
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let through = dist[i][k] + dist[k][j];
                if through < dist[i][j] {
                    dist[i][j] = through;
                }
            }
        }
    }

    let mut labels = vec![usize::MAX; n];
    let mut sizes = Vec::new();
    for node in 0..n {
        if labels[node] != usize::MAX {
            continue;
        }
        let label = sizes.len();
        let mut size = 0;
        for other in 0..n {
            if dist[node][other].is_finite() {
                labels[other] = label;
                size += 1;
            }
        }
        sizes.push(size);
    }

    let mut total = 0.0;
    let mut pairs = 0_u32;
    for i in 0..n {
        for j in (i + 1)..n {
            if dist[i][j].is_finite() {
                total += dist[i][j];
                pairs += 1;
            }
        }
    }

    OracleStep {
        giant_component_size: sizes.iter().copied().max().unwrap_or(0),
        component_count: sizes.len(),
        mean_distance: (pairs > 0).then(|| total / f64::from(pairs)),
        included_edges,
    }
}
