use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Rank assignment for a graph given as dense indices.
///
/// `forward[i]` is false for edges that were treated as back-edges (or
/// self-loops) while breaking cycles.
pub(super) struct Ranking {
    pub ranks: Vec<usize>,
    pub forward: Vec<bool>,
}

/// Longest-path ranking that tolerates cycles.
///
/// Nodes are taken in topological order, ties broken by index. When every
/// remaining node still has a pending predecessor the lowest-index one is
/// taken anyway and its pending incoming edges become back-edges. Sources
/// are then pulled down next to their nearest successor.
pub(super) fn compute_ranks(node_count: usize, edges: &[(usize, usize)]) -> Ranking {
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut indeg = vec![0usize; node_count];
    for &(from, to) in edges {
        if from == to || from >= node_count || to >= node_count {
            continue;
        }
        adj[from].push(to);
        indeg[to] += 1;
    }

    let mut ready: BinaryHeap<Reverse<usize>> = BinaryHeap::new();
    for (idx, deg) in indeg.iter().enumerate() {
        if *deg == 0 {
            ready.push(Reverse(idx));
        }
    }

    let mut order = Vec::with_capacity(node_count);
    let mut processed = vec![false; node_count];
    loop {
        while let Some(Reverse(id)) = ready.pop() {
            if processed[id] {
                continue;
            }
            order.push(id);
            processed[id] = true;
            for &next in &adj[id] {
                if processed[next] {
                    continue;
                }
                indeg[next] = indeg[next].saturating_sub(1);
                if indeg[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if order.len() >= node_count {
            break;
        }

        // Cycle: promote the earliest unprocessed node to a source.
        match processed.iter().position(|done| !done) {
            Some(idx) => ready.push(Reverse(idx)),
            None => break,
        }
    }

    let mut order_index = vec![0usize; node_count];
    for (pos, &id) in order.iter().enumerate() {
        order_index[id] = pos;
    }

    let forward: Vec<bool> = edges
        .iter()
        .map(|&(from, to)| {
            from != to
                && from < node_count
                && to < node_count
                && order_index[from] < order_index[to]
        })
        .collect();

    let mut ranks = vec![0usize; node_count];
    for &node in &order {
        let rank = ranks[node];
        for &next in &adj[node] {
            if order_index[next] <= order_index[node] {
                continue;
            }
            ranks[next] = ranks[next].max(rank + 1);
        }
    }

    let mut has_pred = vec![false; node_count];
    for (&(_, to), is_forward) in edges.iter().zip(&forward) {
        if *is_forward {
            has_pred[to] = true;
        }
    }
    for &node in order.iter().rev() {
        if has_pred[node] {
            continue;
        }
        let nearest = adj[node]
            .iter()
            .filter(|&&next| order_index[next] > order_index[node])
            .map(|&next| ranks[next])
            .min();
        if let Some(min_rank) = nearest {
            ranks[node] = min_rank.saturating_sub(1);
        }
    }

    if let Some(&lowest) = ranks.iter().min() {
        if lowest > 0 {
            for rank in &mut ranks {
                *rank -= lowest;
            }
        }
    }

    Ranking { ranks, forward }
}

/// Nodes bucketed per rank, with virtual nodes standing in for the
/// intermediate ranks of long edges.
pub(super) struct LayeredGraph {
    pub layers: Vec<Vec<usize>>,
    /// Edges between consecutive layers, oriented from the upper layer.
    pub segments: Vec<(usize, usize)>,
    pub real_count: usize,
    pub total_count: usize,
}

impl LayeredGraph {
    pub fn is_virtual(&self, id: usize) -> bool {
        id >= self.real_count
    }
}

pub(super) fn build_layers(
    node_count: usize,
    edges: &[(usize, usize)],
    ranks: &[usize],
) -> LayeredGraph {
    let depth = ranks.iter().copied().max().map_or(0, |max| max + 1);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); depth];
    for (idx, &rank) in ranks.iter().enumerate() {
        layers[rank].push(idx);
    }

    let mut segments = Vec::new();
    let mut next_virtual = node_count;
    for &(from, to) in edges {
        if from >= node_count || to >= node_count {
            continue;
        }
        // Back-edges are drawn against the flow, so orient by rank.
        let (upper, lower) = if ranks[from] <= ranks[to] {
            (from, to)
        } else {
            (to, from)
        };
        if ranks[upper] == ranks[lower] {
            continue;
        }
        let mut prev = upper;
        for rank in (ranks[upper] + 1)..ranks[lower] {
            let id = next_virtual;
            next_virtual += 1;
            layers[rank].push(id);
            segments.push((prev, id));
            prev = id;
        }
        segments.push((prev, lower));
    }

    LayeredGraph {
        layers,
        segments,
        real_count: node_count,
        total_count: next_virtual,
    }
}

/// Reorders every layer with alternating median sweeps, keeping the
/// ordering with the fewest crossings.
pub(super) fn order_layers(graph: &mut LayeredGraph, passes: usize) {
    if graph.layers.len() <= 1 {
        return;
    }
    let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); graph.total_count];
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); graph.total_count];
    for &(upper, lower) in &graph.segments {
        outgoing[upper].push(lower);
        incoming[lower].push(upper);
    }

    let mut positions = vec![0usize; graph.total_count];
    let update_positions = |layers: &[Vec<usize>], positions: &mut [usize]| {
        for bucket in layers {
            for (idx, &id) in bucket.iter().enumerate() {
                positions[id] = idx;
            }
        }
    };
    update_positions(&graph.layers, &mut positions);

    let mut best = graph.layers.clone();
    let mut best_crossings = count_crossings(&graph.layers, &graph.segments, &positions);

    let passes = passes.max(1);
    for _ in 0..passes {
        if best_crossings == 0 {
            break;
        }
        for rank in 1..graph.layers.len() {
            sort_bucket(&mut graph.layers[rank], &incoming, &positions);
            update_positions(&graph.layers, &mut positions);
        }
        for rank in (0..graph.layers.len() - 1).rev() {
            sort_bucket(&mut graph.layers[rank], &outgoing, &positions);
            update_positions(&graph.layers, &mut positions);
        }
        let crossings = count_crossings(&graph.layers, &graph.segments, &positions);
        if crossings < best_crossings {
            best_crossings = crossings;
            best = graph.layers.clone();
        }
    }

    graph.layers = best;
}

fn sort_bucket(bucket: &mut [usize], neighbors: &[Vec<usize>], positions: &[usize]) {
    if bucket.len() <= 1 {
        return;
    }
    let mut keyed: Vec<(f32, usize, usize)> = bucket
        .iter()
        .map(|&id| (median_position(id, neighbors, positions), positions[id], id))
        .collect();
    keyed.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });
    for (slot, (_, _, id)) in bucket.iter_mut().zip(keyed) {
        *slot = id;
    }
}

pub(super) fn median_position(id: usize, neighbors: &[Vec<usize>], positions: &[usize]) -> f32 {
    let list = &neighbors[id];
    if list.is_empty() {
        return positions[id] as f32;
    }
    let mut values: Vec<f32> = list.iter().map(|&n| positions[n] as f32).collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) * 0.5
    }
}

pub(super) fn count_crossings(
    layers: &[Vec<usize>],
    segments: &[(usize, usize)],
    positions: &[usize],
) -> usize {
    // Segments only ever join consecutive layers, so bucket by upper rank.
    let mut rank_of = vec![0usize; positions.len()];
    for (rank, bucket) in layers.iter().enumerate() {
        for &id in bucket {
            rank_of[id] = rank;
        }
    }
    let mut per_rank: Vec<Vec<(usize, usize)>> = vec![Vec::new(); layers.len()];
    for &(upper, lower) in segments {
        per_rank[rank_of[upper]].push((positions[upper], positions[lower]));
    }

    let mut total = 0;
    for pairs in &per_rank {
        for (i, a) in pairs.iter().enumerate() {
            for b in &pairs[i + 1..] {
                if (a.0 < b.0 && a.1 > b.1) || (a.0 > b.0 && a.1 < b.1) {
                    total += 1;
                }
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_ranks_follow_edges() {
        let ranking = compute_ranks(3, &[(0, 1), (1, 2)]);
        assert_eq!(ranking.ranks, vec![0, 1, 2]);
        assert!(ranking.forward.iter().all(|f| *f));
    }

    #[test]
    fn longest_path_wins() {
        // 0 -> 1 -> 2 -> 3 and a shortcut 0 -> 3
        let ranking = compute_ranks(4, &[(0, 1), (1, 2), (2, 3), (0, 3)]);
        assert_eq!(ranking.ranks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn cycle_is_broken_at_earliest_node() {
        let ranking = compute_ranks(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(ranking.ranks, vec![0, 1, 2]);
        assert_eq!(ranking.forward, vec![true, true, false]);
    }

    #[test]
    fn self_loops_are_ignored() {
        let ranking = compute_ranks(2, &[(0, 0), (0, 1)]);
        assert_eq!(ranking.ranks, vec![0, 1]);
        assert_eq!(ranking.forward, vec![false, true]);
    }

    #[test]
    fn late_sources_are_pulled_down() {
        // 0 -> 1 -> 2 -> 3, and 4 only feeds 3
        let ranking = compute_ranks(5, &[(0, 1), (1, 2), (2, 3), (4, 3)]);
        assert_eq!(ranking.ranks[4], 2);
    }

    #[test]
    fn long_edges_get_virtual_nodes() {
        let ranks = vec![0, 1, 2];
        let layered = build_layers(3, &[(0, 1), (1, 2), (0, 2)], &ranks);
        assert_eq!(layered.total_count, 4);
        assert_eq!(layered.layers[1], vec![1, 3]);
        assert!(layered.is_virtual(3));
        assert!(layered.segments.contains(&(0, 3)));
        assert!(layered.segments.contains(&(3, 2)));
    }

    #[test]
    fn ordering_removes_simple_crossing() {
        // 0 -> 3, 1 -> 2 with layer 1 initially [2, 3]
        let ranking = compute_ranks(4, &[(0, 3), (1, 2)]);
        let mut layered = build_layers(4, &[(0, 3), (1, 2)], &ranking.ranks);
        assert_eq!(layered.layers, vec![vec![0, 1], vec![2, 3]]);
        order_layers(&mut layered, 4);
        let mut positions = vec![0; layered.total_count];
        for bucket in &layered.layers {
            for (idx, &id) in bucket.iter().enumerate() {
                positions[id] = idx;
            }
        }
        assert_eq!(count_crossings(&layered.layers, &layered.segments, &positions), 0);
    }

    #[test]
    fn median_of_even_neighbours_is_midpoint() {
        let neighbors = vec![vec![1, 2], vec![], vec![]];
        let positions = vec![0, 1, 4];
        assert_eq!(median_position(0, &neighbors, &positions), 2.5);
    }
}
