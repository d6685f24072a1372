use std::collections::HashMap;

use super::ranking::{build_layers, compute_ranks, order_layers};
use crate::config::{LayoutConfig, TimelineConfig};
use crate::ir::{Direction, Edge, Node, Position};

/// Layered layout: ranks along the flow axis, median-ordered within each
/// rank, every rank centred on the widest one.
///
/// The returned nodes are copies of `nodes`, in the same order, differing
/// only in `position` (the top-left corner of a `node_width` x
/// `node_height` box).
pub fn auto_layout(nodes: &[Node], edges: &[Edge], config: &LayoutConfig) -> Vec<Node> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        let next = index.len();
        index.entry(node.id.as_str()).or_insert(next);
    }

    let mut indexed_edges: Vec<(usize, usize)> = Vec::with_capacity(edges.len());
    let mut skipped = 0usize;
    for edge in edges.iter().filter(|edge| !edge.is_self_loop()) {
        match (
            index.get(edge.source_id.as_str()),
            index.get(edge.target_id.as_str()),
        ) {
            (Some(&from), Some(&to)) => indexed_edges.push((from, to)),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "ignoring edges with unknown endpoints");
    }

    let centers = layered_centers(index.len(), &indexed_edges, config);
    tracing::debug!(
        nodes = nodes.len(),
        edges = indexed_edges.len(),
        direction = config.direction.token(),
        "hierarchical layout"
    );

    let half_w = config.node_width / 2.0;
    let half_h = config.node_height / 2.0;
    nodes
        .iter()
        .map(|node| {
            let (cx, cy) = index
                .get(node.id.as_str())
                .map(|&idx| centers[idx])
                .unwrap_or((config.margin_x + half_w, config.margin_y + half_h));
            node.moved_to(Position::new(cx - half_w, cy - half_h))
        })
        .collect()
}

/// Hierarchical layout flowing left to right with the timeline spacing.
pub fn apply_timeline_layout(
    nodes: &[Node],
    edges: &[Edge],
    base: &LayoutConfig,
    timeline: &TimelineConfig,
) -> Vec<Node> {
    auto_layout(nodes, edges, &timeline.layout(base))
}

fn layered_centers(
    node_count: usize,
    edges: &[(usize, usize)],
    config: &LayoutConfig,
) -> Vec<(f32, f32)> {
    let ranking = compute_ranks(node_count, edges);
    let reversed = ranking.forward.iter().filter(|forward| !**forward).count();
    if reversed > 0 {
        tracing::debug!(reversed, "treating cycle edges as back-edges");
    }
    let mut layered = build_layers(node_count, edges, &ranking.ranks);
    order_layers(&mut layered, config.order_passes);

    let (rank_size, cross_size, rank_margin, cross_margin) = match config.direction {
        Direction::TopToBottom => (
            config.node_height,
            config.node_width,
            config.margin_y,
            config.margin_x,
        ),
        Direction::LeftToRight => (
            config.node_width,
            config.node_height,
            config.margin_x,
            config.margin_y,
        ),
    };
    let cross_step = cross_size + config.node_separation;
    let rank_step = rank_size + config.rank_separation;

    let real_layers: Vec<Vec<usize>> = layered
        .layers
        .iter()
        .map(|bucket| {
            bucket
                .iter()
                .copied()
                .filter(|&id| !layered.is_virtual(id))
                .collect()
        })
        .collect();

    let extent = |count: usize| -> f32 {
        if count == 0 {
            0.0
        } else {
            count as f32 * cross_size + (count - 1) as f32 * config.node_separation
        }
    };
    let widest = real_layers
        .iter()
        .map(|bucket| extent(bucket.len()))
        .fold(0.0f32, f32::max);

    let mut centers = vec![(0.0f32, 0.0f32); node_count];
    for (rank, bucket) in real_layers.iter().enumerate() {
        let start = cross_margin + (widest - extent(bucket.len())) / 2.0;
        let along = rank_margin + rank as f32 * rank_step + rank_size / 2.0;
        for (slot, &id) in bucket.iter().enumerate() {
            let across = start + slot as f32 * cross_step + cross_size / 2.0;
            centers[id] = match config.direction {
                Direction::TopToBottom => (across, along),
                Direction::LeftToRight => (along, across),
            };
        }
    }
    centers
}
