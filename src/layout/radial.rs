use std::collections::{BTreeMap, HashMap, VecDeque};
use std::f32::consts::PI;

use crate::config::RadialConfig;
use crate::ir::{Edge, Node, Position};

/// Places `focus_id` at the configured centre and every other node on a
/// ring whose radius grows with its hop distance from the focus.
///
/// Nodes the focus cannot reach share one ring outside all reachable ones.
/// With fewer than two nodes, or an unknown focus, the nodes come back
/// unchanged.
pub fn apply_radial_layout(
    nodes: &[Node],
    edges: &[Edge],
    focus_id: &str,
    config: &RadialConfig,
) -> Vec<Node> {
    if nodes.len() <= 1 || !nodes.iter().any(|n| n.id == focus_id) {
        if nodes.len() > 1 {
            tracing::debug!(focus = focus_id, "radial focus not found; leaving nodes in place");
        }
        return nodes.to_vec();
    }

    let distances = hop_distances(nodes, edges, focus_id);

    let mut level_sizes: BTreeMap<usize, usize> = BTreeMap::new();
    for node in nodes {
        if node.id == focus_id {
            continue;
        }
        if let Some(&d) = distances.get(node.id.as_str()) {
            *level_sizes.entry(d).or_default() += 1;
        }
    }

    let center = config.center;
    let mut used: HashMap<usize, usize> = HashMap::new();
    let placed: Vec<Node> = nodes
        .iter()
        .map(|node| {
            if node.id == focus_id {
                return node.moved_to(center);
            }
            let distance = distances.get(node.id.as_str()).copied().unwrap_or(0);
            let radius = distance as f32 * config.radius_step;
            let total = level_sizes.get(&distance).copied().unwrap_or(1);
            let slot = used.entry(distance).or_default();
            let angle = if total == 1 {
                0.0
            } else {
                2.0 * PI * (*slot as f32) / total as f32
            };
            *slot += 1;
            node.moved_to(Position::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            ))
        })
        .collect();

    tracing::debug!(
        nodes = nodes.len(),
        rings = level_sizes.len(),
        focus = focus_id,
        "radial layout"
    );
    placed
}

fn hop_distances<'a>(nodes: &'a [Node], edges: &'a [Edge], focus_id: &'a str) -> HashMap<&'a str, usize> {
    let mut adjacency: HashMap<&str, Vec<&str>> = nodes
        .iter()
        .map(|node| (node.id.as_str(), Vec::new()))
        .collect();
    for edge in edges {
        let (from, to) = (edge.source_id.as_str(), edge.target_id.as_str());
        if !adjacency.contains_key(from) || !adjacency.contains_key(to) {
            continue;
        }
        if let Some(list) = adjacency.get_mut(from) {
            list.push(to);
        }
        if let Some(list) = adjacency.get_mut(to) {
            list.push(from);
        }
    }

    let mut distances: HashMap<&str, usize> = HashMap::new();
    let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
    distances.insert(focus_id, 0);
    queue.push_back((focus_id, 0));
    while let Some((id, distance)) = queue.pop_front() {
        let Some(neighbors) = adjacency.get(id) else {
            continue;
        };
        for &next in neighbors {
            if distances.contains_key(next) {
                continue;
            }
            distances.insert(next, distance + 1);
            queue.push_back((next, distance + 1));
        }
    }

    // Only real nodes are ever inserted, so this counts reached nodes.
    let reached = distances.len();
    for node in nodes {
        distances.entry(node.id.as_str()).or_insert(reached);
    }
    distances
}
