use std::collections::{HashMap, HashSet};

use super::hierarchical::auto_layout;
use crate::config::ClusterConfig;
use crate::ir::{Edge, Node, NodeType, Position};

/// Lays out each node type as its own compact cluster and places the
/// clusters side by side, left to right in order of first appearance.
///
/// Only edges with both ends inside a cluster take part in its layout.
pub fn apply_cluster_layout(nodes: &[Node], edges: &[Edge], config: &ClusterConfig) -> Vec<Node> {
    let mut type_order: Vec<NodeType> = Vec::new();
    let mut by_type: HashMap<NodeType, Vec<Node>> = HashMap::new();
    for node in nodes {
        let bucket = by_type.entry(node.kind).or_insert_with(|| {
            type_order.push(node.kind);
            Vec::new()
        });
        bucket.push(node.clone());
    }

    let layout = config.layout();
    let mut positions: HashMap<String, Position> = HashMap::with_capacity(nodes.len());
    let mut x_offset = config.start_offset;
    for kind in &type_order {
        let Some(members) = by_type.get(kind) else {
            continue;
        };
        let ids: HashSet<&str> = members.iter().map(|n| n.id.as_str()).collect();
        let internal: Vec<Edge> = edges
            .iter()
            .filter(|e| ids.contains(e.source_id.as_str()) && ids.contains(e.target_id.as_str()))
            .cloned()
            .collect();

        let placed = auto_layout(members, &internal, &layout);
        let right_edge = placed
            .iter()
            .map(|n| n.position.x + layout.node_width)
            .fold(0.0f32, f32::max);
        for node in &placed {
            positions
                .entry(node.id.clone())
                .or_insert(node.position.offset(x_offset, 0.0));
        }
        tracing::debug!(
            kind = kind.as_str(),
            nodes = members.len(),
            edges = internal.len(),
            x_offset,
            "cluster placed"
        );

        // Wide clusters push the next one further right.
        x_offset += config
            .cluster_width
            .max(right_edge + config.node_separation);
    }

    nodes
        .iter()
        .map(|node| match positions.get(&node.id) {
            Some(position) => node.moved_to(*position),
            None => node.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::NodeType;

    #[test]
    fn clusters_are_ordered_by_first_appearance() {
        let nodes = vec![
            Node::new("c1", NodeType::Character),
            Node::new("l1", NodeType::Location),
            Node::new("c2", NodeType::Character),
            Node::new("c3", NodeType::Character),
            Node::new("l2", NodeType::Location),
        ];
        let edges = vec![
            Edge::new("c1", "c2"),
            Edge::new("c2", "c3"),
            Edge::new("l1", "l2"),
        ];
        let out = apply_cluster_layout(&nodes, &edges, &ClusterConfig::default());
        let max_character = out
            .iter()
            .filter(|n| n.kind == NodeType::Character)
            .map(|n| n.position.x)
            .fold(f32::MIN, f32::max);
        let min_location = out
            .iter()
            .filter(|n| n.kind == NodeType::Location)
            .map(|n| n.position.x)
            .fold(f32::MAX, f32::min);
        assert!(max_character + 200.0 <= min_location);
        // margin 30 plus the initial offset of 100
        assert_eq!(out[0].position.x, 130.0);
        assert_eq!(out[1].position.x, 530.0);
    }

    #[test]
    fn cross_type_edges_do_not_affect_ranks() {
        let nodes = vec![
            Node::new("a", NodeType::Event),
            Node::new("b", NodeType::Event),
            Node::new("m", NodeType::Memory),
        ];
        let edges = vec![Edge::new("a", "m"), Edge::new("m", "b")];
        let out = apply_cluster_layout(&nodes, &edges, &ClusterConfig::default());
        assert_eq!(out[0].position.y, out[1].position.y);
    }

    #[test]
    fn wide_clusters_do_not_overlap() {
        let mut nodes: Vec<Node> = (0..4)
            .map(|i| Node::new(&format!("e{i}"), NodeType::Event))
            .collect();
        nodes.push(Node::new("k", NodeType::Knowledge));
        let out = apply_cluster_layout(&nodes, &[], &ClusterConfig::default());
        let right_most_event = out[..4]
            .iter()
            .map(|n| n.position.x + 200.0)
            .fold(0.0f32, f32::max);
        assert!(out[4].position.x >= right_most_event);
    }

    #[test]
    fn keeps_node_order_and_fields() {
        let nodes = vec![
            Node::new("x", NodeType::Item).with_name("Key"),
            Node::new("y", NodeType::Audio),
        ];
        let out = apply_cluster_layout(&nodes, &[], &ClusterConfig::default());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, "x");
        assert_eq!(out[0].name(), Some("Key"));
        assert_eq!(out[1].id, "y");
    }
}
