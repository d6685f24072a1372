use std::collections::{HashMap, HashSet};

use crate::ir::{Edge, Node};

/// Partitions the node ids into connected components, treating every edge
/// as undirected.
///
/// Components come out in the order their first node appears in `nodes`,
/// and members in depth-first discovery order. Edges that reference unknown
/// ids are skipped.
pub fn find_connected_components(nodes: &[Node], edges: &[Edge]) -> Vec<Vec<String>> {
    let mut node_ids: Vec<&str> = Vec::with_capacity(nodes.len());
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        if adjacency.contains_key(node.id.as_str()) {
            continue;
        }
        adjacency.insert(node.id.as_str(), Vec::new());
        node_ids.push(node.id.as_str());
    }

    for edge in edges {
        let from = edge.source_id.as_str();
        let to = edge.target_id.as_str();
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

    let mut visited: HashSet<&str> = HashSet::with_capacity(node_ids.len());
    let mut components: Vec<Vec<String>> = Vec::new();
    for &node_id in &node_ids {
        if visited.contains(node_id) {
            continue;
        }
        let mut stack = vec![node_id];
        let mut comp = Vec::new();
        visited.insert(node_id);
        while let Some(cur) = stack.pop() {
            comp.push(cur.to_string());
            if let Some(neigh) = adjacency.get(cur) {
                // Reversed so the first-listed neighbour is explored first.
                for &next in neigh.iter().rev() {
                    if visited.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }
        components.push(comp);
    }

    for &node_id in &node_ids {
        if !visited.contains(node_id) {
            components.push(vec![node_id.to_string()]);
        }
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::NodeType;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(id, NodeType::Event)).collect()
    }

    fn sorted(mut components: Vec<Vec<String>>) -> Vec<Vec<String>> {
        for comp in &mut components {
            comp.sort();
        }
        components
    }

    #[test]
    fn empty_graph_has_no_components() {
        assert!(find_connected_components(&[], &[]).is_empty());
    }

    #[test]
    fn splits_disconnected_subgraphs() {
        let nodes = nodes(&["a", "b", "c", "d", "e"]);
        let edges = vec![Edge::new("a", "b"), Edge::new("d", "c")];
        let components = sorted(find_connected_components(&nodes, &edges));
        assert_eq!(
            components,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
                vec!["e".to_string()],
            ]
        );
    }

    #[test]
    fn direction_does_not_matter() {
        let nodes = nodes(&["a", "b", "c"]);
        let edges = vec![Edge::new("b", "a"), Edge::new("b", "c")];
        let components = find_connected_components(&nodes, &edges);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 3);
    }

    #[test]
    fn unknown_endpoints_are_ignored() {
        let nodes = nodes(&["a", "b"]);
        let edges = vec![Edge::new("a", "ghost"), Edge::new("ghost", "b")];
        let components = find_connected_components(&nodes, &edges);
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn every_node_appears_exactly_once() {
        let ids: Vec<String> = (0..40).map(|i| format!("n{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let nodes = nodes(&refs);
        let mut edges = Vec::new();
        for i in (0..40).step_by(3) {
            edges.push(Edge::new(&ids[i], &ids[(i * 7 + 1) % 40]));
        }
        edges.push(Edge::new("n5", "n5"));
        let components = find_connected_components(&nodes, &edges);
        let mut seen: Vec<String> = components.into_iter().flatten().collect();
        seen.sort();
        let mut expected = ids.clone();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let ids: Vec<String> = (0..50_000).map(|i| format!("n{i}")).collect();
        let nodes: Vec<Node> = ids.iter().map(|id| Node::new(id, NodeType::Event)).collect();
        let edges: Vec<Edge> = ids.windows(2).map(|w| Edge::new(&w[0], &w[1])).collect();
        let components = find_connected_components(&nodes, &edges);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 50_000);
    }
}
