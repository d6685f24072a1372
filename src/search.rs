//! Queries over a graph snapshot: text search, neighbours, orphans.

use std::collections::HashSet;

use crate::ir::{Edge, Node, NodeType};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub node_types: Vec<NodeType>,
    pub name: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub group_id: Option<String>,
    pub has_errors: Option<bool>,
}

impl SearchFilter {
    pub fn is_empty(&self) -> bool {
        self.node_types.is_empty()
            && self.name.as_deref().is_none_or(str::is_empty)
            && self.content.as_deref().is_none_or(str::is_empty)
            && self.description.as_deref().is_none_or(str::is_empty)
            && self.group_id.as_deref().is_none_or(str::is_empty)
            && self.has_errors.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Neighborhood {
    Incoming,
    Outgoing,
    #[default]
    Both,
}

fn contains_ci(haystack: Option<&str>, lowered_needle: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(lowered_needle))
}

/// Case-insensitive search over name, content and description, narrowed by
/// `filter`. A blank query with an empty filter returns every node.
pub fn search_nodes<'a>(nodes: &'a [Node], query: &str, filter: &SearchFilter) -> Vec<&'a Node> {
    let query = query.trim().to_lowercase();
    if query.is_empty() && filter.is_empty() {
        return nodes.iter().collect();
    }
    let name = filter.name.as_deref().map(str::to_lowercase).filter(|s| !s.is_empty());
    let content = filter.content.as_deref().map(str::to_lowercase).filter(|s| !s.is_empty());
    let description = filter
        .description
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());
    let group_id = filter.group_id.as_deref().filter(|s| !s.is_empty());

    nodes
        .iter()
        .filter(|node| {
            if !query.is_empty()
                && !(contains_ci(node.name(), &query)
                    || contains_ci(node.content.as_deref(), &query)
                    || contains_ci(node.attributes.description.as_deref(), &query))
            {
                return false;
            }
            if !filter.node_types.is_empty() && !filter.node_types.contains(&node.kind) {
                return false;
            }
            if let Some(needle) = &name {
                if !contains_ci(node.name(), needle) {
                    return false;
                }
            }
            if let Some(needle) = &content {
                if !contains_ci(node.content.as_deref(), needle) {
                    return false;
                }
            }
            if let Some(needle) = &description {
                if !contains_ci(node.attributes.description.as_deref(), needle) {
                    return false;
                }
            }
            if let Some(group) = group_id {
                if node.attributes.group_id.as_deref() != Some(group) {
                    return false;
                }
            }
            if let Some(wanted) = filter.has_errors {
                if node.errors.is_empty() == wanted {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Nodes joined to `node_id` by an edge in the given direction.
pub fn find_connected_nodes<'a>(
    node_id: &str,
    nodes: &'a [Node],
    edges: &[Edge],
    direction: Neighborhood,
) -> Vec<&'a Node> {
    let mut connected: HashSet<&str> = HashSet::new();
    for edge in edges {
        if matches!(direction, Neighborhood::Outgoing | Neighborhood::Both)
            && edge.source_id == node_id
        {
            connected.insert(edge.target_id.as_str());
        }
        if matches!(direction, Neighborhood::Incoming | Neighborhood::Both)
            && edge.target_id == node_id
        {
            connected.insert(edge.source_id.as_str());
        }
    }
    nodes
        .iter()
        .filter(|node| connected.contains(node.id.as_str()))
        .collect()
}

pub fn find_nodes_with_errors(nodes: &[Node]) -> Vec<&Node> {
    nodes.iter().filter(|node| !node.errors.is_empty()).collect()
}

/// Nodes that no edge touches.
pub fn find_orphaned_nodes<'a>(nodes: &'a [Node], edges: &[Edge]) -> Vec<&'a Node> {
    let mut touched: HashSet<&str> = HashSet::new();
    for edge in edges {
        touched.insert(edge.source_id.as_str());
        touched.insert(edge.target_id.as_str());
    }
    nodes
        .iter()
        .filter(|node| !touched.contains(node.id.as_str()))
        .collect()
}

pub fn find_nodes_by_type(nodes: &[Node], kind: NodeType) -> Vec<&Node> {
    nodes.iter().filter(|node| node.kind == kind).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ValidationFinding;

    fn cast() -> Vec<Node> {
        let mut mira = Node::new("mira", NodeType::Character).with_name("Mira Vale");
        mira.attributes.description = Some("A smuggler with debts".to_string());
        mira.attributes.group_id = Some("crew".to_string());
        let mut port = Node::new("port", NodeType::Location).with_name("Rust Harbor");
        port.errors.push(ValidationFinding::error("description", "missing"));
        let mut line = Node::new("line", NodeType::Dialogue).with_name("Opening");
        line.content = Some("You owe the harbor master.".to_string());
        vec![mira, port, line]
    }

    fn ids(found: Vec<&Node>) -> Vec<&str> {
        found.into_iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn blank_query_returns_everything() {
        let nodes = cast();
        assert_eq!(search_nodes(&nodes, "   ", &SearchFilter::default()).len(), 3);
    }

    #[test]
    fn query_matches_name_content_and_description() {
        let nodes = cast();
        let filter = SearchFilter::default();
        assert_eq!(ids(search_nodes(&nodes, "HARBOR", &filter)), vec!["port", "line"]);
        assert_eq!(ids(search_nodes(&nodes, "smuggler", &filter)), vec!["mira"]);
    }

    #[test]
    fn filters_narrow_results() {
        let nodes = cast();
        let by_type = SearchFilter {
            node_types: vec![NodeType::Dialogue],
            ..SearchFilter::default()
        };
        assert_eq!(ids(search_nodes(&nodes, "harbor", &by_type)), vec!["line"]);

        let by_group = SearchFilter {
            group_id: Some("crew".to_string()),
            ..SearchFilter::default()
        };
        assert_eq!(ids(search_nodes(&nodes, "", &by_group)), vec!["mira"]);

        let with_errors = SearchFilter {
            has_errors: Some(true),
            ..SearchFilter::default()
        };
        assert_eq!(ids(search_nodes(&nodes, "", &with_errors)), vec!["port"]);

        let without_errors = SearchFilter {
            has_errors: Some(false),
            name: Some("o".to_string()),
            ..SearchFilter::default()
        };
        assert_eq!(ids(search_nodes(&nodes, "", &without_errors)), vec!["line"]);
    }

    #[test]
    fn neighbours_respect_direction() {
        let nodes = cast();
        let edges = vec![Edge::new("mira", "port"), Edge::new("line", "mira")];
        assert_eq!(
            ids(find_connected_nodes("mira", &nodes, &edges, Neighborhood::Outgoing)),
            vec!["port"]
        );
        assert_eq!(
            ids(find_connected_nodes("mira", &nodes, &edges, Neighborhood::Incoming)),
            vec!["line"]
        );
        assert_eq!(
            ids(find_connected_nodes("mira", &nodes, &edges, Neighborhood::Both)),
            vec!["port", "line"]
        );
    }

    #[test]
    fn orphans_errors_and_types() {
        let nodes = cast();
        let edges = vec![Edge::new("mira", "port")];
        assert_eq!(ids(find_orphaned_nodes(&nodes, &edges)), vec!["line"]);
        assert_eq!(ids(find_nodes_with_errors(&nodes)), vec!["port"]);
        assert_eq!(ids(find_nodes_by_type(&nodes, NodeType::Character)), vec!["mira"]);
    }
}
