use std::collections::BTreeMap;

use crate::ir::{Node, NodeType, ValidationFinding};

pub fn validate_node(node: &Node) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();
    if node.name().is_none_or(|name| name.trim().is_empty()) {
        findings.push(ValidationFinding::error("name", "Node must have a name"));
    }
    if node.kind == NodeType::Dialogue
        && node
            .content
            .as_deref()
            .is_none_or(|content| content.trim().is_empty())
    {
        findings.push(ValidationFinding::error(
            "content",
            "Dialogue node must have content",
        ));
    }
    if node.kind == NodeType::Decision && node.choices.is_empty() {
        findings.push(ValidationFinding::error(
            "choices",
            "Decision node must have at least one choice",
        ));
    }
    findings
}

/// Findings for every node, keyed by id. Clean nodes map to an empty list.
pub fn validate_nodes(nodes: &[Node]) -> BTreeMap<String, Vec<ValidationFinding>> {
    nodes
        .iter()
        .map(|node| (node.id.clone(), validate_node(node)))
        .collect()
}

/// Copies of `nodes` with their `errors` replaced by fresh findings.
pub fn annotate_nodes(nodes: &[Node]) -> Vec<Node> {
    nodes
        .iter()
        .map(|node| Node {
            errors: validate_node(node),
            ..node.clone()
        })
        .collect()
}
