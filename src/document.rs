//! The JSON document the editor exports and imports.

use crate::error::{Error, Result};
use crate::ir::{Choice, Edge, Node, NodeAttributes, NodeType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub node_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplate {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default)]
    pub attributes: NodeAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

/// A whole graph as exchanged with the editor.
///
/// Older exports call the edge list `connections`; both spellings are read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    #[serde(default, alias = "connections")]
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<NodeGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_templates: Vec<NodeTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
}

impl GraphDocument {
    /// Copy of the document with node positions taken from `placed`,
    /// matched by id. Nodes missing from `placed` keep their position.
    pub fn with_positions(&self, placed: &[Node]) -> Self {
        let positions: HashMap<&str, _> = placed
            .iter()
            .map(|node| (node.id.as_str(), node.position))
            .collect();
        let nodes = self
            .nodes
            .iter()
            .map(|node| match positions.get(node.id.as_str()) {
                Some(position) => node.moved_to(*position),
                None => node.clone(),
            })
            .collect();
        Self {
            nodes,
            ..self.clone()
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parses an exported graph, rejecting documents without a `nodes` array.
pub fn parse_graph_json(input: &str) -> Result<GraphDocument> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    match value.get("nodes") {
        Some(serde_json::Value::Array(_)) => {}
        Some(_) => {
            return Err(Error::InvalidDocument(
                "nodes is not an array".to_string(),
            ));
        }
        None => return Err(Error::InvalidDocument("nodes missing".to_string())),
    }
    let document: GraphDocument = serde_json::from_value(value)?;
    Ok(document)
}

pub fn read_document(path: &Path) -> Result<GraphDocument> {
    let contents = std::fs::read_to_string(path)?;
    parse_graph_json(&contents)
}

pub fn write_document(path: &Path, document: &GraphDocument) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, document)?;
    Ok(())
}
