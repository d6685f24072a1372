use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB", alias = "TD")]
    TopToBottom,
    #[serde(rename = "LR")]
    LeftToRight,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "TD" | "TB" => Some(Self::TopToBottom),
            "LR" => Some(Self::LeftToRight),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::TopToBottom => "TB",
            Self::LeftToRight => "LR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Character,
    Location,
    Event,
    Memory,
    Item,
    Dialogue,
    Choice,
    Condition,
    Audio,
    Knowledge,
    Branch,
    Decision,
    Logic,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Character => "character",
            NodeType::Location => "location",
            NodeType::Event => "event",
            NodeType::Memory => "memory",
            NodeType::Item => "item",
            NodeType::Dialogue => "dialogue",
            NodeType::Choice => "choice",
            NodeType::Condition => "condition",
            NodeType::Audio => "audio",
            NodeType::Knowledge => "knowledge",
            NodeType::Branch => "branch",
            NodeType::Decision => "decision",
            NodeType::Logic => "logic",
        }
    }
}

/// Top-left corner of a node on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Known attribute fields plus a side table for free-form extensions.
///
/// The side table is flattened into the same JSON object, so a document
/// written by the editor with custom keys round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_node_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationFinding {
    pub fn error(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub attributes: NodeAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationFinding>,
}

impl Node {
    pub fn new(id: &str, kind: NodeType) -> Self {
        Self {
            id: id.to_string(),
            kind,
            position: Position::default(),
            attributes: NodeAttributes::default(),
            content: None,
            choices: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.attributes.name = Some(name.to_string());
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.name.as_deref()
    }

    /// Copy of this node with only the position replaced.
    pub fn moved_to(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    #[default]
    Causal,
    Temporal,
    Conditional,
    Reference,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(rename = "type", default)]
    pub kind: ConnectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<EdgeProperties>,
}

impl Edge {
    pub fn new(source_id: &str, target_id: &str) -> Self {
        Self {
            id: format!("{source_id}->{target_id}"),
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
            kind: ConnectionType::Causal,
            label: None,
            properties: None,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source_id == self.target_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_json_uses_editor_field_names() {
        let raw = r#"{
            "id": "n1",
            "type": "dialogue",
            "position": { "x": 10, "y": 20 },
            "attributes": { "name": "Greeting", "groupId": "act-1", "mood": "tense" },
            "content": "Hello there",
            "choices": [{ "text": "Leave", "nextNodeId": "n2" }]
        }"#;
        let node: Node = serde_json::from_str(raw).unwrap();
        assert_eq!(node.kind, NodeType::Dialogue);
        assert_eq!(node.position, Position::new(10.0, 20.0));
        assert_eq!(node.attributes.group_id.as_deref(), Some("act-1"));
        assert_eq!(
            node.attributes.extra.get("mood"),
            Some(&serde_json::Value::String("tense".to_string()))
        );
        assert_eq!(node.choices[0].next_node_id.as_deref(), Some("n2"));

        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["type"], "dialogue");
        assert_eq!(back["attributes"]["mood"], "tense");
        assert_eq!(back["attributes"]["groupId"], "act-1");
    }

    #[test]
    fn edge_defaults_to_causal() {
        let edge: Edge =
            serde_json::from_str(r#"{ "id": "e1", "sourceId": "a", "targetId": "b" }"#).unwrap();
        assert_eq!(edge.kind, ConnectionType::Causal);
        assert!(edge.properties.is_none());
    }

    #[test]
    fn direction_tokens() {
        assert_eq!(Direction::from_token("td"), Some(Direction::TopToBottom));
        assert_eq!(Direction::from_token("LR"), Some(Direction::LeftToRight));
        assert_eq!(Direction::from_token("RL"), None);
    }

    #[test]
    fn moved_to_keeps_other_fields() {
        let node = Node::new("a", NodeType::Event).with_name("Storm").at(1.0, 2.0);
        let moved = node.moved_to(Position::new(5.0, 6.0));
        assert_eq!(moved.name(), Some("Storm"));
        assert_eq!(node.position, Position::new(1.0, 2.0));
        assert_eq!(moved.position, Position::new(5.0, 6.0));
    }
}
