use crate::config::LayoutConfig;
use crate::ir::Node;
use crate::layout::LayoutStrategy;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub strategy: String,
    pub direction: String,
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutDump {
    pub fn from_nodes(strategy: &LayoutStrategy, nodes: &[Node], config: &LayoutConfig) -> Self {
        let dumped: Vec<NodeDump> = nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                kind: node.kind.as_str().to_string(),
                x: node.position.x,
                y: node.position.y,
                width: config.node_width,
                height: config.node_height,
            })
            .collect();

        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for node in &dumped {
            min_x = min_x.min(node.x);
            min_y = min_y.min(node.y);
            max_x = max_x.max(node.x + node.width);
            max_y = max_y.max(node.y + node.height);
        }
        if dumped.is_empty() {
            (min_x, min_y, max_x, max_y) = (0.0, 0.0, 0.0, 0.0);
        }

        LayoutDump {
            strategy: strategy.name().to_string(),
            direction: config.direction.token().to_string(),
            min_x,
            min_y,
            width: max_x - min_x,
            height: max_y - min_y,
            nodes: dumped,
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    strategy: &LayoutStrategy,
    nodes: &[Node],
    config: &LayoutConfig,
) -> crate::error::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_nodes(strategy, nodes, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
