use std::collections::{HashMap, HashSet};

use super::components::find_connected_components;
use super::hierarchical::auto_layout;
use crate::config::{GridConfig, LayoutConfig};
use crate::ir::{Edge, Node, Position};

/// Lays out every connected component on its own and tiles the results on
/// a square-ish grid with `group_padding` between cell origins.
///
/// A graph with a single component gets a plain [`auto_layout`].
///
/// Cells are a fixed size, so a component whose layout is larger than
/// `group_padding` can still spill into its neighbour.
pub fn layout_entire_graph(
    nodes: &[Node],
    edges: &[Edge],
    layout: &LayoutConfig,
    grid: &GridConfig,
) -> Vec<Node> {
    let components = find_connected_components(nodes, edges);
    tracing::debug!(
        nodes = nodes.len(),
        components = components.len(),
        "whole-graph layout"
    );
    if components.len() <= 1 {
        return auto_layout(nodes, edges, layout);
    }
    layout_with_groups(nodes, edges, &components, layout, grid)
}

/// Grid cell origin for group `index` out of `count`.
pub fn grid_offset(index: usize, count: usize, group_padding: f32) -> Position {
    let columns = (count as f64).sqrt().ceil().max(1.0) as usize;
    let col = index % columns;
    let row = index / columns;
    Position::new(col as f32 * group_padding, row as f32 * group_padding)
}

/// Lays out each group of node ids independently and offsets it into its
/// grid cell. Nodes not named by any group keep their position.
pub fn layout_with_groups(
    nodes: &[Node],
    edges: &[Edge],
    groups: &[Vec<String>],
    layout: &LayoutConfig,
    grid: &GridConfig,
) -> Vec<Node> {
    let mut positions: HashMap<String, Position> = HashMap::with_capacity(nodes.len());
    for (group_index, group) in groups.iter().enumerate() {
        let member_ids: HashSet<&str> = group.iter().map(String::as_str).collect();
        let members: Vec<Node> = nodes
            .iter()
            .filter(|n| member_ids.contains(n.id.as_str()))
            .cloned()
            .collect();
        let internal: Vec<Edge> = edges
            .iter()
            .filter(|e| {
                member_ids.contains(e.source_id.as_str()) && member_ids.contains(e.target_id.as_str())
            })
            .cloned()
            .collect();

        let cell = grid_offset(group_index, groups.len(), grid.group_padding);
        for placed in auto_layout(&members, &internal, layout) {
            let shifted = placed.position.offset(cell.x, cell.y);
            positions.entry(placed.id).or_insert(shifted);
        }
    }

    nodes
        .iter()
        .map(|node| match positions.get(node.id.as_str()) {
            Some(position) => node.moved_to(*position),
            None => node.clone(),
        })
        .collect()
}
