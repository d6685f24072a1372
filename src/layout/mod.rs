mod cluster;
mod components;
mod grid;
mod hierarchical;
mod radial;
mod ranking;

pub use cluster::apply_cluster_layout;
pub use components::find_connected_components;
pub use grid::{grid_offset, layout_entire_graph, layout_with_groups};
pub use hierarchical::{apply_timeline_layout, auto_layout};
pub use radial::apply_radial_layout;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ir::{Edge, Node};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which placement to run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "strategy")]
pub enum LayoutStrategy {
    /// Component-aware hierarchical layout tiled on a grid.
    #[default]
    Auto,
    Hierarchical,
    Cluster,
    Radial {
        focus: String,
    },
    Timeline,
}

impl LayoutStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            LayoutStrategy::Auto => "auto",
            LayoutStrategy::Hierarchical => "hierarchical",
            LayoutStrategy::Cluster => "cluster",
            LayoutStrategy::Radial { .. } => "radial",
            LayoutStrategy::Timeline => "timeline",
        }
    }

    /// Builds a strategy from its name; `radial` needs a focus node id.
    pub fn from_name(name: &str, focus: Option<&str>) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(LayoutStrategy::Auto),
            "hierarchical" | "dagre" => Ok(LayoutStrategy::Hierarchical),
            "cluster" => Ok(LayoutStrategy::Cluster),
            "timeline" => Ok(LayoutStrategy::Timeline),
            "radial" => match focus {
                Some(focus) => Ok(LayoutStrategy::Radial {
                    focus: focus.to_string(),
                }),
                None => Err(Error::UnknownStrategy(
                    "radial (a focus node id is required)".to_string(),
                )),
            },
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LayoutStrategy::from_name(s, None)
    }
}

/// Runs `strategy` over a snapshot of the graph and returns repositioned
/// copies of `nodes`, in input order.
pub fn compute_layout(
    nodes: &[Node],
    edges: &[Edge],
    strategy: &LayoutStrategy,
    config: &Config,
) -> Vec<Node> {
    match strategy {
        LayoutStrategy::Auto => layout_entire_graph(nodes, edges, &config.layout, &config.grid),
        LayoutStrategy::Hierarchical => auto_layout(nodes, edges, &config.layout),
        LayoutStrategy::Cluster => apply_cluster_layout(nodes, edges, &config.cluster),
        LayoutStrategy::Radial { focus } => apply_radial_layout(nodes, edges, focus, &config.radial),
        LayoutStrategy::Timeline => {
            apply_timeline_layout(nodes, edges, &config.layout, &config.timeline)
        }
    }
}
