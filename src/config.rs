use crate::error::Result;
use crate::ir::{Direction, Position};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub direction: Direction,
    pub node_width: f32,
    pub node_height: f32,
    pub rank_separation: f32,
    pub node_separation: f32,
    pub margin_x: f32,
    pub margin_y: f32,
    pub order_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::TopToBottom,
            node_width: 200.0,
            node_height: 50.0,
            rank_separation: 150.0,
            node_separation: 100.0,
            margin_x: 50.0,
            margin_y: 50.0,
            order_passes: 4,
        }
    }
}

/// Settings for the per-type cluster layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub start_offset: f32,
    /// Minimum horizontal stride between consecutive clusters.
    pub cluster_width: f32,
    pub margin: f32,
    pub rank_separation: f32,
    pub node_separation: f32,
    pub node_width: f32,
    pub node_height: f32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            start_offset: 100.0,
            cluster_width: 400.0,
            margin: 30.0,
            rank_separation: 60.0,
            node_separation: 40.0,
            node_width: 200.0,
            node_height: 50.0,
        }
    }
}

impl ClusterConfig {
    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            direction: Direction::TopToBottom,
            node_width: self.node_width,
            node_height: self.node_height,
            rank_separation: self.rank_separation,
            node_separation: self.node_separation,
            margin_x: self.margin,
            margin_y: self.margin,
            ..LayoutConfig::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialConfig {
    pub center: Position,
    pub radius_step: f32,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            center: Position::new(500.0, 300.0),
            radius_step: 150.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub group_padding: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            group_padding: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub rank_separation: f32,
    pub node_separation: f32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            rank_separation: 200.0,
            node_separation: 50.0,
        }
    }
}

impl TimelineConfig {
    pub fn layout(&self, base: &LayoutConfig) -> LayoutConfig {
        LayoutConfig {
            direction: Direction::LeftToRight,
            rank_separation: self.rank_separation,
            node_separation: self.node_separation,
            ..base.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub layout: LayoutConfig,
    pub cluster: ClusterConfig,
    pub radial: RadialConfig,
    pub grid: GridConfig,
    pub timeline: TimelineConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct LayoutConfigFile {
    direction: Option<Direction>,
    node_width: Option<f32>,
    node_height: Option<f32>,
    rank_separation: Option<f32>,
    node_separation: Option<f32>,
    margin_x: Option<f32>,
    margin_y: Option<f32>,
    order_passes: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ClusterConfigFile {
    start_offset: Option<f32>,
    cluster_width: Option<f32>,
    margin: Option<f32>,
    rank_separation: Option<f32>,
    node_separation: Option<f32>,
    node_width: Option<f32>,
    node_height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RadialConfigFile {
    center_x: Option<f32>,
    center_y: Option<f32>,
    radius_step: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct GridConfigFile {
    group_padding: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct TimelineConfigFile {
    rank_separation: Option<f32>,
    node_separation: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    layout: Option<LayoutConfigFile>,
    cluster: Option<ClusterConfigFile>,
    radial: Option<RadialConfigFile>,
    grid: Option<GridConfigFile>,
    timeline: Option<TimelineConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), "loaded layout config");
    Ok(config)
}

/// Parses a JSON5 config document and merges it onto the defaults.
pub fn parse_config(contents: &str) -> Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.direction {
            target.direction = v;
        }
        if let Some(v) = layout.node_width {
            target.node_width = v;
        }
        if let Some(v) = layout.node_height {
            target.node_height = v;
        }
        if let Some(v) = layout.rank_separation {
            target.rank_separation = v;
        }
        if let Some(v) = layout.node_separation {
            target.node_separation = v;
        }
        if let Some(v) = layout.margin_x {
            target.margin_x = v;
        }
        if let Some(v) = layout.margin_y {
            target.margin_y = v;
        }
        if let Some(v) = layout.order_passes {
            target.order_passes = v;
        }
    }

    if let Some(cluster) = parsed.cluster {
        let target = &mut config.cluster;
        if let Some(v) = cluster.start_offset {
            target.start_offset = v;
        }
        if let Some(v) = cluster.cluster_width {
            target.cluster_width = v;
        }
        if let Some(v) = cluster.margin {
            target.margin = v;
        }
        if let Some(v) = cluster.rank_separation {
            target.rank_separation = v;
        }
        if let Some(v) = cluster.node_separation {
            target.node_separation = v;
        }
        if let Some(v) = cluster.node_width {
            target.node_width = v;
        }
        if let Some(v) = cluster.node_height {
            target.node_height = v;
        }
    }

    if let Some(radial) = parsed.radial {
        if let Some(v) = radial.center_x {
            config.radial.center.x = v;
        }
        if let Some(v) = radial.center_y {
            config.radial.center.y = v;
        }
        if let Some(v) = radial.radius_step {
            config.radial.radius_step = v;
        }
    }

    if let Some(grid) = parsed.grid {
        if let Some(v) = grid.group_padding {
            config.grid.group_padding = v;
        }
    }

    if let Some(timeline) = parsed.timeline {
        if let Some(v) = timeline.rank_separation {
            config.timeline.rank_separation = v;
        }
        if let Some(v) = timeline.node_separation {
            config.timeline.node_separation = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor_constants() {
        let config = Config::default();
        assert_eq!(config.layout.node_width, 200.0);
        assert_eq!(config.layout.node_height, 50.0);
        assert_eq!(config.layout.rank_separation, 150.0);
        assert_eq!(config.layout.node_separation, 100.0);
        assert_eq!(config.grid.group_padding, 300.0);
        assert_eq!(config.radial.center, Position::new(500.0, 300.0));
    }

    #[test]
    fn json5_overrides_merge_onto_defaults() {
        let config = parse_config(
            r#"{
                // comments are allowed
                layout: { direction: "LR", rankSeparation: 90 },
                radial: { radiusStep: 80 },
            }"#,
        )
        .unwrap();
        assert_eq!(config.layout.direction, Direction::LeftToRight);
        assert_eq!(config.layout.rank_separation, 90.0);
        assert_eq!(config.layout.node_separation, 100.0);
        assert_eq!(config.radial.radius_step, 80.0);
        assert_eq!(config.cluster, ClusterConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config(r#"{ layout: { nodeWdith: 10 } }"#).unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }

    #[test]
    fn timeline_flows_left_to_right() {
        let layout = TimelineConfig::default().layout(&LayoutConfig::default());
        assert_eq!(layout.direction, Direction::LeftToRight);
        assert_eq!(layout.rank_separation, 200.0);
        assert_eq!(layout.node_separation, 50.0);
        assert_eq!(layout.node_width, 200.0);
    }
}
