use crate::config::load_config;
use crate::document::{GraphDocument, parse_graph_json, write_document};
use crate::ir::Direction;
use crate::layout::LayoutStrategy;
use crate::layout_dump::write_layout_dump;
use crate::{LayoutOptions, layout_document};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nlay", version, about = "Automatic layout for narrative graph documents")]
pub struct Args {
    /// Input graph document (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout strategy
    #[arg(short = 's', long = "strategy", value_enum, default_value = "auto")]
    pub strategy: StrategyArg,

    /// Focus node id for the radial strategy
    #[arg(long = "focus")]
    pub focus: Option<String>,

    /// Flow direction (TB or LR) for hierarchical layouts
    #[arg(short = 'd', long = "direction")]
    pub direction: Option<String>,

    /// Config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Annotate nodes with validation findings
    #[arg(long = "validate")]
    pub validate: bool,

    /// Also write a layout dump (positions and bounds) to this path
    #[arg(long = "dump")]
    pub dump: Option<PathBuf>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StrategyArg {
    Auto,
    Hierarchical,
    Cluster,
    Radial,
    Timeline,
}

impl StrategyArg {
    fn resolve(self, focus: Option<&str>) -> Result<LayoutStrategy> {
        let name = match self {
            StrategyArg::Auto => "auto",
            StrategyArg::Hierarchical => "hierarchical",
            StrategyArg::Cluster => "cluster",
            StrategyArg::Radial => "radial",
            StrategyArg::Timeline => "timeline",
        };
        Ok(LayoutStrategy::from_name(name, focus)?)
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(token) = args.direction.as_deref() {
        config.layout.direction = Direction::from_token(token)
            .ok_or_else(|| crate::error::Error::UnknownDirection(token.to_string()))?;
    }
    let strategy = args.strategy.resolve(args.focus.as_deref())?;

    let document = read_input(args.input.as_deref())?;
    tracing::info!(
        nodes = document.nodes.len(),
        edges = document.edges.len(),
        strategy = %strategy,
        "laying out graph"
    );

    let options = LayoutOptions {
        strategy,
        config,
        validate: args.validate,
    };
    let updated = layout_document(&document, &options);

    if let Some(path) = args.dump.as_deref() {
        write_layout_dump(path, &options.strategy, &updated.nodes, &options.config.layout)?;
        tracing::info!(path = %path.display(), "wrote layout dump");
    }
    write_output(&updated, args.output.as_deref())?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Logs go to stderr so stdout can carry the document.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<GraphDocument> {
    let contents = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(parse_graph_json(&contents)?)
}

fn write_output(document: &GraphDocument, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) if path != Path::new("-") => {
            write_document(path, document)?;
        }
        _ => {
            let json = document.to_json_pretty()?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_radial_arguments() {
        let args = Args::parse_from(["nlay", "-s", "radial", "--focus", "hub", "-d", "LR"]);
        let strategy = args.strategy.resolve(args.focus.as_deref()).unwrap();
        assert_eq!(
            strategy,
            LayoutStrategy::Radial {
                focus: "hub".to_string()
            }
        );
        assert_eq!(args.direction.as_deref(), Some("LR"));
    }

    #[test]
    fn radial_without_focus_is_rejected() {
        let args = Args::parse_from(["nlay", "--strategy", "radial"]);
        assert!(args.strategy.resolve(None).is_err());
    }

    #[test]
    fn defaults_to_auto() {
        let args = Args::parse_from(["nlay"]);
        assert_eq!(args.strategy.resolve(None).unwrap(), LayoutStrategy::Auto);
        assert!(!args.validate);
    }
}
