#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod search;
pub mod validate;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use document::{GraphDocument, parse_graph_json};
pub use error::{Error, Result};
pub use ir::{Direction, Edge, Node, NodeType, Position};
pub use layout::{LayoutStrategy, compute_layout};

#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    pub strategy: LayoutStrategy,
    pub config: Config,
    /// Annotate nodes with validation findings before returning.
    pub validate: bool,
}

/// Lays out a whole document and returns the updated copy.
pub fn layout_document(document: &GraphDocument, options: &LayoutOptions) -> GraphDocument {
    let placed = compute_layout(
        &document.nodes,
        &document.edges,
        &options.strategy,
        &options.config,
    );
    let mut updated = document.with_positions(&placed);
    if options.validate {
        updated.nodes = validate::annotate_nodes(&updated.nodes);
    }
    updated
}

/// Parses an exported graph, lays it out and serializes the result.
pub fn layout_json(input: &str, options: &LayoutOptions) -> Result<String> {
    let document = parse_graph_json(input)?;
    layout_document(&document, options).to_json_pretty()
}
