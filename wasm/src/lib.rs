use narrative_layout::{Direction, LayoutOptions, LayoutStrategy, layout_json};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphLayoutOptions {
    strategy: Option<String>,
    focus: Option<String>,
    direction: Option<String>,
    validate: Option<bool>,
}

fn build_layout_options(options: GraphLayoutOptions) -> Result<LayoutOptions, String> {
    let strategy = LayoutStrategy::from_name(
        options.strategy.as_deref().unwrap_or("auto"),
        options.focus.as_deref(),
    )
    .map_err(|error| error.to_string())?;

    let mut layout_options = LayoutOptions {
        strategy,
        validate: options.validate.unwrap_or(false),
        ..LayoutOptions::default()
    };
    if let Some(token) = options.direction.as_deref() {
        layout_options.config.layout.direction =
            Direction::from_token(token).ok_or_else(|| format!("Unknown direction '{token}'"))?;
    }
    Ok(layout_options)
}

fn layout_graph(document_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let options = match options_json {
        Some(raw_options) => serde_json::from_str::<GraphLayoutOptions>(raw_options)
            .map_err(|error| error.to_string())?,
        None => GraphLayoutOptions::default(),
    };
    let layout_options = build_layout_options(options)?;
    layout_json(document_json, &layout_options).map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn layout_graph_json(document_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    layout_graph(document_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}
