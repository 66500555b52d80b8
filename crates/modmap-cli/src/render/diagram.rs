//! Diagram records: one node per module, one port per imported symbol.

use modmap_graph::{Edge, ModuleKey, Registry};
use serde::{Deserialize, Serialize};

pub const IMPORTS_FIELD_COLOR: &str = "green";
pub const SYMBOL_FIELD_COLOR: &str = "#00BCF2";
pub const RELATIVE_NODE_COLOR: &str = "#1570a6";
pub const EXTERNAL_NODE_COLOR: &str = "#fcba03";

/// A port on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramField {
    pub name: String,
    pub color: String,
    pub figure: String,
}

impl DiagramField {
    /// The port incoming links attach to.
    fn imports() -> Self {
        Self {
            name: modmap_graph::registry::IMPORTS_PORT.to_string(),
            color: IMPORTS_FIELD_COLOR.to_string(),
            figure: "TriangleLeft".to_string(),
        }
    }

    fn symbol(name: &str) -> Self {
        Self {
            name: name.to_string(),
            color: SYMBOL_FIELD_COLOR.to_string(),
            figure: "TriangleRight".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramNode {
    pub key: ModuleKey,
    pub fields: Vec<DiagramField>,
    /// Links leaving this node.
    pub links: Vec<Edge>,
    pub is_relative: bool,
    pub color: String,
}

/// Build diagram nodes in registry order.
pub fn to_nodes(registry: &Registry) -> Vec<DiagramNode> {
    registry
        .entries()
        .iter()
        .map(|(key, entry)| {
            let mut fields = Vec::with_capacity(entry.symbols.len() + 1);
            fields.push(DiagramField::imports());
            fields.extend(entry.symbols.keys().map(|symbol| DiagramField::symbol(symbol)));

            let color = if entry.is_relative {
                RELATIVE_NODE_COLOR
            } else {
                EXTERNAL_NODE_COLOR
            };

            DiagramNode {
                key: key.clone(),
                fields,
                links: registry.links_from(key.as_str()).cloned().collect(),
                is_relative: entry.is_relative,
                color: color.to_string(),
            }
        })
        .collect()
}
