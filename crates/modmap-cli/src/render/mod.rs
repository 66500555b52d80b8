//! Output writers for a built registry.
//!
//! - [`json`]: `registries.json` and `links.json`
//! - [`diagram`]: node/port records for the diagram
//! - [`html`]: `tree.html`, a self-contained page embedding both

pub mod diagram;
pub mod html;
pub mod json;

pub use diagram::{DiagramField, DiagramNode, to_nodes};
pub use html::{TREE_FILE, render_tree, write_tree};
pub use json::{LINKS_FILE, REGISTRIES_FILE, write_registry};
