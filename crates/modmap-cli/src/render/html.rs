use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{Environment, Value, context};
use modmap_graph::Registry;
use serde::Serialize;

use crate::error::{Result, ResultExt};
use crate::render::diagram::to_nodes;

pub const TREE_FILE: &str = "tree.html";

const TREE_TEMPLATE: &str = include_str!("../../templates/tree.html");

/// Render the self-contained diagram page for `registry`.
pub fn render_tree(registry: &Registry) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(TREE_FILE, TREE_TEMPLATE)?;

    let nodes = to_nodes(registry);
    let page = env.get_template(TREE_FILE)?.render(context! {
        nodes => script_json(&nodes)?,
        links => script_json(registry.links())?,
        registries => script_json(registry.entries())?,
        module_count => registry.len(),
        link_count => registry.links().len(),
    })?;

    Ok(page)
}

/// Render and write `tree.html` into `out_dir`.
pub fn write_tree(registry: &Registry, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).with_path(out_dir)?;
    let path = out_dir.join(TREE_FILE);
    fs::write(&path, render_tree(registry)?).with_path(&path)?;
    Ok(path)
}

/// JSON that is safe to place inside a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    let json = serde_json::to_string_pretty(value)?.replace("</", "<\\/");
    Ok(Value::from_safe_string(json))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::from_json(
            r#"{
                "entries": {
                    "lib": { "isRelative": true, "symbols": { "x": ["main"] } },
                    "main": { "isRelative": true, "symbols": {} }
                },
                "links": [
                    { "from": "lib", "fromPort": "x", "to": "main", "toPort": "imports" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn page_embeds_nodes_links_and_registries() {
        let page = render_tree(&registry()).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("\"fromPort\": \"x\""));
        assert!(page.contains("\"figure\": \"TriangleLeft\""));
        assert!(page.contains("\"isRelative\": true"));
        assert!(page.contains("2 modules"));
        // JSON is not HTML-escaped
        assert!(!page.contains("&quot;"));
    }

    #[test]
    fn script_close_tags_are_neutralized() {
        let registry = Registry::from_json(
            r#"{ "entries": { "</script><b>": { "isRelative": false, "symbols": {} } }, "links": [] }"#,
        )
        .unwrap();
        let page = render_tree(&registry).unwrap();
        assert!(!page.contains("</script><b>"));
        assert!(page.contains(r"<\/script><b>"));
    }

    #[test]
    fn empty_registry_renders() {
        let page = render_tree(&Registry::default()).unwrap();
        assert!(page.contains("0 modules"));
    }
}
