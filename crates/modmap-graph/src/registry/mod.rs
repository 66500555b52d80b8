//! The module registry: one entry per canonical module identity plus the
//! ordered edge list.
//!
//! A [`Registry`] is only produced by [`aggregator::RegistryAggregator::snapshot`]
//! and is read-only afterwards.

pub mod aggregator;

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::{ALL_SYMBOL, ExportRecord};

/// Port name every edge lands on at the importer side.
pub const IMPORTS_PORT: &str = "imports";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("module key must not be empty")]
pub struct EmptyModuleKey;

/// Canonical module identity. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ModuleKey(String);

impl ModuleKey {
    pub fn new(key: impl Into<String>) -> Result<Self, EmptyModuleKey> {
        let key = key.into();
        if key.is_empty() {
            return Err(EmptyModuleKey);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ModuleKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<ModuleKey> for String {
    fn from(value: ModuleKey) -> Self {
        value.0
    }
}

impl TryFrom<String> for ModuleKey {
    type Error = EmptyModuleKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ModuleKey {
    type Error = EmptyModuleKey;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Everything known about one module identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleEntry {
    /// Reached through a `./` or `../` specifier, or an analyzed file itself.
    pub is_relative: bool,
    /// Imported symbol to importers, in first-appearance order.
    pub symbols: IndexMap<String, Vec<ModuleKey>>,
    /// Exports declared by the module's own file. Empty for externals.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exports: Vec<ExportRecord>,
}

impl ModuleEntry {
    pub fn new(is_relative: bool) -> Self {
        Self {
            is_relative,
            ..Self::default()
        }
    }

    /// Importers of `symbol`, empty when nobody imports it.
    pub fn importers(&self, symbol: &str) -> &[ModuleKey] {
        self.symbols.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One import binding: `from`'s `from_port` symbol flows into `to`'s
/// `imports` port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from: ModuleKey,
    pub from_port: String,
    pub to: ModuleKey,
    pub to_port: String,
}

impl Edge {
    pub fn new(from: ModuleKey, symbol: impl Into<String>, importer: ModuleKey) -> Self {
        Self {
            from,
            from_port: symbol.into(),
            to: importer,
            to_port: IMPORTS_PORT.to_string(),
        }
    }
}

/// Final, immutable result of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    entries: IndexMap<ModuleKey, ModuleEntry>,
    links: Vec<Edge>,
}

impl Registry {
    pub(crate) fn from_parts(entries: IndexMap<ModuleKey, ModuleEntry>, links: Vec<Edge>) -> Self {
        Self { entries, links }
    }

    /// Entries in aggregation order.
    pub fn entries(&self) -> &IndexMap<ModuleKey, ModuleEntry> {
        &self.entries
    }

    pub fn links(&self) -> &[Edge] {
        &self.links
    }

    pub fn get(&self, key: &str) -> Option<&ModuleEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Edges leaving `key`, in edge-list order.
    pub fn links_from<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.links.iter().filter(move |edge| edge.from.as_str() == key)
    }

    /// Edges arriving at `key`, in edge-list order.
    pub fn links_to<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.links.iter().filter(move |edge| edge.to.as_str() == key)
    }

    /// Package and alias imports, in aggregation order.
    pub fn external_dependencies(&self) -> impl Iterator<Item = (&ModuleKey, &ModuleEntry)> {
        self.entries.iter().filter(|(_, entry)| !entry.is_relative)
    }

    /// Declared exports that no analyzed file imports, neither by name nor
    /// through a namespace import. Re-export-all declarations are skipped.
    pub fn unused_exports(&self) -> Vec<(&ModuleKey, &ExportRecord)> {
        let mut unused = Vec::new();
        for (key, entry) in &self.entries {
            if !entry.importers(ALL_SYMBOL).is_empty() {
                continue;
            }
            for export in &entry.exports {
                if matches!(export, ExportRecord::ReexportAll { .. }) {
                    continue;
                }
                if entry.importers(export.name()).is_empty() {
                    unused.push((key, export));
                }
            }
        }
        unused
    }

    /// Number of symbol slots across all entries.
    pub fn symbol_count(&self) -> usize {
        self.entries.values().map(|entry| entry.symbols.len()).sum()
    }

    /// Pretty-printed JSON, entries in aggregation order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> ModuleKey {
        ModuleKey::new(s).unwrap()
    }

    fn sample() -> Registry {
        let mut a = ModuleEntry::new(true);
        a.symbols.insert("foo".to_string(), vec![key("b")]);
        a.exports = vec![ExportRecord::named("foo"), ExportRecord::named("bar"), ExportRecord::Default];

        let mut react = ModuleEntry::new(false);
        react.symbols.insert("default".to_string(), vec![key("b")]);

        let mut entries = IndexMap::new();
        entries.insert(key("a"), a);
        entries.insert(key("react"), react);
        entries.insert(key("b"), ModuleEntry::new(true));

        Registry::from_parts(
            entries,
            vec![
                Edge::new(key("a"), "foo", key("b")),
                Edge::new(key("react"), "default", key("b")),
            ],
        )
    }

    #[test]
    fn empty_keys_are_rejected() {
        assert_eq!(ModuleKey::new(""), Err(EmptyModuleKey));
        assert!(serde_json::from_str::<ModuleKey>("\"\"").is_err());
        assert_eq!(ModuleKey::new("a").unwrap().as_str(), "a");
    }

    #[test]
    fn lookups_by_str() {
        let registry = sample();
        assert!(registry.contains("a"));
        assert_eq!(registry.get("a").unwrap().importers("foo"), &[key("b")]);
        assert!(registry.get("a").unwrap().importers("missing").is_empty());
        assert_eq!(registry.links_from("a").count(), 1);
        assert_eq!(registry.links_to("b").count(), 2);
    }

    #[test]
    fn externals_and_unused_exports() {
        let registry = sample();
        let externals: Vec<_> = registry
            .external_dependencies()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(externals, vec!["react"]);

        let unused: Vec<_> = registry
            .unused_exports()
            .into_iter()
            .map(|(k, e)| format!("{k}:{}", e.name()))
            .collect();
        assert_eq!(unused, vec!["a:bar", "a:default"]);
    }

    #[test]
    fn namespace_import_marks_every_export_used() {
        let mut entry = ModuleEntry::new(true);
        entry.exports = vec![ExportRecord::named("x")];
        entry.symbols.insert("all".to_string(), vec![key("main")]);

        let mut entries = IndexMap::new();
        entries.insert(key("lib"), entry);
        let registry = Registry::from_parts(entries, Vec::new());

        assert!(registry.unused_exports().is_empty());
    }

    #[test]
    fn edge_fields_use_camel_case() {
        let json = serde_json::to_value(Edge::new(key("a"), "foo", key("b"))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "from": "a", "fromPort": "foo", "to": "b", "toPort": "imports" })
        );
    }

    #[test]
    fn json_dump_round_trips() {
        let registry = sample();
        let json = registry.to_json().unwrap();
        let back = Registry::from_json(&json).unwrap();
        assert_eq!(registry, back);

        let order: Vec<_> = back.entries().keys().map(ModuleKey::as_str).collect();
        assert_eq!(order, vec!["a", "react", "b"]);
    }
}
