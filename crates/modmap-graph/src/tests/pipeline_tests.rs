//! Whole-pipeline properties: repeatability and on-disk analysis.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::{ROOT, build_memory, key};
use crate::{AnalyzeOptions, FileDescriptor, ModuleFile, RegistryBuilder, WalkOptions, analyze};

fn project() -> Vec<(&'static str, &'static str)> {
    vec![
        ("components/button.tsx", "import React from 'react';\nimport { theme } from '../theme';\nexport const Button = () => null;"),
        ("components/index.ts", "export * from './button';\nexport { Card } from './card';"),
        ("components/card.tsx", "import { Button } from './button';\nimport { theme } from '../theme';\nexport function Card() {}"),
        ("main.ts", "import { Button, Card } from './components';\nimport * as theme from './theme';"),
        ("theme.ts", "export const theme = {};\nexport default theme;"),
    ]
}

#[tokio::test]
async fn repeated_builds_are_identical() {
    let first = build_memory(&project()).await.unwrap();
    let second = build_memory(&project()).await.unwrap();

    assert_eq!(first.registry, second.registry);
    assert_eq!(first.stats, second.stats);
    assert_eq!(
        first.registry.to_json().unwrap(),
        second.registry.to_json().unwrap()
    );
}

#[test]
fn parallel_scheduling_does_not_change_the_registry() {
    let root = Path::new(ROOT);
    let files: Vec<ModuleFile> = project()
        .into_iter()
        .map(|(rel, code)| {
            ModuleFile::from_text(FileDescriptor::new(root, root.join(rel)).unwrap(), code)
                .unwrap()
        })
        .collect();

    let builder = RegistryBuilder::new(ROOT);
    let expected = builder.build(files.clone()).registry;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap();
    for _ in 0..16 {
        let registry = pool.install(|| builder.build(files.clone()).registry);
        assert_eq!(registry, expected);
    }

    // sequential fold in discovery order gives the same result
    let mut aggregator = crate::RegistryAggregator::new();
    for file in &files {
        aggregator
            .record(&builder.analyze_file(file).unwrap())
            .unwrap();
    }
    assert_eq!(aggregator.snapshot(), expected);
}

#[tokio::test]
async fn project_registry_shape() {
    let output = build_memory(&project()).await.unwrap();
    let registry = &output.registry;

    assert!(output.failures.is_empty());
    assert_eq!(
        registry.get("components").unwrap().importers("Button"),
        &[key("main")]
    );
    assert_eq!(
        registry.get("theme").unwrap().importers("theme"),
        &[key("components/button"), key("components/card")]
    );
    assert_eq!(registry.get("theme").unwrap().importers("all"), &[key("main")]);
    assert_eq!(
        registry.get("components/button").unwrap().importers("Button"),
        &[key("components/card")]
    );

    // re-exports are not imports
    assert!(registry.links_to("components").next().is_none());
    assert_eq!(output.stats.files_analyzed, 5);
    assert_eq!(output.stats.edge_count, registry.links().len());
}

#[tokio::test]
async fn analyze_walks_the_disk() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    for (rel, code) in [
        ("src/a.ts", "export const a = 1;"),
        ("src/b.ts", "import { a } from './a';"),
        ("src/b.test.ts", "import { a } from './a';"),
        ("node_modules/pkg/index.js", "export default 1;"),
        ("notes.txt", "not code"),
    ] {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, code).unwrap();
    }

    let output = analyze(root, &AnalyzeOptions::default()).await.unwrap();
    let keys: Vec<_> = output
        .registry
        .entries()
        .keys()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(keys, vec!["src/a", "src/b"]);
    assert_eq!(output.registry.get("src/a").unwrap().importers("a"), &[key("src/b")]);

    let options = AnalyzeOptions {
        walk: WalkOptions::with_exclude("").unwrap(),
        ..AnalyzeOptions::default()
    };
    let output = analyze(root, &options).await.unwrap();
    assert!(output.registry.contains("node_modules/pkg"));
    assert_eq!(
        output.registry.get("src/a").unwrap().importers("a"),
        &[key("src/b.test"), key("src/b")]
    );
}

#[tokio::test]
async fn relative_root_keeps_relative_identities() {
    // a relative root: a directory under the working directory, spelled with `./`
    let temp = tempfile::Builder::new()
        .prefix("modmap-rel-root")
        .tempdir_in(".")
        .unwrap();
    let name = temp.path().file_name().unwrap().to_owned();
    fs::write(temp.path().join("a.ts"), "export const a = 1;").unwrap();
    fs::write(temp.path().join("b.ts"), "import { a } from './a';").unwrap();

    let root = Path::new(".").join(&name);
    let output = analyze(&root, &AnalyzeOptions::default()).await.unwrap();

    let keys: Vec<_> = output
        .registry
        .entries()
        .keys()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(keys, vec!["a", "b"]);
    let a = output.registry.get("a").unwrap();
    assert!(a.is_relative);
    assert_eq!(a.importers("a"), &[key("b")]);
    assert_eq!(output.stats.external_dependency_count, 0);
}

#[tokio::test]
async fn specifiers_containing_the_root_name_are_untouched() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(src.join("lib")).unwrap();
    fs::write(src.join("srcutil.ts"), "export const u = 1;").unwrap();
    fs::write(src.join("lib/x.ts"), "import { u } from '../srcutil';").unwrap();

    let output = analyze(&src, &AnalyzeOptions::default()).await.unwrap();
    assert_eq!(
        output.registry.get("srcutil").unwrap().importers("u"),
        &[key("lib/x")]
    );
}
