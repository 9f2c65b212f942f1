use eldeps::core::{build_graph, DependencyMap};
use eldeps::formatters::{DotFormatter, JsonFormatter, TextFormatter};
use eldeps::metadata::{CategoryHierarchy, CategoryNode, PackageCatalog};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

fn sample() -> DependencyMap {
    let mut deps = DependencyMap::new();
    deps.insert(
        "alpha".to_string(),
        ["emacs", "beta"].iter().map(|s| s.to_string()).collect(),
    );
    deps.insert("beta".to_string(), BTreeSet::new());
    deps
}

#[test]
fn text_report_lists_each_package() {
    let out = TextFormatter::new().format(&sample());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Detected Package Dependencies:",
            "  - alpha: {beta, emacs}",
            "  - beta: {}",
        ]
    );
}

#[test]
fn text_report_for_empty_map() {
    let out = TextFormatter::new().format(&DependencyMap::new());
    assert!(out.contains("No dependencies found."));
}

#[test]
fn missing_report_names_requirers() {
    let missing = BTreeMap::from([(
        "citeproc".to_string(),
        BTreeSet::from(["citar".to_string(), "org-cite".to_string()]),
    )]);
    let out = TextFormatter::new().format_missing(&missing);
    assert!(out.contains("  - citeproc (required by citar, org-cite)"));

    let none = TextFormatter::new().format_missing(&BTreeMap::new());
    assert!(none.contains("None."));
}

#[test]
fn json_report_maps_names_to_arrays() {
    let out = JsonFormatter::new().format(&sample()).unwrap();
    let v: Value = serde_json::from_str(&out).unwrap();

    let mut alpha: Vec<&str> = v["alpha"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    alpha.sort();
    assert_eq!(alpha, vec!["beta", "emacs"]);
    assert_eq!(v["beta"].as_array().unwrap().len(), 0);
}

#[test]
fn json_report_written_to_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("deps.json");
    JsonFormatter::compact()
        .format_to_file(&sample(), &path)
        .unwrap();

    let data = std::fs::read_to_string(&path).unwrap();
    assert!(!data.contains('\n'));
    let v: Value = serde_json::from_str(&data).unwrap();
    assert!(v.is_object());
    assert_eq!(v.as_object().unwrap().len(), 2);
}

#[test]
fn dot_output_contains_clusters_nodes_and_edges() {
    let catalog = PackageCatalog {
        descriptions: BTreeMap::from([("beta".to_string(), "Says \"hi\"".to_string())]),
        categories: CategoryHierarchy::new(vec![(
            "Core libs".to_string(),
            CategoryNode::Group {
                children: vec![("Inner".to_string(), CategoryNode::leaf(["beta"]))],
                packages: vec![],
            },
        )]),
    };
    let builtins = BTreeSet::from(["beta".to_string()]);
    let graph = build_graph(
        &sample(),
        &catalog,
        &builtins,
        true,
        "Deps\n(repo)".to_string(),
    );

    let dot = DotFormatter::new().format(&graph);

    assert!(dot.starts_with("digraph \"dependencies\" {"));
    assert!(dot.contains("label=\"Deps\\n(repo)\";"));
    assert!(dot.contains("subgraph cluster_0 {"));
    assert!(dot.contains("subgraph cluster_1 {"));
    assert!(dot.contains("label=\"Core libs\";"));
    assert!(dot.contains("\"beta\" [label=\"beta\\nSays \\\"hi\\\"\", fillcolor=\"lightgrey\"];"));
    assert!(dot.contains("\"alpha\" [label=\"alpha\", fillcolor=\"lightblue\"];"));
    assert!(dot.contains("\"alpha\" -> \"beta\";"));
    assert!(!dot.contains("\"emacs\""));
    assert!(dot.trim_end().ends_with('}'));
}
