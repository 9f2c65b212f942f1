use petgraph::visit::EdgeRef;
use petgraph::{graph::NodeIndex, Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use super::DependencyMap;
use crate::metadata::{CategoryNode, PackageCatalog};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeStyle {
    Builtin,
    Regular,
}

impl NodeStyle {
    pub fn fill_color(self) -> &'static str {
        match self {
            NodeStyle::Builtin => "lightgrey",
            NodeStyle::Regular => "lightblue",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageNode {
    pub name: String,
    pub label: String,
    pub description: Option<String>,
    pub builtin: bool,
}

impl PackageNode {
    pub fn new(name: String) -> Self {
        Self {
            label: name.clone(),
            name,
            description: None,
            builtin: false,
        }
    }

    /// Attaches a description and folds it into the label.
    pub fn with_description(mut self, description: String) -> Self {
        self.label = format!("{}\n{}", self.name, description);
        self.description = Some(description);
        self
    }

    pub fn with_builtin(mut self, builtin: bool) -> Self {
        self.builtin = builtin;
        self
    }

    pub fn style(&self) -> NodeStyle {
        if self.builtin {
            NodeStyle::Builtin
        } else {
            NodeStyle::Regular
        }
    }
}

/// `source` requires `target`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
}

impl DependencyEdge {
    pub fn new(source: String, target: String) -> Self {
        Self { source, target }
    }
}

pub type DependencyGraph = Graph<PackageNode, DependencyEdge, Directed>;

/// A visual grouping of nodes; may nest.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub label: String,
    pub nodes: Vec<NodeIndex>,
    pub children: Vec<Cluster>,
}

impl Cluster {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.children.is_empty()
    }

    /// Nodes of this cluster and all nested clusters.
    pub fn all_nodes(&self) -> Vec<NodeIndex> {
        let mut out = self.nodes.clone();
        for child in &self.children {
            out.extend(child.all_nodes());
        }
        out
    }
}

/// Graph plus the grouping information needed to draw it.
#[derive(Debug, Clone)]
pub struct PackageGraph {
    pub title: String,
    pub graph: DependencyGraph,
    pub clusters: Vec<Cluster>,
    pub ungrouped: Vec<NodeIndex>,
}

impl PackageGraph {
    pub fn node_by_name(&self, name: &str) -> Option<&PackageNode> {
        self.graph
            .node_indices()
            .map(|index| &self.graph[index])
            .find(|node| node.name == name)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.graph
            .edge_references()
            .any(|edge| edge.weight().source == source && edge.weight().target == target)
    }
}

pub struct GraphBuilder {
    graph: DependencyGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    pub fn add_node(&mut self, node: PackageNode) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&node.name) {
            return index;
        }
        let name = node.name.clone();
        let index = self.graph.add_node(node);
        self.node_map.insert(name, index);
        index
    }

    /// Adds an edge only when both endpoints are already nodes.
    pub fn add_edge(&mut self, edge: DependencyEdge) -> Option<petgraph::graph::EdgeIndex> {
        let source_idx = self.node_map.get(&edge.source)?;
        let target_idx = self.node_map.get(&edge.target)?;
        Some(self.graph.add_edge(*source_idx, *target_idx, edge))
    }

    pub fn get_node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    pub fn build(self) -> DependencyGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns a scan result into a categorized, colour-coded package graph.
///
/// Only scanned packages become nodes. Edges to names that were not scanned
/// are dropped. A package listed in several categories lands in the first
/// one reached; packages in no category are left ungrouped.
pub fn build_graph(
    deps: &DependencyMap,
    catalog: &PackageCatalog,
    builtins: &BTreeSet<String>,
    show_descriptions: bool,
    title: String,
) -> PackageGraph {
    let mut builder = GraphBuilder::new();

    for name in deps.keys() {
        let mut node = PackageNode::new(name.clone()).with_builtin(builtins.contains(name));
        if show_descriptions {
            if let Some(description) = catalog.description(name) {
                node = node.with_description(description.to_string());
            }
        }
        builder.add_node(node);
    }

    let mut placed = HashSet::new();
    let clusters: Vec<Cluster> = catalog
        .categories
        .roots
        .iter()
        .filter_map(|(label, node)| build_cluster(label, node, &builder, &mut placed))
        .collect();

    let ungrouped = deps
        .keys()
        .filter_map(|name| builder.get_node_index(name))
        .filter(|index| !placed.contains(index))
        .collect();

    let mut edge_count = 0usize;
    for (package, requirements) in deps {
        for requirement in requirements {
            let edge = DependencyEdge::new(package.clone(), requirement.clone());
            if builder.add_edge(edge).is_some() {
                edge_count += 1;
            }
        }
    }

    tracing::debug!(
        nodes = deps.len(),
        edges = edge_count,
        clusters = clusters.len(),
        "graph built"
    );

    PackageGraph {
        title,
        graph: builder.build(),
        clusters,
        ungrouped,
    }
}

fn build_cluster(
    label: &str,
    category: &CategoryNode,
    builder: &GraphBuilder,
    placed: &mut HashSet<NodeIndex>,
) -> Option<Cluster> {
    let children = category
        .children()
        .iter()
        .filter_map(|(child_label, child)| build_cluster(child_label, child, builder, placed))
        .collect();

    let mut nodes = Vec::new();
    for package in category.direct_packages() {
        if let Some(index) = builder.get_node_index(package) {
            if placed.insert(index) {
                nodes.push(index);
            }
        }
    }

    let cluster = Cluster {
        label: label.to_string(),
        nodes,
        children,
    };
    (!cluster.is_empty()).then_some(cluster)
}
