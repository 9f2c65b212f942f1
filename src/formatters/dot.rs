//! Graphviz DOT output for package graphs.

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::fmt::Write;

use crate::core::{Cluster, PackageGraph};

/// Escape special characters for DOT strings.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Package names contain hyphens, so identifiers are always quoted.
pub fn quote_id(input: &str) -> String {
    format!("\"{}\"", escape_label(input))
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// Incremental writer for a `digraph`.
pub struct DotBuilder {
    output: String,
    indent: usize,
    next_cluster: usize,
}

impl DotBuilder {
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {} {{", quote_id(name));
        Self {
            output,
            indent: 1,
            next_cluster: 0,
        }
    }

    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}=\"{}\";", key, escape_label(value));
        self
    }

    pub fn node_style(&mut self, attrs: &[(&str, &str)]) -> &mut Self {
        self.defaults("node", attrs)
    }

    pub fn edge_style(&mut self, attrs: &[(&str, &str)]) -> &mut Self {
        self.defaults("edge", attrs)
    }

    fn defaults(&mut self, kind: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{kind} [");
        self.write_attrs(attrs);
        self.output.push_str("];\n");
        self
    }

    pub fn node(&mut self, id: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{} [", quote_id(id));
        self.write_attrs(attrs);
        self.output.push_str("];\n");
        self
    }

    pub fn edge(&mut self, from: &str, to: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{} -> {};", quote_id(from), quote_id(to));
        self
    }

    /// Opens `subgraph cluster_N`. Labels may be any text, so ids are numbered.
    pub fn start_cluster(&mut self, label: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "subgraph cluster_{} {{", self.next_cluster);
        self.next_cluster += 1;
        self.indent += 1;
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "label=\"{}\";", escape_label(label));
        self
    }

    pub fn end_cluster(&mut self) -> &mut Self {
        self.indent -= 1;
        write_indent(&mut self.output, self.indent);
        self.output.push_str("}\n");
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }

    fn write_attrs(&mut self, attrs: &[(&str, &str)]) {
        for (i, (key, value)) in attrs.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            let _ = write!(self.output, "{}=\"{}\"", key, escape_label(value));
        }
    }
}

/// Renders a [`PackageGraph`] as DOT source.
pub struct DotFormatter {
    rankdir: &'static str,
}

impl DotFormatter {
    pub fn new() -> Self {
        Self { rankdir: "LR" }
    }

    pub fn format(&self, package_graph: &PackageGraph) -> String {
        let mut dot = DotBuilder::new("dependencies");
        dot.attr("label", &package_graph.title)
            .attr("labelloc", "t")
            .attr("rankdir", self.rankdir)
            .attr("compound", "true")
            .node_style(&[("shape", "box"), ("style", "rounded,filled")])
            .edge_style(&[("color", "gray40")])
            .blank();

        for cluster in &package_graph.clusters {
            self.write_cluster(&mut dot, package_graph, cluster);
        }
        for &index in &package_graph.ungrouped {
            self.write_node(&mut dot, package_graph, index);
        }
        dot.blank();

        let graph = &package_graph.graph;
        for edge in graph.edge_references() {
            dot.edge(&graph[edge.source()].name, &graph[edge.target()].name);
        }

        dot.build()
    }

    fn write_cluster(&self, dot: &mut DotBuilder, package_graph: &PackageGraph, cluster: &Cluster) {
        dot.start_cluster(&cluster.label);
        for child in &cluster.children {
            self.write_cluster(dot, package_graph, child);
        }
        for &index in &cluster.nodes {
            self.write_node(dot, package_graph, index);
        }
        dot.end_cluster();
    }

    fn write_node(&self, dot: &mut DotBuilder, package_graph: &PackageGraph, index: NodeIndex) {
        let node = &package_graph.graph[index];
        dot.node(
            &node.name,
            &[
                ("label", node.label.as_str()),
                ("fillcolor", node.style().fill_color()),
            ],
        );
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}
