pub mod graph;
pub mod missing;
pub mod scanner;

pub use graph::{
    build_graph, Cluster, DependencyEdge, DependencyGraph, GraphBuilder, NodeStyle, PackageGraph,
    PackageNode,
};
pub use missing::missing_dependencies;
pub use scanner::{package_name_for_dir, resolve_main_file, DependencyMap, PackageScanner};
