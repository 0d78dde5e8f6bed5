//! Layered node placement.
//!
//! Places the nodes of a projected graph in columns by longest-path
//! layering: sources sit in column 0 and every other node sits one column
//! past its deepest producer. Edges closing a feedback loop are ignored so
//! the layering is always defined.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use petgraph::{
    algo,
    graph::{DiGraph, NodeIndex},
    visit::{self, DfsEvent},
};

use cdu_core::graph::{Graph, Position};

use crate::config::LayoutConfig;

/// Assigns a position to every node of `graph`.
///
/// Within a layer, nodes keep their order in `graph.nodes`.
pub(crate) fn apply(graph: &mut Graph, config: &LayoutConfig) {
    let layers = assign_layers(graph);

    let mut rows: HashMap<usize, usize> = HashMap::new();
    for (node, layer) in graph.nodes.iter_mut().zip(layers) {
        let row = rows.entry(layer).or_default();
        node.position = Position::new(
            layer as f64 * config.horizontal_spacing(),
            *row as f64 * config.vertical_spacing(),
        );
        *row += 1;
    }

    debug!(layers = rows.len(); "Layout calculated");
}

/// Returns the layer of each node, in node order.
fn assign_layers(graph: &Graph) -> Vec<usize> {
    let mut dataflow: DiGraph<(), ()> = DiGraph::new();
    let indices: HashMap<&str, NodeIndex> = graph
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), dataflow.add_node(())))
        .collect();

    for edge in &graph.edges {
        if let (Some(&source), Some(&target)) = (
            indices.get(edge.source.as_str()),
            indices.get(edge.target.as_str()),
        ) {
            dataflow.add_edge(source, target, ());
        }
    }

    let mut back_edges = HashSet::new();
    visit::depth_first_search(&dataflow, dataflow.node_indices(), |event| {
        if let DfsEvent::BackEdge(source, target) = event {
            back_edges.insert((source, target));
        }
    });
    trace!(back_edges = back_edges.len(); "Feedback edges ignored for layering");

    let mut acyclic: DiGraph<(), ()> = DiGraph::with_capacity(dataflow.node_count(), 0);
    for _ in dataflow.node_indices() {
        acyclic.add_node(());
    }
    for (source, target) in dataflow
        .edge_indices()
        .filter_map(|edge| dataflow.edge_endpoints(edge))
        .filter(|endpoints| !back_edges.contains(endpoints))
    {
        acyclic.add_edge(source, target, ());
    }

    let order = algo::toposort(&acyclic, None).unwrap_or_else(|_| acyclic.node_indices().collect());

    let mut layers = vec![0; acyclic.node_count()];
    for node in order {
        let next = layers[node.index()] + 1;
        for successor in acyclic.neighbors(node) {
            layers[successor.index()] = layers[successor.index()].max(next);
        }
    }

    layers
}
