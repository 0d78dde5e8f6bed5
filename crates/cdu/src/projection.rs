//! Graph projection.
//!
//! Derives the node/edge [`Graph`] of a parsed diagram. Every block becomes a
//! node; every input variable that some block produces becomes an edge from
//! the producer to the consumer.

use indexmap::IndexMap;
use log::{debug, trace};

use cdu_core::{
    block_type::{FUNCAO, SQUARE_SUBTYPE},
    graph::{Edge, Graph, Node, NodeData, Position},
    semantic::{Block, Dcdu, ParamColumn},
};
use cdu_parser::error::{Diagnosed, Diagnostic, DiagnosticCollector, ErrorCode};

/// Node type of a `FUNCAO` block whose subtype is `X**2`.
const SQUARE_NODE_TYPE: &str = "x2";

/// Projects `diagram` onto a graph with every node at the origin.
pub(crate) fn project(diagram: &Dcdu) -> Diagnosed<Graph> {
    let mut collector = DiagnosticCollector::new();
    let producers = producers(diagram, &mut collector);

    let nodes: Vec<Node> = diagram.all_blocks().map(node).collect();

    let mut edges = Vec::new();
    for block in diagram.all_blocks() {
        let target = block.node_id();
        for (index, variable) in block.input_vars().iter().enumerate() {
            match producers.get(&variable.to_ascii_uppercase()) {
                Some(source) => edges.push(Edge::new(source.as_str(), target.as_str(), index + 1)),
                None => collector.emit(
                    Diagnostic::warning(format!(
                        "variable `{variable}` read by block {target} is not produced by any block"
                    ))
                    .with_code(ErrorCode::W102)
                    .with_help(format!("no edge is drawn into input {} of block {target}", index + 1)),
                ),
            }
        }
    }

    debug!(nodes = nodes.len(), edges = edges.len(); "Graph projected");

    collector.finish(Graph::new(nodes, edges))
}

/// Maps each produced variable, upper-cased, to the id of its producer.
///
/// When several blocks produce the same variable, the last one wins.
fn producers(diagram: &Dcdu, collector: &mut DiagnosticCollector) -> IndexMap<String, String> {
    let mut producers = IndexMap::new();

    for block in diagram.all_blocks() {
        let variable = block.output_var();
        if variable.is_empty() {
            continue;
        }

        let node_id = block.node_id();
        if let Some(previous) = producers.insert(variable.to_ascii_uppercase(), node_id.clone()) {
            collector.emit(
                Diagnostic::warning(format!(
                    "variable `{variable}` is produced by blocks {previous} and {node_id}"
                ))
                .with_code(ErrorCode::W101)
                .with_help(format!("edges reading `{variable}` start at block {node_id}")),
            );
        }
    }

    trace!(producers:?; "Variable producers");

    producers
}

fn node(block: &Block) -> Node {
    let id = block.node_id();
    let non_empty = |value: &str| (!value.is_empty()).then(|| value.to_string());

    let vin = match block.input_vars() {
        [] => None,
        [single] => Some(single.clone()),
        many => Some(format!("[{}]", many.join(","))),
    };

    Node {
        id: id.clone(),
        kind: node_type(block),
        position: Position::default(),
        data: NodeData {
            label: title_case(block.block_type()),
            id,
            vout: block.output_var().to_string(),
            vin,
            p1: block.params(ParamColumn::P1).first().cloned(),
            p2: block.params(ParamColumn::P2).first().cloned(),
            vmin: non_empty(block.vmin()),
            vmax: non_empty(block.vmax()),
            stip: non_empty(block.subtype()),
        },
    }
}

/// Returns the editor node type of `block`.
///
/// `FUNCAO` blocks are typed by their subtype so each nonlinear function
/// gets its own node component.
fn node_type(block: &Block) -> String {
    if !block.is_type(FUNCAO) || block.subtype().is_empty() {
        return block.block_type().to_lowercase();
    }

    if block.subtype().eq_ignore_ascii_case(SQUARE_SUBTYPE) {
        SQUARE_NODE_TYPE.to_string()
    } else {
        block.subtype().to_lowercase()
    }
}

/// Title-cases `text`: the first letter of every run of letters is
/// upper-cased and the rest lower-cased, so `POL(S)` becomes `Pol(S)`.
fn title_case(text: &str) -> String {
    let mut previous_is_letter = false;

    text.chars()
        .flat_map(|c| {
            let is_letter = c.is_alphabetic();
            let mapped: Vec<char> = if is_letter && previous_is_letter {
                c.to_lowercase().collect()
            } else {
                c.to_uppercase().collect()
            };
            previous_is_letter = is_letter;
            mapped
        })
        .collect()
}
