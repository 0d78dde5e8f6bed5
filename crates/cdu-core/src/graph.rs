//! Node/edge graph schema.
//!
//! These types serialize to the JSON document consumed by the graph editor
//! front end. Field names follow that document exactly, including its mixed
//! casing (`Vout`, `drawingData`, `selectedGroupIds`).
//!
//! Only [`Graph::nodes`] and [`Graph::edges`] carry derived content; the
//! drawing, group and parameter sections are empty scaffolding kept for
//! schema compatibility.

use serde::{Deserialize, Serialize};

/// Edge type written on every derived edge.
pub const DEFAULT_EDGE_TYPE: &str = "default";

/// Version written in [`DrawingData::version`].
pub const DRAWING_DATA_VERSION: &str = "1.0.0";

/// A complete graph document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub drawing_data: DrawingData,
    pub group_data: GroupData,
    pub parameters: Vec<serde_json::Value>,
}

impl Graph {
    /// Create a graph from nodes and edges with empty scaffolding sections.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            ..Self::default()
        }
    }

    /// Returns the node with the given id, if any.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Position of a node on the editor canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A graph node, one per diagram block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Block number zero-padded to 4 digits.
    pub id: String,
    /// Editor node type, derived from the block type.
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Position,
    pub data: NodeData,
}

/// Block fields displayed by the editor.
///
/// Optional fields are omitted from the JSON document when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    pub id: String,
    #[serde(rename = "Vout")]
    pub vout: String,
    /// The single input variable, or `[a,b,...]` for several.
    #[serde(rename = "Vin", default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(rename = "P1", default, skip_serializing_if = "Option::is_none")]
    pub p1: Option<String>,
    #[serde(rename = "P2", default, skip_serializing_if = "Option::is_none")]
    pub p2: Option<String>,
    #[serde(rename = "Vmin", default, skip_serializing_if = "Option::is_none")]
    pub vmin: Option<String>,
    #[serde(rename = "Vmax", default, skip_serializing_if = "Option::is_none")]
    pub vmax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stip: Option<String>,
}

/// A directed edge from the producer of a variable to one of its consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Edge {
    /// Create an edge feeding input port `port` (1-based) of `target`.
    ///
    /// The id encodes both endpoints and the port, so it is stable across
    /// conversions of the same diagram.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdu_core::graph::Edge;
    ///
    /// let first = Edge::new("0001", "0002", 1);
    /// assert_eq!(first.id, "reactflow__edge-0001vout-0002vin");
    ///
    /// let second = Edge::new("0001", "0002", 2);
    /// assert_eq!(second.id, "reactflow__edge-0001vout-0002vin2");
    /// ```
    pub fn new(source: impl Into<String>, target: impl Into<String>, port: usize) -> Self {
        let source = source.into();
        let target = target.into();
        let suffix = if port == 1 {
            "vin".to_string()
        } else {
            format!("vin{port}")
        };

        Self {
            id: format!("reactflow__edge-{source}vout-{target}{suffix}"),
            source,
            target,
            kind: DEFAULT_EDGE_TYPE.to_string(),
        }
    }
}

/// Free-hand drawing annotations; always empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingData {
    pub version: String,
    pub strokes: Vec<serde_json::Value>,
    pub shapes: Vec<serde_json::Value>,
}

impl Default for DrawingData {
    fn default() -> Self {
        Self {
            version: DRAWING_DATA_VERSION.to_string(),
            strokes: Vec::new(),
            shapes: Vec::new(),
        }
    }
}

/// Node grouping annotations; always empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupData {
    pub groups: Vec<serde_json::Value>,
    pub selected_group_ids: Vec<serde_json::Value>,
    pub group_counter: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_empty_graph_schema() {
        let value = serde_json::to_value(Graph::default()).unwrap();

        assert_eq!(
            value,
            json!({
                "nodes": [],
                "edges": [],
                "drawingData": {"version": "1.0.0", "strokes": [], "shapes": []},
                "groupData": {"groups": [], "selectedGroupIds": [], "groupCounter": []},
                "parameters": []
            })
        );
    }

    #[test]
    fn test_node_optional_fields_are_omitted() {
        let node = Node {
            id: "0002".to_string(),
            kind: "ganho".to_string(),
            position: Position::default(),
            data: NodeData {
                label: "Ganho".to_string(),
                id: "0002".to_string(),
                vout: "ENT2".to_string(),
                vin: Some("ENT1".to_string()),
                p1: Some("K".to_string()),
                ..NodeData::default()
            },
        };

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "id": "0002",
                "type": "ganho",
                "position": {"x": 0.0, "y": 0.0},
                "data": {"label": "Ganho", "id": "0002", "Vout": "ENT2", "Vin": "ENT1", "P1": "K"}
            })
        );
    }

    #[test]
    fn test_edge_serialization() {
        let edge = Edge::new("0001", "0003", 3);

        assert_eq!(
            serde_json::to_value(&edge).unwrap(),
            json!({
                "id": "reactflow__edge-0001vout-0003vin3",
                "source": "0001",
                "target": "0003",
                "type": "default"
            })
        );
    }

    #[test]
    fn test_graph_round_trips_through_json() {
        let graph = Graph::new(Vec::new(), vec![Edge::new("0001", "0002", 1)]);
        let text = serde_json::to_string(&graph).unwrap();
        let parsed: Graph = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed, graph);
    }
}
