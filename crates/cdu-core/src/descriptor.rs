//! Reduced block descriptors accepted by the text generator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One block of an editor graph, reduced to what the text generator needs.
///
/// # Examples
///
/// ```
/// use cdu_core::descriptor::BlockDescriptor;
///
/// let json = r#"{"type": "GAIN", "label": "G1", "vin": ["x"], "vout": "y", "parameters": {"K": 2.5}}"#;
/// let block: BlockDescriptor = serde_json::from_str(json).unwrap();
///
/// assert_eq!(block.kind, "GAIN");
/// assert_eq!(block.vin, ["x"]);
/// assert_eq!(block.parameter("K").map(|v| v.to_string()), Some("2.5".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    /// Block type, matched case-insensitively against the generator vocabulary.
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    #[serde(default)]
    pub vin: Vec<String>,
    #[serde(default)]
    pub vout: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_json::Value>,
}

impl BlockDescriptor {
    /// Returns the parameter named `name`, if present.
    pub fn parameter(&self, name: &str) -> Option<&serde_json::Value> {
        self.parameters.get(name)
    }
}

/// The body accepted by the export operation: either a bare list of blocks
/// or an object wrapping the list under `blocks`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExportRequest {
    List(Vec<BlockDescriptor>),
    Wrapped {
        #[serde(default)]
        blocks: Vec<BlockDescriptor>,
    },
}

impl ExportRequest {
    /// Unwraps the block list.
    pub fn into_blocks(self) -> Vec<BlockDescriptor> {
        match self {
            Self::List(blocks) | Self::Wrapped { blocks } => blocks,
        }
    }
}
