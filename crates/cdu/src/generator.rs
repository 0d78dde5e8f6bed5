//! Text generation from editor block descriptors.
//!
//! The generator knows a small vocabulary of its own (`GAIN`, `INTEGRATOR`,
//! `SUM`, `INPUT`, `OUTPUT`) and writes one line per block. Blocks of any
//! other type are written as `*` comment lines.

use log::{debug, trace};
use serde_json::Value;

use cdu_core::descriptor::BlockDescriptor;
use cdu_parser::error::{Diagnosed, Diagnostic, DiagnosticCollector, ErrorCode};

/// Value written for a missing gain or time constant.
const DEFAULT_PARAMETER: &str = "1.0";

/// Generates one line per block, joined with `\n`.
pub(crate) fn generate(blocks: &[BlockDescriptor]) -> Diagnosed<String> {
    let mut collector = DiagnosticCollector::new();

    let lines: Vec<String> = blocks
        .iter()
        .map(|block| line(block, &mut collector))
        .collect();

    debug!(lines = lines.len(); "Text generated");

    collector.finish(lines.join("\n"))
}

fn line(block: &BlockDescriptor, collector: &mut DiagnosticCollector) -> String {
    let BlockDescriptor {
        label, vin, vout, ..
    } = block;
    let block_type = block.kind.to_ascii_uppercase();
    let inputs = vin.join(",");

    trace!(label = label, block_type = block_type; "Generating block");

    match block_type.as_str() {
        "GAIN" => format!("{label} GAIN {inputs} {vout} K={}", parameter(block, "K")),
        "INTEGRATOR" => format!("{label} INT {inputs} {vout} T={}", parameter(block, "T")),
        "SUM" => format!("{label} SUM {inputs} {vout}"),
        "INPUT" => format!("{label} INP {vout}"),
        "OUTPUT" => match vin.first() {
            Some(first) => format!("{label} OUT {first}"),
            None => {
                collector.emit(
                    Diagnostic::warning(format!("OUTPUT block `{label}` has no input"))
                        .with_code(ErrorCode::W202)
                        .with_help("connect a signal to the output block"),
                );
                format!("{label} OUT")
            }
        },
        _ => {
            collector.emit(
                Diagnostic::warning(format!(
                    "block `{label}` has type `{block_type}`, which cannot be written as CDU text"
                ))
                .with_code(ErrorCode::W201)
                .with_help("supported types are GAIN, INTEGRATOR, SUM, INPUT and OUTPUT"),
            );
            format!("* Unknown block type {block_type}")
        }
    }
}

/// Renders parameter `name` of `block` as its JSON text.
///
/// Strings are written without quotes.
fn parameter(block: &BlockDescriptor, name: &str) -> String {
    match block.parameter(name) {
        None => DEFAULT_PARAMETER.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(value) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn descriptor(value: Value) -> BlockDescriptor {
        serde_json::from_value(value).unwrap()
    }

    fn codes(diagnosed: &Diagnosed<String>) -> Vec<ErrorCode> {
        diagnosed.diagnostics().iter().filter_map(|d| d.code()).collect()
    }

    #[test]
    fn test_gain_line() {
        let block = descriptor(json!({
            "type": "GAIN", "label": "G1", "vin": ["x"], "vout": "y", "parameters": {"K": 2.5}
        }));

        assert_eq!(generate(&[block]).into_value(), "G1 GAIN x y K=2.5");
    }

    #[test]
    fn test_default_and_string_parameters() {
        let blocks = [
            descriptor(json!({"type": "gain", "label": "G2", "vin": ["a", "b"], "vout": "c"})),
            descriptor(json!({
                "type": "Integrator", "label": "I1", "vin": ["c"], "vout": "d",
                "parameters": {"T": "#T1"}
            })),
            descriptor(json!({
                "type": "INTEGRATOR", "label": "I2", "vin": ["d"], "vout": "e",
                "parameters": {"T": 3}
            })),
        ];

        assert_eq!(
            generate(&blocks).into_value(),
            "G2 GAIN a,b c K=1.0\nI1 INT c d T=#T1\nI2 INT d e T=3"
        );
    }

    #[test]
    fn test_io_and_sum_lines() {
        let blocks = [
            descriptor(json!({"type": "INPUT", "label": "IN", "vout": "u"})),
            descriptor(json!({"type": "SUM", "label": "S", "vin": ["u", "v"], "vout": "w"})),
            descriptor(json!({"type": "OUTPUT", "label": "OUT1", "vin": ["w", "z"]})),
        ];
        let diagnosed = generate(&blocks);

        assert_eq!(diagnosed.value(), "IN INP u\nS SUM u,v w\nOUT1 OUT w");
        assert!(diagnosed.diagnostics().is_empty());
    }

    #[test]
    fn test_output_without_input() {
        let diagnosed = generate(&[descriptor(json!({"type": "OUTPUT", "label": "O"}))]);

        assert_eq!(diagnosed.value(), "O OUT");
        assert_eq!(codes(&diagnosed), [ErrorCode::W202]);
    }

    #[test]
    fn test_unknown_type() {
        let diagnosed = generate(&[descriptor(json!({"type": "delay", "label": "D"}))]);

        assert_eq!(diagnosed.value(), "* Unknown block type DELAY");
        assert!(diagnosed.value().starts_with('*'));
        assert_eq!(codes(&diagnosed), [ErrorCode::W201]);
    }

    #[test]
    fn test_empty_input() {
        let diagnosed = generate(&[]);

        assert_eq!(diagnosed.value(), "");
        assert!(diagnosed.diagnostics().is_empty());
    }
}
