//! Integration tests for the Converter API
//!
//! These tests drive both conversion directions through the public facade.

use float_cmp::approx_eq;

use cdu::{
    Converter, CduError, ErrorCode,
    block_type::ContinuationMode,
    config::{AppConfig, LayoutConfig, ParserConfig},
    descriptor::BlockDescriptor,
};

const PSS_BR: &str = include_str!("../../../samples/pss_br.cdu");
const MULTI_DIAGRAM: &str = include_str!("../../../samples/multi_diagram.cdu");
const RECOVERABLE: &str = include_str!("../../../samples/recoverable.cdu");

fn codes(diagnostics: &[cdu::Diagnostic]) -> Vec<ErrorCode> {
    diagnostics.iter().filter_map(|d| d.code()).collect()
}

#[test]
fn test_converter_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Converter>();

    let _converter = Converter::default();
}

#[test]
fn test_import_stabilizer() {
    let converter = Converter::default();
    let imported = converter.import(PSS_BR).expect("Failed to import");
    assert!(
        imported.diagnostics().is_empty(),
        "Unexpected diagnostics: {:?}",
        imported.diagnostics()
    );

    let graph = imported.value().graph();
    let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        ["0102", "0100", "0101", "0001", "0002", "0003", "0004", "0005", "0006", "0007", "0200"]
    );

    let soma = graph.node("0001").expect("SOMA node");
    assert_eq!(soma.kind, "soma");
    assert_eq!(soma.data.vin.as_deref(), Some("[PE,W,VREF]"));

    let pol = graph.node("0005").expect("POL(S) node");
    assert_eq!(pol.kind, "pol(s)");
    assert_eq!(pol.data.label, "Pol(S)");
    assert_eq!(pol.data.p1.as_deref(), Some("1.0"));
    assert_eq!(pol.data.p2.as_deref(), Some("#T1"));

    let square = graph.node("0007").expect("FUNCAO node");
    assert_eq!(square.kind, "x2");
    assert_eq!(square.data.label, "Funcao");
    assert_eq!(square.data.stip.as_deref(), Some("X**2"));

    let limiter = graph.node("0006").expect("LIMITA node");
    assert_eq!(limiter.data.vmin.as_deref(), Some("#VSMIN"));
    assert_eq!(limiter.data.vmax.as_deref(), Some("#VSMAX"));

    assert_eq!(graph.node("0100").map(|n| n.kind.as_str()), Some("import"));
    assert!(graph.nodes.iter().all(|n| n.position.x == 0.0 && n.position.y == 0.0));
}

#[test]
fn test_import_stabilizer_edges() {
    let imported = Converter::default().import(PSS_BR).expect("Failed to import");
    let graph = imported.value().graph();

    let ids: Vec<_> = graph.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "reactflow__edge-0100vout-0001vin",
            "reactflow__edge-0101vout-0001vin2",
            "reactflow__edge-0102vout-0001vin3",
            "reactflow__edge-0001vout-0002vin",
            "reactflow__edge-0002vout-0003vin",
            "reactflow__edge-0003vout-0004vin",
            "reactflow__edge-0004vout-0005vin",
            "reactflow__edge-0005vout-0006vin",
            "reactflow__edge-0004vout-0007vin",
            "reactflow__edge-0006vout-0200vin",
        ]
    );
    assert!(graph.edges.iter().all(|e| e.kind == "default"));
}

#[test]
fn test_graph_json_document() {
    let imported = Converter::default().import(PSS_BR).expect("Failed to import");
    let json = imported.value().graph_json(false).expect("Failed to serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Invalid JSON");

    assert_eq!(value["nodes"][0]["data"]["Vout"], "VREF");
    assert_eq!(value["nodes"][0]["position"]["x"], 0.0);
    assert!(value["nodes"][0]["data"].get("Vin").is_none());
    assert_eq!(value["drawingData"]["version"], "1.0.0");
    assert_eq!(value["groupData"]["selectedGroupIds"], serde_json::json!([]));
    assert_eq!(value["parameters"], serde_json::json!([]));

    let pretty = imported.value().graph_json(true).expect("Failed to serialize");
    assert!(pretty.contains('\n'));
}

#[test]
fn test_import_with_layout() {
    let config = AppConfig::new(ParserConfig::default(), LayoutConfig::new(true, 250.0, 120.0));
    let imported = Converter::new(config).import(PSS_BR).expect("Failed to import");
    let graph = imported.value().graph();

    let export = graph.node("0200").expect("EXPORT node");
    assert!(approx_eq!(f64, export.position.x, 1750.0));
    assert!(approx_eq!(f64, export.position.y, 0.0));

    let square = graph.node("0007").expect("FUNCAO node");
    assert!(approx_eq!(f64, square.position.x, 1250.0));
    assert!(approx_eq!(f64, square.position.y, 120.0));

    let second_import = graph.node("0100").expect("IMPORT node");
    assert!(approx_eq!(f64, second_import.position.x, 0.0));
    assert!(approx_eq!(f64, second_import.position.y, 120.0));
}

#[test]
fn test_import_recoverable_problems() {
    let imported = Converter::default().import(RECOVERABLE).expect("Failed to import");

    assert_eq!(
        codes(imported.diagnostics()),
        [
            ErrorCode::E102,
            ErrorCode::W002,
            ErrorCode::E201,
            ErrorCode::E101,
            ErrorCode::W003,
            ErrorCode::W101,
            ErrorCode::W102,
        ]
    );

    let graph = imported.value().graph();
    assert_eq!(graph.nodes.len(), 4);
    assert!(graph.edges.iter().any(|e| e.source == "0004" && e.target == "0005"));
    assert!(!graph.edges.iter().any(|e| e.source == "0002" && e.target == "0005"));
}

#[test]
fn test_import_without_section() {
    let err = Converter::default()
        .import("TITU\nSEM DIAGRAMA\n")
        .expect_err("Import should fail");

    match err {
        CduError::Parse { err, src } => {
            assert_eq!(codes(err.diagnostics()), [ErrorCode::E001]);
            assert_eq!(src, "TITU\nSEM DIAGRAMA\n");
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_import_bytes_latin1() {
    let mut bytes = b"( ESTABILIZA\xC7\xC3O\nDCDU\n000001 CONVERS\xC3O\n".to_vec();
    bytes.extend_from_slice(b"0001 ENTRAD               U\nFIMCDU\n999999\n");

    let imported = Converter::default().import_bytes(&bytes).expect("Failed to import");

    assert_eq!(imported.value().diagram().name(), "CONVERSÃO");
    assert_eq!(imported.value().graph().nodes.len(), 1);
}

#[test]
fn test_import_all() {
    let converter = Converter::default();

    let all = converter.import_all(MULTI_DIAGRAM).expect("Failed to import");
    let names: Vec<_> = all.value().iter().map(|i| i.diagram().name()).collect();
    assert_eq!(names, ["RAMP", "HOLD", "LEGADODCDU"]);

    let legacy = all.value()[2].graph();
    assert_eq!(legacy.edges.len(), 1);

    let first = converter.import(MULTI_DIAGRAM).expect("Failed to import");
    assert_eq!(first.value().diagram().name(), "RAMP");
}

#[test]
fn test_standard_continuation_mode() {
    let source = "DCDU\n000001 A\n0001 FUNCAO X**2.  X      Y\n                   Z\nFIMCDU\n";
    let config = AppConfig::new(
        ParserConfig::new(ContinuationMode::Standard, "DCDU"),
        LayoutConfig::default(),
    );

    let imported = Converter::new(config).import(source).expect("Failed to import");

    assert_eq!(imported.value().graph().nodes[0].data.vin.as_deref(), Some("X"));
    assert!(codes(imported.diagnostics()).contains(&ErrorCode::W002));
}

#[test]
fn test_export_gain() {
    let block: BlockDescriptor = serde_json::from_str(
        r#"{"type": "GAIN", "label": "G1", "vin": ["x"], "vout": "y", "parameters": {"K": 2.5}}"#,
    )
    .expect("Invalid descriptor");

    let exported = Converter::default().export(&[block]);

    assert_eq!(exported.value(), "G1 GAIN x y K=2.5");
    assert!(exported.diagnostics().is_empty());
}

#[test]
fn test_export_json_shapes() {
    let converter = Converter::default();

    let bare = converter
        .export_json(r#"[{"type": "INPUT", "label": "I1", "vout": "u"}, {"type": "PID", "label": "C"}]"#)
        .expect("Failed to export");
    assert_eq!(bare.value(), "I1 INP u\n* Unknown block type PID");
    assert_eq!(codes(bare.diagnostics()), [ErrorCode::W201]);

    let wrapped = converter
        .export_json(r#"{"blocks": [{"type": "OUTPUT", "label": "O1", "vin": ["u"]}]}"#)
        .expect("Failed to export");
    assert_eq!(wrapped.value(), "O1 OUT u");

    let empty = converter.export_json("[]").expect("Failed to export");
    assert_eq!(empty.value(), "");
}

#[test]
fn test_export_json_malformed() {
    let err = Converter::default()
        .export_json("{not json")
        .expect_err("Export should fail");

    assert!(matches!(err, CduError::Json(_)));
}
