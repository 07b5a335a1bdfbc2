//! End-to-end tests: canvas -> rule -> text -> rule -> canvas.
mod common;
use common::*;
use rulecanvas::prelude::*;

fn assert_same_topology(original: &Canvas, restored: &Canvas) {
    assert_eq!(kind_counts(restored), kind_counts(original));
    assert_eq!(restored.edges.len(), original.edges.len());
    assert_eq!(topology_signature(restored), topology_signature(original));
}

#[test]
fn test_simple_canvas_round_trip() {
    let original = create_simple_canvas();
    let rule = canvas_to_rule(&original.nodes, &original.edges, "r1", "R1");
    let restored = rule_to_canvas(&rule);

    assert_same_topology(&original, &restored);
}

#[test]
fn test_complex_canvas_round_trip() {
    let original = create_complex_canvas();
    let rule = canvas_to_rule(&original.nodes, &original.edges, "r1", "R1");
    let restored = rule_to_canvas(&rule);

    assert_same_topology(&original, &restored);
}

#[test]
fn test_round_trip_through_text() {
    let original = create_complex_canvas();
    let rule = canvas_to_rule(&original.nodes, &original.edges, "r1", "R1");

    let text = serialize_rule(&rule).expect("rule serializes");
    let decoded = deserialize_rule(&text).expect("serialized rule decodes");
    assert_eq!(decoded, rule);

    let restored = rule_to_canvas(&decoded);
    assert_same_topology(&original, &restored);
}

#[test]
fn test_round_trip_restores_every_position() {
    let original = create_simple_canvas();
    let rule = canvas_to_rule(&original.nodes, &original.edges, "r1", "R1");
    let restored = rule_to_canvas(&rule);

    let position_of = |kind: NodeKind| {
        restored
            .nodes_of_kind(kind)
            .map(|n| n.position)
            .next()
            .expect("kind present after expansion")
    };
    assert_eq!(position_of(NodeKind::Condition), at(0.0, 0.0));
    assert_eq!(position_of(NodeKind::Logic), at(250.0, 0.0));
    assert_eq!(position_of(NodeKind::Badge), at(500.0, 0.0));
}

#[test]
fn test_round_trip_restores_positions_on_a_complex_canvas() {
    // Every payload in this fixture is unique, so it identifies its node.
    let original = create_complex_canvas();
    let rule = canvas_to_rule(&original.nodes, &original.edges, "r1", "R1");
    let restored = rule_to_canvas(&rule);

    for node in &restored.nodes {
        let source = original
            .nodes
            .iter()
            .find(|n| n.data == node.data)
            .expect("payload exists on the original canvas");
        assert_eq!(node.position, source.position, "node {}", source.id);
    }
}

#[test]
fn test_validated_rule_survives_file_round_trip() {
    let original = create_complex_canvas();
    let rule = canvas_to_rule(&original.nodes, &original.edges, "r-file", "File");
    assert!(validate_rule(&rule).valid);

    let path = std::env::temp_dir().join(format!("rulecanvas-{}-roundtrip.json", std::process::id()));
    rule.save(&path).expect("rule saves");
    let loaded = RuleDefinition::from_file(&path).expect("rule loads");
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, rule);
}
