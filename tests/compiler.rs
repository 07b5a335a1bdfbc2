//! Tests for compiling a canvas into a rule definition.
mod common;
use common::*;
use rulecanvas::prelude::*;

#[test]
fn test_compiler_builds_simple_rule() {
    let canvas = create_simple_canvas();
    let rule = canvas_to_rule(&canvas.nodes, &canvas.edges, "r1", "Big spenders");

    assert_eq!(rule.id, "r1");
    assert_eq!(rule.name, "Big spenders");
    assert_eq!(
        rule.actions,
        vec![RuleAction {
            action_type: ActionType::AwardBadge,
            badge_id: "B1".to_string(),
            badge_name: None,
            quantity: 1,
        }]
    );

    let expected = RuleCondition::Logic {
        logic_type: LogicType::And,
        children: vec![RuleCondition::Condition {
            field: "amount".to_string(),
            operator: ConditionOperator::GreaterThanOrEqual,
            value: ConditionValue::Single(Scalar::Number(100.0)),
        }],
    };
    assert_eq!(rule.conditions, vec![ConditionSlot::Single(expected)]);
}

#[test]
fn test_simple_rule_wire_shape() {
    let canvas = create_simple_canvas();
    let rule = canvas_to_rule(&canvas.nodes, &canvas.edges, "r1", "Big spenders");
    let json = serde_json::to_value(&rule).expect("rule serializes");

    assert_eq!(
        json["actions"],
        serde_json::json!([{ "type": "award_badge", "badgeId": "B1", "quantity": 1 }])
    );
    assert_eq!(
        json["conditions"][0],
        serde_json::json!({
            "type": "logic",
            "logicType": "AND",
            "children": [
                { "type": "condition", "field": "amount", "operator": "gte", "value": 100 }
            ]
        })
    );
    assert!(json.get("description").is_none());
}

#[test]
fn test_parallel_chains_stay_separate_roots() {
    let canvas = create_complex_canvas();
    let rule = canvas_to_rule(&canvas.nodes, &canvas.edges, "r2", "Complex");

    let gold_roots = rule.conditions[0].roots();
    assert_eq!(gold_roots.len(), 2);
    assert!(matches!(
        &gold_roots[0],
        RuleCondition::Logic { logic_type: LogicType::And, children } if children.len() == 2
    ));
    assert!(matches!(
        &gold_roots[1],
        RuleCondition::Condition { field, .. } if field == "referrals"
    ));

    let json = serde_json::to_value(&rule.conditions[0]).expect("slot serializes");
    assert!(json.is_array(), "multi-root slot should serialize as a list");
}

#[test]
fn test_actions_follow_badge_node_order() {
    let canvas = create_complex_canvas();
    let rule = canvas_to_rule(&canvas.nodes, &canvas.edges, "r2", "Complex");

    let badge_ids: Vec<&str> = rule.actions.iter().map(|a| a.badge_id.as_str()).collect();
    assert_eq!(badge_ids, ["GOLD", "WORLD", "LONELY"]);
    assert_eq!(rule.actions[0].badge_name.as_deref(), Some("Gold Member"));
    assert_eq!(rule.actions[1].quantity, 2);
}

#[test]
fn test_unwired_badge_gets_empty_slot() {
    let canvas = create_complex_canvas();
    let rule = canvas_to_rule(&canvas.nodes, &canvas.edges, "r2", "Complex");

    assert_eq!(rule.conditions.len(), rule.actions.len());
    assert!(rule.conditions[2].is_empty());
    assert_eq!(
        serde_json::to_value(&rule.conditions[2]).expect("slot serializes"),
        serde_json::json!([])
    );
}

#[test]
fn test_nested_logic_is_preserved() {
    let canvas = create_complex_canvas();
    let rule = canvas_to_rule(&canvas.nodes, &canvas.edges, "r2", "Complex");

    let expected = RuleCondition::Logic {
        logic_type: LogicType::Or,
        children: vec![
            RuleCondition::Condition {
                field: "country".to_string(),
                operator: ConditionOperator::In,
                value: ["US", "DE"].into_iter().collect(),
            },
            RuleCondition::Logic {
                logic_type: LogicType::Not,
                children: vec![RuleCondition::Condition {
                    field: "days_active".to_string(),
                    operator: ConditionOperator::SmallerThan,
                    value: ConditionValue::from(30),
                }],
            },
        ],
    };
    assert_eq!(rule.conditions[1], ConditionSlot::Single(expected));
}

#[test]
fn test_diamond_shares_a_condition_between_branches() {
    // c1 feeds both l1 and l2, which both feed l3 -> b1.
    let nodes = vec![
        CanvasNode::condition("c1", at(0.0, 0.0), "amount", ConditionOperator::GreaterThan, 10),
        CanvasNode::logic("l1", at(0.0, 0.0), LogicType::And),
        CanvasNode::logic("l2", at(0.0, 0.0), LogicType::Or),
        CanvasNode::logic("l3", at(0.0, 0.0), LogicType::And),
        CanvasNode::badge("b1", at(0.0, 0.0), "B1", None, 1),
    ];
    let edges = vec![
        CanvasEdge::new("e1", "c1", "l1"),
        CanvasEdge::new("e2", "c1", "l2"),
        CanvasEdge::new("e3", "l1", "l3"),
        CanvasEdge::new("e4", "l2", "l3"),
        CanvasEdge::new("e5", "l3", "b1"),
    ];

    let rule = canvas_to_rule(&nodes, &edges, "r3", "Diamond");
    let root = &rule.conditions[0].roots()[0];
    // l3 + l1 + l2 + c1 twice
    assert_eq!(root.node_count(), 5);
    assert_eq!(root.depth(), 3);
}

#[test]
fn test_unknown_nodes_contribute_nothing() {
    let mut canvas = create_simple_canvas();
    canvas.nodes.push(CanvasNode {
        id: "note".to_string(),
        position: at(100.0, 100.0),
        data: NodeData::Unknown,
    });
    canvas.edges.push(CanvasEdge::new("e3", "note", "b1"));

    let rule = canvas_to_rule(&canvas.nodes, &canvas.edges, "r1", "With note");
    assert_eq!(rule.conditions[0].roots().len(), 1);
    assert_eq!(rule.actions.len(), 1);
}

#[test]
fn test_layout_snapshot_keeps_every_position() {
    let canvas = create_complex_canvas();
    let rule = canvas_to_rule(&canvas.nodes, &canvas.edges, "r2", "Complex");
    let layout = rule.layout.expect("compiler always snapshots layout");

    assert_eq!(layout.nodes.len(), canvas.nodes.len());
    for saved in &layout.nodes {
        let node = canvas.node(&saved.id).expect("saved id exists on the canvas");
        assert_eq!(saved.position, node.position);
    }
}

#[test]
fn test_layout_snapshot_follows_expansion_order() {
    let mut canvas = create_complex_canvas();
    canvas.nodes.push(CanvasNode::condition(
        "stray",
        at(900.0, 900.0),
        "stray",
        ConditionOperator::Equal,
        true,
    ));
    let rule = canvas_to_rule(&canvas.nodes, &canvas.edges, "r2", "Complex");
    let layout = rule.layout.expect("compiler always snapshots layout");

    let ids: Vec<&str> = layout.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "gold", "and", "amount", "tier", "referrals", "world", "or", "country", "not",
            "days", "lonely", "stray",
        ]
    );
}

#[test]
fn test_shared_condition_is_placed_once_per_occurrence() {
    let nodes = vec![
        CanvasNode::condition("c1", at(0.0, 0.0), "amount", ConditionOperator::GreaterThan, 10),
        CanvasNode::badge("b1", at(500.0, 0.0), "B1", None, 1),
        CanvasNode::badge("b2", at(500.0, 200.0), "B2", None, 1),
    ];
    let edges = vec![
        CanvasEdge::new("e1", "c1", "b1"),
        CanvasEdge::new("e2", "c1", "b2"),
    ];

    let rule = canvas_to_rule(&nodes, &edges, "r4", "Shared");
    let layout = rule.layout.expect("compiler always snapshots layout");
    let ids: Vec<&str> = layout.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["b1", "c1", "b2", "c1"]);
}

#[test]
fn test_canvas_json_tolerates_unknown_node_kinds() {
    let text = r##"{
        "nodes": [
            { "id": "c1", "position": { "x": 0, "y": 0 },
              "data": { "kind": "condition", "field": "amount", "operator": "gte", "value": 100 } },
            { "id": "b1", "position": { "x": 500, "y": 0 },
              "data": { "kind": "badge", "badgeId": "B1", "quantity": 1 } },
            { "id": "n1", "position": { "x": 250, "y": 300 },
              "data": { "kind": "note", "text": "hi", "color": "#ffcc00", "pinned": true } }
        ],
        "edges": [
            { "id": "e1", "source": "c1", "target": "b1" },
            { "id": "e2", "source": "n1", "target": "b1", "targetHandle": "in" }
        ]
    }"##;

    let canvas = Canvas::from_json(text).expect("canvas with a note node loads");
    assert_eq!(canvas.nodes.len(), 3);
    assert_eq!(canvas.nodes[2].data, NodeData::Unknown);
    assert_eq!(canvas.nodes[2].kind(), None);
    assert_eq!(canvas.nodes[2].position, at(250.0, 300.0));

    let rule = canvas_to_rule(&canvas.nodes, &canvas.edges, "r5", "Annotated");
    assert_eq!(rule.actions.len(), 1);
    assert_eq!(rule.conditions[0].roots().len(), 1);

    let check = validate_connection(&Connection::new("n1", "b1"), &canvas.nodes, &[]);
    assert!(!check.valid);
    assert_eq!(
        check.reason.as_deref(),
        Some("invalid node type on node 'n1'")
    );
}

#[test]
fn test_compiler_builder_sets_description() {
    let canvas = create_simple_canvas();
    let rule = RuleCompiler::builder(&canvas)
        .with_description("Spend at least 100")
        .build()
        .compile("r1", "Big spenders");

    assert_eq!(rule.description.as_deref(), Some("Spend at least 100"));
}

#[test]
fn test_compiler_does_not_touch_the_canvas() {
    let canvas = create_complex_canvas();
    let before = canvas.clone();
    let _ = canvas_to_rule(&canvas.nodes, &canvas.edges, "r2", "Complex");
    assert_eq!(canvas, before);
}

#[test]
fn test_describe_renders_each_action() {
    let canvas = create_complex_canvas();
    let rule = canvas_to_rule(&canvas.nodes, &canvas.edges, "r2", "Complex");
    let lines: Vec<String> = rule.describe().lines().map(str::to_string).collect();

    assert_eq!(
        lines,
        [
            "(amount >= 500 AND tier == \"gold\") OR referrals > 3 => award GOLD (Gold Member) x1",
            "country IN [\"US\", \"DE\"] OR NOT days_active < 30 => award WORLD x2",
            "(no conditions) => award LONELY x1",
        ]
    );
}
