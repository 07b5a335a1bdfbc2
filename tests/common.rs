//! Common test utilities for building canvases and rules.
use itertools::Itertools;
use rulecanvas::prelude::*;

#[allow(dead_code)]
pub fn at(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

/// The canonical single-chain rule.
///
/// Logic: `amount >= 100 AND` -> award `B1` x1
#[allow(dead_code)]
pub fn create_simple_canvas() -> Canvas {
    Canvas::new(
        vec![
            CanvasNode::condition(
                "c1",
                at(0.0, 0.0),
                "amount",
                ConditionOperator::GreaterThanOrEqual,
                100,
            ),
            CanvasNode::logic("l1", at(250.0, 0.0), LogicType::And),
            CanvasNode::badge("b1", at(500.0, 0.0), "B1", None, 1),
        ],
        vec![
            CanvasEdge::new("e1", "c1", "l1"),
            CanvasEdge::new("e2", "l1", "b1"),
        ],
    )
}

/// Three badges exercising nesting, parallel chains and an unwired badge.
///
/// - `gold`: `(amount >= 500 AND tier == "gold")` plus a separate `referrals > 3` chain
/// - `world`: `country IN [...] OR NOT (days_active < 30)`
/// - `lonely`: nothing wired in
#[allow(dead_code)]
pub fn create_complex_canvas() -> Canvas {
    Canvas::new(
        vec![
            CanvasNode::condition(
                "amount",
                at(0.0, 0.0),
                "amount",
                ConditionOperator::GreaterThanOrEqual,
                500,
            ),
            CanvasNode::condition("tier", at(0.0, 100.0), "tier", ConditionOperator::Equal, "gold"),
            CanvasNode::logic("and", at(250.0, 50.0), LogicType::And),
            CanvasNode::condition(
                "referrals",
                at(250.0, 200.0),
                "referrals",
                ConditionOperator::GreaterThan,
                3,
            ),
            CanvasNode::badge("gold", at(500.0, 100.0), "GOLD", Some("Gold Member"), 1),
            CanvasNode::condition(
                "country",
                at(0.0, 300.0),
                "country",
                ConditionOperator::In,
                ["US", "DE"].into_iter().collect::<ConditionValue>(),
            ),
            CanvasNode::condition(
                "days",
                at(0.0, 400.0),
                "days_active",
                ConditionOperator::SmallerThan,
                30,
            ),
            CanvasNode::logic("not", at(250.0, 400.0), LogicType::Not),
            CanvasNode::logic("or", at(375.0, 350.0), LogicType::Or),
            CanvasNode::badge("world", at(500.0, 350.0), "WORLD", None, 2),
            CanvasNode::badge("lonely", at(500.0, 550.0), "LONELY", None, 1),
        ],
        vec![
            CanvasEdge::new("e1", "amount", "and"),
            CanvasEdge::new("e2", "tier", "and"),
            CanvasEdge::new("e3", "and", "gold"),
            CanvasEdge::new("e4", "referrals", "gold"),
            CanvasEdge::new("e5", "country", "or"),
            CanvasEdge::new("e6", "days", "not"),
            CanvasEdge::new("e7", "not", "or"),
            CanvasEdge::new("e8", "or", "world"),
        ],
    )
}

/// A rule with one valid action and no conditions.
#[allow(dead_code)]
pub fn create_minimal_rule() -> RuleDefinition {
    let mut rule = RuleDefinition::new("r1", "Welcome");
    rule.actions
        .push(RuleAction::award_badge("WELCOME", Some("Welcome"), 1));
    rule.conditions.push(ConditionSlot::empty());
    rule
}

/// Id-free description of a canvas: for every badge, its payload plus the
/// sorted signatures of the trees feeding it. Two canvases with equal
/// signatures have the same node kinds, edge directions and condition payloads.
#[allow(dead_code)]
pub fn topology_signature(canvas: &Canvas) -> Vec<String> {
    let index = canvas.index();
    canvas
        .nodes
        .iter()
        .filter_map(|node| match &node.data {
            NodeData::Badge(badge) => Some(format!(
                "badge {} {:?} x{} <- [{}]",
                badge.badge_id,
                badge.badge_name,
                badge.quantity,
                inputs_signature(&index, &node.id)
            )),
            _ => None,
        })
        .sorted()
        .collect()
}

fn inputs_signature(index: &CanvasIndex<'_>, node_id: &str) -> String {
    index
        .incoming(node_id)
        .iter()
        .map(|edge| node_signature(index, &edge.source))
        .sorted()
        .join(", ")
}

fn node_signature(index: &CanvasIndex<'_>, node_id: &str) -> String {
    match index.node(node_id).map(|n| &n.data) {
        Some(NodeData::Condition(c)) => {
            format!("cond({} {:?} {})", c.field, c.operator, c.value)
        }
        Some(NodeData::Logic(l)) => {
            format!("{:?}({})", l.logic_type, inputs_signature(index, node_id))
        }
        other => format!("unexpected({:?})", other),
    }
}

/// How many nodes of each kind a canvas holds, ordered Condition, Logic, Badge.
#[allow(dead_code)]
pub fn kind_counts(canvas: &Canvas) -> [usize; 3] {
    let counts = canvas.nodes.iter().filter_map(CanvasNode::kind).counts();
    NodeKind::ALL.map(|kind| counts.get(&kind).copied().unwrap_or(0))
}
