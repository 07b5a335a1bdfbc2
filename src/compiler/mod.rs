//! Graph → rule conversion.

use crate::canvas::{Canvas, CanvasEdge, CanvasIndex, CanvasNode, NodeData};
use crate::rule::{ConditionSlot, LayoutNode, RuleAction, RuleDefinition, RuleLayout};
use ahash::AHashSet;

mod builder;

use builder::ConditionTreeBuilder;

/// Turns a finished canvas into a [`RuleDefinition`].
///
/// The compiler trusts its input: graph invariants are enforced while editing
/// by the connection validator. Cycles or dangling edges that slip through are
/// logged and compiled as empty branches.
pub struct RuleCompiler<'a> {
    nodes: &'a [CanvasNode],
    edges: &'a [CanvasEdge],
    description: Option<String>,
}

pub struct RuleCompilerBuilder<'a> {
    nodes: &'a [CanvasNode],
    edges: &'a [CanvasEdge],
    description: Option<String>,
}

impl<'a> RuleCompilerBuilder<'a> {
    pub fn new(nodes: &'a [CanvasNode], edges: &'a [CanvasEdge]) -> Self {
        Self {
            nodes,
            edges,
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn build(self) -> RuleCompiler<'a> {
        RuleCompiler {
            nodes: self.nodes,
            edges: self.edges,
            description: self.description,
        }
    }
}

impl<'a> RuleCompiler<'a> {
    pub fn builder(canvas: &'a Canvas) -> RuleCompilerBuilder<'a> {
        RuleCompilerBuilder::new(&canvas.nodes, &canvas.edges)
    }

    pub fn from_parts(nodes: &'a [CanvasNode], edges: &'a [CanvasEdge]) -> RuleCompilerBuilder<'a> {
        RuleCompilerBuilder::new(nodes, edges)
    }

    pub fn compile(&self, rule_id: &str, rule_name: &str) -> RuleDefinition {
        let index = CanvasIndex::new(self.nodes, self.edges);
        let trees = ConditionTreeBuilder::new(&index);

        let mut conditions = Vec::new();
        let mut actions = Vec::new();
        // Layout entries follow expansion order: each badge, then its trees in pre-order.
        let mut placed: Vec<&'a CanvasNode> = Vec::with_capacity(self.nodes.len());

        for node in self.nodes {
            let NodeData::Badge(badge) = &node.data else {
                continue;
            };
            actions.push(RuleAction::award_badge(
                &badge.badge_id,
                badge.badge_name.as_deref(),
                badge.quantity,
            ));
            placed.push(node);
            conditions.push(ConditionSlot::from_roots(
                trees.roots_for(&node.id, &mut placed),
            ));
        }

        // Nodes outside every tree keep their positions at the tail.
        let seen: AHashSet<&'a str> = placed.iter().map(|&n| n.id.as_str()).collect();
        placed.extend(self.nodes.iter().filter(|n| !seen.contains(n.id.as_str())));

        let layout = RuleLayout {
            nodes: placed
                .iter()
                .map(|n| LayoutNode {
                    id: n.id.clone(),
                    position: n.position,
                })
                .collect(),
        };

        tracing::debug!(
            rule_id,
            actions = actions.len(),
            empty_slots = conditions.iter().filter(|s| s.is_empty()).count(),
            "compiled canvas into rule"
        );

        RuleDefinition {
            id: rule_id.to_string(),
            name: rule_name.to_string(),
            description: self.description.clone(),
            conditions,
            actions,
            layout: Some(layout),
        }
    }
}

/// Converts a node/edge graph into a rule definition. See [`RuleCompiler`].
pub fn canvas_to_rule(
    nodes: &[CanvasNode],
    edges: &[CanvasEdge],
    rule_id: &str,
    rule_name: &str,
) -> RuleDefinition {
    RuleCompiler::from_parts(nodes, edges)
        .build()
        .compile(rule_id, rule_name)
}
