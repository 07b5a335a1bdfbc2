//! Rule → graph conversion for re-editing a stored rule.

mod ids;
mod layout;

pub use layout::LayoutConfig;

use crate::canvas::{BadgeData, Canvas, CanvasEdge, CanvasNode, ConditionData, LogicData, NodeData};
use crate::rule::{ActionType, ConditionSlot, RuleCondition, RuleDefinition};
use ids::IdGenerator;
use layout::apply_saved_layout;

/// Nodes and edges produced for one condition subtree.
struct Subtree {
    root_id: String,
    nodes: Vec<CanvasNode>,
    edges: Vec<CanvasEdge>,
}

/// Mutable bookkeeping scoped to a single expansion.
struct ExpansionState {
    ids: IdGenerator,
    next_row: usize,
}

impl ExpansionState {
    fn new() -> Self {
        Self {
            ids: IdGenerator::new(),
            next_row: 0,
        }
    }

    fn take_row(&mut self) -> usize {
        let row = self.next_row;
        self.next_row += 1;
        row
    }
}

/// Expands a [`RuleDefinition`] into a fresh, positioned canvas.
pub struct CanvasExpander {
    layout: LayoutConfig,
}

#[derive(Default)]
pub struct CanvasExpanderBuilder {
    layout: LayoutConfig,
}

impl CanvasExpanderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn build(self) -> CanvasExpander {
        CanvasExpander {
            layout: self.layout,
        }
    }
}

impl Default for CanvasExpander {
    fn default() -> Self {
        CanvasExpanderBuilder::new().build()
    }
}

impl CanvasExpander {
    pub fn builder() -> CanvasExpanderBuilder {
        CanvasExpanderBuilder::new()
    }

    /// Builds the canvas. Every call starts its own id sequence, so expanding
    /// the same rule twice yields identical ids.
    pub fn expand(&self, rule: &RuleDefinition) -> Canvas {
        let mut state = ExpansionState::new();
        let max_depth = rule
            .conditions
            .iter()
            .flat_map(ConditionSlot::roots)
            .map(RuleCondition::depth)
            .max()
            .unwrap_or(0);

        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        for (action_index, (action, roots)) in rule.guarded_actions().enumerate() {
            let badge_id = match action.action_type {
                ActionType::AwardBadge => {
                    let id = state.ids.node_id();
                    nodes.push(CanvasNode {
                        id: id.clone(),
                        position: self.layout.badge_position(max_depth, action_index),
                        data: NodeData::Badge(BadgeData {
                            badge_id: action.badge_id.clone(),
                            badge_name: action.badge_name.clone(),
                            quantity: action.quantity,
                        }),
                    });
                    id
                }
            };

            for root in roots {
                let subtree = self.expand_condition(root, 1, max_depth, &mut state);
                edges.push(CanvasEdge::new(&state.ids.edge_id(), &subtree.root_id, &badge_id));
                nodes.extend(subtree.nodes);
                edges.extend(subtree.edges);
            }
        }

        if rule.conditions.len() > rule.actions.len() {
            tracing::debug!(
                rule_id = %rule.id,
                extra = rule.conditions.len() - rule.actions.len(),
                "condition slots without a matching action were not expanded"
            );
        }

        if let Some(saved) = &rule.layout {
            apply_saved_layout(&mut nodes, saved);
        }

        tracing::debug!(
            rule_id = %rule.id,
            nodes = nodes.len(),
            edges = edges.len(),
            "expanded rule into canvas"
        );

        Canvas { nodes, edges }
    }

    /// Expands one condition subtree. Children are upstream producers, so their
    /// edges point at the node built here.
    fn expand_condition(
        &self,
        condition: &RuleCondition,
        depth: usize,
        max_depth: usize,
        state: &mut ExpansionState,
    ) -> Subtree {
        let id = state.ids.node_id();
        let position = self
            .layout
            .tree_position(max_depth, depth, state.take_row());

        match condition {
            RuleCondition::Condition {
                field,
                operator,
                value,
            } => Subtree {
                nodes: vec![CanvasNode {
                    id: id.clone(),
                    position,
                    data: NodeData::Condition(ConditionData {
                        field: field.clone(),
                        operator: *operator,
                        value: value.clone(),
                    }),
                }],
                edges: Vec::new(),
                root_id: id,
            },
            RuleCondition::Logic {
                logic_type,
                children,
            } => {
                let mut nodes = vec![CanvasNode {
                    id: id.clone(),
                    position,
                    data: NodeData::Logic(LogicData {
                        logic_type: *logic_type,
                    }),
                }];
                let mut edges = Vec::new();

                for child in children {
                    let subtree = self.expand_condition(child, depth + 1, max_depth, state);
                    edges.push(CanvasEdge::new(&state.ids.edge_id(), &subtree.root_id, &id));
                    nodes.extend(subtree.nodes);
                    edges.extend(subtree.edges);
                }

                Subtree {
                    root_id: id,
                    nodes,
                    edges,
                }
            }
        }
    }
}

/// Expands a rule with the default grid. See [`CanvasExpander`].
pub fn rule_to_canvas(rule: &RuleDefinition) -> Canvas {
    CanvasExpander::default().expand(rule)
}
