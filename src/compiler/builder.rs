use crate::canvas::{CanvasIndex, CanvasNode, NodeData};
use crate::rule::RuleCondition;
use ahash::AHashSet;

/// Responsible for materializing the condition tree that feeds a node.
pub(super) struct ConditionTreeBuilder<'a, 'i> {
    index: &'i CanvasIndex<'a>,
}

impl<'a, 'i> ConditionTreeBuilder<'a, 'i> {
    pub(super) fn new(index: &'i CanvasIndex<'a>) -> Self {
        Self { index }
    }

    /// Builds one condition root per edge arriving at `node_id`, in edge order.
    /// Branches that resolve to nothing are dropped.
    ///
    /// Every node that ends up in a tree is appended to `placed` in pre-order,
    /// once per occurrence.
    pub(super) fn roots_for(
        &self,
        node_id: &'a str,
        placed: &mut Vec<&'a CanvasNode>,
    ) -> Vec<RuleCondition> {
        let mut path = AHashSet::new();
        path.insert(node_id);
        self.children_of(node_id, &path, placed)
    }

    fn children_of(
        &self,
        node_id: &str,
        path: &AHashSet<&'a str>,
        placed: &mut Vec<&'a CanvasNode>,
    ) -> Vec<RuleCondition> {
        self.index
            .incoming(node_id)
            .iter()
            .filter_map(|&edge| {
                self.build(edge.source.as_str(), path.clone(), node_id, placed)
            })
            .collect()
    }

    /// Recursively builds the subtree rooted at `node_id`.
    ///
    /// `path` holds the ancestors on this branch only. Each child gets its own
    /// copy, so a node reached along two branches is kept twice while a node
    /// that reappears on its own branch is refused.
    fn build(
        &self,
        node_id: &'a str,
        mut path: AHashSet<&'a str>,
        consumer_id: &str,
        placed: &mut Vec<&'a CanvasNode>,
    ) -> Option<RuleCondition> {
        let Some(node) = self.index.node(node_id) else {
            tracing::warn!(
                node_id,
                consumer_id,
                "edge references a node that is not on the canvas, branch dropped"
            );
            return None;
        };

        if !path.insert(node_id) {
            tracing::warn!(
                node_id,
                consumer_id,
                "cycle detected while compiling conditions, branch dropped"
            );
            return None;
        }

        match &node.data {
            NodeData::Condition(condition) => {
                placed.push(node);
                Some(RuleCondition::Condition {
                    field: condition.field.clone(),
                    operator: condition.operator,
                    value: condition.value.clone(),
                })
            }
            NodeData::Logic(logic) => {
                placed.push(node);
                Some(RuleCondition::Logic {
                    logic_type: logic.logic_type,
                    children: self.children_of(node_id, &path, placed),
                })
            }
            NodeData::Badge(_) => {
                tracing::warn!(
                    node_id,
                    consumer_id,
                    "badge node used as a condition producer, branch dropped"
                );
                None
            }
            NodeData::Unknown => None,
        }
    }
}
