use crate::canvas::{CanvasNode, Position};
use crate::rule::RuleLayout;
use ahash::{AHashMap, AHashSet};
use serde::Deserialize;

/// Grid used to place expanded nodes before any saved layout is applied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Horizontal distance between tree levels.
    pub column_spacing: f64,
    /// Vertical distance between consecutive condition/logic nodes.
    pub row_spacing: f64,
    /// Vertical distance between badge rows.
    pub badge_row_spacing: f64,
    /// Top-left corner of the generated grid.
    pub origin: Position,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_spacing: 250.0,
            row_spacing: 100.0,
            badge_row_spacing: 150.0,
            origin: Position::new(50.0, 50.0),
        }
    }
}

impl LayoutConfig {
    /// Position of a node `depth` levels upstream of the badge column.
    /// Deeper nodes sit further left; the badge column is at `max_depth`.
    pub(crate) fn tree_position(&self, max_depth: usize, depth: usize, row: usize) -> Position {
        let column = max_depth.saturating_sub(depth);
        Position::new(
            self.origin.x + column as f64 * self.column_spacing,
            self.origin.y + row as f64 * self.row_spacing,
        )
    }

    pub(crate) fn badge_position(&self, max_depth: usize, action_index: usize) -> Position {
        Position::new(
            self.origin.x + max_depth as f64 * self.column_spacing,
            self.origin.y + action_index as f64 * self.badge_row_spacing,
        )
    }
}

/// Moves generated nodes onto their saved positions.
///
/// A saved entry with the same id wins; otherwise the entry at the same array
/// index is used, unless another node already claimed it by id. Nodes with
/// neither keep their generated position.
pub(crate) fn apply_saved_layout(nodes: &mut [CanvasNode], layout: &RuleLayout) {
    let by_id: AHashMap<&str, usize> = layout
        .nodes
        .iter()
        .enumerate()
        .map(|(i, saved)| (saved.id.as_str(), i))
        .collect();

    let matched: Vec<Option<usize>> = nodes
        .iter()
        .map(|node| by_id.get(node.id.as_str()).copied())
        .collect();
    let claimed: AHashSet<usize> = matched.iter().flatten().copied().collect();

    for (i, (node, by_id_match)) in nodes.iter_mut().zip(matched).enumerate() {
        let entry = by_id_match.or_else(|| (!claimed.contains(&i)).then_some(i));
        if let Some(saved) = entry.and_then(|e| layout.nodes.get(e)) {
            node.position = saved.position;
        }
    }
}
