//! Live validation of drag-to-connect gestures.

mod capabilities;

pub use capabilities::*;

use crate::canvas::{CanvasEdge, CanvasIndex, CanvasNode, Connection, NodeKind};
use crate::error::ConnectionError;
use ahash::AHashSet;
use serde::Serialize;

/// Verdict on a proposed edge, in the shape the editing surface consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<Result<(), ConnectionError>> for ConnectionCheck {
    fn from(result: Result<(), ConnectionError>) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                reason: None,
            },
            Err(e) => Self {
                valid: false,
                reason: Some(e.to_string()),
            },
        }
    }
}

/// Decides whether adding `proposed` keeps the graph well-formed.
///
/// Checks run in a fixed order and stop at the first failure. The graph itself
/// is never modified.
pub fn check_connection(
    proposed: &Connection,
    nodes: &[CanvasNode],
    edges: &[CanvasEdge],
) -> Result<(), ConnectionError> {
    let (source_id, target_id) = match (proposed.source.as_deref(), proposed.target.as_deref()) {
        (Some(s), Some(t)) if !s.is_empty() && !t.is_empty() => (s, t),
        _ => return Err(ConnectionError::MissingEndpoint),
    };

    let index = CanvasIndex::new(nodes, edges);
    let source = index
        .node(source_id)
        .ok_or_else(|| ConnectionError::NodeNotFound(source_id.to_string()))?;
    let target = index
        .node(target_id)
        .ok_or_else(|| ConnectionError::NodeNotFound(target_id.to_string()))?;

    if source_id == target_id {
        return Err(ConnectionError::SelfConnection);
    }

    let source_kind = source
        .kind()
        .ok_or_else(|| ConnectionError::InvalidNodeType(source.id.clone()))?;
    let target_kind = target
        .kind()
        .ok_or_else(|| ConnectionError::InvalidNodeType(target.id.clone()))?;

    match (source_kind, target_kind) {
        (NodeKind::Badge, _) => return Err(ConnectionError::BadgeIsTerminal),
        (NodeKind::Condition, NodeKind::Condition) => {
            return Err(ConnectionError::ConditionToCondition);
        }
        (_, NodeKind::Condition) => return Err(ConnectionError::ConditionIsLeaf),
        _ => {}
    }

    if index.has_edge(source_id, target_id) {
        return Err(ConnectionError::DuplicateConnection {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
        });
    }

    if reaches(&index, target_id, source_id) {
        return Err(ConnectionError::WouldCreateCycle);
    }

    Ok(())
}

/// Full verdict with a human-readable reason on failure.
pub fn validate_connection(
    proposed: &Connection,
    nodes: &[CanvasNode],
    edges: &[CanvasEdge],
) -> ConnectionCheck {
    check_connection(proposed, nodes, edges).into()
}

pub fn is_valid_connection(
    proposed: &Connection,
    nodes: &[CanvasNode],
    edges: &[CanvasEdge],
) -> bool {
    check_connection(proposed, nodes, edges).is_ok()
}

/// Depth-first search along existing outgoing edges. O(V+E) thanks to the visited set.
fn reaches(index: &CanvasIndex<'_>, from: &str, goal: &str) -> bool {
    let mut visited: AHashSet<&str> = AHashSet::new();
    let mut stack = vec![from];

    while let Some(current) = stack.pop() {
        if current == goal {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        for edge in index.outgoing(current) {
            if !visited.contains(edge.target.as_str()) {
                stack.push(edge.target.as_str());
            }
        }
    }
    false
}
