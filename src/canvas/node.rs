use crate::rule::{ConditionOperator, ConditionValue, LogicType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canvas coordinates of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The three node kinds the rule core understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Condition,
    Logic,
    Badge,
}

impl NodeKind {
    pub const ALL: [NodeKind; 3] = [NodeKind::Condition, NodeKind::Logic, NodeKind::Badge];
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Condition => "condition",
            NodeKind::Logic => "logic",
            NodeKind::Badge => "badge",
        };
        f.write_str(name)
    }
}

/// A single field/operator/value comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionData {
    pub field: String,
    pub operator: ConditionOperator,
    pub value: ConditionValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicData {
    pub logic_type: LogicType,
}

/// The badge granted when the upstream conditions hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeData {
    pub badge_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_name: Option<String>,
    pub quantity: u32,
}

/// Kind-specific node payload.
///
/// Nodes of any kind the core does not know (annotations, groups, ...) load as
/// `Unknown` and take no part in validation or conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeData {
    Condition(ConditionData),
    Logic(LogicData),
    Badge(BadgeData),
    #[serde(other)]
    Unknown,
}

impl NodeData {
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            NodeData::Condition(_) => Some(NodeKind::Condition),
            NodeData::Logic(_) => Some(NodeKind::Logic),
            NodeData::Badge(_) => Some(NodeKind::Badge),
            NodeData::Unknown => None,
        }
    }
}

/// A node as exchanged with the editing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    pub data: NodeData,
}

impl CanvasNode {
    pub fn condition(
        id: &str,
        position: Position,
        field: &str,
        operator: ConditionOperator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            id: id.to_string(),
            position,
            data: NodeData::Condition(ConditionData {
                field: field.to_string(),
                operator,
                value: value.into(),
            }),
        }
    }

    pub fn logic(id: &str, position: Position, logic_type: LogicType) -> Self {
        Self {
            id: id.to_string(),
            position,
            data: NodeData::Logic(LogicData { logic_type }),
        }
    }

    pub fn badge(
        id: &str,
        position: Position,
        badge_id: &str,
        badge_name: Option<&str>,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            position,
            data: NodeData::Badge(BadgeData {
                badge_id: badge_id.to_string(),
                badge_name: badge_name.map(str::to_string),
                quantity,
            }),
        }
    }

    pub fn kind(&self) -> Option<NodeKind> {
        self.data.kind()
    }
}
