use super::{ConditionOperator, ConditionValue, LogicType};
use crate::canvas::Position;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The serializable, backend-facing form of a badge rule.
///
/// `conditions[i]` guards `actions[i]`. The canvas compiler always emits one
/// slot per action; a slot may be empty when the badge had nothing wired into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub conditions: Vec<ConditionSlot>,
    #[serde(default)]
    pub actions: Vec<RuleAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<RuleLayout>,
}

/// A node of the nested condition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleCondition {
    Condition {
        field: String,
        operator: ConditionOperator,
        value: ConditionValue,
    },
    Logic {
        #[serde(rename = "logicType")]
        logic_type: LogicType,
        #[serde(default)]
        children: Vec<RuleCondition>,
    },
}

impl RuleCondition {
    /// Number of tree levels below and including this node.
    pub fn depth(&self) -> usize {
        match self {
            RuleCondition::Condition { .. } => 1,
            RuleCondition::Logic { children, .. } => {
                1 + children.iter().map(RuleCondition::depth).max().unwrap_or(0)
            }
        }
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        match self {
            RuleCondition::Condition { .. } => 1,
            RuleCondition::Logic { children, .. } => {
                1 + children.iter().map(RuleCondition::node_count).sum::<usize>()
            }
        }
    }
}

impl fmt::Display for RuleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCondition::Condition {
                field,
                operator,
                value,
            } => write!(f, "{} {} {}", field, operator, value),
            RuleCondition::Logic {
                logic_type: LogicType::Not,
                children,
            } => match children.as_slice() {
                [only] => write!(f, "NOT {}", Parenthesized(only)),
                _ => write!(
                    f,
                    "NOT ({})",
                    children.iter().map(Parenthesized).join(", ")
                ),
            },
            RuleCondition::Logic {
                logic_type,
                children,
            } => {
                if children.is_empty() {
                    return write!(f, "{}()", logic_type);
                }
                let separator = format!(" {} ", logic_type);
                write!(
                    f,
                    "{}",
                    children.iter().map(Parenthesized).join(&separator)
                )
            }
        }
    }
}

/// Wraps nested logic in parentheses; leaves stay bare.
struct Parenthesized<'a>(&'a RuleCondition);

impl fmt::Display for Parenthesized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            RuleCondition::Logic { children, .. } if children.len() > 1 => {
                write!(f, "({})", self.0)
            }
            other => write!(f, "{}", other),
        }
    }
}

/// The condition roots guarding one action.
///
/// On the wire a slot with exactly one root is that bare node; any other count
/// is an array of roots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionSlot {
    Single(RuleCondition),
    Many(Vec<RuleCondition>),
}

impl ConditionSlot {
    pub fn from_roots(mut roots: Vec<RuleCondition>) -> Self {
        if roots.len() == 1 {
            if let Some(root) = roots.pop() {
                return ConditionSlot::Single(root);
            }
        }
        ConditionSlot::Many(roots)
    }

    pub fn empty() -> Self {
        ConditionSlot::Many(Vec::new())
    }

    pub fn roots(&self) -> &[RuleCondition] {
        match self {
            ConditionSlot::Single(root) => std::slice::from_ref(root),
            ConditionSlot::Many(roots) => roots,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roots().is_empty()
    }
}

impl From<RuleCondition> for ConditionSlot {
    fn from(root: RuleCondition) -> Self {
        ConditionSlot::Single(root)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    AwardBadge,
}

/// What happens when an action's condition slot is satisfied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub badge_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_name: Option<String>,
    pub quantity: u32,
}

impl RuleAction {
    pub fn award_badge(badge_id: &str, badge_name: Option<&str>, quantity: u32) -> Self {
        Self {
            action_type: ActionType::AwardBadge,
            badge_id: badge_id.to_string(),
            badge_name: badge_name.map(str::to_string),
            quantity,
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action_type {
            ActionType::AwardBadge => {
                write!(f, "award {}", self.badge_id)?;
                if let Some(name) = &self.badge_name {
                    write!(f, " ({})", name)?;
                }
                write!(f, " x{}", self.quantity)
            }
        }
    }
}

/// Saved node placement, used to restore the editor arrangement on load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleLayout {
    #[serde(default)]
    pub nodes: Vec<LayoutNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    pub position: Position,
}

impl RuleDefinition {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            conditions: Vec::new(),
            actions: Vec::new(),
            layout: None,
        }
    }

    /// Pairs every action with its condition slot. Missing slots read as empty.
    pub fn guarded_actions(&self) -> impl Iterator<Item = (&RuleAction, &[RuleCondition])> {
        self.actions.iter().enumerate().map(|(i, action)| {
            let roots = self.conditions.get(i).map(ConditionSlot::roots).unwrap_or(&[]);
            (action, roots)
        })
    }

    /// Renders one line per action: `<roots joined by OR> => <action>`.
    /// An empty slot renders as `(no conditions)`.
    pub fn describe(&self) -> String {
        self.guarded_actions()
            .map(|(action, roots)| {
                let guard = match roots {
                    [] => "(no conditions)".to_string(),
                    [only] => only.to_string(),
                    _ => roots.iter().map(Parenthesized).join(" OR "),
                };
                format!("{} => {}", guard, action)
            })
            .join("\n")
    }
}
