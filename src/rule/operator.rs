use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison applied by a condition between a field and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    #[serde(rename = "eq")]
    Equal,
    #[serde(rename = "neq")]
    NotEqual,
    #[serde(rename = "gt")]
    GreaterThan,
    #[serde(rename = "gte")]
    GreaterThanOrEqual,
    #[serde(rename = "lt")]
    SmallerThan,
    #[serde(rename = "lte")]
    SmallerThanOrEqual,
    In,
    NotIn,
    Contains,
}

impl ConditionOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ConditionOperator::Equal => "==",
            ConditionOperator::NotEqual => "!=",
            ConditionOperator::GreaterThan => ">",
            ConditionOperator::GreaterThanOrEqual => ">=",
            ConditionOperator::SmallerThan => "<",
            ConditionOperator::SmallerThanOrEqual => "<=",
            ConditionOperator::In => "IN",
            ConditionOperator::NotIn => "NOT IN",
            ConditionOperator::Contains => "CONTAINS",
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Boolean aggregation performed by a logic node over its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicType {
    And,
    Or,
    Xor,
    Not,
}

impl LogicType {
    pub fn symbol(&self) -> &'static str {
        match self {
            LogicType::And => "AND",
            LogicType::Or => "OR",
            LogicType::Xor => "XOR",
            LogicType::Not => "NOT",
        }
    }
}

impl fmt::Display for LogicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
