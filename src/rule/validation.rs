use super::RuleDefinition;
use crate::error::RuleValidationError;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// Outcome of [`validate_rule`]. `errors` holds every violation found, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl fmt::Display for RuleValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "valid")
        } else {
            write!(f, "invalid: {}", self.errors.iter().join("; "))
        }
    }
}

/// Collects every structural violation that would block saving `rule`.
///
/// Graph-level invariants (acyclicity, leaf conditions, terminal badges) are
/// not re-checked here; the connection validator owns those.
pub fn rule_violations(rule: &RuleDefinition) -> Vec<RuleValidationError> {
    let mut violations = Vec::new();

    if rule.id.is_empty() {
        violations.push(RuleValidationError::EmptyId);
    }
    if rule.name.trim().is_empty() {
        violations.push(RuleValidationError::EmptyName);
    }
    if rule.actions.is_empty() {
        violations.push(RuleValidationError::NoActions);
    }

    for (index, action) in rule.actions.iter().enumerate() {
        if action.badge_id.is_empty() {
            violations.push(RuleValidationError::EmptyBadgeId { index });
        }
        if action.quantity < 1 {
            violations.push(RuleValidationError::InvalidQuantity {
                index,
                quantity: action.quantity,
            });
        }
    }

    violations
}

/// Shallow save-time check of a rule definition. Never fails; accumulates errors.
pub fn validate_rule(rule: &RuleDefinition) -> RuleValidation {
    let errors: Vec<String> = rule_violations(rule)
        .iter()
        .map(ToString::to_string)
        .collect();
    RuleValidation {
        valid: errors.is_empty(),
        errors,
    }
}
