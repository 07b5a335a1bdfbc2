//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! rulecanvas crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use rulecanvas::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let canvas = Canvas::from_file("path/to/canvas.json")?;
//! let rule = canvas_to_rule(&canvas.nodes, &canvas.edges, "r1", "Welcome badge");
//!
//! let report = validate_rule(&rule);
//! if report.valid {
//!     rule.save("path/to/rule.json")?;
//! }
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::canvas::{
    BadgeData, Canvas, CanvasEdge, CanvasIndex, CanvasNode, ConditionData, Connection, LogicData,
    NodeData, NodeKind, Position,
};

// Rule model
pub use crate::rule::{
    ActionType, ConditionOperator, ConditionSlot, ConditionValue, LayoutNode, LogicType,
    RuleAction, RuleCondition, RuleDefinition, RuleLayout, RuleValidation, Scalar,
};

// Operations
pub use crate::compiler::{RuleCompiler, canvas_to_rule};
pub use crate::connection::{
    ConnectionCheck, acceptable_source_kinds, acceptable_target_kinds, check_connection,
    is_valid_connection, validate_connection,
};
pub use crate::expander::{CanvasExpander, LayoutConfig, rule_to_canvas};
pub use crate::rule::{deserialize_rule, rule_violations, serialize_rule, validate_rule};

// Error types
pub use crate::error::{ConnectionError, RuleFormatError, RuleValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
