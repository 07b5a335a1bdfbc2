//! # rulecanvas - Badge Rule Graph Converter
//!
//! **rulecanvas** is the core behind a visual badge-rule editor. Operators wire
//! condition, logic and badge nodes together on a canvas; this crate keeps that
//! graph well-formed while it is edited and converts it to and from the nested
//! rule definition a rule-evaluation backend stores.
//!
//! ## Core Workflow
//!
//! 1.  **Connect**: On every drag-to-connect gesture the editor asks
//!     [`connection::validate_connection`] whether the new edge is allowed.
//! 2.  **Save**: [`compiler::canvas_to_rule`] turns the finished graph into a
//!     [`rule::RuleDefinition`], and [`rule::validate_rule`] checks its shape
//!     before it is persisted with [`rule::serialize_rule`].
//! 3.  **Load**: [`rule::deserialize_rule`] reads the stored text back and
//!     [`expander::rule_to_canvas`] expands it into an editable canvas, restoring
//!     saved node positions.
//!
//! ## Quick Start
//!
//! ```rust
//! use rulecanvas::prelude::*;
//!
//! let nodes = vec![
//!     CanvasNode::condition("c1", Position::new(0.0, 0.0), "amount", ConditionOperator::GreaterThanOrEqual, 100),
//!     CanvasNode::logic("l1", Position::new(250.0, 0.0), LogicType::And),
//!     CanvasNode::badge("b1", Position::new(500.0, 0.0), "B1", Some("Big Spender"), 1),
//! ];
//! let mut edges = vec![CanvasEdge::new("e1", "c1", "l1")];
//!
//! // The editor checks each gesture before adding the edge.
//! let proposed = Connection::new("l1", "b1");
//! assert!(is_valid_connection(&proposed, &nodes, &edges));
//! edges.push(CanvasEdge::new("e2", "l1", "b1"));
//!
//! // Save.
//! let rule = canvas_to_rule(&nodes, &edges, "r1", "Big spenders");
//! assert!(validate_rule(&rule).valid);
//! let text = serialize_rule(&rule).expect("rule serializes");
//!
//! // Load.
//! let restored = deserialize_rule(&text).expect("stored rule parses");
//! let canvas = rule_to_canvas(&restored);
//! assert_eq!(canvas.nodes.len(), 3);
//! ```

pub mod canvas;
pub mod compiler;
pub mod connection;
pub mod error;
pub mod expander;
pub mod prelude;
pub mod rule;
