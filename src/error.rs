use thiserror::Error;

/// Reasons a proposed edge is refused by the connection validator.
///
/// The `Display` text is the human-readable reason handed back to the editor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("incomplete connection: both a source and a target are required")]
    MissingEndpoint,

    #[error("incomplete connection: node '{0}' does not exist on the canvas")]
    NodeNotFound(String),

    #[error("cannot connect to itself")]
    SelfConnection,

    #[error("invalid node type on node '{0}'")]
    InvalidNodeType(String),

    #[error("badge node is terminal, no outgoing connections")]
    BadgeIsTerminal,

    #[error("condition cannot directly target condition; combine via a logic node")]
    ConditionToCondition,

    #[error("condition nodes are leaves and accept no incoming connections")]
    ConditionIsLeaf,

    #[error("connection from '{source_id}' to '{target_id}' already exists")]
    DuplicateConnection {
        source_id: String,
        target_id: String,
    },

    #[error("would create a cycle")]
    WouldCreateCycle,
}

/// Errors reading or writing the textual form of a rule definition.
#[derive(Error, Debug)]
pub enum RuleFormatError {
    #[error("Failed to parse rule JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not access rule file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Structural problems that block a rule from being saved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleValidationError {
    #[error("rule id must not be empty")]
    EmptyId,

    #[error("rule name must not be empty")]
    EmptyName,

    #[error("rule must award at least one badge")]
    NoActions,

    #[error("action {index}: badge id must not be empty")]
    EmptyBadgeId { index: usize },

    #[error("action {index}: quantity must be at least 1, got {quantity}")]
    InvalidQuantity { index: usize, quantity: u32 },
}
