//! The graph model exchanged with the editing surface.

pub mod edge;
pub mod index;
pub mod node;

pub use edge::*;
pub use index::*;
pub use node::*;

use crate::error::RuleFormatError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A complete editor graph: every node and every wire between them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Canvas {
    #[serde(default)]
    pub nodes: Vec<CanvasNode>,
    #[serde(default)]
    pub edges: Vec<CanvasEdge>,
}

impl Canvas {
    pub fn new(nodes: Vec<CanvasNode>, edges: Vec<CanvasEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn index(&self) -> CanvasIndex<'_> {
        CanvasIndex::new(&self.nodes, &self.edges)
    }

    pub fn node(&self, id: &str) -> Option<&CanvasNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &CanvasNode> {
        self.nodes.iter().filter(move |n| n.kind() == Some(kind))
    }

    pub fn from_json(text: &str) -> Result<Self, RuleFormatError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a canvas from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RuleFormatError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RuleFormatError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Saves the canvas to a file as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RuleFormatError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| RuleFormatError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
