use super::{CanvasEdge, CanvasNode, NodeKind};
use ahash::AHashMap;

/// Read-only lookup tables over a node/edge list.
///
/// Built once in O(V+E); edges keep their original order inside each bucket.
#[derive(Debug)]
pub struct CanvasIndex<'a> {
    nodes: AHashMap<&'a str, &'a CanvasNode>,
    /// target id -> edges arriving at it
    incoming: AHashMap<&'a str, Vec<&'a CanvasEdge>>,
    /// source id -> edges leaving it
    outgoing: AHashMap<&'a str, Vec<&'a CanvasEdge>>,
}

impl<'a> CanvasIndex<'a> {
    pub fn new(nodes: &'a [CanvasNode], edges: &'a [CanvasEdge]) -> Self {
        // Later duplicates of an id never shadow the first node, matching a front-to-back find.
        let mut node_map: AHashMap<&'a str, &'a CanvasNode> = AHashMap::with_capacity(nodes.len());
        for node in nodes {
            node_map.entry(node.id.as_str()).or_insert(node);
        }

        let mut incoming: AHashMap<&'a str, Vec<&'a CanvasEdge>> = AHashMap::new();
        let mut outgoing: AHashMap<&'a str, Vec<&'a CanvasEdge>> = AHashMap::new();
        for edge in edges {
            incoming.entry(edge.target.as_str()).or_default().push(edge);
            outgoing.entry(edge.source.as_str()).or_default().push(edge);
        }

        Self {
            nodes: node_map,
            incoming,
            outgoing,
        }
    }

    pub fn node(&self, id: &str) -> Option<&'a CanvasNode> {
        self.nodes.get(id).copied()
    }

    pub fn kind_of(&self, id: &str) -> Option<NodeKind> {
        self.node(id).and_then(CanvasNode::kind)
    }

    pub fn incoming(&self, id: &str) -> &[&'a CanvasEdge] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn outgoing(&self, id: &str) -> &[&'a CanvasEdge] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.outgoing(source).iter().any(|e| e.target == target)
    }
}
