/// Deterministic id source owned by one expansion.
///
/// Node and edge ids count independently, both starting at zero.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    next_node: usize,
    next_edge: usize,
}

impl IdGenerator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn node_id(&mut self) -> String {
        let id = format!("node_{}", self.next_node);
        self.next_node += 1;
        id
    }

    pub(crate) fn edge_id(&mut self) -> String {
        let id = format!("edge_{}", self.next_edge);
        self.next_edge += 1;
        id
    }
}
