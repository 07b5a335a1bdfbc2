use crate::canvas::NodeKind;

/// Node kinds allowed to feed into a node of kind `target`.
pub fn acceptable_source_kinds(target: NodeKind) -> &'static [NodeKind] {
    match target {
        NodeKind::Condition => &[],
        NodeKind::Logic => &[NodeKind::Condition, NodeKind::Logic],
        NodeKind::Badge => &[NodeKind::Condition, NodeKind::Logic],
    }
}

/// Node kinds a node of kind `source` may feed into.
pub fn acceptable_target_kinds(source: NodeKind) -> &'static [NodeKind] {
    match source {
        NodeKind::Condition => &[NodeKind::Logic, NodeKind::Badge],
        NodeKind::Logic => &[NodeKind::Logic, NodeKind::Badge],
        NodeKind::Badge => &[],
    }
}

impl NodeKind {
    pub fn accepts_from(self, source: NodeKind) -> bool {
        acceptable_source_kinds(self).contains(&source)
    }

    pub fn can_feed(self, target: NodeKind) -> bool {
        acceptable_target_kinds(self).contains(&target)
    }
}
