use super::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change,
    Click,
}

/// An event delivered to the document, originating at `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: NodeId,
}

impl DomEvent {
    #[must_use]
    pub fn change(target: NodeId) -> Self {
        Self {
            kind: EventKind::Change,
            target,
        }
    }

    #[must_use]
    pub fn click(target: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
        }
    }
}
