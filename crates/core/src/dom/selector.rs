use super::{Dom, InputKind, NodeId};

/// Typed element selector.
///
/// Covers the handful of shapes the page behaviors query for; compose with
/// `AnyOf` / `AllOf` for selector lists and compound selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    /// Element carrying the attribute, whatever its value.
    HasAttr(String),
    Tag(String),
    /// `input` element of the given `type`.
    Input(InputKind),
    /// Element whose checked state is set.
    Checked,
    AnyOf(Vec<Selector>),
    AllOf(Vec<Selector>),
}

impl Selector {
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    #[must_use]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    #[must_use]
    pub fn attr(name: impl Into<String>) -> Self {
        Self::HasAttr(name.into())
    }

    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Radio or checkbox input.
    #[must_use]
    pub fn choice_input() -> Self {
        Self::AnyOf(vec![
            Self::Input(InputKind::Radio),
            Self::Input(InputKind::Checkbox),
        ])
    }

    /// Radio or checkbox input in the checked state.
    #[must_use]
    pub fn checked_choice_input() -> Self {
        Self::AllOf(vec![Self::choice_input(), Self::Checked])
    }

    pub(super) fn matches(&self, dom: &Dom, node_id: NodeId) -> bool {
        if !dom.contains(node_id) {
            return false;
        }
        match self {
            Self::Id(id) => dom.attr(node_id, "id") == Some(id.as_str()),
            Self::Class(class) => dom.has_class(node_id, class),
            Self::HasAttr(name) => dom.attr(node_id, name).is_some(),
            Self::Tag(tag) => dom
                .tag_name(node_id)
                .is_some_and(|t| t.eq_ignore_ascii_case(tag)),
            Self::Input(kind) => dom.input_kind(node_id) == Some(*kind),
            Self::Checked => dom.is_checked(node_id),
            Self::AnyOf(parts) => parts.iter().any(|part| part.matches(dom, node_id)),
            Self::AllOf(parts) => parts.iter().all(|part| part.matches(dom, node_id)),
        }
    }
}
