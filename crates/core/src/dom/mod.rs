//! A small arena document model.
//!
//! Nodes are stored in a flat `Vec` and addressed by `NodeId`. Only elements
//! exist; text is kept as a property of the element that owns it, which is all
//! the page behaviors need.

mod event;
mod selector;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use thiserror::Error;

pub use event::{DomEvent, EventKind};
pub use selector::Selector;

/// Handle to an element inside a `Dom`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index.
    #[must_use]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Selectable input flavours the page cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Exclusive selection within a `name` group.
    Radio,
    /// Independent selection.
    Checkbox,
}

impl InputKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("radio") {
            Some(Self::Radio)
        } else if raw.eq_ignore_ascii_case("checkbox") {
            Some(Self::Checkbox)
        } else {
            None
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DomError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag_name: String,
    attrs: BTreeMap<String, String>,
    checked: bool,
    style: BTreeMap<String, String>,
    text: String,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
}

#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Creates a document holding only the root `html` element.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            element: Element {
                tag_name: "html".to_string(),
                ..Element::default()
            },
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    /// The document element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a new element under `parent`.
    ///
    /// A `checked` attribute marks the element checked, mirroring how markup
    /// seeds the initial state of an input.
    ///
    /// # Errors
    ///
    /// Returns `DomError::UnknownNode` if `parent` does not belong to this document.
    pub fn create_element<I, K, V>(
        &mut self,
        parent: NodeId,
        tag_name: impl Into<String>,
        attrs: I,
    ) -> Result<NodeId, DomError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.node(parent)?;
        let attrs: BTreeMap<String, String> = attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let checked = attrs.contains_key("checked");
        let id = NodeId(self.nodes.len());
        if let Some(id_attr) = attrs.get("id") {
            self.id_index.entry(id_attr.clone()).or_insert(id);
        }
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            element: Element {
                tag_name: tag_name.into(),
                attrs,
                checked,
                ..Element::default()
            },
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, node_id: NodeId) -> bool {
        node_id.0 < self.nodes.len()
    }

    #[must_use]
    pub fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0).and_then(|node| node.parent)
    }

    #[must_use]
    pub fn children(&self, node_id: NodeId) -> &[NodeId] {
        self.nodes
            .get(node_id.0)
            .map_or(&[][..], |node| node.children.as_slice())
    }

    #[must_use]
    pub fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    #[must_use]
    pub fn attr(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.element(node_id)
            .and_then(|e| e.attrs.get(name))
            .map(String::as_str)
    }

    /// # Errors
    ///
    /// Returns `DomError::UnknownNode` for a foreign handle.
    pub fn set_attr(
        &mut self,
        node_id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let value = value.into();
        self.element_mut(node_id)?
            .attrs
            .insert(name.to_string(), value.clone());
        if name == "id" {
            self.id_index.retain(|_, indexed| *indexed != node_id);
            self.id_index.entry(value).or_insert(node_id);
        }
        Ok(())
    }

    #[must_use]
    pub fn has_class(&self, node_id: NodeId, class: &str) -> bool {
        self.attr(node_id, "class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    /// The input kind of an `input` element, if it is a radio or checkbox.
    #[must_use]
    pub fn input_kind(&self, node_id: NodeId) -> Option<InputKind> {
        let element = self.element(node_id)?;
        if !element.tag_name.eq_ignore_ascii_case("input") {
            return None;
        }
        element.attrs.get("type").and_then(|t| InputKind::parse(t))
    }

    #[must_use]
    pub fn is_checked(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(|e| e.checked)
    }

    /// # Errors
    ///
    /// Returns `DomError::UnknownNode` for a foreign handle.
    pub fn set_checked(&mut self, node_id: NodeId, checked: bool) -> Result<(), DomError> {
        self.element_mut(node_id)?.checked = checked;
        Ok(())
    }

    #[must_use]
    pub fn style(&self, node_id: NodeId, property: &str) -> Option<&str> {
        self.element(node_id)
            .and_then(|e| e.style.get(property))
            .map(String::as_str)
    }

    /// # Errors
    ///
    /// Returns `DomError::UnknownNode` for a foreign handle.
    pub fn set_style(
        &mut self,
        node_id: NodeId,
        property: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        self.element_mut(node_id)?
            .style
            .insert(property.to_string(), value.into());
        Ok(())
    }

    #[must_use]
    pub fn text(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.text.as_str())
    }

    /// # Errors
    ///
    /// Returns `DomError::UnknownNode` for a foreign handle.
    pub fn set_text(&mut self, node_id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        self.element_mut(node_id)?.text = text.into();
        Ok(())
    }

    /// Descendants of `scope` in document order, excluding `scope` itself.
    #[must_use]
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    #[must_use]
    pub fn matches(&self, node_id: NodeId, selector: &Selector) -> bool {
        selector.matches(self, node_id)
    }

    /// First descendant of `scope` matching `selector`.
    #[must_use]
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|node| self.matches(*node, selector))
    }

    /// Every descendant of `scope` matching `selector`, in document order.
    #[must_use]
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.matches(*node, selector))
            .collect()
    }

    /// Nearest inclusive ancestor of `node_id` matching `selector`.
    #[must_use]
    pub fn closest(&self, node_id: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut current = self.contains(node_id).then_some(node_id);
        while let Some(node) = current {
            if self.matches(node, selector) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Apply the default action of a user click on `node_id`.
    ///
    /// A checkbox flips its state. A radio becomes checked and every other
    /// radio sharing its non-empty `name` is unchecked. Anything else is left
    /// alone. Returns whether the checked state of `node_id` changed, which is
    /// when a browser would fire `change`.
    ///
    /// # Errors
    ///
    /// Returns `DomError::UnknownNode` for a foreign handle.
    pub fn activate(&mut self, node_id: NodeId) -> Result<bool, DomError> {
        self.node(node_id)?;
        match self.input_kind(node_id) {
            Some(InputKind::Checkbox) => {
                let checked = !self.is_checked(node_id);
                self.set_checked(node_id, checked)?;
                Ok(true)
            }
            Some(InputKind::Radio) => {
                if self.is_checked(node_id) {
                    return Ok(false);
                }
                let group = self
                    .attr(node_id, "name")
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned);
                if let Some(group) = group {
                    let peers: Vec<NodeId> = self
                        .query_selector_all(self.root, &Selector::Input(InputKind::Radio))
                        .into_iter()
                        .filter(|peer| *peer != node_id)
                        .filter(|peer| self.attr(*peer, "name") == Some(group.as_str()))
                        .collect();
                    for peer in peers {
                        self.set_checked(peer, false)?;
                    }
                }
                self.set_checked(node_id, true)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn node(&self, node_id: NodeId) -> Result<&Node, DomError> {
        self.nodes
            .get(node_id.0)
            .ok_or(DomError::UnknownNode(node_id))
    }

    fn element(&self, node_id: NodeId) -> Option<&Element> {
        self.nodes.get(node_id.0).map(|node| &node.element)
    }

    fn element_mut(&mut self, node_id: NodeId) -> Result<&mut Element, DomError> {
        self.nodes
            .get_mut(node_id.0)
            .map(|node| &mut node.element)
            .ok_or(DomError::UnknownNode(node_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radio(dom: &mut Dom, parent: NodeId, name: &str) -> NodeId {
        dom.create_element(parent, "input", [("type", "radio"), ("name", name)])
            .unwrap()
    }

    #[test]
    fn create_element_indexes_ids_and_checked_state() {
        let mut dom = Dom::new();
        let body = dom
            .create_element(dom.root(), "body", [("id", "main")])
            .unwrap();
        let input = dom
            .create_element(body, "input", [("type", "checkbox"), ("checked", "")])
            .unwrap();

        assert_eq!(dom.element_by_id("main"), Some(body));
        assert_eq!(dom.parent(input), Some(body));
        assert!(dom.is_checked(input));
        assert_eq!(dom.input_kind(input), Some(InputKind::Checkbox));
    }

    #[test]
    fn foreign_handles_are_rejected() {
        let mut dom = Dom::new();
        let stray = NodeId(42);
        assert_eq!(
            dom.set_attr(stray, "data-theme", "dark"),
            Err(DomError::UnknownNode(stray))
        );
        assert!(dom.create_element(stray, "div", [("a", "b")]).is_err());
        assert_eq!(dom.closest(stray, &Selector::tag("html")), None);
    }

    #[test]
    fn closest_includes_self_and_walks_up() {
        let mut dom = Dom::new();
        let dot = dom
            .create_element(dom.root(), "button", [("class", "theme-dot big")])
            .unwrap();
        let icon = dom.create_element(dot, "span", [("class", "icon")]).unwrap();

        let selector = Selector::class("theme-dot");
        assert_eq!(dom.closest(icon, &selector), Some(dot));
        assert_eq!(dom.closest(dot, &selector), Some(dot));
        assert_eq!(dom.closest(dom.root(), &selector), None);
    }

    #[test]
    fn query_selector_all_is_document_order() {
        let mut dom = Dom::new();
        let a = dom
            .create_element(dom.root(), "section", [("data-question", "1")])
            .unwrap();
        let nested = dom
            .create_element(a, "section", [("data-question", "2")])
            .unwrap();
        let b = dom
            .create_element(dom.root(), "section", [("data-question", "3")])
            .unwrap();

        let found = dom.query_selector_all(dom.root(), &Selector::attr("data-question"));
        assert_eq!(found, vec![a, nested, b]);
        assert_eq!(
            dom.query_selector(a, &Selector::attr("data-question")),
            Some(nested)
        );
    }

    #[test]
    fn activating_a_radio_unchecks_its_group() {
        let mut dom = Dom::new();
        let form = dom.create_element(dom.root(), "form", [("id", "f")]).unwrap();
        let first = radio(&mut dom, form, "q0");
        let second = radio(&mut dom, form, "q0");
        let other = radio(&mut dom, form, "q1");
        dom.set_checked(other, true).unwrap();

        assert!(dom.activate(first).unwrap());
        assert!(dom.activate(second).unwrap());
        assert!(!dom.is_checked(first));
        assert!(dom.is_checked(second));
        assert!(dom.is_checked(other));

        // Already selected: no state change.
        assert!(!dom.activate(second).unwrap());
    }

    #[test]
    fn activating_a_checkbox_toggles() {
        let mut dom = Dom::new();
        let input = dom
            .create_element(dom.root(), "input", [("type", "checkbox")])
            .unwrap();
        assert!(dom.activate(input).unwrap());
        assert!(dom.is_checked(input));
        assert!(dom.activate(input).unwrap());
        assert!(!dom.is_checked(input));
    }

    #[test]
    fn activating_a_plain_element_is_a_no_op() {
        let mut dom = Dom::new();
        let div = dom
            .create_element(dom.root(), "div", [("class", "x")])
            .unwrap();
        assert!(!dom.activate(div).unwrap());
        assert!(!dom.is_checked(div));
    }

    #[test]
    fn changing_id_attribute_reindexes() {
        let mut dom = Dom::new();
        let div = dom
            .create_element(dom.root(), "div", [("id", "old")])
            .unwrap();
        dom.set_attr(div, "id", "new").unwrap();
        assert_eq!(dom.element_by_id("old"), None);
        assert_eq!(dom.element_by_id("new"), Some(div));
    }
}
