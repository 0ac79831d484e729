//! Org-chart tree nodes.
//!
//! Nodes are immutable once built and shared through [`NodeRef`]. Identity
//! comparisons that matter to navigation (has the root changed?) use
//! pointer identity, not structural equality.

use super::identifiers::NodeId;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Shared handle to a node inside a tree.
pub type NodeRef = Arc<Node>;

/// One person (or aggregation point) in the org-chart.
///
/// `children` may be empty even when the node has descendants; the
/// optional `total_children` count signals that more exist than were
/// loaded. Display fields are opaque to navigation and routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,

    #[serde(default)]
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,

    #[serde(
        default,
        deserialize_with = "declared_count",
        skip_serializing_if = "Option::is_none"
    )]
    total_children: Option<u64>,

    #[serde(
        default,
        deserialize_with = "nullable_children",
        skip_serializing_if = "Vec::is_empty"
    )]
    children: Vec<NodeRef>,

    /// Custom properties carried through untouched.
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl Node {
    /// Create a childless node.
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            title: None,
            image: None,
            total_children: None,
            children: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Create the invisible aggregation root over `children`.
    pub fn synthetic_root(children: impl IntoIterator<Item = Node>) -> Self {
        Self::new(NodeId::synthetic_root(), "").with_children(children)
    }

    /// Set the job title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the declared descendant count (may exceed the loaded children).
    pub fn with_total_children(mut self, total: u64) -> Self {
        self.total_children = Some(total);
        self
    }

    /// Replace the loaded children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }

    /// Attach an opaque custom property.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Wrap into a shared handle.
    pub fn into_ref(self) -> NodeRef {
        Arc::new(self)
    }

    /// Unique id within the tree.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Job title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Image URL, if any.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Declared descendant count; only positive counts are kept.
    pub fn total_children(&self) -> Option<u64> {
        self.total_children
    }

    /// Loaded children in render order.
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// A custom property carried through from the input.
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// Whether this is the invisible aggregation root.
    pub fn is_synthetic_root(&self) -> bool {
        self.id.is_synthetic_root()
    }

    /// Declares at least one descendant through `total_children`.
    pub fn is_expandable(&self) -> bool {
        self.total_children.is_some_and(|n| n > 0)
    }

    /// No loaded children and no declared descendants.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && !self.is_expandable()
    }

    /// Find a direct child by id.
    pub fn child(&self, id: &NodeId) -> Option<&NodeRef> {
        self.children.iter().find(|c| c.id() == id)
    }
}

/// `"children": null` means the same as an absent list.
fn nullable_children<'de, D>(deserializer: D) -> Result<Vec<NodeRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<NodeRef>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any JSON number is accepted. Counts that are not positive declare
/// nothing; fractional counts round up.
fn declared_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = Option::<f64>::deserialize(deserializer)?;
    Ok(count.filter(|n| *n > 0.0).map(|n| n.ceil() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> NodeId {
        NodeId::new(raw).unwrap()
    }

    #[test]
    fn new_node_is_leaf() {
        let node = Node::new(id("a"), "Alice");
        assert!(node.is_leaf());
        assert!(!node.is_expandable());
        assert!(node.children().is_empty());
    }

    #[test]
    fn total_children_without_loaded_children_is_not_leaf() {
        let node = Node::new(id("a"), "Alice").with_total_children(4);
        assert!(!node.is_leaf(), "declared descendants make a non-leaf");
        assert!(node.is_expandable());
    }

    #[test]
    fn zero_total_children_is_leaf() {
        let node = Node::new(id("a"), "Alice").with_total_children(0);
        assert!(node.is_leaf());
        assert!(!node.is_expandable());
    }

    #[test]
    fn loaded_children_make_non_leaf() {
        let node = Node::new(id("a"), "Alice").with_children([Node::new(id("b"), "Bob")]);
        assert!(!node.is_leaf());
        assert_eq!(node.child(&id("b")).map(|c| c.name()), Some("Bob"));
    }

    #[test]
    fn synthetic_root_has_reserved_id() {
        let root = Node::synthetic_root([Node::new(id("ceo"), "Ceo")]);
        assert!(root.is_synthetic_root());
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn deserializes_nested_tree_with_extra_fields() {
        let json = r#"{
            "id": "ceo",
            "name": "Carol",
            "title": "CEO",
            "department": "Exec",
            "total_children": 2,
            "children": [
                {"id": "cto", "name": "Tom"},
                {"id": "cfo", "name": "Fay", "children": null}
            ]
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.id(), &id("ceo"));
        assert_eq!(node.title(), Some("CEO"));
        assert_eq!(node.total_children(), Some(2));
        assert_eq!(node.children().len(), 2);
        assert_eq!(
            node.extra("department"),
            Some(&serde_json::Value::String("Exec".to_string()))
        );
    }

    #[test]
    fn total_children_accepts_any_json_number() {
        let parse = |raw: &str| -> Node {
            serde_json::from_str(&format!(r#"{{"id":"a","total_children":{raw}}}"#)).unwrap()
        };

        assert_eq!(parse("3.0").total_children(), Some(3));
        assert_eq!(parse("0.5").total_children(), Some(1));
        assert!(parse("0.5").is_expandable());

        let negative = parse("-2");
        assert_eq!(negative.total_children(), None);
        assert!(negative.is_leaf());

        assert_eq!(parse("0").total_children(), None);
        assert_eq!(parse("null").total_children(), None);
    }

    #[test]
    fn deserializes_missing_children_as_empty() {
        let node: Node = serde_json::from_str(r#"{"id":"solo","name":"Sol"}"#).unwrap();
        assert!(node.children().is_empty());
        assert!(node.is_leaf());
    }
}
