//! The network data model: nodes, links, and the validated container.
//!
//! Networks are produced by an external data-loading step (typically from
//! JSON, hence the serde derives) and live for the duration of one
//! visualization session. Validation happens once, at construction: every
//! link endpoint must resolve to a node in the same network, and ids must be
//! unique. A network that fails validation is never handed to a simulation.
//!
//! Node order is preserved as given. It is irrelevant for physics but
//! relevant for deterministic redraw, so the id lookup is an `IndexMap`.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use weft_core::{geometry::Point, identifier::Id};

use crate::error::WeftError;

/// An attribute value attached to a node, used for glyph encodings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Numeric attribute, encoded as a bar height.
    Number(f64),
    /// Categorical attribute, encoded as a glyph color.
    Category(String),
}

impl AttrValue {
    /// Returns the numeric value, if this attribute is numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(value) => Some(*value),
            AttrValue::Category(_) => None,
        }
    }

    /// Returns the category, if this attribute is categorical.
    pub fn as_category(&self) -> Option<&str> {
        match self {
            AttrValue::Number(_) => None,
            AttrValue::Category(value) => Some(value),
        }
    }
}

fn unpositioned() -> f32 {
    f32::NAN
}

/// A node participating in the layout.
///
/// Positions use the SVG coordinate convention from [`weft_core::geometry`].
/// A node deserialized or constructed without a position carries a
/// non-finite coordinate and is seeded deterministically when a simulation
/// first sees it. While a simulation is running, position fields are written
/// exclusively by the simulation controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    id: Id,
    #[serde(default = "unpositioned")]
    pub(crate) x: f32,
    #[serde(default = "unpositioned")]
    pub(crate) y: f32,
    #[serde(default)]
    pub(crate) vx: f32,
    #[serde(default)]
    pub(crate) vy: f32,
    /// Pinned x-position. While set, the simulation must not move this axis.
    #[serde(default)]
    pub(crate) fx: Option<f32>,
    /// Pinned y-position. While set, the simulation must not move this axis.
    #[serde(default)]
    pub(crate) fy: Option<f32>,
    /// Position snapshot taken when the simulation was last paused.
    #[serde(default)]
    pub(crate) saved: Option<Point>,
    /// Named data attributes driving the glyph encodings.
    #[serde(default)]
    attributes: IndexMap<String, AttrValue>,
}

impl Node {
    /// Creates an unpositioned node with no attributes.
    pub fn new(id: Id) -> Self {
        Self {
            id,
            x: f32::NAN,
            y: f32::NAN,
            vx: 0.0,
            vy: 0.0,
            fx: None,
            fy: None,
            saved: None,
            attributes: IndexMap::new(),
        }
    }

    /// Sets the initial position, replacing simulation seeding.
    pub fn with_position(mut self, position: Point) -> Self {
        self.x = position.x();
        self.y = position.y();
        self
    }

    /// Adds a named data attribute.
    pub fn with_attribute(mut self, name: &str, value: AttrValue) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }

    /// Returns the node identity. Unique and stable across ticks.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the current position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the pinned position, if the node is pinned on both axes.
    pub fn pinned(&self) -> Option<Point> {
        match (self.fx, self.fy) {
            (Some(fx), Some(fy)) => Some(Point::new(fx, fy)),
            _ => None,
        }
    }

    /// Returns the position snapshot taken at the last pause, if any.
    pub fn saved_position(&self) -> Option<Point> {
        self.saved
    }

    /// Returns the numeric value of an attribute, if present and numeric.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.attributes.get(field).and_then(AttrValue::as_number)
    }

    /// Returns the categorical value of an attribute, if present and categorical.
    pub fn category(&self, field: &str) -> Option<&str> {
        self.attributes.get(field).and_then(AttrValue::as_category)
    }

    /// True once the node has a usable position.
    pub(crate) fn is_positioned(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A link between two nodes, referenced by identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    id: Id,
    source: Id,
    target: Id,
}

impl Link {
    pub fn new(id: Id, source: Id, target: Id) -> Self {
        Self { id, source, target }
    }

    /// Returns the link identity.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the source node id.
    pub fn source(&self) -> Id {
        self.source
    }

    /// Returns the target node id.
    pub fn target(&self) -> Id {
        self.target
    }
}

/// A validated network of nodes and links.
///
/// Construction fails fast on identity problems; see [`Network::new`]. Once
/// built, every link endpoint is guaranteed to resolve to a node index.
#[derive(Debug, Clone, Serialize)]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
    #[serde(skip)]
    index: IndexMap<Id, usize>,
}

impl Network {
    /// Builds a network, validating identities.
    ///
    /// # Errors
    ///
    /// - [`WeftError::DuplicateNode`] / [`WeftError::DuplicateLink`] when an
    ///   id appears twice;
    /// - [`WeftError::UnresolvedLink`] when a link endpoint does not name a
    ///   node in this network. A malformed link is rejected, never silently
    ///   dropped.
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Result<Self, WeftError> {
        let mut index = IndexMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id, i).is_some() {
                return Err(WeftError::DuplicateNode(node.id));
            }
        }

        let mut link_ids = HashSet::with_capacity(links.len());
        for link in &links {
            if !link_ids.insert(link.id) {
                return Err(WeftError::DuplicateLink(link.id));
            }
            for endpoint in [link.source, link.target] {
                if !index.contains_key(&endpoint) {
                    return Err(WeftError::UnresolvedLink {
                        link: link.id,
                        endpoint,
                    });
                }
            }
        }

        debug!(
            nodes_len = nodes.len(),
            links_len = links.len();
            "Network validated",
        );

        Ok(Self {
            nodes,
            links,
            index,
        })
    }

    /// Returns the nodes in their original order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the links in their original order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Looks up a node by identity.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Resolves a node id to its index in [`Network::nodes`].
    pub fn node_index(&self, id: Id) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Mutable node access, reserved for the simulation controller.
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Mutable single-node access, reserved for the simulation controller.
    pub(crate) fn node_mut(&mut self, id: Id) -> Option<&mut Node> {
        let i = *self.index.get(&id)?;
        Some(&mut self.nodes[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> Node {
        Node::new(Id::new(id))
    }

    fn link(id: &str, source: &str, target: &str) -> Link {
        Link::new(Id::new(id), Id::new(source), Id::new(target))
    }

    #[test]
    fn valid_network_resolves_endpoints() {
        let network = Network::new(
            vec![node("a"), node("b")],
            vec![link("a-b", "a", "b")],
        )
        .unwrap();

        assert_eq!(network.node_index(Id::new("a")), Some(0));
        assert_eq!(network.node_index(Id::new("b")), Some(1));
        assert_eq!(network.links().len(), 1);
    }

    #[test]
    fn dangling_endpoint_is_rejected() {
        let result = Network::new(vec![node("a")], vec![link("a-x", "a", "x")]);

        match result {
            Err(WeftError::UnresolvedLink { link, endpoint }) => {
                assert_eq!(link, "a-x");
                assert_eq!(endpoint, "x");
            }
            other => panic!("Expected UnresolvedLink, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        assert!(matches!(
            Network::new(vec![node("a"), node("a")], vec![]),
            Err(WeftError::DuplicateNode(_))
        ));
        assert!(matches!(
            Network::new(
                vec![node("a"), node("b")],
                vec![link("l", "a", "b"), link("l", "b", "a")],
            ),
            Err(WeftError::DuplicateLink(_))
        ));
    }

    #[test]
    fn node_order_is_preserved() {
        // Non-alphabetical on purpose, to catch accidental sorting
        let network = Network::new(
            vec![node("zara"), node("alice"), node("mike")],
            vec![],
        )
        .unwrap();

        let ids: Vec<String> = network.nodes().iter().map(|n| n.id().to_string()).collect();
        assert_eq!(ids, vec!["zara", "alice", "mike"]);
    }

    #[test]
    fn attributes_are_typed() {
        let n = node("a")
            .with_attribute("followers", AttrValue::Number(42.0))
            .with_attribute("kind", AttrValue::Category("person".to_string()));

        assert_eq!(n.number("followers"), Some(42.0));
        assert_eq!(n.category("kind"), Some("person"));
        assert_eq!(n.number("kind"), None, "Category is not a number");
        assert_eq!(n.number("missing"), None);
    }

    #[test]
    fn nodes_deserialize_from_loader_json() {
        let n: Node = serde_json::from_str(
            r#"{"id": "a", "attributes": {"followers": 10.5, "kind": "bot"}}"#,
        )
        .unwrap();

        assert_eq!(n.id(), "a");
        assert!(!n.is_positioned(), "Unpositioned until the simulation seeds it");
        assert_eq!(n.number("followers"), Some(10.5));
        assert_eq!(n.category("kind"), Some("bot"));
    }
}
