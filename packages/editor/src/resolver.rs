//! # Node Resolver
//!
//! Locates a node, and separately its structural parent, by id, by
//! structural path or by external test tag. Traversal is depth-first in
//! container order, so duplicate ids resolve to the first match.
//!
//! Paths follow the document's JSON shape:
//!
//! ```text
//! sections[0].content[2]
//! regions.header.modules[1]
//! sections[1].content.Details[0]
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use uidsl_model::visitor::find_located;
use uidsl_model::{ContainerKey, Document, Location, NodeId, NodeView, RegionSlot};

/// Reference to a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "by", rename_all = "camelCase")]
pub enum NodeRef {
    Id { id: NodeId },
    Path { path: String },
    ExternalTag { tag: String },
}

/// Accepted input shapes: a bare id string, a tagged reference
/// (`{ "by": "path", "path": .. }`) or a keyed one (`{ "byPath": .. }`)
#[derive(Deserialize)]
#[serde(untagged)]
enum NodeRefRepr {
    Bare(NodeId),
    Tagged(TaggedRef),
    Keyed(KeyedRef),
}

#[derive(Deserialize)]
#[serde(tag = "by", rename_all = "camelCase")]
enum TaggedRef {
    #[serde(alias = "byId")]
    Id { id: NodeId },
    #[serde(alias = "byPath")]
    Path { path: String },
    #[serde(alias = "byExternalTag")]
    ExternalTag { tag: String },
}

#[derive(Deserialize)]
enum KeyedRef {
    #[serde(rename = "byId")]
    Id(NodeId),
    #[serde(rename = "byPath")]
    Path(String),
    #[serde(rename = "byExternalTag")]
    ExternalTag(String),
}

impl From<NodeRefRepr> for NodeRef {
    fn from(repr: NodeRefRepr) -> Self {
        match repr {
            NodeRefRepr::Bare(id) => NodeRef::Id { id },
            NodeRefRepr::Tagged(TaggedRef::Id { id }) => NodeRef::Id { id },
            NodeRefRepr::Tagged(TaggedRef::Path { path }) => NodeRef::Path { path },
            NodeRefRepr::Tagged(TaggedRef::ExternalTag { tag }) => NodeRef::ExternalTag { tag },
            NodeRefRepr::Keyed(KeyedRef::Id(id)) => NodeRef::Id { id },
            NodeRefRepr::Keyed(KeyedRef::Path(path)) => NodeRef::Path { path },
            NodeRefRepr::Keyed(KeyedRef::ExternalTag(tag)) => NodeRef::ExternalTag { tag },
        }
    }
}

impl<'de> Deserialize<'de> for NodeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NodeRefRepr::deserialize(deserializer).map(NodeRef::from)
    }
}

impl NodeRef {
    pub fn id(id: impl Into<NodeId>) -> Self {
        NodeRef::Id { id: id.into() }
    }

    pub fn path(path: impl Into<String>) -> Self {
        NodeRef::Path { path: path.into() }
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        NodeRef::ExternalTag { tag: tag.into() }
    }
}

impl From<&str> for NodeRef {
    fn from(id: &str) -> Self {
        NodeRef::id(id)
    }
}

impl From<String> for NodeRef {
    fn from(id: String) -> Self {
        NodeRef::Id { id }
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRef::Id { id } => write!(f, "id '{}'", id),
            NodeRef::Path { path } => write!(f, "path '{}'", path),
            NodeRef::ExternalTag { tag } => write!(f, "tag '{}'", tag),
        }
    }
}

/// Structural parent of a resolved node
#[derive(Debug, Clone)]
pub struct ParentRef<'a> {
    /// Node whose container holds the child
    pub owner: NodeView<'a>,
    pub container: ContainerKey,
    pub index: usize,
}

/// Resolved node together with its location
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub location: Location,
    pub node: NodeView<'a>,
}

pub fn resolve<'a>(doc: &'a Document, node_ref: &NodeRef) -> Option<NodeView<'a>> {
    locate(doc, node_ref).map(|resolved| resolved.node)
}

/// Parent of the referenced node; `None` for the root or an unresolved ref
pub fn resolve_parent<'a>(doc: &'a Document, node_ref: &NodeRef) -> Option<ParentRef<'a>> {
    let resolved = locate(doc, node_ref)?;
    let (owner_location, step) = resolved.location.split_last()?;
    Some(ParentRef {
        owner: doc.node_at(&owner_location)?,
        container: step.container.clone(),
        index: step.index,
    })
}

/// Resolve a reference to a node and its structural location
pub fn locate<'a>(doc: &'a Document, node_ref: &NodeRef) -> Option<Resolved<'a>> {
    match node_ref {
        NodeRef::Id { id } => {
            if id.is_empty() {
                return None;
            }
            let (location, node) = find_located(doc, |node| node.id() == id)?;
            Some(Resolved { location, node })
        }
        NodeRef::ExternalTag { tag } => {
            let (location, node) = find_located(doc, |node| node.test_id() == Some(tag.as_str()))?;
            Some(Resolved { location, node })
        }
        NodeRef::Path { path } => {
            let location = parse_path(doc, path)?;
            let node = doc.node_at(&location)?;
            Some(Resolved { location, node })
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Name(String),
    Index(usize),
}

fn tokenize(path: &str) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();
    for part in path.split('.') {
        let (name, mut rest) = match part.find('[') {
            Some(open) => part.split_at(open),
            None => (part, ""),
        };
        if name.is_empty() && rest.is_empty() {
            return None;
        }
        if !name.is_empty() {
            match name.parse::<usize>() {
                Ok(index) => segments.push(Segment::Index(index)),
                Err(_) => segments.push(Segment::Name(name.to_string())),
            }
        }
        while !rest.is_empty() {
            let close = rest.find(']')?;
            let index = rest.get(1..close)?.trim().parse::<usize>().ok()?;
            segments.push(Segment::Index(index));
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return None;
            }
        }
    }
    Some(segments)
}

/// Translate a dot/bracket path into a structural location
fn parse_path(doc: &Document, path: &str) -> Option<Location> {
    let path = path.trim();
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(Location::root());
    }

    let mut segments = tokenize(path)?.into_iter();
    let mut location = Location::root();
    let mut node = doc.view();

    while let Some(segment) = segments.next() {
        let Segment::Name(name) = segment else {
            return None;
        };
        let containers = node.containers();

        let (key, index) = if name == "regions" {
            let container = node.container(&ContainerKey::Regions)?;
            let index = match segments.next()? {
                Segment::Name(slot) => {
                    let slot = RegionSlot::parse(&slot)?;
                    container
                        .items()
                        .into_iter()
                        .position(|item| matches!(item, NodeView::Region(s, _) if s == slot))?
                }
                Segment::Index(index) => index,
            };
            (ContainerKey::Regions, index)
        } else if name == "content" && !containers.iter().any(|(key, _)| *key == ContainerKey::Content) {
            // grouped section content: content.<group>[i]
            let Some(Segment::Name(group)) = segments.next() else {
                return None;
            };
            let Some(Segment::Index(index)) = segments.next() else {
                return None;
            };
            (ContainerKey::Group(group), index)
        } else {
            let key = ContainerKey::parse(&name)?;
            let Some(Segment::Index(index)) = segments.next() else {
                return None;
            };
            (key, index)
        };

        node = node.container(&key)?.items().into_iter().nth(index)?;
        location = location.child(key, index);
    }

    Some(location)
}
