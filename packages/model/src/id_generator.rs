use crate::document::Document;
use crate::nodes::NodeId;
use crate::tree::NodeViewMut;
use crate::visitor::walk_mut;
use uuid::{Uuid, Variant, Version};

/// Generate a fresh random (v4) node id
pub fn new_id() -> NodeId {
    Uuid::new_v4().to_string()
}

/// Whether `id` is a hyphenated RFC 4122 version 4 UUID
pub fn is_uuid_v4(id: &str) -> bool {
    if id.len() != 36 {
        return false;
    }
    match Uuid::parse_str(id) {
        Ok(uuid) => uuid.get_version() == Some(Version::Random) && uuid.get_variant() == Variant::RFC4122,
        Err(_) => false,
    }
}

/// Assign ids to `node` and every node below it that lacks one
///
/// Returns how many ids were generated.
pub fn ensure_ids(node: NodeViewMut<'_>) -> usize {
    let mut assigned = 0;
    walk_mut(node, &mut |node| {
        if node.id().is_empty() {
            node.set_id(new_id());
            assigned += 1;
        }
    });
    assigned
}

/// Replace the id of `node` and of every node below it
pub fn regenerate_ids(node: NodeViewMut<'_>) {
    walk_mut(node, &mut |node| node.set_id(new_id()));
}

impl Document {
    /// Fill in every missing id, the root included
    pub fn ensure_ids(&mut self) -> usize {
        ensure_ids(self.view_mut())
    }
}
