//! # Patches
//!
//! The closed set of typed edits, and the functions that apply them.
//!
//! ## Design Principles
//!
//! 1. **Pure**: [`apply`] clones the input and mutates the clone. The input
//!    document is never observably altered, even when the patch fails.
//! 2. **Resolved, then checked, then mutated**: every operation resolves its
//!    references and validates the destination before touching the tree.
//!    `moveNode` in particular never drops a node whose destination is bad.
//! 3. **Type-directed placement**: `addNode` picks the parent's container from
//!    the payload shape (see [`crate::placement`]).
//!
//! ## Wire format
//!
//! Patches are internally tagged by `op`:
//!
//! ```json
//! { "op": "addNode", "parent": "<form id>", "node": { "label": "Go", "type": "submit" } }
//! { "op": "swap", "a": { "by": "path", "path": "sections[0]" }, "b": "<section id>" }
//! ```

use crate::errors::{BatchError, PatchError, PatchErrorReason};
use crate::placement::{container_for_category, container_for_payload, container_names, mismatch};
use crate::resolver::{locate, resolve_parent, NodeRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use uidsl_model::id_generator::{ensure_ids, regenerate_ids};
use uidsl_model::{
    new_id, ContainerKey, ContainerMut, ContentNode, DataSource, Document, FormField, Layout,
    Location, Node, NodeCategory, NodeId, NodeViewMut, StyleToken,
};

/// A single typed edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Patch {
    /// Dotted-path write of display copy (`label`, `title`, `placeholder`, ...)
    SetCopy {
        target: NodeRef,
        path: String,
        value: Value,
    },

    AddNode {
        parent: NodeRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
        node: Value,
        /// Explicit container, bypassing type-directed placement
        #[serde(default, skip_serializing_if = "Option::is_none")]
        container: Option<ContainerKey>,
    },

    RemoveNode {
        target: NodeRef,
    },

    #[serde(rename_all = "camelCase")]
    MoveNode {
        target: NodeRef,
        to_parent: NodeRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        container: Option<ContainerKey>,
    },

    SetProp {
        target: NodeRef,
        prop: String,
        value: Value,
    },

    SetToken {
        target: NodeRef,
        token: StyleToken,
        value: String,
    },

    /// `value` of `None` flips the current state
    ToggleVariant {
        target: NodeRef,
        variant: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<bool>,
    },

    WrapWith {
        target: NodeRef,
        wrapper: Value,
    },

    Reorder {
        parent: NodeRef,
        from: usize,
        to: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        container: Option<ContainerKey>,
    },

    RenameField {
        target: NodeRef,
        from: String,
        to: String,
    },

    DuplicateNode {
        target: NodeRef,
    },

    Swap {
        a: NodeRef,
        b: NodeRef,
    },

    #[serde(rename_all = "camelCase")]
    BindData {
        target: NodeRef,
        data_source: DataSource,
    },

    RenameSection {
        target: NodeRef,
        value: String,
    },
}

impl Patch {
    pub fn op_name(&self) -> &'static str {
        match self {
            Patch::SetCopy { .. } => "setCopy",
            Patch::AddNode { .. } => "addNode",
            Patch::RemoveNode { .. } => "removeNode",
            Patch::MoveNode { .. } => "moveNode",
            Patch::SetProp { .. } => "setProp",
            Patch::SetToken { .. } => "setToken",
            Patch::ToggleVariant { .. } => "toggleVariant",
            Patch::WrapWith { .. } => "wrapWith",
            Patch::Reorder { .. } => "reorder",
            Patch::RenameField { .. } => "renameField",
            Patch::DuplicateNode { .. } => "duplicateNode",
            Patch::Swap { .. } => "swap",
            Patch::BindData { .. } => "bindData",
            Patch::RenameSection { .. } => "renameSection",
        }
    }

    /// The reference the patch is primarily aimed at
    pub fn target(&self) -> &NodeRef {
        match self {
            Patch::AddNode { parent, .. } | Patch::Reorder { parent, .. } => parent,
            Patch::Swap { a, .. } => a,
            Patch::SetCopy { target, .. }
            | Patch::RemoveNode { target }
            | Patch::MoveNode { target, .. }
            | Patch::SetProp { target, .. }
            | Patch::SetToken { target, .. }
            | Patch::ToggleVariant { target, .. }
            | Patch::WrapWith { target, .. }
            | Patch::RenameField { target, .. }
            | Patch::DuplicateNode { target }
            | Patch::BindData { target, .. }
            | Patch::RenameSection { target, .. } => target,
        }
    }

    /// Mutate `doc` in place; on error `doc` may be partially modified
    fn apply_in_place(&self, doc: &mut Document) -> Result<(), PatchErrorReason> {
        match self {
            Patch::SetCopy { target, path, value } => set_copy(doc, target, path, value),
            Patch::AddNode { parent, index, node, container } => {
                add_node(doc, parent, *index, node, container.as_ref())
            }
            Patch::RemoveNode { target } => remove_node(doc, target),
            Patch::MoveNode { target, to_parent, index, container } => {
                move_node(doc, target, to_parent, *index, container.as_ref())
            }
            Patch::SetProp { target, prop, value } => set_prop(doc, target, prop, value),
            Patch::SetToken { target, token, value } => set_token(doc, target, *token, value),
            Patch::ToggleVariant { target, variant, value } => {
                toggle_variant(doc, target, variant, *value)
            }
            Patch::WrapWith { target, wrapper } => wrap_with(doc, target, wrapper),
            Patch::Reorder { parent, from, to, container } => {
                reorder(doc, parent, *from, *to, container.as_ref())
            }
            Patch::RenameField { target, from, to } => rename_field(doc, target, from, to),
            Patch::DuplicateNode { target } => duplicate_node(doc, target),
            Patch::Swap { a, b } => swap(doc, a, b),
            Patch::BindData { target, data_source } => bind_data(doc, target, data_source),
            Patch::RenameSection { target, value } => rename_section(doc, target, value),
        }
    }
}

/// Apply one patch, returning a new document
pub fn apply(doc: &Document, patch: &Patch) -> Result<Document, PatchError> {
    let mut next = doc.clone();
    match patch.apply_in_place(&mut next) {
        Ok(()) => Ok(next),
        Err(reason) => Err(PatchError {
            op: patch.op_name(),
            sibling_ids: sibling_ids(doc, patch),
            reason,
            patch: patch.clone(),
        }),
    }
}

/// Fold `patches` over `doc` in order
///
/// Not transactional: the error carries the accumulator as it stood before
/// the failing patch, with every earlier patch applied.
#[instrument(skip_all, fields(document = %doc.id, patches = patches.len()))]
pub fn apply_all(doc: &Document, patches: &[Patch]) -> Result<Document, BatchError> {
    let mut current = doc.clone();
    for (index, patch) in patches.iter().enumerate() {
        debug!(index, op = patch.op_name(), target = %patch.target(), "applying patch");
        current = match apply(&current, patch) {
            Ok(next) => next,
            Err(error) => {
                warn!(index, op = error.op, reason = %error.reason, "patch failed");
                return Err(BatchError {
                    index,
                    error,
                    partial: Box::new(current),
                });
            }
        };
    }
    Ok(current)
}

/// Ids in the container the patch was aimed at
fn sibling_ids(doc: &Document, patch: &Patch) -> Vec<NodeId> {
    match patch {
        Patch::AddNode { parent, container, .. } | Patch::Reorder { parent, container, .. } => {
            let Some(owner) = locate(doc, parent) else {
                return Vec::new();
            };
            owner
                .node
                .containers()
                .into_iter()
                .find(|(key, view)| match container {
                    Some(hint) => key == hint,
                    None => !view.is_empty(),
                })
                .map(|(_, view)| view.ids())
                .unwrap_or_default()
        }
        _ => resolve_parent(doc, patch.target())
            .and_then(|parent| parent.owner.container(&parent.container))
            .map(|view| view.ids())
            .unwrap_or_default(),
    }
}

fn find(doc: &Document, node_ref: &NodeRef) -> Result<Location, PatchErrorReason> {
    locate(doc, node_ref)
        .map(|resolved| resolved.location)
        .ok_or_else(|| PatchErrorReason::NotFound(node_ref.to_string()))
}

fn find_parent(doc: &Document, node_ref: &NodeRef) -> Result<Location, PatchErrorReason> {
    locate(doc, node_ref)
        .map(|resolved| resolved.location)
        .ok_or_else(|| PatchErrorReason::ParentNotFound(node_ref.to_string()))
}

fn node_mut<'d>(doc: &'d mut Document, location: &Location) -> Result<NodeViewMut<'d>, PatchErrorReason> {
    doc.node_at_mut(location)
        .ok_or_else(|| PatchErrorReason::NotFound(location.to_string()))
}

fn container_mut<'d>(
    doc: &'d mut Document,
    owner: &Location,
    key: &ContainerKey,
) -> Result<ContainerMut<'d>, PatchErrorReason> {
    let node = node_mut(doc, owner)?;
    let category = node.category();
    let supported = container_names(node.as_view());
    node.into_container(key)
        .ok_or_else(|| PatchErrorReason::StructuralMismatch {
            owner: category,
            found: key.to_string(),
            supported,
        })
}

/// Owner location and the hop into it; the root has neither
fn split_child(location: &Location, action: &'static str) -> Result<(Location, ContainerKey, usize), PatchErrorReason> {
    location
        .split_last()
        .map(|(owner, step)| (owner, step.container.clone(), step.index))
        .ok_or(PatchErrorReason::RootNotAllowed(action))
}

fn occupied(node: &Node) -> PatchErrorReason {
    match node {
        Node::Region(slot, _) => PatchErrorReason::InvalidValue(format!("region slot '{}' is already occupied", slot.as_str())),
        other => PatchErrorReason::InvalidValue(format!("cannot insert {}", other.category())),
    }
}

fn set_copy(doc: &mut Document, target: &NodeRef, path: &str, value: &Value) -> Result<(), PatchErrorReason> {
    let location = find(doc, target)?;
    let mut node = node_mut(doc, &location)?;
    write_property(&mut node, path, value)
}

fn set_prop(doc: &mut Document, target: &NodeRef, prop: &str, value: &Value) -> Result<(), PatchErrorReason> {
    let location = find(doc, target)?;
    let mut node = node_mut(doc, &location)?;
    write_property(&mut node, prop, value)
}

/// Write `value` at a dotted path of the node's JSON form
///
/// Keys the node's shape does not declare land in `props` through its
/// flattened map. Writing an empty value clears the property. Nested nodes
/// introduced by the write get fresh ids.
fn write_property(node: &mut NodeViewMut<'_>, path: &str, value: &Value) -> Result<(), PatchErrorReason> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(PatchErrorReason::InvalidValue(format!("invalid property path '{}'", path)));
    }
    if let Some(key) = fixed_key(node.category()).filter(|key| *key == segments[0]) {
        return Err(PatchErrorReason::InvalidValue(format!(
            "'{}' of a {} cannot be rewritten",
            key,
            node.category()
        )));
    }

    let before = node.to_value()?;
    let mut json = before.clone();
    match segments.as_slice() {
        [key] if is_empty_value(value) => {
            if let Value::Object(map) = &mut json {
                map.remove(*key);
            }
        }
        _ => write_path(&mut json, &segments, value.clone())?,
    }
    node.replace_from_value(json)?;
    ensure_ids(node.reborrow());

    let written = node.to_value()?;
    match dropped_key(&before, &written, segments[0]) {
        Some(lost) => Err(PatchErrorReason::InvalidValue(format!(
            "writing '{}' would drop '{}' from this {}",
            path,
            lost,
            node.category()
        ))),
        None => Ok(()),
    }
}

/// Discriminant that decides how a node of `category` is read back
fn fixed_key(category: NodeCategory) -> Option<&'static str> {
    match category {
        NodeCategory::Document => Some("kind"),
        NodeCategory::Region => Some("slot"),
        _ => None,
    }
}

/// First key of `before`, other than `written_key`, missing from `after`
fn dropped_key<'v>(before: &'v Value, after: &Value, written_key: &str) -> Option<&'v str> {
    let (Value::Object(before), Value::Object(after)) = (before, after) else {
        return None;
    };
    before
        .keys()
        .find(|key| key.as_str() != written_key && !after.contains_key(key.as_str()))
        .map(String::as_str)
}

fn write_path(json: &mut Value, segments: &[&str], value: Value) -> Result<(), PatchErrorReason> {
    let Some((last, parents)) = segments.split_last() else {
        return Err(PatchErrorReason::InvalidValue("empty property path".to_string()));
    };

    let mut current = json;
    for segment in parents {
        current = child_mut(current, segment)
            .ok_or_else(|| PatchErrorReason::MissingPathSegment(segment.to_string()))?;
    }

    match current {
        Value::Object(map) if value.is_null() => {
            map.remove(*last);
            Ok(())
        }
        Value::Object(map) => {
            map.insert(last.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let slot = last
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get_mut(index))
                .ok_or_else(|| PatchErrorReason::MissingPathSegment(last.to_string()))?;
            *slot = value;
            Ok(())
        }
        _ => Err(PatchErrorReason::MissingPathSegment(last.to_string())),
    }
}

fn child_mut<'v>(value: &'v mut Value, segment: &str) -> Option<&'v mut Value> {
    let child = match value {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?),
        _ => None,
    }?;
    if child.is_null() {
        None
    } else {
        Some(child)
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn add_node(
    doc: &mut Document,
    parent: &NodeRef,
    index: Option<usize>,
    payload: &Value,
    hint: Option<&ContainerKey>,
) -> Result<(), PatchErrorReason> {
    if !payload.is_object() {
        return Err(PatchErrorReason::InvalidValue("node payload must be an object".to_string()));
    }

    let owner = find_parent(doc, parent)?;
    let key = {
        let view = doc
            .node_at(&owner)
            .ok_or_else(|| PatchErrorReason::ParentNotFound(parent.to_string()))?;
        container_for_payload(view, payload, hint)?
    };

    let mut node = Node::from_value(key.accepts(), payload.clone())?;
    ensure_ids(node.view_mut());

    let mut container = container_mut(doc, &owner, &key)?;
    let index = index.unwrap_or(container.len());
    container.insert(index, node).map_err(|node| occupied(&node))?;
    Ok(())
}

fn remove_node(doc: &mut Document, target: &NodeRef) -> Result<(), PatchErrorReason> {
    let location = find(doc, target)?;
    let (owner, key, index) = split_child(&location, "removed")?;
    container_mut(doc, &owner, &key)?
        .remove(index)
        .map(drop)
        .ok_or_else(|| PatchErrorReason::NotFound(target.to_string()))
}

fn move_node(
    doc: &mut Document,
    target: &NodeRef,
    to_parent: &NodeRef,
    index: Option<usize>,
    hint: Option<&ContainerKey>,
) -> Result<(), PatchErrorReason> {
    let source = find(doc, target)?;
    let (source_owner, source_key, source_index) = split_child(&source, "moved")?;
    let destination = find_parent(doc, to_parent)?;
    if destination.starts_with(&source) {
        return Err(PatchErrorReason::CycleDetected);
    }

    let key = {
        let category = doc
            .node_at(&source)
            .map(|node| node.category())
            .ok_or_else(|| PatchErrorReason::NotFound(target.to_string()))?;
        let owner = doc
            .node_at(&destination)
            .ok_or_else(|| PatchErrorReason::ParentNotFound(to_parent.to_string()))?;
        container_for_category(owner, category, hint)?
    };

    let node = container_mut(doc, &source_owner, &source_key)?
        .remove(source_index)
        .ok_or_else(|| PatchErrorReason::NotFound(target.to_string()))?;

    let destination = adjust_after_removal(&destination, &source);
    let mut container = container_mut(doc, &destination, &key)?;
    let index = index.unwrap_or(container.len());
    container.insert(index, node).map_err(|node| occupied(&node))?;
    Ok(())
}

/// Shift a location to account for the removal of `removed`
fn adjust_after_removal(location: &Location, removed: &Location) -> Location {
    let mut adjusted = location.clone();
    if let Some((owner, step)) = removed.split_last() {
        let depth = owner.depth();
        if adjusted.depth() > depth && adjusted.starts_with(&owner) {
            let hop = &mut adjusted.steps[depth];
            if hop.container == step.container && hop.index > step.index {
                hop.index -= 1;
            }
        }
    }
    adjusted
}

fn set_token(doc: &mut Document, target: &NodeRef, token: StyleToken, value: &str) -> Result<(), PatchErrorReason> {
    let location = find(doc, target)?;
    let mut node = node_mut(doc, &location)?;
    node.layout_mut()
        .get_or_insert_with(Layout::default)
        .set_token(token, value);
    Ok(())
}

fn toggle_variant(
    doc: &mut Document,
    target: &NodeRef,
    variant: &str,
    value: Option<bool>,
) -> Result<(), PatchErrorReason> {
    let location = find(doc, target)?;
    let mut node = node_mut(doc, &location)?;

    if let Some(slot) = node.variant_mut() {
        let active = slot.as_deref() == Some(variant);
        match value.unwrap_or(!active) {
            true => *slot = Some(variant.to_string()),
            false if active => *slot = None,
            false => {}
        }
        return Ok(());
    }

    let props = node.props_mut();
    let active = props.get(variant).and_then(Value::as_bool).unwrap_or(false);
    props.insert(variant.to_string(), Value::Bool(value.unwrap_or(!active)));
    Ok(())
}

fn wrap_with(doc: &mut Document, target: &NodeRef, wrapper: &Value) -> Result<(), PatchErrorReason> {
    let location = find(doc, target)?;
    let (owner, key, index) = split_child(&location, "wrapped")?;

    let category = doc
        .node_at(&location)
        .map(|node| node.category())
        .ok_or_else(|| PatchErrorReason::NotFound(target.to_string()))?;
    if !matches!(category, NodeCategory::Content | NodeCategory::Field) {
        return Err(PatchErrorReason::StructuralMismatch {
            owner: category,
            found: "wrapper".to_string(),
            supported: vec![NodeCategory::Content.to_string(), NodeCategory::Field.to_string()],
        });
    }

    let mut container = container_mut(doc, &owner, &key)?;
    let original = container
        .remove(index)
        .ok_or_else(|| PatchErrorReason::NotFound(target.to_string()))?;

    let wrapped = match original {
        Node::Content(child) => {
            let mut outer: ContentNode = serde_json::from_value(wrapper.clone())?;
            if outer.id.is_empty() {
                outer.id = new_id();
            }
            outer.children = vec![child];
            Node::Content(outer)
        }
        Node::Field(child) => {
            let mut outer: FormField = serde_json::from_value(wrapper.clone())?;
            if outer.id.is_empty() {
                outer.id = new_id();
            }
            if outer.component.is_empty() {
                outer.component = "group".to_string();
            }
            outer.fields = vec![child];
            Node::Field(outer)
        }
        other => {
            return Err(PatchErrorReason::StructuralMismatch {
                owner: other.category(),
                found: "wrapper".to_string(),
                supported: vec![NodeCategory::Content.to_string(), NodeCategory::Field.to_string()],
            })
        }
    };

    container.insert(index, wrapped).map_err(|node| occupied(&node))?;
    Ok(())
}

fn reorder(
    doc: &mut Document,
    parent: &NodeRef,
    from: usize,
    to: usize,
    hint: Option<&ContainerKey>,
) -> Result<(), PatchErrorReason> {
    let owner = find_parent(doc, parent)?;
    let key = match hint {
        Some(key) => key.clone(),
        None => {
            let view = doc
                .node_at(&owner)
                .ok_or_else(|| PatchErrorReason::ParentNotFound(parent.to_string()))?;
            view.containers()
                .into_iter()
                .find(|(key, container)| *key != ContainerKey::Regions && !container.is_empty())
                .map(|(key, _)| key)
                .ok_or_else(|| mismatch(view, "reorder"))?
        }
    };

    let mut container = container_mut(doc, &owner, &key)?;
    if !container.is_ordered() {
        return Err(PatchErrorReason::InvalidValue(format!("{} have no order", key)));
    }
    let len = container.len();
    if let Some(index) = [from, to].into_iter().find(|index| *index >= len) {
        return Err(PatchErrorReason::IndexOutOfBounds {
            container: key.to_string(),
            index,
            len,
        });
    }
    container.move_item(from, to);
    Ok(())
}

fn rename_field(doc: &mut Document, target: &NodeRef, from: &str, to: &str) -> Result<(), PatchErrorReason> {
    let location = find(doc, target)?;
    match node_mut(doc, &location)? {
        NodeViewMut::Field(field) => {
            if field.name != from {
                return Err(PatchErrorReason::NameMismatch {
                    expected: from.to_string(),
                    found: field.name.clone(),
                });
            }
            field.name = to.to_string();
            Ok(())
        }
        other => Err(PatchErrorReason::StructuralMismatch {
            owner: other.category(),
            found: "name".to_string(),
            supported: vec![NodeCategory::Field.to_string()],
        }),
    }
}

fn duplicate_node(doc: &mut Document, target: &NodeRef) -> Result<(), PatchErrorReason> {
    let location = find(doc, target)?;
    let (owner, key, index) = split_child(&location, "duplicated")?;

    let mut copy = doc
        .node_at(&location)
        .and_then(|node| node.to_node())
        .ok_or_else(|| PatchErrorReason::NotFound(target.to_string()))?;
    if let Node::Region(slot, _) = &copy {
        return Err(PatchErrorReason::InvalidValue(format!(
            "region slot '{}' cannot be duplicated",
            slot.as_str()
        )));
    }
    regenerate_ids(copy.view_mut());

    container_mut(doc, &owner, &key)?
        .insert(index + 1, copy)
        .map_err(|node| occupied(&node))?;
    Ok(())
}

fn swap(doc: &mut Document, a: &NodeRef, b: &NodeRef) -> Result<(), PatchErrorReason> {
    let first = find(doc, a)?;
    let second = find(doc, b)?;
    let (first_owner, first_key, first_index) = split_child(&first, "swapped")?;
    let (second_owner, second_key, second_index) = split_child(&second, "swapped")?;

    if first_owner != second_owner || first_key != second_key {
        return Err(PatchErrorReason::DifferentParents);
    }
    if first_index == second_index {
        return Ok(());
    }

    let mut container = container_mut(doc, &first_owner, &first_key)?;
    if !container.swap(first_index, second_index) {
        return Err(PatchErrorReason::InvalidValue(format!("{} have no order", first_key)));
    }
    Ok(())
}

fn bind_data(doc: &mut Document, target: &NodeRef, data_source: &DataSource) -> Result<(), PatchErrorReason> {
    let location = find(doc, target)?;
    let mut node = node_mut(doc, &location)?;
    let category = node.category();
    match node.data_source_mut() {
        Some(slot) => {
            *slot = Some(data_source.clone());
            Ok(())
        }
        None => Err(PatchErrorReason::StructuralMismatch {
            owner: category,
            found: "dataSource".to_string(),
            supported: [
                NodeCategory::Section,
                NodeCategory::Content,
                NodeCategory::Module,
                NodeCategory::Widget,
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }),
    }
}

fn rename_section(doc: &mut Document, target: &NodeRef, value: &str) -> Result<(), PatchErrorReason> {
    let location = find(doc, target)?;
    match node_mut(doc, &location)? {
        NodeViewMut::Section(section) => {
            if section.title.is_none() && section.label.is_some() {
                section.label = Some(value.to_string());
            } else {
                section.title = Some(value.to_string());
            }
            Ok(())
        }
        other => Err(PatchErrorReason::StructuralMismatch {
            owner: other.category(),
            found: "title".to_string(),
            supported: vec![NodeCategory::Section.to_string()],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> Document {
        Document::from_value(json!({
            "id": "f",
            "kind": "form",
            "fields": [
                { "id": "name", "name": "name", "label": "Name", "component": "input" },
                { "id": "email", "name": "email", "label": "Email", "component": "input" }
            ],
            "actions": [{ "id": "save", "label": "Save", "type": "submit" }]
        }))
        .unwrap()
    }

    #[test]
    fn test_write_property_falls_back_to_props() {
        let doc = apply(
            &form(),
            &Patch::SetProp { target: "email".into(), prop: "autocomplete".into(), value: json!("off") },
        )
        .unwrap();
        let email = crate::resolver::resolve(&doc, &"email".into()).unwrap();
        assert_eq!(email.props().get("autocomplete"), Some(&json!("off")));
    }

    #[test]
    fn test_write_property_clears_with_null() {
        let doc = apply(
            &form(),
            &Patch::SetProp { target: "email".into(), prop: "label".into(), value: Value::Null },
        )
        .unwrap();
        let view = crate::resolver::resolve(&doc, &"email".into()).unwrap();
        assert_eq!(view.display_text(), None);
        assert!(view.props().is_empty());
    }

    #[test]
    fn test_set_copy_requires_intermediate_segments() {
        let err = apply(
            &form(),
            &Patch::SetCopy { target: "email".into(), path: "layout.space".into(), value: json!("md") },
        )
        .unwrap_err();
        assert_eq!(err.reason, PatchErrorReason::MissingPathSegment("layout".into()));
        assert_eq!(err.sibling_ids, vec!["name".to_string(), "email".to_string()]);
    }

    #[test]
    fn test_adjust_after_removal_shifts_later_siblings() {
        let removed = Location::root().child(ContainerKey::Sections, 0);
        let destination = Location::root().child(ContainerKey::Sections, 2).child(ContainerKey::Content, 1);
        let adjusted = adjust_after_removal(&destination, &removed);
        assert_eq!(adjusted.to_string(), "sections[1].content[1]");

        let earlier = Location::root().child(ContainerKey::Sections, 0);
        let removed = Location::root().child(ContainerKey::Sections, 3);
        assert_eq!(adjust_after_removal(&earlier, &removed), earlier);
    }

    #[test]
    fn test_patch_wire_format() {
        let patch: Patch = serde_json::from_value(json!({
            "op": "moveNode",
            "target": "email",
            "toParent": { "by": "path", "path": "$" },
            "index": 0
        }))
        .unwrap();
        assert_eq!(
            patch,
            Patch::MoveNode {
                target: "email".into(),
                to_parent: NodeRef::path("$"),
                index: Some(0),
                container: None,
            }
        );

        let bind = serde_json::to_value(Patch::BindData {
            target: "w".into(),
            data_source: DataSource::Static { payload: json!([1, 2]) },
        })
        .unwrap();
        assert_eq!(bind["op"], "bindData");
        assert!(bind.get("dataSource").is_some());
    }
}
