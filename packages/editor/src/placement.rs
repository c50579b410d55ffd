//! Type-directed container dispatch.
//!
//! An `addNode` payload is untyped JSON; its category is inferred from the
//! keys it carries, restricted to the categories the parent's containers
//! accept. A form takes `{ "name": .., "component": .. }` into `fields` and
//! `{ "type": "submit" }` into `actions`; a dashboard takes
//! `{ "kind": "chart" }` into `widgets`.

use crate::errors::PatchErrorReason;
use serde_json::{Map, Value};
use uidsl_model::{ContainerKey, ModuleKind, NodeCategory, NodeView, WidgetKind};

const ACTION_TYPES: &[&str] = &["submit", "button", "reset", "link"];

/// Infer the category of a node payload among `accepted`
pub fn classify(payload: &Value, accepted: &[NodeCategory]) -> Option<NodeCategory> {
    let object = payload.as_object()?;
    let accepts = |category: NodeCategory| accepted.contains(&category);

    let rules: [(NodeCategory, fn(&Map<String, Value>) -> bool); 10] = [
        (NodeCategory::Action, looks_like_action),
        (NodeCategory::Region, |o| has(o, "slot")),
        (NodeCategory::Filter, |o| has(o, "column") || has(o, "operator")),
        (NodeCategory::Column, |o| has(o, "key")),
        (NodeCategory::Widget, |o| {
            text(o, "kind").is_some_and(|kind| WidgetKind::parse(kind).is_some())
        }),
        (NodeCategory::Field, |o| has(o, "component") || has(o, "name")),
        (NodeCategory::DecisionOption, |o| has(o, "name")),
        (NodeCategory::Module, |o| {
            text(o, "type").is_some_and(|kind| ModuleKind::parse(kind).is_some())
        }),
        (NodeCategory::Section, |_| true),
        (NodeCategory::Content, |_| true),
    ];

    if let Some((category, _)) = rules
        .iter()
        .find(|(category, matches)| accepts(*category) && matches(object))
    {
        return Some(*category);
    }

    let mut distinct = accepted.to_vec();
    distinct.dedup();
    match distinct.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

fn looks_like_action(object: &Map<String, Value>) -> bool {
    text(object, "type").is_some_and(|kind| ACTION_TYPES.contains(&kind))
        || matches!(text(object, "kind"), Some("hard" | "soft"))
        || has(object, "requiresConfirmation")
        || has(object, "riskLevel")
        || has(object, "preauthAllowed")
}

fn has(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).is_some_and(|value| !value.is_null())
}

fn text<'v>(object: &'v Map<String, Value>, key: &str) -> Option<&'v str> {
    object.get(key).and_then(Value::as_str)
}

/// Container names of `owner`, for error reports
pub fn container_names(owner: NodeView<'_>) -> Vec<String> {
    owner.containers().into_iter().map(|(key, _)| key.to_string()).collect()
}

pub fn mismatch(owner: NodeView<'_>, found: impl ToString) -> PatchErrorReason {
    PatchErrorReason::StructuralMismatch {
        owner: owner.category(),
        found: found.to_string(),
        supported: container_names(owner),
    }
}

/// Container of `owner` that receives an `addNode` payload
pub fn container_for_payload(
    owner: NodeView<'_>,
    payload: &Value,
    hint: Option<&ContainerKey>,
) -> Result<ContainerKey, PatchErrorReason> {
    let keys: Vec<ContainerKey> = owner.containers().into_iter().map(|(key, _)| key).collect();

    if let Some(hint) = hint {
        return keys
            .into_iter()
            .find(|key| key == hint)
            .ok_or_else(|| mismatch(owner, hint));
    }

    let accepted: Vec<NodeCategory> = keys.iter().map(ContainerKey::accepts).collect();
    classify(payload, &accepted)
        .and_then(|category| keys.into_iter().find(|key| key.accepts() == category))
        .ok_or_else(|| mismatch(owner, describe(payload)))
}

/// Container of `owner` that can receive an existing node of `category`
pub fn container_for_category(
    owner: NodeView<'_>,
    category: NodeCategory,
    hint: Option<&ContainerKey>,
) -> Result<ContainerKey, PatchErrorReason> {
    owner
        .containers()
        .into_iter()
        .map(|(key, _)| key)
        .find(|key| key.accepts() == category && hint.map_or(true, |hint| hint == key))
        .ok_or_else(|| mismatch(owner, category))
}

fn describe(payload: &Value) -> String {
    match payload {
        Value::Object(object) => {
            let keys: Vec<&str> = object.keys().map(String::as_str).collect();
            format!("node {{{}}}", keys.join(", "))
        }
        other => other.to_string(),
    }
}
