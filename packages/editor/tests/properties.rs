use proptest::prelude::*;
use serde_json::json;
use std::collections::HashSet;
use uidsl_editor::{apply, NodeRef, Patch};
use uidsl_model::{visitor::collect_ids, Document, StyleToken};
use uidsl_validator::{validate, RuleCode};

/// Page with `sections` sections of `items` content nodes each
fn page(sections: usize, items: usize) -> Document {
    let sections: Vec<_> = (0..sections)
        .map(|s| {
            let content: Vec<_> = (0..items)
                .map(|i| json!({ "id": format!("c{}-{}", s, i), "type": "text", "text": format!("{} {}", s, i) }))
                .collect();
            json!({ "id": format!("s{}", s), "kind": "list", "title": format!("Section {}", s), "content": content })
        })
        .collect();
    Document::from_value(json!({
        "id": "page",
        "kind": "page",
        "sections": sections,
        "actions": [{ "id": "go", "label": "Go", "type": "button" }]
    }))
    .unwrap()
}

fn arb_ref() -> impl Strategy<Value = NodeRef> {
    prop_oneof![
        (0..4usize).prop_map(|s| NodeRef::id(format!("s{}", s))),
        (0..4usize, 0..4usize).prop_map(|(s, i)| NodeRef::id(format!("c{}-{}", s, i))),
        (0..4usize, 0..4usize).prop_map(|(s, i)| NodeRef::path(format!("sections[{}].content[{}]", s, i))),
        Just(NodeRef::id("go")),
        Just(NodeRef::id("page")),
        Just(NodeRef::id("ghost")),
    ]
}

fn arb_patch() -> impl Strategy<Value = Patch> {
    prop_oneof![
        arb_ref().prop_map(|target| Patch::RemoveNode { target }),
        arb_ref().prop_map(|target| Patch::DuplicateNode { target }),
        (arb_ref(), arb_ref()).prop_map(|(a, b)| Patch::Swap { a, b }),
        (arb_ref(), arb_ref(), proptest::option::of(0..5usize))
            .prop_map(|(target, to_parent, index)| Patch::MoveNode { target, to_parent, index, container: None }),
        (arb_ref(), "[a-z]{1,8}").prop_map(|(target, value)| Patch::SetCopy {
            target,
            path: "title".into(),
            value: json!(value),
        }),
        arb_ref().prop_map(|target| Patch::SetToken { target, token: StyleToken::Radius, value: "md".into() }),
        arb_ref().prop_map(|target| Patch::WrapWith { target, wrapper: json!({ "type": "box" }) }),
        (arb_ref(), 0..5usize, 0..5usize)
            .prop_map(|(parent, from, to)| Patch::Reorder { parent, from, to, container: None }),
    ]
}

proptest! {
    #[test]
    fn prop_apply_never_mutates_input(
        sections in 1..4usize,
        items in 0..4usize,
        patch in arb_patch(),
    ) {
        let doc = page(sections, items);
        let before = serde_json::to_string(&doc).unwrap();
        let _ = apply(&doc, &patch);
        prop_assert_eq!(serde_json::to_string(&doc).unwrap(), before);
    }

    #[test]
    fn prop_duplicate_ids_are_fresh_and_unique(
        sections in 1..4usize,
        items in 1..4usize,
        target in arb_ref(),
    ) {
        let doc = page(sections, items);
        let before: HashSet<String> = collect_ids(&doc).into_iter().collect();

        if let Ok(next) = apply(&doc, &Patch::DuplicateNode { target }) {
            let after = collect_ids(&next);
            let unique: HashSet<&String> = after.iter().collect();
            prop_assert_eq!(unique.len(), after.len());

            let fresh: Vec<&String> = after.iter().filter(|id| !before.contains(*id)).collect();
            prop_assert!(!fresh.is_empty());
            prop_assert_eq!(after.len(), before.len() + fresh.len());
        }
    }

    #[test]
    fn prop_hard_action_contract(
        hard in any::<bool>(),
        confirmation in proptest::option::of(any::<bool>()),
    ) {
        let mut action = json!({ "id": "00000000-0000-4000-8000-000000000003", "label": "Act", "type": "button" });
        if hard {
            action["kind"] = json!("hard");
        }
        if let Some(confirmation) = confirmation {
            action["requiresConfirmation"] = json!(confirmation);
        }
        let doc = Document::from_value(json!({
            "id": "00000000-0000-4000-8000-000000000001",
            "kind": "form",
            "fields": [{ "id": "00000000-0000-4000-8000-000000000002", "name": "n", "label": "N", "component": "input" }],
            "actions": [action]
        }))
        .unwrap();

        let flagged = validate(&doc).errors.iter().any(|d| d.code == RuleCode::HardActionMissingConfirmation);
        prop_assert_eq!(flagged, hard && confirmation != Some(true));
    }
}
