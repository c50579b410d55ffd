//! End-to-end scenarios: patch, validate, commit

use serde_json::json;
use uidsl_editor::{
    apply, resolve, CommitFilter, CommitMeta, EditSession, History, Patch, PatchErrorKind,
    PatchErrorReason, SessionConfig,
};
use uidsl_model::{visitor::collect_ids, Document, DocumentBody, NodeView};
use uidsl_validator::{validate, RuleCode};

fn id(n: u32) -> String {
    format!("00000000-0000-4000-8000-{:012}", n)
}

fn signup_form() -> Document {
    Document::from_value(json!({
        "id": id(1),
        "kind": "form",
        "title": "Sign up",
        "fields": [{ "id": id(2), "name": "email", "label": "Email", "component": "input", "validation": "required|email" }],
        "actions": [{ "id": id(3), "label": "Create account", "type": "submit", "kind": "soft" }]
    }))
    .unwrap()
}

fn landing_page() -> Document {
    Document::from_value(json!({
        "id": id(10),
        "kind": "page",
        "sections": [
            { "id": id(11), "kind": "hero", "title": "One", "content": [] },
            { "id": id(12), "kind": "features", "title": "Two", "content": [] },
            { "id": id(13), "kind": "cta", "title": "Three", "content": [] }
        ],
        "actions": [{ "id": id(14), "label": "Start", "type": "button" }]
    }))
    .unwrap()
}

fn section_ids(doc: &Document) -> Vec<String> {
    match &doc.body {
        DocumentBody::Page(page) => page.sections.iter().map(|s| s.id.clone()).collect(),
        _ => Vec::new(),
    }
}

#[test]
fn test_duplicate_email_field() {
    let form = signup_form();
    let snapshot = serde_json::to_string(&form).unwrap();

    let result = apply(&form, &Patch::DuplicateNode { target: id(2).into() }).unwrap();

    let DocumentBody::Form(body) = &result.body else {
        panic!("expected a form");
    };
    assert_eq!(body.fields.len(), 2);
    let (original, copy) = (&body.fields[0], &body.fields[1]);
    assert_eq!(original.id, id(2));
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.name, "email");
    assert_eq!(copy.component, "input");
    assert_eq!(serde_json::to_string(&form).unwrap(), snapshot);
}

#[test]
fn test_swap_sections_and_reject_cross_container_swap() {
    let page = landing_page();

    let swapped = apply(&page, &Patch::Swap { a: id(11).into(), b: id(13).into() }).unwrap();
    assert_eq!(section_ids(&swapped), vec![id(13), id(12), id(11)]);

    let err = apply(&page, &Patch::Swap { a: id(11).into(), b: id(14).into() }).unwrap_err();
    assert_eq!(err.reason, PatchErrorReason::DifferentParents);
    assert_eq!(err.op, "swap");
    assert_eq!(err.sibling_ids, vec![id(11), id(12), id(13)]);
}

#[test]
fn test_hard_action_needs_confirmation() {
    let form = Document::from_value(json!({
        "id": id(1),
        "kind": "form",
        "fields": [{ "id": id(2), "name": "reason", "label": "Reason", "component": "textarea" }],
        "actions": [{ "id": id(3), "label": "Delete account", "type": "button", "kind": "hard", "requiresConfirmation": false }]
    }))
    .unwrap();

    let report = validate(&form);
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].code, RuleCode::HardActionMissingConfirmation);

    let confirmed = apply(
        &form,
        &Patch::SetProp { target: id(3).into(), prop: "requiresConfirmation".into(), value: json!(true) },
    )
    .unwrap();
    assert!(validate(&confirmed).valid);
}

#[test]
fn test_commit_after_undo_discards_redo_tail() {
    let mut history = History::new();
    let mut doc = signup_form();
    for (i, label) in ["c0", "c1", "c2"].iter().enumerate() {
        let patch = Patch::SetCopy { target: id(2).into(), path: "label".into(), value: json!(label) };
        let after = apply(&doc, &patch).unwrap();
        history.commit(vec![patch], doc, after.clone(), CommitMeta::new("ana", format!("commit {}", i)));
        doc = after;
    }
    assert_eq!(history.cursor(), Some(2));

    let c1_after = history.commits(&CommitFilter::default())[1].after.clone();
    let restored = history.undo().cloned().unwrap();
    assert_eq!(history.cursor(), Some(1));
    assert_eq!(restored, c1_after);

    let patch = Patch::SetCopy { target: id(2).into(), path: "label".into(), value: json!("c3") };
    let after = apply(&restored, &patch).unwrap();
    history.commit(vec![patch], restored, after, CommitMeta::new("ana", "commit 3"));

    let messages: Vec<String> = history
        .commits(&CommitFilter::default())
        .iter()
        .map(|c| c.meta.message.clone())
        .collect();
    assert_eq!(messages, vec!["commit 0", "commit 1", "commit 3"]);
    assert_eq!(history.cursor(), Some(2));
    assert!(history.redo().is_none());
}

#[test]
fn test_add_node_routes_by_payload_shape() {
    let form = signup_form();
    let with_action = apply(
        &form,
        &Patch::AddNode {
            parent: id(1).into(),
            index: Some(0),
            node: json!({ "label": "Cancel", "type": "button" }),
            container: None,
        },
    )
    .unwrap();
    assert_eq!(with_action.actions.len(), 2);
    assert_eq!(with_action.actions[0].label.as_deref(), Some("Cancel"));
    assert!(uidsl_model::is_uuid_v4(&with_action.actions[0].id));

    let with_field = apply(
        &form,
        &Patch::AddNode {
            parent: id(1).into(),
            index: None,
            node: json!({ "name": "password", "component": "password", "label": "Password" }),
            container: None,
        },
    )
    .unwrap();
    let DocumentBody::Form(body) = &with_field.body else {
        panic!("expected a form");
    };
    assert_eq!(body.fields[1].name, "password");
    assert_eq!(with_field.actions.len(), 1);
}

#[test]
fn test_add_node_rejects_unplaceable_payload() {
    let dashboard = Document::from_value(json!({
        "id": id(20),
        "kind": "dashboard",
        "widgets": [{ "id": id(21), "kind": "metric", "title": "Users" }]
    }))
    .unwrap();

    let err = apply(
        &dashboard,
        &Patch::AddNode { parent: id(20).into(), index: None, node: json!({ "key": "email" }), container: None },
    )
    .unwrap_err();
    assert_eq!(err.kind(), PatchErrorKind::StructuralMismatch);
    assert_eq!(err.sibling_ids, vec![id(21)]);

    let widget = apply(
        &dashboard,
        &Patch::AddNode { parent: id(20).into(), index: None, node: json!({ "kind": "chart" }), container: None },
    )
    .unwrap();
    let DocumentBody::Dashboard(body) = &widget.body else {
        panic!("expected a dashboard");
    };
    assert_eq!(body.widgets.len(), 2);
}

#[test]
fn test_session_round_trip_through_history() {
    let mut session = EditSession::new(landing_page(), SessionConfig::default());
    session
        .apply(vec![Patch::RenameSection { target: id(12).into(), value: "Features".into() }], session.meta("rename"))
        .unwrap();
    session
        .apply(vec![Patch::RemoveNode { target: id(13).into() }], session.meta("drop cta"))
        .unwrap();

    let saved = serde_json::to_string(session.history()).unwrap();
    let history: History = serde_json::from_str(&saved).unwrap();
    let mut resumed = EditSession::from_history(history, SessionConfig::default()).unwrap();

    assert_eq!(resumed.document(), session.document());
    assert!(resumed.undo());
    assert_eq!(section_ids(resumed.document()).len(), 3);
    let renamed = resolve(resumed.document(), &id(12).into()).unwrap();
    assert_eq!(renamed.display_text(), Some("Features"));
    assert!(matches!(renamed, NodeView::Section(_)));
}

#[test]
fn test_every_id_survives_a_valid_batch() {
    let page = landing_page();
    let before = collect_ids(&page);
    let result = uidsl_editor::apply_all(
        &page,
        &[
            Patch::Reorder { parent: id(10).into(), from: 0, to: 2, container: None },
            Patch::SetToken { target: id(11).into(), token: uidsl_model::StyleToken::Space, value: "lg".into() },
            Patch::ToggleVariant { target: id(14).into(), variant: "primary".into(), value: None },
        ],
    )
    .unwrap();

    let mut after = collect_ids(&result);
    let mut expected = before.clone();
    after.sort();
    expected.sort();
    assert_eq!(after, expected);
    assert_eq!(section_ids(&result), vec![id(12), id(13), id(11)]);
    assert_eq!(result.actions[0].variant.as_deref(), Some("primary"));
}
