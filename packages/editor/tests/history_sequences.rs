//! Tests for longer edit sequences through a session
//!
//! This tests:
//! - Undo/redo round trips over several commits
//! - Branching, switching and committing on a branch
//! - Checkout by commit id

use serde_json::json;
use uidsl_editor::{CommitFilter, EditSession, EditorError, HistoryError, Patch, SessionConfig};
use uidsl_model::{Document, DocumentBody};

fn table() -> Document {
    Document::from_value(json!({
        "id": "orders",
        "kind": "table",
        "columns": [
            { "id": "c-id", "key": "id", "label": "Id" },
            { "id": "c-total", "key": "total", "label": "Total", "sortable": true }
        ]
    }))
    .unwrap()
}

fn column_keys(doc: &Document) -> Vec<String> {
    match &doc.body {
        DocumentBody::Table(table) => table.columns.iter().map(|c| c.key.clone()).collect(),
        _ => Vec::new(),
    }
}

fn add_column(key: &str) -> Patch {
    Patch::AddNode {
        parent: "orders".into(),
        index: None,
        node: json!({ "key": key, "label": key }),
        container: None,
    }
}

#[test]
fn test_undo_then_redo_restores_each_commit() {
    let mut session = EditSession::new(table(), SessionConfig::default());
    let mut snapshots = vec![session.document().clone()];
    for key in ["status", "placed_at", "customer"] {
        session.apply(vec![add_column(key)], session.meta(format!("add {}", key))).unwrap();
        snapshots.push(session.document().clone());
    }

    for expected in snapshots.iter().rev().skip(1) {
        assert!(session.undo());
        assert_eq!(session.document(), expected);
    }
    assert!(!session.undo());

    for expected in snapshots.iter().skip(1) {
        assert!(session.redo());
        assert_eq!(session.document(), expected);
    }
    assert!(!session.redo());
}

#[test]
fn test_branch_work_is_isolated() {
    let mut session = EditSession::new(table(), SessionConfig::default());
    session.apply(vec![add_column("status")], session.meta("status")).unwrap();

    session.create_branch("pricing").unwrap();
    session.switch_branch("pricing").unwrap();
    session.apply(vec![add_column("discount")], session.meta("discount")).unwrap();
    assert_eq!(column_keys(session.document()), vec!["id", "total", "status", "discount"]);

    session.switch_branch("main").unwrap();
    assert_eq!(column_keys(session.document()), vec!["id", "total", "status"]);
    assert_eq!(session.history().active_branch(), "main");

    let pricing = CommitFilter {
        branch: Some("pricing".into()),
        ..Default::default()
    };
    assert_eq!(session.history().commits(&pricing).len(), 1);

    let err = session.switch_branch("nope").unwrap_err();
    assert!(matches!(err, EditorError::History(HistoryError::BranchNotFound(_))));
}

#[test]
fn test_checkout_moves_to_commit() {
    let mut session = EditSession::new(table(), SessionConfig::default());
    for key in ["a", "b", "c"] {
        session.apply(vec![add_column(key)], session.meta(key)).unwrap();
    }
    let first = session.history().commits(&CommitFilter::default())[0].id.clone();

    assert!(session.checkout(&first));
    assert_eq!(column_keys(session.document()), vec!["id", "total", "a"]);
    assert!(session.history().can_redo());

    assert!(!session.checkout("not-a-commit"));
    assert_eq!(column_keys(session.document()), vec!["id", "total", "a"]);
}

#[test]
fn test_start_commits_a_whole_draft() {
    let mut session = EditSession::new(table(), SessionConfig::default());
    let draft = Document::from_json_str(
        r#"{ "id": "orders", "kind": "table", "columns": "[{\"id\":\"c\",\"key\":\"sku\"}]" }"#,
    )
    .unwrap();

    session.start(draft.clone(), session.meta("regenerate")).unwrap();
    assert_eq!(session.document(), &draft);
    assert_eq!(column_keys(session.document()), vec!["sku"]);

    assert!(session.undo());
    assert_eq!(session.document(), &table());
}

#[test]
fn test_failed_batch_commits_nothing() {
    let mut session = EditSession::new(table(), SessionConfig::default());
    let err = session
        .apply(
            vec![add_column("ok"), Patch::RemoveNode { target: "missing".into() }],
            session.meta("broken"),
        )
        .unwrap_err();

    let EditorError::Batch(batch) = err else {
        panic!("expected a batch error");
    };
    assert_eq!(batch.index, 1);
    assert_eq!(column_keys(&batch.partial), vec!["id", "total", "ok"]);
    assert!(session.history().is_empty());
    assert_eq!(session.document(), &table());
}
