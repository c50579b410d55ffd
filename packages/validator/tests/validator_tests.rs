use serde_json::json;
use uidsl_model::Document;
use uidsl_validator::{validate, RuleCode};

fn id(n: u32) -> String {
    format!("00000000-0000-4000-8000-{:012}", n)
}

fn doc(value: serde_json::Value) -> Document {
    Document::from_value(value).unwrap()
}

#[test]
fn test_hard_action_without_confirmation_is_invalid() {
    let form = doc(json!({
        "id": id(1),
        "kind": "form",
        "fields": [{ "id": id(2), "name": "email", "label": "Email", "component": "input" }],
        "actions": [{ "id": id(3), "label": "Delete account", "kind": "hard" }]
    }));

    let report = validate(&form);
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].code, RuleCode::HardActionMissingConfirmation);
    assert_eq!(report.errors[0].node_id.as_deref(), Some(id(3).as_str()));
    assert_eq!(report.errors[0].path.as_deref(), Some("actions[0]"));
}

#[test]
fn test_well_formed_documents_of_every_kind() {
    let documents = vec![
        json!({
            "id": id(1),
            "kind": "form",
            "fields": [{ "id": id(2), "name": "email", "label": "Email", "component": "input" }],
            "actions": [{ "id": id(3), "label": "Save", "type": "submit", "kind": "soft", "preauthAllowed": true }]
        }),
        json!({
            "id": id(10),
            "kind": "screen",
            "regions": {
                "header": { "id": id(11), "modules": [{ "id": id(12), "type": "navbar" }] },
                "main": { "id": id(13), "content": [{ "id": id(14), "type": "text", "text": "Hi" }] }
            }
        }),
        json!({
            "id": id(20),
            "kind": "table",
            "columns": [{ "id": id(21), "key": "name", "label": "Name", "sortable": true }],
            "filters": [{ "id": id(22), "column": "name", "operator": "contains" }]
        }),
        json!({
            "id": id(30),
            "kind": "dashboard",
            "widgets": [{ "id": id(31), "kind": "metric", "title": "Users", "data": { "value": 42 } }]
        }),
        json!({
            "id": id(40),
            "kind": "decision",
            "pattern": "recommendation",
            "options": [{ "id": id(41), "name": "Pro", "price": 20 }]
        }),
    ];

    for value in documents {
        let report = validate(&doc(value));
        assert!(report.valid, "unexpected errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "unexpected warnings: {:?}", report.warnings);
    }
}

#[test]
fn test_empty_primary_containers() {
    let cases = vec![
        (json!({ "id": id(1), "kind": "form" }), RuleCode::FormRequiresFields),
        (json!({ "id": id(1), "kind": "page" }), RuleCode::PageRequiresSectionsOrRegions),
        (json!({ "id": id(1), "kind": "table" }), RuleCode::TableRequiresColumns),
        (json!({ "id": id(1), "kind": "dashboard" }), RuleCode::DashboardRequiresWidgets),
        (
            json!({ "id": id(1), "kind": "decision", "pattern": "tradeoffs" }),
            RuleCode::DecisionRequiresOptions,
        ),
    ];

    for (value, code) in cases {
        let report = validate(&doc(value));
        assert!(!report.valid);
        assert!(report.has_code(code), "expected {} in {:?}", code, report.errors);
    }
}

#[test]
fn test_field_requirements() {
    let form = doc(json!({
        "id": id(1),
        "kind": "form",
        "fields": [
            { "id": id(2), "label": "Nameless", "component": "input" },
            { "id": id(3), "name": "bio", "label": "Bio" },
            { "id": id(4), "name": "nick", "component": "input" }
        ]
    }));

    let report = validate(&form);
    let errors: Vec<RuleCode> = report.errors.iter().map(|d| d.code).collect();
    let warnings: Vec<RuleCode> = report.warnings.iter().map(|d| d.code).collect();
    assert_eq!(errors, vec![RuleCode::FieldMissingName, RuleCode::FieldMissingComponent]);
    assert_eq!(warnings, vec![RuleCode::FieldMissingLabel]);
}

#[test]
fn test_unknown_section_module_and_duplicate_ids() {
    let page = doc(json!({
        "id": id(1),
        "kind": "page",
        "sections": [
            { "id": id(2), "kind": "hero", "module": "hero", "content": [{ "id": id(3), "type": "text" }] },
            { "id": id(2), "kind": "promo", "module": "carousel", "content": [] }
        ]
    }));

    let report = validate(&page);
    assert!(report.has_code(RuleCode::DuplicateId));
    assert!(report.has_code(RuleCode::UnknownModule));
    assert_eq!(report.errors.len(), 2);
}

#[test]
fn test_non_uuid_ids_are_invalid() {
    let table = doc(json!({
        "id": "orders",
        "kind": "table",
        "columns": [{ "id": id(2), "key": "total" }]
    }));

    let report = validate(&table);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].code, RuleCode::InvalidId);
}
