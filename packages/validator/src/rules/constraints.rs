use crate::diagnostic::{Diagnostic, RuleCode};
use crate::rules::ValidationRule;
use regex::Regex;
use std::collections::HashSet;
use std::ops::ControlFlow;
use uidsl_model::visitor::walk_located;
use uidsl_model::{Condition, Constraint, Document, Location, NodeView};

/// Document constraints must be evaluable
pub struct ConstraintsRule;

impl ValidationRule for ConstraintsRule {
    fn name(&self) -> &'static str {
        "constraints"
    }

    fn description(&self) -> &'static str {
        "Check constraint patterns compile and constraint targets exist"
    }

    fn check_document(&self, doc: &Document) -> Vec<Diagnostic> {
        let Some(constraints) = &doc.constraints else {
            return Vec::new();
        };
        let targets = known_targets(doc);
        let root = Location::root();

        constraints
            .hard
            .iter()
            .chain(&constraints.soft)
            .flat_map(|constraint| check_constraint(constraint, &targets, &doc.id, &root))
            .collect()
    }
}

fn check_constraint(
    constraint: &Constraint,
    targets: &HashSet<&str>,
    doc_id: &str,
    root: &Location,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if let Condition::Pattern { value } = &constraint.condition {
        if let Err(err) = Regex::new(value) {
            diagnostics.push(
                Diagnostic::error(
                    RuleCode::InvalidConstraintPattern,
                    format!("Constraint pattern '{}' does not compile: {}", value, err),
                )
                .at(doc_id, root),
            );
        }
    }

    if let Some(target) = &constraint.target {
        if !targets.contains(target.as_str()) {
            diagnostics.push(
                Diagnostic::warning(
                    RuleCode::UnknownConstraintTarget,
                    format!("Constraint targets unknown field or node '{}'", target),
                )
                .at(doc_id, root),
            );
        }
    }

    diagnostics
}

/// Field names, column keys and node ids a constraint may point at
fn known_targets(doc: &Document) -> HashSet<&str> {
    let mut targets = HashSet::new();
    let _ = walk_located(doc, |_, node| {
        targets.insert(node.id());
        match node {
            NodeView::Field(field) => {
                targets.insert(field.name.as_str());
            }
            NodeView::Column(column) => {
                targets.insert(column.key.as_str());
            }
            _ => {}
        }
        ControlFlow::Continue(())
    });
    targets
}
