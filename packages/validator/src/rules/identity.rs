use crate::diagnostic::{Diagnostic, RuleCode};
use crate::rules::ValidationRule;
use std::collections::HashSet;
use std::ops::ControlFlow;
use uidsl_model::visitor::walk_located;
use uidsl_model::{is_uuid_v4, Document};

/// Every node carries a unique UUID v4 id
pub struct IdentityRule;

impl ValidationRule for IdentityRule {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn description(&self) -> &'static str {
        "Require a unique UUID v4 id on the document and every node"
    }

    fn check_document(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut seen = HashSet::new();

        let _ = walk_located(doc, |location, node| {
            let id = node.id();
            if id.is_empty() {
                diagnostics.push(
                    Diagnostic::error(RuleCode::MissingId, format!("{} has no id", node.category()))
                        .at(id, location)
                        .with_suggestion("Assign a UUID v4 id"),
                );
            } else if !is_uuid_v4(id) {
                diagnostics.push(
                    Diagnostic::error(
                        RuleCode::InvalidId,
                        format!("{} id '{}' is not a UUID v4", node.category(), id),
                    )
                    .at(id, location),
                );
            }

            if !id.is_empty() && !seen.insert(id) {
                diagnostics.push(
                    Diagnostic::error(RuleCode::DuplicateId, format!("Id '{}' is used more than once", id))
                        .at(id, location),
                );
            }
            ControlFlow::Continue(())
        });

        diagnostics
    }
}
