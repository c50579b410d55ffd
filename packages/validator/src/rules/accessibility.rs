use crate::diagnostic::{Diagnostic, RuleCode};
use crate::rules::ValidationRule;
use uidsl_model::{Location, NodeView};

/// Labels that assistive technology reads out
pub struct AccessibilityRule;

impl ValidationRule for AccessibilityRule {
    fn name(&self) -> &'static str {
        "accessibility"
    }

    fn description(&self) -> &'static str {
        "Warn about fields and actions without a visible label"
    }

    fn check_node(&self, node: NodeView<'_>, location: &Location) -> Vec<Diagnostic> {
        match node {
            NodeView::Field(field) if field.component != "hidden" && is_blank(field.label.as_deref()) => {
                vec![Diagnostic::warning(
                    RuleCode::FieldMissingLabel,
                    format!("Field '{}' has no label", field.name),
                )
                .at(&field.id, location)
                .with_suggestion("Add a label so screen readers can announce the field")]
            }
            NodeView::Action(action) if is_blank(action.label.as_deref()) => {
                let has_aria_label = action
                    .props
                    .get("aria-label")
                    .and_then(|value| value.as_str())
                    .is_some_and(|label| !label.trim().is_empty());
                if has_aria_label {
                    return Vec::new();
                }
                vec![Diagnostic::warning(RuleCode::ActionMissingLabel, "Action has no label")
                    .at(&action.id, location)
                    .with_suggestion("Add a label, or an 'aria-label' prop for icon-only actions")]
            }
            _ => Vec::new(),
        }
    }
}

fn is_blank(text: Option<&str>) -> bool {
    text.map_or(true, |text| text.trim().is_empty())
}
