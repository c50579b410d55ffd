use crate::diagnostic::{Diagnostic, RuleCode};
use crate::rules::ValidationRule;
use uidsl_model::{ActionKind, Location, NodeView, RiskLevel};

/// Action Contract business rules
///
/// - a hard action requires confirmation
/// - a high-risk action requires confirmation
/// - only soft actions may be pre-authorized
pub struct ActionContractRule;

impl ValidationRule for ActionContractRule {
    fn name(&self) -> &'static str {
        "action-contract"
    }

    fn description(&self) -> &'static str {
        "Enforce confirmation and pre-authorization rules on actions"
    }

    fn check_node(&self, node: NodeView<'_>, location: &Location) -> Vec<Diagnostic> {
        let NodeView::Action(action) = node else {
            return Vec::new();
        };
        let mut diagnostics = Vec::new();
        let label = action.label.as_deref().unwrap_or(action.id.as_str());

        if action.kind == Some(ActionKind::Hard) && !action.requires_confirmation() {
            diagnostics.push(
                Diagnostic::error(
                    RuleCode::HardActionMissingConfirmation,
                    format!("Hard action '{}' must require confirmation", label),
                )
                .at(&action.id, location)
                .with_suggestion("Set requiresConfirmation to true"),
            );
        }

        if action.risk_level == Some(RiskLevel::High) && !action.requires_confirmation() {
            diagnostics.push(
                Diagnostic::error(
                    RuleCode::HighRiskMissingConfirmation,
                    format!("High-risk action '{}' must require confirmation", label),
                )
                .at(&action.id, location)
                .with_suggestion("Set requiresConfirmation to true"),
            );
        }

        if action.preauth_allowed() && action.kind != Some(ActionKind::Soft) {
            diagnostics.push(
                Diagnostic::error(
                    RuleCode::PreauthOnlyForSoft,
                    format!("Action '{}' allows pre-authorization but is not soft", label),
                )
                .at(&action.id, location)
                .with_suggestion("Set kind to soft or remove preauthAllowed"),
            );
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uidsl_model::Action;

    fn check(value: serde_json::Value) -> Vec<RuleCode> {
        let action: Action = serde_json::from_value(value).unwrap();
        ActionContractRule
            .check_node(NodeView::Action(&action), &Location::root())
            .into_iter()
            .map(|d| d.code)
            .collect()
    }

    #[test]
    fn test_hard_action_without_confirmation() {
        let codes = check(json!({ "id": "a", "label": "Delete", "kind": "hard" }));
        assert_eq!(codes, vec![RuleCode::HardActionMissingConfirmation]);
    }

    #[test]
    fn test_hard_high_risk_preauth_reports_all_three() {
        let codes = check(json!({
            "id": "a",
            "label": "Wipe",
            "kind": "hard",
            "riskLevel": "high",
            "preauthAllowed": true
        }));
        assert_eq!(
            codes,
            vec![
                RuleCode::HardActionMissingConfirmation,
                RuleCode::HighRiskMissingConfirmation,
                RuleCode::PreauthOnlyForSoft,
            ]
        );
    }

    #[test]
    fn test_confirmed_hard_action_passes() {
        let codes = check(json!({
            "id": "a",
            "label": "Delete",
            "kind": "hard",
            "riskLevel": "high",
            "requiresConfirmation": true
        }));
        assert!(codes.is_empty());
    }

    #[test]
    fn test_preauth_requires_explicit_soft_kind() {
        assert_eq!(
            check(json!({ "id": "a", "label": "Save", "preauthAllowed": true })),
            vec![RuleCode::PreauthOnlyForSoft]
        );
        assert!(check(json!({ "id": "a", "label": "Save", "kind": "soft", "preauthAllowed": true })).is_empty());
    }
}
