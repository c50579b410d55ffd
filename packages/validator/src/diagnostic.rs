use serde::{Deserialize, Serialize};
use uidsl_model::{Location, NodeId};

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// Stable machine-readable diagnostic codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCode {
    MalformedDocument,
    MissingId,
    InvalidId,
    DuplicateId,
    FormRequiresFields,
    PageRequiresSectionsOrRegions,
    PageHasSectionsAndRegions,
    TableRequiresColumns,
    DashboardRequiresWidgets,
    DecisionRequiresOptions,
    DecisionMissingPattern,
    Compare3OptionCount,
    FieldMissingName,
    FieldMissingComponent,
    FieldMissingLabel,
    ColumnMissingKey,
    WidgetMissingKind,
    UnknownModule,
    ActionMissingLabel,
    HardActionMissingConfirmation,
    HighRiskMissingConfirmation,
    PreauthOnlyForSoft,
    InvalidConstraintPattern,
    UnknownConstraintTarget,
}

impl RuleCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCode::MalformedDocument => "MALFORMED_DOCUMENT",
            RuleCode::MissingId => "MISSING_ID",
            RuleCode::InvalidId => "INVALID_ID",
            RuleCode::DuplicateId => "DUPLICATE_ID",
            RuleCode::FormRequiresFields => "FORM_REQUIRES_FIELDS",
            RuleCode::PageRequiresSectionsOrRegions => "PAGE_REQUIRES_SECTIONS_OR_REGIONS",
            RuleCode::PageHasSectionsAndRegions => "PAGE_HAS_SECTIONS_AND_REGIONS",
            RuleCode::TableRequiresColumns => "TABLE_REQUIRES_COLUMNS",
            RuleCode::DashboardRequiresWidgets => "DASHBOARD_REQUIRES_WIDGETS",
            RuleCode::DecisionRequiresOptions => "DECISION_REQUIRES_OPTIONS",
            RuleCode::DecisionMissingPattern => "DECISION_MISSING_PATTERN",
            RuleCode::Compare3OptionCount => "COMPARE3_OPTION_COUNT",
            RuleCode::FieldMissingName => "FIELD_MISSING_NAME",
            RuleCode::FieldMissingComponent => "FIELD_MISSING_COMPONENT",
            RuleCode::FieldMissingLabel => "FIELD_MISSING_LABEL",
            RuleCode::ColumnMissingKey => "COLUMN_MISSING_KEY",
            RuleCode::WidgetMissingKind => "WIDGET_MISSING_KIND",
            RuleCode::UnknownModule => "UNKNOWN_MODULE",
            RuleCode::ActionMissingLabel => "ACTION_MISSING_LABEL",
            RuleCode::HardActionMissingConfirmation => "HARD_ACTION_MISSING_CONFIRMATION",
            RuleCode::HighRiskMissingConfirmation => "HIGH_RISK_MISSING_CONFIRMATION",
            RuleCode::PreauthOnlyForSoft => "PREAUTH_ONLY_FOR_SOFT",
            RuleCode::InvalidConstraintPattern => "INVALID_CONSTRAINT_PATTERN",
            RuleCode::UnknownConstraintTarget => "UNKNOWN_CONSTRAINT_TARGET",
        }
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic produced by validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// The severity level
    pub level: DiagnosticLevel,

    /// Stable code of the violated rule
    pub code: RuleCode,

    /// Human-readable message
    pub message: String,

    /// Offending node, when the diagnostic is about one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<NodeId>,

    /// Structural location of the offending node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Optional suggestion for fixing the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn error(code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            code,
            message: message.into(),
            node_id: None,
            path: None,
            suggestion: None,
        }
    }

    pub fn warning(code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            code,
            message: message.into(),
            node_id: None,
            path: None,
            suggestion: None,
        }
    }

    /// Attach the offending node; an empty id is left out
    pub fn at(mut self, node_id: &str, location: &Location) -> Self {
        if !node_id.is_empty() {
            self.node_id = Some(node_id.to_string());
        }
        self.path = Some(location.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(path) = &self.path {
            write!(f, " (at {})", path)?;
        }
        Ok(())
    }
}
