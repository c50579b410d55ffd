use crate::diagnostic::{Diagnostic, DiagnosticLevel, RuleCode};
use crate::rules::RuleRegistry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::ControlFlow;
use tracing::{debug, instrument};
use uidsl_model::visitor::walk_located;
use uidsl_model::Document;

/// Options for configuring validation
#[derive(Debug, Default)]
pub struct ValidateOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,

    /// Promote every warning to an error
    pub warnings_as_errors: bool,
}

/// Outcome of validating one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationReport {
    fn from_diagnostics(diagnostics: Vec<Diagnostic>, warnings_as_errors: bool) -> Self {
        let (mut errors, mut warnings): (Vec<_>, Vec<_>) =
            diagnostics.into_iter().partition(Diagnostic::is_error);
        if warnings_as_errors {
            for mut warning in warnings.drain(..) {
                warning.level = DiagnosticLevel::Error;
                errors.push(warning);
            }
        }
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn has_code(&self, code: RuleCode) -> bool {
        self.diagnostics().any(|d| d.code == code)
    }

    /// Errors first, then warnings
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(&self.warnings)
    }
}

/// Validate a document with the built-in rules
pub fn validate(doc: &Document) -> ValidationReport {
    validate_with(doc, ValidateOptions::default())
}

#[instrument(skip_all, fields(document = %doc.id, kind = %doc.kind()))]
pub fn validate_with(doc: &Document, options: ValidateOptions) -> ValidationReport {
    let registry = options.registry.unwrap_or_default();
    let mut diagnostics = Vec::new();

    for rule in registry.rules() {
        diagnostics.extend(rule.check_document(doc));
    }

    let _ = walk_located(doc, |location, node| {
        for rule in registry.rules() {
            diagnostics.extend(rule.check_node(node, location));
        }
        ControlFlow::Continue(())
    });

    let report = ValidationReport::from_diagnostics(diagnostics, options.warnings_as_errors);
    debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated document"
    );
    report
}

/// Validate raw JSON, reporting documents that do not deserialize
pub fn validate_value(value: Value, options: ValidateOptions) -> ValidationReport {
    match Document::from_value(value) {
        Ok(doc) => validate_with(&doc, options),
        Err(err) => ValidationReport::from_diagnostics(
            vec![Diagnostic::error(RuleCode::MalformedDocument, err.to_string())],
            false,
        ),
    }
}

/// Validate JSON text; a doubly-encoded document is accepted
pub fn validate_json(text: &str, options: ValidateOptions) -> ValidationReport {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => validate_value(value, options),
        Err(err) => ValidationReport::from_diagnostics(
            vec![Diagnostic::error(RuleCode::MalformedDocument, err.to_string())],
            false,
        ),
    }
}
