//! # UI-DSL Validator
//!
//! Walks a document and reports structural errors and Action Contract
//! violations. Validation is pure and independent of patching: a failing
//! report is data, never an `Err`.
//!
//! ```rust,ignore
//! use uidsl_validator::validate;
//!
//! let report = validate(&doc);
//! for diagnostic in report.diagnostics() {
//!     println!("{}", diagnostic);
//! }
//! ```

mod diagnostic;
mod rules;
mod validator;

pub use diagnostic::{Diagnostic, DiagnosticLevel, RuleCode};
pub use rules::{
    AccessibilityRule, ActionContractRule, ConstraintsRule, IdentityRule, RuleRegistry,
    StructureRule, ValidationRule,
};
pub use validator::{validate, validate_json, validate_value, validate_with, ValidateOptions, ValidationReport};
