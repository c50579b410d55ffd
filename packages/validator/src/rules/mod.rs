mod accessibility;
mod action_contract;
mod constraints;
mod identity;
mod structure;

pub use accessibility::AccessibilityRule;
pub use action_contract::ActionContractRule;
pub use constraints::ConstraintsRule;
pub use identity::IdentityRule;
pub use structure::StructureRule;

use crate::diagnostic::Diagnostic;
use uidsl_model::{Document, Location, NodeView};

/// Trait for implementing validation rules
pub trait ValidationRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check the document as a whole (runs once)
    fn check_document(&self, _doc: &Document) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Check one node (runs for every node, the root included)
    fn check_node(&self, _node: NodeView<'_>, _location: &Location) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Registry of all available validation rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(IdentityRule),
                Box::new(StructureRule),
                Box::new(AccessibilityRule),
                Box::new(ActionContractRule),
                Box::new(ConstraintsRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn ValidationRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
