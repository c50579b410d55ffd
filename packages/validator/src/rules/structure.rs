use crate::diagnostic::{Diagnostic, RuleCode};
use crate::rules::ValidationRule;
use uidsl_model::{
    DecisionPattern, Document, DocumentBody, Location, ModuleKind, NodeView,
};

/// Shape checks that would otherwise break code generation
pub struct StructureRule;

impl ValidationRule for StructureRule {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn description(&self) -> &'static str {
        "Require non-empty primary containers and the fields renderers depend on"
    }

    fn check_document(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let root = Location::root();

        match &doc.body {
            DocumentBody::Form(form) => {
                if form.fields.is_empty() {
                    diagnostics.push(
                        Diagnostic::error(RuleCode::FormRequiresFields, "Form has no fields")
                            .at(&doc.id, &root),
                    );
                }
            }
            DocumentBody::Page(page) => {
                if page.sections.is_empty() && page.regions.is_empty() {
                    diagnostics.push(
                        Diagnostic::error(
                            RuleCode::PageRequiresSectionsOrRegions,
                            "Page has neither sections nor regions",
                        )
                        .at(&doc.id, &root),
                    );
                } else if !page.sections.is_empty() && !page.regions.is_empty() {
                    diagnostics.push(
                        Diagnostic::warning(
                            RuleCode::PageHasSectionsAndRegions,
                            "Page has both sections and regions; regions take precedence",
                        )
                        .at(&doc.id, &root)
                        .with_suggestion("Move section content into a region"),
                    );
                }
            }
            DocumentBody::Table(table) => {
                if table.columns.is_empty() {
                    diagnostics.push(
                        Diagnostic::error(RuleCode::TableRequiresColumns, "Table has no columns")
                            .at(&doc.id, &root),
                    );
                }
            }
            DocumentBody::Dashboard(dashboard) => {
                if dashboard.widgets.is_empty() {
                    diagnostics.push(
                        Diagnostic::error(RuleCode::DashboardRequiresWidgets, "Dashboard has no widgets")
                            .at(&doc.id, &root),
                    );
                }
            }
            DocumentBody::Decision(decision) => {
                if decision.options.is_empty() {
                    diagnostics.push(
                        Diagnostic::error(RuleCode::DecisionRequiresOptions, "Decision has no options")
                            .at(&doc.id, &root),
                    );
                }
                match decision.pattern {
                    None => diagnostics.push(
                        Diagnostic::warning(RuleCode::DecisionMissingPattern, "Decision has no pattern")
                            .at(&doc.id, &root)
                            .with_suggestion("Use one of compare-3, recommendation, tradeoffs, review-confirm"),
                    ),
                    Some(DecisionPattern::Compare3) if decision.options.len() != 3 => diagnostics.push(
                        Diagnostic::warning(
                            RuleCode::Compare3OptionCount,
                            format!(
                                "compare-3 expects exactly 3 options, found {}",
                                decision.options.len()
                            ),
                        )
                        .at(&doc.id, &root),
                    ),
                    Some(_) => {}
                }
            }
        }

        diagnostics
    }

    fn check_node(&self, node: NodeView<'_>, location: &Location) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        match node {
            NodeView::Field(field) => {
                if field.name.trim().is_empty() {
                    diagnostics.push(
                        Diagnostic::error(RuleCode::FieldMissingName, "Field has no name")
                            .at(&field.id, location),
                    );
                }
                if field.component.trim().is_empty() {
                    diagnostics.push(
                        Diagnostic::error(
                            RuleCode::FieldMissingComponent,
                            format!("Field '{}' has no component", field.name),
                        )
                        .at(&field.id, location)
                        .with_suggestion("Set a component such as input, select or textarea"),
                    );
                }
            }
            NodeView::Column(column) => {
                if column.key.trim().is_empty() {
                    diagnostics.push(
                        Diagnostic::error(RuleCode::ColumnMissingKey, "Column has no key")
                            .at(&column.id, location),
                    );
                }
            }
            NodeView::Widget(widget) => {
                if widget.kind.is_none() {
                    diagnostics.push(
                        Diagnostic::error(RuleCode::WidgetMissingKind, "Widget has no kind")
                            .at(&widget.id, location)
                            .with_suggestion("Use one of metric, chart, table"),
                    );
                }
            }
            NodeView::Section(section) => {
                if let Some(module) = &section.module {
                    if ModuleKind::parse(module).is_none() {
                        diagnostics.push(unknown_module(module, &section.id, location));
                    }
                }
            }
            NodeView::Module(module) => {
                if ModuleKind::parse(&module.module_type).is_none() {
                    diagnostics.push(unknown_module(&module.module_type, &module.id, location));
                }
            }
            _ => {}
        }

        diagnostics
    }
}

fn unknown_module(name: &str, node_id: &str, location: &Location) -> Diagnostic {
    let known: Vec<&str> = ModuleKind::ALL.iter().map(|kind| kind.as_str()).collect();
    Diagnostic::error(RuleCode::UnknownModule, format!("Unknown module '{}'", name))
        .at(node_id, location)
        .with_suggestion(format!("Use one of {}", known.join(", ")))
}
