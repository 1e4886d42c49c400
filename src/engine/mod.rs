//! Orchestrates a full mirroring run: locate, graft, label, translate, validate, persist.
mod formatter;
mod report;

pub use formatter::SummaryFormatter;
pub use report::{BranchReport, DiffSummary, RunReport, RunSummary};

use crate::config::{RunOptions, WorkflowSchema};
use crate::document::{Document, NodeId};
use crate::error::GraftError;
use crate::graft::{BranchGrafter, CrumbPropagator, GraftOutcome};
use crate::graph::ShapeSignature;
use crate::router::ChoicePage;
use crate::store::DocumentStore;
use crate::translate::{
    FieldTranslator, MockTranslator, TextTransform, resolve_locale, transform_by_name,
};
use crate::validator::{check_branch_shape, validate};
use ahash::AHashMap;

/// Mirrors the template branch onto every other selection branch of a document.
pub struct Engine {
    options: RunOptions,
    schema: WorkflowSchema,
    transform: Box<dyn TextTransform>,
}

pub struct EngineBuilder {
    options: RunOptions,
    schema: WorkflowSchema,
    transform: Box<dyn TextTransform>,
}

impl EngineBuilder {
    pub fn new(options: RunOptions) -> Self {
        Self {
            options,
            schema: WorkflowSchema::default(),
            transform: Box::new(MockTranslator),
        }
    }

    pub fn with_schema(mut self, schema: WorkflowSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_transform(mut self, transform: Box<dyn TextTransform>) -> Self {
        self.transform = transform;
        self
    }

    /// Selects a built-in transform; unknown names keep the current one.
    pub fn with_transform_by_name(mut self, name: &str) -> Self {
        match transform_by_name(name) {
            Some(transform) => self.transform = transform,
            None => tracing::warn!(name, kept = self.transform.name(), "Unknown text transform"),
        }
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            options: self.options,
            schema: self.schema,
            transform: self.transform,
        }
    }
}

impl Engine {
    pub fn builder(options: RunOptions) -> EngineBuilder {
        EngineBuilder::new(options)
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn schema(&self) -> &WorkflowSchema {
        &self.schema
    }

    pub fn transform_name(&self) -> &str {
        self.transform.name()
    }

    /// Rewrites `doc` in place. Branches are handled in the order the choice
    /// page lists its options. Problems confined to one branch become
    /// warnings; anything that makes the whole run meaningless is an error.
    pub fn run(&self, doc: &mut Document) -> Result<RunSummary, GraftError> {
        let page = ChoicePage::locate(doc, &self.schema)?;
        tracing::info!(
            page = %page.node_id,
            options = page.options.len(),
            "Choice page found"
        );

        let template_entry = page.template_entry(&self.options.source_label)?;
        if !doc.contains(template_entry.as_str()) {
            return Err(GraftError::NodeNotFound {
                node_id: template_entry,
                context: format!("the '{}' template branch", self.options.source_label),
            });
        }
        let template_shape = ShapeSignature::compute(doc, template_entry.as_str());
        tracing::info!(
            label = %self.options.source_label,
            entry = %template_entry,
            nodes = template_shape.len(),
            "Template branch resolved"
        );

        let grafter = BranchGrafter::new(&self.schema);
        let mut summary = RunSummary::default();
        let mut grafted_entries: AHashMap<NodeId, String> = AHashMap::new();

        for option in &page.options {
            if option.label == self.options.source_label {
                continue;
            }
            let mut branch = BranchReport::new(&option.label);

            let Some(locale) = resolve_locale(&option.label, &self.options.language_map) else {
                self.skip(&mut branch, format!(
                    "Could not infer a locale code for '{}', skipping",
                    option.label
                ));
                summary.branches.push(branch);
                continue;
            };
            branch.locale = Some(locale.clone());
            summary.branches_processed += 1;

            let entry = page
                .entry_for(&option.label)
                .filter(|entry| doc.contains(entry.as_str()))
                .cloned();
            let Some(entry) = entry else {
                self.skip(&mut branch, format!(
                    "Skipping '{}' because no existing start node is wired on the choice page",
                    option.label
                ));
                summary.branches.push(branch);
                continue;
            };
            branch.entry = Some(entry.clone());

            if let Some(owner) = grafted_entries.get(&entry) {
                self.skip(&mut branch, format!(
                    "Skipping '{}' because its start node {} was already mirrored for '{}'",
                    option.label, entry, owner
                ));
                summary.branches.push(branch);
                continue;
            }

            let outcome = match grafter.graft(doc, &template_entry, &entry) {
                Ok(outcome) => outcome,
                Err(GraftError::BranchOverlapsTemplate { entry }) => {
                    self.skip(&mut branch, format!(
                        "Skipping '{}' because its start node {} belongs to the template branch",
                        option.label, entry
                    ));
                    summary.branches.push(branch);
                    continue;
                }
                Err(e) => return Err(e),
            };
            grafted_entries.insert(entry.clone(), option.label.clone());

            self.finish_branch(doc, &mut branch, &outcome, &locale);
            let shape_issue =
                check_branch_shape(doc, &option.label, entry.as_str(), &template_shape);
            if let Some(issue) = shape_issue {
                tracing::warn!(label = %option.label, "{}", issue);
                branch.warnings.push(issue.to_string());
            }

            summary.nodes_created += outcome.created.len();
            summary.nodes_updated += 1;
            summary.strings_translated += branch.translations.len();
            tracing::info!(
                label = %option.label,
                locale = %locale,
                entry = %entry,
                created = outcome.created.len(),
                translated = branch.translations.len(),
                "Branch mirrored"
            );
            summary.branches.push(branch);
        }

        Ok(summary)
    }

    fn skip(&self, branch: &mut BranchReport, message: String) {
        tracing::warn!(label = %branch.label, "{}", message);
        branch.warnings.push(message);
    }

    fn finish_branch(
        &self,
        doc: &mut Document,
        branch: &mut BranchReport,
        outcome: &GraftOutcome,
        locale: &str,
    ) {
        let order: Vec<NodeId> = outcome.branch_nodes().cloned().collect();
        CrumbPropagator::new(&self.schema, &branch.label, outcome.branch_nodes())
            .propagate(doc, &outcome.entry, &order);

        let translator = FieldTranslator::new(self.transform.as_ref(), &self.schema, locale);
        for id in &order {
            if let Some(node) = doc.get_mut(id.as_str()) {
                branch.translations.extend(translator.translate_node(node));
            }
        }
        branch.touched = order;
    }

    /// Loads, rewrites, validates and (unless this is a dry run) saves a document.
    ///
    /// Nothing is saved when the run fails or validation reports a fatal issue.
    pub fn run_and_persist<S: DocumentStore>(
        &self,
        store: &mut S,
    ) -> Result<RunReport, GraftError> {
        let mut doc = store.load()?;
        let original = doc.clone();

        let summary = self.run(&mut doc)?;

        let validation = validate(&doc, &self.schema);
        for warning in &validation.warnings {
            tracing::warn!("{}", warning);
        }
        if !validation.is_valid() {
            for error in &validation.errors {
                tracing::error!("{}", error);
            }
            return Err(GraftError::ValidationFailed(validation.errors));
        }

        let diff = DiffSummary::between(&original, &doc);
        tracing::info!(
            total = diff.total_nodes,
            added = diff.added.len(),
            removed = diff.removed.len(),
            "Document diff"
        );

        let persisted = if self.options.dry_run {
            tracing::info!("Dry run; document not saved");
            false
        } else {
            store.save(&doc)?;
            true
        };

        Ok(RunReport {
            summary,
            validation,
            diff,
            persisted,
            document: doc,
        })
    }
}
