use super::report::{DiffSummary, RunSummary};
use crate::validator::ValidationReport;
use itertools::Itertools;

/// Formats run results into human-readable text.
pub struct SummaryFormatter;

impl SummaryFormatter {
    /// The counters, one per line, values aligned.
    pub fn format_summary(summary: &RunSummary) -> String {
        let warnings = summary.warnings();
        let rows = [
            ("Branches processed", summary.branches_processed.to_string()),
            ("Nodes created", summary.nodes_created.to_string()),
            ("Nodes updated", summary.nodes_updated.to_string()),
            ("Strings translated", summary.strings_translated.to_string()),
            ("Warnings", warnings.len().to_string()),
        ];
        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

        let mut out = String::from("Summary\n");
        for (name, value) in &rows {
            out.push_str(&format!("  {:<width$} : {}\n", name, value, width = width));
        }
        for warning in warnings {
            out.push_str(&format!("  - {}\n", warning));
        }
        out
    }

    /// One line per branch: label, locale and what happened to it.
    pub fn format_branches(summary: &RunSummary) -> String {
        let width = summary
            .branches
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);

        summary
            .branches
            .iter()
            .map(|b| {
                let locale = b.locale.as_deref().unwrap_or("?");
                let status = if b.grafted() {
                    format!("{} nodes, {} strings", b.touched.len(), b.translations.len())
                } else {
                    "skipped".to_string()
                };
                let pad = width - b.label.chars().count();
                format!("  {}{} [{}] {}", b.label, " ".repeat(pad), locale, status)
            })
            .join("\n")
    }

    pub fn format_diff(diff: &DiffSummary) -> String {
        format!(
            "Nodes: {} total, {} added, {} removed\n  added: [{}]\n  removed: [{}]",
            diff.total_nodes,
            diff.added.len(),
            diff.removed.len(),
            diff.added.iter().join(", "),
            diff.removed.iter().join(", ")
        )
    }

    pub fn format_validation(report: &ValidationReport) -> String {
        if report.errors.is_empty() && report.warnings.is_empty() {
            return "Validation passed".to_string();
        }
        let mut out = String::new();
        for error in &report.errors {
            out.push_str(&format!("ERROR: {}\n", error));
        }
        for warning in &report.warnings {
            out.push_str(&format!("WARN:  {}\n", warning));
        }
        out.trim_end().to_string()
    }
}
