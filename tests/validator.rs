mod common;
use common::*;
use serde_json::Value;
use utsushi::graph::ShapeSignature;
use utsushi::validator::{EdgeKind, ValidationIssue, check_branch_shape, validate};
use utsushi::prelude::*;

#[cfg(test)]
mod validator_tests {
    use super::*;

    #[test]
    fn test_well_formed_document_is_valid() {
        let report = validate(&two_language_document(), &schema());
        assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_document_is_fatal() {
        let report = validate(&Document::new(), &schema());
        assert_eq!(report.errors, vec![ValidationIssue::EmptyDocument]);
    }

    #[test]
    fn test_dangling_reference_is_fatal() {
        let mut doc = two_language_document();
        doc.get_mut("10").expect("node 10").next =
            serde_json::from_value(default_to("77")).expect("next");

        let report = validate(&doc, &schema());

        assert!(!report.is_valid());
        assert!(report.errors.contains(&ValidationIssue::DanglingReference {
            node: NodeId::from("10"),
            edge: EdgeKind::Default,
            target: NodeId::from("77"),
        }));
    }

    #[test]
    fn test_missing_default_on_non_terminal_is_fatal() {
        let mut doc = two_language_document();
        doc.get_mut("20").expect("node 20").next = Nullable::Null;

        let report = validate(&doc, &schema());

        assert!(report.errors.iter().any(|e| matches!(
            e,
            ValidationIssue::MissingDefault { node, .. } if node.as_str() == "20"
        )));
    }

    #[test]
    fn test_terminal_without_default_is_fine() {
        let doc = doc_of(vec![page("1", "thanks", Value::Null)]);
        let report = validate(&doc, &schema());
        assert!(report.is_valid());
    }

    #[test]
    fn test_missing_starting_node_is_fatal() {
        let mut doc = two_language_document();
        doc.starting_node_id = Nullable::Value(NodeId::from("404"));

        let report = validate(&doc, &schema());
        assert!(report
            .errors
            .contains(&ValidationIssue::MissingStartingNode(NodeId::from("404"))));
    }

    #[test]
    fn test_key_id_mismatch_and_missing_choice_page_warn() {
        let mut doc = doc_of(vec![page("1", "thanks", Value::Null)]);
        doc.get_mut("1").expect("node 1").id = NodeId::from("2");

        let report = validate(&doc, &schema());

        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| matches!(w, ValidationIssue::KeyIdMismatch { .. })));
        assert!(report.warnings.iter().any(|w| matches!(w, ValidationIssue::ChoicePageMissing(_))));
    }

    #[test]
    fn test_branch_shape_check() {
        let doc = two_language_document();
        let template = ShapeSignature::compute(&doc, "10");

        let issue = check_branch_shape(&doc, "Spanish", "20", &template).expect("shapes differ");
        assert!(matches!(issue, ValidationIssue::ShapeMismatch { position: 0, .. }));
        assert!(!issue.is_fatal());

        assert_eq!(check_branch_shape(&doc, "English", "10", &template), None);
    }
}
