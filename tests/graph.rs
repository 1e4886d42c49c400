//! Tests for walking, fingerprinting and cloning branches.
mod common;
use common::*;
use serde_json::{Value, json};
use utsushi::document::NodeId;
use utsushi::error::GraftError;
use utsushi::graph::{ShapeSignature, clone_subgraph, walk};

#[cfg(test)]
mod walker_tests {
    use super::*;

    #[test]
    fn test_walk_visits_conditions_before_default() {
        let doc = doc_of(vec![
            page(
                "1",
                "visitreason",
                json!({
                    "conditions": [
                        {"lval": "reason_id", "op": "==", "rval": 1, "result": "2"},
                        {"lval": "reason_id", "op": "==", "rval": 2, "result": "3"}
                    ],
                    "default": "4"
                }),
            ),
            page("2", "agreement", default_to("5")),
            page("3", "photo", default_to("5")),
            page("4", "welcome", default_to("5")),
            page("5", "thanks", Value::Null),
        ]);

        let walked = walk(&doc, "1");
        let order: Vec<&str> = walked.order.iter().map(|id| id.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "5", "3", "4"]);
    }

    #[test]
    fn test_walk_terminates_on_cycles() {
        let doc = doc_of(vec![
            page("1", "welcome", default_to("2")),
            page("2", "photo", default_to("1")),
            page("3", "loop", default_to("3")),
        ]);

        assert_eq!(walk(&doc, "1").len(), 2);
        assert_eq!(walk(&doc, "3").len(), 1);
    }

    #[test]
    fn test_walk_skips_missing_targets() {
        let doc = doc_of(vec![
            page("1", "welcome", default_to("404")),
        ]);

        let walked = walk(&doc, "1");
        assert_eq!(walked.len(), 1);
        assert!(!walked.contains("404"));
    }

    #[test]
    fn test_walk_from_missing_start_is_empty() {
        let doc = doc_of(vec![page("1", "thanks", Value::Null)]);
        assert!(walk(&doc, "9").is_empty());
    }
}

#[cfg(test)]
mod signature_tests {
    use super::*;

    #[test]
    fn test_identical_shapes_have_equal_signatures() {
        let doc = doc_of(vec![
            page("1", "welcome", default_to("2")),
            page("2", "thanks", Value::Null),
            page("5", "welcome", default_to("6")),
            page("6", "thanks", Value::Null),
        ]);

        let a = ShapeSignature::compute(&doc, "1");
        let b = ShapeSignature::compute(&doc, "5");
        assert_eq!(a, b);
        assert_eq!(a.first_divergence(&b), None);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_signature_detects_template_and_arity_differences() {
        let doc = doc_of(vec![
            page("1", "welcome", default_to("2")),
            page("2", "thanks", Value::Null),
            page("5", "welcome", Value::Null),
            page("7", "photo", default_to("8")),
            page("8", "thanks", Value::Null),
        ]);

        let template = ShapeSignature::compute(&doc, "1");
        let truncated = ShapeSignature::compute(&doc, "5");
        let retagged = ShapeSignature::compute(&doc, "7");

        assert_eq!(template.first_divergence(&truncated), Some(0));
        assert_eq!(template.first_divergence(&retagged), Some(0));
        assert_ne!(template, truncated);
    }

    #[test]
    fn test_signature_display_lists_steps() {
        let doc = doc_of(vec![
            page("1", "welcome", default_to("2")),
            page("2", "thanks", Value::Null),
        ]);

        let rendered = ShapeSignature::compute(&doc, "1").to_string();
        assert!(rendered.contains("welcome"));
        assert!(rendered.contains("thanks"));
    }
}

#[cfg(test)]
mod cloner_tests {
    use super::*;

    #[test]
    fn test_clone_allocates_ids_past_the_maximum() {
        let mut doc = doc_of(vec![
            page("1", "welcome", default_to("2")),
            page("2", "thanks", Value::Null),
            page("40", "photo", Value::Null),
        ]);

        let clone = clone_subgraph(&mut doc, "1").expect("clone succeeds");

        assert_eq!(clone.start.as_str(), "41");
        assert_eq!(clone.mapping.get("1").map(|id| id.as_str()), Some("41"));
        assert_eq!(clone.mapping.get("2").map(|id| id.as_str()), Some("42"));
        assert_eq!(targets_of(&doc, "41"), vec!["42"]);
        assert!(doc.get("42").is_some_and(|n| n.next.is_none()));
    }

    #[test]
    fn test_clone_never_mutates_existing_nodes() {
        let mut doc = two_language_document();
        let before = doc.clone();

        clone_subgraph(&mut doc, "10").expect("clone succeeds");

        for (id, node) in &before.nodes {
            assert_eq!(doc.get(id.as_str()), Some(node), "node {} changed", id);
        }
        assert_eq!(doc.len(), before.len() + 2);
    }

    #[test]
    fn test_removing_the_clone_restores_the_document() {
        let mut doc = two_language_document();
        let before = doc.to_json().expect("serialize");

        let clone = clone_subgraph(&mut doc, "10").expect("clone succeeds");
        for new_id in clone.mapping.values() {
            doc.remove(new_id.as_str());
        }

        assert_eq!(doc.to_json().expect("serialize"), before);
    }

    #[test]
    fn test_clone_remaps_internal_edges_only() {
        let mut doc = doc_of(vec![
            page("1", "welcome", default_to("2")),
            page("2", "photo", default_to("3")),
            page("3", "agreement", default_to("404")),
        ]);

        let clone = clone_subgraph(&mut doc, "2").expect("clone succeeds");
        assert_eq!(clone.mapping.len(), 2);
        assert_eq!(targets_of(&doc, clone.start.as_str()), vec!["5"]);
        // Unresolvable targets are not part of the clone and stay as they were.
        assert_eq!(targets_of(&doc, "5"), vec!["404"]);
    }

    #[test]
    fn test_clone_self_loop_creates_one_node() {
        let mut doc = doc_of(vec![page("1", "welcome", default_to("1"))]);

        let clone = clone_subgraph(&mut doc, "1").expect("clone succeeds");

        assert_eq!(clone.mapping.len(), 1);
        assert_eq!(doc.len(), 2);
        assert_eq!(targets_of(&doc, "2"), vec!["2"]);
    }

    #[test]
    fn test_clone_uses_the_top_of_the_id_range() {
        let top = u64::MAX.to_string();
        let below = (u64::MAX - 2).to_string();
        let mut doc = doc_of(vec![
            page("1", "welcome", default_to("2")),
            page("2", "thanks", Value::Null),
            page(&below, "thanks", Value::Null),
        ]);

        let clone = clone_subgraph(&mut doc, "1").expect("two ids are still free");

        assert_eq!(clone.start, NodeId::from(u64::MAX - 1));
        assert_eq!(clone.mapping.get("2"), Some(&NodeId::from(top.as_str())));
        assert_eq!(targets_of(&doc, &(u64::MAX - 1).to_string()), vec![top]);
    }

    #[test]
    fn test_clone_fails_when_ids_run_out() {
        let mut doc = doc_of(vec![
            page("1", "welcome", default_to("2")),
            page("2", "thanks", Value::Null),
            page(&u64::MAX.to_string(), "thanks", Value::Null),
        ]);
        let before = doc.clone();

        let result = clone_subgraph(&mut doc, "1");

        assert!(matches!(result, Err(GraftError::IdSpaceExhausted)));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_clone_fails_midway_without_partial_inserts() {
        let mut doc = doc_of(vec![
            page("1", "welcome", default_to("2")),
            page("2", "thanks", Value::Null),
            page(&(u64::MAX - 1).to_string(), "thanks", Value::Null),
        ]);
        let before = doc.clone();

        let result = clone_subgraph(&mut doc, "1");

        assert!(matches!(result, Err(GraftError::IdSpaceExhausted)));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_numeric_key_beyond_u64_leaves_no_free_id() {
        let mut doc = doc_of(vec![
            page("1", "welcome", Value::Null),
            page("18446744073709551616", "thanks", Value::Null),
        ]);

        let result = clone_subgraph(&mut doc, "1");

        assert!(matches!(result, Err(GraftError::IdSpaceExhausted)));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_clone_of_missing_start_fails() {
        let mut doc = doc_of(vec![page("1", "thanks", Value::Null)]);
        assert!(clone_subgraph(&mut doc, "9").is_err());
        assert_eq!(doc.len(), 1);
    }
}
