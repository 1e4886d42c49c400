mod common;
use common::*;
use serde_json::{Value, json};
use utsushi::document::Nullable;
use utsushi::error::GraftError;
use utsushi::router::ChoicePage;

#[test]
fn test_locate_reads_options_and_routes() {
    let doc = two_language_document();
    let page = ChoicePage::locate(&doc, &schema()).expect("choice page");

    assert_eq!(page.node_id.as_str(), "1");
    let labels: Vec<&str> = page.options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["English", "Spanish"]);
    assert_eq!(page.entry_for("Spanish").map(|id| id.as_str()), Some("20"));
    assert_eq!(
        page.template_entry("English").map(|id| id.to_string()).ok().as_deref(),
        Some("10")
    );
}

#[test]
fn test_unrouted_options_inherit_the_default() {
    let mut doc = two_language_document();
    let choice = doc.get_mut("1").expect("node 1");
    choice.configuration = Nullable::Value(json!({
        "data_name": "language",
        "reasons": [
            {"id": 1, "title": "English"},
            {"id": 2, "title": "Spanish"},
            {"id": 3, "label": "German"},
            {"title": "No id"},
            {"id": 2, "title": "Español"}
        ]
    }));

    let page = ChoicePage::locate(&doc, &schema()).expect("choice page");

    let labels: Vec<&str> = page.options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["English", "German", "Español"]);
    assert_eq!(page.entry_for("Español").map(|id| id.as_str()), Some("20"));
    assert_eq!(page.entry_for("German").map(|id| id.as_str()), Some("10"));
}

#[test]
fn test_template_entry_falls_back_to_page_default() {
    let mut doc = two_language_document();
    doc.get_mut("1").expect("node 1").next =
        serde_json::from_value(default_to("10")).expect("next");

    let page = ChoicePage::locate(&doc, &schema()).expect("choice page");
    assert_eq!(
        page.template_entry("English").ok().map(|id| id.to_string()).as_deref(),
        Some("10")
    );

    doc.get_mut("1").expect("node 1").next = Nullable::Null;
    let page = ChoicePage::locate(&doc, &schema()).expect("choice page");
    assert!(matches!(
        page.template_entry("English"),
        Err(GraftError::TemplateEntryNotFound { .. })
    ));
    assert!(matches!(
        page.template_entry("Dutch"),
        Err(GraftError::SourceLabelNotFound { .. })
    ));
}

#[test]
fn test_page_without_options_is_rejected() {
    let mut doc = doc_of(vec![page("1", "choice", Value::Null)]);
    doc.get_mut("1").expect("node 1").configuration =
        json!({"data_name": "language", "reasons": []}).into();

    let result = ChoicePage::locate(&doc, &schema());
    assert!(matches!(result, Err(GraftError::NoChoices { .. })));
}
