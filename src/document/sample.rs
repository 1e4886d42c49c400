//! A small but complete workflow used by the CLI self-test and the test suite.
use super::id::NodeId;
use super::model::{Condition, Document, Next, Node};
use super::nullable::Nullable;
use serde_json::{Map, json};

/// Builds the sample workflow.
///
/// ```text
/// 1 language ── English(1) ─> 2 welcome ─> 3 visitreason ─ Staff(1) ─> 4 agreement ─┐
///            │                                         └─ default ──> 5 photo ─────┴─> 6 thanks
///            ├─ Spanish(2) ─> 10 welcome (stale) ─> 11 thanks
///            └─ French(3)  ─> page default (2)
/// ```
pub fn sample_document() -> Document {
    let mut doc = Document::new();
    doc.starting_node_id = Nullable::Value(NodeId::from("1"));

    let mut language = Node::new("1", "choice");
    language.labels =
        json!({"title": "Choose language", "forward": "Continue", "back": "Back"}).into();
    language.configuration = Nullable::Value(json!({
        "data_name": "language",
        "reasons": [
            {"id": 1, "title": "English"},
            {"id": 2, "title": "Spanish"},
            {"id": 3, "title": "French"}
        ]
    }));
    language.next = Nullable::Value(Next {
        conditions: vec![
            Condition::new("reason_id", 1, Some(NodeId::from("2"))),
            Condition::new("reason_id", 2, Some(NodeId::from("10"))),
        ],
        default: Some(NodeId::from("2")),
        extra: Map::new(),
    });
    doc.insert(language);

    let mut welcome = Node::new("2", "welcome");
    welcome.crumb = Nullable::Value("English".to_string());
    welcome.labels = json!({"title": "Welcome {{visitor_name}}", "forward": "Next"}).into();
    welcome.configuration = Nullable::Value(json!({
        "fields": [
            {"label": "Company", "placeholder": "Enter company", "data_name": "company"}
        ]
    }));
    welcome.next = Nullable::Value(Next::to("3"));
    doc.insert(welcome);

    let mut reason = Node::new("3", "visitreason");
    reason.labels = json!({"title": "Why are you here?"}).into();
    reason.configuration = Nullable::Value(json!({
        "data_name": "visit_reason",
        "reasons": [
            {"id": 1, "title": "Staff"},
            {"id": 2, "title": "Visitor"}
        ]
    }));
    reason.next = Nullable::Value(Next {
        conditions: vec![Condition::new("reason_id", 1, Some(NodeId::from("4")))],
        default: Some(NodeId::from("5")),
        extra: Map::new(),
    });
    doc.insert(reason);

    let mut agreement = Node::new("4", "agreement");
    agreement.labels = json!({"title": "Sign the NDA", "message": "Please read carefully"}).into();
    agreement.next = Nullable::Value(Next::to("6"));
    doc.insert(agreement);

    let mut photo = Node::new("5", "photo");
    photo.labels = json!({"title": "Smile!", "help": "See https://example.com/privacy"}).into();
    photo.next = Nullable::Value(Next::to("6"));
    doc.insert(photo);

    let mut thanks = Node::new("6", "thanks");
    thanks.labels = json!({"title": "Thank you"}).into();
    doc.insert(thanks);

    let mut stale = Node::new("10", "welcome");
    stale.labels = json!({"title": "Bienvenido"}).into();
    stale.next = Nullable::Value(Next::to("11"));
    doc.insert(stale);

    let mut stale_thanks = Node::new("11", "thanks");
    stale_thanks.labels = json!({"title": "Gracias"}).into();
    doc.insert(stale_thanks);

    doc
}
