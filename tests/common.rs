//! Common test utilities for building workflow documents.
use serde_json::{Value, json};
use utsushi::prelude::*;

/// Builds a node from its id, template tag and a JSON `next` (use `Value::Null` for none).
#[allow(dead_code)]
pub fn page(id: &str, template: &str, next: Value) -> Node {
    let mut node = Node::new(id, template);
    node.next = serde_json::from_value(next).expect("valid next");
    node
}

/// A document from a list of nodes, in the given order.
#[allow(dead_code)]
pub fn doc_of(nodes: Vec<Node>) -> Document {
    let mut doc = Document::new();
    for node in nodes {
        doc.insert(node);
    }
    doc
}

#[allow(dead_code)]
pub fn default_to(target: &str) -> Value {
    json!({"conditions": [], "default": target})
}

/// A language page routing `English` to 10 and `Spanish` to 20.
///
/// Template branch: 10 welcome -> 11 thanks. Spanish branch: 20 (stale) -> 21 (stale).
#[allow(dead_code)]
pub fn two_language_document() -> Document {
    let json = json!({
        "starting_node_id": "1",
        "nodes": {
            "1": {
                "id": "1",
                "type": "page",
                "template_id": "choice",
                "labels": {"title": "Language"},
                "configuration": {
                    "data_name": "language",
                    "reasons": [
                        {"id": 1, "title": "English"},
                        {"id": 2, "title": "Spanish"}
                    ]
                },
                "next": {
                    "conditions": [
                        {"lval": "reason_id", "op": "==", "rval": 1, "result": "10"},
                        {"lval": "reason_id", "op": "==", "rval": 2, "result": "20"}
                    ],
                    "default": "10"
                }
            },
            "10": {
                "id": "10",
                "type": "page",
                "template_id": "welcome",
                "labels": {"title": "Welcome", "forward": "Next"},
                "next": {"conditions": [], "default": "11"}
            },
            "11": {
                "id": "11",
                "type": "page",
                "template_id": "thanks",
                "labels": {"title": "Thank you"},
                "next": null
            },
            "20": {
                "id": "20",
                "type": "page",
                "template_id": "photo",
                "labels": {"title": "Foto"},
                "next": {"conditions": [], "default": "21"}
            },
            "21": {
                "id": "21",
                "type": "page",
                "template_id": "thanks",
                "labels": {"title": "Gracias"},
                "next": null
            }
        }
    });
    serde_json::from_value(json).expect("valid document")
}

/// The default schema, shared by most tests.
#[allow(dead_code)]
pub fn schema() -> WorkflowSchema {
    WorkflowSchema::default()
}

/// Targets of a node's `next`, conditions first.
#[allow(dead_code)]
pub fn targets_of(doc: &Document, id: &str) -> Vec<String> {
    doc.get(id)
        .and_then(|n| n.next.as_ref())
        .map(|next| next.targets().map(|t| t.to_string()).collect())
        .unwrap_or_default()
}

#[allow(dead_code)]
pub fn crumb_of(doc: &Document, id: &str) -> Option<String> {
    doc.get(id)?.crumb.as_deref().map(String::from)
}

#[allow(dead_code)]
pub fn label_of(doc: &Document, id: &str, key: &str) -> Option<String> {
    doc.get(id)?
        .labels
        .as_ref()?
        .get(key)?
        .as_str()
        .map(String::from)
}
