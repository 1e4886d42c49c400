use super::TextTransform;
use super::tokens::{
    is_only_tokens_or_whitespace, looks_like_url_or_html, protect_tokens, strip_mock_prefix,
};
use crate::config::WorkflowSchema;
use crate::document::{Node, NodeId};
use ahash::AHashSet;
use serde_json::{Map, Value};

/// Keys whose string values are shown to visitors.
pub const TRANSLATABLE_KEYS: &[&str] = &[
    "title",
    "message",
    "back",
    "forward",
    "label",
    "placeholder",
    "help",
    "description",
    "error",
    "errors",
    "validation_message",
    "subtitle",
    "hint",
];

/// Keys that hold identifiers; never rewritten at any depth.
pub const IDENTIFIER_KEYS: &[&str] = &["data_name", "name"];

/// One string that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedField {
    pub node: NodeId,
    /// Location inside the node, e.g. `labels.title` or `configuration.fields[0].label`.
    pub path: String,
    pub before: String,
    pub after: String,
}

/// Rewrites the user-visible text of nodes for one target locale.
pub struct FieldTranslator<'a> {
    transform: &'a dyn TextTransform,
    schema: &'a WorkflowSchema,
    locale: &'a str,
}

struct Pass<'n> {
    node: &'n NodeId,
    keys: AHashSet<&'static str>,
    changed: Vec<TranslatedField>,
}

impl<'a> FieldTranslator<'a> {
    pub fn new(
        transform: &'a dyn TextTransform,
        schema: &'a WorkflowSchema,
        locale: &'a str,
    ) -> Self {
        Self {
            transform,
            schema,
            locale,
        }
    }

    /// Translates a node in place and returns every string that actually changed.
    pub fn translate_node(&self, node: &mut Node) -> Vec<TranslatedField> {
        let node_id = node.id.clone();
        let auto_routing = self.schema.is_auto_routing(node.template());

        let mut config_keys: AHashSet<&'static str> = TRANSLATABLE_KEYS.iter().copied().collect();
        let mut label_keys = config_keys.clone();
        // Titles of auto-routing pages are admin-only; their loading text is not.
        if auto_routing {
            config_keys.remove("title");
            label_keys.remove("title");
            label_keys.insert("loading");
        }

        let mut pass = Pass {
            node: &node_id,
            keys: label_keys,
            changed: Vec::new(),
        };
        if let Some(Value::Object(labels)) = node.labels.as_mut() {
            for (key, value) in labels.iter_mut() {
                if !pass.keys.contains(key.as_str()) {
                    continue;
                }
                if let Value::String(text) = value {
                    let path = format!("labels.{}", key);
                    self.rewrite(&mut pass, text, path);
                }
            }
        }

        pass.keys = config_keys;
        if let Some(Value::Object(configuration)) = node.configuration.as_mut() {
            self.walk_object(&mut pass, configuration, "configuration", false);
        }

        pass.changed
    }

    fn walk_object(
        &self,
        pass: &mut Pass,
        object: &mut Map<String, Value>,
        path: &str,
        inherited: bool,
    ) {
        for (key, value) in object.iter_mut() {
            if IDENTIFIER_KEYS.contains(&key.as_str()) {
                continue;
            }
            let translatable = inherited || pass.keys.contains(key.as_str());
            let child_path = format!("{}.{}", path, key);
            match value {
                Value::String(text) if translatable => self.rewrite(pass, text, child_path),
                Value::Object(inner) => self.walk_object(pass, inner, &child_path, translatable),
                Value::Array(items) => self.walk_array(pass, items, &child_path, translatable),
                _ => {}
            }
        }
    }

    fn walk_array(&self, pass: &mut Pass, items: &mut [Value], path: &str, inherited: bool) {
        for (index, item) in items.iter_mut().enumerate() {
            let child_path = format!("{}[{}]", path, index);
            match item {
                Value::Object(inner) => self.walk_object(pass, inner, &child_path, inherited),
                Value::String(text) if inherited => self.rewrite(pass, text, child_path),
                _ => {}
            }
        }
    }

    fn rewrite(&self, pass: &mut Pass, text: &mut String, path: String) {
        if let Some(out) = self.translate_text(text) {
            if out != *text {
                let before = std::mem::replace(text, out);
                pass.changed.push(TranslatedField {
                    node: pass.node.clone(),
                    path,
                    before,
                    after: text.clone(),
                });
            }
        }
    }

    /// The translation of one string, or `None` when it should stay as it is.
    ///
    /// A failing transform leaves the text unchanged.
    pub fn translate_text(&self, text: &str) -> Option<String> {
        if text.is_empty() || looks_like_url_or_html(text) || is_only_tokens_or_whitespace(text) {
            return None;
        }
        let base = if self.transform.strips_mock_prefix() {
            strip_mock_prefix(text, self.locale)
        } else {
            text
        };
        let (sanitized, placeholders) = protect_tokens(base);
        match self.transform.transform(&sanitized, self.locale) {
            Ok(out) => Some(placeholders.restore(&out)),
            Err(e) => {
                tracing::warn!(
                    transform = self.transform.name(),
                    locale = self.locale,
                    error = %e,
                    "Translation failed; keeping original text"
                );
                None
            }
        }
    }
}
