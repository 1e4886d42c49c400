use super::id::{IdAllocator, NodeId};
use super::nullable::Nullable;
use crate::error::DocumentError;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The inner workflow graph: every node keyed by its id.
///
/// Node order is insertion order and survives a load/save round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub starting_node_id: Nullable<NodeId>,
    pub nodes: IndexMap<NodeId, Node>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single step of the visitor workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub crumb: Nullable<String>,
    /// Usually an object of display strings; anything else is carried as is.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub labels: Nullable<Value>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub configuration: Nullable<Value>,
    /// Missing or `null` both mean the node never continues; each is written back as read.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub next: Nullable<Next>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outgoing routing of a node: ordered conditions, then a fallback.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Next {
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub default: Option<NodeId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One routing rule, e.g. `reason_id == 2 -> "17"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub lval: Value,
    #[serde(default)]
    pub op: Value,
    #[serde(default)]
    pub rval: Value,
    #[serde(default)]
    pub result: Option<NodeId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads an integer out of a JSON number or a numeric string.
pub(crate) fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl Condition {
    pub fn new(lval: &str, rval: impl Into<Value>, result: Option<NodeId>) -> Self {
        Self {
            lval: Value::String(lval.to_string()),
            op: Value::String("==".to_string()),
            rval: rval.into(),
            result,
            extra: Map::new(),
        }
    }

    /// True when this condition compares the given field name.
    pub fn compares(&self, field: &str) -> bool {
        self.lval.as_str() == Some(field)
    }

    pub fn rval_as_i64(&self) -> Option<i64> {
        value_as_i64(&self.rval)
    }
}

impl Next {
    pub fn to(default: impl Into<NodeId>) -> Self {
        Self {
            conditions: Vec::new(),
            default: Some(default.into()),
            extra: Map::new(),
        }
    }

    /// Every non-null edge target, conditions first and then the default.
    pub fn targets(&self) -> impl Iterator<Item = &NodeId> {
        self.conditions
            .iter()
            .filter_map(|c| c.result.as_ref())
            .chain(self.default.as_ref())
    }

    /// Applies `remap` to every non-null edge target in place.
    pub fn remap_targets<F>(&mut self, mut remap: F)
    where
        F: FnMut(&NodeId) -> Option<NodeId>,
    {
        for condition in &mut self.conditions {
            if let Some(target) = condition.result.as_ref().and_then(&mut remap) {
                condition.result = Some(target);
            }
        }
        if let Some(target) = self.default.as_ref().and_then(&mut remap) {
            self.default = Some(target);
        }
    }
}

impl Node {
    pub fn new(id: impl Into<NodeId>, template_id: &str) -> Self {
        Self {
            id: id.into(),
            node_type: Some("page".to_string()),
            template_id: Some(template_id.to_string()),
            crumb: Nullable::Absent,
            labels: Nullable::Absent,
            configuration: Nullable::Absent,
            next: Nullable::Null,
            extra: Map::new(),
        }
    }

    pub fn template(&self) -> &str {
        self.template_id.as_deref().unwrap_or("")
    }

    pub fn has_template(&self, tag: &str) -> bool {
        self.template_id.as_deref() == Some(tag)
    }

    pub fn default_target(&self) -> Option<&NodeId> {
        self.next.as_ref().and_then(|n| n.default.as_ref())
    }

    /// A top-level key of `configuration`, if the configuration is an object.
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.configuration.as_ref().and_then(|c| c.get(key))
    }

    /// The `configuration.reasons` list as `(id, title)` pairs.
    ///
    /// Entries without an integer id or a non-empty title (or `label`) are skipped.
    pub fn reasons(&self) -> Vec<(i64, String)> {
        let Some(Value::Array(reasons)) = self.config_value("reasons") else {
            return Vec::new();
        };
        reasons
            .iter()
            .filter_map(|reason| {
                let id = value_as_i64(reason.get("id")?)?;
                let title = reason
                    .get("title")
                    .and_then(Value::as_str)
                    .or_else(|| reason.get("label").and_then(Value::as_str))?
                    .trim();
                (!title.is_empty()).then(|| (id, title.to_string()))
            })
            .collect()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            starting_node_id: Nullable::Absent,
            nodes: IndexMap::new(),
            extra: Map::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(|e| DocumentError::JsonParseError(e.to_string()))
    }

    /// Compact JSON, the form the API stores inside a workflow body.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string(self).map_err(|e| DocumentError::SerializeError(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::SerializeError(e.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Inserts a node under its own id, replacing any node with that id.
    pub fn insert(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id.clone(), node)
    }

    /// Removes a node while keeping the order of the remaining ones.
    pub fn remove(&mut self, id: &str) -> Option<Node> {
        self.nodes.shift_remove(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Largest numeric node key, `0` when no key is numeric.
    pub fn max_numeric_id(&self) -> u64 {
        self.nodes
            .keys()
            .filter_map(NodeId::numeric)
            .max()
            .unwrap_or(0)
    }

    /// An allocator whose first id is one past the current maximum.
    ///
    /// A numeric key beyond the `u64` range leaves no id above it, so the
    /// allocator starts out exhausted.
    pub fn id_allocator(&self) -> IdAllocator {
        if self.nodes.keys().any(NodeId::is_oversized_numeric) {
            return IdAllocator::exhausted();
        }
        IdAllocator::starting_after(self.max_numeric_id())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
