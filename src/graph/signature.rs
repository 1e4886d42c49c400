use super::walker::walk;
use crate::document::Document;
use itertools::{EitherOrBoth, Itertools};
use std::fmt;

/// Structural fingerprint of a branch, in walk order.
///
/// Two branches are isomorphic when both sequences are element-wise equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeSignature {
    /// `template_id` of each visited node.
    pub templates: Vec<Option<String>>,
    /// `(number of conditions, has a default)` of each visited node.
    pub arities: Vec<(usize, bool)>,
}

impl ShapeSignature {
    pub fn compute(doc: &Document, start: &str) -> Self {
        let walk = walk(doc, start);
        let (templates, arities) = walk
            .order
            .iter()
            .filter_map(|id| doc.get(id.as_str()))
            .map(|node| {
                let arity = node.next.as_ref().map_or((0, false), |next| {
                    (next.conditions.len(), next.default.is_some())
                });
                (node.template_id.clone(), arity)
            })
            .unzip();
        Self { templates, arities }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Position of the first node where the two shapes differ, if any.
    pub fn first_divergence(&self, other: &ShapeSignature) -> Option<usize> {
        self.templates
            .iter()
            .zip(&self.arities)
            .zip_longest(other.templates.iter().zip(&other.arities))
            .position(|pair| match pair {
                EitherOrBoth::Both(a, b) => a != b,
                _ => true,
            })
    }
}

impl fmt::Display for ShapeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps = self
            .templates
            .iter()
            .zip(&self.arities)
            .map(|(template, (conditions, has_default))| {
                format!(
                    "{}[{}{}]",
                    template.as_deref().unwrap_or("?"),
                    conditions,
                    if *has_default { "+d" } else { "" }
                )
            })
            .join(" -> ");
        f.write_str(&steps)
    }
}
