use std::collections::BTreeMap;

use crate::path::SuffixConvention;

use super::SchemaField;

/// One node of the schema prefix tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    field: Option<SchemaField>,
    children: BTreeMap<String, SchemaNode>,
}

impl SchemaNode {
    /// Field declared at exactly this node, if any
    pub fn field(&self) -> Option<&SchemaField> {
        self.field.as_ref()
    }

    /// Child node by match key
    pub fn child(&self, key: &str) -> Option<&SchemaNode> {
        self.children.get(key)
    }

    /// Children in key order
    pub fn children(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True when the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Walk down a sequence of match keys
    pub fn descend<S: AsRef<str>>(&self, path: &[S]) -> Option<&SchemaNode> {
        path.iter()
            .try_fold(self, |node, segment| node.child(segment.as_ref()))
    }

    /// Insert a field at its path. On a duplicate, the rejected field is
    /// handed back together with the row of the field already there.
    pub(crate) fn insert(&mut self, field: SchemaField) -> Result<(), (usize, SchemaField)> {
        let mut node = self;
        for segment in &field.path {
            node = node.children.entry(segment.clone()).or_default();
        }
        if let Some(existing) = &node.field {
            return Err((existing.row, field));
        }
        node.field = Some(field);
        Ok(())
    }
}

/// Compiled, immutable schema: a prefix tree of fields keyed by path segment.
///
/// Built once by [`SchemaLoader`](super::SchemaLoader) and then shared
/// read-only; it is `Send + Sync`, so any number of validations may run over
/// the same tree concurrently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaTree {
    root: SchemaNode,
    convention: SuffixConvention,
    len: usize,
}

impl SchemaTree {
    pub(crate) fn new(root: SchemaNode, convention: SuffixConvention, len: usize) -> Self {
        Self {
            root,
            convention,
            len,
        }
    }

    /// Root node of the tree
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Suffix convention the tree was compiled with
    pub fn convention(&self) -> SuffixConvention {
        self.convention
    }

    /// Number of fields (leaves) in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a schema without fields
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Field at exactly `path`
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&SchemaField> {
        self.root.descend(path).and_then(SchemaNode::field)
    }

    /// Depth-first iterator over every field, children in key order
    pub fn fields(&self) -> Fields<'_> {
        Fields {
            stack: vec![&self.root],
        }
    }

    /// Ordered `raw path -> description` dictionary of the schema
    pub fn to_description_map(&self) -> BTreeMap<String, String> {
        self.fields()
            .map(|f| (f.raw_path.clone(), f.description.clone()))
            .collect()
    }

    /// The description dictionary as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_description_map())
    }
}

/// Depth-first iterator over the fields of a [`SchemaTree`]
pub struct Fields<'a> {
    stack: Vec<&'a SchemaNode>,
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a SchemaField;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.stack.extend(node.children.values().rev());
            if let Some(field) = &node.field {
                return Some(field);
            }
        }
        None
    }
}
