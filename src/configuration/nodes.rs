use serde::Deserialize;
use serde_json::Value;

// Wire format of the incoming document. Nodes are read lazily, one at a time,
// so a bad value deeper in the document never hides an earlier violation.

/// Borrowed view of one JSON node. An absent child and a `null` child read the same.
#[derive(Debug, Clone, Copy)]
pub(super) struct Node<'a>(&'a Value);

impl<'a> Node<'a> {
    pub(super) fn new(value: &'a Value) -> Self {
        Self(value)
    }

    /// Child node under `key`; `None` when absent, `null`, or when this node
    /// is not an object.
    pub(super) fn child(&self, key: &str) -> Option<Node<'a>> {
        self.0.get(key).filter(|v| !v.is_null()).map(Node)
    }

    /// Elements of this node when it is a JSON array.
    pub(super) fn items(&self) -> Option<&'a [Value]> {
        self.0.as_array().map(Vec::as_slice)
    }

    /// String child under `key`. Wrong JSON types surface as `serde_json::Error`.
    pub(super) fn text(&self, key: &str) -> Result<Option<String>, serde_json::Error> {
        match self.child(key) {
            Some(node) => node.decode(),
            None => Ok(None),
        }
    }

    pub(super) fn decode<T: Deserialize<'a>>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(self.0)
    }
}

/// One `{ "name": ..., "value": ... }` entry of a host's parameter list.
#[derive(Debug, Deserialize)]
pub(super) struct ParameterNode {
    #[serde(default)]
    pub(super) name: Option<String>,

    #[serde(default)]
    pub(super) value: Option<String>,
}
