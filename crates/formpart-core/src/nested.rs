//! Nested value trees built from bracket-notation keys.
//!
//! Form submissions encode tree structure in flat key-value pairs using the
//! classic bracket syntax: `name` sets a leaf, `name[]` appends to a
//! sequence, `name[key]` sets a named child, with arbitrary nesting depth
//! (`a[b][]`). [`assemble`] folds an encoded pair sequence (the shape of a
//! query string) into one [`ValueMap`] tree.
//!
//! The tree is generic over its leaf type so form fields (`String` leaves)
//! and uploaded files share one structure and one assembler.
//!
//! # Example
//!
//! ```
//! use formpart_core::{Value, assemble};
//!
//! let tree = assemble("foo=1&bar%5B%5D=a&bar%5B%5D=b&opt%5Bx%5D=y");
//!
//! assert_eq!(tree.get("foo").and_then(Value::as_str), Some("1"));
//! let bar = tree.get("bar").and_then(Value::as_seq).unwrap();
//! assert_eq!(bar.len(), 2);
//! assert_eq!(
//!     tree.get("opt").and_then(|v| v.get("x")).and_then(Value::as_str),
//!     Some("y"),
//! );
//! ```

use serde::ser::{Serialize, Serializer};

use crate::encoding::percent_decode;

/// One node of a decoded form tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<T> {
    /// A terminal value.
    Leaf(T),
    /// An ordered sequence produced by `name[]` appends.
    Seq(Vec<Value<T>>),
    /// A nested mapping produced by `name[key]` children.
    Map(ValueMap<T>),
}

impl<T> Value<T> {
    /// Get the leaf value, if this node is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            Self::Leaf(value) => Some(value),
            _ => None,
        }
    }

    /// Get the sequence elements, if this node is a sequence.
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Value<T>]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Get the nested map, if this node is a map.
    #[must_use]
    pub fn as_map(&self) -> Option<&ValueMap<T>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Shorthand for looking up a named child of a map node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value<T>> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Map every leaf through `f`, dropping leaves for which `f` returns
    /// `None`. Containers are preserved.
    #[must_use]
    pub fn filter_map_leaves<U>(self, f: &mut impl FnMut(T) -> Option<U>) -> Option<Value<U>> {
        match self {
            Self::Leaf(value) => f(value).map(Value::Leaf),
            Self::Seq(items) => Some(Value::Seq(
                items
                    .into_iter()
                    .filter_map(|item| item.filter_map_leaves(f))
                    .collect(),
            )),
            Self::Map(map) => Some(Value::Map(map.filter_map(f))),
        }
    }
}

impl Value<String> {
    /// Get the leaf as `&str`, if this node is a string leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_leaf().map(String::as_str)
    }
}

/// An insertion-ordered string-keyed mapping of [`Value`] nodes.
///
/// Form trees preserve the order keys first appeared in, matching the
/// ordered associative arrays of classic form decoders. Lookups are linear;
/// form submissions are small.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueMap<T> {
    entries: Vec<(String, Value<T>)>,
}

impl<T> ValueMap<T> {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a child by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value<T>> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Look up a child mutably by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value<T>> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Returns true if the key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set a child, replacing any existing entry with the same key while
    /// keeping its position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value<T>) {
        let key = key.into();
        if let Some(slot) = self.get_mut(&key) {
            *slot = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value<T>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Map every leaf of the tree through `f`, dropping leaves for which `f`
    /// returns `None`. Entry order is preserved.
    #[must_use]
    pub fn filter_map_leaves<U>(self, mut f: impl FnMut(T) -> Option<U>) -> ValueMap<U> {
        self.filter_map(&mut f)
    }

    fn filter_map<U>(self, f: &mut impl FnMut(T) -> Option<U>) -> ValueMap<U> {
        ValueMap {
            entries: self
                .entries
                .into_iter()
                .filter_map(|(name, value)| Some((name, value.filter_map_leaves(f)?)))
                .collect(),
        }
    }

    /// Get the child for `key`, inserting `default()` first when absent.
    fn slot_mut(&mut self, key: &str, default: impl FnOnce() -> Value<T>) -> &mut Value<T> {
        let index = match self.entries.iter().position(|(name, _)| name == key) {
            Some(index) => index,
            None => {
                self.entries.push((key.to_string(), default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }
}

impl<T> Default for ValueMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(value) => value.serialize(serializer),
            Self::Seq(items) => serializer.collect_seq(items),
            Self::Map(map) => map.serialize(serializer),
        }
    }
}

impl<T: Serialize> Serialize for ValueMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// One parsed step of a bracket path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    /// `[key]`
    Key(&'a str),
    /// `[]`
    Append,
}

/// Split a decoded key into its root name and bracket path.
///
/// An unterminated `[` makes the whole key a plain name; characters after a
/// `]` that do not open a new group end the path.
fn parse_key(key: &str) -> (&str, Vec<Segment<'_>>) {
    let Some(open) = key.find('[') else {
        return (key, Vec::new());
    };

    let root = &key[..open];
    let mut segments = Vec::new();
    let mut rest = &key[open..];

    while let Some(tail) = rest.strip_prefix('[') {
        let Some(close) = tail.find(']') else {
            // Unterminated group: fall back to the literal key.
            return (key, Vec::new());
        };
        let inner = &tail[..close];
        segments.push(if inner.is_empty() {
            Segment::Append
        } else {
            Segment::Key(inner)
        });
        rest = &tail[close + 1..];
    }

    (root, segments)
}

/// A container placeholder matching the first step of `path`.
fn hole<T>(path: &[Segment<'_>]) -> Value<T> {
    match path.first() {
        Some(Segment::Append) => Value::Seq(Vec::new()),
        _ => Value::Map(ValueMap::new()),
    }
}

/// Write `leaf` at `path` below `node`, creating intermediate containers.
///
/// A node of the wrong kind is replaced by the container the path requires,
/// so repeated plain assignments overwrite and a later `name[]` wins over an
/// earlier scalar `name`.
fn place<T>(node: &mut Value<T>, path: &[Segment<'_>], leaf: T) {
    let Some((head, rest)) = path.split_first() else {
        *node = Value::Leaf(leaf);
        return;
    };

    match head {
        Segment::Append => {
            if !matches!(node, Value::Seq(_)) {
                *node = Value::Seq(Vec::new());
            }
            if let Value::Seq(items) = node {
                items.push(hole(rest));
                if let Some(last) = items.last_mut() {
                    place(last, rest, leaf);
                }
            }
        }
        Segment::Key(key) => {
            if !matches!(node, Value::Map(_)) {
                *node = Value::Map(ValueMap::new());
            }
            if let Value::Map(map) = node {
                place(map.slot_mut(key, || hole(rest)), rest, leaf);
            }
        }
    }
}

/// Fold an ordered sequence of encoded `key=value` pairs (joined with `&`,
/// the shape of a query string) into a nested tree.
///
/// Keys and values are percent-decoded before insertion; bracket groups in
/// the decoded key become structure. Pairs with an empty root name and empty
/// `&` segments are dropped. A pair without `=` gets an empty value.
#[must_use]
pub fn assemble(spec: &str) -> ValueMap<String> {
    let mut tree = ValueMap::new();

    for pair in spec.split('&').filter(|pair| !pair.is_empty()) {
        let (raw_key, raw_value) = match pair.split_once('=') {
            Some((key, value)) => (key, value),
            None => (pair, ""),
        };

        let key = String::from_utf8_lossy(&percent_decode(raw_key)).into_owned();
        let value = String::from_utf8_lossy(&percent_decode(raw_value)).into_owned();

        let (root, path) = parse_key(&key);
        if root.is_empty() {
            continue;
        }

        place(tree.slot_mut(root, || hole(&path)), &path, value);
    }

    tree
}
