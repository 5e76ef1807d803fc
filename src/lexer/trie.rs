//! Prefix tree mapping strings to values.
//!
//! Besides exact lookup, a [`Cursor`] can be walked one character at a time,
//! which is what the lexer uses for longest-match operator scanning.

use std::collections::HashMap;

#[derive(Debug, Clone)]
struct TrieNode<V> {
    children: HashMap<char, usize>,
    value: Option<V>,
}

impl<V> TrieNode<V> {
    fn new() -> Self {
        TrieNode {
            children: HashMap::new(),
            value: None,
        }
    }
}

/// Node 0 is the root; children are indices into `nodes`.
#[derive(Debug, Clone)]
pub struct Trie<V> {
    nodes: Vec<TrieNode<V>>,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Trie {
            nodes: vec![TrieNode::new()],
        }
    }

    /// Maps `key` to `value`, replacing any previous value for `key`.
    pub fn add(&mut self, key: &str, value: V) {
        let mut current = 0;
        for c in key.chars() {
            current = match self.nodes[current].children.get(&c) {
                Some(&child) => child,
                None => {
                    self.nodes.push(TrieNode::new());
                    let child = self.nodes.len() - 1;
                    self.nodes[current].children.insert(c, child);
                    child
                }
            };
        }
        self.nodes[current].value = Some(value);
    }

    /// Value stored for exactly `key`. Prefixes of stored keys are not found.
    pub fn find(&self, key: &str) -> Option<&V> {
        let mut cursor = self.head();
        for c in key.chars() {
            cursor.next(c);
        }
        cursor.value()
    }

    /// A cursor positioned at the root, before any character.
    pub fn head(&self) -> Cursor<'_, V> {
        Cursor {
            trie: self,
            node: Some(0),
        }
    }
}

impl<'k, V> FromIterator<(&'k str, V)> for Trie<V> {
    fn from_iter<T: IntoIterator<Item = (&'k str, V)>>(iter: T) -> Self {
        let mut trie = Trie::new();
        for (key, value) in iter {
            trie.add(key, value);
        }
        trie
    }
}

/// A position inside a [`Trie`] reached by feeding characters.
#[derive(Debug, Clone)]
pub struct Cursor<'a, V> {
    trie: &'a Trie<V>,
    node: Option<usize>,
}

impl<'a, V> Cursor<'a, V> {
    /// Steps along `c`. Once invalid, the cursor stays invalid.
    pub fn next(&mut self, c: char) {
        self.node = self
            .node
            .and_then(|node| self.trie.nodes[node].children.get(&c).copied());
    }

    /// Whether the characters fed so far are a prefix of some stored key.
    pub fn valid(&self) -> bool {
        self.node.is_some()
    }

    /// Whether the characters fed so far are exactly a stored key.
    pub fn terminal(&self) -> bool {
        self.value().is_some()
    }

    pub fn value(&self) -> Option<&'a V> {
        self.node
            .and_then(|node| self.trie.nodes[node].value.as_ref())
    }
}
