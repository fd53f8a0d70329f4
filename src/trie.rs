//! A prefix trie for looking up full resource names from partial ones, such as
//! resolving an entity's sprite name from the start of its path.

use std::collections::HashMap;

/// A single node in the trie. Nodes are only ever created by insertion and are
/// destroyed together when the trie is dropped.
#[derive(Default)]
struct TrieNode {
    /// Child nodes, one per next character.
    children: HashMap<char, TrieNode>,

    /// Every full string that passes through this node. Never contains
    /// duplicates; sorted lexicographically if the trie is in sorted mode.
    entries: Vec<String>,

    /// Whether an inserted string ends exactly at this node.
    terminal: bool,
}

impl TrieNode {
    /// Records `entry` at this node if it isn't recorded already.
    fn record(&mut self, entry: &str, sorted: bool) {
        if sorted {
            // The list is always sorted, so a binary search both checks
            // membership and finds the insertion point.
            if let Err(position) = self.entries.binary_search_by(|e| e.as_str().cmp(entry)) {
                self.entries.insert(position, entry.to_string());
            }
        } else if !self.entries.iter().any(|e| e == entry) {
            self.entries.push(entry.to_string());
        }
    }
}

/// A multi-value prefix index over strings.
///
/// Every inserted string is recorded at each of its prefix nodes, so `search`
/// can return all matches for a prefix after walking only the prefix itself.
pub struct PrefixTrie {
    root: TrieNode,
    sorted: bool,
}

impl PrefixTrie {
    /// Creates a trie that keeps each node's entries in insertion order.
    pub fn new() -> PrefixTrie {
        PrefixTrie {
            root: TrieNode::default(),
            sorted: false,
        }
    }

    /// Creates a trie that keeps each node's entries lexicographically sorted.
    pub fn new_sorted() -> PrefixTrie {
        PrefixTrie {
            root: TrieNode::default(),
            sorted: true,
        }
    }

    /// Inserts `entry`, recording it at every prefix node from the root (the
    /// empty prefix) down to the node for the full string, which is marked as
    /// end-of-word. Inserting the same string twice changes nothing.
    pub fn insert(&mut self, entry: &str) {
        let sorted = self.sorted;

        let mut node = &mut self.root;
        node.record(entry, sorted);

        for character in entry.chars() {
            node = node.children.entry(character).or_default();
            node.record(entry, sorted);
        }

        node.terminal = true;
    }

    /// Walks to the node for `prefix`, if every character of it has been seen.
    fn find(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;

        for character in prefix.chars() {
            node = node.children.get(&character)?;
        }

        Some(node)
    }

    /// Returns a copy of every inserted string starting with `prefix`. A
    /// prefix that matches nothing yields an empty vector, not an error.
    pub fn search(&self, prefix: &str) -> Vec<String> {
        self.find(prefix)
            .map(|node| node.entries.clone())
            .unwrap_or_default()
    }

    /// Returns a string that was inserted ending exactly at `prefix`, or
    /// `None` if no inserted string ends there.
    ///
    /// The value returned is the first entry recorded at that node, which is
    /// not necessarily `prefix` itself: callers that need the canonical form
    /// back must insert the canonical form first.
    pub fn exact_match(&self, prefix: &str) -> Option<&str> {
        let node = self.find(prefix)?;

        if node.terminal {
            node.entries.first().map(String::as_str)
        } else {
            None
        }
    }
}

impl Default for PrefixTrie {
    fn default() -> PrefixTrie {
        PrefixTrie::new()
    }
}
