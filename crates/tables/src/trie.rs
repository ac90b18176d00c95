use std::collections::BTreeMap;

/// A node in the word trie used for longest-match command name recognition.
///
/// Edges are whole words, so `"permissions grant"` occupies two levels. A
/// node carries a command index when the words leading to it form a
/// registered name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTrieNode {
    /// Child nodes keyed by the next word. Sorted, so traversal order is
    /// deterministic.
    pub children: BTreeMap<String, NameTrieNode>,
    /// Index of the command whose name ends at this node.
    pub command: Option<usize>,
}

impl NameTrieNode {
    /// Insert a command name, given as its words, pointing at `index`.
    pub fn insert<'w>(&mut self, words: impl IntoIterator<Item = &'w str>, index: usize) {
        let mut node = self;
        for word in words {
            node = node.children.entry(word.to_string()).or_default();
        }
        node.command = Some(index);
    }

    /// Direct child for `word`.
    pub fn child(&self, word: &str) -> Option<&NameTrieNode> {
        self.children.get(word)
    }

    /// Walk `words` as far as the trie allows and return the deepest
    /// terminal seen as `(words consumed, command index)`.
    pub fn longest_match<'w>(
        &self,
        words: impl IntoIterator<Item = &'w str>,
    ) -> Option<(usize, usize)> {
        let mut node = self;
        let mut best = None;
        for (depth, word) in words.into_iter().enumerate() {
            match node.child(word) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(index) = node.command {
                best = Some((depth + 1, index));
            }
        }
        best
    }

    /// Command indices at or below this node, depth first: a node's own
    /// command comes before its children's.
    pub fn commands(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect(&self, out: &mut Vec<usize>) {
        out.extend(self.command);
        for child in self.children.values() {
            child.collect(out);
        }
    }
}
