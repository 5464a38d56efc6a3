//! Prefix tree for exact, prefix and substring word lookup.
//!
//! Nodes live in a single arena and refer to their children by index, so the
//! tree has no back references and every traversal is iterative.

pub mod substring;

use std::collections::BTreeMap;

pub use substring::SubstringMatcher;

use crate::error::Result;

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct Node {
    children: BTreeMap<char, usize>,
    terminal: bool,
}

/// A set of non-empty words stored as a character tree.
///
/// # Examples
///
/// ```
/// use lexmatch::trie::Trie;
///
/// let trie: Trie = ["hell", "help", "bro"].into_iter().collect();
/// assert_eq!(trie.len(), 3);
/// assert!(trie.contains("help"));
/// assert!(!trie.contains("he"));
/// assert!(trie.contains_substring("brother"));
/// assert_eq!(trie.words().collect::<Vec<_>>(), vec!["bro", "hell", "help"]);
/// ```
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
    len: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Trie {
            nodes: vec![Node::default()],
            len: 0,
        }
    }

    /// Insert `word`, returning false if it was already present or is empty.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let mut index = ROOT;
        for c in word.chars() {
            index = match self.nodes[index].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[index].children.insert(c, child);
                    child
                }
            };
        }

        let node = &mut self.nodes[index];
        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.len += 1;
        true
    }

    fn find(&self, prefix: &str) -> Option<usize> {
        let mut index = ROOT;
        for c in prefix.chars() {
            index = *self.nodes[index].children.get(&c)?;
        }
        Some(index)
    }

    /// Whether `word` was inserted. The empty string is never contained.
    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty() && self.find(word).is_some_and(|index| self.nodes[index].terminal)
    }

    /// Whether some stored word begins with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return !self.is_empty();
        }
        self.find(prefix).is_some()
    }

    /// Whether any stored word occurs contiguously somewhere in `text`.
    ///
    /// Walks the tree from every start position, abandoning a walk as soon
    /// as the next character has no child.
    pub fn contains_substring(&self, text: &str) -> bool {
        let chars: Vec<char> = text.chars().collect();

        for start in 0..chars.len() {
            let mut index = ROOT;
            for c in &chars[start..] {
                match self.nodes[index].children.get(c) {
                    Some(&child) => index = child,
                    None => break,
                }
                if self.nodes[index].terminal {
                    return true;
                }
            }
        }

        false
    }

    /// Iterate over the stored words in ascending lexicographic order.
    pub fn words(&self) -> Words<'_> {
        Words::new(self, ROOT, String::new())
    }

    /// All stored words beginning with `prefix`, in lexicographic order.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        match self.find(prefix) {
            Some(index) => Words::new(self, index, prefix.to_string()).collect(),
            None => Vec::new(),
        }
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Build an Aho–Corasick automaton over the stored words.
    pub fn substring_matcher(&self) -> Result<SubstringMatcher> {
        SubstringMatcher::new(self.words())
    }
}

impl<S: AsRef<str>> Extend<S> for Trie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for Trie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

/// Lazy depth-first iterator over the words of a [`Trie`].
///
/// Children are visited in character order and a word is yielded before the
/// words it prefixes, which gives lexicographic order.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    trie: &'a Trie,
    stack: Vec<(usize, String)>,
}

impl<'a> Words<'a> {
    fn new(trie: &'a Trie, start: usize, prefix: String) -> Self {
        Words {
            trie,
            stack: vec![(start, prefix)],
        }
    }
}

impl Iterator for Words<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some((index, word)) = self.stack.pop() {
            let node = &self.trie.nodes[index];
            for (&c, &child) in node.children.iter().rev() {
                let mut next = String::with_capacity(word.len() + c.len_utf8());
                next.push_str(&word);
                next.push(c);
                self.stack.push((child, next));
            }
            if node.terminal {
                return Some(word);
            }
        }
        None
    }
}
