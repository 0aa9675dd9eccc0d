//! Trie-based sequence matcher for key sequence parsing.
//!
//! The parser asks the matcher whether the bytes buffered so far name a key,
//! could still grow into one, or can never match. That answer decides
//! whether to emit, keep waiting, or fall back to plain characters.

use crate::key::Key;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    key: Option<Key>,
    children: BTreeMap<u8, TrieNode>,
}

/// Result of matching a byte sequence against the trie
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// Found an exact match for the sequence
    Exact(Key),
    /// The sequence is a prefix of one or more longer sequences
    Prefix,
    /// No known sequence starts with these bytes
    NoMatch,
}

/// Result of finding the longest valid sequence from the start of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestMatchResult {
    /// The key that was matched
    pub key: Key,
    /// Number of bytes consumed from the input
    pub consumed_bytes: usize,
}

/// Trie of the VT100/xterm sequences a list prompt needs to recognise.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    root: TrieNode,
}

impl SequenceMatcher {
    /// Create a matcher loaded with the standard sequences
    pub fn new() -> Self {
        let mut matcher = Self {
            root: TrieNode::default(),
        };
        matcher.build_standard_sequences();
        matcher
    }

    /// Classify `bytes` as an exact match, a prefix, or no match.
    ///
    /// A node that names a key is reported as `Exact` even when longer
    /// sequences continue from it; the parser decides when to wait.
    pub fn match_sequence(&self, bytes: &[u8]) -> MatchResult {
        if bytes.is_empty() {
            return MatchResult::NoMatch;
        }

        match self.find_node(bytes) {
            Some(TrieNode { key: Some(key), .. }) => MatchResult::Exact(*key),
            Some(_) => MatchResult::Prefix,
            None => MatchResult::NoMatch,
        }
    }

    /// Find the longest valid sequence from the start of bytes
    pub fn find_longest_match(&self, bytes: &[u8]) -> Option<LongestMatchResult> {
        let mut longest_match = None;
        let mut current_node = &self.root;

        for (i, byte) in bytes.iter().enumerate() {
            let Some(child) = current_node.children.get(byte) else {
                break;
            };
            current_node = child;
            if let Some(key) = current_node.key {
                longest_match = Some(LongestMatchResult {
                    key,
                    consumed_bytes: i + 1,
                });
            }
        }

        longest_match
    }

    /// Register a sequence mapping
    pub fn insert(&mut self, bytes: &[u8], key: Key) {
        let mut current = &mut self.root;
        for &byte in bytes {
            current = current.children.entry(byte).or_default();
        }
        current.key = Some(key);
    }

    fn find_node(&self, bytes: &[u8]) -> Option<&TrieNode> {
        let mut current = &self.root;
        for byte in bytes {
            current = current.children.get(byte)?;
        }
        Some(current)
    }

    fn build_standard_sequences(&mut self) {
        // Single byte control characters
        self.insert(&[0x1b], Key::Escape);
        self.insert(&[0x01], Key::ControlA);
        self.insert(&[0x03], Key::ControlC);
        self.insert(&[0x04], Key::ControlD);
        self.insert(&[0x05], Key::ControlE);
        self.insert(&[0x08], Key::Backspace);
        self.insert(&[0x09], Key::Tab);
        self.insert(&[0x0a], Key::Enter);
        self.insert(&[0x0d], Key::Enter);
        self.insert(&[0x0e], Key::ControlN);
        self.insert(&[0x10], Key::ControlP);
        self.insert(&[0x15], Key::ControlU);
        self.insert(&[0x17], Key::ControlW);
        self.insert(&[0x7f], Key::Backspace);

        // Arrow keys, CSI and SS3 (application cursor mode) forms
        for (suffix, key) in [
            (b'A', Key::Up),
            (b'B', Key::Down),
            (b'C', Key::Right),
            (b'D', Key::Left),
            (b'H', Key::Home),
            (b'F', Key::End),
        ] {
            self.insert(&[0x1b, b'[', suffix], key);
            self.insert(&[0x1b, b'O', suffix], key);
        }

        self.insert(b"\x1b[Z", Key::BackTab);
        self.insert(b"\x1b[1~", Key::Home);
        self.insert(b"\x1b[2~", Key::Insert);
        self.insert(b"\x1b[3~", Key::Delete);
        self.insert(b"\x1b[4~", Key::End);
        self.insert(b"\x1b[5~", Key::PageUp);
        self.insert(b"\x1b[6~", Key::PageDown);
        self.insert(b"\x1b[7~", Key::Home);
        self.insert(b"\x1b[8~", Key::End);

        // Focus in/out reports carry no key
        self.insert(b"\x1b[I", Key::Ignore);
        self.insert(b"\x1b[O", Key::Ignore);
    }
}

impl Default for SequenceMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matches() {
        let matcher = SequenceMatcher::new();
        assert_eq!(matcher.match_sequence(&[0x03]), MatchResult::Exact(Key::ControlC));
        assert_eq!(matcher.match_sequence(&[0x7f]), MatchResult::Exact(Key::Backspace));
        assert_eq!(matcher.match_sequence(b"\x1b[A"), MatchResult::Exact(Key::Up));
        assert_eq!(matcher.match_sequence(b"\x1bOB"), MatchResult::Exact(Key::Down));
        assert_eq!(matcher.match_sequence(b"\x1b[3~"), MatchResult::Exact(Key::Delete));
    }

    #[test]
    fn test_prefixes() {
        let matcher = SequenceMatcher::new();
        assert_eq!(matcher.match_sequence(b"\x1b["), MatchResult::Prefix);
        assert_eq!(matcher.match_sequence(b"\x1bO"), MatchResult::Prefix);
        assert_eq!(matcher.match_sequence(b"\x1b[5"), MatchResult::Prefix);
    }

    #[test]
    fn test_no_match() {
        let matcher = SequenceMatcher::new();
        assert_eq!(matcher.match_sequence(b""), MatchResult::NoMatch);
        assert_eq!(matcher.match_sequence(b"a"), MatchResult::NoMatch);
        assert_eq!(matcher.match_sequence(b"\x1b[9"), MatchResult::NoMatch);
    }

    #[test]
    fn test_escape_is_exact_and_prefix() {
        let matcher = SequenceMatcher::new();
        assert_eq!(matcher.match_sequence(&[0x1b]), MatchResult::Exact(Key::Escape));

        let longest = matcher.find_longest_match(b"\x1b[Ax").unwrap();
        assert_eq!(longest.key, Key::Up);
        assert_eq!(longest.consumed_bytes, 3);

        let longest = matcher.find_longest_match(b"\x1b[").unwrap();
        assert_eq!(longest.key, Key::Escape);
        assert_eq!(longest.consumed_bytes, 1);
    }
}
