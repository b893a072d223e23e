//! Compiled license patterns
//!
//! A [`Pattern`] is one parsed license regular expression; a [`PatternSet`]
//! compiles a whole list of them into a single multi-pattern program and
//! dispatches scans through an index of leading two-word phrases: at each
//! input position the index decides in O(1) whether any pattern could start
//! there, and only then is the shared DFA run.
//!
//! DFAs are compiled on first use, exactly once even under concurrent first
//! calls, and are read-only afterwards; the containing set can be shared
//! freely across threads.

mod dfa;
mod program;
mod syntax;

pub use syntax::ParseError;

use std::collections::HashMap;

use once_cell::sync::OnceCell;

use crate::dict::{Dict, Word, WordId, ANY_WORD, BAD_WORD};

use dfa::{compile_dfa, dfa_match, Dfa};
use program::{compile_multi, Prog};
use syntax::{leading_phrases, Phrase, Syntax};

/// One compiled license regular expression.
#[derive(Debug)]
pub struct Pattern {
    file: String,
    syntax: Syntax,
    // Only built when the pattern is matched on its own; patterns that end
    // up in a PatternSet share the set's DFA instead.
    dfa: OnceCell<Dfa>,
}

impl Pattern {
    /// Parses LRE source in strict mode, interning pattern words into
    /// `dict`. `file` names the source in errors.
    pub fn parse(dict: &mut Dict, file: &str, src: &str) -> Result<Pattern, ParseError> {
        let syntax = syntax::parse(dict, file, src, true)?;
        Ok(Pattern {
            file: file.to_string(),
            syntax,
            dfa: OnceCell::new(),
        })
    }

    /// The file name passed to [`Pattern::parse`].
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Reports whether the pattern matches a prefix of `text`'s word
    /// sequence. `dict` must be the dictionary the pattern was parsed with.
    pub fn is_match(&self, dict: &Dict, text: &str) -> bool {
        let dfa = self
            .dfa
            .get_or_init(|| compile_dfa(&program::compile(Prog::new(), &self.syntax, 0)));
        let words = dict.split(text);
        let (m, _) = dfa_match(dfa, dict, text, &words);
        m >= 0
    }
}

/// A match found by [`PatternSet::match_text`], in word indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WordMatch {
    /// Index of the matched pattern.
    pub id: i32,
    /// First matched word.
    pub start: usize,
    /// One past the last matched word.
    pub end: usize,
}

/// The result of dispatching a text through a set: the word sequence and the
/// reconciled, disjoint matches in word order.
pub(crate) struct Matches {
    pub words: Vec<Word>,
    pub list: Vec<WordMatch>,
}

/// A set of patterns compiled into one shared automaton.
#[derive(Debug)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    prog: Prog,
    dfa: OnceCell<Dfa>,
    // Leading two-word phrase → patterns that can start with it.
    phrases: HashMap<Phrase, Vec<i32>>,
}

impl PatternSet {
    pub fn new(patterns: Vec<Pattern>) -> PatternSet {
        let syntaxes: Vec<&Syntax> = patterns.iter().map(|p| &p.syntax).collect();
        let prog = compile_multi(&syntaxes);
        let mut phrases: HashMap<Phrase, Vec<i32>> = HashMap::new();
        for (i, p) in patterns.iter().enumerate() {
            for phrase in leading_phrases(&p.syntax) {
                phrases.entry(phrase).or_default().push(i as i32);
            }
        }
        PatternSet {
            patterns,
            prog,
            dfa: OnceCell::new(),
            phrases,
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    fn dfa(&self) -> &Dfa {
        self.dfa.get_or_init(|| compile_dfa(&self.prog))
    }

    // Reports whether any pattern's leading phrase admits starting at a
    // position whose first two word ids are (w1, w2).
    fn has_candidates(&self, w1: WordId, w2: WordId) -> bool {
        if self.phrases.contains_key(&[w1, w2]) {
            return true;
        }
        // Wildcard leaders index under ANY_WORD; one-word patterns under
        // BAD_WORD in the second slot.
        self.phrases.contains_key(&[w1, ANY_WORD])
            || self.phrases.contains_key(&[w1, BAD_WORD])
            || self.phrases.contains_key(&[ANY_WORD, w2])
            || self.phrases.contains_key(&[ANY_WORD, ANY_WORD])
            || self.phrases.contains_key(&[ANY_WORD, BAD_WORD])
    }

    /// Splits `text` and returns the disjoint pattern matches over it.
    pub(crate) fn match_text(&self, dict: &Dict, text: &str) -> Matches {
        let words = dict.split(text);
        let list = self.match_words(dict, text, &words);
        Matches { words, list }
    }

    fn match_words(&self, dict: &Dict, text: &str, words: &[Word]) -> Vec<WordMatch> {
        if self.patterns.is_empty() {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for i in 0..words.len() {
            let w1 = words[i].id;
            let w2 = words.get(i + 1).map(|w| w.id).unwrap_or(BAD_WORD);
            if !self.has_candidates(w1, w2) {
                continue;
            }
            let (m, end) = dfa_match(self.dfa(), dict, text, &words[i..]);
            if m >= 0 && end > 0 {
                candidates.push(WordMatch {
                    id: m,
                    start: i,
                    end: i + end,
                });
            }
        }

        reconcile(candidates)
    }
}

// Resolves overlapping candidates into a disjoint list: a longer match beats
// any it overlaps; ties prefer the earlier start, then the smaller pattern
// id. The result is sorted by start.
fn reconcile(mut candidates: Vec<WordMatch>) -> Vec<WordMatch> {
    candidates.sort_by(|a, b| {
        (b.end - b.start)
            .cmp(&(a.end - a.start))
            .then(a.start.cmp(&b.start))
            .then(a.id.cmp(&b.id))
    });
    let mut kept: Vec<WordMatch> = Vec::new();
    for c in candidates {
        let overlaps = kept.iter().any(|k| c.start < k.end && k.start < c.end);
        if !overlaps {
            kept.push(c);
        }
    }
    kept.sort_by_key(|m| m.start);
    kept
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn set(dict: &mut Dict, sources: &[&str]) -> PatternSet {
        let patterns = sources
            .iter()
            .enumerate()
            .map(|(i, src)| {
                Pattern::parse(dict, &format!("p{i}.lre"), src).expect("parse pattern")
            })
            .collect();
        PatternSet::new(patterns)
    }

    fn spans(matches: &Matches) -> Vec<(i32, usize, usize)> {
        matches.list.iter().map(|m| (m.id, m.start, m.end)).collect()
    }

    #[test]
    fn test_single_pattern_match() {
        let mut d = Dict::new();
        let p = Pattern::parse(&mut d, "t.lre", "permission is hereby granted").unwrap();
        assert!(p.is_match(&d, "Permission is hereby granted, free of charge"));
        assert!(!p.is_match(&d, "permission is sometimes granted"));
    }

    #[test]
    fn test_set_dispatch_mid_text() {
        let mut d = Dict::new();
        let s = set(&mut d, &["a b c d", "x y z"]);
        let m = s.match_text(&d, "prose before a b c d prose x y z after");
        assert_eq!(spans(&m), vec![(0, 2, 6), (1, 7, 10)]);
    }

    #[test]
    fn test_overlap_prefers_longer() {
        let mut d = Dict::new();
        // Pattern 0 is a strict prefix of pattern 1.
        let s = set(&mut d, &["a b c", "a b c d e"]);
        let m = s.match_text(&d, "a b c d e");
        assert_eq!(spans(&m), vec![(1, 0, 5)]);
    }

    #[test]
    fn test_adjacent_matches_not_merged() {
        let mut d = Dict::new();
        let s = set(&mut d, &["a b c"]);
        let m = s.match_text(&d, "a b c a b c");
        assert_eq!(spans(&m), vec![(0, 0, 3), (0, 3, 6)]);
    }

    #[test]
    fn test_tie_prefers_smaller_id() {
        let mut d = Dict::new();
        let s = set(&mut d, &["a b c", "a b c"]);
        let m = s.match_text(&d, "a b c");
        assert_eq!(spans(&m), vec![(0, 0, 3)]);
    }

    #[test]
    fn test_wildcard_leader_dispatch() {
        let mut d = Dict::new();
        let s = set(&mut d, &["licensed __3__ apache"]);
        let m = s.match_text(&d, "this is licensed under the apache license");
        assert_eq!(spans(&m), vec![(0, 2, 6)]);
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let d = Dict::new();
        let s = PatternSet::new(Vec::new());
        assert!(s.is_empty());
        let m = s.match_text(&d, "anything at all");
        assert!(m.list.is_empty());
    }

    #[test]
    fn test_unknown_words_break_matches() {
        let mut d = Dict::new();
        let s = set(&mut d, &["a b c"]);
        let m = s.match_text(&d, "a b xyzzy c");
        assert!(m.list.is_empty());
    }
}
