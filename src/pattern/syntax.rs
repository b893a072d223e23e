//! LRE syntax: lexer, parser, canonical printer, leading phrases
//!
//! The pattern language is word-based; its only operators are `((`, `))`,
//! `))??`, `||`, `__N__`, and `//** … **//` comments. Everything else runs
//! through the same normalization as scanned text (minus list-marker
//! elision), so a pattern and the text it matches tokenize identically.
//!
//! Strict mode adds layout rules that keep operators visible inside large
//! license texts: `((` must begin a line, `))` must end one, `||` may appear
//! only inside a group, and `??` only immediately after `))`. Relaxed mode
//! (used for small sub-expressions and tests) drops the layout rules and
//! lets `??` bind to the preceding atom.

use thiserror::Error;

use crate::dict::{Dict, WordId, ANY_WORD, BAD_WORD};

/// A syntax error in an LRE source, with its position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{file}:{line}:{column}: {message}")]
pub struct ParseError {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// One node of a parsed pattern. Adjacent bare words coalesce into a single
/// `Words` run; plain `(( ))` groups dissolve into their contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Syntax {
    Empty,
    Words(Vec<WordId>),
    Concat(Vec<Syntax>),
    Alternate(Vec<Syntax>),
    Quest(Box<Syntax>),
    Wild(i32),
}

// ─── Lexing ─────────────────────────────────────────────────────────

#[derive(Debug)]
enum Tok {
    Words(Vec<WordId>),
    Wild(i32),
    GroupOpen,
    GroupClose { quest: bool },
    AltBar,
    Quest,
}

struct Token {
    tok: Tok,
    // Byte range of the operator in the source, for layout checks and errors.
    lo: usize,
    hi: usize,
}

fn line_col(src: &str, pos: usize) -> (usize, usize) {
    let line = 1 + src[..pos].bytes().filter(|&b| b == b'\n').count();
    let col = pos - src[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0) + 1;
    (line, col)
}

fn err(file: &str, src: &str, pos: usize, message: &str) -> ParseError {
    let (line, column) = line_col(src, pos);
    ParseError {
        file: file.to_string(),
        line,
        column,
        message: message.to_string(),
    }
}

/// Tries to read `__N__` at the start of `s`; returns `(N, len)` on success.
fn wild_at(s: &str) -> Option<(i64, usize)> {
    let rest = s.strip_prefix("__")?;
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || !rest[digits..].starts_with("__") {
        return None;
    }
    let n: i64 = rest[..digits].parse().ok()?;
    Some((n, 2 + digits + 2))
}

fn lex(dict: &mut Dict, file: &str, src: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chunk_start: Option<usize> = None;
    let mut pos = 0;

    macro_rules! flush {
        () => {
            if let Some(lo) = chunk_start.take() {
                let words = dict.insert_split_pattern(&src[lo..pos]);
                if !words.is_empty() {
                    let ids = words.iter().map(|w| w.id).collect();
                    tokens.push(Token {
                        tok: Tok::Words(ids),
                        lo,
                        hi: pos,
                    });
                }
            }
        };
    }

    while pos < src.len() {
        let rest = &src[pos..];
        if rest.starts_with("//**") {
            flush!();
            match rest.find("**//") {
                Some(end) => pos += end + 4,
                None => return Err(err(file, src, pos, "unterminated //** comment")),
            }
        } else if rest.starts_with("((") {
            flush!();
            tokens.push(Token {
                tok: Tok::GroupOpen,
                lo: pos,
                hi: pos + 2,
            });
            pos += 2;
        } else if rest.starts_with("))") {
            flush!();
            let lo = pos;
            pos += 2;
            // `??` may trail the `))` on the same line, separated by blanks.
            let mut probe = pos;
            while src[probe..].starts_with(' ') || src[probe..].starts_with('\t') {
                probe += 1;
            }
            let quest = src[probe..].starts_with("??");
            if quest {
                pos = probe + 2;
            }
            tokens.push(Token {
                tok: Tok::GroupClose { quest },
                lo,
                hi: pos,
            });
        } else if rest.starts_with("||") {
            flush!();
            tokens.push(Token {
                tok: Tok::AltBar,
                lo: pos,
                hi: pos + 2,
            });
            pos += 2;
        } else if rest.starts_with("??") {
            flush!();
            tokens.push(Token {
                tok: Tok::Quest,
                lo: pos,
                hi: pos + 2,
            });
            pos += 2;
        } else if let Some((n, len)) = wild_at(rest) {
            flush!();
            if n <= 0 || n > i32::MAX as i64 {
                return Err(err(file, src, pos, "invalid wildcard count"));
            }
            tokens.push(Token {
                tok: Tok::Wild(n as i32),
                lo: pos,
                hi: pos + len,
            });
            pos += len;
        } else {
            if chunk_start.is_none() {
                chunk_start = Some(pos);
            }
            pos += rest.chars().next().unwrap().len_utf8();
        }
    }
    flush!();
    Ok(tokens)
}

// ─── Parsing ────────────────────────────────────────────────────────

fn begins_line(src: &str, pos: usize) -> bool {
    let start = src[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    src[start..pos].bytes().all(|b| b == b' ' || b == b'\t')
}

fn ends_line(src: &str, pos: usize) -> bool {
    let end = src[pos..].find('\n').map(|i| pos + i).unwrap_or(src.len());
    src[pos..end].bytes().all(|b| b == b' ' || b == b'\t' || b == b'\r')
}

struct Frame {
    branches: Vec<Syntax>,
    seq: Vec<Syntax>,
    open_pos: usize,
}

impl Frame {
    fn new(open_pos: usize) -> Frame {
        Frame {
            branches: Vec::new(),
            seq: Vec::new(),
            open_pos,
        }
    }

    // Pushes an atom, coalescing adjacent word runs.
    fn push(&mut self, node: Syntax) {
        if let (Some(Syntax::Words(tail)), Syntax::Words(head)) = (self.seq.last_mut(), &node) {
            tail.extend_from_slice(head);
            return;
        }
        self.seq.push(node);
    }

    fn finish_branch(&mut self) {
        let seq = std::mem::take(&mut self.seq);
        self.branches.push(concat(seq));
    }
}

fn concat(mut seq: Vec<Syntax>) -> Syntax {
    match seq.len() {
        0 => Syntax::Empty,
        1 => seq.pop().unwrap(),
        _ => Syntax::Concat(seq),
    }
}

/// Parses LRE source `src` into a syntax tree, interning pattern words into
/// `dict`. `file` is used in error messages.
pub(crate) fn parse(
    dict: &mut Dict,
    file: &str,
    src: &str,
    strict: bool,
) -> Result<Syntax, ParseError> {
    let tokens = lex(dict, file, src)?;
    let mut stack: Vec<Frame> = Vec::new();
    let mut cur = Frame::new(0);

    for token in tokens {
        match token.tok {
            Tok::Words(ids) => cur.push(Syntax::Words(ids)),
            Tok::Wild(n) => cur.push(Syntax::Wild(n)),
            Tok::GroupOpen => {
                if strict && !begins_line(src, token.lo) {
                    return Err(err(file, src, token.lo, "(( not at beginning of line"));
                }
                stack.push(std::mem::replace(&mut cur, Frame::new(token.lo)));
            }
            Tok::AltBar => {
                if stack.is_empty() {
                    return Err(err(file, src, token.lo, "|| outside (( ))"));
                }
                cur.finish_branch();
            }
            Tok::GroupClose { quest } => {
                if stack.is_empty() {
                    return Err(err(file, src, token.lo, "unexpected ))"));
                }
                if strict && !ends_line(src, token.hi) {
                    return Err(err(file, src, token.lo, ")) not at end of line"));
                }
                let mut frame = std::mem::replace(&mut cur, stack.pop().unwrap());
                let node = if frame.branches.is_empty() {
                    concat(std::mem::take(&mut frame.seq))
                } else {
                    frame.finish_branch();
                    Syntax::Alternate(frame.branches)
                };
                let node = if quest {
                    Syntax::Quest(Box::new(node))
                } else {
                    node
                };
                cur.push(node);
            }
            Tok::Quest => {
                if strict {
                    return Err(err(file, src, token.lo, "?? not preceded by ))"));
                }
                // Relaxed: bind to the preceding atom; for a word run, the
                // last word alone.
                let target = match cur.seq.pop() {
                    Some(Syntax::Words(mut ws)) if ws.len() > 1 => {
                        let last = ws.pop().unwrap();
                        cur.seq.push(Syntax::Words(ws));
                        Syntax::Words(vec![last])
                    }
                    Some(node) => node,
                    None => return Err(err(file, src, token.lo, "?? with nothing preceding")),
                };
                cur.seq.push(Syntax::Quest(Box::new(target)));
            }
        }
    }

    if let Some(open) = stack.first() {
        return Err(err(file, src, open.open_pos, "missing ))"));
    }
    Ok(concat(cur.seq))
}

// ─── Canonical printing ─────────────────────────────────────────────

#[cfg(test)]
impl Syntax {
    /// Renders the tree back to canonical LRE form: words space-joined,
    /// groups on their own lines. The result reparses in strict mode.
    pub(crate) fn to_lre(&self, dict: &Dict) -> String {
        let mut segments: Vec<(String, bool)> = Vec::new();
        self.segments(dict, &mut segments);
        let mut out = String::new();
        for (i, (text, grouped)) in segments.iter().enumerate() {
            if i > 0 {
                let prev_grouped = segments[i - 1].1;
                out.push(if *grouped || prev_grouped { '\n' } else { ' ' });
            }
            out.push_str(text);
        }
        out
    }

    fn segments(&self, dict: &Dict, out: &mut Vec<(String, bool)>) {
        match self {
            Syntax::Empty => {}
            Syntax::Words(ws) => out.push((join_words(dict, ws), false)),
            Syntax::Wild(n) => out.push((format!("__{n}__"), false)),
            Syntax::Concat(subs) => {
                for sub in subs {
                    sub.segments(dict, out);
                }
            }
            Syntax::Quest(sub) => out.push((format!("(({}))??", sub.inline(dict)), true)),
            Syntax::Alternate(subs) => {
                let branches: Vec<String> = subs.iter().map(|s| s.inline(dict)).collect();
                out.push((format!("(({}))", branches.join(" || ")), true));
            }
        }
    }

    // Single-line rendering, used inside group parentheses.
    fn inline(&self, dict: &Dict) -> String {
        match self {
            Syntax::Empty => String::new(),
            Syntax::Words(ws) => join_words(dict, ws),
            Syntax::Wild(n) => format!("__{n}__"),
            Syntax::Concat(subs) => {
                let parts: Vec<String> = subs.iter().map(|s| s.inline(dict)).collect();
                parts.join(" ")
            }
            Syntax::Quest(sub) => format!("(({}))??", sub.inline(dict)),
            Syntax::Alternate(subs) => {
                let branches: Vec<String> = subs.iter().map(|s| s.inline(dict)).collect();
                format!("(({}))", branches.join(" || "))
            }
        }
    }
}

#[cfg(test)]
fn join_words(dict: &Dict, ws: &[WordId]) -> String {
    let mut out = String::new();
    for (i, &w) in ws.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&dict.words()[w as usize]);
    }
    out
}

// ─── Leading phrases ────────────────────────────────────────────────

/// A leading two-word phrase. [`BAD_WORD`] fills the slots of patterns that
/// can end before two words; [`ANY_WORD`] stands for a wildcard-consumed
/// position.
pub(crate) type Phrase = [WordId; 2];

// A partial prefix: `n` words collected so far. `n < 2` means the node was
// consumed entirely after `n` words; `n == 2` means the phrase is full.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Lead {
    w: [WordId; 2],
    n: u8,
}

impl Lead {
    const EMPTY: Lead = Lead {
        w: [BAD_WORD, BAD_WORD],
        n: 0,
    };

    fn one(w: WordId) -> Lead {
        Lead {
            w: [w, BAD_WORD],
            n: 1,
        }
    }

    fn two(w0: WordId, w1: WordId) -> Lead {
        Lead { w: [w0, w1], n: 2 }
    }

    fn extend(self, next: Lead) -> Lead {
        match (self.n, next.n) {
            (0, _) => next,
            (1, 0) => self,
            (1, _) => Lead::two(self.w[0], next.w[0]),
            _ => self,
        }
    }
}

fn dedup(leads: &mut Vec<Lead>) {
    leads.sort();
    leads.dedup();
}

fn leads(node: &Syntax) -> Vec<Lead> {
    let mut out = match node {
        Syntax::Empty => vec![Lead::EMPTY],
        Syntax::Words(ws) => match ws.len() {
            0 => vec![Lead::EMPTY],
            1 => vec![Lead::one(ws[0])],
            _ => vec![Lead::two(ws[0], ws[1])],
        },
        Syntax::Wild(n) => {
            let mut v = vec![Lead::EMPTY];
            if *n >= 1 {
                v.push(Lead::one(ANY_WORD));
            }
            if *n >= 2 {
                v.push(Lead::two(ANY_WORD, ANY_WORD));
            }
            v
        }
        Syntax::Quest(sub) => {
            let mut v = leads(sub);
            v.push(Lead::EMPTY);
            v
        }
        Syntax::Alternate(subs) => {
            let mut v = Vec::new();
            for sub in subs {
                v.extend(leads(sub));
            }
            v
        }
        Syntax::Concat(subs) => {
            let mut acc = vec![Lead::EMPTY];
            for sub in subs {
                if acc.iter().all(|l| l.n == 2) {
                    break;
                }
                let sub_leads = leads(sub);
                let mut next = Vec::new();
                for &l in &acc {
                    if l.n == 2 {
                        next.push(l);
                    } else {
                        for &m in &sub_leads {
                            next.push(l.extend(m));
                        }
                    }
                }
                dedup(&mut next);
                acc = next;
            }
            acc
        }
    };
    dedup(&mut out);
    out
}

/// Computes the set of possible leading two-word phrases of a pattern.
pub(crate) fn leading_phrases(node: &Syntax) -> Vec<Phrase> {
    let mut phrases: Vec<Phrase> = leads(node).into_iter().map(|l| l.w).collect();
    phrases.sort();
    phrases.dedup();
    phrases
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn reparse(d: &mut Dict, input: &str) -> Result<Syntax, ParseError> {
        parse(d, "test.lre", input, input.contains('\n'))
    }

    #[test]
    fn test_parse_canonical() {
        let cases = [
            ("abc", "abc"),
            ("abc//**text**//def", "abc def"),
            ("a b c", "a b c"),
            (" (( abc )) ??", "((abc))??"),
            ("a b (( c ))??", "a b\n((c))??"),
            ("(a b ((c) ))??", "a b\n((c))??"),
            ("(( a b c )) ??", "((a b c))??"),
            ("z \n(( w ))\n(( a b c )) ??\n", "z w\n((a b c))??"),
            ("(( a __123__ c )) ??", "((a __123__ c))??"),
            ("a b ((c ||| d e)) f", "a b\n((c || d e))\nf"),
        ];
        let mut d = Dict::new();
        for (input, want) in cases {
            let syntax = reparse(&mut d, input).unwrap_or_else(|e| panic!("parse({input:?}): {e}"));
            let out = syntax.to_lre(&d);
            assert_eq!(out, want, "parse({input:?})");

            // The canonical form must reparse in strict mode.
            parse(&mut d, "test.lre", &out, true)
                .unwrap_or_else(|e| panic!("reparse({out:?}): {e}"));
        }
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            ("a ((b))", "(( not at beginning of line"),
            ("a || b", "|| outside (( ))"),
            ("((b)) c", ")) not at end of line"),
            ("a??", "?? not preceded by ))"),
            ("((a))\n??", "?? not preceded by ))"),
            ("((a b", "missing ))"),
            ("__0__", "invalid wildcard count"),
        ];
        let mut d = Dict::new();
        for (input, want) in cases {
            match parse(&mut d, "test.lre", input, true) {
                Ok(_) => panic!("parse({input:?}): expected error {want:?}"),
                Err(e) => assert!(
                    e.message.contains(want),
                    "parse({input:?}): got {:?}, want {want:?}",
                    e.message
                ),
            }
        }
    }

    fn phrase_text(d: &Dict, phrases: &[Phrase]) -> String {
        let word = |w: WordId| match w {
            ANY_WORD => "?".to_string(),
            BAD_WORD => "!".to_string(),
            _ => d.words()[w as usize].clone(),
        };
        let mut out = String::from("[");
        for (i, p) in phrases.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push('[');
            if p[1] != BAD_WORD {
                out.push_str(&word(p[0]));
                out.push(' ');
                out.push_str(&word(p[1]));
            } else if p[0] != BAD_WORD {
                out.push_str(&word(p[0]));
            }
            out.push(']');
        }
        out.push(']');
        out
    }

    #[test]
    fn test_leading_phrases() {
        let cases = [
            ("abc", "[[abc]]"),
            ("a b c", "[[a b]]"),
            ("abc ??", "[[] [abc]]"),
            ("a b c ??", "[[a b]]"),
            ("(a b c) ??", "[[a b]]"),
            ("(( a b c )) ??", "[[] [a b]]"),
            ("(( a b c )) ?? d e f", "[[a b] [d e]]"),
            ("(( a __123__ c )) ??", "[[] [a ?] [a c]]"),
            ("a b ((c ||| d e)) f", "[[a b]]"),
            ("((a || b)) ((c || d))", "[[a c] [a d] [b c] [b d]]"),
            ("a?? b c", "[[a b] [b c]]"),
            ("((a __1__))?? b c", "[[a ?] [a b] [b c]]"),
            ("a __20__", "[[a ?] [a]]"),
        ];
        let mut d = Dict::new();
        for (input, want) in cases {
            let syntax = parse(&mut d, "test.lre", input, false)
                .unwrap_or_else(|e| panic!("parse({input:?}): {e}"));
            let phrases = leading_phrases(&syntax);
            assert_eq!(phrase_text(&d, &phrases), want, "leading_phrases({input:?})");
        }
    }

    #[test]
    fn test_error_position() {
        let mut d = Dict::new();
        let e = parse(&mut d, "x.lre", "line one\nhere ((bad))\n", true).unwrap_err();
        assert_eq!(e.file, "x.lre");
        assert_eq!(e.line, 2);
        assert_eq!(e.column, 6);
    }
}
