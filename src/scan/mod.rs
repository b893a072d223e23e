//! Scan orchestration
//!
//! Glues the dictionary, the pattern dispatcher, and the URL table into the
//! public scanning interface: bytes in, [`Coverage`] out. Besides running
//! the automaton this is where word-index matches become byte ranges:
//! copyright headers just above a match are pulled in (up to 50 words),
//! ranges grow to line boundaries, URL matches fill the gaps, and the
//! overall coverage percentage is computed from word counts.

mod urls;

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::dict::{to_lower_bytes, Dict};
use crate::licenses::{builtin_licenses, License};
use crate::pattern::{Pattern, PatternSet};
use crate::{Error, Result};

/// Broad license families, derived from the license name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseKind {
    Agpl,
    Apache,
    Bsd,
    Cc,
    Gpl,
    Json,
    Mit,
    Unlicense,
    Zlib,
    Other,
}

impl LicenseKind {
    /// Classifies a license name by prefix. AGPL is checked before GPL;
    /// anything unrecognized is [`LicenseKind::Other`].
    pub fn from_name(name: &str) -> LicenseKind {
        const TABLE: &[(&str, LicenseKind)] = &[
            ("AGPL", LicenseKind::Agpl),
            ("Apache", LicenseKind::Apache),
            ("BSD", LicenseKind::Bsd),
            ("CC", LicenseKind::Cc),
            ("GPL", LicenseKind::Gpl),
            ("JSON", LicenseKind::Json),
            ("MIT", LicenseKind::Mit),
            ("Unlicense", LicenseKind::Unlicense),
            ("Zlib", LicenseKind::Zlib),
        ];
        for &(prefix, kind) in TABLE {
            if name.starts_with(prefix) {
                return kind;
            }
        }
        LicenseKind::Other
    }
}

impl fmt::Display for LicenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LicenseKind::Agpl => "AGPL",
            LicenseKind::Apache => "Apache",
            LicenseKind::Bsd => "BSD",
            LicenseKind::Cc => "CC",
            LicenseKind::Gpl => "GPL",
            LicenseKind::Json => "JSON",
            LicenseKind::Mit => "MIT",
            LicenseKind::Unlicense => "Unlicense",
            LicenseKind::Zlib => "Zlib",
            LicenseKind::Other => "Other",
        };
        f.write_str(s)
    }
}

/// One section of the input attributed to a license.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Name of the matched license.
    pub name: String,
    /// License family, derived from the name.
    pub kind: LicenseKind,
    /// Fraction of the matched section covered, as a percentage.
    pub percent: f64,
    /// Byte offset of the start of the match in the input.
    pub start: usize,
    /// Byte offset just past the end of the match.
    pub end: usize,
    /// The match identifies a license indirectly through a URL. `start` and
    /// `end` then delimit the URL itself and `percent` is always 100.
    pub is_url: bool,
}

/// How the input matches the license set: an overall percentage and the
/// matches in byte order, pairwise disjoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    /// Fraction of the input, in normalized words, matched by any license.
    pub percent: f64,
    /// Matches in order of appearance. A concatenation of licenses yields
    /// one entry per element.
    pub matches: Vec<Match>,
}

// A Copyright line within this many words above a match is folded into it.
const MAX_COPYRIGHT_WORDS: usize = 50;

/// A compiled license set ready to scan texts. Immutable after
/// construction; share it freely across threads.
#[derive(Debug)]
pub struct Scanner {
    dict: Dict,
    // Each pattern is parsed under its license name, so pattern ids resolve
    // to names through the set itself.
    set: PatternSet,
    // Canonical URL → license name.
    urls: HashMap<String, String>,
}

impl Scanner {
    /// Compiles a scanner for the given license set. Entries with an empty
    /// LRE source skip pattern compilation but still register their URL.
    pub fn new(licenses: Vec<License>) -> Result<Scanner> {
        let mut dict = Dict::new();
        // Pre-intern the words the orchestrator itself keys on.
        dict.insert("copyright");
        dict.insert("http");

        let mut patterns = Vec::new();
        let mut urls = HashMap::new();
        for l in &licenses {
            if !l.url.is_empty() {
                urls.insert(urls::canonical_url(&l.url), l.name.clone());
            }
            if !l.text.is_empty() {
                let p = Pattern::parse(&mut dict, &l.name, &l.text).map_err(|err| {
                    Error::Parse {
                        name: l.name.clone(),
                        err,
                    }
                })?;
                patterns.push(p);
            }
        }
        if patterns.is_empty() {
            return Err(Error::EmptyLicenseSet);
        }
        Ok(Scanner {
            dict,
            set: PatternSet::new(patterns),
            urls,
        })
    }

    /// The scanner for the built-in license set, compiled on first use.
    pub fn builtin() -> &'static Scanner {
        static BUILTIN: Lazy<Scanner> = Lazy::new(|| {
            Scanner::new(builtin_licenses()).expect("built-in license set must compile")
        });
        &BUILTIN
    }

    /// Computes the coverage of `text` against this scanner's license set.
    ///
    /// An input may match multiple licenses; the returned matches are
    /// disjoint, with the best match chosen wherever candidates overlapped.
    pub fn scan(&self, text: &[u8]) -> Coverage {
        let lower = to_lower_bytes(text);
        let matches = self.set.match_text(&self.dict, &lower);
        let words = &matches.words;

        let mut cov = Coverage::default();
        if words.is_empty() {
            return cov;
        }

        let copyright = self.dict.lookup("copyright");
        let http = self.dict.lookup("http");

        let mut total = 0usize;
        let mut last_end = 0usize;

        // A sentinel entry sweeps the gap after the last match for URLs.
        let sentinel = crate::pattern::WordMatch {
            id: -1,
            start: words.len(),
            end: words.len(),
        };

        for m in matches.list.iter().copied().chain(std::iter::once(sentinel)) {
            let mut start_word = m.start;

            // Fold a Copyright line just above the match into it.
            if m.id >= 0 && last_end < start_word && copyright >= 0 {
                let limit = start_word.saturating_sub(MAX_COPYRIGHT_WORDS).max(last_end);
                for i in limit..start_word {
                    if words[i].id == copyright {
                        start_word = i;
                        break;
                    }
                }
            }

            // Pick up URLs in the gap before the match.
            let mut found_url = false;
            let mut i = last_end;
            while i < start_word {
                let w = words[i];
                if w.id == http {
                    if let Some(len) = urls::url_at(&lower[w.lo as usize..]) {
                        let (u0, u1) = (w.lo as usize, w.lo as usize + len);
                        // Only accept URLs that end before the next match.
                        let fits = start_word == words.len() || u1 <= words[start_word].lo as usize;
                        if fits {
                            if let Some(name) = urls::resolve(&self.urls, &lower[u0..u1]) {
                                cov.matches.push(Match {
                                    name: name.to_string(),
                                    kind: LicenseKind::from_name(name),
                                    percent: 100.0,
                                    start: u0,
                                    end: u1,
                                    is_url: true,
                                });
                                found_url = true;
                                while i < start_word && (words[i].hi as usize) <= u1 {
                                    i += 1;
                                }
                                continue;
                            }
                        }
                    }
                }
                i += 1;
            }
            // A gap holding at least one recognized URL counts as covered in
            // full; URLs sharing a gap split it between them.
            if found_url {
                total += start_word - last_end;
            }

            if m.id < 0 {
                break;
            }

            // Word indexes become byte offsets, grown to line boundaries.
            let mut start = words[start_word].lo as usize;
            if start_word == 0 {
                start = 0;
            } else {
                let prev = words[start_word - 1].hi as usize;
                if let Some(nl) = lower[prev..start].rfind('\n') {
                    start = prev + nl + 1;
                }
            }
            let mut end = words[m.end - 1].hi as usize;
            if m.end == words.len() {
                end = lower.len();
            } else {
                let next = words[m.end].lo as usize;
                if let Some(nl) = lower[end..next].find('\n') {
                    end += nl + 1;
                }
            }

            let name = self.set.patterns()[m.id as usize].file();
            cov.matches.push(Match {
                name: name.to_string(),
                kind: LicenseKind::from_name(name),
                percent: 100.0,
                start,
                end,
                is_url: false,
            });
            total += m.end - start_word;
            last_end = m.end;
        }

        cov.percent = 100.0 * total as f64 / words.len() as f64;
        cov
    }
}

/// Computes the coverage of `text` against the built-in license set.
pub fn scan(text: &[u8]) -> Coverage {
    Scanner::builtin().scan(text)
}

// ─── Tests ──────────────────────────────────────────────────────────
