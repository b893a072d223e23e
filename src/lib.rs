//! # lichen — license text classification
//!
//! Classifies a byte buffer (a LICENSE file, a README, a source file, or a
//! concatenation of several of these) against a set of known open-source
//! licenses, reporting which license texts appear, where they appear, how
//! much of the buffer they cover, and which matches are indirect (bare URLs
//! naming a known license).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       Scanner                            │
//! │  ┌────────┐  ┌───────────────┐  ┌────────────────────┐   │
//! │  │ Dict   │  │ PatternSet    │  │ URL table          │   │
//! │  │ words  │  │ phrase index  │  │ canonical url→name │   │
//! │  └───┬────┘  │ shared DFA    │  └─────────┬──────────┘   │
//! │      │       └──────┬────────┘            │              │
//! │  ┌───▼──────────────▼────────────────────▼──────────┐   │
//! │  │ bytes → words → candidate dispatch → DFA matches  │   │
//! │  │       → URL fill-in → disjoint Coverage           │   │
//! │  └───────────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Licenses are described as *license regular expressions* (LREs), a
//! word-based, case-insensitive pattern language:
//!
//! ```text
//! word            a single case-insensitive word
//! __N__           any sequence of up to N words
//! expr1 expr2     concatenation
//! expr1 || expr2  alternation (only inside a group)
//! (( expr ))      grouping
//! (( expr ))??    zero or one instances of the group
//! //** text **//  comment
//! ```
//!
//! Each pattern is compiled to an instruction program and from there into a
//! packed DFA over word identifiers, with context-sensitive spelling
//! tolerance applied at dead ends. A [`Scanner`] carries the compiled
//! automaton for a whole license set and is immutable after construction, so
//! it may be shared freely across threads.
//!
//! ## Scanning
//!
//! ```no_run
//! let cov = lichen::scan(b"... license text ...");
//! println!("{:.1}% of text covered by licenses", cov.percent);
//! for m in &cov.matches {
//!     println!("{} at [{}:{}] url={}", m.name, m.start, m.end, m.is_url);
//! }
//! ```
//!
//! The top-level [`scan`] uses the built-in license set; a custom set is
//! compiled with [`Scanner::new`].

pub mod dict;
pub mod pattern;
pub mod scan;
pub mod licenses;
pub mod report;

pub use dict::{Dict, Word, WordId, ANY_WORD, BAD_WORD};
pub use licenses::{builtin_licenses, License};
pub use pattern::{ParseError, Pattern, PatternSet};
pub use scan::{scan, Coverage, LicenseKind, Match, Scanner};

use thiserror::Error;

/// Errors produced while building a [`Scanner`].
///
/// Scanning itself is total and never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("parsing {name}: {err}")]
    Parse {
        /// Name of the license whose LRE failed to parse.
        name: String,
        #[source]
        err: ParseError,
    },

    #[error("license set contains no license texts")]
    EmptyLicenseSet,
}

pub type Result<T> = std::result::Result<T, Error>;
