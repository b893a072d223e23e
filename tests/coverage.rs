//! End-to-end coverage behavior over the built-in license set.
//!
//! License texts for scanning are produced from the built-in LRE sources by
//! flattening them: comments dropped, groups replaced by their first branch,
//! wildcards removed. The flattened text is a faithful instance of the
//! license, so it must scan back to a single full match.

use lichen::{builtin_licenses, scan, License};

/// Flattens an LRE source into plain license text.
fn render(lre: &str) -> String {
    let mut s = lre.to_string();
    while let Some(i) = s.find("//**") {
        let j = s[i..].find("**//").map(|j| i + j + 4).unwrap_or(s.len());
        s.replace_range(i..j, " ");
    }
    while let Some(i) = s.find("((") {
        let j = i + 2 + s[i + 2..].find("))").expect("unbalanced group");
        let branch = s[i + 2..j]
            .split("||")
            .next()
            .unwrap()
            .trim()
            .to_string();
        let mut end = j + 2;
        let rest = &s[end..];
        let blanks = rest.len() - rest.trim_start_matches(|c| c == ' ' || c == '\t').len();
        if rest[blanks..].starts_with("??") {
            end += blanks + 2;
        }
        s.replace_range(i..end, &branch);
    }
    while let Some(i) = s.find("__") {
        let j = i + 2 + s[i + 2..].find("__").expect("unbalanced wildcard") + 2;
        s.replace_range(i..j, " ");
    }
    s
}

fn license_text(name: &str) -> String {
    let l = find_license(name);
    assert!(!l.text.is_empty(), "{name} has no text");
    render(&l.text)
}

fn find_license(name: &str) -> License {
    builtin_licenses()
        .into_iter()
        .find(|l| l.name == name)
        .unwrap_or_else(|| panic!("no license named {name}"))
}

fn assert_disjoint_sorted(cov: &lichen::Coverage) {
    for pair in cov.matches.windows(2) {
        assert!(
            pair[0].end <= pair[1].start,
            "overlapping matches: {} [{}:{}] and {} [{}:{}]",
            pair[0].name,
            pair[0].start,
            pair[0].end,
            pair[1].name,
            pair[1].start,
            pair[1].end,
        );
    }
}

#[test]
fn test_self_coverage() {
    for l in builtin_licenses() {
        if l.text.is_empty() {
            continue;
        }
        let text = render(&l.text);
        let cov = scan(text.as_bytes());
        assert_eq!(
            cov.matches.len(),
            1,
            "{}: expected one match, got {:?}",
            l.name,
            cov.matches
        );
        assert_eq!(cov.matches[0].name, l.name);
        assert!(!cov.matches[0].is_url);
        assert!(
            cov.matches[0].percent >= 99.0,
            "{}: match percent {}",
            l.name,
            cov.matches[0].percent
        );
        assert!(cov.percent >= 99.0, "{}: coverage {}", l.name, cov.percent);
    }
}

#[test]
fn test_multi_coverage() {
    let sep = "\nHere is some intervening text\n";
    let text = format!(
        "{}{sep}{}{sep}{}",
        license_text("MIT"),
        license_text("Apache-2.0"),
        license_text("BSD-2-Clause"),
    );
    let cov = scan(text.as_bytes());

    assert_eq!(cov.matches.len(), 3, "matches: {:?}", cov.matches);
    assert_eq!(cov.matches[0].name, "MIT");
    assert_eq!(cov.matches[1].name, "Apache-2.0");
    assert_eq!(cov.matches[2].name, "BSD-2-Clause");
    assert_disjoint_sorted(&cov);
    for m in &cov.matches {
        assert!(m.percent >= 99.0, "{}: {}", m.name, m.percent);
    }
    // Almost, but not quite, the whole input is license text.
    assert!(cov.percent >= 98.0, "coverage {}", cov.percent);
    assert!(cov.percent < 100.0, "coverage {}", cov.percent);
}

#[test]
fn test_bsd_variants_distinguished() {
    let cov2 = scan(license_text("BSD-2-Clause").as_bytes());
    assert_eq!(cov2.matches.len(), 1);
    assert_eq!(cov2.matches[0].name, "BSD-2-Clause");

    let cov3 = scan(license_text("BSD-3-Clause").as_bytes());
    assert_eq!(cov3.matches.len(), 1);
    assert_eq!(cov3.matches[0].name, "BSD-3-Clause");
}

// The historical BSD-3 wording used by many projects: a different clause 3
// and an "authors" disclaimer.
const WALK_TEXT: &str = r#"Copyright (c) 2010 The Walk Authors. All rights reserved.

Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions
are met:
1. Redistributions of source code must retain the above copyright
   notice, this list of conditions and the following disclaimer.
2. Redistributions in binary form must reproduce the above copyright
   notice, this list of conditions and the following disclaimer in the
   documentation and/or other materials provided with the distribution.
3. The names of the authors may not be used to endorse or promote products
   derived from this software without specific prior written permission.

THIS SOFTWARE IS PROVIDED BY THE AUTHORS "AS IS" AND ANY EXPRESS OR
IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES
OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED.
IN NO EVENT SHALL THE AUTHORS BE LIABLE FOR ANY DIRECT, INDIRECT,
INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT
NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE,
DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY
THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
(INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF
THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
"#;

#[test]
fn test_bsd3_wording_variant() {
    let cov = scan(WALK_TEXT.as_bytes());
    assert_eq!(cov.matches.len(), 1, "matches: {:?}", cov.matches);
    let m = &cov.matches[0];
    assert_eq!(m.name, "BSD-3-Clause");
    assert!(!m.is_url);
    // The copyright line at the top is folded into the match.
    assert_eq!(m.start, 0);
    assert_eq!(m.end, WALK_TEXT.len());
}

#[test]
fn test_copyright_header_capture() {
    let filler: String = std::iter::repeat("filler ").take(40).collect();
    let text = format!("Copyright 2020 Alice\n{filler}\n{}", license_text("MIT"));
    let cov = scan(text.as_bytes());
    let m = cov
        .matches
        .iter()
        .find(|m| m.name == "MIT")
        .expect("MIT not found");
    assert_eq!(m.start, 0, "match should start at the C in Copyright");
}

#[test]
fn test_empty_input() {
    let cov = scan(b"");
    assert_eq!(cov.percent, 0.0);
    assert!(cov.matches.is_empty());
}

#[test]
fn test_plain_prose_matches_nothing() {
    let cov = scan(b"Four score and seven years ago our fathers brought forth a new nation");
    assert_eq!(cov.percent, 0.0);
    assert!(cov.matches.is_empty());
}

#[test]
fn test_url_matches() {
    let mit = license_text("MIT");
    let cases: Vec<(Vec<&str>, String)> = vec![
        (
            vec!["CC-BY-4.0"],
            "This code is licensed by https://creativecommons.org/licenses/BY/4.0/ so have fun"
                .to_string(),
        ),
        (
            vec!["CC-BY-NC-4.0"],
            "This code is licensed under \
             https://creativecommons.org/licenses/by-nc/4.0/legalcode so have fun"
                .to_string(),
        ),
        (
            vec!["CC-BY-SA-4.0", "UPL-1.0"],
            "This code is licensed by https://creativecommons.org/licenses/BY-SA/4.0/ so have fun"
                .to_string()
                + "Also http://opensource.org/licenses/upl is relevant",
        ),
        (
            vec!["CC-BY-ND-4.0", "MIT", "UPL-1.0"],
            format!(
                "This code is licensed by https://creativecommons.org/licenses/BY-nd/4.0/ so \
                 have fun{mit}Also http://opensource.org/licenses/upl is relevant"
            ),
        ),
        (vec!["MIT", "MIT"], format!("{mit}{mit}")),
        // A URL ending in a number at EOF.
        (
            vec!["CC-BY-NC-ND-2.0"],
            "See https://creativecommons.org/licenses/by-nc-nd/2.0".to_string(),
        ),
    ];

    for (want, text) in cases {
        let cov = scan(text.as_bytes());
        let names: Vec<&str> = cov.matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, want, "matches for {want:?}: {:?}", cov.matches);
        assert_disjoint_sorted(&cov);
        for m in &cov.matches {
            if m.is_url {
                assert_eq!(m.percent, 100.0);
            }
        }
        assert!(
            cov.percent >= 40.0,
            "{want:?}: coverage {} too low",
            cov.percent
        );
    }
}

#[test]
fn test_url_is_not_matched_inside_license_text() {
    // The Unlicense body cites unlicense.org; the pattern match must win
    // over any URL interpretation of the span it covers.
    let cov = scan(license_text("Unlicense").as_bytes());
    assert_eq!(cov.matches.len(), 1);
    assert!(!cov.matches[0].is_url);
}

#[test]
fn test_word_offsets_round_trip() {
    let text = license_text("MIT");
    let mut dict = lichen::Dict::new();
    let words = dict.insert_split(&text);
    assert!(!words.is_empty());
    for (i, w) in words.iter().enumerate() {
        let found = words
            .binary_search_by_key(&w.lo, |x| x.lo)
            .unwrap_or_else(|_| panic!("word {i} offset {} not found", w.lo));
        assert_eq!(found, i, "byte offset {} maps to wrong word", w.lo);
    }
}

#[test]
fn test_scanner_is_shareable() {
    let mit = license_text("MIT");
    let isc = license_text("ISC");
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let cov = scan(mit.as_bytes());
                assert_eq!(cov.matches[0].name, "MIT");
                let cov = scan(isc.as_bytes());
                assert_eq!(cov.matches[0].name, "ISC");
            });
        }
    });
}
