//! URL recognition
//!
//! Spans of input between pattern matches are scanned for bare URLs naming a
//! known license. The grammar is narrow on purpose: `http(s)` scheme, a
//! `.org` or `.com` host, and at least one path segment. That covers the
//! license-hosting sites that matter without swallowing arbitrary prose.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)https?://[-a-z0-9_.]+\.(org|com)(/[-a-z0-9_.#?=]+)+/?").unwrap()
});

/// If `text` begins with a recognizable URL, returns its byte length.
pub(crate) fn url_at(text: &str) -> Option<usize> {
    URL_RE.find(text).map(|m| m.end())
}

/// Canonicalizes a URL for table lookup: scheme, trailing slash, and the
/// `/legalcode` suffix common on Creative Commons deeds are stripped, and
/// the rest is lowercased.
pub(crate) fn canonical_url(url: &str) -> String {
    let url = url
        .trim_start_matches("http://")
        .trim_start_matches("https://");
    let url = url.trim_end_matches('/');
    let url = url.strip_suffix("/legalcode").unwrap_or(url);
    url.to_lowercase()
}

/// Resolves a raw URL against the table of canonical URL → license name.
/// A miss retries with one more path segment stripped, collapsing ported
/// Creative Commons URLs like `…/by/3.0/us` onto `…/by/3.0`.
pub(crate) fn resolve<'a>(urls: &'a HashMap<String, String>, url: &str) -> Option<&'a str> {
    let canon = canonical_url(url);
    if let Some(name) = urls.get(&canon) {
        return Some(name);
    }
    let (parent, _) = canon.rsplit_once('/')?;
    urls.get(parent).map(String::as_str)
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_grammar() {
        let hits = [
            "https://creativecommons.org/licenses/by/4.0/",
            "https://creativecommons.org/licenses/by-nc-nd/2.0",
            "http://opensource.org/licenses/upl",
            "HTTPS://CREATIVECOMMONS.ORG/LICENSES/BY/4.0/",
            "https://www.apache.org/licenses/LICENSE-2.0",
        ];
        for url in hits {
            assert!(url_at(url).is_some(), "no match for {url:?}");
        }
        let misses = [
            "https://example.net/licenses/mit",    // .net host
            "https://creativecommons.org",         // no path
            "ftp://creativecommons.org/licenses",  // scheme
            "see https://creativecommons.org/x",   // not anchored
        ];
        for url in misses {
            assert_eq!(url_at(url), None, "unexpected match for {url:?}");
        }
    }

    #[test]
    fn test_url_match_stops_at_whitespace() {
        let n = url_at("https://creativecommons.org/licenses/by/4.0/ so have fun").unwrap();
        assert_eq!(n, "https://creativecommons.org/licenses/by/4.0/".len());
    }

    #[test]
    fn test_canonical_url() {
        let cases = [
            ("https://creativecommons.org/licenses/BY/4.0/", "creativecommons.org/licenses/by/4.0"),
            ("http://creativecommons.org/licenses/by-nc/4.0/legalcode", "creativecommons.org/licenses/by-nc/4.0"),
            ("https://opensource.org/licenses/upl", "opensource.org/licenses/upl"),
            ("creativecommons.org/licenses/by/4.0", "creativecommons.org/licenses/by/4.0"),
        ];
        for (input, want) in cases {
            assert_eq!(canonical_url(input), want, "canonical_url({input:?})");
        }
    }

    #[test]
    fn test_resolve_ported_urls() {
        let mut urls = HashMap::new();
        urls.insert(
            "creativecommons.org/licenses/by/3.0".to_string(),
            "CC-BY-3.0".to_string(),
        );
        assert_eq!(
            resolve(&urls, "https://creativecommons.org/licenses/by/3.0/"),
            Some("CC-BY-3.0")
        );
        // A ported jurisdiction suffix resolves to the unported URL.
        assert_eq!(
            resolve(&urls, "https://creativecommons.org/licenses/by/3.0/us/"),
            Some("CC-BY-3.0")
        );
        assert_eq!(
            resolve(&urls, "https://creativecommons.org/licenses/by/4.0/"),
            None
        );
    }
}
