//! Coverage renderings for the command line
//!
//! One line per match in the plain form, a wider tab-separated form under
//! verbose, and a JSON rendering of the full [`Coverage`].

use crate::scan::Coverage;

/// `<name>\t<percent>%`, one line per match.
pub fn render_lines(cov: &Coverage) -> String {
    let mut out = String::new();
    for m in &cov.matches {
        out.push_str(&format!("{}\t{:.1}%\n", m.name, m.percent));
    }
    out
}

/// Tab-separated name, kind, percent, byte range, and URL flag per match.
pub fn render_verbose(cov: &Coverage) -> String {
    let mut out = String::new();
    for m in &cov.matches {
        out.push_str(&format!(
            "{}\t{}\t{:.1}%\t{}\t{}\t{}\n",
            m.name, m.kind, m.percent, m.start, m.end, m.is_url
        ));
    }
    out
}

/// Pretty-printed JSON rendering of the coverage.
pub fn render_json(cov: &Coverage) -> serde_json::Result<String> {
    serde_json::to_string_pretty(cov)
}
