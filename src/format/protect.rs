//! Placeholder protection. Non-formattable regions
//! — routine/view/rule bodies, `COMMENT ... IS` literal payloads, and any
//! standalone dollar-quoted block — are swapped for a placeholder token
//! before tokenizing, so the structural formatters and keyword-casing pass
//! never see (and can never corrupt) their contents.

use crate::format::scanner::{scan, RegionKind, Scan};
use crate::format::FormatOptions;

/// The chosen shape must not occur in any realistic input.
const PLACEHOLDER_PREFIX: &str = "__PLACEHOLDER_";
const PLACEHOLDER_SUFFIX: &str = "__";

pub struct Protected {
    pub text: String,
    /// Placeholder token -> original source text, in insertion order.
    pub map: Vec<(String, String)>,
    /// Set when a protected region was malformed (unterminated literal or
    /// dollar-quote); casing must be skipped for the whole statement.
    pub skip_casing: bool,
}

fn placeholder(n: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{n}{PLACEHOLDER_SUFFIX}")
}

/// Byte-range-free: `ranges` are given as char index pairs `[start, end)`
/// into `body`, and must be in ascending, non-overlapping order.
fn substitute(body: &str, ranges: &[(usize, usize)]) -> (String, Vec<(String, String)>) {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::new();
    let mut map = Vec::new();
    let mut cursor = 0usize;
    for (n, &(start, end)) in ranges.iter().enumerate() {
        out.push_str(&chars[cursor..start].iter().collect::<String>());
        let token = placeholder(n);
        let original: String = chars[start..end].iter().collect();
        out.push_str(&token);
        map.push((token, original));
        cursor = end;
    }
    out.push_str(&chars[cursor..].iter().collect::<String>());
    (out, map)
}

/// Find the char range of the literal/dollar-quoted payload immediately
/// following a top-level `AS` keyword, if `AS` appears at depth 0.
fn payload_after_as(scan: &Scan) -> Option<(usize, usize)> {
    let mut i = 0;
    while i < scan.len() {
        if scan.is_code(i) && scan.depths[i] == 0 && is_word_start(scan, i, "AS") {
            let mut j = skip_word(scan, i);
            while j < scan.len() && scan.chars[j].is_whitespace() {
                j += 1;
            }
            if j < scan.len() && scan.kinds[j] != RegionKind::Code {
                let kind = scan.kinds[j];
                let start = j;
                while j < scan.len() && scan.kinds[j] == kind {
                    j += 1;
                }
                return Some((start, j));
            }
        }
        i += 1;
    }
    None
}

fn is_word_start(scan: &Scan, i: usize, word: &str) -> bool {
    if i > 0 && scan.is_code(i - 1) && (scan.chars[i - 1].is_alphanumeric() || scan.chars[i - 1] == '_') {
        // `i` sits mid-word (e.g. the "AS" inside "HAS"), not a boundary.
        return false;
    }
    let end = skip_word(scan, i);
    if end == i {
        return false;
    }
    scan.substring(i, end).eq_ignore_ascii_case(word)
}

fn skip_word(scan: &Scan, i: usize) -> usize {
    let mut j = i;
    while j < scan.len() && scan.is_code(j) && (scan.chars[j].is_alphanumeric() || scan.chars[j] == '_') {
        j += 1;
    }
    j
}

fn head_matches(body: &str, prefixes: &[&str]) -> bool {
    let upper = body.trim_start().to_uppercase();
    prefixes.iter().any(|p| upper.starts_with(p))
}

/// Everything after the top-level `AS` to the end of the statement — used
/// for view/rule bodies, which (unlike routine bodies) are not necessarily
/// a single quoted literal.
fn tail_after_as(scan: &Scan) -> Option<(usize, usize)> {
    let mut i = 0;
    while i < scan.len() {
        if scan.is_code(i) && scan.depths[i] == 0 && is_word_start(scan, i, "AS") {
            let mut j = skip_word(scan, i);
            while j < scan.len() && scan.chars[j].is_whitespace() {
                j += 1;
            }
            return Some((j, scan.len()));
        }
        i += 1;
    }
    None
}

/// Payload following a top-level `IS` (used for `COMMENT ON ... IS`).
fn payload_after_is(scan: &Scan) -> Option<(usize, usize)> {
    let mut i = 0;
    while i < scan.len() {
        if scan.is_code(i) && scan.depths[i] == 0 && is_word_start(scan, i, "IS") {
            let mut j = skip_word(scan, i);
            while j < scan.len() && scan.chars[j].is_whitespace() {
                j += 1;
            }
            if j < scan.len() && scan.kinds[j] != RegionKind::Code {
                let kind = scan.kinds[j];
                let start = j;
                while j < scan.len() && scan.kinds[j] == kind {
                    j += 1;
                }
                return Some((start, j));
            }
            // Bare `NULL` is not a literal and is left alone.
            return None;
        }
        i += 1;
    }
    None
}

fn all_standalone_dollar_quotes(scan: &Scan, already: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < scan.len() {
        if scan.kinds[i] == RegionKind::DollarQuoted {
            let start = i;
            while i < scan.len() && scan.kinds[i] == RegionKind::DollarQuoted {
                i += 1;
            }
            if !already.iter().any(|&(s, e)| s == start && e == i) {
                out.push((start, i));
            }
            continue;
        }
        i += 1;
    }
    out
}

/// Run placeholder protection over one statement body.
pub fn protect(body: &str, options: &FormatOptions) -> Protected {
    let s = scan(body);
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let skip_casing = s.unsafe_unterminated;

    let is_comment = head_matches(body, &["COMMENT ON"]);
    let is_routine = head_matches(
        body,
        &["CREATE FUNCTION", "CREATE OR REPLACE FUNCTION", "CREATE PROCEDURE", "CREATE OR REPLACE PROCEDURE"],
    );
    let is_view = head_matches(
        body,
        &["CREATE VIEW", "CREATE OR REPLACE VIEW", "CREATE MATERIALIZED VIEW"],
    );
    let is_rule = head_matches(body, &["CREATE RULE", "CREATE OR REPLACE RULE"]);

    if is_comment {
        if let Some(range) = payload_after_is(&s) {
            ranges.push(range);
        }
    } else if is_routine && options.preserve_routine_bodies {
        if let Some(range) = payload_after_as(&s) {
            ranges.push(range);
        }
    } else if is_view && options.preserve_view_bodies {
        if let Some(range) = tail_after_as(&s) {
            ranges.push(range);
        }
    } else if is_rule && options.preserve_rule_bodies {
        if let Some(range) = tail_after_as(&s) {
            ranges.push(range);
        }
    }

    for range in all_standalone_dollar_quotes(&s, &ranges) {
        ranges.push(range);
    }
    ranges.sort_by_key(|r| r.0);

    let (text, map) = substitute(body, &ranges);
    Protected {
        text,
        map,
        skip_casing,
    }
}

/// Restore every placeholder with its original text.
pub fn restore(text: &str, map: &[(String, String)]) -> String {
    let mut out = text.to_string();
    for (token, original) in map {
        out = out.replace(token.as_str(), original.as_str());
    }
    out
}
