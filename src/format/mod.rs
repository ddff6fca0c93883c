//! SQL formatting: reparse-and-reprint rather than string patching.
//! Deterministic and idempotent — formatting already-formatted output is a
//! no-op — and free of I/O: callers own reading and writing the SQL text.
//!
//! Pipeline per statement: split on top-level `;`, protect non-formattable
//! regions behind placeholders, tokenize, dispatch to a structural family
//! formatter, apply keyword casing, wrap long lines, then restore
//! placeholders.

mod casing;
mod clauses;
mod dispatch;
pub mod keywords;
mod protect;
mod render;
pub mod scanner;
pub mod token;
mod wrap;

use render::render_tokens;
use scanner::scan;
use token::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum KeywordCase {
    Upper,
    Lower,
    Preserve,
}

/// The sole configuration surface for formatting. Every field has a
/// conservative, documented default; nothing here is read from the
/// environment or a file — callers that want config-file-driven formatting
/// load one into this struct themselves with `serde`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Case applied to recognized structural keywords. Default `Preserve`.
    pub keyword_case: KeywordCase,
    /// Spaces per indent level for wrapped clauses and item lists. Default 2.
    pub indent_width: usize,
    /// Pad the first word of each column/argument item so following words
    /// line up in a column. Default `true`.
    pub align_columns: bool,
    /// Pad the left side of `key = value` pairs (`WITH`/`OPTIONS`/`SET`
    /// lists) so the `=` signs line up. Default `true`.
    pub align_key_values: bool,
    /// Put the comma after each item (`true`) or before the next (`false`).
    /// Default `true`.
    pub trailing_commas: bool,
    /// Lines longer than this are re-broken at the best eligible point.
    /// Default 100.
    pub max_line_width: usize,
    /// Master switch for the wrapping pass. Default `true`.
    pub wrap_long_lines: bool,
    /// Leave `CREATE [OR REPLACE] FUNCTION`/`PROCEDURE` bodies untouched.
    /// Default `true`.
    pub preserve_routine_bodies: bool,
    /// Leave `CREATE [MATERIALIZED] VIEW` bodies untouched. Default `true`.
    pub preserve_view_bodies: bool,
    /// Leave `CREATE RULE` bodies untouched. Default `true`.
    pub preserve_rule_bodies: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            keyword_case: KeywordCase::Preserve,
            indent_width: 2,
            align_columns: true,
            align_key_values: true,
            trailing_commas: true,
            max_line_width: 100,
            wrap_long_lines: true,
            preserve_routine_bodies: true,
            preserve_view_bodies: true,
            preserve_rule_bodies: true,
        }
    }
}

fn leading_comment_block(text: &str) -> (&str, &str) {
    let mut end = 0usize;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            end += line.len();
            continue;
        }
        break;
    }
    text.split_at(end)
}

/// A top-level `CHECK (...)`/`WITH (...)`/`OPTIONS (...)`/`SET (...)`/
/// `RESET (...)` clause whose parenthesis never closes makes the whole
/// statement malformed-unsafe.
fn has_unclosed_clause_paren(s: &scanner::Scan) -> bool {
    const GUARDED: &[&str] = &["CHECK", "WITH", "OPTIONS", "SET", "RESET"];
    let n = s.len();
    let mut i = 0;
    while i < n {
        if s.is_code(i) && (s.chars[i].is_alphabetic()) {
            let start = i;
            let mut j = i;
            while j < n && s.is_code(j) && (s.chars[j].is_alphanumeric() || s.chars[j] == '_') {
                j += 1;
            }
            let word = s.substring(start, j);
            if GUARDED.iter().any(|g| word.eq_ignore_ascii_case(g)) {
                let mut k = j;
                while k < n && s.chars[k].is_whitespace() {
                    k += 1;
                }
                if k < n && s.is_code(k) && s.chars[k] == '(' {
                    if s.find_matching_close(k).is_none() {
                        return true;
                    }
                }
            }
            i = j;
            continue;
        }
        i += 1;
    }
    false
}

fn format_statement(chunk: &str, options: &FormatOptions) -> String {
    let (leading, rest) = leading_comment_block(chunk);
    let body = rest.trim();
    if body.is_empty() {
        return chunk.trim_end().to_string();
    }

    let pre_scan = scan(body);
    if pre_scan.unsafe_unterminated || has_unclosed_clause_paren(&pre_scan) {
        return format!("{leading}{body}");
    }

    let protected = protect::protect(body, options);
    let scanned = scan(&protected.text);
    let tokens = tokenize(&scanned);

    let structural = dispatch::dispatch(&protected.text, &tokens, options)
        .unwrap_or_else(|| render_tokens(&tokens.iter().collect::<Vec<_>>()));

    let cased = if protected.skip_casing {
        structural
    } else {
        casing::apply_casing(&structural, options)
    };
    let wrapped = wrap::wrap(&cased, options);
    let restored = protect::restore(&wrapped, &protected.map);
    format!("{leading}{restored}")
}

/// Format a buffer of zero or more semicolon-terminated SQL statements.
/// Pure function: no file or network I/O, deterministic for a given
/// `(input, options)` pair, and idempotent.
pub fn format(input: &str, options: &FormatOptions) -> String {
    let full = scan(input);
    let semis = full.top_level_semicolons();
    let chars = &full.chars;

    let mut out = String::new();
    let mut cursor = 0usize;
    for &semi in &semis {
        let chunk: String = chars[cursor..semi].iter().collect();
        let formatted = format_statement(&chunk, options);
        if !formatted.trim().is_empty() {
            out.push_str(formatted.trim_end());
            out.push_str(";\n");
        }
        cursor = semi + 1;
    }
    let tail: String = chars[cursor..].iter().collect();
    if !tail.trim().is_empty() {
        let formatted = format_statement(&tail, options);
        out.push_str(formatted.trim());
        out.push('\n');
    }
    while out.ends_with('\n') {
        out.pop();
    }
    out
}
