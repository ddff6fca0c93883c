//! The generic structural-formatting engine. Most
//! statement families reduce to the same shape: a header, an optional
//! top-level parenthesized item list, and a run of trailing clauses — so
//! one engine, configured per family, replaces eighteen bespoke ones.

use crate::format::render::{render_tokens, split_top_level_commas};
use crate::format::token::Token;
use crate::format::FormatOptions;

/// Per-family configuration for [`format_generic`].
pub struct StatementConfig {
    /// Keywords that start a new trailing clause line when found at the
    /// statement's top level, after the header (and item list, if any).
    pub clause_keywords: &'static [&'static str],
    /// Two-word phrases that also start a new trailing clause line, for
    /// keywords that double as part of the statement's own fixed header
    /// (e.g. `ALTER COLUMN` inside an `ALTER TABLE` statement, where a bare
    /// `ALTER` clause keyword would match the statement's own leading
    /// token).
    pub clause_phrases: &'static [(&'static str, &'static str)],
    /// Whether this family has a `(...)` item list immediately after the
    /// header (columns, arguments, index keys, aggregate state...).
    pub has_paren_list: bool,
}

fn is_clause_boundary(tokens: &[Token], i: usize, clause_keywords: &[&str], clause_phrases: &[(&str, &str)]) -> bool {
    let t = &tokens[i];
    if !t.is_word() {
        return false;
    }
    if clause_keywords.contains(&t.uppercase_value.as_str()) {
        return true;
    }
    if let Some(next) = tokens.get(i + 1) {
        if next.is_word() {
            return clause_phrases
                .iter()
                .any(|&(a, b)| a == t.uppercase_value && b == next.uppercase_value);
        }
    }
    false
}

fn first_top_level_paren(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0i32;
    for (i, t) in tokens.iter().enumerate() {
        if depth == 0 && t.value == "(" {
            return Some(i);
        }
        if t.value == "(" {
            depth += 1;
        } else if t.value == ")" {
            depth -= 1;
        }
    }
    None
}

fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0i32;
    for (k, t) in tokens[open..].iter().enumerate() {
        if t.value == "(" {
            depth += 1;
        } else if t.value == ")" {
            depth -= 1;
            if depth == 0 {
                return Some(open + k);
            }
        }
    }
    None
}

fn first_clause_boundary(tokens: &[Token], clause_keywords: &[&str], clause_phrases: &[(&str, &str)]) -> Option<usize> {
    (0..tokens.len()).find(|&i| is_clause_boundary(tokens, i, clause_keywords, clause_phrases))
}

/// Render `tail` as one indented line per clause run, each run starting at
/// the next occurrence of a `clause_keywords` word or `clause_phrases`
/// phrase.
fn render_clause_lines(tail: &[Token], clause_keywords: &[&str], clause_phrases: &[(&str, &str)], indent: &str) -> Vec<String> {
    if tail.is_empty() {
        return Vec::new();
    }
    let mut boundaries = vec![0usize];
    for i in 1..tail.len() {
        if is_clause_boundary(tail, i, clause_keywords, clause_phrases) {
            boundaries.push(i);
        }
    }
    boundaries.push(tail.len());

    let mut lines = Vec::new();
    for w in boundaries.windows(2) {
        let (start, end) = (w[0], w[1]);
        if start == end {
            continue;
        }
        let refs: Vec<&Token> = tail[start..end].iter().collect();
        let rendered = render_tokens(&refs);
        if !rendered.is_empty() {
            lines.push(format!("{indent}{rendered}"));
        }
    }
    lines
}

fn render_item_line(item: &[&Token], indent: &str, align_to: Option<usize>) -> String {
    let rendered = render_tokens(item);
    let split_point = if rendered.contains(" = ") {
        rendered.split_once(" = ").map(|(k, v)| (k, format!("= {v}")))
    } else {
        rendered.split_once(' ').map(|(k, v)| (k, v.to_string()))
    };
    match (align_to, split_point) {
        (Some(width), Some((first, rest))) => format!("{indent}{first:<width$} {rest}"),
        _ => format!("{indent}{rendered}"),
    }
}

/// Whether every item in a paren list looks like `key = value` (a `WITH`/
/// `OPTIONS`/`SET` storage-parameter list) rather than `name type` columns.
fn is_key_value_list(items: &[Vec<&Token>]) -> bool {
    !items.is_empty()
        && items.iter().filter(|i| !i.is_empty()).all(|item| render_tokens(item).contains(" = "))
}

/// Format one statement's tokens per `config`. Returns `None` when the
/// family expects a paren list that isn't present — callers fall back to
/// the generic single/clause-only formatter in that case.
pub fn format_generic(tokens: &[Token], options: &FormatOptions, config: &StatementConfig) -> Option<String> {
    let indent = " ".repeat(options.indent_width);

    if config.has_paren_list {
        let open = first_top_level_paren(tokens)?;
        let close = matching_close(tokens, open)?;
        let header_refs: Vec<&Token> = tokens[..open].iter().collect();
        let header = render_tokens(&header_refs);

        let list_tokens = &tokens[open + 1..close];
        let list_refs: Vec<&Token> = list_tokens.iter().collect();
        let items = split_top_level_commas(&list_refs);

        let key_value_list = is_key_value_list(&items);
        let align_enabled = if key_value_list { options.align_key_values } else { options.align_columns };
        let align_to = if align_enabled {
            items
                .iter()
                .filter_map(|item| {
                    let rendered = render_tokens(item);
                    if key_value_list {
                        rendered.split_once(" = ").map(|(f, _)| f.len())
                    } else {
                        rendered.split_once(' ').map(|(f, _)| f.len())
                    }
                })
                .max()
        } else {
            None
        };

        let item_lines: Vec<String> = items
            .iter()
            .filter(|item| !item.is_empty())
            .map(|item| render_item_line(item, &indent, align_to))
            .collect();
        let n = item_lines.len();

        let mut lines = Vec::new();
        lines.push(format!("{header} ("));
        for (idx, line) in item_lines.into_iter().enumerate() {
            if options.trailing_commas {
                let suffix = if idx + 1 < n { "," } else { "" };
                lines.push(format!("{line}{suffix}"));
            } else if idx > 0 {
                lines.push(format!("{indent}, {}", line.trim_start()));
            } else {
                lines.push(line);
            }
        }
        lines.push(")".to_string());

        let tail = &tokens[close + 1..];
        lines.extend(render_clause_lines(tail, config.clause_keywords, config.clause_phrases, &indent));
        return Some(lines.join("\n"));
    }

    let boundary = first_clause_boundary(tokens, config.clause_keywords, config.clause_phrases);
    let header_end = boundary.unwrap_or(tokens.len());
    let header_refs: Vec<&Token> = tokens[..header_end].iter().collect();
    let header = render_tokens(&header_refs);

    match boundary {
        None => Some(header),
        Some(b) => {
            let mut lines = vec![header];
            lines.extend(render_clause_lines(&tokens[b..], config.clause_keywords, config.clause_phrases, &indent));
            Some(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::scanner::scan;
    use crate::format::token::tokenize;

    fn opts() -> FormatOptions {
        FormatOptions::default()
    }

    #[test]
    fn formats_column_list_with_trailing_clause() {
        let s = scan("CREATE TABLE foo (a int, b text) INHERITS (bar)");
        let tokens = tokenize(&s);
        let config = StatementConfig {
            clause_keywords: &["INHERITS", "PARTITION"],
            clause_phrases: &[],
            has_paren_list: true,
        };
        let out = format_generic(&tokens, &opts(), &config).unwrap();
        assert!(out.starts_with("CREATE TABLE foo ("));
        assert!(out.contains("INHERITS"));
    }

    #[test]
    fn key_value_item_list_aligns_on_the_equals_sign() {
        let s = scan("OPTIONS (fillfactor = 70, autovacuum_enabled = true)");
        let tokens = tokenize(&s);
        let config = StatementConfig {
            clause_keywords: &[],
            clause_phrases: &[],
            has_paren_list: true,
        };
        let out = format_generic(&tokens, &opts(), &config).unwrap();
        let lines: Vec<&str> = out.lines().filter(|l| l.contains('=')).collect();
        assert_eq!(lines.len(), 2);
        let eq_positions: Vec<usize> = lines.iter().map(|l| l.find('=').unwrap()).collect();
        assert_eq!(eq_positions[0], eq_positions[1]);
    }

    #[test]
    fn disabling_align_key_values_leaves_items_unpadded() {
        let s = scan("OPTIONS (fillfactor = 70, autovacuum_enabled = true)");
        let tokens = tokenize(&s);
        let config = StatementConfig {
            clause_keywords: &[],
            clause_phrases: &[],
            has_paren_list: true,
        };
        let options = FormatOptions {
            align_key_values: false,
            ..FormatOptions::default()
        };
        let out = format_generic(&tokens, &options, &config).unwrap();
        assert!(out.contains("fillfactor = 70"));
        assert!(out.contains("autovacuum_enabled = true"));
    }

    #[test]
    fn falls_back_to_none_without_paren_list() {
        let s = scan("CREATE TRIGGER t BEFORE INSERT ON foo");
        let tokens = tokenize(&s);
        let config = StatementConfig {
            clause_keywords: &["BEFORE", "AFTER", "ON"],
            clause_phrases: &[],
            has_paren_list: true,
        };
        assert!(format_generic(&tokens, &opts(), &config).is_none());
    }

    #[test]
    fn alter_table_header_keeps_its_own_leading_keyword() {
        let s = scan("ALTER TABLE public.orders ADD COLUMN status text");
        let tokens = tokenize(&s);
        let config = StatementConfig {
            clause_keywords: &["ADD", "DROP", "RENAME", "OWNER", "SET", "VALIDATE", "ENABLE", "DISABLE"],
            clause_phrases: &[("ALTER", "COLUMN")],
            has_paren_list: false,
        };
        let out = format_generic(&tokens, &opts(), &config).unwrap();
        assert_eq!(out, "ALTER TABLE public.orders\n  ADD COLUMN status text");
    }

    #[test]
    fn alter_table_recognizes_alter_column_as_a_clause_phrase() {
        let s = scan("ALTER TABLE public.orders ALTER COLUMN status TYPE int");
        let tokens = tokenize(&s);
        let config = StatementConfig {
            clause_keywords: &["ADD", "DROP", "RENAME", "OWNER", "SET", "VALIDATE", "ENABLE", "DISABLE"],
            clause_phrases: &[("ALTER", "COLUMN")],
            has_paren_list: false,
        };
        let out = format_generic(&tokens, &opts(), &config).unwrap();
        assert_eq!(out, "ALTER TABLE public.orders\n  ALTER COLUMN status TYPE int");
    }
}
