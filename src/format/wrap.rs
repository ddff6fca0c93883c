//! Line wrapping. Operates on the already structurally-formatted, cased
//! text one physical line at a time: lines under `max_line_width` are
//! untouched, longer ones are re-broken at the highest-priority eligible
//! point, never splitting a compound keyword prefix.

use crate::format::keywords::{COMPOUND_PREFIXES, WRAP_PREFERRED_KEYWORDS};
use crate::format::render::render_tokens;
use crate::format::scanner::scan;
use crate::format::token::{tokenize, Token};
use crate::format::FormatOptions;

fn leading_indent(line: &str) -> String {
    line.chars().take_while(|c| *c == ' ').collect()
}

fn compound_blocks_break(prev_upper: &str, next_upper: &str) -> bool {
    COMPOUND_PREFIXES
        .iter()
        .any(|&(a, b)| a.eq_ignore_ascii_case(prev_upper) && (b == "*" || b.eq_ignore_ascii_case(next_upper)))
}

#[derive(Clone, Copy)]
struct BreakInfo {
    allowed: bool,
    preferred: bool,
    /// A top-level comma sits immediately before this token. Outranks
    /// `preferred`: a comma at the statement's own nesting level is always
    /// a better break point than a preferred-keyword boundary further away.
    comma: bool,
}

fn break_info(tokens: &[Token]) -> Vec<BreakInfo> {
    let base_depth = tokens.iter().map(|t| t.depth).min().unwrap_or(0);
    let mut info = vec![BreakInfo { allowed: false, preferred: false, comma: false }; tokens.len()];
    for idx in 1..tokens.len() {
        let prev = &tokens[idx - 1];
        let cur = &tokens[idx];
        let blocked = prev.is_word() && compound_blocks_break(&prev.uppercase_value, &cur.uppercase_value);
        let preferred = !blocked && WRAP_PREFERRED_KEYWORDS.contains(&prev.uppercase_value.as_str());
        let comma = !blocked && prev.value == "," && prev.depth == base_depth;
        info[idx] = BreakInfo {
            allowed: !blocked,
            preferred,
            comma,
        };
    }
    info
}

/// Wrap a single already-rendered physical line, if it exceeds
/// `options.max_line_width`.
fn wrap_line(line: &str, options: &FormatOptions) -> Vec<String> {
    if line.chars().count() <= options.max_line_width {
        return vec![line.to_string()];
    }

    let indent = leading_indent(line);
    let continuation_indent = format!("{indent}{}", " ".repeat(options.indent_width));

    let s = scan(line.trim_start());
    let tokens = tokenize(&s);
    if tokens.is_empty() {
        return vec![line.to_string()];
    }
    let breaks = break_info(&tokens);

    let mut out_lines: Vec<String> = Vec::new();
    let mut pending: Vec<usize> = Vec::new();
    let mut current_prefix = indent.clone();

    let rendered_of = |idxs: &[usize]| -> String {
        let refs: Vec<&Token> = idxs.iter().map(|&i| &tokens[i]).collect();
        render_tokens(&refs)
    };

    for idx in 0..tokens.len() {
        let mut candidate = pending.clone();
        candidate.push(idx);
        let candidate_text = format!("{current_prefix}{}", rendered_of(&candidate));

        if candidate_text.chars().count() > options.max_line_width && !pending.is_empty() {
            // A top-level comma wins over everything else, and among commas
            // the earliest one before the limit wins (so search `pending`
            // forwards for it). Failing that, search backwards for the most
            // recent WRAP_PREFERRED_KEYWORDS boundary, else the most recent
            // generically-allowed boundary.
            let comma_at = pending
                .iter()
                .enumerate()
                .skip(1)
                .find(|&(_, &tok_idx)| breaks[tok_idx].comma)
                .map(|(pos, _)| pos);
            let mut preferred_at = None;
            let mut generic_at = None;
            for (pos, &tok_idx) in pending.iter().enumerate().rev() {
                if pos == 0 {
                    break;
                }
                let b = breaks[tok_idx];
                if b.preferred && preferred_at.is_none() {
                    preferred_at = Some(pos);
                }
                if b.allowed && generic_at.is_none() {
                    generic_at = Some(pos);
                }
            }
            if let Some(split_at) = comma_at.or(preferred_at).or(generic_at) {
                let (head, tail) = pending.split_at(split_at);
                out_lines.push(format!("{current_prefix}{}", rendered_of(head)));
                pending = tail.to_vec();
                current_prefix = continuation_indent.clone();
                pending.push(idx);
                continue;
            }
            // No eligible break point: accept the overflow rather than
            // split a protected compound or an unbreakable run.
        }
        pending.push(idx);
    }

    if !pending.is_empty() {
        out_lines.push(format!("{current_prefix}{}", rendered_of(&pending)));
    }
    if out_lines.is_empty() {
        out_lines.push(line.to_string());
    }
    out_lines
}

/// Wrap every physical line of `text` independently.
pub fn wrap(text: &str, options: &FormatOptions) -> String {
    if !options.wrap_long_lines {
        return text.to_string();
    }
    text.split('\n')
        .flat_map(|line| wrap_line(line, options))
        .collect::<Vec<_>>()
        .join("\n")
}
