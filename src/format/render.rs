//! Re-joining tokens back into source text. Used by the structural
//! formatters after they have rearranged tokens onto their own lines.

use crate::format::token::Token;

const NO_SPACE_BEFORE: &[&str] = &[",", ")", ";", "::", "."];
const NO_SPACE_AFTER: &[&str] = &["(", "::", "."];

/// Join a run of tokens on a single logical line with conventional spacing:
/// no space before `,`/`)`/`.`/`::`, none after `(`/`.`/`::`.
pub fn render_tokens(tokens: &[&Token]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token> = None;
    for tok in tokens {
        let glued_before = NO_SPACE_BEFORE.contains(&tok.value.as_str());
        let glued_after = prev
            .map(|p| NO_SPACE_AFTER.contains(&p.value.as_str()))
            .unwrap_or(true);
        if !out.is_empty() && !glued_before && !glued_after {
            out.push(' ');
        }
        out.push_str(&tok.value);
        prev = Some(tok);
    }
    out
}

/// Split a token slice at top-level commas (tokens whose `depth` equals the
/// slice's own minimum depth) into comma-separated item groups.
pub fn split_top_level_commas<'a>(tokens: &[&'a Token]) -> Vec<Vec<&'a Token>> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let base_depth = tokens.iter().map(|t| t.depth).min().unwrap();
    let mut items = Vec::new();
    let mut current: Vec<&Token> = Vec::new();
    for &tok in tokens {
        if tok.depth == base_depth && tok.value == "," {
            items.push(std::mem::take(&mut current));
            continue;
        }
        current.push(tok);
    }
    items.push(current);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::scanner::scan;
    use crate::format::token::tokenize;

    #[test]
    fn joins_with_conventional_spacing() {
        let s = scan("a.b::int, c");
        let tokens = tokenize(&s);
        let refs: Vec<&Token> = tokens.iter().collect();
        assert_eq!(render_tokens(&refs), "a.b::int, c");
    }

    #[test]
    fn splits_top_level_commas_but_not_nested_ones() {
        let s = scan("a int, b numeric(10, 2)");
        let tokens = tokenize(&s);
        let refs: Vec<&Token> = tokens.iter().collect();
        let items = split_top_level_commas(&refs);
        assert_eq!(items.len(), 2);
    }
}
