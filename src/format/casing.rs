//! Keyword-case transformation. Runs over the already-structurally-
//! formatted text, re-tokenizing it to find keyword words; placeholders and
//! other opaque tokens are untouched because they never match a keyword's
//! word-token shape.

use crate::format::keywords::{context_requirement, STRUCTURAL_KEYWORDS};
use crate::format::scanner::scan;
use crate::format::token::{tokenize, Token, TokenKind};
use crate::format::{FormatOptions, KeywordCase};

/// Clause keywords whose trailing parenthesized payload is an opaque
/// expression or option list, not further SQL syntax: a `CHECK (...)`
/// expression, a `WITH (...)`/`OPTIONS (...)`/`SET (...)`/`RESET (...)`
/// storage-parameter list.
const PAREN_PAYLOAD_KEYWORDS: &[&str] = &["CHECK", "WITH", "OPTIONS", "SET", "RESET"];

/// Keywords that introduce the name of the object/column/constraint being
/// defined or altered; the word immediately following is a name, never a
/// keyword, even if its text happens to match one.
const NAME_INTRODUCERS: &[&str] = &[
    "TABLE", "VIEW", "INDEX", "TRIGGER", "FUNCTION", "PROCEDURE", "AGGREGATE", "DOMAIN", "TYPE",
    "POLICY", "SEQUENCE", "SCHEMA", "ROLE", "EXTENSION", "LANGUAGE", "PUBLICATION", "SUBSCRIPTION",
    "SERVER", "COLLATION", "CONSTRAINT", "COLUMN",
];

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

/// Protect a name/type span starting at `span_start`: the first token is
/// always protected (it's the name or type being introduced, even if its
/// text matches a keyword); the run then extends across further non-keyword
/// tokens, stopping before the first genuine clause keyword, `,`, or `;`.
fn protect_name_span(tokens: &[Token], span_start: usize, protected: &mut [bool]) -> usize {
    let mut j = span_start;
    let mut first = true;
    while j < tokens.len() {
        let t = &tokens[j];
        if t.value == ";" || t.value == "," {
            break;
        }
        if !first && t.is_word() && STRUCTURAL_KEYWORDS.contains(&t.uppercase_value.as_str()) && context_requirement(&t.uppercase_value).is_none() {
            break;
        }
        protected[j] = true;
        j += 1;
        first = false;
    }
    j
}

/// Compute, for each token index, whether it falls inside a region that
/// must never have its case rewritten, regardless of whether its text
/// matches a `STRUCTURAL_KEYWORDS` entry.
fn protected_ranges(tokens: &[Token]) -> Vec<bool> {
    let mut protected = vec![false; tokens.len()];

    // CHECK/WITH/OPTIONS/SET/RESET clause bodies: the parenthesized payload
    // immediately following the keyword is opaque to casing.
    for (i, t) in tokens.iter().enumerate() {
        if !t.is_word() || !PAREN_PAYLOAD_KEYWORDS.contains(&t.uppercase_value.as_str()) {
            continue;
        }
        if tokens.get(i + 1).map(|n| n.value == "(").unwrap_or(false) {
            let open = i + 1;
            if let Some(close) = matching_close(tokens, open) {
                for p in protected.iter_mut().take(close + 1).skip(open) {
                    *p = true;
                }
            }
        }
    }

    // `ADD COLUMN <name> <type...>` / `ALTER COLUMN <name> TYPE <type...>`:
    // the name and type span is never structural syntax, even when a
    // column is named after a keyword.
    let mut i = 0;
    while i + 1 < tokens.len() {
        let (a, b) = (&tokens[i], &tokens[i + 1]);
        let is_add_column = a.is_word() && a.uppercase_value == "ADD" && b.is_word() && b.uppercase_value == "COLUMN";
        let is_alter_column = a.is_word() && a.uppercase_value == "ALTER" && b.is_word() && b.uppercase_value == "COLUMN";
        if !is_add_column && !is_alter_column {
            i += 1;
            continue;
        }

        if is_add_column {
            i = protect_name_span(tokens, i + 2, &mut protected);
            continue;
        }

        // ALTER COLUMN <name> TYPE <type...>: skip the name, then require a
        // literal `TYPE` keyword before the protected type span begins;
        // other `ALTER COLUMN` sub-clauses (`SET DEFAULT`, `DROP NOT NULL`,
        // ...) are left to ordinary keyword casing.
        match tokens.get(i + 3) {
            Some(t) if t.is_word() && t.uppercase_value == "TYPE" => {
                i = protect_name_span(tokens, i + 4, &mut protected);
            }
            _ => i += 2,
        }
    }

    // Object-name position: the token right after a name-introducing
    // keyword is the name being defined, not a keyword.
    for i in 0..tokens.len() {
        let t = &tokens[i];
        if t.is_word() && NAME_INTRODUCERS.contains(&t.uppercase_value.as_str()) {
            if let Some(next) = tokens.get(i + 1) {
                if next.is_word() {
                    protected[i + 1] = true;
                }
            }
        }
    }

    // Qualified-identifier exclusion: a word immediately adjacent to a `.`
    // is a name component, never a keyword.
    for i in 0..tokens.len() {
        let t = &tokens[i];
        if !t.is_word() {
            continue;
        }
        let prev_is_dot = i > 0 && tokens[i - 1].value == ".";
        let next_is_dot = tokens.get(i + 1).map(|n| n.value == ".").unwrap_or(false);
        if prev_is_dot || next_is_dot {
            protected[i] = true;
        }
    }

    protected
}

/// Apply `options.keyword_case` to every eligible keyword word-token in
/// `text`, skipping tokens whose context requirement (`SAFE`/`UNSAFE`/
/// `RESTRICTED` only after `PARALLEL`, `DEFINER`/`INVOKER` only after
/// `SECURITY`, `KEY` only after `PRIMARY`/`FOREIGN`) isn't satisfied by the
/// immediately preceding word, or that fall inside a protected range (a
/// `CHECK`/`WITH`/`OPTIONS`/`SET`/`RESET` clause body, an `ADD COLUMN`/
/// `ALTER COLUMN TYPE` name-and-type span, an object-name position, or a
/// qualified-identifier component).
pub fn apply_casing(text: &str, options: &FormatOptions) -> String {
    if matches!(options.keyword_case, KeywordCase::Preserve) {
        return text.to_string();
    }

    let s = scan(text);
    let tokens = tokenize(&s);
    let protected = protected_ranges(&tokens);
    let mut out: Vec<char> = s.chars.clone();
    let mut last_word: Option<String> = None;

    for (idx, tok) in tokens.iter().enumerate() {
        if tok.kind != TokenKind::Word {
            continue;
        }
        let upper = &tok.uppercase_value;
        let eligible = STRUCTURAL_KEYWORDS.contains(&upper.as_str()) && !protected[idx];
        let context_ok = match context_requirement(upper) {
            Some(allowed) => last_word.as_deref().map(|w| allowed.contains(&w)).unwrap_or(false),
            None => true,
        };

        if eligible && context_ok {
            let replacement = match options.keyword_case {
                KeywordCase::Upper => tok.value.to_uppercase(),
                KeywordCase::Lower => tok.value.to_lowercase(),
                KeywordCase::Preserve => tok.value.clone(),
            };
            for (offset, ch) in replacement.chars().enumerate() {
                out[tok.start + offset] = ch;
            }
        }

        last_word = Some(upper.clone());
    }

    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(case: KeywordCase) -> FormatOptions {
        FormatOptions {
            keyword_case: case,
            ..FormatOptions::default()
        }
    }

    #[test]
    fn uppercases_structural_keywords_only() {
        let out = apply_casing("create table foo (id int)", &opts(KeywordCase::Upper));
        assert_eq!(out, "CREATE TABLE foo (id int)");
    }

    #[test]
    fn respects_parallel_context_for_safe() {
        let cased = apply_casing("function f() parallel safe", &opts(KeywordCase::Upper));
        assert!(cased.contains("PARALLEL SAFE"));

        let uncased = apply_casing("safe parallel", &opts(KeywordCase::Upper));
        // "safe" has no preceding PARALLEL here, so it stays lowercase.
        assert!(uncased.contains("safe PARALLEL"));
    }

    #[test]
    fn preserve_mode_is_a_no_op() {
        let input = "create table Foo (id int)";
        assert_eq!(apply_casing(input, &opts(KeywordCase::Preserve)), input);
    }

    #[test]
    fn check_clause_body_is_left_uncased() {
        let out = apply_casing("CREATE TABLE t (a int check (a is not null))", &opts(KeywordCase::Upper));
        assert_eq!(out, "CREATE TABLE t (a int CHECK (a is not null))");
    }

    #[test]
    fn options_clause_body_is_left_uncased() {
        let out = apply_casing("create index i on t using btree (a) with (fillfactor = 70)", &opts(KeywordCase::Upper));
        assert!(out.contains("WITH (fillfactor = 70)"));
    }

    #[test]
    fn add_column_name_matching_a_keyword_is_not_recased() {
        let out = apply_casing("alter table t add column key text", &opts(KeywordCase::Upper));
        assert_eq!(out, "ALTER TABLE t ADD COLUMN key text");
    }

    #[test]
    fn alter_column_type_matching_a_keyword_is_not_recased() {
        let out = apply_casing("alter table t alter column status type key", &opts(KeywordCase::Upper));
        assert_eq!(out, "ALTER TABLE t ALTER COLUMN status TYPE key");
    }

    #[test]
    fn object_name_matching_a_keyword_is_not_recased() {
        let out = apply_casing("create table key (id int)", &opts(KeywordCase::Upper));
        assert_eq!(out, "CREATE TABLE key (id int)");
    }

    #[test]
    fn qualified_identifier_component_matching_a_keyword_is_not_recased() {
        let out = apply_casing("select t.all from t", &opts(KeywordCase::Upper));
        assert!(out.contains("t.all"));
    }

    #[test]
    fn keywords_after_the_protected_span_still_get_cased() {
        let out = apply_casing("alter table t add column status text not null default 'x'", &opts(KeywordCase::Upper));
        assert!(out.contains("ADD COLUMN status text NOT NULL DEFAULT 'x'"));
    }
}
