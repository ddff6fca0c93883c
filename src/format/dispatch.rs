//! Structural-family dispatch: a table lookup on
//! the statement's leading keywords selects a [`StatementConfig`], not a
//! `dyn`-dispatched formatter — every family shares one engine
//! ([`format_generic`]), configured per shape.

use crate::format::clauses::{format_generic, StatementConfig};
use crate::format::token::Token;
use crate::format::FormatOptions;

const DOMAIN: StatementConfig = StatementConfig {
    clause_keywords: &["AS", "CONSTRAINT", "CHECK", "NOT", "DEFAULT", "COLLATE"],
    clause_phrases: &[],
    has_paren_list: false,
};
const ENUM_TYPE: StatementConfig = StatementConfig {
    clause_keywords: &[],
    clause_phrases: &[],
    has_paren_list: true,
};
const COMPOSITE_TYPE: StatementConfig = StatementConfig {
    clause_keywords: &[],
    clause_phrases: &[],
    has_paren_list: true,
};
const RANGE_TYPE: StatementConfig = StatementConfig {
    clause_keywords: &[],
    clause_phrases: &[],
    has_paren_list: true,
};
const TABLE: StatementConfig = StatementConfig {
    clause_keywords: &["INHERITS", "PARTITION", "WITH", "TABLESPACE", "USING"],
    clause_phrases: &[],
    has_paren_list: true,
};
// `ALTER` itself is deliberately absent from `clause_keywords`: it is this
// family's own leading token, and a bare match there would collapse the
// header on every statement. `ALTER COLUMN` is still a real clause start
// inside an `ALTER TABLE` body, so it's matched as a two-word phrase
// instead.
const ALTER_TABLE: StatementConfig = StatementConfig {
    clause_keywords: &["ADD", "DROP", "RENAME", "OWNER", "SET", "VALIDATE", "ENABLE", "DISABLE"],
    clause_phrases: &[("ALTER", "COLUMN")],
    has_paren_list: false,
};
const COLLATION: StatementConfig = StatementConfig {
    clause_keywords: &[],
    clause_phrases: &[],
    has_paren_list: true,
};
const FUNCTION: StatementConfig = StatementConfig {
    clause_keywords: &[
        "RETURNS", "LANGUAGE", "TRANSFORM", "WINDOW", "IMMUTABLE", "STABLE", "VOLATILE", "LEAKPROOF",
        "STRICT", "CALLED", "SECURITY", "PARALLEL", "COST", "ROWS", "SUPPORT", "SET", "AS",
    ],
    clause_phrases: &[],
    has_paren_list: true,
};
const POLICY: StatementConfig = StatementConfig {
    clause_keywords: &["AS", "FOR", "TO", "USING", "WITH"],
    clause_phrases: &[],
    has_paren_list: false,
};
const TRIGGER: StatementConfig = StatementConfig {
    clause_keywords: &["BEFORE", "AFTER", "INSTEAD", "ON", "FROM", "REFERENCING", "FOR", "WHEN", "EXECUTE"],
    clause_phrases: &[],
    has_paren_list: false,
};
const INDEX: StatementConfig = StatementConfig {
    clause_keywords: &["USING", "INCLUDE", "WITH", "TABLESPACE", "WHERE"],
    clause_phrases: &[],
    has_paren_list: true,
};
const AGGREGATE: StatementConfig = StatementConfig {
    clause_keywords: &["SFUNC", "STYPE", "FINALFUNC", "INITCOND", "PARALLEL"],
    clause_phrases: &[],
    has_paren_list: true,
};
const LANGUAGE: StatementConfig = StatementConfig {
    clause_keywords: &["HANDLER", "INLINE", "VALIDATOR"],
    clause_phrases: &[],
    has_paren_list: false,
};
const MATERIALIZED_VIEW: StatementConfig = StatementConfig {
    clause_keywords: &["WITH", "TABLESPACE", "AS"],
    clause_phrases: &[],
    has_paren_list: false,
};
const SUBSCRIPTION: StatementConfig = StatementConfig {
    clause_keywords: &["CONNECTION", "PUBLICATION", "WITH"],
    clause_phrases: &[],
    has_paren_list: false,
};
const FDW: StatementConfig = StatementConfig {
    clause_keywords: &["HANDLER", "VALIDATOR", "OPTIONS"],
    clause_phrases: &[],
    has_paren_list: false,
};
const SERVER: StatementConfig = StatementConfig {
    clause_keywords: &["TYPE", "VERSION", "FOREIGN", "OPTIONS"],
    clause_phrases: &[],
    has_paren_list: false,
};
const GENERIC_ALTER: StatementConfig = StatementConfig {
    clause_keywords: &["RENAME", "OWNER", "SET", "TO"],
    clause_phrases: &[],
    has_paren_list: false,
};

/// Matches `text`'s uppercased head against a fixed prefix list, returning
/// the configured shape for the first family whose head matches.
fn family_for(head: &str) -> Option<&'static StatementConfig> {
    let u = head.to_uppercase();
    let starts = |p: &str| u.starts_with(p);
    if starts("CREATE DOMAIN") {
        Some(&DOMAIN)
    } else if starts("CREATE TYPE") && u.contains("ENUM") {
        Some(&ENUM_TYPE)
    } else if starts("CREATE TYPE") && u.contains("RANGE") {
        Some(&RANGE_TYPE)
    } else if starts("CREATE TYPE") {
        Some(&COMPOSITE_TYPE)
    } else if starts("CREATE TABLE") || starts("CREATE UNLOGGED TABLE") || starts("CREATE TEMP") || starts("CREATE TEMPORARY TABLE") {
        Some(&TABLE)
    } else if starts("ALTER TABLE") {
        Some(&ALTER_TABLE)
    } else if starts("CREATE COLLATION") {
        Some(&COLLATION)
    } else if starts("CREATE FUNCTION") || starts("CREATE OR REPLACE FUNCTION") || starts("CREATE PROCEDURE") || starts("CREATE OR REPLACE PROCEDURE") {
        Some(&FUNCTION)
    } else if starts("CREATE POLICY") {
        Some(&POLICY)
    } else if starts("CREATE TRIGGER") || starts("CREATE EVENT TRIGGER") || starts("CREATE CONSTRAINT TRIGGER") {
        Some(&TRIGGER)
    } else if starts("CREATE INDEX") || starts("CREATE UNIQUE INDEX") {
        Some(&INDEX)
    } else if starts("CREATE AGGREGATE") {
        Some(&AGGREGATE)
    } else if starts("CREATE LANGUAGE") || starts("CREATE OR REPLACE LANGUAGE") || starts("CREATE TRUSTED LANGUAGE") {
        Some(&LANGUAGE)
    } else if starts("CREATE MATERIALIZED VIEW") {
        Some(&MATERIALIZED_VIEW)
    } else if starts("CREATE SUBSCRIPTION") {
        Some(&SUBSCRIPTION)
    } else if starts("CREATE FOREIGN DATA WRAPPER") {
        Some(&FDW)
    } else if starts("CREATE SERVER") {
        Some(&SERVER)
    } else if starts("ALTER ") {
        Some(&GENERIC_ALTER)
    } else {
        None
    }
}

/// Dispatch `tokens` (whole statement) to its structural formatter. Returns
/// `None` when no family matched, or the matched family's shape wasn't
/// present in the tokens — callers fall back to the single-line/untouched
/// rendering of the whole statement.
pub fn dispatch(text: &str, tokens: &[Token], options: &FormatOptions) -> Option<String> {
    let config = family_for(text)?;
    format_generic(tokens, options, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::render::render_tokens;
    use crate::format::scanner::scan;
    use crate::format::token::tokenize;

    #[test]
    fn table_family_formats_column_list() {
        let text = "CREATE TABLE public.foo (id int, name text)";
        let s = scan(text);
        let tokens = tokenize(&s);
        let options = FormatOptions::default();
        let out = dispatch(text, &tokens, &options).unwrap();
        assert!(out.contains("CREATE TABLE public.foo ("));
        assert!(out.contains("id int"));
    }

    #[test]
    fn alter_table_keeps_its_header_on_the_first_line() {
        let text = "ALTER TABLE public.orders ADD COLUMN status text";
        let s = scan(text);
        let tokens = tokenize(&s);
        let options = FormatOptions::default();
        let out = dispatch(text, &tokens, &options).unwrap();
        assert_eq!(out, "ALTER TABLE public.orders\n  ADD COLUMN status text");
    }

    #[test]
    fn unmatched_family_returns_none() {
        let text = "SELECT 1";
        let s = scan(text);
        let tokens = tokenize(&s);
        let options = FormatOptions::default();
        assert!(dispatch(text, &tokens, &options).is_none());
        let refs: Vec<&Token> = tokens.iter().collect();
        assert_eq!(render_tokens(&refs), "SELECT 1");
    }
}
