//! Compile-time keyword tables. Even these fixed sets are plain constants,
//! not configuration loaded at runtime.

/// Keywords eligible for case transformation when they appear as a bare
/// word token (subject to the context restrictions in `is_context_ok`).
pub const STRUCTURAL_KEYWORDS: &[&str] = &[
    "CREATE", "ALTER", "DROP", "TABLE", "VIEW", "MATERIALIZED", "INDEX", "UNIQUE", "TRIGGER",
    "EVENT", "FUNCTION", "PROCEDURE", "AGGREGATE", "DOMAIN", "TYPE", "ENUM", "RANGE", "COLLATION",
    "POLICY", "SEQUENCE", "SCHEMA", "ROLE", "EXTENSION", "LANGUAGE", "PUBLICATION", "SUBSCRIPTION",
    "FOREIGN", "DATA", "WRAPPER", "SERVER", "COLUMN", "CONSTRAINT", "PRIMARY", "KEY", "CHECK",
    "DEFAULT", "NOT", "NULL", "GENERATED", "ALWAYS", "AS", "STORED", "REFERENCES", "MATCH",
    "FULL", "SIMPLE", "PARTIAL", "ON", "DELETE", "UPDATE", "CASCADE", "RESTRICT", "NO", "ACTION",
    "RETURNS", "SETOF", "LANGUAGE", "STABLE", "IMMUTABLE", "VOLATILE", "STRICT", "SECURITY",
    "DEFINER", "INVOKER", "PARALLEL", "SAFE", "UNSAFE", "RESTRICTED", "COST", "ROWS", "SUPPORT",
    "LEAKPROOF", "WINDOW", "CALLED", "INPUT", "RETURNS", "FOR", "EACH", "ROW", "STATEMENT",
    "BEFORE", "AFTER", "INSTEAD", "OF", "EXECUTE", "WHEN", "TO", "USING", "WITH", "WITHOUT",
    "CHECK", "OPTION", "RECURSIVE", "TEMP", "TEMPORARY", "UNLOGGED", "IF", "EXISTS", "CASCADE",
    "OWNED", "BY", "INHERIT", "LOGIN", "SUPERUSER", "REPLICATION", "BYPASSRLS", "CONNECTION",
    "LIMIT", "ENCRYPTED", "PASSWORD", "VALID", "UNTIL", "GRANT", "REVOKE", "ALL", "PRIVILEGES",
    "PUBLIC", "OPTIONS", "RESET", "SET", "ADD", "ONLY", "COMMENT", "IS", "RENAME", "OWNER", "IN",
    "OUT", "INOUT", "VARIADIC", "ORDER", "INTERNALLENGTH", "INPUT", "OUTPUT", "ALIGNMENT",
    "STORAGE", "SFUNC", "STYPE", "SUBTYPE", "SUBTYPE_DIFF", "PUBLICATION", "DATABASE", "TABLES",
    "CONNECT", "SLOT", "ENABLE", "DISABLE", "FORCE", "REPLICA", "VALIDATOR", "HANDLER", "TRUSTED",
    "EXTERNAL", "PROCEDURAL", "COLLATE", "LC_COLLATE", "LC_CTYPE", "LOCALE", "PROVIDER", "DETERMINISTIC",
];

/// Keywords after which a line break is preferred when wrapping.
pub const WRAP_PREFERRED_KEYWORDS: &[&str] = &[
    "ADD", "CHECK", "CONSTRAINT", "FOREIGN", "MATCH", "ON", "REFERENCES", "USING", "WHERE", "WITH",
];

/// Two-token compound prefixes that must never be split across a line
/// break.
pub const COMPOUND_PREFIXES: &[(&str, &str)] = &[
    ("CREATE", "*"),
    ("COMMENT", "ON"),
    ("GRANT", "ALL"),
    ("REVOKE", "ALL"),
];

/// Keywords that are only caseable immediately after a specific preceding
/// keyword: `SAFE`/`UNSAFE`/`RESTRICTED` only after `PARALLEL`, `DEFINER`
/// only after `SECURITY`, `KEY` only after `PRIMARY`/`FOREIGN`.
pub fn context_requirement(word_upper: &str) -> Option<&'static [&'static str]> {
    match word_upper {
        "SAFE" | "UNSAFE" | "RESTRICTED" => Some(&["PARALLEL"]),
        "DEFINER" | "INVOKER" => Some(&["SECURITY"]),
        "KEY" => Some(&["PRIMARY", "FOREIGN"]),
        _ => None,
    }
}
