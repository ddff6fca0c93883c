//! Identifier quoting/escaping shared by every `Change` impl.

pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

pub fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

pub fn qualified(schema: &str, name: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(name))
}

/// Run `raw` through the formatter when `options` is present, otherwise
/// hand it back untouched: `serialize` with `options: None` means the
/// caller doesn't intend to format.
pub fn maybe_format(raw: String, options: Option<&crate::format::FormatOptions>) -> String {
    match options {
        Some(opts) => crate::format::format(&raw, opts),
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_and_escapes_embedded_quotes() {
        assert_eq!(quote_ident("weird\"name"), "\"weird\"\"name\"");
        assert_eq!(escape_string("it's"), "'it''s'");
    }
}
