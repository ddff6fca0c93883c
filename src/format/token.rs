//! Tokens built on top of the scanner. Each token
//! carries `{start, end, value, uppercase_value, depth}`; comments, string
//! literals, quoted identifiers and dollar-quoted/placeholder regions are
//! each a single opaque token so later passes never split them.

use crate::format::scanner::{Scan, RegionKind};

#[derive(Debug, Clone)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub value: String,
    pub uppercase_value: String,
    pub depth: u32,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Punct,
    Opaque,
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Tokenize a full scan. Whitespace is not emitted as tokens; callers that
/// need original spacing use `start`/`end` against the source text instead.
pub fn tokenize(scan: &Scan) -> Vec<Token> {
    let mut tokens = Vec::new();
    let n = scan.len();
    let mut i = 0usize;

    while i < n {
        let c = scan.chars[i];
        let kind = scan.kinds[i];

        if kind != RegionKind::Code {
            let start = i;
            while i < n && scan.kinds[i] == kind {
                i += 1;
            }
            tokens.push(Token {
                start,
                end: i,
                value: scan.substring(start, i),
                uppercase_value: scan.substring(start, i),
                depth: scan.depths[start],
                kind: TokenKind::Opaque,
            });
            continue;
        }

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if is_word_char(c) {
            let start = i;
            while i < n && scan.kinds[i] == RegionKind::Code && is_word_char(scan.chars[i]) {
                i += 1;
            }
            let value = scan.substring(start, i);
            tokens.push(Token {
                start,
                end: i,
                uppercase_value: value.to_uppercase(),
                value,
                depth: scan.depths[start],
                kind: TokenKind::Word,
            });
            continue;
        }

        // Two-character operators worth keeping intact.
        if let Some(&next) = scan.chars.get(i + 1) {
            let two: String = [c, next].iter().collect();
            if matches!(two.as_str(), "::" | "<=" | ">=" | "<>" | "!=" | "||") {
                tokens.push(Token {
                    start: i,
                    end: i + 2,
                    value: two.clone(),
                    uppercase_value: two,
                    depth: scan.depths[i],
                    kind: TokenKind::Punct,
                });
                i += 2;
                continue;
            }
        }

        tokens.push(Token {
            start: i,
            end: i + 1,
            value: c.to_string(),
            uppercase_value: c.to_string(),
            depth: scan.depths[i],
            kind: TokenKind::Punct,
        });
        i += 1;
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::scanner::scan;

    #[test]
    fn words_and_punct_are_split() {
        let s = scan("CREATE TABLE foo (a int)");
        let tokens = tokenize(&s);
        let words: Vec<_> = tokens
            .iter()
            .filter(|t| t.is_word())
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(words, vec!["CREATE", "TABLE", "foo", "a", "int"]);
    }

    #[test]
    fn comments_and_strings_are_opaque() {
        let s = scan("SELECT 'abc' /* hi */ FROM t");
        let tokens = tokenize(&s);
        let opaque: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::Opaque).collect();
        assert_eq!(opaque.len(), 2);
        assert_eq!(opaque[0].value, "'abc'");
    }
}
