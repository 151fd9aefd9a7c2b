//! Shell-style wildcard patterns compiled to anchored regular expressions.
//!
//! Semantics follow classic `fnmatch`: `*` matches any run of characters
//! including `/`, `?` matches one character, `[seq]` and `[!seq]` match
//! character sets. Matching is case-sensitive.

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid pattern {pattern:?}: {source}")]
pub struct PatternError {
    pub pattern: String,
    pub source: regex::Error,
}

#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    regex: Regex,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(&translate(pattern)).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

/// Ordered collection of patterns; a candidate matches if any pattern does.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<GlobPattern>,
}

impl PatternSet {
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|pattern| GlobPattern::new(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn matches_any(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(candidate))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2 + 8);
    out.push_str("^(?s:");
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut out, &chars[i..end]);
                    i = end + 1;
                }
                None => out.push_str("\\["),
            },
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }
    out.push_str(")$");
    out
}

/// Index of the `]` closing a class whose body starts at `start`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

fn push_class(out: &mut String, body: &[char]) {
    out.push('[');
    let mut rest = body;
    if let Some((&'!', tail)) = rest.split_first() {
        out.push('^');
        rest = tail;
    } else if let Some((&'^', tail)) = rest.split_first() {
        out.push_str("\\^");
        rest = tail;
    }
    for &c in rest {
        match c {
            '\\' | '[' | ']' | '&' | '~' => {
                out.push('\\');
                out.push(c);
            }
            other => out.push(other),
        }
    }
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, candidate: &str) -> bool {
        GlobPattern::new(pattern).unwrap().matches(candidate)
    }

    #[test]
    fn star_crosses_directory_separators() {
        assert!(matches("*.png", "img/logo.png"));
        assert!(matches("*/README.md", "guide/nested/README.md"));
        assert!(!matches("*/README.md", "README.md"));
        assert!(!matches("*.png", "logo.png.md"));
    }

    #[test]
    fn question_mark_matches_one_char() {
        assert!(matches("file?.md", "file1.md"));
        assert!(!matches("file?.md", "file12.md"));
    }

    #[test]
    fn character_classes_and_negation() {
        assert!(matches("[abc].md", "b.md"));
        assert!(!matches("[abc].md", "d.md"));
        assert!(matches("[!abc].md", "d.md"));
        assert!(!matches("[!abc].md", "a.md"));
        assert!(matches("[a-c]x", "bx"));
        assert!(matches("[]]x", "]x"));
    }

    #[test]
    fn unclosed_bracket_is_literal() {
        assert!(matches("[abc", "[abc"));
        assert!(!matches("[abc", "a"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(matches("a+b(1).md", "a+b(1).md"));
        assert!(!matches("a.md", "abmd"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!matches("*/readme.md", "guide/README.md"));
    }

    #[test]
    fn pattern_set_matches_any_member() {
        let set = PatternSet::compile(&["*.svg", "_toctree.yml"]).unwrap();
        assert!(set.matches_any("diagrams/flow.svg"));
        assert!(set.matches_any("_toctree.yml"));
        assert!(!set.matches_any("index.md"));
        assert!(PatternSet::compile::<&str>(&[]).unwrap().is_empty());
    }
}
