pub mod defaults;

use crate::error::RuleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const WORD_BOUNDARY: &str = r"\b";

/// Display color carried through to the host untouched (usually a hex code).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Word-boundary requirements declared with a leading or trailing `\b`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchors {
    pub start: bool,
    pub end: bool,
}

/// A compiled highlighting pattern.
///
/// Rules are written in a tiny regex-like notation and compiled once, when the
/// configuration is loaded:
///
/// - `(c)` with a single letter `c` highlights every `c`, ignoring case.
/// - Anything else is a set of literal strings: `|` separates alternatives,
///   parentheses are dropped, `[xy]` expands into one alternative per
///   character, `\` escapes punctuation, and `\b` may open or close the
///   pattern to require a word boundary there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    SingleChar(char),
    LiteralAlternation {
        alternatives: Vec<String>,
        anchors: Anchors,
    },
}

impl Pattern {
    pub fn literal(text: impl Into<String>) -> Self {
        Pattern::LiteralAlternation {
            alternatives: vec![text.into()],
            anchors: Anchors::default(),
        }
    }

    pub fn parse(source: &str) -> Result<Self, RuleError> {
        if let Some(letter) = single_letter(source) {
            return Ok(Pattern::SingleChar(letter));
        }

        let mut anchors = Anchors::default();
        let mut body = source;
        if let Some(rest) = body.strip_prefix(WORD_BOUNDARY) {
            anchors.start = true;
            body = rest;
        }
        if let Some(rest) = body.strip_suffix(WORD_BOUNDARY) {
            if !rest.ends_with('\\') {
                anchors.end = true;
                body = rest;
            }
        }

        let mut alternatives: Vec<String> = Vec::new();
        let mut current = vec![String::new()];
        let mut chars = body.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '(' | ')' => {}
                '|' => {
                    alternatives.append(&mut std::mem::replace(&mut current, vec![String::new()]))
                }
                '[' => {
                    let class = parse_class(source, &mut chars)?;
                    current = current
                        .iter()
                        .flat_map(|prefix| {
                            class.iter().map(move |c| {
                                let mut expanded = prefix.clone();
                                expanded.push(*c);
                                expanded
                            })
                        })
                        .collect();
                }
                '\\' => {
                    let next = chars.next();
                    if next == Some('b') {
                        return Err(RuleError::MisplacedAnchor(source.to_string()));
                    }
                    let literal = escaped(source, next)?;
                    current.iter_mut().for_each(|s| s.push(literal));
                }
                '.' | '*' | '+' | '?' | '{' | '}' | '^' | '$' | ']' => {
                    return Err(RuleError::Unsupported {
                        pattern: source.to_string(),
                        token: ch.to_string(),
                    });
                }
                literal => current.iter_mut().for_each(|s| s.push(literal)),
            }
        }
        alternatives.append(&mut current);

        let mut seen = std::collections::HashSet::new();
        alternatives.retain(|alt| !alt.is_empty() && seen.insert(alt.clone()));

        if alternatives.is_empty() {
            return Err(RuleError::Empty(source.to_string()));
        }

        Ok(Pattern::LiteralAlternation {
            alternatives,
            anchors,
        })
    }
}

impl FromStr for Pattern {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn single_letter(source: &str) -> Option<char> {
    let mut chars = source.chars();
    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some('('), Some(letter), Some(')'), None) if letter.is_alphabetic() => Some(letter),
        _ => None,
    }
}

fn parse_class(source: &str, chars: &mut std::str::Chars<'_>) -> Result<Vec<char>, RuleError> {
    let mut class = Vec::new();
    loop {
        match chars.next() {
            Some(']') => break,
            Some('\\') => class.push(escaped(source, chars.next())?),
            Some(c) => {
                if !class.contains(&c) {
                    class.push(c);
                }
            }
            None => return Err(RuleError::UnterminatedClass(source.to_string())),
        }
    }

    if class.is_empty() {
        return Err(RuleError::Unsupported {
            pattern: source.to_string(),
            token: "[]".to_string(),
        });
    }
    Ok(class)
}

fn escaped(source: &str, next: Option<char>) -> Result<char, RuleError> {
    match next {
        Some(c) if c.is_ascii_punctuation() => Ok(c),
        Some(c) => Err(RuleError::Unsupported {
            pattern: source.to_string(),
            token: format!("\\{}", c),
        }),
        None => Err(RuleError::Unsupported {
            pattern: source.to_string(),
            token: "\\".to_string(),
        }),
    }
}

/// A rule as written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSource {
    pub pattern: String,
    pub color: Color,
}

/// One highlighting directive: where to look and which color to paint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleSource", into = "RuleSource")]
pub struct PatternRule {
    source: String,
    pattern: Pattern,
    color: Color,
}

impl PatternRule {
    pub fn new(source: &str, color: impl Into<Color>) -> Result<Self, RuleError> {
        Ok(Self {
            source: source.to_string(),
            pattern: Pattern::parse(source)?,
            color: color.into(),
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    /// The pattern as originally written
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl TryFrom<RuleSource> for PatternRule {
    type Error = RuleError;

    fn try_from(raw: RuleSource) -> Result<Self, Self::Error> {
        Self::new(&raw.pattern, raw.color)
    }
}

impl From<PatternRule> for RuleSource {
    fn from(rule: PatternRule) -> Self {
        RuleSource {
            pattern: rule.source,
            color: rule.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternatives(pattern: &Pattern) -> (Vec<String>, Anchors) {
        match pattern {
            Pattern::LiteralAlternation {
                alternatives,
                anchors,
            } => (alternatives.clone(), *anchors),
            Pattern::SingleChar(c) => panic!("expected literals, got single char {:?}", c),
        }
    }

    #[test]
    fn test_single_letter() {
        assert_eq!(Pattern::parse("(b)").unwrap(), Pattern::SingleChar('b'));
        assert_eq!(Pattern::parse("(Q)").unwrap(), Pattern::SingleChar('Q'));
        // digits are not letters, so this is a literal
        let (alts, _) = alternatives(&Pattern::parse("(1)").unwrap());
        assert_eq!(alts, vec!["1"]);
    }

    #[test]
    fn test_alternation_strips_groups() {
        let (alts, anchors) = alternatives(&Pattern::parse("(mn|nm)").unwrap());
        assert_eq!(alts, vec!["mn", "nm"]);
        assert_eq!(anchors, Anchors::default());
    }

    #[test]
    fn test_anchors() {
        let (alts, anchors) = alternatives(&Pattern::parse(r"\b(k)n").unwrap());
        assert_eq!(alts, vec!["kn"]);
        assert!(anchors.start);
        assert!(!anchors.end);

        let (alts, anchors) = alternatives(&Pattern::parse(r"m(b)\b").unwrap());
        assert_eq!(alts, vec!["mb"]);
        assert!(!anchors.start);
        assert!(anchors.end);
    }

    #[test]
    fn test_character_class_expands() {
        let (alts, _) = alternatives(&Pattern::parse("a(l)[kf]").unwrap());
        assert_eq!(alts, vec!["alk", "alf"]);
    }

    #[test]
    fn test_escaped_punctuation() {
        let (alts, _) = alternatives(&Pattern::parse(r"e\.g").unwrap());
        assert_eq!(alts, vec!["e.g"]);
    }

    #[test]
    fn test_rejects_unsupported_syntax() {
        assert!(matches!(
            Pattern::parse("ab*"),
            Err(RuleError::Unsupported { .. })
        ));
        assert!(matches!(
            Pattern::parse(r"\d"),
            Err(RuleError::Unsupported { .. })
        ));
        assert_eq!(
            Pattern::parse("a[bc"),
            Err(RuleError::UnterminatedClass("a[bc".to_string()))
        );
        assert_eq!(
            Pattern::parse(r"a\bc"),
            Err(RuleError::MisplacedAnchor(r"a\bc".to_string()))
        );
        assert_eq!(Pattern::parse("()"), Err(RuleError::Empty("()".to_string())));
        assert_eq!(Pattern::parse(""), Err(RuleError::Empty(String::new())));
    }

    #[test]
    fn test_rule_from_toml() {
        #[derive(Deserialize)]
        struct Table {
            rules: Vec<PatternRule>,
        }

        let table: Table = toml::from_str(
            r##"
            [[rules]]
            pattern = '\b(w)r'
            color = "#9CA3AF"
            "##,
        )
        .unwrap();

        assert_eq!(table.rules.len(), 1);
        assert_eq!(table.rules[0].source(), r"\b(w)r");
        assert_eq!(table.rules[0].color().as_str(), "#9CA3AF");

        let bad: Result<Table, _> = toml::from_str(
            r##"
            [[rules]]
            pattern = "a+"
            color = "#000000"
            "##,
        );
        assert!(bad.is_err());
    }
}
