use super::PatternRule;
use crate::error::RuleError;
use tracing::debug;

pub const DEFAULT_LANGUAGE: &str = "en-EN";

const SILENT: &str = "#9CA3AF";
const NASAL: &str = "#059669";

// Order matters: the shape-confusion letters come last so they repaint
// any silent-letter span they fall inside.
const EN_RULES: &[(&str, &str)] = &[
    // silent letters: knight, write, night, comb, walk, castle, listen, gnat
    (r"\b(k)n", SILENT),
    (r"\b(w)r", SILENT),
    ("i(gh)", SILENT),
    (r"m(b)\b", SILENT),
    ("a(l)[kf]", SILENT),
    (r"s(t)le\b", SILENT),
    (r"s(t)en\b", SILENT),
    (r"\b(g)n", SILENT),
    // m and n only when they touch: column, hymn, enmity
    ("(mn|nm)", NASAL),
    // b/d/p/q are mirror images of each other
    ("(b)", "#2563EB"),
    ("(d)", "#DC2626"),
    ("(p)", "#7C3AED"),
    ("(q)", "#D97706"),
];

#[rustfmt::skip]
const EN_VOCABULARY: &[&str] = &[
    "project", "computer", "science", "engineering", "algorithm", "editor",
    "dyslexia", "text", "speech", "image", "write", "right", "knight", "night",
    "the", "and", "you", "that", "was", "for", "are", "with", "his", "they",
    "hello", "world", "welcome", "student", "teacher", "school", "university",
    "assignment", "exam", "result", "grade", "class", "lesson", "homework",
    "high", "what", "where", "when", "why", "how", "meaning", "definition",
];

type Tables = (&'static [(&'static str, &'static str)], &'static [&'static str]);

fn tables(language: &str) -> Tables {
    match language {
        "en-EN" | "en_US" | "en_GB" | "en" => (EN_RULES, EN_VOCABULARY),
        other => {
            debug!("no built-in tables for {}, using {}", other, DEFAULT_LANGUAGE);
            (EN_RULES, EN_VOCABULARY)
        }
    }
}

/// Built-in rule table for a language, falling back to English.
pub fn rules(language: &str) -> Result<Vec<PatternRule>, RuleError> {
    tables(language)
        .0
        .iter()
        .map(|(pattern, color)| PatternRule::new(pattern, *color))
        .collect()
}

/// Built-in vocabulary for a language, falling back to English.
pub fn vocabulary(language: &str) -> Vec<String> {
    tables(language).1.iter().map(|s| s.to_string()).collect()
}
