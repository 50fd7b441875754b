use super::BoundaryPolicy;
use crate::checker::tokenizer::is_word_char;
use crate::rules::{Anchors, Pattern};
use crate::MatchSpan;

/// Rolling-hash base: one digit per possible byte value.
const BASE: u64 = 256;
/// Large prime so that windows rarely collide; `BASE * MODULUS` fits in a u64.
const MODULUS: u64 = 1_000_000_007;

/// Find every span of `text` matched by `pattern`.
pub fn locate(pattern: &Pattern, text: &str, policy: BoundaryPolicy) -> Vec<MatchSpan> {
    match pattern {
        Pattern::SingleChar(letter) => locate_letter(*letter, text),
        Pattern::LiteralAlternation {
            alternatives,
            anchors,
        } => {
            let mut spans = Vec::new();
            for literal in alternatives {
                spans.extend(
                    find_all(literal, text)
                        .into_iter()
                        .filter(|span| match policy {
                            BoundaryPolicy::Enforce => at_boundaries(text, span, *anchors),
                            BoundaryPolicy::Ignore => true,
                        }),
                );
            }
            spans
        }
    }
}

/// Single pass, case-insensitive, one span per matching character.
fn locate_letter(letter: char, text: &str) -> Vec<MatchSpan> {
    text.char_indices()
        .filter(|(_, ch)| ch.to_lowercase().eq(letter.to_lowercase()))
        .map(|(i, ch)| MatchSpan::new(i, ch.len_utf8()))
        .collect()
}

/// All (possibly overlapping) occurrences of `needle` in `haystack`.
pub fn find_all(needle: &str, haystack: &str) -> Vec<MatchSpan> {
    rabin_karp(needle.as_bytes(), haystack.as_bytes(), MODULUS)
}

fn rabin_karp(pattern: &[u8], text: &[u8], modulus: u64) -> Vec<MatchSpan> {
    let m = pattern.len();
    let n = text.len();
    let mut spans = Vec::new();
    if m == 0 || m > n {
        return spans;
    }

    // weight of the leading byte in a window: BASE^(m-1)
    let lead_weight = (1..m).fold(1, |h, _| h * BASE % modulus);

    let mut pattern_hash = 0;
    let mut window_hash = 0;
    for i in 0..m {
        pattern_hash = (BASE * pattern_hash + pattern[i] as u64) % modulus;
        window_hash = (BASE * window_hash + text[i] as u64) % modulus;
    }

    for i in 0..=n - m {
        if pattern_hash == window_hash && &text[i..i + m] == pattern {
            spans.push(MatchSpan::new(i, m));
        }
        if i < n - m {
            let lead = text[i] as u64 * lead_weight % modulus;
            let without_lead = (window_hash + modulus - lead) % modulus;
            window_hash = (BASE * without_lead + text[i + m] as u64) % modulus;
        }
    }

    spans
}

fn at_boundaries(text: &str, span: &MatchSpan, anchors: Anchors) -> bool {
    let before_ok = !anchors.start
        || !text[..span.start]
            .chars()
            .next_back()
            .is_some_and(is_word_char);
    let after_ok = !anchors.end || !text[span.end..].chars().next().is_some_and(is_word_char);
    before_ok && after_ok
}
