use crate::checker::distance::distance;
use crate::checker::lookup::DefinitionLookup;
use crate::checker::tokenizer::Token;
use crate::checker::vocabulary::Vocabulary;
use serde::Serialize;
use tracing::debug;

/// Vocabulary words further than this from the typed word are never proposed.
pub const MAX_DISTANCE: usize = 2;

/// A "did you mean" proposal for the word at `original_start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub proposed: String,
    pub definition: Option<String>,
    pub original_start: usize,
    pub original_length: usize,
}

impl Correction {
    /// Proposal to replace `token` with `proposed`, without a definition
    pub fn for_token(token: &Token<'_>, proposed: impl Into<String>) -> Self {
        Self {
            proposed: proposed.into(),
            definition: None,
            original_start: token.start,
            original_length: token.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionResult {
    /// The word exists, locally or according to the lookup service
    Known {
        word: String,
        definition: Option<String>,
    },
    Correction(Correction),
    NoSuggestion,
}

/// Decide whether `token` is a known word and, if not, propose the closest
/// vocabulary word.
///
/// Definitions are decoration only: a failing lookup never changes the kind
/// of result, it just leaves `definition` empty.
pub async fn suggest(
    token: &Token<'_>,
    vocabulary: &Vocabulary,
    lookup: &dyn DefinitionLookup,
) -> SuggestionResult {
    let normalized = token.text.to_lowercase();
    if normalized.is_empty() {
        return SuggestionResult::NoSuggestion;
    }

    if vocabulary.contains(&normalized) {
        return SuggestionResult::Known {
            word: token.text.to_string(),
            definition: definition_of(lookup, token.text).await,
        };
    }

    // the word may be real, just missing from the small local list
    if let Some(definition) = definition_of(lookup, token.text).await {
        return SuggestionResult::Known {
            word: token.text.to_string(),
            definition: Some(definition),
        };
    }

    match best_match(&normalized, vocabulary) {
        Some((candidate, dist)) => {
            debug!("proposing {} for {} (distance {})", candidate, token.text, dist);
            SuggestionResult::Correction(Correction {
                definition: definition_of(lookup, candidate).await,
                ..Correction::for_token(token, candidate)
            })
        }
        None => SuggestionResult::NoSuggestion,
    }
}

/// Closest vocabulary word within [`MAX_DISTANCE`]; the first one seen wins ties.
pub fn best_match<'v>(word: &str, vocabulary: &'v Vocabulary) -> Option<(&'v str, usize)> {
    let mut best: Option<(&str, usize)> = None;

    for candidate in vocabulary.iter() {
        let dist = distance(word, candidate);
        if dist <= MAX_DISTANCE && best.map_or(true, |(_, min)| dist < min) {
            best = Some((candidate, dist));
        }
    }

    best
}

async fn definition_of(lookup: &dyn DefinitionLookup, word: &str) -> Option<String> {
    match lookup.lookup(word).await {
        Ok(definition) if !definition.trim().is_empty() => Some(definition),
        Ok(_) => None,
        Err(e) => {
            debug!("no definition for {}: {}", word, e);
            None
        }
    }
}
