//! The boundary between the pure analysis functions and a live editor.
//!
//! An [`EditorSession`] owns the loaded rules and vocabulary, the definition
//! lookup and the on/off toggles. Hosts forward every content change to
//! [`EditorSession::highlight`] and cursor activity to
//! [`EditorSession::on_edit`] (debounced) or [`EditorSession::on_selection`]
//! (immediate). Several suggestion requests may be in flight at once; only
//! the most recent one yields [`SuggestionOutcome::Ready`].

use crate::checker::lookup::{DefinitionLookup, DictionaryApi, Offline};
use crate::checker::suggestions::{suggest, Correction, SuggestionResult};
use crate::checker::tokenizer;
use crate::checker::vocabulary::Vocabulary;
use crate::highlight::paint::{paint, StyledRun};
use crate::highlight::{highlight, BoundaryPolicy};
use crate::rules::PatternRule;
use crate::{Config, HighlightInstruction};
use anyhow::Result;
use regex::Regex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// What became of one suggestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// Suggestions are switched off
    Disabled,
    /// The word under the cursor is too short to say anything about
    NeedMoreInput,
    /// The word matches an ignore pattern
    Ignored,
    /// Same word as the last analysed one; the shown result still applies
    Unchanged,
    /// Another edit arrived before the debounce interval elapsed
    Superseded,
    /// A newer request started while this one waited on the lookup
    Stale,
    Ready(SuggestionResult),
}

/// Text after a correction was applied, with the cursor just past the new word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub text: String,
    pub cursor: usize,
}

pub struct EditorSession {
    rules: Vec<PatternRule>,
    vocabulary: Vocabulary,
    lookup: Arc<dyn DefinitionLookup>,
    policy: BoundaryPolicy,
    colors_enabled: bool,
    suggestions_enabled: bool,
    min_word_len: usize,
    debounce: Duration,
    ignore_patterns: Vec<Regex>,
    edit_counter: AtomicU64,
    request_counter: AtomicU64,
    last_word: Mutex<Option<String>>,
}

impl EditorSession {
    pub fn new(
        rules: Vec<PatternRule>,
        vocabulary: Vocabulary,
        lookup: Arc<dyn DefinitionLookup>,
    ) -> Self {
        let defaults = Config::default();
        Self {
            rules,
            vocabulary,
            lookup,
            policy: BoundaryPolicy::Enforce,
            colors_enabled: true,
            suggestions_enabled: true,
            min_word_len: defaults.min_word_len,
            debounce: Duration::from_millis(defaults.debounce_ms),
            ignore_patterns: Vec::new(),
            edit_counter: AtomicU64::new(0),
            request_counter: AtomicU64::new(0),
            last_word: Mutex::new(None),
        }
    }

    /// Build a session from configuration, using the remote dictionary
    /// unless lookups are disabled.
    pub fn from_config(config: &Config) -> Result<Self> {
        let lookup: Arc<dyn DefinitionLookup> = if config.lookup.enabled {
            Arc::new(DictionaryApi::new(&config.lookup)?)
        } else {
            Arc::new(Offline)
        };

        let mut ignore_patterns = Vec::new();
        for pattern in &config.ignore_patterns {
            match Regex::new(pattern) {
                Ok(re) => ignore_patterns.push(re),
                Err(e) => warn!("Invalid ignore pattern '{}': {}", pattern, e),
            }
        }

        let mut session = Self::new(
            config.resolved_rules()?,
            config.resolved_vocabulary()?,
            lookup,
        )
        .with_policy(config.boundary_policy())
        .with_debounce(Duration::from_millis(config.debounce_ms))
        .with_min_word_len(config.min_word_len);
        session.ignore_patterns = ignore_patterns;
        session.colors_enabled = config.colors_enabled;
        session.suggestions_enabled = config.suggestions_enabled;

        Ok(session)
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_min_word_len(mut self, min_word_len: usize) -> Self {
        self.min_word_len = min_word_len;
        self
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn lookup(&self) -> &dyn DefinitionLookup {
        self.lookup.as_ref()
    }

    pub fn colors_enabled(&self) -> bool {
        self.colors_enabled
    }

    pub fn set_colors_enabled(&mut self, enabled: bool) {
        self.colors_enabled = enabled;
    }

    pub fn set_suggestions_enabled(&mut self, enabled: bool) {
        self.suggestions_enabled = enabled;
        if !enabled {
            self.forget_last_word();
        }
    }

    pub fn highlight(&self, text: &str) -> Vec<HighlightInstruction> {
        if !self.colors_enabled {
            return Vec::new();
        }
        highlight(&self.rules, text, self.policy)
    }

    /// Colored runs covering the whole of `text`
    pub fn paint(&self, text: &str) -> Vec<StyledRun> {
        paint(text.len(), &self.highlight(text))
    }

    /// Text changed: wait for the debounce interval, then analyse the word
    /// under the cursor unless another edit came in meanwhile.
    pub async fn on_edit(&self, text: &str, cursor: usize) -> SuggestionOutcome {
        let edit = self.edit_counter.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.debounce).await;

        if self.edit_counter.load(Ordering::SeqCst) != edit {
            return SuggestionOutcome::Superseded;
        }
        self.analyse(text, cursor).await
    }

    /// Cursor moved: analyse right away.
    pub async fn on_selection(&self, text: &str, cursor: usize) -> SuggestionOutcome {
        self.analyse(text, cursor).await
    }

    async fn analyse(&self, text: &str, cursor: usize) -> SuggestionOutcome {
        if !self.suggestions_enabled {
            return SuggestionOutcome::Disabled;
        }

        let token = tokenizer::word_at(text, cursor);
        let gate = if token.text.chars().count() < self.min_word_len {
            Some(SuggestionOutcome::NeedMoreInput)
        } else if self.is_ignored(token.text) {
            Some(SuggestionOutcome::Ignored)
        } else {
            None
        };
        if let Some(outcome) = gate {
            self.request_counter.fetch_add(1, Ordering::SeqCst);
            self.forget_last_word();
            return outcome;
        }

        {
            let mut last = self.last_word.lock().unwrap_or_else(PoisonError::into_inner);
            if last.as_deref() == Some(token.text) {
                return SuggestionOutcome::Unchanged;
            }
            *last = Some(token.text.to_string());
        }

        let request = self.request_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let result = suggest(&token, &self.vocabulary, self.lookup.as_ref()).await;

        if self.request_counter.load(Ordering::SeqCst) != request {
            debug!("dropping stale suggestion for {}", token.text);
            return SuggestionOutcome::Stale;
        }
        SuggestionOutcome::Ready(result)
    }

    fn is_ignored(&self, word: &str) -> bool {
        self.ignore_patterns.iter().any(|re| re.is_match(word))
    }

    fn forget_last_word(&self) {
        *self.last_word.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// A correction for every misspelled word of `text`. Each distinct word
    /// is analysed once, however often it occurs.
    pub async fn corrections(&self, text: &str) -> Vec<Correction> {
        let mut proposals: HashMap<String, Option<Correction>> = HashMap::new();
        let mut corrections = Vec::new();

        for token in tokenizer::words(text) {
            if token.text.chars().count() < self.min_word_len || self.is_ignored(token.text) {
                continue;
            }

            if !proposals.contains_key(token.text) {
                let proposal = match suggest(&token, &self.vocabulary, self.lookup.as_ref()).await {
                    SuggestionResult::Correction(correction) => Some(correction),
                    _ => None,
                };
                proposals.insert(token.text.to_string(), proposal);
            }

            if let Some(Some(proposal)) = proposals.get(token.text) {
                corrections.push(Correction {
                    definition: proposal.definition.clone(),
                    ..Correction::for_token(&token, &proposal.proposed)
                });
            }
        }

        corrections
    }
}

/// Replace the corrected word in place.
///
/// Returns `None` when the correction no longer lines up with `text`.
pub fn apply_correction(text: &str, correction: &Correction) -> Option<Applied> {
    let start = correction.original_start;
    let end = start.checked_add(correction.original_length)?;
    text.get(start..end)?;

    let mut replaced = String::with_capacity(text.len() + correction.proposed.len());
    replaced.push_str(&text[..start]);
    replaced.push_str(&correction.proposed);
    replaced.push_str(&text[end..]);

    Some(Applied {
        text: replaced,
        cursor: start + correction.proposed.len(),
    })
}

/// Apply several non-overlapping corrections, last one first so earlier
/// offsets stay valid. Corrections that do not line up are skipped.
pub fn apply_corrections(text: &str, corrections: &[Correction]) -> (String, usize) {
    let mut ordered: Vec<&Correction> = corrections.iter().collect();
    ordered.sort_by_key(|c| std::cmp::Reverse(c.original_start));

    let mut current = text.to_string();
    let mut applied = 0;
    let mut limit = text.len();
    for correction in ordered {
        match correction.original_start.checked_add(correction.original_length) {
            Some(end) if end <= limit => {}
            _ => continue,
        }
        if let Some(result) = apply_correction(&current, correction) {
            current = result.text;
            limit = correction.original_start;
            applied += 1;
        }
    }

    (current, applied)
}
