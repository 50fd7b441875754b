pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod highlight;
pub mod rules;
pub mod session;

pub use checker::suggestions::{suggest, Correction, SuggestionResult};
pub use checker::vocabulary::Vocabulary;
pub use config::Config;
pub use highlight::{highlight, locator::locate, BoundaryPolicy};
pub use rules::{Color, Pattern, PatternRule};
pub use session::EditorSession;

use serde::Serialize;
use std::ops::Range;

/// Half-open byte range into the analysed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub length: usize,
}

impl MatchSpan {
    pub fn new(start: usize, length: usize) -> Self {
        Self {
            start,
            end: start + length,
            length,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightInstruction {
    pub span: MatchSpan,
    pub color: Color,
}
