pub mod locator;
pub mod paint;

use crate::rules::PatternRule;
use crate::HighlightInstruction;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Whether `\b` anchors in a rule are checked against the surrounding text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// `\b(k)n` matches "know" but not "acknowledge"
    #[default]
    Enforce,
    /// Anchors are dropped and the literal matches anywhere
    Ignore,
}

/// Run every rule over `text`, in order.
///
/// Overlapping spans from different rules are all kept; a consumer applying
/// the instructions in sequence lets later rules win (see [`paint::paint`]).
pub fn highlight(
    rules: &[PatternRule],
    text: &str,
    policy: BoundaryPolicy,
) -> Vec<HighlightInstruction> {
    let mut instructions = Vec::new();
    if text.is_empty() {
        return instructions;
    }

    for rule in rules {
        let spans = locator::locate(rule.pattern(), text, policy);
        trace!("rule {} matched {} spans", rule.source(), spans.len());

        instructions.extend(spans.into_iter().map(|span| HighlightInstruction {
            span,
            color: rule.color().clone(),
        }));
    }

    instructions
}
