//! Applies highlight instructions the way an editor would: one after another,
//! each repainting its span, with every byte outside all spans reset to the
//! default color.

use crate::rules::Color;
use crate::HighlightInstruction;
use serde::Serialize;
use std::ops::Range;

/// A maximal stretch of text drawn in one color. `None` is the default color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledRun {
    pub range: Range<usize>,
    pub color: Option<Color>,
}

/// Resolve `instructions` into runs covering `0..text_len` exactly.
///
/// Later instructions win where spans overlap. Spans reaching past
/// `text_len` are clipped.
pub fn paint(text_len: usize, instructions: &[HighlightInstruction]) -> Vec<StyledRun> {
    let mut owner: Vec<Option<usize>> = vec![None; text_len];
    for (index, instruction) in instructions.iter().enumerate() {
        let end = instruction.span.end.min(text_len);
        let start = instruction.span.start.min(end);
        owner[start..end].iter_mut().for_each(|slot| *slot = Some(index));
    }

    let color_of = |slot: Option<usize>| slot.map(|i| &instructions[i].color);

    let mut runs: Vec<StyledRun> = Vec::new();
    let mut run_start = 0;
    for pos in 1..=text_len {
        let boundary = pos == text_len || color_of(owner[pos]) != color_of(owner[pos - 1]);
        if boundary {
            runs.push(StyledRun {
                range: run_start..pos,
                color: color_of(owner[pos - 1]).cloned(),
            });
            run_start = pos;
        }
    }

    runs
}
