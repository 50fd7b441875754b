use crate::checker::suggestions::{Correction, SuggestionResult};
use crate::highlight::paint::StyledRun;
use crate::rules::{Color, PatternRule};
use crate::session::SuggestionOutcome;
use crate::HighlightInstruction;
use anyhow::Result;
use colored::*;
use dialoguer::Confirm;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonHighlights<'a> {
    file: String,
    instructions: &'a [HighlightInstruction],
}

/// `#RRGGBB` (or `#RGB`) to its components; other color names are not drawn.
fn hex_rgb(color: &Color) -> Option<(u8, u8, u8)> {
    let hex = color.as_str().strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let (r, g, b) = (channel(&hex[0..1])?, channel(&hex[1..2])?, channel(&hex[2..3])?);
            Some((r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

/// Render `text` run by run. Without color, highlighted runs are bracketed.
pub fn render_runs(text: &str, runs: &[StyledRun], colored_output: bool) -> String {
    let mut rendered = String::with_capacity(text.len());

    for run in runs {
        let piece = &text[run.range.clone()];
        match &run.color {
            None => rendered.push_str(piece),
            Some(color) if colored_output => match hex_rgb(color) {
                Some((r, g, b)) => rendered.push_str(&piece.truecolor(r, g, b).to_string()),
                None => {
                    tracing::warn!("cannot draw color {}", color);
                    rendered.push_str(piece);
                }
            },
            Some(_) => {
                rendered.push('[');
                rendered.push_str(piece);
                rendered.push(']');
            }
        }
    }

    rendered
}

pub fn print_highlighted(
    file_path: &Path,
    text: &str,
    runs: &[StyledRun],
    colored_output: bool,
    show_name: bool,
) {
    if show_name {
        let file_name = file_path.display().to_string();
        if colored_output {
            println!("\n{}", file_name.bold().underline());
        } else {
            println!("\n{}", file_name);
        }
    }

    let rendered = render_runs(text, runs, colored_output);
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }
}

pub fn print_json_highlights(
    file_path: &Path,
    instructions: &[HighlightInstruction],
) -> Result<()> {
    let output = JsonHighlights {
        file: file_path.display().to_string(),
        instructions,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_suggestion(result: &SuggestionResult, colored: bool) {
    let no_definition = "No definition available.";

    match result {
        SuggestionResult::Known { word, definition } => {
            let definition = definition.as_deref().unwrap_or(no_definition);
            if colored {
                println!("{} {}", "✓ Correct:".green().bold(), word.bold());
                println!("  {}", definition.dimmed());
            } else {
                println!("✓ Correct: {}", word);
                println!("  {}", definition);
            }
        }
        SuggestionResult::Correction(correction) => {
            let definition = correction.definition.as_deref().unwrap_or(no_definition);
            if colored {
                println!(
                    "{} {}?",
                    "Did you mean:".yellow().bold(),
                    correction.proposed.green().underline()
                );
                println!("  {}", definition.dimmed().italic());
            } else {
                println!("Did you mean: {}?", correction.proposed);
                println!("  {}", definition);
            }
        }
        SuggestionResult::NoSuggestion => {
            if colored {
                println!("{}", "✗ Unknown word. No suggestions found.".red());
            } else {
                println!("✗ Unknown word. No suggestions found.");
            }
        }
    }
}

pub fn print_outcome(outcome: &SuggestionOutcome, colored: bool) {
    let note = match outcome {
        SuggestionOutcome::Ready(result) => return print_suggestion(result, colored),
        SuggestionOutcome::Disabled => "Suggestions are turned off.",
        SuggestionOutcome::NeedMoreInput => "(Type or click a word...)",
        SuggestionOutcome::Ignored => "(Word skipped by an ignore pattern)",
        SuggestionOutcome::Unchanged | SuggestionOutcome::Superseded | SuggestionOutcome::Stale => {
            return
        }
    };

    if colored {
        println!("{}", note.dimmed());
    } else {
        println!("{}", note);
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_rules(rules: &[PatternRule], colored: bool) {
    if rules.is_empty() {
        println!("No highlight rules configured.");
        return;
    }

    for (i, rule) in rules.iter().enumerate() {
        let swatch = match hex_rgb(rule.color()) {
            Some((r, g, b)) if colored => "■".truecolor(r, g, b).to_string(),
            _ => "■".to_string(),
        };
        println!(
            "  {:>2}. {} {:<10} {}",
            i + 1,
            swatch,
            rule.color().as_str(),
            rule.source()
        );
    }
}

pub fn print_fix_summary(total_fixed: usize, files: &[impl AsRef<Path>], colored: bool) {
    println!();
    if total_fixed == 0 {
        if colored {
            println!("{}", "No corrections needed!".green().bold());
        } else {
            println!("No corrections needed!");
        }
    } else {
        let fix_word = if total_fixed == 1 { "correction" } else { "corrections" };
        if colored {
            println!(
                "{} {} {} applied to {} {}",
                "✓".green().bold(),
                total_fixed.to_string().green().bold(),
                fix_word,
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            );
        } else {
            println!(
                "✓ {} {} applied to {} {}",
                total_fixed,
                fix_word,
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            );
        }
    }
}

/// The line of `text` holding the corrected word, with the word marked.
fn correction_context(text: &str, correction: &Correction, colored: bool) -> String {
    let start = correction.original_start.min(text.len());
    let end = (start + correction.original_length).min(text.len());
    if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        return String::new();
    }

    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);
    let word = &text[start..end];
    let marked = if colored {
        word.red().bold().to_string()
    } else {
        format!("[{}]", word)
    };

    format!(
        "{}{}{}",
        &text[line_start..start],
        marked,
        &text[end..line_end]
    )
}

/// Ask whether to apply one correction
pub fn prompt_correction(text: &str, correction: &Correction, colored: bool) -> Result<bool> {
    println!("\n  {}", correction_context(text, correction, colored));

    let prompt = if colored {
        format!("Replace with {}?", correction.proposed.green())
    } else {
        format!("Replace with {}?", correction.proposed)
    };

    Ok(Confirm::new().with_prompt(prompt).default(true).interact()?)
}
