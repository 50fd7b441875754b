pub mod distance;
pub mod lookup;
pub mod suggestions;
pub mod tokenizer;
pub mod vocabulary;

use crate::cli::output::prompt_correction;
use crate::session::{apply_corrections, EditorSession};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use suggestions::Correction;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixResult {
    pub proposed_count: usize,
    pub fixed_count: usize,
}

/// Apply every proposed correction to the file.
pub async fn fix_auto(session: &EditorSession, file_path: &Path) -> Result<FixResult> {
    let content = read(file_path)?;
    let corrections = session.corrections(&content).await;
    write_fixed(file_path, &content, &corrections, corrections.len())
}

/// Ask before applying each proposed correction.
pub async fn fix_interactive(
    session: &EditorSession,
    file_path: &Path,
    colored: bool,
) -> Result<FixResult> {
    let content = read(file_path)?;
    let corrections = session.corrections(&content).await;

    let mut accepted = Vec::new();
    for correction in &corrections {
        if prompt_correction(&content, correction, colored)? {
            accepted.push(correction.clone());
        }
    }

    write_fixed(file_path, &content, &accepted, corrections.len())
}

fn read(file_path: &Path) -> Result<String> {
    fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))
}

fn write_fixed(
    file_path: &Path,
    content: &str,
    corrections: &[Correction],
    proposed_count: usize,
) -> Result<FixResult> {
    let (new_content, fixed_count) = apply_corrections(content, corrections);

    if fixed_count > 0 {
        fs::write(file_path, new_content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;
    }

    Ok(FixResult {
        proposed_count,
        fixed_count,
    })
}
