use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use dxeditor::checker::{self, tokenizer::Token};
use dxeditor::cli::output::{self, OutputFormat};
use dxeditor::config::Overrides;
use dxeditor::highlight::paint::paint;
use dxeditor::session::SuggestionOutcome;
use dxeditor::{suggest, Config, EditorSession};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dxeditor")]
#[command(version, about = "Dyslexia-friendly highlighting and spelling help", long_about = None)]
struct Cli {
    /// Files to highlight
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Never contact the definition service
    #[arg(long, global = true)]
    offline: bool,

    /// Match `\b` rules anywhere, not only at word boundaries
    #[arg(long, global = true)]
    lenient_boundaries: bool,

    /// Built-in rule and vocabulary tables to use (e.g., en-EN)
    #[arg(short, long, global = true)]
    language: Option<String>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text", global = true)]
    format: OutputFormat,

    /// More log output (-v, -vv, -vvv); DXEDITOR_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Check one word, or the word at a cursor position in a file
    Suggest {
        /// Word to check
        #[arg(required_unless_present = "file")]
        word: Option<String>,

        /// File holding the text
        #[arg(long, requires = "cursor", conflicts_with = "word")]
        file: Option<PathBuf>,

        /// Byte offset of the cursor in the file
        #[arg(long, requires = "file")]
        cursor: Option<usize>,
    },
    /// Replace misspelled words with their closest known word
    Fix {
        /// Files to fix in place
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Confirm each replacement
        #[arg(short, long)]
        interactive: bool,
    },
    /// List the active highlight rules in evaluation order
    Rules,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("DXEDITOR_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("dxeditor={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "dxeditor", &mut io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);
    debug!("dxeditor v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load(Overrides {
        language: cli.language.clone(),
        offline: cli.offline,
        lenient_boundaries: cli.lenient_boundaries,
    })?;
    let session = EditorSession::from_config(&config)?;
    let colored = !cli.no_color;

    match cli.command {
        Some(Commands::Suggest { word, file, cursor }) => {
            run_suggest(&session, word, file, cursor, colored, cli.format).await
        }
        Some(Commands::Fix { files, interactive }) => {
            run_fix(&session, &files, interactive, colored).await
        }
        Some(Commands::Rules) => {
            output::print_rules(session.rules(), colored);
            Ok(())
        }
        None => run_highlight(&session, &cli.files, colored, cli.format),
    }
}

fn run_highlight(
    session: &EditorSession,
    files: &[PathBuf],
    colored: bool,
    format: OutputFormat,
) -> Result<()> {
    if files.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }

    // analysis is independent per file; printing stays in argument order
    let documents: Vec<Result<(String, Vec<_>)>> = files
        .par_iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let instructions = session.highlight(&text);
            Ok((text, instructions))
        })
        .collect();

    for (path, document) in files.iter().zip(documents) {
        let (text, instructions) = match document {
            Ok(document) => document,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                continue;
            }
        };

        match format {
            OutputFormat::Json => output::print_json_highlights(path, &instructions)?,
            OutputFormat::Text => {
                let runs = paint(text.len(), &instructions);
                output::print_highlighted(path, &text, &runs, colored, files.len() > 1);
            }
        }
    }

    Ok(())
}

async fn run_suggest(
    session: &EditorSession,
    word: Option<String>,
    file: Option<PathBuf>,
    cursor: Option<usize>,
    colored: bool,
    format: OutputFormat,
) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));

    match (word, file, cursor) {
        (Some(word), _, _) => {
            spinner.set_message(format!("Analyzing {}...", word));
            let token = Token::new(&word, 0);
            let result = suggest(&token, session.vocabulary(), session.lookup()).await;
            spinner.finish_and_clear();

            match format {
                OutputFormat::Json => output::print_json(&result)?,
                OutputFormat::Text => output::print_suggestion(&result, colored),
            }
        }
        (None, Some(path), Some(cursor)) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            spinner.set_message("Analyzing...");
            let outcome = session.on_selection(&text, cursor).await;
            spinner.finish_and_clear();

            match (format, &outcome) {
                (OutputFormat::Json, SuggestionOutcome::Ready(result)) => {
                    output::print_json(result)?
                }
                _ => output::print_outcome(&outcome, colored),
            }
        }
        _ => {
            spinner.finish_and_clear();
            anyhow::bail!("Give a word, or both --file and --cursor.");
        }
    }

    Ok(())
}

async fn run_fix(
    session: &EditorSession,
    files: &[PathBuf],
    interactive: bool,
    colored: bool,
) -> Result<()> {
    let mut total_fixed = 0;

    for file_path in files {
        if !file_path.exists() {
            eprintln!("Error: File not found: {}", file_path.display());
            continue;
        }

        let result = if interactive {
            checker::fix_interactive(session, file_path, colored).await?
        } else {
            checker::fix_auto(session, file_path).await?
        };
        debug!(
            "{}: {} proposed, {} applied",
            file_path.display(),
            result.proposed_count,
            result.fixed_count
        );
        total_fixed += result.fixed_count;
    }

    output::print_fix_summary(total_fixed, files, colored);
    Ok(())
}
