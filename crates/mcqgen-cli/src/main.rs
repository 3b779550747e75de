use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use mcqgen_core::config_file;
use mcqgen_core::engine::OpenAiEngine;
use mcqgen_core::{
    Difficulty, EngineConfig, GenerationOptions, QuestionCount, QuestionEngine, SourceKind,
};
use mcqgen_ingest::{Source, load, loader_for};

mod output;

use output::ColorMode;

/// MCQ Generator - Generate multiple-choice questions from PDFs, text files, and web pages
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a document and generate multiple-choice questions from it
    Generate {
        /// Path to a .pdf or .txt file, or a URL
        source: String,

        /// Source type: pdf, text, or url (inferred from SOURCE when omitted)
        #[arg(short = 't', long)]
        source_type: Option<String>,

        /// Number of questions (1-10)
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..=10))]
        num: Option<i64>,

        /// Difficulty level: Easy, Medium, or Hard
        #[arg(short, long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,

        /// Learning objective to steer the questions
        #[arg(long)]
        learning_objective: Option<String>,

        /// File containing a custom prompt template ({num}, {topic}, {difficulty_level})
        #[arg(long)]
        prompt_template: Option<PathBuf>,

        /// Model name for the generation engine
        #[arg(long)]
        model: Option<String>,

        /// API key for the generation engine
        #[arg(long)]
        api_key: Option<String>,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Print the question set as JSON
        #[arg(long)]
        json: bool,

        /// Dry run: load and print the normalized document without generating questions
        #[arg(long)]
        dry_run: bool,
    },
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    s.parse().map_err(|e: mcqgen_core::CoreError| e.to_string())
}

/// Guess the source type from the argument's shape.
fn infer_source_kind(source: &str) -> SourceKind {
    let lower = source.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        SourceKind::Url
    } else if lower.ends_with(".pdf") {
        SourceKind::Pdf
    } else {
        SourceKind::Text
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            source,
            source_type,
            num,
            difficulty,
            learning_objective,
            prompt_template,
            model,
            api_key,
            output,
            no_color,
            json,
            dry_run,
        } => {
            let kind = match source_type {
                Some(s) => s.parse::<SourceKind>()?,
                None => infer_source_kind(&source),
            };

            let color = ColorMode(!no_color && !json && output.is_none());

            if dry_run {
                return dry_run_load(kind, &source, output.as_deref(), color).await;
            }

            let file_config = config_file::load_config();
            let mut engine_config = EngineConfig::from_env(&file_config);
            if let Some(key) = api_key {
                engine_config.api_key = Some(key);
            }
            if let Some(model) = model {
                engine_config.model = model;
            }
            tracing::debug!(config = ?engine_config, "resolved engine config");

            let prompt_template = match prompt_template {
                Some(path) => Some(std::fs::read_to_string(&path).map_err(|e| {
                    anyhow::anyhow!("Failed to read prompt template {}: {}", path.display(), e)
                })?),
                None => None,
            };

            let options = GenerationOptions {
                num: num
                    .map(QuestionCount::new)
                    .transpose()?
                    .unwrap_or_else(|| file_config.default_num()),
                difficulty: difficulty.unwrap_or_else(|| file_config.default_difficulty()),
                learning_objective,
                prompt_template,
            };

            let engine = OpenAiEngine::new(engine_config);
            generate(kind, &source, &engine, &options, output.as_deref(), json, color).await
        }
    }
}

fn build_source(kind: SourceKind, source: &str) -> anyhow::Result<Source> {
    if kind == SourceKind::Url {
        return Ok(Source::Url(source.to_string()));
    }
    let path = PathBuf::from(source);
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    Ok(Source::File(path))
}

/// Stdout, or `path` created (truncating) only once there is something to write.
fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    })
}

async fn dry_run_load(
    kind: SourceKind,
    source: &str,
    output_path: Option<&Path>,
    color: ColorMode,
) -> anyhow::Result<()> {
    let input = build_source(kind, source)?;
    let loader = loader_for(kind);
    let document = load(loader.as_ref(), &input).await?;

    let mut writer = open_output(output_path)?;
    output::print_document(&mut writer, source, &document, true, color)?;
    Ok(())
}

async fn generate(
    kind: SourceKind,
    source: &str,
    engine: &dyn QuestionEngine,
    options: &GenerationOptions,
    output_path: Option<&Path>,
    json: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    let input = build_source(kind, source)?;
    let loader = loader_for(kind);
    let document = load(loader.as_ref(), &input).await?;
    tracing::info!(doc_id = %document.id, kind = %kind, "loaded {}", source);

    if color.enabled() {
        output::print_document(&mut std::io::stderr(), source, &document, false, color)?;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!(
        "Generating {} {} question(s) with {}...",
        options.num,
        options.difficulty,
        engine.name()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = mcqgen_core::generate_mcq(engine, &document.content, options).await;
    spinner.finish_and_clear();
    let set = result?;

    let mut writer = open_output(output_path)?;
    if json {
        serde_json::to_writer_pretty(&mut writer, &set)?;
        writeln!(writer)?;
    } else {
        output::print_questions(&mut writer, &set.questions, color)?;
    }
    Ok(())
}
