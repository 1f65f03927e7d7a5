// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use listening_import::utils::logging::{
    format_row_error, format_row_warning, format_success, format_summary,
};
use listening_import::{
    detect_range, parse_part_text_in_range, BatchProcessor, Config, CsvNormalizer, JsonExporter,
    ParsedItem, PerformanceMetrics, QuestionRange, Validator,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "listening_import")]
#[command(version = "0.1.0")]
#[command(about = "Content normalization pipeline for listening-test imports", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize one listening-exercise CSV export
    Csv {
        file: PathBuf,

        /// Skill test id; defaults to the file stem
        #[arg(long)]
        test_id: Option<String>,

        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },

    /// Parse pasted part text into questions and info rows
    Text {
        file: PathBuf,

        /// IELTS-style part number (1-4)
        #[arg(short, long)]
        part: u32,

        /// Strategy hint: table, mcq, or notes
        #[arg(long)]
        hint: Option<String>,

        /// Explicit question range, e.g. 5-8; overrides header detection
        #[arg(long)]
        range: Option<QuestionRange>,

        /// Fail when no range header is detected instead of falling back
        #[arg(long)]
        strict: bool,

        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },

    /// Normalize every csv export under a directory
    Batch {
        dir: PathBuf,

        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    listening_import::utils::logging::init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Csv {
            file,
            test_id,
            output,
            pretty,
        } => cmd_csv(&config, file, test_id, output, pretty),
        Commands::Text {
            file,
            part,
            hint,
            range,
            strict,
            output,
            pretty,
        } => cmd_text(&config, file, part, hint, range, strict, output, pretty),
        Commands::Batch {
            dir,
            output,
            pretty,
        } => cmd_batch(config, dir, output, pretty),
    }
}

fn cmd_csv(
    config: &Config,
    file: PathBuf,
    test_id: Option<String>,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    Validator::validate_file_path(&file)?;
    Validator::validate_csv_extension(&file)?;

    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let test_id = test_id.unwrap_or_else(|| {
        file.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "import".to_string())
    });

    let start = Instant::now();
    let normalizer = CsvNormalizer::from_config(config);
    let report = normalizer.normalize(&text, &config.import.skill_type, &test_id);

    for warning in &report.warnings {
        println!("{}", format_row_warning(warning));
    }
    for error in &report.errors {
        println!("{}", format_row_error(error));
        for (field, value) in &error.fields {
            println!("    {}: {:?}", field, value);
        }
    }
    println!("{}", format_summary(&report.summary));
    info!(
        "{}",
        PerformanceMetrics::new("normalize", report.summary.rows_received, start.elapsed())
            .format()
    );

    if let Some(dir) = output {
        let exporter = JsonExporter::new(dir)?;
        let manifest = exporter.export_report(&test_id, &text, &report, pretty)?;
        println!(
            "{}",
            format_success(&format!("wrote {}", manifest.files.join(", ")))
        );
    }

    if !report.ok {
        anyhow::bail!("import blocked: no valid rows in {}", file.display());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_text(
    config: &Config,
    file: PathBuf,
    part: u32,
    hint: Option<String>,
    range: Option<QuestionRange>,
    strict: bool,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    Validator::validate_file_path(&file)?;
    Validator::validate_part_number(part)?;

    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    Validator::validate_content_not_empty(&text)?;

    let range = match range {
        Some(range) => range,
        None => match detect_range(&text) {
            Ok(range) => range,
            Err(err) if strict => {
                return Err(err).context("range detection failed (strict mode)");
            }
            Err(_) => {
                let fallback = QuestionRange::new(
                    config.parser.fallback_range_start,
                    config.parser.fallback_range_end,
                )
                .unwrap_or(QuestionRange::FALLBACK);
                warn!("no range header detected, using fallback {}", fallback);
                fallback
            }
        },
    };

    let items = parse_part_text_in_range(&text, part, hint.as_deref(), range);
    let questions = items.iter().filter(|item| !item.is_info()).count();
    let info_rows = items.len() - questions;
    println!(
        "{}",
        format_success(&format!(
            "parsed {} questions and {} info rows in range {}",
            questions, info_rows, range
        ))
    );

    for item in &items {
        match item {
            ParsedItem::Question(q) => println!("  ({}) {}", q.number, q.text),
            ParsedItem::Info(info) => println!("  -- {}", info.text),
        }
    }

    if let Some(dir) = output {
        let name = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "part".to_string());
        let exporter = JsonExporter::new(dir)?;
        let manifest = exporter.export_items(&name, &text, &items, pretty)?;
        println!(
            "{}",
            format_success(&format!("wrote {}", manifest.files.join(", ")))
        );
    }

    Ok(())
}

fn cmd_batch(
    mut config: Config,
    dir: PathBuf,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    if let Some(output) = output {
        config.import.output_dir = output;
    }

    let processor = BatchProcessor::new(config);
    let stats = processor.run(&dir, pretty).context("Batch import failed")?;

    println!(
        "{}",
        format_success(&format!(
            "{} files imported, {} failed, {} rows accepted ({:.0}% of rows)",
            stats.files_processed,
            stats.files_failed,
            stats.rows_valid,
            stats.row_acceptance_rate()
        ))
    );

    if stats.files_failed > 0 {
        anyhow::bail!("{} files produced no valid rows", stats.files_failed);
    }
    Ok(())
}
