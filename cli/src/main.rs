//! studypdf CLI - study plan generator and Markdown-lite PDF renderer

mod gemini;
mod scrape;
mod serper;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use studypdf::crew::PromptCrew;
use studypdf::{JsonFormat, Level, PdfOptions, StudyConfig, StudyPdf, StudyPipeline};

use crate::gemini::GeminiModel;
use crate::scrape::WebFetcher;
use crate::serper::SerperSearch;

#[derive(Parser)]
#[command(name = "studypdf")]
#[command(version)]
#[command(about = "Generate study plans and render Markdown-lite text to PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown-lite file to PDF
    Render {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF (defaults to the input name with .pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Write uncompressed content streams
        #[arg(long)]
        no_compress: bool,
    },

    /// Dump the page layout as JSON
    Json {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show layout information
    Info {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Generate a study guide and assessment for a topic
    Plan {
        /// Topic to learn about
        #[arg(short, long)]
        topic: String,

        /// Familiarity level (Beginner, Intermediate, Advance)
        #[arg(short, long, default_value = "Beginner")]
        level: Level,

        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        gemini_key: Option<String>,

        /// Serper API key
        #[arg(long, env = "SERPER_API_KEY", hide_env_values = true)]
        serper_key: Option<String>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            title,
            no_compress,
        }) => cmd_render(&input, output.as_deref(), title, no_compress),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Plan {
            topic,
            level,
            gemini_key,
            serper_key,
            output,
        }) => cmd_plan(topic, level, gemini_key, serper_key, &output),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: studypdf <COMMAND>".yellow());
            println!("       studypdf --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    title: Option<String>,
    no_compress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = StudyPdf::new();
    if let Some(title) = title {
        builder = builder.with_title(title);
    }
    if no_compress {
        builder = builder.uncompressed();
    }

    let rendered = builder.render_file(input)?;
    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| input.with_extension("pdf"));
    rendered.save_pdf(&path)?;

    println!(
        "{} {} ({} pages)",
        "Saved to".green(),
        path.display(),
        rendered.document.page_count()
    );

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = StudyPdf::new().render_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = rendered.to_json(format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = StudyPdf::new().render_file(input)?;
    let stats = &rendered.stats;

    println!("{}", "Layout Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!("{}: {}", "Runs".bold(), stats.run_count);
    if let Some((width, height)) = rendered.document.pages.first().map(|p| p.dimensions()) {
        println!("{}: {} x {} pt", "Page size".bold(), width, height);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Bullets".bold(), stats.bullet_count);
    println!("{}: {}", "Body lines".bold(), stats.body_count);
    println!("{}: {}", "Wrapped lines".bold(), stats.wrapped_line_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    if stats.degraded_run_count > 0 {
        println!(
            "{}: {} (outside WinAnsi, drawn with substitutes)",
            "Degraded runs".yellow().bold(),
            stats.degraded_run_count
        );
    }

    Ok(())
}

fn cmd_plan(
    topic: String,
    level: Level,
    gemini_key: Option<String>,
    serper_key: Option<String>,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let gemini_key = gemini_key
        .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
        .unwrap_or_default();
    let config = StudyConfig::new(topic)
        .with_gemini_key(gemini_key)
        .with_serper_key(serper_key.unwrap_or_default())
        .with_level(level);
    config.validate()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let crew = PromptCrew::new(
        GeminiModel::new(&config.gemini_api_key, runtime.handle().clone()),
        SerperSearch::new(&config.serper_api_key, runtime.handle().clone()),
    )
    .with_fetcher(WebFetcher::new(runtime.handle().clone()));
    let pipeline = StudyPipeline::new(crew).with_pdf_options(PdfOptions::default());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!(
        "Generating {} study plan for '{}'...",
        config.level,
        config.topic()
    ));

    let result = pipeline.run(&config);
    spinner.finish_and_clear();
    let study = result?;

    fs::create_dir_all(output)?;
    fs::write(output.join("roadmap.md"), &study.roadmap.markdown)?;
    study.roadmap.save(output)?;
    fs::write(output.join("assessment.md"), &study.assessment.markdown)?;
    study.assessment.save(output)?;

    println!("{}", "Study plan ready!".green().bold());
    println!("\n{}", "Output files:".green().bold());
    println!("  {} roadmap.md", "├─".dimmed());
    println!(
        "  {} {} ({} pages)",
        "├─".dimmed(),
        study.roadmap.file_name,
        study.roadmap.page_count()
    );
    println!("  {} assessment.md", "├─".dimmed());
    println!(
        "  {} {} ({} pages)",
        "└─".dimmed(),
        study.assessment.file_name,
        study.assessment.page_count()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "studypdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Study plan generator and Markdown-lite PDF renderer");
    println!();
    println!("License: MIT");
}
