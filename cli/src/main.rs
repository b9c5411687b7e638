//! docscope CLI - document forensics scanner

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};
use log::debug;

use docscope::report::{format_file_size, to_json, AnalysisFailure, FileInfo};
use docscope::{
    analyze_model_file, health, Analyzer, AnalysisResult, AnalyzeOptions, FileType, JsonFormat,
    ModelFileParser, Orchestrator, ParserRegistry, Severity, DEFAULT_MAX_FILE_SIZE,
};

#[derive(Parser)]
#[command(name = "docscope")]
#[command(version)]
#[command(about = "Scan PDF and DOCX files for hidden text, deceptive links and embedded threats", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an upload and analyze its extracted document model
    Analyze {
        /// Uploaded PDF or DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Document model extracted from the file (JSON)
        #[arg(short, long, value_name = "MODEL")]
        model: PathBuf,

        /// Print the JSON response instead of a report
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Maximum upload size in bytes
        #[arg(long, env = "DOCSCOPE_MAX_SIZE", default_value_t = DEFAULT_MAX_FILE_SIZE)]
        max_size: u64,

        /// Directory for staging uploads
        #[arg(long, env = "DOCSCOPE_TEMP_DIR", value_name = "DIR")]
        temp_dir: Option<PathBuf>,

        /// Run checks one after another instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Analyze a document model directly, skipping upload validation
    Scan {
        /// Document model (JSON)
        #[arg(value_name = "MODEL")]
        model: PathBuf,

        /// Print JSON instead of a report
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// List the checks run for each format
    Checks {
        /// Only list checks for this format
        #[arg(value_enum)]
        format: Option<Format>,
    },

    /// Print the health probe response
    Health,

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Pdf,
    Docx,
}

impl From<Format> for FileType {
    fn from(format: Format) -> Self {
        match format {
            Format::Pdf => FileType::Pdf,
            Format::Docx => FileType::Docx,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Analyze {
            input,
            model,
            json,
            compact,
            max_size,
            temp_dir,
            sequential,
        } => {
            let mut options = AnalyzeOptions::new()
                .with_max_file_size(max_size)
                .with_parallel(!sequential);
            if let Some(dir) = temp_dir {
                options = options.with_temp_dir(dir);
            }
            cmd_analyze(&input, &model, options, output_format(json, compact))
        }
        Commands::Scan {
            model,
            json,
            compact,
        } => cmd_scan(&model, output_format(json, compact)),
        Commands::Checks { format } => {
            cmd_checks(format.map(FileType::from));
            Ok(())
        }
        Commands::Health => cmd_health(),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn output_format(json: bool, compact: bool) -> Option<JsonFormat> {
    match (json, compact) {
        (false, _) => None,
        (true, false) => Some(JsonFormat::Pretty),
        (true, true) => Some(JsonFormat::Compact),
    }
}

fn cmd_analyze(
    input: &Path,
    model: &Path,
    options: AnalyzeOptions,
    json: Option<JsonFormat>,
) -> Result<(), Box<dyn std::error::Error>> {
    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let extension = input.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let declared = FileType::from_extension(extension);

    debug!(
        "analyzing {} with model {}",
        input.display(),
        model.display()
    );
    let mut parsers = ParserRegistry::new();
    if let Some(file_type) = declared {
        parsers.register(Arc::new(ModelFileParser::new(file_type, model)));
    }
    let orchestrator = Orchestrator::new(parsers).with_options(options);

    match orchestrator.analyze_path(input) {
        Ok(result) => {
            match json {
                Some(format) => println!("{}", to_json(&result, format)?),
                None => print_report(&result),
            }
            Ok(())
        }
        Err(err) => {
            if let Some(format) = json {
                let size = fs::metadata(input).map(|m| m.len()).unwrap_or_default();
                let file = FileInfo::new(&filename, declared, size);
                println!("{}", to_json(&AnalysisFailure::new(&file, &err), format)?);
            }
            Err(format!("{} error: {}", err.kind().as_str(), err).into())
        }
    }
}

fn cmd_scan(model: &Path, json: Option<JsonFormat>) -> Result<(), Box<dyn std::error::Error>> {
    let result = analyze_model_file(model, &AnalyzeOptions::new())?;

    match json {
        Some(format) => println!("{}", to_json(&result, format)?),
        None => print_report(&result),
    }
    Ok(())
}

fn cmd_checks(format: Option<FileType>) {
    let file_types: Vec<FileType> = match format {
        Some(file_type) => vec![file_type],
        None => FileType::ALL.to_vec(),
    };

    for (i, file_type) in file_types.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", file_type.extension().to_uppercase().cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (n, check) in Analyzer::for_file_type(file_type).checks().iter().enumerate() {
            println!("{:>2}. {:<18} {}", n + 1, check.name().bold(), check.description());
        }
    }
}

fn cmd_health() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(&health())?);
    Ok(())
}

fn print_report(result: &AnalysisResult) {
    let summary = result.summary();

    println!("{}", "Scan Report".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), result.filename);
    println!(
        "{}: {}",
        "Type".bold(),
        result.file_type.extension().to_uppercase()
    );
    println!("{}: {}", "Size".bold(), format_file_size(result.file_size));
    println!("{}: {} ms", "Scan time".bold(), result.scan_time_ms);
    println!();

    println!(
        "{} {}  {} {}  {} {}  {} {}",
        summary.critical.to_string().bold(),
        severity_label(Severity::Critical),
        summary.high.to_string().bold(),
        severity_label(Severity::High),
        summary.medium.to_string().bold(),
        severity_label(Severity::Medium),
        summary.low.to_string().bold(),
        severity_label(Severity::Low),
    );

    if summary.is_clean() {
        println!("\n{}", "No findings.".green().bold());
        return;
    }

    println!();
    for finding in result.findings() {
        let mut line = format!(
            "{} {}/{}",
            severity_label(finding.severity()),
            finding.finding_type(),
            finding.subtype()
        );
        if let Some(location) = finding.location() {
            line.push_str(&format!(" ({})", location));
        }
        println!("{}", line);
        println!("    {}", finding.description());
        if let Some(url) = finding.url() {
            println!("    {} {}", "url:".dimmed(), url);
        }
        if let Some(content) = finding.content() {
            println!("    {} {}", ">".dimmed(), content.replace('\n', " ").dimmed());
        }
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    let label = format!("[{}]", severity.as_str().to_uppercase());
    match severity {
        Severity::Critical => label.red().bold(),
        Severity::High => label.red(),
        Severity::Medium => label.yellow(),
        Severity::Low => label.blue(),
    }
}

fn cmd_version() {
    println!("{} {}", "docscope".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document forensics scanner for PDF and DOCX");
    println!();
    println!("Engine: docscope {}", health().version);
    println!("License: MIT");
}
