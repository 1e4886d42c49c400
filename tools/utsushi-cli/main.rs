use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use utsushi::config::parse_language_map;
use utsushi::document::sample::sample_document;
use utsushi::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TranslatorCli {
    Mock,
    Identity,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatCli {
    Pretty,
    Json,
}

/// Mirror the template branch of a workflow document onto its other selection branches
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow JSON (document, workflow with body, or {"workflow": ...} envelope)
    path: Option<PathBuf>,

    /// Write the result instead of a dry run
    #[arg(long)]
    write: bool,

    /// Write to this file instead of overwriting the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Selection label of the template branch, e.g. English
    #[arg(long)]
    source_label: Option<String>,

    /// Extra label -> locale overrides, as JSON or `Label:code,...`
    #[arg(long)]
    language_map: Option<String>,

    /// Text transform applied to user-visible strings
    #[arg(short, long, value_enum, default_value = "mock")]
    translator: TranslatorCli,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatCli,

    /// Run against the built-in sample document and print the result
    #[arg(long)]
    self_test: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    let options = build_options(&cli);
    let translator: Box<dyn TextTransform> = match cli.translator {
        TranslatorCli::Mock => Box::new(MockTranslator),
        TranslatorCli::Identity => Box::new(IdentityTransform),
    };
    let engine = Engine::builder(options).with_transform(translator).build();

    if cli.self_test {
        run_self_test(&engine);
        return;
    }

    let path = cli.path.clone().unwrap_or_else(|| {
        exit_with_error("A workflow path is required unless --self-test is given.");
    });
    let mut store = JsonFileStore::new(&path);
    if let Some(output) = &cli.output {
        store = store.with_output(output);
    }

    let start = Instant::now();
    let report = engine
        .run_and_persist(&mut store)
        .unwrap_or_else(|e| exit_with_error(&format!("Mirroring failed: {}", e)));

    print_report(&report);
    if report.persisted {
        println!("\nWrote {}", store.output().display());
    } else {
        println!("\nDry run; pass --write to save.");
    }
    println!("Finished in {:?}", start.elapsed());
}

/// Environment first, then flags on top.
fn build_options(cli: &Cli) -> RunOptions {
    let mut options = RunOptions::from_env()
        .unwrap_or_else(|e| exit_with_error(&format!("Configuration error: {}", e)));

    if let Some(label) = &cli.source_label {
        options.source_label = label.clone();
    }
    if let Some(raw) = &cli.language_map {
        let extra = parse_language_map(raw)
            .unwrap_or_else(|e| exit_with_error(&format!("Configuration error: {}", e)));
        options.language_map.extend(extra);
    }
    if cli.write {
        options.dry_run = false;
    }
    options
}

fn run_self_test(engine: &Engine) {
    println!("--- Utsushi Self Test ---");
    let mut store = MemoryStore::new(sample_document());
    let report = engine
        .run_and_persist(&mut store)
        .unwrap_or_else(|e| exit_with_error(&format!("Self test failed: {}", e)));

    print_report(&report);
    let json = report
        .document
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Could not render document: {}", e)));
    println!("\n{}", json);
}

fn print_report(report: &RunReport) {
    println!("\n{}", SummaryFormatter::format_summary(&report.summary));
    println!("Branches\n{}", SummaryFormatter::format_branches(&report.summary));
    println!("\n{}", SummaryFormatter::format_diff(&report.diff));
    println!("\n{}", SummaryFormatter::format_validation(&report.validation));
}

fn init_logging(level: &str, format: LogFormatCli) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormatCli::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormatCli::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
