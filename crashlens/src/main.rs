//! # crashlens - Main Entry Point
//!
//! One run analyzes one crash: the map and log are read, the stack trace is
//! resolved and written to `--out`, and the report (plus excerpts of the
//! referenced data files) is printed to stdout. `--export` also writes the
//! report as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use crashlens::cli::Args;
use crashlens::correction::{FileProbe, ReferenceCorrector};
use crashlens::domain::PipelineError;
use crashlens::export::ReportExporter;
use crashlens::pipeline::{read_log, Pipeline};
use crashlens::preflight::run_preflight_checks;
use crashlens::report::{write_report, Report};
use crashlens::snippet::{ExcerptRenderer, SnippetRenderer};
use crashlens::stack_trace::save_resolved_stack;
use crashlens::symbolization::SymbolTable;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_NOINPUT: i32 = 66;

fn main() {
    let args = Args::parse();
    let default_level = if args.quiet { "error" } else { "warn" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_level));

    std::process::exit(match run(&args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    let msg = err.to_string().to_lowercase();
    if msg.contains("not found") || msg.contains("not a file") {
        EXIT_NOINPUT
    } else if msg.contains("missing required argument") {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

fn run(args: &Args) -> Result<()> {
    let quiet = args.quiet;

    run_preflight_checks(&args.map, &args.log, &args.dta_root)?;

    if !quiet {
        println!("crashlens v{}", env!("CARGO_PKG_VERSION"));
    }

    let config = args.to_config();
    let pipeline = Pipeline::from_config(&config).context("Failed to set up log scanners")?;

    let symbols = SymbolTable::read(&args.map).map_err(PipelineError::from)?;
    let log_text = read_log(&args.log)?;
    let report = pipeline.analyze(&symbols, &log_text);

    save_resolved_stack(&report.stack_trace.frames, &args.out)
        .map_err(|source| PipelineError::OutputWrite { path: args.out.clone(), source })?;
    info!("Resolved stack written to {}", args.out.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&report, &mut out)?;

    if !args.no_snippets {
        print_snippets(&report, pipeline.corrector(), &mut out)?;
    }

    if !quiet {
        writeln!(out, "\nsaved: {}", args.out.display())?;
    }

    if let Some(ref export_path) = args.export {
        let file = File::create(export_path).context("Failed to create report output file")?;
        ReportExporter::new(&report)
            .export(BufWriter::new(file))
            .context("Failed to export report")?;

        if !quiet {
            writeln!(out, "saved: {}", export_path.display())?;
        }
    }

    Ok(())
}

/// Print an excerpt for each distinct reference whose file exists
fn print_snippets<P: FileProbe>(
    report: &Report,
    corrector: &ReferenceCorrector<P>,
    out: &mut dyn Write,
) -> Result<()> {
    let renderer = ExcerptRenderer::default();
    let mut shown = HashSet::new();

    for reference in &report.references {
        if !shown.insert(reference) {
            continue;
        }
        let path = corrector.resolve(&reference.path);
        if !path.is_file() {
            warn!("dta file not found: {}", path.display());
            continue;
        }
        writeln!(out)?;
        renderer
            .render(&path, reference.line, out)
            .with_context(|| format!("Failed to read {}", path.display()))?;
    }

    Ok(())
}
