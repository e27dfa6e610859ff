//! Run command - Apply a transformation to Vue SFC files

use clap::{Args, ValueEnum};
use ignore::Walk;
use rayon::prelude::*;
use retouche_core::{
    transform_file, PropsStyle, TransformOptions, TransformReport, Transformation,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::config::load_config;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable summary
    #[default]
    Text,
    /// JSON summary on stdout
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PropsStyleArg {
    /// `type Props` plus `defineProps<Props>()`
    Typed,
    /// `defineProps({ ... })` with the runtime object
    Runtime,
}

impl From<PropsStyleArg> for PropsStyle {
    fn from(style: PropsStyleArg) -> Self {
        match style {
            PropsStyleArg::Typed => PropsStyle::Typed,
            PropsStyleArg::Runtime => PropsStyle::Runtime,
        }
    }
}

#[derive(Args)]
pub struct RunArgs {
    /// Glob pattern(s) to match .vue files (default: ./**/*.vue)
    #[arg(default_value = "./**/*.vue")]
    pub patterns: Vec<String>,

    /// Transformation to apply (see `retouche list`)
    #[arg(short, long, default_value = "script-setup")]
    pub transformation: Transformation,

    /// Write transformed output back to the files
    #[arg(short, long)]
    pub write: bool,

    /// Exit with an error if any file would change
    #[arg(long)]
    pub check: bool,

    /// Print transformed files to stdout
    #[arg(long)]
    pub print: bool,

    /// Number of threads (default: number of CPUs)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Summary format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Config file path (default: ./retouche.config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Props declaration style (overrides the config file)
    #[arg(long, value_enum)]
    pub props_style: Option<PropsStyleArg>,

    /// Wrap typed props in withDefaults() (overrides the config file)
    #[arg(long)]
    pub with_defaults: bool,
}

#[derive(Debug, Default)]
struct RunStats {
    changed: AtomicUsize,
    unchanged: AtomicUsize,
    errored: AtomicUsize,
}

/// Outcome of one file.
#[derive(Debug)]
enum FileStatus {
    Changed {
        code: String,
        dropped_options: Vec<String>,
    },
    Unchanged,
    Failed(String),
}

#[derive(Debug, Serialize)]
struct FileFailure {
    path: String,
    error: String,
}

#[derive(Debug, Serialize)]
struct DroppedOptions {
    path: String,
    options: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Summary<'r> {
    transformation: &'static str,
    files: usize,
    changed: usize,
    unchanged: usize,
    errored: usize,
    report: &'r TransformReport,
    dropped: Vec<DroppedOptions>,
    failures: Vec<FileFailure>,
}

pub fn run(args: RunArgs) {
    let start = Instant::now();

    if let Some(threads) = args.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            tracing::warn!("Failed to configure thread pool: {}", e);
        }
    }

    let options = build_options(&args);
    let files = collect_files(&args.patterns);
    if files.is_empty() {
        eprintln!("No .vue files found matching the patterns");
        return;
    }
    tracing::info!("Found {} .vue file(s)", files.len());

    let report = TransformReport::new();
    let stats = RunStats::default();

    let results: Vec<(PathBuf, FileStatus)> = files
        .par_iter()
        .map(|path| {
            let status = process_file(path, args.transformation, &options, args.write);
            match &status {
                FileStatus::Changed { .. } => {
                    report.record(args.transformation.name());
                    stats.changed.fetch_add(1, Ordering::Relaxed);
                }
                FileStatus::Unchanged => {
                    stats.unchanged.fetch_add(1, Ordering::Relaxed);
                }
                FileStatus::Failed(error) => {
                    tracing::error!("{}: {}", path.display(), error);
                    stats.errored.fetch_add(1, Ordering::Relaxed);
                }
            }
            (path.clone(), status)
        })
        .collect();

    let mut dropped = Vec::new();
    let mut failures = Vec::new();
    for (path, status) in results {
        let path = path.display().to_string();
        match status {
            FileStatus::Changed {
                code,
                dropped_options,
            } => {
                if args.print {
                    println!("// {path}\n{code}");
                }
                if args.check {
                    eprintln!("Would transform: {path}");
                }
                if !dropped_options.is_empty() {
                    dropped.push(DroppedOptions {
                        path,
                        options: dropped_options,
                    });
                }
            }
            FileStatus::Unchanged => {}
            FileStatus::Failed(error) => failures.push(FileFailure { path, error }),
        }
    }

    let summary = Summary {
        transformation: args.transformation.name(),
        files: files.len(),
        changed: stats.changed.load(Ordering::Relaxed),
        unchanged: stats.unchanged.load(Ordering::Relaxed),
        errored: stats.errored.load(Ordering::Relaxed),
        report: &report,
        dropped,
        failures,
    };

    match args.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to serialize summary: {}", e),
        },
        OutputFormat::Text => print_summary(&summary, &args, start),
    }

    if summary.errored > 0 || (args.check && summary.changed > 0) {
        std::process::exit(1);
    }
}

fn print_summary(summary: &Summary<'_>, args: &RunArgs, start: Instant) {
    eprintln!();
    for entry in &summary.dropped {
        eprintln!(
            "  {}: dropped option(s) {}",
            entry.path,
            entry.options.join(", ")
        );
    }

    let verb = if args.write {
        "transformed"
    } else {
        "would be transformed"
    };
    eprintln!(
        "Checked {} file(s) in {:.4}s",
        summary.files,
        start.elapsed().as_secs_f64()
    );
    for (name, count) in summary.report.entries() {
        eprintln!("  {name}: {count} file(s) {verb}");
    }
    if summary.unchanged > 0 {
        eprintln!("  {} file(s) unchanged", summary.unchanged);
    }
    if summary.errored > 0 {
        eprintln!("  {} file(s) had errors", summary.errored);
    }
    if !args.write && !args.check && summary.changed > 0 {
        eprintln!("Use --write to apply changes");
    }
}

/// Config file options, overridden by command-line flags.
fn build_options(args: &RunArgs) -> TransformOptions {
    let mut options = load_config(args.config.as_deref()).options;
    if let Some(style) = args.props_style {
        options.props_style = style.into();
    }
    if args.with_defaults {
        options.with_defaults = true;
    }
    options
}

fn process_file(
    path: &Path,
    transformation: Transformation,
    options: &TransformOptions,
    write: bool,
) -> FileStatus {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => return FileStatus::Failed(format!("Failed to read file: {}", e)),
    };

    let filename = path.to_string_lossy();
    let outcome = match transform_file(&filename, &source, transformation, options) {
        Ok(outcome) => outcome,
        Err(e) => return FileStatus::Failed(e.to_string()),
    };
    if !outcome.changed {
        return FileStatus::Unchanged;
    }

    if write {
        if let Err(e) = fs::write(path, &outcome.code) {
            return FileStatus::Failed(format!("Failed to write file: {}", e));
        }
        tracing::info!("Transformed: {}", path.display());
    }

    FileStatus::Changed {
        code: outcome.code,
        dropped_options: outcome
            .dropped_options
            .into_iter()
            .map(|option| option.to_string())
            .collect(),
    }
}

fn collect_files(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for pattern in patterns {
        let (root, glob_pattern) = parse_pattern(pattern);

        for entry in Walk::new(&root).flatten() {
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "vue")
                && pattern_matches(path, &glob_pattern)
            {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

fn parse_pattern(pattern: &str) -> (String, String) {
    if let Some(pos) = pattern.find(['*', '?']) {
        let root_part = &pattern[..pos];
        let root = root_part
            .rfind('/')
            .map_or(".", |last_slash| &pattern[..last_slash]);
        let root = if root.is_empty() { "." } else { root };
        return (root.to_string(), pattern.to_string());
    }

    let path = Path::new(pattern);
    if path.is_dir() {
        let dir = pattern.trim_end_matches('/');
        return (dir.to_string(), format!("{}/**/*.vue", dir));
    }

    if path.is_file() && pattern.ends_with(".vue") {
        let parent = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| ".".to_string());
        return (parent, pattern.to_string());
    }

    (".".to_string(), pattern.to_string())
}

fn pattern_matches(path: &Path, pattern: &str) -> bool {
    let path_str = path.to_string_lossy().replace('\\', "/");

    if pattern == "./**/*.vue" || pattern == "**/*.vue" {
        return path_str.ends_with(".vue");
    }

    if let Some(prefix_end) = pattern.find("**/*.vue") {
        let prefix = pattern[..prefix_end].trim_end_matches('/');
        return path_str.starts_with(&format!("{}/", prefix)) && path_str.ends_with(".vue");
    }

    if pattern.ends_with(".vue") {
        let pattern = pattern.replace('\\', "/");
        let pattern = pattern.trim_start_matches("./");
        return path_str.trim_start_matches("./") == pattern
            || path_str.ends_with(&format!("/{}", pattern));
    }

    path_str.ends_with(".vue")
}
