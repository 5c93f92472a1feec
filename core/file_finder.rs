use crate::analyzer::{DEFAULT_INDENT_STEP, DEFAULT_MARKER_WIDTH, MarkerRules};
use crate::skip_list::{DEFAULT_SKIP_LIST, SkipList};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ignore::overrides::OverrideBuilder;
use ignore::{DirEntry, WalkBuilder};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    about = "Block comment marker checker (main arguments)",
    long_about = "These are the main arguments for checking comment markers."
)]
pub struct MarkerArgs {
    #[clap(help = "Path to the file or directory to check", default_value = ".")]
    pub path: PathBuf,

    #[clap( long, value_name = "EXT", help = "File extension to check [multiple allowed]", default_value = "d", action = clap::ArgAction::Append )]
    pub ext: Vec<String>,
    #[clap( long, value_name = "PATTERN", help = "Glob pattern for files to include [multiple allowed]", action = clap::ArgAction::Append )]
    pub include: Vec<String>,
    #[clap( long, value_name = "PATTERN", help = "Glob pattern for files/directories to exclude [multiple allowed]", action = clap::ArgAction::Append )]
    pub exclude: Vec<String>,
    #[clap(
        long,
        value_name = "FILE",
        help = "File listing paths to skip, one per line",
        default_value = DEFAULT_SKIP_LIST
    )]
    pub skip_list: PathBuf,

    #[clap(
        long,
        help = "Spaces per brace nesting level",
        default_value_t = DEFAULT_INDENT_STEP as u16,
        value_parser = clap::value_parser!(u16)
    )]
    pub indent_step: u16,
    #[clap(
        long,
        help = "Required width of marker lines",
        default_value_t = DEFAULT_MARKER_WIDTH as u16,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub width: u16,

    #[clap(long, help = "Do not pause after each file with violations")]
    pub no_pause: bool,
    #[clap(long, help = "Hide the progress bar")]
    pub no_progress: bool,
    #[clap(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl MarkerArgs {
    pub fn rules(&self) -> MarkerRules {
        MarkerRules {
            indent_step: usize::from(self.indent_step),
            width: usize::from(self.width),
        }
    }
}

impl Default for MarkerArgs {
    fn default() -> Self {
        MarkerArgs {
            path: PathBuf::from("."),
            ext: vec!["d".to_string()],
            include: Vec::new(),
            exclude: Vec::new(),
            skip_list: PathBuf::from(DEFAULT_SKIP_LIST),
            indent_step: DEFAULT_INDENT_STEP as u16,
            width: DEFAULT_MARKER_WIDTH as u16,
            no_pause: false,
            no_progress: false,
            verbose: false,
        }
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    #[clap(about = "Generate shell completion scripts")]
    Completion(CompletionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CompletionArgs {
    #[clap(value_parser = clap::value_parser!(clap_complete::Shell))]
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "markercheck",
    version = "0.1.0",
    about = "Checks indentation and width of full-line block comment markers",
    long_about = "Scans source files for block comment marker lines and reports markers that\nare not indented to brace depth, carry trailing spaces, or are not full width.",
    propagate_version = true
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[clap(flatten)]
    pub main_opts: MarkerArgs,
}

/// Candidate files split into those to analyse and those on the skip list.
#[derive(Debug, Default)]
pub struct FileSelection {
    pub files: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl FileSelection {
    pub fn found(&self) -> usize {
        self.files.len() + self.skipped.len()
    }
}

pub fn find_files(args: &MarkerArgs, skip_list: &SkipList) -> Result<FileSelection> {
    let root = &args.path;
    if !root.exists() {
        anyhow::bail!("Path not found: {}", root.display());
    }
    let exts: HashSet<String> = args
        .ext
        .iter()
        .map(|e| e.trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect();
    if exts.is_empty() {
        anyhow::bail!("No valid extensions specified: {:?}", args.ext);
    }

    let mut walker = WalkBuilder::new(root);
    walker.standard_filters(true);
    walker.hidden(false);
    let mut overrides = OverrideBuilder::new(root);
    for p in &args.exclude {
        let q = format!("!{}", p);
        overrides
            .add(&q)
            .with_context(|| format!("Exclude: {}", p))?;
    }
    for p in &args.include {
        overrides.add(p).with_context(|| format!("Include: {}", p))?;
    }
    walker.overrides(overrides.build().context("Overrides")?);

    let mut selection = FileSelection::default();
    for entry in walker.build() {
        match entry {
            Ok(e) => {
                if e.file_type().is_some_and(|ft| ft.is_file()) && has_target_extension(&e, &exts)
                {
                    let path = e.into_path();
                    if skip_list.contains(&path) {
                        selection.skipped.push(path);
                    } else {
                        selection.files.push(path);
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Walk error: {}", e);
            }
        }
    }
    selection.files.sort();
    selection.skipped.sort();
    tracing::debug!(
        files = selection.files.len(),
        skipped = selection.skipped.len(),
        "file enumeration done"
    );
    Ok(selection)
}

fn has_target_extension(e: &DirEntry, exts: &HashSet<String>) -> bool {
    e.path()
        .extension()
        .map(|x| x.to_string_lossy().to_lowercase())
        .is_some_and(|x| exts.contains(&x))
}
