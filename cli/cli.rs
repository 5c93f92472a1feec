use markercheck_core::{
    AnalysedFile, CliArgs, Command as CoreCommand, MarkerArgs, SkipList, find_files,
    process_files, summarize,
};
mod interaction;
mod progress;
mod report;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use console::style;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_NOTHING_TO_DO: u8 = 2;

fn print_completions_cli(shell: clap_complete::Shell) {
    let mut cmd = CliArgs::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn resolve_skip_list(args: &MarkerArgs, cwd: &Path) -> PathBuf {
    if args.skip_list.is_absolute() {
        args.skip_list.clone()
    } else {
        cwd.join(&args.skip_list)
    }
}

fn report_files(results: &[AnalysedFile], pause: bool) {
    for result in results
        .iter()
        .filter(|r| r.has_violations() || r.is_unreadable())
    {
        if let Err(e) = report::print_file_report(result) {
            tracing::warn!("Could not write report for {}: {}", result.path.display(), e);
        }
        if let Err(e) = interaction::pause_after_report(pause) {
            tracing::warn!("Pause failed, continuing: {}", e);
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli: CliArgs = CliArgs::parse();

    if let Some(command_enum_val) = cli.command {
        match command_enum_val {
            CoreCommand::Completion(args) => {
                print_completions_cli(args.shell);
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    let main_app_args = cli.main_opts;
    init_tracing(main_app_args.verbose);

    let cwd = std::env::current_dir().context("Current directory")?;
    let skip_list_path = resolve_skip_list(&main_app_args, &cwd);
    let skip_list = match SkipList::load(&skip_list_path, &cwd) {
        Ok(list) => list,
        Err(e) => {
            eprintln!(
                "{}",
                style(format!(
                    "Error reading skip list {}: {}",
                    skip_list_path.display(),
                    e
                ))
                .red()
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    let selection = match find_files(&main_app_args, &skip_list) {
        Ok(selection) => selection,
        Err(e) => {
            eprintln!("{}", style(format!("Error finding files: {:#}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    if selection.files.is_empty() {
        println!("No files to analyse. Aborting.");
        return Ok(ExitCode::from(EXIT_NOTHING_TO_DO));
    }

    println!("Total files found : {}", selection.found());
    println!("Files to skip     : {}", selection.skipped.len());
    println!("Files to analyse  : {}", selection.files.len());
    println!();

    let rules = main_app_args.rules();
    tracing::debug!(
        indent_step = rules.indent_step,
        width = rules.width,
        skip_entries = skip_list.len(),
        "starting analysis"
    );
    let bar = progress::file_bar(selection.files.len(), main_app_args.no_progress);
    let results = process_files(&selection.files, &rules, || bar.inc(1));
    bar.finish_and_clear();

    report_files(&results, !main_app_args.no_pause);

    let summary = summarize(&results);
    report::print_summary(&summary).context("Writing summary")?;
    tracing::debug!(
        analysed = summary.files_analysed,
        with_violations = summary.files_with_violations,
        unreadable = summary.files_unreadable,
        "scan finished"
    );

    if summary.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
