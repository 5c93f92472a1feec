pub mod analyzer;
pub mod file_finder;
pub mod processor;
pub mod skip_list;

pub use analyzer::{
    FileReport, MarkerKind, MarkerRules, Violation, analyse_lines, analyse_source,
    classify_marker, inspect_marker, is_end_marker, is_start_marker,
};
pub use file_finder::{CliArgs, Command, CompletionArgs, FileSelection, MarkerArgs, find_files};
pub use processor::{AnalysedFile, ScanSummary, analyse_file, process_files, summarize};
pub use skip_list::SkipList;

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
